extern crate std;

use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::interface::{BusKind, SensorInterface};
use crate::registers::*;
use crate::Error;

/// One single-register bus transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    Read(u8),
    Write(u8, u8),
}

/// Simulated register file with the embedded function-configuration page.
/// Every byte moved counts as one transfer; a transfer can be made to fail.
#[derive(Clone, Debug)]
pub(crate) struct MockInterface {
    regs: [u8; 256],
    func_cfg: [u8; 256],
    ops: Vec<Op>,
    fail_at: Option<usize>,
    boot_stuck: bool,
}

impl Default for MockInterface {
    fn default() -> Self {
        let mut regs = [0u8; 256];
        regs[REG_WHO_AM_I as usize] = STHS34PF80_WAI;
        Self {
            regs,
            func_cfg: [0u8; 256],
            ops: Vec::new(),
            fail_at: None,
            boot_stuck: false,
        }
    }
}

impl MockInterface {
    pub(crate) fn with_reg(mut self, reg: u8, value: u8) -> Self {
        self.regs[reg as usize] = value;
        self
    }

    pub(crate) fn with_func_cfg(mut self, addr: u8, value: u8) -> Self {
        self.func_cfg[addr as usize] = value;
        self
    }

    /// Fail the transfer with this index (0 based, counted from now)
    pub(crate) fn fail_at(&mut self, index: usize) {
        self.fail_at = Some(self.ops.len() + index);
    }

    pub(crate) fn with_stuck_boot(mut self) -> Self {
        self.boot_stuck = true;
        self
    }

    pub(crate) fn reg(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    pub(crate) fn func_cfg(&self, addr: u8) -> u8 {
        self.func_cfg[addr as usize]
    }

    pub(crate) fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub(crate) fn clear_ops(&mut self) {
        self.ops.clear();
        self.fail_at = None;
    }

    fn window_mode(&self) -> Option<PageRw> {
        let ctrl2 = Ctrl2::from(self.regs[REG_CTRL2 as usize]);
        if ctrl2.func_cfg_access() {
            Some(PageRw::from(self.regs[REG_PAGE_RW as usize]))
        } else {
            None
        }
    }

    fn record(&mut self, op: Op) -> Result<(), Error<()>> {
        self.ops.push(op);
        if self.fail_at == Some(self.ops.len() - 1) {
            return Err(Error::Comm(()));
        }
        Ok(())
    }

    fn read_one(&mut self, reg: u8) -> Result<u8, Error<()>> {
        self.record(Op::Read(reg))?;
        if reg == REG_FUNC_CFG_DATA {
            if let Some(mode) = self.window_mode() {
                if mode.func_cfg_read() {
                    let addr = self.regs[REG_FUNC_CFG_ADDR as usize];
                    return Ok(self.func_cfg[addr as usize]);
                }
            }
        }
        let value = self.regs[reg as usize];
        match reg {
            REG_FUNC_STATUS => self.regs[reg as usize] = 0,
            REG_CTRL2 if !self.boot_stuck => {
                self.regs[reg as usize] = u8::from(Ctrl2::from(value).with_boot(false));
                return Ok(self.regs[reg as usize]);
            }
            _ => {}
        }
        Ok(value)
    }

    fn write_one(&mut self, reg: u8, value: u8) -> Result<(), Error<()>> {
        self.record(Op::Write(reg, value))?;
        if reg == REG_FUNC_CFG_DATA {
            if let Some(mode) = self.window_mode() {
                if mode.func_cfg_write() {
                    let addr = self.regs[REG_FUNC_CFG_ADDR as usize];
                    self.func_cfg[addr as usize] = value;
                }
            }
        }
        self.regs[reg as usize] = value;
        Ok(())
    }
}

impl SensorInterface for MockInterface {
    type InterfaceError = Error<()>;

    fn bus_kind(&self) -> BusKind {
        BusKind::I2c
    }

    fn read_block(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Self::InterfaceError> {
        for (offset, slot) in buffer.iter_mut().enumerate() {
            *slot = self.read_one(reg.wrapping_add(offset as u8))?;
        }
        Ok(())
    }

    fn write_block(&mut self, reg: u8, block: &[u8]) -> Result<(), Self::InterfaceError> {
        for (offset, value) in block.iter().enumerate() {
            self.write_one(reg.wrapping_add(offset as u8), *value)?;
        }
        Ok(())
    }
}

#[derive(Default, Debug)]
pub(crate) struct MockDelay {
    pub(crate) calls: u32,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        self.calls += 1;
    }
}
