//! Access to the embedded function-configuration memory.
//!
//! The detection thresholds are not part of the main register map.
//! Each byte is reached through a window: enable FUNC_CFG_ACCESS in CTRL2,
//! select read or write mode in PAGE_RW, put the target address in
//! FUNC_CFG_ADDR, move the byte through FUNC_CFG_DATA, then close PAGE_RW
//! and clear FUNC_CFG_ACCESS again.
//!
//! ONE_SHOT and BOOT clear themselves on the sensor, so both CTRL2 writes
//! send them as zero; writing back a stale 1 would restart them.
//!
//! A run stops at the first failing transaction. Nothing after the failure
//! is attempted, so FUNC_CFG_ACCESS may be left set; see
//! `close_func_cfg_window`.

use crate::registers::*;
use crate::{Error, SensorInterface, Sths34pf80};

#[cfg(feature = "rttdebug")]
use panic_rtt_core::rprintln;

impl<SI, CommE> Sths34pf80<SI>
where
    SI: SensorInterface<InterfaceError = Error<CommE>>,
{
    /// Write one byte of function-configuration memory
    pub fn func_cfg_write(&mut self, addr: u8, value: u8) -> Result<(), SI::InterfaceError> {
        #[cfg(feature = "rttdebug")]
        rprintln!("func_cfg write 0x{:x} = 0x{:x}", addr, value);

        let ctrl2 = self.open_func_cfg_window(PageRw::new().with_func_cfg_write(true))?;
        self.si.register_write(REG_FUNC_CFG_ADDR, addr)?;
        self.si.register_write(REG_FUNC_CFG_DATA, value)?;
        self.shut_func_cfg_window(ctrl2)
    }

    /// Read one byte of function-configuration memory
    pub fn func_cfg_read(&mut self, addr: u8) -> Result<u8, SI::InterfaceError> {
        let ctrl2 = self.open_func_cfg_window(PageRw::new().with_func_cfg_read(true))?;
        self.si.register_write(REG_FUNC_CFG_ADDR, addr)?;
        let value = self.si.register_read(REG_FUNC_CFG_DATA)?;
        self.shut_func_cfg_window(ctrl2)?;

        #[cfg(feature = "rttdebug")]
        rprintln!("func_cfg read 0x{:x} = 0x{:x}", addr, value);

        Ok(value)
    }

    /// Close a window left open by a failed transfer.
    /// Does nothing if FUNC_CFG_ACCESS is already clear.
    pub fn close_func_cfg_window(&mut self) -> Result<(), SI::InterfaceError> {
        let ctrl2: Ctrl2 = self.read_register()?;
        if !ctrl2.func_cfg_access() {
            return Ok(());
        }
        self.shut_func_cfg_window(ctrl2)
    }

    /// Enable FUNC_CFG_ACCESS and select the transfer direction.
    /// Returns the CTRL2 value as written.
    fn open_func_cfg_window(&mut self, mode: PageRw) -> Result<Ctrl2, SI::InterfaceError> {
        let ctrl2: Ctrl2 = self.read_register()?;
        let ctrl2 = without_triggers(ctrl2).with_func_cfg_access(true);
        self.write_register(ctrl2)?;
        self.write_register(mode)?;
        Ok(ctrl2)
    }

    fn shut_func_cfg_window(&mut self, ctrl2: Ctrl2) -> Result<(), SI::InterfaceError> {
        self.write_register(PageRw::new())?;
        self.write_register(without_triggers(ctrl2).with_func_cfg_access(false))
    }

    /// Write a 16 bit threshold as two byte transfers, low byte first.
    /// The two transfers are independent: if the second one fails the
    /// low byte has already been replaced.
    fn write_threshold(&mut self, addr_l: u8, addr_h: u8, value: u16) -> Result<(), SI::InterfaceError> {
        let [low, high] = value.to_le_bytes();
        self.func_cfg_write(addr_l, low)?;
        self.func_cfg_write(addr_h, high)
    }

    fn read_threshold(&mut self, addr_l: u8, addr_h: u8) -> Result<u16, SI::InterfaceError> {
        let low = self.func_cfg_read(addr_l)?;
        let high = self.func_cfg_read(addr_h)?;
        Ok(u16::from_le_bytes([low, high]))
    }

    pub fn set_presence_threshold(&mut self, threshold: u16) -> Result<(), SI::InterfaceError> {
        self.write_threshold(FUNC_PRESENCE_THS_L, FUNC_PRESENCE_THS_H, threshold)
    }

    pub fn presence_threshold(&mut self) -> Result<u16, SI::InterfaceError> {
        self.read_threshold(FUNC_PRESENCE_THS_L, FUNC_PRESENCE_THS_H)
    }

    pub fn set_motion_threshold(&mut self, threshold: u16) -> Result<(), SI::InterfaceError> {
        self.write_threshold(FUNC_MOTION_THS_L, FUNC_MOTION_THS_H, threshold)
    }

    pub fn motion_threshold(&mut self) -> Result<u16, SI::InterfaceError> {
        self.read_threshold(FUNC_MOTION_THS_L, FUNC_MOTION_THS_H)
    }

    pub fn set_ambient_shock_threshold(&mut self, threshold: u16) -> Result<(), SI::InterfaceError> {
        self.write_threshold(FUNC_TAMBSHOCK_THS_L, FUNC_TAMBSHOCK_THS_H, threshold)
    }

    pub fn ambient_shock_threshold(&mut self) -> Result<u16, SI::InterfaceError> {
        self.read_threshold(FUNC_TAMBSHOCK_THS_L, FUNC_TAMBSHOCK_THS_H)
    }
}

fn without_triggers(ctrl2: Ctrl2) -> Ctrl2 {
    ctrl2.with_one_shot(false).with_boot(false)
}
