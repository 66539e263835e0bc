use embedded_hal as hal;

use super::{BusKind, SensorInterface};
use crate::Error;
#[cfg(feature = "rttdebug")]
use panic_rtt_core::rprintln;

/// Default 7-bit I2C address of the STHS34PF80
pub const DEFAULT_I2C_ADDRESS: u8 = 0x5A;

pub struct I2cInterface<I2C> {
    /// i2c port
    i2c_port: I2C,
    /// address for i2c communications
    address: u8,
}

impl<I2C, CommE> I2cInterface<I2C>
where
    I2C: hal::i2c::I2c<Error = CommE>,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c_port: i2c,
            address,
        }
    }

    /// Release owned resources
    pub fn release(self) -> I2C {
        self.i2c_port
    }
}

impl<I2C, CommE> SensorInterface for I2cInterface<I2C>
where
    I2C: hal::i2c::I2c<Error = CommE>,
{
    type InterfaceError = Error<CommE>;

    fn bus_kind(&self) -> BusKind {
        BusKind::I2c
    }

    // The sensor does not reliably auto-increment over I2C,
    // so every register is addressed with its own transfer.
    fn read_block(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Self::InterfaceError> {
        for (offset, slot) in buffer.iter_mut().enumerate() {
            let addr = reg.wrapping_add(offset as u8);
            let mut byte = [0u8; 1];
            self.i2c_port
                .write_read(self.address, &[addr], &mut byte)
                .map_err(Error::Comm)?;
            *slot = byte[0];
        }

        #[cfg(feature = "rttdebug")]
        rprintln!("read 0x{:x} {:x?} ", reg, buffer);

        Ok(())
    }

    fn write_block(&mut self, reg: u8, block: &[u8]) -> Result<(), Self::InterfaceError> {
        #[cfg(feature = "rttdebug")]
        rprintln!("write 0x{:x} {:x?} ", reg, block);

        for (offset, val) in block.iter().enumerate() {
            let addr = reg.wrapping_add(offset as u8);
            self.i2c_port
                .write(self.address, &[addr, *val])
                .map_err(Error::Comm)?;
        }
        Ok(())
    }
}
