use embedded_hal as hal;
use hal::spi::Operation;

use super::{BusKind, SensorInterface};
use crate::Error;
#[cfg(feature = "rttdebug")]
use panic_rtt_core::rprintln;

/// This wraps an SPI device; chip select is managed
/// by the `SpiDevice` implementation.
pub struct SpiInterface<SPI> {
    /// the SPI device to use when communicating
    spi: SPI,
    /// 3-wire or 4-wire
    kind: BusKind,
}

impl<SPI, CommE> SpiInterface<SPI>
where
    SPI: hal::spi::SpiDevice<u8, Error = CommE>,
{
    /// Combined with register address for reading registers
    const DIR_READ: u8 = 0x80; // same as 1<<7

    /// Create a 4-wire SPI interface
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            kind: BusKind::Spi4Wire,
        }
    }

    /// Create a 3-wire SPI interface
    pub fn new_three_wire(spi: SPI) -> Self {
        Self {
            spi,
            kind: BusKind::Spi3Wire,
        }
    }

    /// Release owned resources
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, CommE> SensorInterface for SpiInterface<SPI>
where
    SPI: hal::spi::SpiDevice<u8, Error = CommE>,
{
    type InterfaceError = Error<CommE>;

    fn bus_kind(&self) -> BusKind {
        self.kind
    }

    fn read_block(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Self::InterfaceError> {
        if buffer.is_empty() {
            return Ok(());
        }
        let addr = [reg | Self::DIR_READ];
        self.spi
            .transaction(&mut [Operation::Write(&addr), Operation::Read(buffer)])
            .map_err(Error::Comm)?;

        #[cfg(feature = "rttdebug")]
        rprintln!("read 0x{:x} {:x?} ", reg, buffer);

        Ok(())
    }

    fn write_block(&mut self, reg: u8, block: &[u8]) -> Result<(), Self::InterfaceError> {
        if block.is_empty() {
            return Ok(());
        }
        #[cfg(feature = "rttdebug")]
        rprintln!("write 0x{:x} {:x?} ", reg, block);

        let addr = [reg & !Self::DIR_READ];
        self.spi
            .transaction(&mut [Operation::Write(&addr), Operation::Write(block)])
            .map_err(Error::Comm)?;
        Ok(())
    }
}
