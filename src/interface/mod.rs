pub mod i2c;
pub mod spi;

pub use self::i2c::I2cInterface;
pub use self::spi::SpiInterface;

/// Kind of bus the sensor is attached to
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusKind {
    /// I2C: multi-byte transfers are split into single-register transfers
    I2c,
    /// 4-wire SPI: burst transfers
    Spi4Wire,
    /// 3-wire SPI: burst transfers
    Spi3Wire,
}

/// A method of communicating with the sensor
pub trait SensorInterface {
    /// Interface error type
    type InterfaceError;

    /// Which kind of bus this interface drives
    fn bus_kind(&self) -> BusKind;

    /// Read `buffer.len()` consecutive registers starting at `reg`
    fn read_block(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Self::InterfaceError>;

    /// Write `block` into consecutive registers starting at `reg`
    fn write_block(&mut self, reg: u8, block: &[u8]) -> Result<(), Self::InterfaceError>;

    /// Read a single register
    fn register_read(&mut self, reg: u8) -> Result<u8, Self::InterfaceError> {
        let mut block = [0u8; 1];
        self.read_block(reg, &mut block)?;
        Ok(block[0])
    }

    /// Write a single register
    fn register_write(&mut self, reg: u8, val: u8) -> Result<(), Self::InterfaceError> {
        self.write_block(reg, &[val])
    }

    /// Read a little-endian 16 bit two's complement value from `reg` and `reg + 1`
    fn read_i16_le(&mut self, reg: u8) -> Result<i16, Self::InterfaceError> {
        let mut block = [0u8; 2];
        self.read_block(reg, &mut block)?;
        Ok(((block[1] as u16) << 8 | (block[0] as u16)) as i16)
    }

    /// True for both SPI modes
    fn using_spi(&self) -> bool {
        self.bus_kind() != BusKind::I2c
    }
}
