/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

#![no_std]

use embedded_hal as hal;
use hal::delay::DelayNs;

#[cfg(feature = "rttdebug")]
use panic_rtt_core::rprintln;

mod config;
mod func_cfg;
mod interface;
pub mod registers;

#[cfg(test)]
mod testing;

pub use config::{
    AvgT, AvgTmos, DeviceConfig, InterruptOutput, InterruptPolarity, InterruptRoute,
    InterruptSource, LpfDivision, Odr,
};
pub use interface::i2c::DEFAULT_I2C_ADDRESS;
pub use interface::{BusKind, I2cInterface, SensorInterface, SpiInterface};

use registers::*;

/// Errors in this crate
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<CommE> {
    /// Sensor communication error
    Comm(CommE),

    /// Unrecognized chip ID
    UnknownChipId,
    /// Sensor not responding
    Unresponsive,
}

pub struct Builder {}

impl Builder {
    /// Create a new driver using I2C interface
    pub fn new_i2c<I2C, CommE>(i2c: I2C, address: u8) -> Sths34pf80<I2cInterface<I2C>>
    where
        I2C: hal::i2c::I2c<Error = CommE>,
        CommE: core::fmt::Debug,
    {
        let iface = interface::I2cInterface::new(i2c, address);
        Sths34pf80::new_with_interface(iface)
    }

    /// Create a new driver using SPI interface
    pub fn new_spi<SPI, CommE>(spi: SPI) -> Sths34pf80<SpiInterface<SPI>>
    where
        SPI: hal::spi::SpiDevice<u8, Error = CommE>,
        CommE: core::fmt::Debug,
    {
        let iface = interface::SpiInterface::new(spi);
        Sths34pf80::new_with_interface(iface)
    }
}

/// Detection flags captured from one read of FUNC_STATUS
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FuncStatus {
    pub presence: bool,
    pub motion: bool,
    pub ambient_shock: bool,
}

/// STHS34PF80 driver.
///
/// All operations take `&mut self`; a driver shared between threads must be
/// locked for the whole duration of an operation, since the threshold
/// handshake spans several bus transactions.
pub struct Sths34pf80<SI> {
    pub(crate) si: SI,

    pub(crate) config: DeviceConfig,
    pub(crate) initialized: bool,
}

impl<SI, CommE> Sths34pf80<SI>
where
    SI: SensorInterface<InterfaceError = Error<CommE>>,
{
    pub fn new_with_interface(sensor_interface: SI) -> Self {
        Self {
            si: sensor_interface,
            config: DeviceConfig::default(),
            initialized: false,
        }
    }

    /// Replace the configuration used by the next `init`
    pub fn with_config(mut self, config: DeviceConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the configuration used by the next `init`.
    /// Has no effect on the sensor until then.
    pub fn set_config(&mut self, config: DeviceConfig) {
        self.config = config;
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn bus_kind(&self) -> BusKind {
        self.si.bus_kind()
    }

    /// Release the sensor interface
    pub fn release(self) -> SI {
        self.si
    }

    /// Read the WHO_AM_I register
    pub fn identify(&mut self) -> Result<u8, SI::InterfaceError> {
        self.si.register_read(REG_WHO_AM_I)
    }

    /// Read the sensor identifier and return true if it matches
    pub fn check_identity(
        &mut self,
        delay_source: &mut impl DelayNs,
    ) -> Result<bool, SI::InterfaceError> {
        for _ in 0..5 {
            let chip_id = self.identify()?;
            if chip_id == STHS34PF80_WAI {
                #[cfg(feature = "rttdebug")]
                rprintln!("found device: 0x{:0x}  ", chip_id);
                return Ok(true);
            }

            #[cfg(feature = "rttdebug")]
            rprintln!("bogus whoami: 0x{:0x}  ", chip_id);

            delay_source.delay_ms(10);
        }

        Ok(false)
    }

    /// Verify the sensor identity, then apply the configuration
    pub fn setup(&mut self, delay_source: &mut impl DelayNs) -> Result<(), SI::InterfaceError> {
        if !self.check_identity(delay_source)? {
            return Err(Error::UnknownChipId);
        }
        self.init()
    }

    /// Apply the configuration once. Calling it again before `deinit`
    /// does nothing. On failure the registers written so far keep
    /// their new values and the driver stays uninitialized.
    pub fn init(&mut self) -> Result<(), SI::InterfaceError> {
        if self.initialized {
            return Ok(());
        }
        self.apply_config()?;
        self.initialized = true;

        #[cfg(feature = "rttdebug")]
        rprintln!("initialized {:?}", self.config);

        Ok(())
    }

    fn apply_config(&mut self) -> Result<(), SI::InterfaceError> {
        let config = self.config;
        self.set_lpf_motion(config.lpf_motion)?;
        self.set_lpf_presence(config.lpf_presence)?;
        self.set_lpf_temperature(config.lpf_temperature)?;
        self.modify_register(|reg: AvgTrim| {
            reg.with_avg_tmos(config.avg_object as u8)
                .with_avg_t(config.avg_ambient as u8)
        })?;
        self.set_odr(config.odr)?;
        self.set_presence_threshold(config.presence_threshold)?;
        self.set_motion_threshold(config.motion_threshold)?;
        self.set_ambient_shock_threshold(config.ambient_shock_threshold)?;
        Ok(())
    }

    /// Power the sensor down. If the write fails the driver still
    /// counts as initialized, because the sensor keeps running.
    pub fn deinit(&mut self) -> Result<(), SI::InterfaceError> {
        self.set_odr(Odr::PowerDown)?;
        self.initialized = false;
        Ok(())
    }

    /// Read a register and decode it through its bit-field layout
    pub fn read_register<R: Register>(&mut self) -> Result<R, SI::InterfaceError> {
        let raw = self.si.register_read(R::ADDRESS)?;
        Ok(R::from(raw))
    }

    /// Overwrite a whole register
    pub fn write_register<R: Register>(&mut self, value: R) -> Result<(), SI::InterfaceError> {
        self.si.register_write(R::ADDRESS, value.into())
    }

    /// Read-modify-write: only the fields changed by `f` are altered
    pub fn modify_register<R: Register>(
        &mut self,
        f: impl FnOnce(R) -> R,
    ) -> Result<(), SI::InterfaceError> {
        let current: R = self.read_register()?;
        self.write_register(f(current))
    }

    pub fn set_lpf_motion(&mut self, lpf: LpfDivision) -> Result<(), SI::InterfaceError> {
        self.modify_register(|reg: Lpf1| reg.with_lpf_m(lpf as u8))
    }

    pub fn lpf_motion(&mut self) -> Result<LpfDivision, SI::InterfaceError> {
        let reg: Lpf1 = self.read_register()?;
        Ok(LpfDivision::from_bits(reg.lpf_m()))
    }

    pub fn set_lpf_presence_motion(&mut self, lpf: LpfDivision) -> Result<(), SI::InterfaceError> {
        self.modify_register(|reg: Lpf1| reg.with_lpf_p_m(lpf as u8))
    }

    pub fn lpf_presence_motion(&mut self) -> Result<LpfDivision, SI::InterfaceError> {
        let reg: Lpf1 = self.read_register()?;
        Ok(LpfDivision::from_bits(reg.lpf_p_m()))
    }

    pub fn set_lpf_presence(&mut self, lpf: LpfDivision) -> Result<(), SI::InterfaceError> {
        self.modify_register(|reg: Lpf2| reg.with_lpf_p(lpf as u8))
    }

    pub fn lpf_presence(&mut self) -> Result<LpfDivision, SI::InterfaceError> {
        let reg: Lpf2 = self.read_register()?;
        Ok(LpfDivision::from_bits(reg.lpf_p()))
    }

    /// Low-pass filter of the ambient temperature shock channel
    pub fn set_lpf_temperature(&mut self, lpf: LpfDivision) -> Result<(), SI::InterfaceError> {
        self.modify_register(|reg: Lpf2| reg.with_lpf_a_t(lpf as u8))
    }

    pub fn lpf_temperature(&mut self) -> Result<LpfDivision, SI::InterfaceError> {
        let reg: Lpf2 = self.read_register()?;
        Ok(LpfDivision::from_bits(reg.lpf_a_t()))
    }

    pub fn set_avg_object(&mut self, avg: AvgTmos) -> Result<(), SI::InterfaceError> {
        self.modify_register(|reg: AvgTrim| reg.with_avg_tmos(avg as u8))
    }

    pub fn avg_object(&mut self) -> Result<AvgTmos, SI::InterfaceError> {
        let reg: AvgTrim = self.read_register()?;
        Ok(AvgTmos::from_bits(reg.avg_tmos()))
    }

    pub fn set_avg_ambient(&mut self, avg: AvgT) -> Result<(), SI::InterfaceError> {
        self.modify_register(|reg: AvgTrim| reg.with_avg_t(avg as u8))
    }

    pub fn avg_ambient(&mut self) -> Result<AvgT, SI::InterfaceError> {
        let reg: AvgTrim = self.read_register()?;
        Ok(AvgT::from_bits(reg.avg_t()))
    }

    /// Set the output data rate; `Odr::PowerDown` stops conversions
    pub fn set_odr(&mut self, odr: Odr) -> Result<(), SI::InterfaceError> {
        self.modify_register(|reg: Ctrl1| reg.with_odr(odr as u8))
    }

    pub fn odr(&mut self) -> Result<Odr, SI::InterfaceError> {
        let reg: Ctrl1 = self.read_register()?;
        Ok(Odr::from_bits(reg.odr()))
    }

    /// Latch the output registers until both bytes have been read
    pub fn set_block_data_update(&mut self, enable: bool) -> Result<(), SI::InterfaceError> {
        self.modify_register(|reg: Ctrl1| reg.with_bdu(enable))
    }

    pub fn block_data_update(&mut self) -> Result<bool, SI::InterfaceError> {
        let reg: Ctrl1 = self.read_register()?;
        Ok(reg.bdu())
    }

    /// Start a single conversion while in power down
    pub fn trigger_one_shot(&mut self) -> Result<(), SI::InterfaceError> {
        self.modify_register(|reg: Ctrl2| reg.with_one_shot(true))
    }

    /// Reload the OTP trimming values and wait for the BOOT bit to clear
    pub fn reboot(&mut self, delay_source: &mut impl DelayNs) -> Result<(), SI::InterfaceError> {
        self.modify_register(|reg: Ctrl2| reg.with_boot(true))?;
        delay_source.delay_ms(5);

        for _ in 0..10 {
            // BOOT clears itself once the reload is done
            if let Ok(reg) = self.read_register::<Ctrl2>() {
                if !reg.boot() {
                    return Ok(());
                }
            }
            delay_source.delay_ms(5);
        }

        #[cfg(feature = "rttdebug")]
        rprintln!("boot bit never cleared");
        Err(Error::Unresponsive)
    }

    pub fn set_interrupt_route(&mut self, route: InterruptRoute) -> Result<(), SI::InterfaceError> {
        self.modify_register(|reg: Ctrl3| reg.with_ien(route as u8))
    }

    /// `None` if IEN holds the reserved code
    pub fn interrupt_route(&mut self) -> Result<Option<InterruptRoute>, SI::InterfaceError> {
        let reg: Ctrl3 = self.read_register()?;
        Ok(InterruptRoute::from_bits(reg.ien()))
    }

    pub fn set_interrupt_polarity(
        &mut self,
        polarity: InterruptPolarity,
    ) -> Result<(), SI::InterfaceError> {
        let active_low = polarity == InterruptPolarity::ActiveLow;
        self.modify_register(|reg: Ctrl3| reg.with_int_h_l(active_low))
    }

    pub fn set_interrupt_output(&mut self, output: InterruptOutput) -> Result<(), SI::InterfaceError> {
        let open_drain = output == InterruptOutput::OpenDrain;
        self.modify_register(|reg: Ctrl3| reg.with_pp_od(open_drain))
    }

    pub fn set_interrupt_mask(
        &mut self,
        source: InterruptSource,
        enable: bool,
    ) -> Result<(), SI::InterfaceError> {
        match source {
            InterruptSource::AmbientShock => {
                self.modify_register(|reg: Ctrl3| reg.with_int_msk0(enable))
            }
            InterruptSource::Motion => self.modify_register(|reg: Ctrl3| reg.with_int_msk1(enable)),
            InterruptSource::Presence => {
                self.modify_register(|reg: Ctrl3| reg.with_int_msk2(enable))
            }
        }
    }

    pub fn interrupt_mask(&mut self, source: InterruptSource) -> Result<bool, SI::InterfaceError> {
        let reg: Ctrl3 = self.read_register()?;
        Ok(match source {
            InterruptSource::AmbientShock => reg.int_msk0(),
            InterruptSource::Motion => reg.int_msk1(),
            InterruptSource::Presence => reg.int_msk2(),
        })
    }

    /// Route the detection flags to the INT pin and set the mask of `source`
    pub fn control_interrupt(
        &mut self,
        source: InterruptSource,
        enable: bool,
    ) -> Result<(), SI::InterfaceError> {
        self.set_interrupt_route(InterruptRoute::FuncStatus)?;
        self.set_interrupt_mask(source, enable)
    }

    /// Same as `control_interrupt` with a numeric selector
    /// (0 ambient shock, 1 motion, 2 presence). An unknown selector
    /// only updates the interrupt route.
    pub fn control_interrupt_index(
        &mut self,
        index: u8,
        enable: bool,
    ) -> Result<(), SI::InterfaceError> {
        self.set_interrupt_route(InterruptRoute::FuncStatus)?;
        match InterruptSource::from_index(index) {
            Some(source) => self.set_interrupt_mask(source, enable),
            None => Ok(()),
        }
    }

    /// New samples are available
    pub fn data_ready(&mut self) -> Result<bool, SI::InterfaceError> {
        let reg: Status = self.read_register()?;
        Ok(reg.drdy())
    }

    /// Read all detection flags at once. The read clears them on the sensor.
    pub fn func_status(&mut self) -> Result<FuncStatus, SI::InterfaceError> {
        let reg: FuncStatusReg = self.read_register()?;
        Ok(FuncStatus {
            presence: reg.pres_flag(),
            motion: reg.mot_flag(),
            ambient_shock: reg.tamb_shock_flag(),
        })
    }

    /// Presence flag. Clears all detection flags.
    pub fn presence_flag(&mut self) -> Result<bool, SI::InterfaceError> {
        Ok(self.func_status()?.presence)
    }

    /// Motion flag. Clears all detection flags.
    pub fn motion_flag(&mut self) -> Result<bool, SI::InterfaceError> {
        Ok(self.func_status()?.motion)
    }

    /// Ambient temperature shock flag. Clears all detection flags.
    pub fn ambient_shock_flag(&mut self) -> Result<bool, SI::InterfaceError> {
        Ok(self.func_status()?.ambient_shock)
    }

    pub fn read_presence(&mut self) -> Result<i16, SI::InterfaceError> {
        self.si.read_i16_le(REG_TPRESENCE_L)
    }

    pub fn read_motion(&mut self) -> Result<i16, SI::InterfaceError> {
        self.si.read_i16_le(REG_TMOTION_L)
    }

    pub fn read_ambient_shock(&mut self) -> Result<i16, SI::InterfaceError> {
        self.si.read_i16_le(REG_TAMB_SHOCK_L)
    }

    pub fn read_ambient_temperature(&mut self) -> Result<i16, SI::InterfaceError> {
        self.si.read_i16_le(REG_TAMBIENT_L)
    }

    pub fn read_object_temperature(&mut self) -> Result<i16, SI::InterfaceError> {
        self.si.read_i16_le(REG_TOBJECT_L)
    }

    /// Ambient temperature in degrees Celsius
    pub fn get_scaled_ambient_temperature(&mut self) -> Result<f32, SI::InterfaceError> {
        let raw = self.read_ambient_temperature()?;
        Ok((raw as f32) / AMBIENT_LSB_PER_CELSIUS)
    }

    /// Object temperature in degrees Celsius
    pub fn get_scaled_object_temperature(&mut self) -> Result<f32, SI::InterfaceError> {
        let raw = self.read_object_temperature()?;
        Ok((raw as f32) / OBJECT_LSB_PER_CELSIUS)
    }
}

/// TAMBIENT sensitivity
const AMBIENT_LSB_PER_CELSIUS: f32 = 100.0;
/// TOBJECT sensitivity
const OBJECT_LSB_PER_CELSIUS: f32 = 2000.0;
