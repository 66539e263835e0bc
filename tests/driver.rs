use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

use sths34pf80::registers::*;
use sths34pf80::{Builder, DeviceConfig, Error, InterruptSource, Odr, DEFAULT_I2C_ADDRESS};

const ADDR: u8 = DEFAULT_I2C_ADDRESS;

fn read(reg: u8, val: u8) -> I2cTransaction {
    I2cTransaction::write_read(ADDR, vec![reg], vec![val])
}

fn write(reg: u8, val: u8) -> I2cTransaction {
    I2cTransaction::write(ADDR, vec![reg, val])
}

/// Bus traffic of one function-config write with CTRL2 initially zero
fn func_cfg_write(addr: u8, val: u8) -> [I2cTransaction; 7] {
    [
        read(REG_CTRL2, 0x00),
        write(REG_CTRL2, 0x10),
        write(REG_PAGE_RW, 0x40),
        write(REG_FUNC_CFG_ADDR, addr),
        write(REG_FUNC_CFG_DATA, val),
        write(REG_PAGE_RW, 0x00),
        write(REG_CTRL2, 0x00),
    ]
}

#[test]
fn identify_over_i2c() {
    let expectations = [read(REG_WHO_AM_I, 0xD3), read(REG_WHO_AM_I, 0xD3)];
    let mut dev = Builder::new_i2c(I2cMock::new(&expectations), ADDR);
    assert_eq!(dev.identify().unwrap(), 0xD3);
    assert!(dev.check_identity(&mut NoopDelay::new()).unwrap());
    dev.release().release().done();
}

#[test]
fn threshold_write_then_read() {
    let mut expectations = Vec::new();
    expectations.extend(func_cfg_write(FUNC_MOTION_THS_L, 0xFC));
    expectations.extend(func_cfg_write(FUNC_MOTION_THS_H, 0x08));
    for (addr, val) in [(FUNC_MOTION_THS_L, 0xFC), (FUNC_MOTION_THS_H, 0x08)] {
        expectations.extend([
            read(REG_CTRL2, 0x00),
            write(REG_CTRL2, 0x10),
            write(REG_PAGE_RW, 0x20),
            write(REG_FUNC_CFG_ADDR, addr),
            read(REG_FUNC_CFG_DATA, val),
            write(REG_PAGE_RW, 0x00),
            write(REG_CTRL2, 0x00),
        ]);
    }

    let mut dev = Builder::new_i2c(I2cMock::new(&expectations), ADDR);
    dev.set_motion_threshold(2300).unwrap();
    assert_eq!(dev.motion_threshold().unwrap(), 2300);
    dev.release().release().done();
}

#[test]
fn threshold_failure_stops_handshake() {
    let expectations = [
        read(REG_CTRL2, 0x00),
        write(REG_CTRL2, 0x10),
        write(REG_PAGE_RW, 0x40).with_error(ErrorKind::Other),
    ];
    let mut dev = Builder::new_i2c(I2cMock::new(&expectations), ADDR);
    assert_eq!(
        dev.func_cfg_write(FUNC_PRESENCE_THS_L, 0x88),
        Err(Error::Comm(ErrorKind::Other))
    );
    dev.release().release().done();
}

#[test]
fn init_once_then_deinit() {
    let config = DeviceConfig::new()
        .with_presence_threshold(0)
        .with_motion_threshold(0x0201)
        .with_ambient_shock_threshold(0xFFFF);

    let mut expectations = vec![
        read(REG_LPF1, 0xC0),
        write(REG_LPF1, 0xC4),
        read(REG_LPF2, 0x00),
        write(REG_LPF2, 0x20),
        read(REG_LPF2, 0x20),
        write(REG_LPF2, 0x22),
        read(REG_AVG_TRIM, 0x00),
        write(REG_AVG_TRIM, 0x02),
        read(REG_CTRL1, 0x10),
        write(REG_CTRL1, 0x17),
    ];
    expectations.extend(func_cfg_write(FUNC_PRESENCE_THS_L, 0x00));
    expectations.extend(func_cfg_write(FUNC_PRESENCE_THS_H, 0x00));
    expectations.extend(func_cfg_write(FUNC_MOTION_THS_L, 0x01));
    expectations.extend(func_cfg_write(FUNC_MOTION_THS_H, 0x02));
    expectations.extend(func_cfg_write(FUNC_TAMBSHOCK_THS_L, 0xFF));
    expectations.extend(func_cfg_write(FUNC_TAMBSHOCK_THS_H, 0xFF));
    // deinit
    expectations.extend([read(REG_CTRL1, 0x17), write(REG_CTRL1, 0x10)]);

    let mut dev = Builder::new_i2c(I2cMock::new(&expectations), ADDR).with_config(config);
    dev.init().unwrap();
    // no traffic the second time
    dev.init().unwrap();
    assert!(dev.is_initialized());
    dev.deinit().unwrap();
    assert!(!dev.is_initialized());
    dev.release().release().done();
}

#[test]
fn presence_interrupt_routing() {
    let expectations = [
        read(REG_CTRL3, 0x18),
        write(REG_CTRL3, 0x1A),
        read(REG_CTRL3, 0x1A),
        write(REG_CTRL3, 0x3A),
    ];
    let mut dev = Builder::new_i2c(I2cMock::new(&expectations), ADDR);
    dev.control_interrupt(InterruptSource::Presence, true).unwrap();
    dev.release().release().done();
}

#[test]
fn runtime_odr_and_samples_over_spi() {
    let expectations = [
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![REG_CTRL1 | 0x80]),
        SpiTransaction::read_vec(vec![0x17]),
        SpiTransaction::transaction_end(),
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![REG_CTRL1]),
        SpiTransaction::write_vec(vec![0x18]),
        SpiTransaction::transaction_end(),
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![REG_TPRESENCE_L | 0x80]),
        SpiTransaction::read_vec(vec![0x00, 0x80]),
        SpiTransaction::transaction_end(),
    ];
    let mut dev = Builder::new_spi(SpiMock::new(&expectations));
    dev.set_odr(Odr::Odr_30Hz).unwrap();
    assert_eq!(dev.read_presence().unwrap(), i16::MIN);
    dev.release().release().done();
}
