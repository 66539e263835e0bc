//! Register map and bit-field layouts.
//!
//! Every layout wraps the raw register byte: `from_bits` keeps reserved
//! bits exactly as read, so a read-modify-write only touches the named field.

use bitfield_struct::bitfield;

pub const REG_FUNC_CFG_ADDR: u8 = 0x08;
pub const REG_FUNC_CFG_DATA: u8 = 0x09;
pub const REG_LPF1: u8 = 0x0C;
pub const REG_LPF2: u8 = 0x0D;
pub const REG_WHO_AM_I: u8 = 0x0F;
pub const REG_AVG_TRIM: u8 = 0x10;
pub const REG_PAGE_RW: u8 = 0x11;
pub const REG_CTRL1: u8 = 0x20;
pub const REG_CTRL2: u8 = 0x21;
pub const REG_CTRL3: u8 = 0x22;
pub const REG_STATUS: u8 = 0x23;
pub const REG_FUNC_STATUS: u8 = 0x25;

/// Start (low byte) of the 16 bit output registers
pub const REG_TOBJECT_L: u8 = 0x26;
pub const REG_TAMBIENT_L: u8 = 0x28;
pub const REG_TPRESENCE_L: u8 = 0x3A;
pub const REG_TMOTION_L: u8 = 0x3C;
pub const REG_TAMB_SHOCK_L: u8 = 0x3E;

/// Addresses inside the embedded function-configuration memory
pub const FUNC_PRESENCE_THS_L: u8 = 0x20;
pub const FUNC_PRESENCE_THS_H: u8 = 0x21;
pub const FUNC_MOTION_THS_L: u8 = 0x22;
pub const FUNC_MOTION_THS_H: u8 = 0x23;
pub const FUNC_TAMBSHOCK_THS_L: u8 = 0x24;
pub const FUNC_TAMBSHOCK_THS_H: u8 = 0x25;

/// Expected WHO_AM_I value
pub const STHS34PF80_WAI: u8 = 0xD3;

/// A register whose value is decoded through a bit-field layout
pub trait Register: Copy + From<u8> + Into<u8> {
    const ADDRESS: u8;
}

macro_rules! register {
    ($name:ident, $addr:expr) => {
        impl Register for $name {
            const ADDRESS: u8 = $addr;
        }
    };
}

/// LPF1 (0x0C): low-pass filters for motion and presence+motion
#[bitfield(u8)]
pub struct Lpf1 {
    #[bits(3)]
    pub lpf_m: u8,
    #[bits(3)]
    pub lpf_p_m: u8,
    #[bits(2)]
    __r0: u8,
}
register!(Lpf1, REG_LPF1);

/// LPF2 (0x0D): low-pass filters for ambient temperature shock and presence
#[bitfield(u8)]
pub struct Lpf2 {
    #[bits(3)]
    pub lpf_a_t: u8,
    #[bits(3)]
    pub lpf_p: u8,
    #[bits(2)]
    __r1: u8,
}
register!(Lpf2, REG_LPF2);

/// AVG_TRIM (0x10): number of averaged samples
#[bitfield(u8)]
pub struct AvgTrim {
    #[bits(3)]
    pub avg_tmos: u8,
    #[bits(1)]
    __r2: u8,
    #[bits(2)]
    pub avg_t: u8,
    #[bits(2)]
    __r3: u8,
}
register!(AvgTrim, REG_AVG_TRIM);

/// CTRL1 (0x20)
#[bitfield(u8)]
pub struct Ctrl1 {
    #[bits(4)]
    pub odr: u8,
    pub bdu: bool,
    #[bits(3)]
    __r4: u8,
}
register!(Ctrl1, REG_CTRL1);

/// CTRL2 (0x21)
#[bitfield(u8)]
pub struct Ctrl2 {
    pub one_shot: bool,
    #[bits(3)]
    __r5: u8,
    /// Enables access to the embedded function-configuration page
    pub func_cfg_access: bool,
    #[bits(2)]
    __r6: u8,
    /// Reboot OTP memory content, self clearing
    pub boot: bool,
}
register!(Ctrl2, REG_CTRL2);

/// CTRL3 (0x22): interrupt configuration
#[bitfield(u8)]
pub struct Ctrl3 {
    #[bits(2)]
    pub ien: u8,
    #[bits(1)]
    __r7: u8,
    /// ambient temperature shock flag mask
    pub int_msk0: bool,
    /// motion flag mask
    pub int_msk1: bool,
    /// presence flag mask
    pub int_msk2: bool,
    pub pp_od: bool,
    pub int_h_l: bool,
}
register!(Ctrl3, REG_CTRL3);

/// STATUS (0x23)
#[bitfield(u8)]
pub struct Status {
    #[bits(2)]
    __r8: u8,
    pub drdy: bool,
    #[bits(5)]
    __r9: u8,
}
register!(Status, REG_STATUS);

/// FUNC_STATUS (0x25). Reading this register clears the flags.
#[bitfield(u8)]
pub struct FuncStatusReg {
    pub tamb_shock_flag: bool,
    pub mot_flag: bool,
    pub pres_flag: bool,
    #[bits(5)]
    __r10: u8,
}
register!(FuncStatusReg, REG_FUNC_STATUS);

/// PAGE_RW (0x11), embedded page
#[bitfield(u8)]
pub struct PageRw {
    #[bits(5)]
    __r11: u8,
    pub func_cfg_read: bool,
    pub func_cfg_write: bool,
    #[bits(1)]
    __r12: u8,
}
register!(PageRw, REG_PAGE_RW);
