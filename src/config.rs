#[repr(u8)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Output data rate, CTRL1.ODR
pub enum Odr {
    PowerDown = 0b0000,
    Odr_0_25Hz = 0b0001,
    Odr_0_5Hz = 0b0010,
    Odr_1Hz = 0b0011,
    Odr_2Hz = 0b0100,
    Odr_4Hz = 0b0101,
    Odr_8Hz = 0b0110,
    Odr_15Hz = 0b0111,
    Odr_30Hz = 0b1000,
}

impl Default for Odr {
    fn default() -> Self {
        Odr::Odr_15Hz
    }
}

impl Odr {
    /// Decode the 4 bit ODR field. Codes above 30 Hz read back as 30 Hz.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x0F {
            0b0000 => Self::PowerDown,
            0b0001 => Self::Odr_0_25Hz,
            0b0010 => Self::Odr_0_5Hz,
            0b0011 => Self::Odr_1Hz,
            0b0100 => Self::Odr_2Hz,
            0b0101 => Self::Odr_4Hz,
            0b0110 => Self::Odr_8Hz,
            0b0111 => Self::Odr_15Hz,
            _ => Self::Odr_30Hz,
        }
    }
}

#[repr(u8)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Low-pass filter cutoff, expressed as a division of the ODR
pub enum LpfDivision {
    Odr_9 = 0b000,
    Odr_20 = 0b001,
    Odr_50 = 0b010,
    Odr_100 = 0b011,
    Odr_200 = 0b100,
    Odr_400 = 0b101,
    Odr_800 = 0b110,
}

impl LpfDivision {
    /// Decode a 3 bit LPF field. The unused code 0b111 reads back as ODR/800.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0b000 => Self::Odr_9,
            0b001 => Self::Odr_20,
            0b010 => Self::Odr_50,
            0b011 => Self::Odr_100,
            0b100 => Self::Odr_200,
            0b101 => Self::Odr_400,
            _ => Self::Odr_800,
        }
    }
}

#[repr(u8)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Number of averaged samples for object temperature, AVG_TRIM.AVG_TMOS
pub enum AvgTmos {
    Avg_2 = 0b000,
    Avg_8 = 0b001,
    Avg_32 = 0b010,
    Avg_128 = 0b011,
    Avg_256 = 0b100,
    Avg_512 = 0b101,
    Avg_1024 = 0b110,
    Avg_2048 = 0b111,
}

impl Default for AvgTmos {
    fn default() -> Self {
        AvgTmos::Avg_32
    }
}

impl AvgTmos {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0b000 => Self::Avg_2,
            0b001 => Self::Avg_8,
            0b010 => Self::Avg_32,
            0b011 => Self::Avg_128,
            0b100 => Self::Avg_256,
            0b101 => Self::Avg_512,
            0b110 => Self::Avg_1024,
            _ => Self::Avg_2048,
        }
    }
}

#[repr(u8)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Number of averaged samples for ambient temperature, AVG_TRIM.AVG_T
pub enum AvgT {
    Avg_8 = 0b00,
    Avg_4 = 0b01,
    Avg_2 = 0b10,
    Avg_1 = 0b11,
}

impl Default for AvgT {
    fn default() -> Self {
        AvgT::Avg_8
    }
}

impl AvgT {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b00 => Self::Avg_8,
            0b01 => Self::Avg_4,
            0b10 => Self::Avg_2,
            _ => Self::Avg_1,
        }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Signal routed to the INT pin, CTRL3.IEN
pub enum InterruptRoute {
    /// INT pin in high impedance
    HighZ = 0b00,
    /// data ready
    DataReady = 0b01,
    /// OR of the unmasked FUNC_STATUS flags
    FuncStatus = 0b10,
}

impl InterruptRoute {
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x03 {
            0b00 => Some(Self::HighZ),
            0b01 => Some(Self::DataReady),
            0b10 => Some(Self::FuncStatus),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Detection flag that can raise the interrupt
pub enum InterruptSource {
    /// INT_MSK0
    AmbientShock,
    /// INT_MSK1
    Motion,
    /// INT_MSK2
    Presence,
}

impl InterruptSource {
    /// Map a mask selector index: 0 ambient shock, 1 motion, 2 presence
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::AmbientShock),
            1 => Some(Self::Motion),
            2 => Some(Self::Presence),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// INT pin polarity, CTRL3.INT_H_L
pub enum InterruptPolarity {
    ActiveHigh,
    ActiveLow,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// INT pin driver, CTRL3.PP_OD
pub enum InterruptOutput {
    PushPull,
    OpenDrain,
}

/// Configuration applied by `init`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub lpf_motion: LpfDivision,
    pub lpf_presence: LpfDivision,
    /// ambient temperature shock filter
    pub lpf_temperature: LpfDivision,
    pub avg_ambient: AvgT,
    pub avg_object: AvgTmos,
    pub odr: Odr,
    pub presence_threshold: u16,
    pub motion_threshold: u16,
    pub ambient_shock_threshold: u16,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            lpf_motion: LpfDivision::Odr_200,
            lpf_presence: LpfDivision::Odr_200,
            lpf_temperature: LpfDivision::Odr_50,
            avg_ambient: AvgT::default(),
            avg_object: AvgTmos::default(),
            odr: Odr::default(),
            presence_threshold: 5000,
            motion_threshold: 2300,
            ambient_shock_threshold: 2000,
        }
    }
}

impl DeviceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_lpf_motion(mut self, lpf: LpfDivision) -> Self {
        self.lpf_motion = lpf;
        self
    }

    #[must_use]
    pub const fn with_lpf_presence(mut self, lpf: LpfDivision) -> Self {
        self.lpf_presence = lpf;
        self
    }

    #[must_use]
    pub const fn with_lpf_temperature(mut self, lpf: LpfDivision) -> Self {
        self.lpf_temperature = lpf;
        self
    }

    #[must_use]
    pub const fn with_avg_ambient(mut self, avg: AvgT) -> Self {
        self.avg_ambient = avg;
        self
    }

    #[must_use]
    pub const fn with_avg_object(mut self, avg: AvgTmos) -> Self {
        self.avg_object = avg;
        self
    }

    #[must_use]
    pub const fn with_odr(mut self, odr: Odr) -> Self {
        self.odr = odr;
        self
    }

    #[must_use]
    pub const fn with_presence_threshold(mut self, threshold: u16) -> Self {
        self.presence_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_motion_threshold(mut self, threshold: u16) -> Self {
        self.motion_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_ambient_shock_threshold(mut self, threshold: u16) -> Self {
        self.ambient_shock_threshold = threshold;
        self
    }
}
