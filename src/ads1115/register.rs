/// Configuration register struct. Every write to the device sends the whole 16-bit word.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Operational status. Writing `os = true` while the device is idle starts a single
    /// conversion.
    pub os: bool,
    /// Input multiplexer configuration as a [`Mux`].
    pub mux: Mux,
    /// Programmable gain amplifier configuration as a [`Gain`].
    pub pga: Gain,
    /// Operating mode as a [`Mode`].
    pub mode: Mode,
    /// Data rate as a [`DataRate`].
    pub data_rate: DataRate,
    /// Comparator mode, polarity, latching and queue fields (bits 4:0), kept as written.
    pub comparator: u8
}

impl Default for Config {
    fn default() -> Self {
        Self::from(DEFAULT_CONFIG)
    }
}

/// The configuration word written by `init()` and `reset()`: single conversion on AIN0 - AIN1,
/// ±2.048 V, single-shot mode, 128 SPS, comparator disabled.
pub const DEFAULT_CONFIG: u16 = 0x8583;

impl From<u16> for Config {
    fn from(x: u16) -> Self {
        Self {
            os: (x & 0x8000) != 0,
            mux: Mux::from(((x >> 12) & 0x07) as u8),
            pga: Gain::from(((x >> 9) & 0x07) as u8),
            mode: if (x & 0x0100) != 0 { Mode::SingleShot } else { Mode::Continuous },
            data_rate: DataRate::from(((x >> 5) & 0x07) as u8),
            comparator: (x & 0x1F) as u8
        }
    }
}

impl From<Config> for u16 {
    fn from(x: Config) -> Self {
        (x.os as u16) << 15 |
            (x.mux as u16) << 12 |
            (x.pga as u16) << 9 |
            (x.mode as u16) << 8 |
            (x.data_rate as u16) << 5 |
            (x.comparator & 0x1F) as u16
    }
}

/// Represents the possible input multiplexer settings.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mux {
    Ain0Ain1 = 0x00,
    Ain0Ain3 = 0x01,
    Ain1Ain3 = 0x02,
    Ain2Ain3 = 0x03,
    Ain0Gnd = 0x04,
    Ain1Gnd = 0x05,
    Ain2Gnd = 0x06,
    Ain3Gnd = 0x07
}

impl Mux {
    /// Returns the single-ended setting for `channel`, or [`None`] if `channel > 3`.
    pub fn single(channel: u8) -> Option<Self> {
        match channel {
            0 => Some(Mux::Ain0Gnd),
            1 => Some(Mux::Ain1Gnd),
            2 => Some(Mux::Ain2Gnd),
            3 => Some(Mux::Ain3Gnd),
            _ => None
        }
    }

    /// Returns the differential setting for the given pair, or [`None`] if the device cannot
    /// measure it. Only `(0, 1)`, `(0, 3)`, `(1, 3)` and `(2, 3)` are supported.
    pub fn differential(positive: u8, negative: u8) -> Option<Self> {
        match (positive, negative) {
            (0, 1) => Some(Mux::Ain0Ain1),
            (0, 3) => Some(Mux::Ain0Ain3),
            (1, 3) => Some(Mux::Ain1Ain3),
            (2, 3) => Some(Mux::Ain2Ain3),
            _ => None
        }
    }
}

impl From<u8> for Mux {
    fn from(x: u8) -> Self {
        match x & 0x07 {
            0x00 => Mux::Ain0Ain1,
            0x01 => Mux::Ain0Ain3,
            0x02 => Mux::Ain1Ain3,
            0x03 => Mux::Ain2Ain3,
            0x04 => Mux::Ain0Gnd,
            0x05 => Mux::Ain1Gnd,
            0x06 => Mux::Ain2Gnd,
            _ => Mux::Ain3Gnd
        }
    }
}

/// Represents the possible full-scale ranges of the programmable gain amplifier.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    /// ±6.144 V
    TwoThirds = 0x00,
    /// ±4.096 V
    One = 0x01,
    /// ±2.048 V
    Two = 0x02,
    /// ±1.024 V
    Four = 0x03,
    /// ±0.512 V
    Eight = 0x04,
    /// ±0.256 V
    Sixteen = 0x05
}

impl Gain {
    /// Returns the full-scale voltage, in Volts.
    pub fn full_scale(&self) -> f32 {
        match self {
            Gain::TwoThirds => 6.144,
            Gain::One => 4.096,
            Gain::Two => 2.048,
            Gain::Four => 1.024,
            Gain::Eight => 0.512,
            Gain::Sixteen => 0.256
        }
    }
}

impl From<u8> for Gain {
    fn from(x: u8) -> Self {
        match x & 0x07 {
            0x00 => Gain::TwoThirds,
            0x02 => Gain::Two,
            0x03 => Gain::Four,
            0x04 => Gain::Eight,
            0x05 => Gain::Sixteen,
            _ => Gain::One
        }
    }
}

/// Represents the possible operating modes.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Continuous = 0x00,
    SingleShot = 0x01
}

/// Represents the possible data rates.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    Sps8 = 0x00,
    Sps16 = 0x01,
    Sps32 = 0x02,
    Sps64 = 0x03,
    Sps128 = 0x04,
    Sps250 = 0x05,
    Sps475 = 0x06,
    Sps860 = 0x07
}

impl DataRate {
    /// Returns the time to wait for a conversion at this data rate when no data-ready line is
    /// available, in milliseconds.
    pub fn conversion_time_ms(&self) -> u32 {
        match self {
            DataRate::Sps8 => 125,
            DataRate::Sps16 => 63,
            DataRate::Sps32 => 32,
            DataRate::Sps64 => 16,
            DataRate::Sps128 => 8,
            DataRate::Sps250 => 4,
            DataRate::Sps475 => 3,
            DataRate::Sps860 => 2
        }
    }
}

impl From<u8> for DataRate {
    fn from(x: u8) -> Self {
        match x & 0x07 {
            0x00 => DataRate::Sps8,
            0x01 => DataRate::Sps16,
            0x02 => DataRate::Sps32,
            0x03 => DataRate::Sps64,
            0x04 => DataRate::Sps128,
            0x05 => DataRate::Sps250,
            0x06 => DataRate::Sps475,
            _ => DataRate::Sps860
        }
    }
}

/// Represents the registers of the ADC.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Register {
    Conversion = 0x00,
    Config = 0x01,
    LoThresh = 0x02,
    HiThresh = 0x03
}

/// Lo_thresh value that, together with [`READY_HI_THRESH`], turns ALERT/RDY into a
/// conversion-ready output.
pub const READY_LO_THRESH: u16 = 0x0000;
/// Hi_thresh value that, together with [`READY_LO_THRESH`], turns ALERT/RDY into a
/// conversion-ready output.
pub const READY_HI_THRESH: u16 = 0x8000;
/// Comparator field asserting ALERT/RDY after every conversion (COMP_QUE = 00).
pub const READY_COMPARATOR: u8 = 0x00;
