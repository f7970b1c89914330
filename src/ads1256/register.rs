use embedded_hal::spi::{Mode, MODE_1};

/// SPI mode required by the device (CPOL = 0, CPHA = 1), MSB first.
pub const SPI_MODE: Mode = MODE_1;
/// SCLK frequency for command and register transactions.
pub const COMMAND_CLOCK_HZ: u32 = 1_000_000;
/// SCLK frequency for conversion data reads.
pub const READ_CLOCK_HZ: u32 = 1_000_000;
/// SCLK frequency for identification and diagnostic transactions.
pub const DIAGNOSTIC_CLOCK_HZ: u32 = 1_000_000;

/// Full-scale positive code, `2^23 - 1`.
pub const FULL_SCALE_CODE: i32 = 0x7F_FFFF;

/// Status register struct.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// Factory programmed identification bits. Read-only.
    pub id: u8,
    /// Data output bit order. When `lsb_first = false`, the default value, data is output most
    /// significant bit first.
    pub lsb_first: bool,
    /// Enables the auto-calibration that runs after gain, data rate or buffer changes.
    pub auto_calibration: bool,
    /// Enables the analog input buffer.
    pub buffer_enabled: bool,
    /// Mirrors the DRDY pin. Read-only.
    pub data_ready: bool
}

impl From<u8> for Status {
    fn from(x: u8) -> Self {
        Self {
            id: x >> 4,
            lsb_first: (x & 0x08) != 0,
            auto_calibration: (x & 0x04) != 0,
            buffer_enabled: (x & 0x02) != 0,
            data_ready: (x & 0x01) != 0
        }
    }
}

impl From<Status> for u8 {
    fn from(x: Status) -> Self {
        (x.id & 0x0F) << 4 |
            (x.lsb_first as u8) << 3 |
            (x.auto_calibration as u8) << 2 |
            (x.buffer_enabled as u8) << 1 |
            (x.data_ready as u8)
    }
}

/// Represents the analog inputs that can be routed to the converter.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    Ain0 = 0x00,
    Ain1 = 0x01,
    Ain2 = 0x02,
    Ain3 = 0x03,
    Ain4 = 0x04,
    Ain5 = 0x05,
    Ain6 = 0x06,
    Ain7 = 0x07,
    AinCom = 0x08
}

impl Input {
    /// Returns the input for an `AINx` index, or [`None`] if `index > 7`.
    pub fn ain(index: u8) -> Option<Self> {
        match index {
            0 => Some(Input::Ain0),
            1 => Some(Input::Ain1),
            2 => Some(Input::Ain2),
            3 => Some(Input::Ain3),
            4 => Some(Input::Ain4),
            5 => Some(Input::Ain5),
            6 => Some(Input::Ain6),
            7 => Some(Input::Ain7),
            _ => None
        }
    }
}

impl From<u8> for Input {
    fn from(x: u8) -> Self {
        Input::ain(x & 0x0F).unwrap_or(Input::AinCom)
    }
}

/// Input multiplexer struct.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mux {
    /// Positive input channel.
    pub positive: Input,
    /// Negative input channel.
    pub negative: Input
}

impl Default for Mux {
    fn default() -> Self {
        Self { positive: Input::Ain0, negative: Input::Ain1 }
    }
}

impl From<u8> for Mux {
    fn from(x: u8) -> Self {
        Self {
            positive: Input::from(x >> 4),
            negative: Input::from(x & 0x0F)
        }
    }
}

impl From<Mux> for u8 {
    fn from(x: Mux) -> Self {
        (x.positive as u8) << 4 | x.negative as u8
    }
}

/// A/D control register struct.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Adcon {
    /// D0/CLKOUT clock output rate setting (bits 6:5). `0` turns the clock output off.
    pub clock_out: u8,
    /// Sensor detect current source setting (bits 4:3). `0` turns the sources off.
    pub sensor_detect: u8,
    /// Programmable gain amplifier setting as a [`Gain`].
    pub pga: Gain
}

impl From<u8> for Adcon {
    fn from(x: u8) -> Self {
        Self {
            clock_out: (x >> 5) & 0x03,
            sensor_detect: (x >> 3) & 0x03,
            pga: Gain::from(x & 0x07)
        }
    }
}

impl From<Adcon> for u8 {
    fn from(x: Adcon) -> Self {
        (x.clock_out & 0x03) << 5 | (x.sensor_detect & 0x03) << 3 | x.pga as u8
    }
}

/// Represents the possible gains of the programmable gain amplifier.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    X1 = 0x00,
    X2 = 0x01,
    X4 = 0x02,
    X8 = 0x03,
    X16 = 0x04,
    X32 = 0x05,
    X64 = 0x06
}

impl Gain {
    /// Returns the amplification factor, `2^code`.
    pub fn factor(&self) -> f32 {
        (1u32 << *self as u8) as f32
    }
}

impl From<u8> for Gain {
    fn from(x: u8) -> Self {
        match x & 0x07 {
            0x01 => Gain::X2,
            0x02 => Gain::X4,
            0x03 => Gain::X8,
            0x04 => Gain::X16,
            0x05 => Gain::X32,
            0x06 => Gain::X64,
            _ => Gain::X1
        }
    }
}

/// Represents the possible data rates, encoded as their DRATE register values.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    Sps30000 = 0xF0,
    Sps15000 = 0xE0,
    Sps7500 = 0xD0,
    Sps3750 = 0xC0,
    Sps2000 = 0xB0,
    Sps1000 = 0xA1,
    Sps500 = 0x92,
    Sps100 = 0x82,
    Sps60 = 0x72,
    Sps50 = 0x63,
    Sps30 = 0x53,
    Sps25 = 0x43,
    Sps15 = 0x33,
    Sps10 = 0x23,
    Sps5 = 0x13,
    Sps2_5 = 0x03
}

impl From<u8> for DataRate {
    fn from(x: u8) -> Self {
        match x {
            0xE0 => DataRate::Sps15000,
            0xD0 => DataRate::Sps7500,
            0xC0 => DataRate::Sps3750,
            0xB0 => DataRate::Sps2000,
            0xA1 => DataRate::Sps1000,
            0x92 => DataRate::Sps500,
            0x82 => DataRate::Sps100,
            0x72 => DataRate::Sps60,
            0x63 => DataRate::Sps50,
            0x53 => DataRate::Sps30,
            0x43 => DataRate::Sps25,
            0x33 => DataRate::Sps15,
            0x23 => DataRate::Sps10,
            0x13 => DataRate::Sps5,
            0x03 => DataRate::Sps2_5,
            _ => DataRate::Sps30000
        }
    }
}

/// Represents the registers of the ADC.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    Status = 0x00,
    Mux = 0x01,
    Adcon = 0x02,
    Drate = 0x03,
    Io = 0x04,
    Ofc0 = 0x05,
    Ofc1 = 0x06,
    Ofc2 = 0x07,
    Fsc0 = 0x08,
    Fsc1 = 0x09,
    Fsc2 = 0x0A
}

/// Represents the command opcodes. Register read and write opcodes carry the register address
/// in their low nibble and are only the first byte of a longer frame: the register count and
/// the data bytes follow in the same CS frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Wakeup,
    ReadData,
    ReadRegister(Register),
    WriteRegister(Register),
    SelfCalibration,
    Sync,
    Reset,
    /// No-op byte clocked out for bus diagnostics.
    Test
}

impl Command {
    /// Returns the opcode byte sent on the bus.
    pub fn opcode(&self) -> u8 {
        match self {
            Command::Wakeup => 0x00,
            Command::ReadData => 0x01,
            Command::ReadRegister(reg) => 0x10 | *reg as u8,
            Command::WriteRegister(reg) => 0x50 | *reg as u8,
            Command::SelfCalibration => 0xF0,
            Command::Sync => 0xFC,
            Command::Reset => 0xFE,
            Command::Test => 0xFF
        }
    }
}
