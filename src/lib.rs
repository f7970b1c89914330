//! # Rust ADS1256 / ADS1115 Precision ADC Drivers
//!
//! This is a platform-agnostic Rust driver for two Texas Instruments delta-sigma ADCs, using the
//! [`embedded-hal`](https://github.com/rust-embedded/embedded-hal) traits:
//!
//! - the ADS1256, a 24-bit, 8-channel converter with a programmable gain amplifier, reached over
//!   SPI with dedicated chip-select, reset and data-ready lines;
//! - the ADS1115, a 16-bit, 4-channel converter with a programmable full-scale range, reached
//!   over I2C with an optional ALERT/RDY line.
//!
//! This driver allows you to:
//!
//! - Initialize and configure the devices (gain, data rate, input buffer, reference voltage).
//! - Perform a hardware/software reset and a self-calibration.
//! - Select single-ended channels or differential input pairs.
//! - Get averaged raw codes and converted voltages from the ADC.
//! - Run low-level diagnostics (register reads, raw commands, bus health checks).
//!
//! Both devices implement the [`Adc`] trait, so code that only samples channels can be written
//! once for either converter.
//!
//! ##### Datasheets:
//!
//! - [ADS1256 (Rev. K)](https://www.ti.com/lit/ds/symlink/ads1256.pdf)
//! - [ADS1115 (Rev. E)](https://www.ti.com/lit/ds/symlink/ads1115.pdf)
//!
//! ## Usage
//!
//! ### ADS1256
//!
//! ```ignore
//! use precision_adc::*;
//!
//! // Initialization
//! let mut adc = Ads1256::new(spi, cs, drdy, rst);
//! adc.init(&mut delay, ads1256::Config::default()).unwrap();
//!
//! // Measurement, averaging 50 conversions of AIN3 against AINCOM
//! let volts = adc.read_voltage(&mut delay, 3, 50).unwrap();
//! ```
//!
//! ### ADS1115
//!
//! ```ignore
//! use precision_adc::*;
//!
//! // Initialization
//! let mut adc = Ads1115::new(i2c, ads1115::DEFAULT_ADDRESS);
//! adc.init().unwrap();
//! adc.set_gain(ads1115::Gain::One).unwrap();
//!
//! // Measurement of the AIN0 - AIN1 differential pair
//! let volts = adc.read_differential_voltage(&mut delay, 0, 1, 10).unwrap();
//! ```
//!
//! A read that never sees the data-ready line asserted within the configured
//! [`ReadyTimeout`] is abandoned and yields a raw code of `0`.
//!

#![no_std]

use embedded_hal::blocking::delay::{DelayMs, DelayUs};

pub use acquisition::{sign_extend, ReadyTimeout};
pub use ads1115::Ads1115;
pub use ads1256::Ads1256;

pub mod acquisition;
pub mod ads1115;
pub mod ads1256;

/// Blocking delay source used for conversion waits and command settle times. Implemented for
/// every type providing both [`DelayMs<u32>`] and [`DelayUs<u32>`].
pub trait Delay: DelayMs<u32> + DelayUs<u32> {}

impl<T: DelayMs<u32> + DelayUs<u32>> Delay for T {}

/// The acquisition capability shared by both converters. Implementors supply the device
/// specific channel addressing, the averaged raw read and the code-to-volts scaling; the
/// voltage and differential reads are built on top of those.
pub trait Adc {
    /// The error type of the device operations.
    type Error;

    /// Selects the single-ended input channel used by the next [`Self::read_raw()`].
    /// # Arguments
    /// * `delay` - The delay source implementing the [`Delay`] trait.
    /// * `channel` - The input channel index.
    fn select_channel(&mut self, delay: &mut dyn Delay, channel: u8) -> Result<(), Self::Error>;

    /// Returns the integer mean of `samples` conversions of the selected input, truncated toward
    /// zero. Returns `0` if the device does not signal data-ready in time.
    /// # Arguments
    /// * `delay` - The delay source implementing the [`Delay`] trait.
    /// * `samples` - The number of conversions to average, at least 1.
    fn read_raw(&mut self, delay: &mut dyn Delay, samples: u8) -> Result<i32, Self::Error>;

    /// Routes the `positive` and `negative` inputs to the converter for differential
    /// measurements.
    fn configure_differential(&mut self,
                              delay: &mut dyn Delay,
                              positive: u8,
                              negative: u8) -> Result<(), Self::Error>;

    /// Restores the device default configuration.
    fn reset(&mut self, delay: &mut dyn Delay) -> Result<(), Self::Error>;

    /// Converts a raw code to Volts using the cached gain and reference configuration.
    fn code_to_volts(&self, code: i32) -> f32;

    /// Selects `channel`, then returns the averaged reading converted to Volts.
    fn read_voltage(&mut self,
                    delay: &mut dyn Delay,
                    channel: u8,
                    samples: u8) -> Result<f32, Self::Error> {
        self.select_channel(delay, channel)?;
        let raw = self.read_raw(delay, samples)?;
        Ok(self.code_to_volts(raw))
    }

    /// Configures the differential pair, then returns the averaged raw code.
    fn read_differential_raw(&mut self,
                             delay: &mut dyn Delay,
                             positive: u8,
                             negative: u8,
                             samples: u8) -> Result<i32, Self::Error> {
        self.configure_differential(delay, positive, negative)?;
        self.read_raw(delay, samples)
    }

    /// Configures the differential pair, then returns the averaged reading converted to Volts.
    fn read_differential_voltage(&mut self,
                                 delay: &mut dyn Delay,
                                 positive: u8,
                                 negative: u8,
                                 samples: u8) -> Result<f32, Self::Error> {
        let raw = self.read_differential_raw(delay, positive, negative, samples)?;
        Ok(self.code_to_volts(raw))
    }
}

/// Represents the possible errors.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<B, P> {
    /// The SPI or I2C transaction failed.
    BusError(B),
    /// A chip-select, reset or data-ready pin operation failed.
    PinError(P),
    /// A channel, differential pair or sample count outside the supported range. Nothing is
    /// sent to the device and the cached configuration is left unchanged.
    InvalidArgument
}
