//! Driver for the ADS1115 16-bit, 4-channel ADC with I2C.
//!
//! The device has a single configuration register, so gain, data rate and input selection are
//! always written together as one word. A single-ended selection made with
//! [`Adc::select_channel()`] is only stored locally and folded into the word that starts the
//! next conversion.

use core::convert::Infallible;

use embedded_hal::blocking::i2c;
use embedded_hal::digital::v2::InputPin;

use crate::acquisition::{self, Converter, Readiness, ReadyTimeout};
use crate::{Adc, Delay, Error};

pub use register::*;

mod register;

/// The I2C address of the device with the ADDR pin connected to GND.
pub const DEFAULT_ADDRESS: u8 = 0x48;

/// Represents a single ADS1115 16-bit ADC with I2C.
pub struct Ads1115<I2C, DRDY> {
    i2c: I2C,
    address: u8,
    drdy: Option<DRDY>,
    config: Config,
    input: Mux,
    ready_timeout: ReadyTimeout
}

/// Placeholder for an ADS1115 whose ALERT/RDY pin is not wired. Conversions are then timed
/// with a fixed delay derived from the data rate.
pub struct NoDataReady;

impl InputPin for NoDataReady {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}

impl<I2C> Ads1115<I2C, NoDataReady> {
    /// Creates a new [`Ads1115`] instance without a data-ready pin, given the I2C peripheral and
    /// the device address. The newly created instance must be initialized using [`Self::init()`].
    /// # Arguments
    /// * `i2c` - The I2C interface implementing the [`i2c::Write`] and [`i2c::Read`] traits.
    /// * `address` - The 7-bit I2C address, see [`DEFAULT_ADDRESS`].
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self::build(i2c, address, None)
    }
}

impl<I2C, DRDY> Ads1115<I2C, DRDY> {
    fn build(i2c: I2C, address: u8, drdy: Option<DRDY>) -> Self {
        Self {
            i2c,
            address,
            drdy,
            config: Config::default(),
            input: Mux::Ain0Gnd,
            ready_timeout: ReadyTimeout::default()
        }
    }
}

impl<I2C, DRDY, E, P> Ads1115<I2C, DRDY>
    where
        I2C: i2c::Write<Error = E> + i2c::Read<Error = E>,
        DRDY: InputPin<Error = P> {

    /// Creates a new [`Ads1115`] instance that waits on the ALERT/RDY pin for conversions to
    /// complete. The newly created instance must be initialized using [`Self::init()`], which
    /// configures the pin as a conversion-ready output.
    /// # Arguments
    /// * `i2c` - The I2C interface implementing the [`i2c::Write`] and [`i2c::Read`] traits.
    /// * `address` - The 7-bit I2C address, see [`DEFAULT_ADDRESS`].
    /// * `drdy` - The active-low ALERT/RDY input pin implementing the [`InputPin`] trait.
    pub fn with_data_ready(i2c: I2C, address: u8, drdy: DRDY) -> Self {
        Self::build(i2c, address, Some(drdy))
    }

    /// Initializes the ADC by writing the default configuration word ([`DEFAULT_CONFIG`]). With a
    /// data-ready pin, the threshold registers are programmed first and the comparator queue is
    /// enabled, so that ALERT/RDY pulses at the end of every conversion.
    pub fn init(&mut self) -> Result<(), Error<E, P>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ADS1115 init at address {=u8:#x}", self.address);
        if self.drdy.is_some() {
            self.write_register(Register::LoThresh, READY_LO_THRESH)?;
            self.write_register(Register::HiThresh, READY_HI_THRESH)?;
        }
        self.write_config(self.default_config())
    }

    /// Sets the full-scale range and rewrites the configuration register.
    pub fn set_gain(&mut self, gain: Gain) -> Result<(), Error<E, P>> {
        self.write_config(Config { pga: gain, ..self.config })
    }

    /// Sets the data rate and rewrites the configuration register.
    pub fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Error<E, P>> {
        self.write_config(Config { data_rate, ..self.config })
    }

    /// Sets the bound on the data-ready wait. Only used when a data-ready pin is wired.
    pub fn set_ready_timeout(&mut self, timeout: ReadyTimeout) {
        self.ready_timeout = timeout;
    }

    /// Returns the last configuration written to the device.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Returns the current full-scale range.
    pub fn gain(&self) -> Gain {
        self.config.pga
    }

    /// Returns the current data rate.
    pub fn data_rate(&self) -> DataRate {
        self.config.data_rate
    }

    /// Returns the I2C address of the device. The ADS1115 has no identification register, so
    /// the address is the only identity it has on the bus.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Returns `true` if the data-ready pin is asserted. Without a data-ready pin this always
    /// returns `true`.
    pub fn is_ready(&self) -> Result<bool, Error<E, P>> {
        match &self.drdy {
            Some(pin) => pin.is_low().map_err(Error::PinError),
            None => Ok(true)
        }
    }

    /// Performs a bus health check: points the device at the conversion register and reads back
    /// its most significant byte.
    pub fn self_test(&mut self) -> Result<u8, Error<E, P>> {
        let mut byte = [0];
        self.i2c.write(self.address, &[Register::Conversion as u8]).map_err(Error::BusError)?;
        self.i2c.read(self.address, &mut byte).map_err(Error::BusError)?;
        Ok(byte[0])
    }

    /// Destroys the driver, returning the I2C interface and the data-ready pin.
    pub fn release(self) -> (I2C, Option<DRDY>) {
        (self.i2c, self.drdy)
    }

    /// The configuration restored by `init()` and `reset()`: [`DEFAULT_CONFIG`], with the
    /// comparator driving ALERT/RDY when a data-ready pin is wired.
    fn default_config(&self) -> Config {
        match self.drdy {
            Some(_) => Config { comparator: READY_COMPARATOR, ..Config::default() },
            None => Config::default()
        }
    }

    /// Writes the whole configuration word. The cached copy is only updated once the device
    /// has acknowledged it.
    fn write_config(&mut self, config: Config) -> Result<(), Error<E, P>> {
        self.write_register(Register::Config, config.into())?;
        self.config = config;
        Ok(())
    }

    fn write_register(&mut self, reg: Register, value: u16) -> Result<(), Error<E, P>> {
        let [msb, lsb] = value.to_be_bytes();
        self.i2c.write(self.address, &[reg as u8, msb, lsb]).map_err(Error::BusError)
    }
}

impl<I2C, DRDY, E, P> Converter for Ads1115<I2C, DRDY>
    where
        I2C: i2c::Write<Error = E> + i2c::Read<Error = E>,
        DRDY: InputPin<Error = P> {
    type BusError = E;
    type PinError = P;

    fn start_conversion(&mut self, _delay: &mut dyn Delay) -> Result<(), Error<E, P>> {
        self.write_config(Config { os: true, mux: self.input, ..self.config })
    }

    fn wait_ready(&mut self, delay: &mut dyn Delay) -> Result<Readiness, Error<E, P>> {
        match &self.drdy {
            Some(pin) => acquisition::poll_data_ready(pin, delay, self.ready_timeout)
                .map_err(Error::PinError),
            None => {
                delay.delay_ms(self.config.data_rate.conversion_time_ms());
                Ok(Readiness::Ready)
            }
        }
    }

    fn read_code(&mut self, _delay: &mut dyn Delay) -> Result<i32, Error<E, P>> {
        let mut bytes = [0; 2];
        self.i2c.write(self.address, &[Register::Conversion as u8]).map_err(Error::BusError)?;
        self.i2c.read(self.address, &mut bytes).map_err(Error::BusError)?;
        Ok(acquisition::sign_extend(u16::from_be_bytes(bytes) as u32, 16))
    }
}

impl<I2C, DRDY, E, P> Adc for Ads1115<I2C, DRDY>
    where
        I2C: i2c::Write<Error = E> + i2c::Read<Error = E>,
        DRDY: InputPin<Error = P> {
    type Error = Error<E, P>;

    /// Stores the single-ended channel (0 to 3) for the next conversion. Nothing is written to
    /// the device.
    fn select_channel(&mut self, _delay: &mut dyn Delay, channel: u8) -> Result<(), Self::Error> {
        self.input = Mux::single(channel).ok_or(Error::InvalidArgument)?;
        Ok(())
    }

    fn read_raw(&mut self, delay: &mut dyn Delay, samples: u8) -> Result<i32, Self::Error> {
        acquisition::average(self, delay, samples)
    }

    /// Writes a configuration word selecting the differential pair, keeping the current gain and
    /// data rate. Only the pairs accepted by [`Mux::differential()`] are supported; any other
    /// pair is rejected without touching the bus.
    fn configure_differential(&mut self,
                              _delay: &mut dyn Delay,
                              positive: u8,
                              negative: u8) -> Result<(), Self::Error> {
        let mux = Mux::differential(positive, negative).ok_or(Error::InvalidArgument)?;
        self.write_config(Config {
            os: true,
            mux,
            pga: self.config.pga,
            mode: Mode::SingleShot,
            data_rate: self.config.data_rate,
            comparator: 0
        })?;
        self.input = mux;
        Ok(())
    }

    /// Restores and rewrites the default configuration word, selecting channel 0. The threshold
    /// registers are left as programmed by `init()`.
    fn reset(&mut self, _delay: &mut dyn Delay) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ADS1115 reset at address {=u8:#x}", self.address);
        self.write_config(self.default_config())?;
        self.input = Mux::Ain0Gnd;
        Ok(())
    }

    fn code_to_volts(&self, code: i32) -> f32 {
        code as f32 * self.config.pga.full_scale() / 32_768.0
    }
}
