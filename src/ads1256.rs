//! Driver for the ADS1256 24-bit, 8-channel ADC with SPI.
//!
//! The device runs in continuous conversion mode: every change of the input multiplexer is
//! followed by a SYNC/WAKEUP pair that restarts the digital filter, and the DRDY line goes low
//! whenever a new result is available. Every command is followed by a short settle delay before
//! the next bus activity.

use embedded_hal::blocking::spi;
use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::acquisition::{self, Converter, Readiness, ReadyTimeout};
use crate::{Adc, Delay, Error};

pub use register::*;

mod register;

/// Configuration applied by [`Ads1256::init()`].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Programmable gain amplifier setting.
    pub gain: Gain,
    /// Output data rate.
    pub data_rate: DataRate,
    /// Voltage between VREFP and VREFN, in Volts.
    pub reference_voltage: f32,
    /// Enables the analog input buffer.
    pub input_buffer: bool
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gain: Gain::X1,
            data_rate: DataRate::Sps1000,
            reference_voltage: 2.5,
            input_buffer: true
        }
    }
}

/// Represents a single ADS1256 24-bit ADC with SPI.
pub struct Ads1256<SPI, CS, DRDY, RST> {
    spi: SPI,
    cs: CS,
    drdy: DRDY,
    rst: RST,
    gain: Gain,
    data_rate: DataRate,
    status: Status,
    mux: Mux,
    reference_voltage: f32,
    ready_timeout: ReadyTimeout
}

impl<SPI, CS, DRDY, RST, S, P> Ads1256<SPI, CS, DRDY, RST>
    where
        SPI: spi::Transfer<u8, Error = S>,
        CS: OutputPin<Error = P>,
        DRDY: InputPin<Error = P>,
        RST: OutputPin<Error = P> {

    /// Creates a new [`Ads1256`] instance, given the SPI peripheral and the control pins. The
    /// SPI peripheral must be configured with [`SPI_MODE`]. The newly created instance must be
    /// initialized using [`Self::init()`].
    /// # Arguments
    /// * `spi` - The SPI interface implementing the [`spi::Transfer`] trait.
    /// * `cs` - The CS output pin implementing the [`OutputPin`] trait.
    /// * `drdy` - The active-low DRDY input pin implementing the [`InputPin`] trait.
    /// * `rst` - The active-low RESET output pin implementing the [`OutputPin`] trait.
    pub fn new(spi: SPI, cs: CS, drdy: DRDY, rst: RST) -> Self {
        Self {
            spi,
            cs,
            drdy,
            rst,
            gain: Gain::X1,
            data_rate: DataRate::Sps30000,
            status: Status::default(),
            mux: Mux::default(),
            reference_voltage: Config::default().reference_voltage,
            ready_timeout: ReadyTimeout::default()
        }
    }

    /// Initializes the ADC: hardware reset, gain and data rate, input buffer and a
    /// self-calibration, each followed by the settle time the device needs. After this method,
    /// the ADC is ready to use.
    /// # Arguments
    /// * `delay` - The delay source implementing the [`Delay`] trait.
    /// * `config` - The [`Config`] struct containing the configuration for the ADC.
    pub fn init(&mut self, delay: &mut dyn Delay, config: Config) -> Result<(), Error<S, P>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ADS1256 init: {}", config);
        self.cs.set_high().map_err(Error::PinError)?;
        self.rst.set_high().map_err(Error::PinError)?;
        delay.delay_ms(100);
        self.reset(delay)?;
        delay.delay_ms(10);
        self.set_gain(delay, config.gain)?;
        self.set_data_rate(delay, config.data_rate)?;
        let status = Status {
            buffer_enabled: config.input_buffer,
            ..Status::from(self.read_register(delay, Register::Status)?)
        };
        self.write_register(Register::Status, status.into())?;
        self.status = status;
        delay.delay_ms(10);
        self.self_calibrate(delay)?;
        delay.delay_ms(50);
        self.reference_voltage = config.reference_voltage;
        Ok(())
    }

    /// Writes the PGA setting to the ADCON register, turning off the clock output and the sensor
    /// detect current sources.
    pub fn set_gain(&mut self, delay: &mut dyn Delay, gain: Gain) -> Result<(), Error<S, P>> {
        let adcon = Adcon { clock_out: 0, sensor_detect: 0, pga: gain };
        self.write_register(Register::Adcon, adcon.into())?;
        self.gain = gain;
        delay.delay_ms(10);
        Ok(())
    }

    /// Writes the DRATE register.
    pub fn set_data_rate(&mut self,
                         delay: &mut dyn Delay,
                         data_rate: DataRate) -> Result<(), Error<S, P>> {
        self.write_register(Register::Drate, data_rate as u8)?;
        self.data_rate = data_rate;
        delay.delay_ms(10);
        Ok(())
    }

    /// Sets the reference voltage used to convert codes to Volts.
    pub fn set_reference_voltage(&mut self, reference_voltage: f32) {
        self.reference_voltage = reference_voltage;
    }

    /// Sets the bound on the DRDY wait of every sample.
    pub fn set_ready_timeout(&mut self, timeout: ReadyTimeout) {
        self.ready_timeout = timeout;
    }

    /// Returns the last PGA setting written to the device.
    pub fn gain(&self) -> Gain {
        self.gain
    }

    /// Returns the last data rate written to the device.
    pub fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    /// Returns the last input multiplexer setting written to the device.
    pub fn mux(&self) -> Mux {
        self.mux
    }

    /// Returns the last status register value written to the device.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the reference voltage, in Volts.
    pub fn reference_voltage(&self) -> f32 {
        self.reference_voltage
    }

    /// Starts the offset and gain self-calibration. The calibration takes up to a few hundred
    /// milliseconds depending on the data rate; wait for DRDY before the next register access.
    pub fn self_calibrate(&mut self, delay: &mut dyn Delay) -> Result<(), Error<S, P>> {
        self.write_command(delay, Command::SelfCalibration)
    }

    /// Returns the factory programmed identification bits of the STATUS register.
    pub fn read_device_id(&mut self, delay: &mut dyn Delay) -> Result<u8, Error<S, P>> {
        Ok(Status::from(self.read_register(delay, Register::Status)?).id)
    }

    /// Returns the content of the ADCON register, as read from the device.
    pub fn read_adcon(&mut self, delay: &mut dyn Delay) -> Result<Adcon, Error<S, P>> {
        Ok(Adcon::from(self.read_register(delay, Register::Adcon)?))
    }

    /// Returns `true` if the DRDY pin is asserted.
    pub fn is_ready(&self) -> Result<bool, Error<S, P>> {
        self.drdy.is_low().map_err(Error::PinError)
    }

    /// Performs a register reading. Reading does not update the cached configuration.
    /// # Arguments
    /// * `delay` - The delay source implementing the [`Delay`] trait.
    /// * `reg` - The register as a [`Register`] value.
    pub fn read_register(&mut self,
                         delay: &mut dyn Delay,
                         reg: Register) -> Result<u8, Error<S, P>> {
        let mut value = [0];
        self.cs.set_low().map_err(Error::PinError)?;
        self.transfer(&mut [Command::ReadRegister(reg).opcode(), 0x00])?;
        delay.delay_us(10);
        self.transfer(&mut value)?;
        self.cs.set_high().map_err(Error::PinError)?;
        Ok(value[0])
    }

    /// Sends a single command byte, followed by the command settle delay. A [`Command::Reset`]
    /// also returns the cached configuration to the power-on values. Register access needs more
    /// than the opcode byte, so [`Command::ReadRegister`] and [`Command::WriteRegister`] are
    /// rejected with [`Error::InvalidArgument`]; use [`Self::read_register()`] instead.
    /// # Arguments
    /// * `delay` - The delay source implementing the [`Delay`] trait.
    /// * `command` - The command as a [`Command`] value.
    pub fn write_command(&mut self,
                         delay: &mut dyn Delay,
                         command: Command) -> Result<(), Error<S, P>> {
        if let Command::ReadRegister(_) | Command::WriteRegister(_) = command {
            return Err(Error::InvalidArgument);
        }
        self.cs.set_low().map_err(Error::PinError)?;
        self.transfer(&mut [command.opcode()])?;
        self.cs.set_high().map_err(Error::PinError)?;
        if command == Command::Reset {
            self.reset_cache();
        }
        delay.delay_us(10);
        Ok(())
    }

    /// Performs a bus health check: clocks out a no-op byte and returns what the device shifted
    /// back.
    pub fn self_test(&mut self) -> Result<u8, Error<S, P>> {
        let mut byte = [Command::Test.opcode()];
        self.cs.set_low().map_err(Error::PinError)?;
        self.transfer(&mut byte)?;
        self.cs.set_high().map_err(Error::PinError)?;
        Ok(byte[0])
    }

    /// Destroys the driver, returning the SPI interface and the control pins.
    pub fn release(self) -> (SPI, CS, DRDY, RST) {
        (self.spi, self.cs, self.drdy, self.rst)
    }

    /// Performs a single register writing.
    fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error<S, P>> {
        self.cs.set_low().map_err(Error::PinError)?;
        self.transfer(&mut [Command::WriteRegister(reg).opcode(), 0x00, value])?;
        self.cs.set_high().map_err(Error::PinError)?;
        Ok(())
    }

    /// Runs one transfer inside an open CS frame. CS is released before a bus error is
    /// returned, so the next transaction starts on a frame boundary.
    fn transfer(&mut self, words: &mut [u8]) -> Result<(), Error<S, P>> {
        if let Err(e) = self.spi.transfer(words) {
            self.cs.set_high().map_err(Error::PinError)?;
            return Err(Error::BusError(e));
        }
        Ok(())
    }

    /// Mirrors the register values the device holds after a reset.
    fn reset_cache(&mut self) {
        self.gain = Gain::X1;
        self.data_rate = DataRate::Sps30000;
        self.status = Status::default();
        self.mux = Mux::default();
    }

    /// Writes the input multiplexer and restarts the conversion, since a new MUX setting only
    /// takes effect after SYNC and WAKEUP.
    fn write_mux(&mut self, delay: &mut dyn Delay, mux: Mux) -> Result<(), Error<S, P>> {
        self.write_register(Register::Mux, mux.into())?;
        self.mux = mux;
        delay.delay_us(10);
        self.write_command(delay, Command::Sync)?;
        self.write_command(delay, Command::Wakeup)?;
        delay.delay_us(10);
        Ok(())
    }
}

impl<SPI, CS, DRDY, RST, S, P> Converter for Ads1256<SPI, CS, DRDY, RST>
    where
        SPI: spi::Transfer<u8, Error = S>,
        CS: OutputPin<Error = P>,
        DRDY: InputPin<Error = P>,
        RST: OutputPin<Error = P> {
    type BusError = S;
    type PinError = P;

    fn start_conversion(&mut self, _delay: &mut dyn Delay) -> Result<(), Error<S, P>> {
        Ok(())
    }

    fn wait_ready(&mut self, delay: &mut dyn Delay) -> Result<Readiness, Error<S, P>> {
        acquisition::poll_data_ready(&self.drdy, delay, self.ready_timeout).map_err(Error::PinError)
    }

    fn read_code(&mut self, delay: &mut dyn Delay) -> Result<i32, Error<S, P>> {
        let mut bytes = [0; 3];
        self.cs.set_low().map_err(Error::PinError)?;
        self.transfer(&mut [Command::ReadData.opcode()])?;
        delay.delay_us(10);
        self.transfer(&mut bytes)?;
        self.cs.set_high().map_err(Error::PinError)?;
        Ok(acquisition::sign_extend(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]), 24))
    }

    fn settle_between_samples(&mut self, delay: &mut dyn Delay) {
        delay.delay_us(100);
    }
}

impl<SPI, CS, DRDY, RST, S, P> Adc for Ads1256<SPI, CS, DRDY, RST>
    where
        SPI: spi::Transfer<u8, Error = S>,
        CS: OutputPin<Error = P>,
        DRDY: InputPin<Error = P>,
        RST: OutputPin<Error = P> {
    type Error = Error<S, P>;

    /// Measures `channel` (0 to 7) against AINCOM and restarts the conversion.
    fn select_channel(&mut self, delay: &mut dyn Delay, channel: u8) -> Result<(), Self::Error> {
        let positive = Input::ain(channel).ok_or(Error::InvalidArgument)?;
        self.write_mux(delay, Mux { positive, negative: Input::AinCom })
    }

    fn read_raw(&mut self, delay: &mut dyn Delay, samples: u8) -> Result<i32, Self::Error> {
        acquisition::average(self, delay, samples)
    }

    /// Measures `positive` against `negative`, any pair of AIN0 to AIN7, and restarts the
    /// conversion.
    fn configure_differential(&mut self,
                              delay: &mut dyn Delay,
                              positive: u8,
                              negative: u8) -> Result<(), Self::Error> {
        let positive = Input::ain(positive).ok_or(Error::InvalidArgument)?;
        let negative = Input::ain(negative).ok_or(Error::InvalidArgument)?;
        self.write_mux(delay, Mux { positive, negative })
    }

    /// Pulses the RESET line, then sends SYNC and WAKEUP. All the registers return to their
    /// power-on values; the reference voltage and the ready timeout are kept.
    fn reset(&mut self, delay: &mut dyn Delay) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ADS1256 hardware reset");
        self.rst.set_low().map_err(Error::PinError)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(Error::PinError)?;
        delay.delay_ms(10);
        self.reset_cache();
        self.write_command(delay, Command::Sync)?;
        self.write_command(delay, Command::Wakeup)
    }

    fn code_to_volts(&self, code: i32) -> f32 {
        (code as f32 / FULL_SCALE_CODE as f32) * (self.reference_voltage / self.gain.factor())
    }
}
