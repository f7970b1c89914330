//! Conversion control flow shared by both converters: waiting for data-ready, averaging and
//! decoding signed codes.

use embedded_hal::digital::v2::InputPin;

use super::{Delay, Error};

/// Bounds the wait for the data-ready line. A wait that exceeds `timeout_us` abandons the read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReadyTimeout {
    /// Longest time to wait for a single conversion, in microseconds.
    pub timeout_us: u32,
    /// Time between two samples of the data-ready line, in microseconds.
    pub poll_interval_us: u32
}

impl Default for ReadyTimeout {
    fn default() -> Self {
        Self {
            timeout_us: 1_000_000,
            poll_interval_us: 10
        }
    }
}

/// Outcome of a wait for the end of a conversion.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Readiness {
    Ready,
    TimedOut
}

/// The device specific steps of a single conversion.
pub(crate) trait Converter {
    type BusError;
    type PinError;

    /// Triggers a conversion, if the device needs to be told.
    fn start_conversion(&mut self,
                        delay: &mut dyn Delay) -> Result<(), Error<Self::BusError, Self::PinError>>;

    /// Blocks until the conversion result is available or the wait is abandoned.
    fn wait_ready(&mut self,
                  delay: &mut dyn Delay) -> Result<Readiness, Error<Self::BusError, Self::PinError>>;

    /// Fetches the conversion result as a sign-extended code.
    fn read_code(&mut self,
                 delay: &mut dyn Delay) -> Result<i32, Error<Self::BusError, Self::PinError>>;

    /// Gap inserted after each sample.
    fn settle_between_samples(&mut self, _delay: &mut dyn Delay) {}
}

/// Returns the mean of `samples` conversions, truncated toward zero. A data-ready timeout on any
/// sample discards the partial sum and yields `0`.
pub(crate) fn average<C: Converter>(converter: &mut C,
                                    delay: &mut dyn Delay,
                                    samples: u8) -> Result<i32, Error<C::BusError, C::PinError>> {
    if samples == 0 { return Err(Error::InvalidArgument) }
    let mut total: i64 = 0;
    for _ in 0..samples {
        converter.start_conversion(delay)?;
        if converter.wait_ready(delay)? == Readiness::TimedOut {
            return Ok(0);
        }
        total += i64::from(converter.read_code(delay)?);
        converter.settle_between_samples(delay);
    }
    Ok((total / i64::from(samples)) as i32)
}

/// Polls an active-low data-ready pin until it is asserted, giving up after `timeout`.
pub(crate) fn poll_data_ready<P: InputPin>(pin: &P,
                                           delay: &mut dyn Delay,
                                           timeout: ReadyTimeout) -> Result<Readiness, P::Error> {
    let step = timeout.poll_interval_us.max(1);
    let mut waited: u32 = 0;
    loop {
        if pin.is_low()? {
            return Ok(Readiness::Ready);
        }
        if waited >= timeout.timeout_us {
            #[cfg(feature = "defmt")]
            defmt::warn!("data-ready not asserted after {=u32} us", waited);
            return Ok(Readiness::TimedOut);
        }
        delay.delay_us(step);
        waited = waited.saturating_add(step);
    }
}

/// Interprets the low `bits` bits of `raw` as a two's-complement value and sign-extends it to
/// an `i32`. Bits above `bits` are ignored.
/// # Arguments
/// * `raw` - The code as received from the device, right aligned.
/// * `bits` - The code width, between 1 and 32.
pub fn sign_extend(raw: u32, bits: u32) -> i32 {
    let shift = 32 - bits.clamp(1, 32);
    ((raw << shift) as i32) >> shift
}
