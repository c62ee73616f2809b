//! Single-shot ADC acquisition.
//!
//! [`AdcDriver`] is the narrow interface to the platform's ADC peripheral.
//! [`SampleAcquirer`] drives it through one full conversion per call:
//!
//! ```text
//! configure_channel → start → poll_for_conversion → read_value → stop
//! ```
//!
//! The peripheral is shared with other firmware consumers, so `stop()` is
//! issued on every path out of an acquisition, successful or not.

use crate::error::SampleError;

/// Default bound on the conversion poll, in driver time units (ms).
pub const CONVERSION_TIMEOUT_MS: u32 = 10;

/// Platform ADC operations used by [`SampleAcquirer`].
///
/// Implementations own a single-channel regular conversion sequence and
/// select the sampling time themselves (the reference hardware uses 71.5
/// cycles). `read_value` returns a right-aligned 12-bit result.
pub trait AdcDriver {
    /// Driver-specific error type.
    type Error;

    /// Route `channel` to the converter.
    fn configure_channel(&mut self, channel: u8) -> Result<(), Self::Error>;

    /// Start a single conversion.
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Wait at most `timeout_ms` for the conversion to complete.
    fn poll_for_conversion(&mut self, timeout_ms: u32) -> Result<(), Self::Error>;

    /// Read the completed conversion.
    fn read_value(&mut self) -> u16;

    /// Stop the converter and release the peripheral.
    fn stop(&mut self);
}

impl<T> AdcDriver for &mut T
where
    T: AdcDriver + ?Sized,
{
    type Error = T::Error;

    fn configure_channel(&mut self, channel: u8) -> Result<(), Self::Error> {
        (**self).configure_channel(channel)
    }

    fn start(&mut self) -> Result<(), Self::Error> {
        (**self).start()
    }

    fn poll_for_conversion(&mut self, timeout_ms: u32) -> Result<(), Self::Error> {
        (**self).poll_for_conversion(timeout_ms)
    }

    fn read_value(&mut self) -> u16 {
        (**self).read_value()
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Result of a single acquisition.
///
/// A failed read is kept distinct from a measured zero here, but the
/// pipeline deliberately maps both to the lowest pedal position
/// (see [`Sample::raw`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sample {
    /// The conversion completed with this raw value.
    Measured(u16),
    /// The driver failed; no value was read.
    Failed,
}

impl Sample {
    /// Raw value fed to the mapper. A failed read is reported as 0.
    pub fn raw(self) -> u16 {
        match self {
            Sample::Measured(raw) => raw,
            Sample::Failed => 0,
        }
    }

    /// Returns `true` if the conversion completed.
    pub fn is_measured(&self) -> bool {
        matches!(self, Sample::Measured(_))
    }
}

/// Drives an [`AdcDriver`] through one conversion at a time.
///
/// Holds the driver (or a `&mut` borrow of it) for exclusive access.
/// Non-reentrant; the pipeline calls it once per pedal per cycle from a
/// single task.
pub struct SampleAcquirer<A> {
    adc: A,
    timeout_ms: u32,
}

impl<A> SampleAcquirer<A>
where
    A: AdcDriver,
{
    /// Wrap `adc` with the default [`CONVERSION_TIMEOUT_MS`].
    pub fn new(adc: A) -> Self {
        Self::with_timeout(adc, CONVERSION_TIMEOUT_MS)
    }

    /// Wrap `adc` with a custom conversion timeout.
    pub fn with_timeout(adc: A, timeout_ms: u32) -> Self {
        Self { adc, timeout_ms }
    }

    /// Acquire one sample from `channel`, reporting which step failed.
    ///
    /// The converter is stopped before returning on every path, including
    /// a rejected configuration.
    ///
    /// # Errors
    /// * [`SampleError::Configure`] if the channel could not be selected
    /// * [`SampleError::Start`] if the conversion could not be started
    /// * [`SampleError::Conversion`] if the poll timed out
    pub fn try_read(&mut self, channel: u8) -> Result<u16, SampleError<A::Error>> {
        let result = self.convert(channel);
        self.adc.stop();
        result
    }

    /// Acquire one sample from `channel`, logging and absorbing failures.
    pub fn read(&mut self, channel: u8) -> Sample {
        match self.try_read(channel) {
            Ok(raw) => Sample::Measured(raw),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("ADC channel {} read failed", channel);
                Sample::Failed
            }
        }
    }

    /// Acquire one sample and return the raw value, 0 on failure.
    pub fn read_channel(&mut self, channel: u8) -> u16 {
        self.read(channel).raw()
    }

    /// Release the underlying driver.
    pub fn release(self) -> A {
        self.adc
    }

    fn convert(&mut self, channel: u8) -> Result<u16, SampleError<A::Error>> {
        self.adc
            .configure_channel(channel)
            .map_err(SampleError::Configure)?;
        self.adc.start().map_err(SampleError::Start)?;
        self.adc
            .poll_for_conversion(self.timeout_ms)
            .map_err(SampleError::Conversion)?;
        Ok(self.adc.read_value())
    }
}
