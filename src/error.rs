//! Error types for the expression pedal pipeline.
//!
//! None of these reach the firmware loop: acquisition failures degrade to a
//! zero reading and send failures are dropped until the next cycle. They
//! exist so the individual stages can report *what* went wrong.

use core::fmt;

/// Failure while acquiring a single ADC sample.
///
/// Each variant wraps the driver's own error and records which step of the
/// configure → start → poll sequence failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleError<E> {
    /// Selecting the channel / sampling time was rejected.
    Configure(E),
    /// The conversion could not be started.
    Start(E),
    /// The conversion did not complete within the poll timeout.
    Conversion(E),
}

impl<E: fmt::Debug> fmt::Display for SampleError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SampleError::Configure(e) => write!(f, "ADC channel configuration failed: {:?}", e),
            SampleError::Start(e) => write!(f, "ADC conversion start failed: {:?}", e),
            SampleError::Conversion(e) => write!(f, "ADC conversion timed out: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for SampleError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SampleError::Configure(e) => defmt::write!(f, "ADC configure failed: {}", e),
            SampleError::Start(e) => defmt::write!(f, "ADC start failed: {}", e),
            SampleError::Conversion(e) => defmt::write!(f, "ADC conversion timed out: {}", e),
        }
    }
}

/// Status reported by a [`MidiSink`](crate::MidiSink) that did not accept a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// Outgoing buffers are full; the message was not queued.
    BuffersFull,
    /// Any other refusal from the transport.
    Rejected,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SendError::BuffersFull => write!(f, "MIDI output buffers full"),
            SendError::Rejected => write!(f, "MIDI message rejected"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SendError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SendError::BuffersFull => defmt::write!(f, "Buffers full"),
            SendError::Rejected => defmt::write!(f, "Rejected"),
        }
    }
}

/// Invalid pedal table or tuning values passed to
/// [`ExpressionPedals::new()`](crate::ExpressionPedals::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A pedal's CC number is above 127. Holds the pedal index.
    InvalidCcNumber(usize),
    /// The change threshold must be at least 1.
    ZeroChangeThreshold,
    /// The sample interval must be at least 1 tick.
    ZeroSampleInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidCcNumber(i) => write!(f, "Pedal {} has a CC number above 127", i),
            ConfigError::ZeroChangeThreshold => write!(f, "Change threshold must be non-zero"),
            ConfigError::ZeroSampleInterval => write!(f, "Sample interval must be non-zero"),
        }
    }
}
