//! Outgoing Control Change messages.
//!
//! [`MidiSink`] is the only thing the pipeline knows about MIDI output.
//! Framing and transport live behind it. [`CcQueue`] is a fixed-capacity
//! buffer implementation that a transport task can drain.

use heapless::Deque;

use crate::error::SendError;

/// A single Control Change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CcMessage {
    /// MIDI channel (0–15).
    pub channel: u8,
    /// Controller number (0–127).
    pub cc_number: u8,
    /// Controller value (0–127).
    pub value: u8,
}

/// Destination for Control Change messages.
pub trait MidiSink {
    /// Hand one CC message to the transport without blocking.
    ///
    /// # Errors
    /// * [`SendError::BuffersFull`] when the transport has no room
    /// * [`SendError::Rejected`] for any other refusal
    fn send_cc(&mut self, channel: u8, cc_number: u8, value: u8) -> Result<(), SendError>;
}

impl<T> MidiSink for &mut T
where
    T: MidiSink + ?Sized,
{
    fn send_cc(&mut self, channel: u8, cc_number: u8, value: u8) -> Result<(), SendError> {
        (**self).send_cc(channel, cc_number, value)
    }
}

/// Bounded FIFO of pending CC messages.
///
/// `send_cc` never overwrites: once `N` messages are queued it reports
/// [`SendError::BuffersFull`] until the consumer pops one.
///
/// # Example
///
/// ```
/// use spirant_expression::{CcQueue, MidiSink, SendError};
///
/// let mut queue: CcQueue<1> = CcQueue::new();
/// assert_eq!(queue.send_cc(0, 11, 127), Ok(()));
/// assert_eq!(queue.send_cc(0, 4, 10), Err(SendError::BuffersFull));
///
/// let msg = queue.pop().unwrap();
/// assert_eq!((msg.cc_number, msg.value), (11, 127));
/// ```
pub struct CcQueue<const N: usize> {
    pending: Deque<CcMessage, N>,
}

impl<const N: usize> Default for CcQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CcQueue<N> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            pending: Deque::new(),
        }
    }

    /// Take the oldest pending message.
    pub fn pop(&mut self) -> Option<CcMessage> {
        self.pending.pop_front()
    }

    /// Number of pending messages.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns `true` if the next `send_cc` would be refused.
    pub fn is_full(&self) -> bool {
        self.pending.is_full()
    }

    /// Iterate pending messages, oldest first, without removing them.
    pub fn iter(&self) -> impl Iterator<Item = &CcMessage> {
        self.pending.iter()
    }
}

impl<const N: usize> MidiSink for CcQueue<N> {
    fn send_cc(&mut self, channel: u8, cc_number: u8, value: u8) -> Result<(), SendError> {
        let msg = CcMessage {
            channel,
            cc_number,
            value,
        };
        self.pending
            .push_back(msg)
            .map_err(|_| SendError::BuffersFull)
    }
}
