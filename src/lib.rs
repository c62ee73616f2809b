//! Expression pedal sampling and MIDI Control Change dispatch.
//!
//! This crate samples analog expression pedals and emits a MIDI CC message
//! whenever a pedal moves far enough to matter. It runs cooperatively
//! inside a larger firmware loop: [`ExpressionPedals::poll()`] returns
//! immediately unless a sampling pass is due, and the only wait inside a
//! pass is a bounded ADC conversion poll.
//!
//! # Pipeline
//!
//! ```text
//! SampleScheduler ─▶ for each pedal:
//!     SampleAcquirer ─▶ to_midi ─▶ ChangeFilter ─▶ MidiSink::send_cc
//!                                       ▲                  │
//!                                       └──── commit on Ok ┘
//! ```
//!
//! | Stage                 | Default                                   |
//! |-----------------------|-------------------------------------------|
//! | Sample interval       | 5 ms, missed intervals are skipped        |
//! | ADC conversion poll   | 10 ms timeout, failure reads as 0         |
//! | Deadzone              | raw ≤ 8 → 0                               |
//! | Scaling               | `(raw * 127 + 2047) / 4095`               |
//! | Change threshold      | \|new − last sent\| ≥ 2, first value always |
//!
//! # Collaborators
//!
//! Everything outside the pipeline is reached through a trait and passed
//! in per call via [`ExpressionContext`]:
//!
//! - [`AdcDriver`] — the shared ADC peripheral.
//! - [`TickSource`] — free-running millisecond clock.
//! - [`SystemStatus`] — configuration-complete flag and global settings.
//! - [`MidiSink`] — non-blocking CC output; refusals are dropped and the
//!   pedal is re-evaluated next pass.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation. Pedal tables are fixed-size arrays; [`CcQueue`] is
//! backed by [`heapless`].
//!
//! # Crate Features
//!
//! - **`defmt`** — structured logging and [`defmt::Format`] on public types.
//! - **`task`** — Embassy glue: [`task::EmbassyClock`],
//!   [`task::expression_update_task`] and a [`MidiSink`] implementation for
//!   `embassy_sync` channel senders.

#![cfg_attr(not(test), no_std)]

pub mod adc;
pub mod error;
pub mod filter;
pub mod mapping;
pub mod midi;
pub mod pedals;
pub mod scheduler;
pub mod settings;
#[cfg(feature = "task")]
pub mod task;

#[cfg(test)]
mod testing;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use adc::{AdcDriver, Sample, SampleAcquirer};
pub use error::{ConfigError, SampleError, SendError};
pub use filter::ChangeFilter;
pub use mapping::{to_midi, to_midi_with_deadzone};
pub use midi::{CcMessage, CcQueue, MidiSink};
pub use pedals::{
    Cycle, ExpressionConfig, ExpressionContext, ExpressionPedals, PedalConfig, PedalOutcome,
    EXPRESSION_PEDALS, PEDAL_COUNT,
};
pub use scheduler::{SampleScheduler, TickSource};
pub use settings::{midi_channel, SystemStatus};
#[cfg(feature = "task")]
pub use task::{expression_update_task, EmbassyClock};
