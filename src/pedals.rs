//! Expression pedal dispatcher.
//!
//! [`ExpressionPedals`] ties the pipeline together. Each call to
//! [`poll()`](ExpressionPedals::poll) is cheap when nothing is due, so it
//! can be called from every pass of the firmware's main loop.
//!
//! # Control flow
//!
//! 1. Return [`Cycle::NotReady`] if system configuration is incomplete. No
//!    hardware is touched.
//! 2. Return [`Cycle::Waiting`] if the scheduler gate is closed.
//! 3. Read the MIDI channel from the global settings block.
//! 4. For each pedal, in table order: acquire → map → filter → send.
//!    The filter is only updated after the sink accepts the message; a
//!    refused send leaves it as-is and moves on to the next pedal.

use crate::adc::{AdcDriver, SampleAcquirer, CONVERSION_TIMEOUT_MS};
use crate::error::{ConfigError, SendError};
use crate::filter::{ChangeFilter, CHANGE_THRESHOLD};
use crate::mapping::{to_midi_with_deadzone, DEADZONE_COUNTS, MIDI_MAX};
use crate::midi::MidiSink;
use crate::scheduler::{SampleScheduler, TickSource, SAMPLE_INTERVAL_MS};
use crate::settings::{midi_channel, SystemStatus};

/// Number of pedals on the reference hardware.
pub const PEDAL_COUNT: usize = 2;

/// Default pedal table: ADC channel 7 → CC 11 (expression),
/// ADC channel 8 → CC 4 (foot controller).
pub const EXPRESSION_PEDALS: [PedalConfig; PEDAL_COUNT] = [
    PedalConfig::new(7, 11),
    PedalConfig::new(8, 4),
];

// ── Configuration ────────────────────────────────────────────────────────

/// Static wiring of one pedal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PedalConfig {
    /// ADC channel the pedal wiper is connected to.
    pub adc_channel: u8,
    /// Controller number to send (0–127).
    pub cc_number: u8,
}

impl PedalConfig {
    pub const fn new(adc_channel: u8, cc_number: u8) -> Self {
        Self {
            adc_channel,
            cc_number,
        }
    }
}

/// Tuning values for the pipeline.
///
/// [`ExpressionConfig::default()`] reproduces the reference firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExpressionConfig {
    /// Time between sampling passes in ms. Default: 5.
    pub sample_interval_ms: u64,
    /// Minimum MIDI-value change that triggers a send. Default: 2.
    pub change_threshold: u8,
    /// Raw counts at or below this read as 0. Default: 8.
    pub deadzone_counts: u16,
    /// Bound on each ADC conversion poll in ms. Default: 10.
    pub conversion_timeout_ms: u32,
}

impl Default for ExpressionConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: SAMPLE_INTERVAL_MS,
            change_threshold: CHANGE_THRESHOLD,
            deadzone_counts: DEADZONE_COUNTS,
            conversion_timeout_ms: CONVERSION_TIMEOUT_MS,
        }
    }
}

// ── Per-call dependencies ────────────────────────────────────────────────

/// Collaborators borrowed for a single [`poll()`](ExpressionPedals::poll).
pub struct ExpressionContext<'a, A, C, S, M> {
    /// Shared ADC peripheral.
    pub adc: &'a mut A,
    /// Millisecond clock.
    pub clock: &'a C,
    /// Readiness flag and global settings.
    pub system: &'a S,
    /// MIDI output.
    pub sink: &'a mut M,
}

// ── Cycle report ─────────────────────────────────────────────────────────

/// What happened to one pedal during a sampling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PedalOutcome {
    /// Value did not differ enough from the last sent value.
    Unchanged(u8),
    /// Value was accepted by the sink and recorded.
    Sent(u8),
    /// Sink refused the value; it will be re-evaluated next pass.
    Dropped(u8, SendError),
}

/// Result of one [`poll()`](ExpressionPedals::poll).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cycle<const N: usize> {
    /// System configuration incomplete; nothing was done.
    NotReady,
    /// Sample interval has not elapsed; nothing was done.
    Waiting,
    /// A full pass ran. Outcomes are in pedal-table order.
    Ran([PedalOutcome; N]),
}

impl<const N: usize> Cycle<N> {
    /// Returns `true` if a sampling pass ran.
    pub fn ran(&self) -> bool {
        matches!(self, Cycle::Ran(_))
    }
}

// ── Dispatcher ───────────────────────────────────────────────────────────

/// Sampling pipeline for `N` expression pedals.
///
/// # Example
///
/// ```ignore
/// let mut pedals = ExpressionPedals::default_pedals();
///
/// loop {
///     let mut ctx = ExpressionContext {
///         adc: &mut adc,
///         clock: &clock,
///         system: &status,
///         sink: &mut midi_out,
///     };
///     pedals.poll(&mut ctx);
///     // ... other cooperative work ...
/// }
/// ```
pub struct ExpressionPedals<const N: usize> {
    pedals: [PedalConfig; N],
    filters: [ChangeFilter; N],
    scheduler: SampleScheduler,
    config: ExpressionConfig,
}

impl ExpressionPedals<PEDAL_COUNT> {
    /// Pipeline for [`EXPRESSION_PEDALS`] with the default config.
    pub fn default_pedals() -> Self {
        Self::build(EXPRESSION_PEDALS, ExpressionConfig::default())
    }
}

impl<const N: usize> ExpressionPedals<N> {
    /// Create a pipeline for `pedals`.
    ///
    /// All filters start [`Unset`](ChangeFilter::Unset) and the first
    /// ready `poll()` samples immediately.
    ///
    /// # Errors
    /// * [`ConfigError::InvalidCcNumber`] if a CC number is above 127
    /// * [`ConfigError::ZeroChangeThreshold`] if `change_threshold == 0`
    /// * [`ConfigError::ZeroSampleInterval`] if `sample_interval_ms == 0`
    pub fn new(pedals: [PedalConfig; N], config: ExpressionConfig) -> Result<Self, ConfigError> {
        if let Some(i) = pedals.iter().position(|p| p.cc_number > MIDI_MAX) {
            return Err(ConfigError::InvalidCcNumber(i));
        }
        if config.change_threshold == 0 {
            return Err(ConfigError::ZeroChangeThreshold);
        }
        if config.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        Ok(Self::build(pedals, config))
    }

    fn build(pedals: [PedalConfig; N], config: ExpressionConfig) -> Self {
        Self {
            pedals,
            filters: [ChangeFilter::Unset; N],
            scheduler: SampleScheduler::new(config.sample_interval_ms),
            config,
        }
    }

    /// Forget all transmitted values and re-arm the scheduler.
    ///
    /// The next ready `poll()` samples immediately and sends every pedal.
    pub fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
        self.scheduler.reset();
    }

    /// Run the pipeline if the system is ready and a sample is due.
    ///
    /// Never blocks beyond the ADC conversion timeout per pedal and never
    /// reports an error; failures are absorbed and retried next pass.
    pub fn poll<A, C, S, M>(&mut self, ctx: &mut ExpressionContext<'_, A, C, S, M>) -> Cycle<N>
    where
        A: AdcDriver,
        C: TickSource,
        S: SystemStatus,
        M: MidiSink,
    {
        if !ctx.system.config_complete() {
            return Cycle::NotReady;
        }

        if !self.scheduler.try_open(ctx.clock.now_ms()) {
            return Cycle::Waiting;
        }

        let channel = midi_channel(ctx.system.global_settings());
        let mut acquirer = SampleAcquirer::with_timeout(&mut *ctx.adc, self.config.conversion_timeout_ms);
        let mut outcomes = [PedalOutcome::Unchanged(0); N];

        for (i, outcome) in outcomes.iter_mut().enumerate() {
            let pedal = self.pedals[i];
            let raw = acquirer.read_channel(pedal.adc_channel);
            let value = to_midi_with_deadzone(raw, self.config.deadzone_counts);

            let filter = &mut self.filters[i];
            if !filter.qualifies(value, self.config.change_threshold) {
                *outcome = PedalOutcome::Unchanged(value);
                continue;
            }

            *outcome = match ctx.sink.send_cc(channel, pedal.cc_number, value) {
                Ok(()) => {
                    filter.commit(value);
                    #[cfg(feature = "defmt")]
                    defmt::trace!("Pedal {}: CC{} = {}", i, pedal.cc_number, value);
                    PedalOutcome::Sent(value)
                }
                Err(e) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("Pedal {}: dropped CC{} = {} ({})", i, pedal.cc_number, value, e);
                    PedalOutcome::Dropped(value, e)
                }
            };
        }

        Cycle::Ran(outcomes)
    }

    /// Last value successfully sent for pedal `index`.
    ///
    /// `None` if nothing has been sent since construction or the last
    /// [`reset()`](Self::reset), or if `index >= N`.
    pub fn last_sent(&self, index: usize) -> Option<u8> {
        self.filters.get(index).and_then(ChangeFilter::last_sent)
    }

    /// Tick at which the next sampling pass becomes due.
    pub fn next_sample_tick(&self) -> u64 {
        self.scheduler.next_sample_tick()
    }

    /// The pedal table.
    pub fn pedals(&self) -> &[PedalConfig; N] {
        &self.pedals
    }

    /// The active tuning values.
    pub fn config(&self) -> &ExpressionConfig {
        &self.config
    }
}
