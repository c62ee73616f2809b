//! Embassy integration.
//!
//! Provides an [`embassy_time`] backed [`TickSource`], a [`MidiSink`] for
//! [`embassy_sync`] channel senders, and [`expression_update_task`], a
//! sampling loop that sleeps until the next pass is due instead of being
//! called from a busy main loop.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Instant, Timer};

use crate::adc::AdcDriver;
use crate::error::SendError;
use crate::midi::{CcMessage, MidiSink};
use crate::pedals::{Cycle, ExpressionContext, ExpressionPedals};
use crate::scheduler::TickSource;
use crate::settings::SystemStatus;

/// [`TickSource`] reading the Embassy time driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl TickSource for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// A full channel is reported as [`SendError::BuffersFull`]; the MIDI
/// transport task owns the receiving end.
impl<'ch, M, const N: usize> MidiSink for Sender<'ch, M, CcMessage, N>
where
    M: RawMutex,
{
    fn send_cc(&mut self, channel: u8, cc_number: u8, value: u8) -> Result<(), SendError> {
        self.try_send(CcMessage {
            channel,
            cc_number,
            value,
        })
        .map_err(|_| SendError::BuffersFull)
    }
}

/// Periodic expression pedal loop.
///
/// This is a regular `async fn`, **not** an Embassy `#[task]`. Callers
/// wrap it in a concrete task, since Embassy tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn pedal_task(
///     adc: MyAdc,
///     status: &'static FirmwareStatus,
///     midi_out: Sender<'static, CriticalSectionRawMutex, CcMessage, 16>,
/// ) {
///     let pedals = ExpressionPedals::default_pedals();
///     expression_update_task(pedals, adc, status, midi_out).await;
/// }
/// ```
///
/// # Control flow
///
/// 1. Sleep until the scheduler's next sample tick.
/// 2. Run one [`poll()`](ExpressionPedals::poll).
/// 3. If the system is not ready yet, back off for one sample interval
///    before checking again.
pub async fn expression_update_task<A, S, M, const N: usize>(
    mut pedals: ExpressionPedals<N>,
    mut adc: A,
    system: &S,
    mut sink: M,
) -> !
where
    A: AdcDriver,
    S: SystemStatus,
    M: MidiSink,
{
    #[cfg(feature = "defmt")]
    defmt::info!("Expression pedal task started ({} pedals)", N);

    let retry = Duration::from_millis(pedals.config().sample_interval_ms);
    let clock = EmbassyClock;

    loop {
        Timer::at(Instant::from_millis(pedals.next_sample_tick())).await;

        let mut ctx = ExpressionContext {
            adc: &mut adc,
            clock: &clock,
            system,
            sink: &mut sink,
        };

        if let Cycle::NotReady = pedals.poll(&mut ctx) {
            Timer::after(retry).await;
        }
    }
}
