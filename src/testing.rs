//! Host-side fakes shared by the unit tests.

use std::cell::Cell;
use std::collections::VecDeque;
use std::vec::Vec;

use crate::adc::AdcDriver;
use crate::error::SendError;
use crate::midi::MidiSink;
use crate::scheduler::TickSource;
use crate::settings::SystemStatus;

/// One recorded driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcCall {
    Configure(u8),
    Start,
    Poll(u32),
    Read,
    Stop,
}

/// Driver step that should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Configure,
    Start,
    Poll,
}

/// Scripted ADC.
///
/// Each channel plays back its samples in order and then repeats the last
/// one. Channels without a script read 0.
#[derive(Default)]
pub struct FakeAdc {
    pub calls: Vec<AdcCall>,
    pub fault: Option<Fault>,
    scripts: Vec<(u8, VecDeque<u16>)>,
    fallback: VecDeque<u16>,
    selected: Option<u8>,
}

impl FakeAdc {
    /// ADC that returns `samples` on every channel.
    pub fn with_samples(samples: &[u16]) -> Self {
        Self {
            fallback: samples.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn set_samples(&mut self, channel: u8, samples: &[u16]) {
        self.scripts.retain(|(ch, _)| *ch != channel);
        self.scripts.push((channel, samples.iter().copied().collect()));
    }

    pub fn stops(&self) -> usize {
        self.calls.iter().filter(|c| **c == AdcCall::Stop).count()
    }

    fn next_sample(&mut self) -> u16 {
        let selected = self.selected;
        let script = self
            .scripts
            .iter_mut()
            .find(|(ch, _)| Some(*ch) == selected)
            .map(|(_, s)| s)
            .unwrap_or(&mut self.fallback);

        if script.len() > 1 {
            script.pop_front().unwrap_or(0)
        } else {
            script.front().copied().unwrap_or(0)
        }
    }

    fn check(&self, step: Fault) -> Result<(), ()> {
        if self.fault == Some(step) {
            Err(())
        } else {
            Ok(())
        }
    }
}

impl AdcDriver for FakeAdc {
    type Error = ();

    fn configure_channel(&mut self, channel: u8) -> Result<(), ()> {
        self.calls.push(AdcCall::Configure(channel));
        self.check(Fault::Configure)?;
        self.selected = Some(channel);
        Ok(())
    }

    fn start(&mut self) -> Result<(), ()> {
        self.calls.push(AdcCall::Start);
        self.check(Fault::Start)
    }

    fn poll_for_conversion(&mut self, timeout_ms: u32) -> Result<(), ()> {
        self.calls.push(AdcCall::Poll(timeout_ms));
        self.check(Fault::Poll)?;
        Ok(())
    }

    fn read_value(&mut self) -> u16 {
        self.calls.push(AdcCall::Read);
        self.next_sample()
    }

    fn stop(&mut self) {
        self.calls.push(AdcCall::Stop);
    }
}

/// Clock the test moves by hand.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn set(&self, now: u64) {
        self.now.set(now);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl TickSource for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

pub struct FixedStatus {
    pub ready: bool,
    pub settings: Option<Vec<u8>>,
}

impl FixedStatus {
    pub fn ready(settings: &[u8]) -> Self {
        Self {
            ready: true,
            settings: Some(settings.to_vec()),
        }
    }

    pub fn ready_without_settings() -> Self {
        Self {
            ready: true,
            settings: None,
        }
    }

    pub fn not_ready() -> Self {
        Self {
            ready: false,
            settings: None,
        }
    }
}

impl SystemStatus for FixedStatus {
    fn config_complete(&self) -> bool {
        self.ready
    }

    fn global_settings(&self) -> Option<&[u8]> {
        self.settings.as_deref()
    }
}

/// Records accepted messages as `(channel, cc, value)`.
#[derive(Default)]
pub struct FakeSink {
    pub sent: Vec<(u8, u8, u8)>,
    refusals: VecDeque<SendError>,
}

impl FakeSink {
    /// Refuse the next `send_cc` with `error`.
    pub fn refuse_next(&mut self, error: SendError) {
        self.refusals.push_back(error);
    }
}

impl MidiSink for FakeSink {
    fn send_cc(&mut self, channel: u8, cc_number: u8, value: u8) -> Result<(), SendError> {
        if let Some(error) = self.refusals.pop_front() {
            return Err(error);
        }
        self.sent.push((channel, cc_number, value));
        Ok(())
    }
}
