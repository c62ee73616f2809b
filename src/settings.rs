//! Read-only view of the firmware's system state.

/// Index of the MIDI channel byte in the global settings block.
pub const GLOBAL_SETTINGS_CHANNEL: usize = 0;

/// MIDI channel used when the settings block is not available.
pub const DEFAULT_MIDI_CHANNEL: u8 = 0;

/// System state owned by the surrounding firmware.
///
/// Both values are only read, never written, by the expression pipeline.
pub trait SystemStatus {
    /// `true` once startup configuration has finished and it is safe to
    /// emit MIDI.
    fn config_complete(&self) -> bool;

    /// The global settings block, or `None` if it has not been loaded.
    fn global_settings(&self) -> Option<&[u8]>;
}

impl<T> SystemStatus for &T
where
    T: SystemStatus + ?Sized,
{
    fn config_complete(&self) -> bool {
        (**self).config_complete()
    }

    fn global_settings(&self) -> Option<&[u8]> {
        (**self).global_settings()
    }
}

/// Active MIDI channel (0–15) from the settings block.
///
/// Only the low nibble of the stored byte is significant. A missing or
/// truncated block yields [`DEFAULT_MIDI_CHANNEL`].
pub fn midi_channel(settings: Option<&[u8]>) -> u8 {
    settings
        .and_then(|block| block.get(GLOBAL_SETTINGS_CHANNEL))
        .map_or(DEFAULT_MIDI_CHANNEL, |byte| byte & 0x0F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_settings_default_to_channel_zero() {
        assert_eq!(midi_channel(None), 0);
    }

    #[test]
    fn empty_settings_default_to_channel_zero() {
        assert_eq!(midi_channel(Some(&[])), 0);
    }

    #[test]
    fn channel_is_masked_to_low_nibble() {
        assert_eq!(midi_channel(Some(&[0x05])), 5);
        assert_eq!(midi_channel(Some(&[0x0F])), 15);
        assert_eq!(midi_channel(Some(&[0xF3, 0xFF])), 3);
        assert_eq!(midi_channel(Some(&[0x10])), 0);
    }
}
