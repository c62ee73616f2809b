//! Raw ADC sample → 7-bit MIDI value conversion.

/// Largest value a 12-bit conversion can produce.
pub const ADC_MAX: u16 = 4095;

/// Largest 7-bit MIDI data value.
pub const MIDI_MAX: u8 = 127;

/// Samples at or below this count read as exactly zero.
///
/// Expression pedals rarely rest at a clean 0; the wiper sits a few counts
/// above ground and wanders.
pub const DEADZONE_COUNTS: u16 = 8;

/// Convert a raw sample to a MIDI value using the default deadzone.
///
/// # Examples
///
/// ```
/// use spirant_expression::to_midi;
///
/// assert_eq!(to_midi(0), 0);
/// assert_eq!(to_midi(2048), 64);
/// assert_eq!(to_midi(4095), 127);
/// ```
pub fn to_midi(raw: u16) -> u8 {
    to_midi_with_deadzone(raw, DEADZONE_COUNTS)
}

/// Convert a raw sample to a MIDI value, treating `raw <= deadzone` as 0.
///
/// Input above [`ADC_MAX`] is clamped. Scaling rounds to nearest:
/// `(raw * 127 + 2047) / 4095`.
pub fn to_midi_with_deadzone(raw: u16, deadzone: u16) -> u8 {
    let sample = if raw <= deadzone { 0 } else { raw.min(ADC_MAX) };

    let max = ADC_MAX as u32;
    let scaled = (sample as u32 * MIDI_MAX as u32 + max / 2) / max;
    scaled.min(MIDI_MAX as u32) as u8
}
