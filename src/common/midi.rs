use micromath::F32Ext;

/// Converts a frequency in Hz to a [MIDI](https://en.wikipedia.org/wiki/MIDI) note number (with a fractional part).
pub fn freq_to_midi_note(freq: f32) -> f32 {
    12.0 * F32Ext::log2(freq) - 36.376316562295926
}

/// Converts a frequency in Hz to the nearest MIDI key number, clamped to 0..=127.
pub fn freq_to_midi_key(freq: f32) -> u8 {
    let note = freq_to_midi_note(freq).round();
    if note.is_nan() || note < 0.0 {
        0
    } else if note > 127.0 {
        127
    } else {
        note as u8
    }
}

/// A note name with octave, e.g `A4` or `C#3`, for a MIDI key number.
pub fn midi_key_name(key: u8) -> String {
    const NOTE_NAMES: [&str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];
    let octave = (key / 12) as i32 - 1;
    format!("{}{}", NOTE_NAMES[(key % 12) as usize], octave)
}
