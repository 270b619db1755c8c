use std::path::Path;

use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};

use crate::common::freq_to_midi_key;
use crate::error::{HumError, Result};

/// Ticks per quarter note in debug MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// 120 BPM.
const TEMPO_MICROSECONDS_PER_QUARTER: u32 = 500_000;

const NOTE_VELOCITY: u8 = 100;

/// Ticks between the starts of consecutive notes, 0.5 s at 120 BPM.
pub const NOTE_SPACING_TICKS: u32 = 480;

/// Length of each note, 0.4 s at 120 BPM.
pub const NOTE_DURATION_TICKS: u32 = 384;

/// Writes grouped note frequencies as an evenly spaced single track melody,
/// one note every 0.5 s, each lasting 0.4 s.
pub fn write_debug_midi(frequencies: &[f32], path: &Path) -> Result<()> {
    let keys: Vec<u8> = frequencies.iter().map(|f| freq_to_midi_key(*f)).collect();
    let smf = notes_to_smf(&keys);
    let mut bytes = Vec::new();
    smf.write(&mut bytes)
        .map_err(|e| HumError::source_read(path, e))?;
    std::fs::write(path, &bytes).map_err(|e| HumError::source_read(path, e))?;
    log::debug!("wrote {} notes to {}", keys.len(), path.display());
    Ok(())
}

/// Builds an in-memory single track SMF playing `keys` in order.
pub fn notes_to_smf(keys: &[u8]) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    let channel = u4::new(0);
    let mut track: Track<'static> = Vec::with_capacity(2 * keys.len() + 2);
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(TEMPO_MICROSECONDS_PER_QUARTER))),
    });

    for (i, key) in keys.iter().enumerate() {
        let rest = if i == 0 {
            0
        } else {
            NOTE_SPACING_TICKS - NOTE_DURATION_TICKS
        };
        track.push(TrackEvent {
            delta: u28::new(rest),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key: u7::new(*key),
                    vel: u7::new(NOTE_VELOCITY),
                },
            },
        });
        track.push(TrackEvent {
            delta: u28::new(NOTE_DURATION_TICKS),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key: u7::new(*key),
                    vel: u7::new(0),
                },
            },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);
    smf
}
