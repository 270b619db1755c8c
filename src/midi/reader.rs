use std::path::Path;

use midly::{MidiMessage, Smf, TrackEventKind};

use crate::error::{HumError, Result};

/// Reads a Standard MIDI File and returns the key numbers of its sounding
/// note-on events in playback order. See [note_on_keys].
pub fn read_note_on_keys(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|e| HumError::source_read(path, e))?;
    note_on_keys(&bytes).map_err(|e| HumError::source_read(path, e))
}

/// Extracts the key numbers of all note-on events with a nonzero velocity.
///
/// Events from all tracks are merged by absolute tick. Events at the same
/// tick keep their track order, then their order within the track.
/// A note-on with velocity 0 is a note-off and is skipped.
pub fn note_on_keys(bytes: &[u8]) -> core::result::Result<Vec<u8>, midly::Error> {
    let smf = Smf::parse(bytes)?;

    // (absolute tick, key). Tracks are visited in order and the sort below
    // is stable, which gives the tie ordering described above.
    let mut note_ons: Vec<(u64, u8)> = Vec::new();
    for track in smf.tracks.iter() {
        let mut tick: u64 = 0;
        for event in track.iter() {
            tick += event.delta.as_int() as u64;
            if let TrackEventKind::Midi {
                message: MidiMessage::NoteOn { key, vel },
                ..
            } = &event.kind
            {
                if vel.as_int() > 0 {
                    note_ons.push((tick, key.as_int()));
                }
            }
        }
    }
    note_ons.sort_by_key(|(tick, _)| *tick);

    Ok(note_ons.into_iter().map(|(_, key)| key).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use midly::num::{u15, u28, u4, u7};
    use midly::{Format, Header, Timing, Track, TrackEvent};

    fn note_event(delta: u32, key: u8, vel: u8) -> TrackEvent<'static> {
        TrackEvent {
            delta: u28::new(delta),
            kind: TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::NoteOn {
                    key: u7::new(key),
                    vel: u7::new(vel),
                },
            },
        }
    }

    fn end_of_track() -> TrackEvent<'static> {
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(midly::MetaMessage::EndOfTrack),
        }
    }

    fn to_bytes(format: Format, tracks: Vec<Track<'static>>) -> Vec<u8> {
        let mut smf = Smf::new(Header::new(format, Timing::Metrical(u15::new(480))));
        smf.tracks = tracks;
        let mut bytes = Vec::new();
        smf.write(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_skips_zero_velocity() {
        let track = vec![
            note_event(0, 60, 100),
            note_event(480, 60, 0),
            note_event(0, 64, 90),
            note_event(480, 64, 0),
            note_event(0, 64, 90),
            end_of_track(),
        ];
        let bytes = to_bytes(Format::SingleTrack, vec![track]);
        assert_eq!(note_on_keys(&bytes).unwrap(), vec![60, 64, 64]);
    }

    #[test]
    fn test_merges_tracks_by_time() {
        let melody = vec![note_event(0, 60, 100), note_event(960, 67, 100), end_of_track()];
        let bass = vec![note_event(480, 48, 100), note_event(480, 43, 100), end_of_track()];
        let bytes = to_bytes(Format::Parallel, vec![melody, bass]);
        // Ticks: 60 @ 0, 48 @ 480, 67 @ 960 (melody first), 43 @ 960
        assert_eq!(note_on_keys(&bytes).unwrap(), vec![60, 48, 67, 43]);
    }

    #[test]
    fn test_invalid_file() {
        assert!(note_on_keys(b"definitely not a midi file").is_err());
    }

    #[test]
    fn test_missing_file() {
        match read_note_on_keys(Path::new("/nonexistent/melody.mid")) {
            Err(HumError::SourceReadError { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/melody.mid"))
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
