//! Standard MIDI File input and output.
//!
//! Reference melodies are read as the sequence of their note-on key numbers.
//! Notes grouped from a hummed query can be written back to a MIDI file
//! for listening and debugging.

mod reader;
mod writer;

pub use reader::{note_on_keys, read_note_on_keys};
pub use writer::{notes_to_smf, write_debug_midi, NOTE_DURATION_TICKS, NOTE_SPACING_TICKS};
