//! Turns a recorded query into a contour.

use std::path::{Path, PathBuf};

use crate::audio::read_wav;
use crate::common::{freq_to_midi_key, midi_key_name};
use crate::contour::{Contour, ThresholdEncoder};
use crate::error::Result;
use crate::midi::write_debug_midi;
use crate::pitch::{MpmNoteExtractor, NoteExtractor};

/// Decodes a query recording, extracts its notes and encodes them as a contour.
pub struct QueryPipeline<E: NoteExtractor = MpmNoteExtractor> {
    extractor: E,
    encoder: ThresholdEncoder,
    debug_midi_path: Option<PathBuf>,
}

impl<E: NoteExtractor> QueryPipeline<E> {
    pub fn new(extractor: E, encoder: ThresholdEncoder) -> Self {
        QueryPipeline {
            extractor,
            encoder,
            debug_midi_path: None,
        }
    }

    /// Also write the extracted notes of each query to a MIDI file at `path`.
    pub fn with_debug_midi(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_midi_path = Some(path.into());
        self
    }

    /// Processes the WAV file at `path`.
    pub fn process_file(&mut self, path: &Path) -> Result<Contour> {
        let (sample_rate, samples) = read_wav(path)?;
        self.process_samples(&samples, sample_rate as f32)
    }

    /// Processes mono samples.
    pub fn process_samples(&mut self, samples: &[f32], sample_rate: f32) -> Result<Contour> {
        let notes = self.extractor.extract(samples, sample_rate);
        log::debug!(
            "query notes: {}",
            notes
                .iter()
                .map(|f| midi_key_name(freq_to_midi_key(*f)))
                .collect::<Vec<_>>()
                .join(" ")
        );
        if notes.len() < 2 {
            log::warn!(
                "only {} note(s) found in the query, its contour carries no melody",
                notes.len()
            );
        }

        if let Some(path) = &self.debug_midi_path {
            write_debug_midi(&notes, path)?;
            log::info!("query notes written to {}", path.display());
        }

        let contour = self.encoder.encode(&notes)?;
        log::debug!("query contour {}", contour);
        Ok(contour)
    }
}
