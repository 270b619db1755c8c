//! Turns a recording of a hummed or sung melody into a sequence of notes.
//!
//! The default [MpmNoteExtractor] trims silence, tracks the fundamental
//! frequency of each frame with the [MPM](crate::mpm) detector, smooths the
//! frame track with a median filter and groups stable runs of frames into
//! notes.

mod grouping;
mod smoothing;
mod tracker;
mod trim;

pub use grouping::group_notes;
pub use smoothing::median_filter;
pub use tracker::track_frames;
pub use trim::{trim_silence, TRIM_FRAME_SIZE, TRIM_HOP_SIZE};

use crate::config::{GroupingConfig, TrackerConfig};
use crate::error::Result;

/// Produces an ordered sequence of note frequencies, in Hz, from a mono recording.
pub trait NoteExtractor {
    fn extract(&mut self, samples: &[f32], sample_rate: f32) -> Vec<f32>;
}

/// Note extraction based on MPM pitch tracking.
#[derive(Debug, Clone, Default)]
pub struct MpmNoteExtractor {
    tracker: TrackerConfig,
    grouping: GroupingConfig,
}

impl MpmNoteExtractor {
    /// Creates an extractor, failing with `InvalidConfig` if either configuration is out of range.
    pub fn new(tracker: TrackerConfig, grouping: GroupingConfig) -> Result<Self> {
        tracker.validate()?;
        grouping.validate()?;
        Ok(MpmNoteExtractor { tracker, grouping })
    }

    pub fn tracker_config(&self) -> &TrackerConfig {
        &self.tracker
    }

    pub fn grouping_config(&self) -> &GroupingConfig {
        &self.grouping
    }
}

impl NoteExtractor for MpmNoteExtractor {
    fn extract(&mut self, samples: &[f32], sample_rate: f32) -> Vec<f32> {
        let trimmed = trim_silence(samples, TRIM_FRAME_SIZE, TRIM_HOP_SIZE, self.tracker.trim_top_db);
        log::debug!(
            "trimmed {} of {} samples of silence",
            samples.len() - trimmed.len(),
            samples.len()
        );
        if trimmed.is_empty() {
            return Vec::new();
        }

        let frames = track_frames(trimmed, sample_rate, &self.tracker);
        let voiced_count = frames.iter().filter(|frame| frame.is_some()).count();
        log::debug!("{} of {} frames voiced", voiced_count, frames.len());

        let smoothed = median_filter(&frames, self.grouping.median_filter_size);
        let notes = group_notes(&smoothed, self.grouping.threshold_cents);
        log::debug!("grouped frames into {} notes", notes.len());
        notes
    }
}
