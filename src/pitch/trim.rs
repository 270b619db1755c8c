//! Leading and trailing silence removal.

use micromath::F32Ext;

use crate::common::F32ArrayExt;

/// Analysis frame size for silence detection.
pub const TRIM_FRAME_SIZE: usize = 2048;

/// Distance between consecutive silence detection frames.
pub const TRIM_HOP_SIZE: usize = 512;

/// Removes leading and trailing frames whose RMS level is more than `top_db`
/// below the loudest frame.
///
/// Frames are centered on multiples of `hop_size` and truncated at the edges
/// of the signal. The returned slice starts at the first non-silent frame
/// center and ends one hop past the last one. An all-zero input trims to
/// an empty slice.
pub fn trim_silence(samples: &[f32], frame_size: usize, hop_size: usize, top_db: f32) -> &[f32] {
    if samples.is_empty() {
        return samples;
    }

    let half_frame = frame_size / 2;
    let frame_count = 1 + samples.len() / hop_size;
    let levels: Vec<f32> = (0..frame_count)
        .map(|i| {
            let center = i * hop_size;
            let start = center.saturating_sub(half_frame);
            let end = (center + half_frame).min(samples.len());
            if start >= end {
                0.0
            } else {
                samples[start..end].rms_level()
            }
        })
        .collect();

    let max_level = levels.iter().fold(0.0_f32, |max, level| max.max(*level));
    if max_level <= 0.0 {
        return &samples[..0];
    }

    // Compare linear levels to avoid taking the log of silent frames.
    let threshold = max_level * F32Ext::powf(10.0, -top_db / 20.0);
    let is_loud = |level: &f32| *level > threshold;
    let first = levels.iter().position(is_loud).unwrap_or(0);
    let last = levels.iter().rposition(is_loud).unwrap_or(frame_count - 1);

    let start = (first * hop_size).min(samples.len());
    let end = ((last + 1) * hop_size).min(samples.len());
    &samples[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency: f32, sample_rate: f32, sample_count: usize) -> Vec<f32> {
        (0..sample_count)
            .map(|i| (2.0 * core::f32::consts::PI * frequency * (i as f32) / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_trims_surrounding_silence() {
        let mut signal = vec![0.0_f32; 8192];
        signal.extend(sine(440.0, 44100.0, 8192));
        signal.extend(vec![0.0_f32; 8192]);

        let trimmed = trim_silence(&signal, TRIM_FRAME_SIZE, TRIM_HOP_SIZE, 20.0);
        // Frames overlapping the tone by a fair amount are kept, so the
        // result is slightly longer than the tone.
        assert!(trimmed.len() >= 8192 - TRIM_HOP_SIZE);
        assert!(trimmed.len() <= 8192 + 2 * TRIM_FRAME_SIZE);
        assert!(trimmed.peak_level() > 0.99);
    }

    #[test]
    fn test_keeps_quiet_passages_inside() {
        let mut signal = sine(440.0, 44100.0, 8192);
        signal.extend(vec![0.0_f32; 8192]);
        signal.extend(sine(440.0, 44100.0, 8192));
        let trimmed = trim_silence(&signal, TRIM_FRAME_SIZE, TRIM_HOP_SIZE, 20.0);
        assert_eq!(trimmed.len(), signal.len());
    }

    #[test]
    fn test_silence_trims_to_nothing() {
        let silence = vec![0.0_f32; 4096];
        assert!(trim_silence(&silence, TRIM_FRAME_SIZE, TRIM_HOP_SIZE, 20.0).is_empty());
        assert!(trim_silence(&[], TRIM_FRAME_SIZE, TRIM_HOP_SIZE, 20.0).is_empty());
    }

    #[test]
    fn test_short_input() {
        let signal = sine(440.0, 44100.0, 300);
        assert_eq!(trim_silence(&signal, TRIM_FRAME_SIZE, TRIM_HOP_SIZE, 20.0).len(), 300);
    }
}
