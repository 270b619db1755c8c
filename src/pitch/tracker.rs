use crate::config::TrackerConfig;
use crate::mpm::{MpmPitchDetector, MpmPitchResult, DEFAULT_DOUBLE_PERIOD_TOLERANCE};

/// Estimates the fundamental frequency of every analysis frame.
///
/// Returns one entry per window of `config.window_size` samples, spaced
/// `config.hop_size` samples apart. Unvoiced frames are `None`. Input shorter
/// than a window is zero padded to one window.
pub fn track_frames(samples: &[f32], sample_rate: f32, config: &TrackerConfig) -> Vec<Option<f32>> {
    let mut detector = MpmPitchDetector::from_options(
        sample_rate,
        config.window_size,
        config.hop_size,
        config.lag_count(),
        1,
    );

    let mut frames = Vec::with_capacity(samples.len() / config.hop_size + 1);
    let mut handle_result = |result: &MpmPitchResult| frames.push(voiced_frequency(result, config));

    detector.process(samples, &mut handle_result);
    if samples.len() < config.window_size {
        let padding = vec![0.0; config.window_size - samples.len()];
        detector.process(&padding, &mut handle_result);
    }

    frames
}

fn voiced_frequency(result: &MpmPitchResult, config: &TrackerConfig) -> Option<f32> {
    let is_voiced = result.is_tone_with_options(config.clarity_threshold, DEFAULT_DOUBLE_PERIOD_TOLERANCE)
        && result.frequency >= config.min_frequency
        && result.frequency <= config.max_frequency;
    if is_voiced {
        Some(result.frequency)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frequency: f32, sample_rate: f32, sample_count: usize) -> Vec<f32> {
        (0..sample_count)
            .map(|i| 0.5 * (2.0 * core::f32::consts::PI * frequency * (i as f32) / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_steady_tone() {
        let config = TrackerConfig::default();
        let frames = track_frames(&sine(220.0, 44100.0, 44100), 44100.0, &config);
        assert_eq!(frames.len(), 1 + (44100 - 2048) / 512);
        for frame in frames.iter() {
            let frequency = frame.expect("every frame of a steady tone is voiced");
            assert!((frequency - 220.0).abs() < 0.5);
        }
    }

    #[test]
    fn test_silence_is_unvoiced() {
        let frames = track_frames(&vec![0.0; 8192], 44100.0, &TrackerConfig::default());
        assert!(!frames.is_empty());
        assert!(frames.iter().all(|frame| frame.is_none()));
    }

    #[test]
    fn test_out_of_range_is_unvoiced() {
        let config = TrackerConfig {
            min_frequency: 300.0,
            ..TrackerConfig::default()
        };
        let frames = track_frames(&sine(220.0, 44100.0, 8192), 44100.0, &config);
        assert!(frames.iter().all(|frame| frame.is_none()));
    }

    #[test]
    fn test_short_input_is_padded() {
        let frames = track_frames(&sine(440.0, 44100.0, 1500), 44100.0, &TrackerConfig::default());
        assert_eq!(frames.len(), 1);
    }
}
