use crate::common::{freq_to_midi_note, Autocorrelation};
use crate::mpm::key_maximum::KeyMaximum;
use crate::mpm::util::{m_prime_incremental, validate_window_size_lag_count};

/// The maximum number of key maxima to gather during the peak picking phase.
pub const MAX_KEY_MAXIMA_COUNT: usize = 16;

/// The clarity threshold used by [MpmPitchResult::is_tone].
pub const DEFAULT_CLARITY_THRESHOLD: f32 = 0.8;

/// How much lower than `clarity` the NSDF at twice the pitch period may be
/// for [MpmPitchResult::is_tone] to still consider the window a tone.
pub const DEFAULT_DOUBLE_PERIOD_TOLERANCE: f32 = 0.2;

/// Selects the first key maximum within this fraction of the largest one, the constant k in the paper.
const KEY_MAXIMUM_SELECTION_THRESHOLD: f32 = 0.9;

/// A pitch detection result. Holds the analyzed window and all intermediate
/// buffers, so computing a new result does not allocate.
pub struct MpmPitchResult {
    /// The estimated pitch frequency in Hz.
    pub frequency: f32,
    /// The value of the NSDF at the maximum corresponding to the pitch period.
    /// Between 0 and 1 (inclusive). Values close to 1 indicate pure tones and values
    /// close to 0 indicate lack of a discernable pitch.
    pub clarity: f32,
    /// The value of the NSDF at twice the pitch period. None if that lag
    /// exceeds the maximum lag.
    pub clarity_at_double_period: Option<f32>,
    /// The MIDI note number, with a fractional part, corresponding to the pitch frequency.
    pub midi_note_number: f32,
    /// The estimated pitch period in samples.
    pub pitch_period: f32,
    /// The analyzed window.
    pub window: Box<[f32]>,
    /// The normalized square difference function
    pub nsdf: Box<[f32]>,
    key_maxima: Vec<KeyMaximum>,
    selected_key_max_index: usize,
    autocorr: Autocorrelation,
}

impl MpmPitchResult {
    pub fn new(window_size: usize, lag_count: usize) -> Self {
        validate_window_size_lag_count(window_size, lag_count);
        MpmPitchResult {
            frequency: 0.0,
            clarity: 0.0,
            clarity_at_double_period: None,
            midi_note_number: 0.0,
            pitch_period: 0.0,
            window: vec![0.0; window_size].into_boxed_slice(),
            nsdf: vec![0.0; lag_count].into_boxed_slice(),
            key_maxima: Vec::with_capacity(MAX_KEY_MAXIMA_COUNT),
            selected_key_max_index: 0,
            autocorr: Autocorrelation::new(window_size, lag_count),
        }
    }

    /// Performs pitch detection on the current contents of `window`.
    pub fn compute(&mut self, sample_rate: f32) {
        self.reset();
        self.compute_nsdf();
        self.perform_peak_picking();
        self.compute_pitch(sample_rate);
    }

    /// Indicates if the detection result has a pitch estimate at all.
    pub fn is_valid(&self) -> bool {
        !self.key_maxima.is_empty()
    }

    /// Indicates if the analyzed window is a tone, i.e has a strong fundamental frequency.
    /// See [is_tone_with_options](Self::is_tone_with_options).
    pub fn is_tone(&self) -> bool {
        self.is_tone_with_options(DEFAULT_CLARITY_THRESHOLD, DEFAULT_DOUBLE_PERIOD_TOLERANCE)
    }

    /// Noisy input may produce a single large NSDF peak. A real tone also has a
    /// high NSDF value at twice the pitch period, so both are checked.
    pub fn is_tone_with_options(&self, clarity_threshold: f32, double_period_tolerance: f32) -> bool {
        if !self.is_valid() || self.clarity < clarity_threshold {
            return false;
        }
        match self.clarity_at_double_period {
            Some(clarity_at_double_period) => {
                clarity_at_double_period >= self.clarity - double_period_tolerance
            }
            None => true,
        }
    }

    /// The key maxima found during peak picking, in lag order.
    pub fn key_maxima(&self) -> &[KeyMaximum] {
        &self.key_maxima
    }

    /// The key maximum assumed to correspond to the pitch period.
    pub fn selected_key_maximum(&self) -> Option<&KeyMaximum> {
        self.key_maxima.get(self.selected_key_max_index)
    }

    fn reset(&mut self) {
        self.clarity_at_double_period = None;
        self.frequency = 0.0;
        self.clarity = 0.0;
        self.midi_note_number = 0.0;
        self.key_maxima.clear();
        self.selected_key_max_index = 0;
        self.pitch_period = 0.0;
    }

    /// Computes the normalized square difference function from the current contents of `window`.
    fn compute_nsdf(&mut self) {
        let r_prime = self.autocorr.compute(&self.window);

        // Compute m' and store it in the nsdf buffer
        m_prime_incremental(&self.window, r_prime[0], &mut self.nsdf);

        // NSDF = 2 * r' / m'
        for (value, r) in self.nsdf.iter_mut().zip(r_prime.iter()) {
            let denominator = *value;
            *value = if denominator.abs() <= f32::EPSILON {
                0.0
            } else {
                2.0 * r / denominator
            };
        }
    }

    fn perform_peak_picking(&mut self) {
        let nsdf = &self.nsdf[..];
        let key_maxima = &mut self.key_maxima;

        // Step 1: gather key maxima, one per positive region of the NSDF
        // excluding the one starting at lag 0.
        let mut is_detecting = false;
        let mut maximum_value: f32 = 0.0;
        let mut maximum_index: usize = 0;
        for i in 1..nsdf.len() {
            let is_last_lag = i == nsdf.len() - 1;
            let prev = nsdf[i - 1];
            let curr = nsdf[i];
            if prev <= 0.0 && curr > 0.0 {
                // Positive zero crossing, start looking for a key maximum.
                is_detecting = true;
                maximum_value = curr;
                maximum_index = i;
            } else if prev >= 0.0 && curr < 0.0 {
                // Negative zero crossing, store the key maximum we've got.
                if is_detecting && key_maxima.len() < MAX_KEY_MAXIMA_COUNT {
                    key_maxima.push(KeyMaximum::at(nsdf, maximum_index));
                }
                is_detecting = false;
            }

            if is_detecting {
                if is_last_lag {
                    // Reached the last lag while looking for a new max.
                    if key_maxima.len() < MAX_KEY_MAXIMA_COUNT {
                        let last_max_index = if curr > maximum_value { i } else { maximum_index };
                        key_maxima.push(KeyMaximum::at(nsdf, last_max_index));
                    }
                } else if curr > maximum_value {
                    maximum_value = curr;
                    maximum_index = i;
                }
            }
        }

        if key_maxima.is_empty() {
            return;
        }

        // Step 2: find the largest key maximum
        let largest_key_maximum = key_maxima
            .iter()
            .map(|key_max| key_max.value_at_lag_index)
            .fold(f32::MIN, f32::max);

        // Step 3: select the first key maximum close enough to the largest one
        let threshold = KEY_MAXIMUM_SELECTION_THRESHOLD * largest_key_maximum;
        self.selected_key_max_index = key_maxima
            .iter()
            .position(|key_max| key_max.value >= threshold)
            .unwrap_or(0);

        // Clarity, i.e the NSDF value, at twice the pitch period.
        let double_period_lag_index = 2 * key_maxima[self.selected_key_max_index].lag_index;
        if double_period_lag_index < nsdf.len() {
            self.clarity_at_double_period = Some(nsdf[double_period_lag_index])
        }
    }

    /// Computes pitch parameters from the currently selected key maximum.
    fn compute_pitch(&mut self, sample_rate: f32) {
        if let Some(selected_max) = self.selected_key_maximum().copied() {
            self.pitch_period = selected_max.lag;
            self.clarity = selected_max.value.min(1.0);
            self.frequency = sample_rate / self.pitch_period;
            self.midi_note_number = freq_to_midi_note(self.frequency);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_sine(result: &mut MpmPitchResult, frequency: f32, sample_rate: f32) {
        for (i, value) in result.window.iter_mut().enumerate() {
            *value = (2.0 * core::f32::consts::PI * frequency * (i as f32) / sample_rate).sin();
        }
    }

    #[test]
    fn test_silence() {
        let sample_rate = 44100.0;
        let window_size = 1024;

        let mut result = MpmPitchResult::new(window_size, window_size / 2);
        result.compute(sample_rate);
        assert_eq!(result.nsdf[0], 0.);
        assert!(!result.is_valid());
        assert!(!result.is_tone());
        assert_eq!(result.frequency, 0.0);
    }

    #[test]
    fn test_sine() {
        let sample_rate = 44100.0;
        let frequency = 440.0;
        let mut result = MpmPitchResult::new(512, 256);
        fill_sine(&mut result, frequency, sample_rate);
        result.compute(sample_rate);
        assert!((frequency - result.frequency).abs() <= 0.05);
        assert!((result.midi_note_number - 69.0).abs() <= 0.01);
        assert!(result.clarity > 0.95);
        assert!(result.is_tone());
    }

    #[test]
    fn test_low_sine() {
        // Tests the case when the expected pitch period > 0.5 * lag_count and < lag_count
        for f in [154.0_f32, 190.0_f32].iter() {
            let window_size = 1024;
            let lag_count = window_size / 2;
            let sample_rate: f32 = 44100.0;
            let expected_pitch_period = sample_rate / f;

            // Verify pre-condition
            assert!(expected_pitch_period < (lag_count as f32));

            let mut result = MpmPitchResult::new(window_size, lag_count);
            fill_sine(&mut result, *f, sample_rate);
            result.compute(sample_rate);

            assert!((f - result.frequency).abs() <= 0.01, "Wrong detected frequency");
            // We should have one actual maximum and one maximum at the last NSDF sample
            assert_eq!(result.key_maxima().len(), 2, "Unexpected key max count");

            // The value of the last key max should be reasonable
            let last_max = result.key_maxima()[1];
            assert!(
                (last_max.lag - (last_max.lag_index as f32)).abs() < 1.,
                "Unreasonable interpolated key max lag"
            );
            assert!(
                (last_max.value - last_max.value_at_lag_index).abs() < 0.001,
                "Unreasonable interpolated key max value"
            );
        }
    }

    #[test]
    fn test_repeated_compute_resets_state() {
        let sample_rate = 44100.0;
        let mut result = MpmPitchResult::new(1024, 512);
        fill_sine(&mut result, 330.0, sample_rate);
        result.compute(sample_rate);
        assert!(result.is_tone());

        for value in result.window.iter_mut() {
            *value = 0.0;
        }
        result.compute(sample_rate);
        assert!(!result.is_valid());
        assert!(result.key_maxima().is_empty());
        assert_eq!(result.clarity_at_double_period, None);
    }
}
