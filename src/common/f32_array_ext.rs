//! `[f32]` extensions.

use micromath::F32Ext;

/// `[f32]` extensions.
pub trait F32ArrayExt {
    /// Returns the maximum absolute value.
    fn peak_level(&self) -> f32;
    /// Returns the [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level.
    fn rms_level(&self) -> f32;
    /// Returns the [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level in dB relative to 1, i.e 0 dB corresponds to a level of 1.
    fn rms_level_db(&self) -> f32;
    /// Returns the median, or `None` for an empty slice. The median of an
    /// even number of values is the mean of the two middle values.
    fn median(&self) -> Option<f32>;
}

impl F32ArrayExt for [f32] {
    fn peak_level(&self) -> f32 {
        self.iter().fold(0.0, |max, sample| max.max(sample.abs()))
    }

    fn rms_level(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        };
        let sum_sq: f32 = self.iter().map(|sample| sample * sample).sum();
        F32Ext::sqrt(sum_sq / (self.len() as f32))
    }

    fn rms_level_db(&self) -> f32 {
        20. * F32Ext::log10(self.rms_level())
    }

    fn median(&self) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let mut sorted = self.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Some(0.5 * (sorted[mid - 1] + sorted[mid]))
        } else {
            Some(sorted[mid])
        }
    }
}
