//! Configuration parameters for catalog building, pitch tracking, note grouping and ranking.
//!
//! All values are passed explicitly to the constructors that need them.
//! Every struct has a `Default` matching the reference behavior and a
//! `validate` method that is called before any processing starts.

use crate::error::{HumError, Result};

/// The default interval, in cents, above which two consecutive notes are
/// considered different. Used both for grouping frames into notes and for
/// the threshold contour encoder.
pub const DEFAULT_THRESHOLD_CENTS: f64 = 100.0;

/// The default number of matches returned by the ranker.
pub const DEFAULT_TOP_K: usize = 5;

/// Catalog builder parameters.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// File extension of reference melodies, without the dot (default: "mid").
    /// Compared case-insensitively.
    pub extension: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            extension: "mid".to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(HumError::InvalidConfig(format!(
                "reference extension {:?} must be non-empty and given without a leading dot",
                self.extension
            )));
        }
        Ok(())
    }
}

/// Frame-level pitch tracking parameters.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Number of samples per analysis window (default: 2048).
    /// Must be a power of two between 16 and 2048.
    pub window_size: usize,

    /// Number of samples between consecutive windows (default: 512).
    /// Must divide `window_size`.
    pub hop_size: usize,

    /// Lowest frequency accepted as voiced, in Hz (default: 65.41, C2).
    pub min_frequency: f32,

    /// Highest frequency accepted as voiced, in Hz (default: 2093.0, C7).
    pub max_frequency: f32,

    /// Minimum NSDF clarity for a window to count as a tone (default: 0.8).
    pub clarity_threshold: f32,

    /// Frames quieter than the loudest frame by more than this many dB are
    /// trimmed from the start and end of the recording (default: 20.0).
    pub trim_top_db: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            window_size: 2048,
            hop_size: 512,
            min_frequency: 65.41,
            max_frequency: 2093.0,
            clarity_threshold: 0.8,
            trim_top_db: 20.0,
        }
    }
}

impl TrackerConfig {
    /// The number of NSDF lags computed per window.
    pub fn lag_count(&self) -> usize {
        self.window_size / 2
    }

    pub fn validate(&self) -> Result<()> {
        if !self.window_size.is_power_of_two() || self.window_size < 16 || self.window_size > 2048 {
            return Err(HumError::InvalidConfig(format!(
                "window size {} must be a power of two between 16 and 2048",
                self.window_size
            )));
        }
        if self.hop_size == 0 || self.hop_size > self.window_size || self.window_size % self.hop_size != 0 {
            return Err(HumError::InvalidConfig(format!(
                "hop size {} must be positive and divide the window size {}",
                self.hop_size, self.window_size
            )));
        }
        if !(self.min_frequency > 0.0) || self.min_frequency >= self.max_frequency {
            return Err(HumError::InvalidConfig(format!(
                "frequency range {}..{} Hz is empty",
                self.min_frequency, self.max_frequency
            )));
        }
        if !(0.0..=1.0).contains(&self.clarity_threshold) {
            return Err(HumError::InvalidConfig(format!(
                "clarity threshold {} must be between 0 and 1",
                self.clarity_threshold
            )));
        }
        if !(self.trim_top_db > 0.0) {
            return Err(HumError::InvalidConfig(format!(
                "trim threshold {} dB must be positive",
                self.trim_top_db
            )));
        }
        Ok(())
    }
}

/// Smoothing and note grouping parameters.
#[derive(Debug, Clone)]
pub struct GroupingConfig {
    /// Size of the median filter applied to the frame pitch track (default: 11).
    /// Must be odd.
    pub median_filter_size: usize,

    /// A frame further than this many cents from the median of the current
    /// note starts a new note (default: 100.0).
    pub threshold_cents: f64,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            median_filter_size: 11,
            threshold_cents: DEFAULT_THRESHOLD_CENTS,
        }
    }
}

impl GroupingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.median_filter_size % 2 == 0 {
            return Err(HumError::InvalidConfig(format!(
                "median filter size {} must be odd",
                self.median_filter_size
            )));
        }
        validate_threshold_cents(self.threshold_cents)
    }
}

/// Ranking parameters.
#[derive(Debug, Clone)]
pub struct RankerConfig {
    /// Maximum number of matches to return (default: 5). `None` returns every entry.
    pub top_k: Option<usize>,

    /// Drop a leading `*` from the query contour before scoring (default: false).
    /// Catalog contours never carry the sentinel, so keeping it adds one
    /// to every distance.
    pub ignore_sentinel: bool,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            top_k: Some(DEFAULT_TOP_K),
            ignore_sentinel: false,
        }
    }
}

pub(crate) fn validate_threshold_cents(threshold_cents: f64) -> Result<()> {
    if !threshold_cents.is_finite() || threshold_cents <= 0.0 {
        return Err(HumError::InvalidConfig(format!(
            "threshold of {} cents must be a positive number",
            threshold_cents
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(CatalogConfig::default().validate().is_ok());
        assert!(TrackerConfig::default().validate().is_ok());
        assert!(GroupingConfig::default().validate().is_ok());
        assert_eq!(RankerConfig::default().top_k, Some(5));
    }

    #[test]
    fn test_invalid_tracker_config() {
        let too_large = TrackerConfig {
            window_size: 4096,
            ..TrackerConfig::default()
        };
        assert!(too_large.validate().is_err());

        let uneven_hop = TrackerConfig {
            hop_size: 300,
            ..TrackerConfig::default()
        };
        assert!(uneven_hop.validate().is_err());

        let empty_range = TrackerConfig {
            min_frequency: 500.0,
            max_frequency: 100.0,
            ..TrackerConfig::default()
        };
        assert!(empty_range.validate().is_err());
    }

    #[test]
    fn test_invalid_grouping_config() {
        let even = GroupingConfig {
            median_filter_size: 10,
            ..GroupingConfig::default()
        };
        assert!(even.validate().is_err());

        let negative = GroupingConfig {
            threshold_cents: -5.0,
            ..GroupingConfig::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_extension_with_dot_is_rejected() {
        let config = CatalogConfig {
            extension: ".mid".to_string(),
        };
        assert!(config.validate().is_err());
    }
}
