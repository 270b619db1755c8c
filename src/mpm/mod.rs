//! An implementation of the MPM [pitch](https://en.wikipedia.org/wiki/Pitch_%28music%29) detection algorithm,
//! described in the paper [A smarter way to find pitch](http://www.cs.otago.ac.nz/tartini/papers/A_Smarter_Way_to_Find_Pitch.pdf)
//! by Philip McLeod and Geoff Wyvill. The algorithm detects pitch in monophonic sounds such as
//! a hummed or sung melody. It cannot detect multiple pitches at once, like in a musical chord.
//!
//! * Memory is only allocated on initialization.
//! * Autocorrelation is computed using real-only FFT.
//! * Computation of the NSDF is accelerated using the incremental scheme described in the paper.
//! * Downsampling is supported, increasing performance at the expense of frequency resolution.
//!
//! # Examples
//! ## Detector
//! Collects input samples into possibly overlapping windows and processes each newly filled window.
//! ```
//! use micro_hum::mpm::MpmPitchDetector;
//!
//! // Create an input buffer containing a pure tone at 440 Hz.
//! let sample_rate = 44100.0;
//! let sine_frequency = 440.0;
//! let chunk: Vec<f32> = (0..10000)
//!     .map(|i| (2.0 * core::f32::consts::PI * sine_frequency * (i as f32) / sample_rate).sin())
//!     .collect();
//!
//! let window_size = 512; // The number of samples to perform pitch detection on.
//! let hop_size = 128; // Pitch is computed every hop_size samples
//! let mut detector = MpmPitchDetector::new(sample_rate, window_size, hop_size);
//!
//! detector.process(&chunk[..], |result| {
//!     assert!(result.is_tone());
//!     assert!((sine_frequency - result.frequency).abs() <= 0.5);
//! });
//! ```
//! ## Single window
//! Processes a window directly.
//! ```
//! use micro_hum::mpm::MpmPitchResult;
//!
//! let sample_rate = 44100.0;
//! let sine_frequency = 440.0;
//! let window_size = 512;
//! let lag_count = 256;
//! let mut result = MpmPitchResult::new(window_size, lag_count);
//!
//! for i in 0..window_size {
//!     result.window[i] = (2.0 * std::f32::consts::PI * sine_frequency * (i as f32) / sample_rate).sin();
//! }
//!
//! result.compute(sample_rate);
//! assert!((sine_frequency - result.frequency).abs() <= 0.05);
//! ```
//! # A note on clarity and false positives
//! Use [MpmPitchResult::is_tone] to check if the input signal is a tone, i.e has a
//! strong fundamental frequency.
//!
//! The clarity is the value of the normalized square difference function (NSDF)
//! at the peak assumed to correspond to the pitch period. Noisy non-tonal input
//! may give rise to occasional large NSDF peaks, so the clarity of a single window
//! is not enough to tell whether the signal has a discernable fundamental frequency.
//! A tone also produces a large NSDF value at twice the pitch period, which
//! [MpmPitchResult::is_tone] checks as well.

mod detector;
mod key_maximum;
mod result;
mod util;

pub use detector::MpmPitchDetector;
pub use key_maximum::KeyMaximum;
pub use result::{
    MpmPitchResult, DEFAULT_CLARITY_THRESHOLD, DEFAULT_DOUBLE_PERIOD_TOLERANCE,
    MAX_KEY_MAXIMA_COUNT,
};
