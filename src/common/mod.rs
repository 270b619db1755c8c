//! Common algorithms and utilities.

mod autocorr;
mod f32_array_ext;
mod fft;
mod midi;
mod window_processor;

pub use autocorr::{autocorr_conv, autocorr_fft_size, Autocorrelation};
pub use f32_array_ext::F32ArrayExt;
pub use fft::{real_fft, MAX_FFT_SIZE};
pub use midi::{freq_to_midi_key, freq_to_midi_note, midi_key_name};
pub use window_processor::WindowProcessor;
