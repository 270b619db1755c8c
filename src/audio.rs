//! WAV decoding.

use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::error::{HumError, Result};

/// Reads a WAV file and returns its sample rate and mono samples in [-1, 1].
///
/// Integer PCM of 8 to 32 bits and 32-bit float PCM are supported. Multi-channel
/// files are mixed down to mono by averaging the channels of each frame.
pub fn read_wav(path: &Path) -> Result<(u32, Vec<f32>)> {
    let mut reader = WavReader::open(path).map_err(|e| HumError::source_read(path, e))?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|e| HumError::source_read(path, e))?,
        SampleFormat::Int => {
            let scale = 1.0 / (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|s| s as f32 * scale))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| HumError::source_read(path, e))?
        }
    };

    log::debug!(
        "read {} frames of {} channel audio at {} Hz from {}",
        interleaved.len() / (spec.channels.max(1) as usize),
        spec.channels,
        spec.sample_rate,
        path.display()
    );

    Ok((spec.sample_rate, mix_to_mono(&interleaved, spec.channels as usize)))
}

/// Averages the channels of interleaved audio. A trailing partial frame is dropped.
pub fn mix_to_mono(interleaved: &[f32], channel_count: usize) -> Vec<f32> {
    if channel_count <= 1 {
        return interleaved.to_vec();
    }
    let scale = 1.0 / channel_count as f32;
    interleaved
        .chunks_exact(channel_count)
        .map(|frame| frame.iter().sum::<f32>() * scale)
        .collect()
}
