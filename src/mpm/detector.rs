use crate::common::WindowProcessor;
use crate::mpm::result::MpmPitchResult;

/// * Collects input samples into (possibly overlapping) windows
/// * Performs pitch detection on each newly filled window
/// * Handles downsampling
pub struct MpmPitchDetector {
    sample_rate: f32,
    window_processor: WindowProcessor,
    result: MpmPitchResult,
    processed_window_count: usize,
}

impl MpmPitchDetector {
    pub fn new(sample_rate: f32, window_size: usize, hop_size: usize) -> Self {
        MpmPitchDetector::from_options(sample_rate, window_size, hop_size, window_size / 2, 1)
    }

    pub fn from_options(
        sample_rate: f32,
        downsampled_window_size: usize,
        downsampled_hop_size: usize,
        downsampled_lag_count: usize,
        downsampling: usize,
    ) -> Self {
        MpmPitchDetector {
            sample_rate,
            result: MpmPitchResult::new(downsampled_window_size, downsampled_lag_count),
            window_processor: WindowProcessor::new(
                downsampled_window_size,
                downsampled_hop_size,
                downsampling,
            ),
            processed_window_count: 0,
        }
    }

    /// Processes a chunk of samples, invoking `result_handler` for every
    /// analyzed window. Chunks may be of any size.
    pub fn process<F>(&mut self, buffer: &[f32], mut result_handler: F)
    where
        F: FnMut(&MpmPitchResult),
    {
        let result = &mut self.result;
        let processed_window_count = &mut self.processed_window_count;
        let downsampled_sample_rate = self.sample_rate / (self.window_processor.downsampling() as f32);
        self.window_processor.process(buffer, |window| {
            result.window.copy_from_slice(window);
            result.compute(downsampled_sample_rate);
            *processed_window_count += 1;
            result_handler(&*result);
        });
    }

    /// Forgets all buffered input.
    pub fn reset(&mut self) {
        self.window_processor.reset();
        self.processed_window_count = 0;
    }

    /// Returns the most recently computed pitch detection result.
    pub fn result(&self) -> &MpmPitchResult {
        &self.result
    }

    /// Returns the number of processed windows since the detector was created or reset.
    pub fn processed_window_count(&self) -> usize {
        self.processed_window_count
    }

    /// Returns the current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn downsampled_window_size(&self) -> usize {
        self.window_processor.downsampled_window_size()
    }

    pub fn hop_size(&self) -> usize {
        self.window_processor.downsampled_hop_size() * self.window_processor.downsampling()
    }
}
