/// Collects input samples into (possibly overlapping) windows, optionally
/// downsampling the input, and invokes a handler for each newly filled window.
///
/// Input may be passed in chunks of arbitrary size. A window is emitted once
/// every `downsampled_hop_size` downsampled samples, starting when the first
/// full window has been collected.
pub struct WindowProcessor {
    downsampled_window: Box<[f32]>,
    downsampled_window_size: usize,
    downsampling: usize,
    downsampled_hop_size: usize,
    // The write index within the current sub window. A sub window
    // is a chunk of size downsampled_hop_size.
    sub_window_write_index: usize,
    // The index of the current sub window mod the number of
    // sub windows per window
    wrapped_sub_window_index: usize,
    first_read_index: usize,
    has_filled_first_window: bool,
}

fn validate_sizes(downsampled_size: usize, downsampled_hop_size: usize, downsampling: usize) {
    if downsampled_size == 0 {
        panic!("Downsampled size must be greater than 0")
    }
    if downsampled_hop_size == 0 {
        panic!("Downsampled hop size must be greater than 0")
    }
    if downsampling == 0 {
        panic!("Downsampling must be greater than 0")
    }
    if downsampled_hop_size > downsampled_size {
        panic!("Downsampled hop size must not be greater than downsampled size")
    }
    if downsampled_size % downsampled_hop_size != 0 {
        panic!("Downsampled size must be divisible by downsampled hop size")
    }
}

impl WindowProcessor {
    pub fn new(
        downsampled_window_size: usize,
        downsampled_hop_size: usize,
        downsampling: usize,
    ) -> Self {
        validate_sizes(downsampled_window_size, downsampled_hop_size, downsampling);
        WindowProcessor {
            downsampled_window: vec![0.; downsampled_window_size].into_boxed_slice(),
            downsampled_window_size,
            downsampled_hop_size,
            downsampling,
            sub_window_write_index: 0,
            wrapped_sub_window_index: 0,
            first_read_index: 0,
            has_filled_first_window: false,
        }
    }

    pub fn reset(&mut self) {
        self.sub_window_write_index = 0;
        self.first_read_index = 0;
        self.wrapped_sub_window_index = 0;
        self.has_filled_first_window = false;
    }

    pub fn downsampling(&self) -> usize {
        self.downsampling
    }

    pub fn downsampled_hop_size(&self) -> usize {
        self.downsampled_hop_size
    }

    pub fn downsampled_window_size(&self) -> usize {
        self.downsampled_window_size
    }

    pub fn process<F>(&mut self, buffer: &[f32], mut handler: F)
    where
        F: FnMut(&[f32]),
    {
        let sub_windows_per_window = self.downsampled_window_size / self.downsampled_hop_size;
        for input in buffer
            .iter()
            .skip(self.first_read_index)
            .step_by(self.downsampling)
        {
            self.downsampled_window[self.sub_window_write_index] = *input;
            self.sub_window_write_index += 1;
            if self.sub_window_write_index == self.downsampled_hop_size {
                self.wrapped_sub_window_index += 1;
                if self.wrapped_sub_window_index == sub_windows_per_window {
                    self.wrapped_sub_window_index = 0;
                    self.has_filled_first_window = true
                }

                self.sub_window_write_index = 0;

                // The newest sub window moves to the end, the oldest to the start.
                self.downsampled_window
                    .rotate_left(self.downsampled_hop_size);
                if self.has_filled_first_window {
                    handler(&self.downsampled_window);
                }
            }
        }

        // Index of the first sample to read from the next buffer, so that
        // downsampling stays aligned across buffers.
        let remainder = (buffer.len() + self.downsampling - self.first_read_index) % self.downsampling;
        self.first_read_index = (self.downsampling - remainder) % self.downsampling;
    }
}

#[cfg(test)]
mod tests {
    use super::WindowProcessor;

    fn collect_windows(
        processor: &mut WindowProcessor,
        buffer: &[f32],
        chunk_size: usize,
    ) -> Vec<Vec<f32>> {
        let mut windows = Vec::new();
        for chunk in buffer.chunks(chunk_size) {
            processor.process(chunk, |window| windows.push(window.to_vec()));
        }
        windows
    }

    #[test]
    fn test_overlapping_windows() {
        let buffer: Vec<f32> = (0..16).map(|i| i as f32).collect();
        let mut processor = WindowProcessor::new(8, 4, 1);
        let windows = collect_windows(&mut processor, &buffer, buffer.len());
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0], (0..8).map(|i| i as f32).collect::<Vec<f32>>());
        assert_eq!(windows[1], (4..12).map(|i| i as f32).collect::<Vec<f32>>());
        assert_eq!(windows[2], (8..16).map(|i| i as f32).collect::<Vec<f32>>());
    }

    #[test]
    fn test_chunked_input_matches_single_buffer() {
        let buffer: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let mut single = WindowProcessor::new(16, 4, 2);
        let expected = collect_windows(&mut single, &buffer, buffer.len());
        for chunk_size in [1_usize, 3, 7, 16].iter() {
            let mut chunked = WindowProcessor::new(16, 4, 2);
            assert_eq!(collect_windows(&mut chunked, &buffer, *chunk_size), expected);
        }
    }

    #[test]
    fn test_downsampling() {
        let buffer: Vec<f32> = (0..16).map(|i| i as f32).collect();
        let mut processor = WindowProcessor::new(4, 4, 2);
        let windows = collect_windows(&mut processor, &buffer, buffer.len());
        assert_eq!(windows, vec![vec![0., 2., 4., 6.], vec![8., 10., 12., 14.]]);
    }

    #[test]
    fn test_reset() {
        let buffer: Vec<f32> = (0..8).map(|i| i as f32).collect();
        let mut processor = WindowProcessor::new(8, 8, 1);
        processor.process(&buffer[..5], |_| panic!("window should not be full yet"));
        processor.reset();
        let windows = collect_windows(&mut processor, &buffer, buffer.len());
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0], buffer);
    }

    #[test]
    #[should_panic]
    fn test_uneven_hop_size() {
        let _ = WindowProcessor::new(10, 4, 1);
    }
}
