use super::fft::{real_fft, MAX_FFT_SIZE};

/// Computes the length of the FFT needed to compute the autocorrelation
/// for a given window size and lag count to avoid circular convolution effects.
///
/// # Arguments
///
/// * `window_size` - The size of the input window.
/// * `lag_count` - The length of the computed autocorrelation.
pub fn autocorr_fft_size(window_size: usize, lag_count: usize) -> usize {
    assert!(lag_count <= window_size);
    let min_length = window_size + lag_count - 1;
    let mut result: usize = 8; // Start at microfft's minimum size
    while result < min_length {
        result <<= 1;
    }
    result
}

/// FFT accelerated [autocorrelation](https://en.wikipedia.org/wiki/Autocorrelation)
/// of fixed size windows. All buffers are allocated on creation.
pub struct Autocorrelation {
    window_size: usize,
    lag_count: usize,
    fft_buffer: Box<[f32]>,
    scratch_buffer: Box<[f32]>,
}

impl Autocorrelation {
    pub fn new(window_size: usize, lag_count: usize) -> Self {
        let fft_size = autocorr_fft_size(window_size, lag_count);
        if fft_size > MAX_FFT_SIZE {
            panic!(
                "Window size {} and lag count {} require an unsupported FFT size {}",
                window_size, lag_count, fft_size
            )
        }
        Autocorrelation {
            window_size,
            lag_count,
            fft_buffer: vec![0.0; fft_size].into_boxed_slice(),
            scratch_buffer: vec![0.0; fft_size].into_boxed_slice(),
        }
    }

    pub fn lag_count(&self) -> usize {
        self.lag_count
    }

    /// Computes the autocorrelation of `window` for lags `0..lag_count`.
    pub fn compute(&mut self, window: &[f32]) -> &[f32] {
        if window.len() != self.window_size {
            panic!(
                "Got window of length {}, expected {}",
                window.len(),
                self.window_size
            )
        }
        let fft_size = self.fft_buffer.len();

        // Zero padded FFT input
        self.fft_buffer[..window.len()].copy_from_slice(window);
        for element in self.fft_buffer.iter_mut().skip(window.len()) {
            *element = 0.0
        }
        let fft = real_fft(&mut self.fft_buffer[..]);

        // Power spectral density, mirrored to a full length symmetric real spectrum.
        // fft[0].im holds the Nyquist bin.
        let scratch = &mut self.scratch_buffer;
        scratch[0] = fft[0].re * fft[0].re;
        for (index, fft_value) in fft.iter().enumerate().skip(1) {
            let norm_sq = fft_value.norm_sqr();
            scratch[index] = norm_sq;
            scratch[fft_size - index] = norm_sq;
        }
        scratch[fft.len()] = fft[0].im * fft[0].im;

        // The spectrum is real and symmetric, so a forward FFT gives the
        // inverse transform up to a scaling factor.
        let ifft = real_fft(&mut scratch[..]);
        let scale = 1.0 / (fft_size as f32);
        for (result, ifft) in self.fft_buffer.iter_mut().zip(ifft.iter()).take(self.lag_count) {
            *result = scale * ifft.re;
        }
        &self.fft_buffer[..self.lag_count]
    }
}

/// Computes the autocorrelation of a given buffer using time domain convolution.
/// Slow, used as a reference.
pub fn autocorr_conv(window: &[f32], result: &mut [f32]) {
    let window_size = window.len();
    if window_size < result.len() {
        panic!("Result vector must not be longer than the window.");
    }

    for (tau, value) in result.iter_mut().enumerate() {
        *value = window[..window_size - tau]
            .iter()
            .zip(window[tau..].iter())
            .map(|(a, b)| a * b)
            .sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_size() {
        assert_eq!(autocorr_fft_size(8, 4), 16);
        assert_eq!(autocorr_fft_size(2048, 1024), 4096);
        assert_eq!(autocorr_fft_size(4, 1), 8);
    }

    #[test]
    fn test_autocorr_fft() {
        // Reference Octave output (https://www.gnu.org/software/octave/index)
        // a = [1   2   3   4   5   6   7   8]
        // conv(a, fliplr(a)) = [8    23    44    70   100   133   168   204   168   133   100    70    44   23     8]
        let window: Vec<f32> = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let lag_count = 4;
        let mut reference: Vec<f32> = vec![0.0; lag_count];
        autocorr_conv(&window[..], &mut reference[..]);
        assert_eq!(reference, vec![204.0, 168.0, 133.0, 100.0]);

        let mut autocorr = Autocorrelation::new(window.len(), lag_count);
        let result = autocorr.compute(&window[..]);
        assert_eq!(result.len(), lag_count);
        for (expected, actual) in reference.iter().zip(result.iter()) {
            assert!((expected - actual).abs() <= 1e-3);
        }
    }

    #[test]
    fn test_repeated_computation() {
        let window: Vec<f32> = (0..64).map(|i| ((i * 7) % 5) as f32 - 2.0).collect();
        let mut reference: Vec<f32> = vec![0.0; 32];
        autocorr_conv(&window[..], &mut reference[..]);

        let mut autocorr = Autocorrelation::new(64, 32);
        for _ in 0..2 {
            let result = autocorr.compute(&window[..]);
            for (expected, actual) in reference.iter().zip(result.iter()) {
                assert!((expected - actual).abs() <= 1e-2);
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_too_large_window() {
        let _ = Autocorrelation::new(4096, 2048);
    }
}
