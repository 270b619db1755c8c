pub(crate) fn validate_window_size_lag_count(window_size: usize, lag_count: usize) {
    assert!(
        lag_count <= window_size,
        "Lag count {} must not be greater than the window size {}",
        lag_count,
        window_size
    );
}

/// Fills `m_prime` with m'(tau) = sum over j of x(j)^2 + x(j + tau)^2, eq (6)
/// in the paper. Starts from m'(0) = 2 r(0) and removes the two samples that
/// leave the sum at each lag, see section 6, Efficient calculation of SDF.
pub(crate) fn m_prime_incremental(window: &[f32], autocorr_at_lag_0: f32, m_prime: &mut [f32]) {
    validate_window_size_lag_count(window.len(), m_prime.len());
    if m_prime.is_empty() {
        return;
    }

    let mut value = 2.0 * autocorr_at_lag_0;
    m_prime[0] = value;
    let leaving_at_end = window.iter().rev();
    for ((m, first), last) in m_prime.iter_mut().skip(1).zip(window.iter()).zip(leaving_at_end) {
        value -= first * first + last * last;
        *m = value;
    }
}
