/// A key maximum, i.e the highest NSDF value between a positive and the following
/// negative zero crossing. It may or may not correspond to the pitch period.
#[derive(Copy, Clone, Debug, Default)]
pub struct KeyMaximum {
    /// The index into the NSDF array corresponding to this maximum
    pub lag_index: usize,
    /// The NSDF value at `lag_index` for this maximum
    pub value_at_lag_index: f32,
    /// The NSDF value for this maximum, approximated using parabolic interpolation.
    pub value: f32,
    /// The lag, in samples, for this maximum, approximated using parabolic interpolation.
    pub lag: f32,
}

impl KeyMaximum {
    pub(crate) fn at(nsdf: &[f32], lag_index: usize) -> Self {
        let value_at_lag_index = nsdf[lag_index];

        // Use parabolic interpolation to approximate
        // the true maximum using the left and right neighbors
        let left = nsdf[lag_index.saturating_sub(1)];
        let right = nsdf[(lag_index + 1).min(nsdf.len() - 1)];

        // Coefficients of a parabola ax^2 + bx + c passing through
        // (-1, left), (0, max), (1, right)
        let a = 0.5 * (right - 2.0 * value_at_lag_index + left);
        let b = 0.5 * (right - left);
        let c = value_at_lag_index;
        // x where the derivative is zero, i.e the vertex of the parabola
        let x_max = if a != 0.0 { -b / (2.0 * a) } else { 0.0 };

        KeyMaximum {
            lag_index,
            value_at_lag_index,
            value: a * x_max * x_max + b * x_max + c,
            lag: (lag_index as f32) + x_max,
        }
    }
}
