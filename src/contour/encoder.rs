use core::cmp::Ordering;

use crate::config::{validate_threshold_cents, DEFAULT_THRESHOLD_CENTS};
use crate::contour::{Contour, Step};
use crate::error::{HumError, Result};

/// Encodes a sequence of discrete notes, e.g MIDI key numbers, using exact comparison.
///
/// The result has one symbol per adjacent pair of notes and no sentinel, so
/// sequences with fewer than two notes give an empty contour. Values that
/// are not comparable (NaN) are encoded as `S`.
pub fn encode_exact<T: PartialOrd>(pitches: &[T]) -> Contour {
    pitches
        .windows(2)
        .map(|pair| match pair[1].partial_cmp(&pair[0]) {
            Some(Ordering::Greater) => Step::Up,
            Some(Ordering::Less) => Step::Down,
            _ => Step::Same,
        })
        .collect::<Vec<Step>>()
        .into()
}

/// Encodes notes taken from a continuous pitch track, given as frequencies.
///
/// Two consecutive notes are considered the same unless they are more than
/// `threshold_cents` apart. The contour always starts with `*`.
#[derive(Debug, Copy, Clone)]
pub struct ThresholdEncoder {
    threshold_cents: f64,
}

impl Default for ThresholdEncoder {
    fn default() -> Self {
        ThresholdEncoder {
            threshold_cents: DEFAULT_THRESHOLD_CENTS,
        }
    }
}

impl ThresholdEncoder {
    pub fn new(threshold_cents: f64) -> Result<Self> {
        validate_threshold_cents(threshold_cents)?;
        Ok(ThresholdEncoder { threshold_cents })
    }

    pub fn threshold_cents(&self) -> f64 {
        self.threshold_cents
    }

    /// Fails with `InvalidPitch` if any pitch is not a positive, finite number.
    pub fn encode<T: Copy + Into<f64>>(&self, pitches: &[T]) -> Result<Contour> {
        let pitches: Vec<f64> = pitches.iter().map(|pitch| (*pitch).into()).collect();
        if let Some((index, value)) = pitches
            .iter()
            .enumerate()
            .find(|(_, pitch)| !pitch.is_finite() || **pitch <= 0.0)
        {
            return Err(HumError::InvalidPitch {
                index,
                value: *value,
            });
        }

        let mut contour = Contour::with_sentinel();
        for pair in pitches.windows(2) {
            let interval = cents(pair[0], pair[1]);
            contour.push(if interval > self.threshold_cents {
                Step::Up
            } else if interval < -self.threshold_cents {
                Step::Down
            } else {
                Step::Same
            });
        }
        Ok(contour)
    }
}

/// The interval from `from` to `to` in cents. Both must be positive.
pub(crate) fn cents(from: f64, to: f64) -> f64 {
    1200.0 * (to / from).log2()
}
