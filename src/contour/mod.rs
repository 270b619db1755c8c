//! Melodic contours, also known as [Parsons code](https://en.wikipedia.org/wiki/Parsons_code).
//!
//! A contour keeps only the direction of each melodic step: up, down or same.
//! Contours extracted from a continuous pitch track start with a `*` marking the
//! start of the sequence.
//!
//! ```
//! use micro_hum::contour::{encode_exact, Contour};
//!
//! let contour = encode_exact(&[60, 64, 64, 60]);
//! assert_eq!(contour.to_string(), "USD");
//! assert_eq!("USD".parse::<Contour>().unwrap(), contour);
//! ```

mod encoder;

pub use encoder::{encode_exact, ThresholdEncoder};
pub(crate) use encoder::cents;

use core::fmt;
use core::str::FromStr;

use crate::error::HumError;

/// A single contour symbol.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Sequence start marker, `*`.
    Start,
    /// The note is higher than the previous one, `U`.
    Up,
    /// The note is lower than the previous one, `D`.
    Down,
    /// The note repeats the previous one, `S`.
    Same,
}

impl Step {
    pub fn as_char(self) -> char {
        match self {
            Step::Start => '*',
            Step::Up => 'U',
            Step::Down => 'D',
            Step::Same => 'S',
        }
    }

    pub fn from_char(symbol: char) -> Option<Step> {
        match symbol {
            '*' => Some(Step::Start),
            'U' => Some(Step::Up),
            'D' => Some(Step::Down),
            'S' => Some(Step::Same),
            _ => None,
        }
    }
}

/// An ordered sequence of contour symbols, i.e a UDS string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Contour {
    steps: Vec<Step>,
}

impl Contour {
    pub fn new() -> Self {
        Contour { steps: Vec::new() }
    }

    /// An empty contour starting with the `*` sentinel.
    pub fn with_sentinel() -> Self {
        Contour {
            steps: vec![Step::Start],
        }
    }

    /// Appends a step. Panics if `step` is the sentinel and the contour is not empty.
    pub fn push(&mut self, step: Step) {
        assert!(
            step != Step::Start || self.steps.is_empty(),
            "The '*' sentinel may only start a contour"
        );
        self.steps.push(step)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn has_sentinel(&self) -> bool {
        self.steps.first() == Some(&Step::Start)
    }

    /// The steps following the leading sentinel, if there is one.
    pub fn without_sentinel(&self) -> &[Step] {
        if self.has_sentinel() {
            &self.steps[1..]
        } else {
            &self.steps
        }
    }
}

impl From<Vec<Step>> for Contour {
    fn from(steps: Vec<Step>) -> Self {
        Contour { steps }
    }
}

impl fmt::Display for Contour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in self.steps.iter() {
            write!(f, "{}", step.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for Contour {
    type Err = HumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(i, symbol)| match Step::from_char(symbol) {
                Some(Step::Start) if i > 0 => Err(HumError::InvalidSymbol(symbol)),
                Some(step) => Ok(step),
                None => Err(HumError::InvalidSymbol(symbol)),
            })
            .collect::<Result<Vec<Step>, HumError>>()
            .map(Contour::from)
    }
}
