//! Reporting outcomes as text and as errors

use std::fmt;

use thiserror::Error;

use crate::Outcome;

/// The one error kind of this domain: the guard fired for `a + add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("arithmetic overflow: {a} + {add} does not fit in i8")]
pub struct ArithmeticOverflow {
    pub a: i8,
    pub add: i8,
}

impl Outcome {
    /// The single stdout line for this outcome, without the line break.
    pub fn report_line(&self) -> String {
        self.to_string()
    }

    /// Convert into a `Result`, attaching the operands on overflow.
    pub fn into_result(self, a: i8, add: i8) -> Result<i8, ArithmeticOverflow> {
        match self {
            Outcome::Overflow => Err(ArithmeticOverflow { a, add }),
            Outcome::Sum(v) => Ok(v),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Overflow => write!(f, "Overflow detected"),
            Outcome::Sum(v) => write!(f, "a = {}", v),
        }
    }
}
