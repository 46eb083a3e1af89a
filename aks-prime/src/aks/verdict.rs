use serde::{Deserialize, Serialize};

use std::fmt;

/// Which gate proved the candidate composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeReason {
    /// `n <= 1`.
    TooSmall,
    /// `n = m^k` with `k >= 2`.
    PerfectPower,
    /// Some `a <= r` shares the nontrivial factor `factor` with `n`.
    SmallFactor { factor: u64 },
    /// `(witness + x)^n != witness + x^(n mod r)` in the quotient ring.
    PolynomialMismatch { witness: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Prime,
    Composite(CompositeReason),
}

impl Verdict {
    pub fn is_prime(&self) -> bool {
        matches!(self, Verdict::Prime)
    }

    pub fn is_composite(&self) -> bool {
        !self.is_prime()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Prime => write!(f, "prime"),
            Verdict::Composite(_) => write!(f, "composite"),
        }
    }
}

impl fmt::Display for CompositeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeReason::TooSmall => write!(f, "not greater than 1"),
            CompositeReason::PerfectPower => write!(f, "a perfect power"),
            CompositeReason::SmallFactor { factor } => write!(f, "divisible by {factor}"),
            CompositeReason::PolynomialMismatch { witness } => {
                write!(f, "(a + x)^n != a + x^n for a={witness}")
            }
        }
    }
}
