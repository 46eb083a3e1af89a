//! Stage events emitted while a decision runs.

use crate::aks::verdict::Verdict;

use serde::{Deserialize, Serialize};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AksEvent {
    NotPerfectPower { n: u64 },
    /// The order search settled on `r`; `order` is the order of `n` mod `r`.
    OrderFound { n: u64, r: u64, order: u64 },
    SmallFactorsCleared { n: u64, r: u64 },
    ExceedsOrder { n: u64, r: u64 },
    /// The polynomial stage will try witnesses `1..=bound`.
    WitnessBound { n: u64, bound: u64 },
    WitnessPassed { n: u64, a: u64 },
    Decided { n: u64, verdict: Verdict },
}

impl fmt::Display for AksEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AksEvent::NotPerfectPower { n } => write!(f, "{n} is not a perfect power."),
            AksEvent::OrderFound { r, order, .. } => {
                write!(f, "Found r={r} (order of n mod r is {order}).")
            }
            AksEvent::SmallFactorsCleared { n, r } => {
                write!(f, "All numbers up to r={r} are coprime to n={n}.")
            }
            AksEvent::ExceedsOrder { n, r } => write!(f, "n={n} is greater than r={r}."),
            AksEvent::WitnessBound { bound, .. } => write!(f, "Checking a up to {bound}..."),
            AksEvent::WitnessPassed { a, .. } => write!(f, "Passed a={a}."),
            AksEvent::Decided { n, verdict } => match verdict {
                Verdict::Prime => write!(f, "{n} is prime."),
                Verdict::Composite(reason) => write!(f, "{n} is composite ({reason})."),
            },
        }
    }
}

/// Receives every [`AksEvent`] in the order the stages reach them.
pub trait AksObserver {
    fn on_event(&mut self, event: &AksEvent);
}

/// Discards events.
impl AksObserver for () {
    fn on_event(&mut self, _event: &AksEvent) {}
}

/// Records events.
impl AksObserver for Vec<AksEvent> {
    fn on_event(&mut self, event: &AksEvent) {
        self.push(*event);
    }
}

/// Forwards events to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl AksObserver for LogObserver {
    fn on_event(&mut self, event: &AksEvent) {
        log::debug!("{event}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aks::verdict::CompositeReason;

    #[test]
    fn test_display_lines() {
        assert_eq!(
            AksEvent::NotPerfectPower { n: 97 }.to_string(),
            "97 is not a perfect power."
        );
        assert_eq!(
            AksEvent::ExceedsOrder { n: 97, r: 47 }.to_string(),
            "n=97 is greater than r=47."
        );
        assert_eq!(
            AksEvent::Decided {
                n: 561,
                verdict: Verdict::Composite(CompositeReason::SmallFactor { factor: 3 })
            }
            .to_string(),
            "561 is composite (divisible by 3)."
        );
    }

    #[test]
    fn test_serialized_shape() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(AksEvent::WitnessPassed { n: 31, a: 2 })?;
        assert_eq!(json["event"], "witness_passed");
        assert_eq!(json["a"], 2);

        let json = serde_json::to_value(AksEvent::Decided {
            n: 31,
            verdict: Verdict::Prime,
        })?;
        assert_eq!(json["verdict"], "prime");

        let back: AksEvent = serde_json::from_value(json)?;
        assert_eq!(back, AksEvent::Decided { n: 31, verdict: Verdict::Prime });
        Ok(())
    }

    #[test]
    fn test_vec_observer_records() {
        let mut log: Vec<AksEvent> = Vec::new();
        log.on_event(&AksEvent::WitnessPassed { n: 7, a: 1 });
        log.on_event(&AksEvent::WitnessPassed { n: 7, a: 2 });
        assert_eq!(log.len(), 2);
    }
}
