use aks_prime::aks::{AksEvent, AksObserver, Verdict};
use aks_prime::scan::ScanReport;

use itertools::Itertools;
use serde::Serialize;

/// Echoes stage events to stdout for `--verbose`.
///
/// The final `Decided` event is skipped because the caller prints the verdict.
pub struct PrintObserver;

impl AksObserver for PrintObserver {
    fn on_event(&mut self, event: &AksEvent) {
        if !matches!(event, AksEvent::Decided { .. }) {
            println!("{event}");
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SingleOutput {
    pub n: u64,
    pub is_prime: bool,
    pub verdict: Verdict,
}

pub fn single_line(n: u64, verdict: &Verdict) -> String {
    format!("[INFO] {n} is {verdict}.")
}

pub fn range_lines(report: &ScanReport) -> Vec<String> {
    vec![
        format!(
            "Looking for primes between {} and {}:",
            report.lo, report.hi
        ),
        report.primes.iter().join(" "),
        format!(
            "Done. Found {} primes between {} and {}.",
            report.count(),
            report.lo,
            report.hi
        ),
    ]
}
