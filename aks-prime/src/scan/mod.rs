//! Scanning an inclusive range of candidates.
//!
//! Each candidate gets its own decision with its own contexts, so
//! [`par_scan`] hands candidates straight to the rayon pool.

use crate::aks::{self, AksObserver, CancelToken};
use crate::errors::AksError;

use rayon::prelude::*;

use serde::{Deserialize, Serialize};

/// A validated inclusive range `[lo, hi]` with `0 < lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRange {
    lo: u64,
    hi: u64,
}

impl ScanRange {
    /// # Errors
    ///
    /// Returns `AksError::InvalidRange` unless `0 < lo < hi`.
    pub fn try_new(lo: u64, hi: u64) -> Result<Self, AksError> {
        if lo == 0 || lo >= hi {
            return Err(AksError::InvalidRange { lo, hi });
        }

        Ok(Self { lo, hi })
    }

    pub fn lo(&self) -> u64 {
        self.lo
    }

    pub fn hi(&self) -> u64 {
        self.hi
    }
}

/// Primes found in a [`ScanRange`], ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub lo: u64,
    pub hi: u64,
    pub primes: Vec<u64>,
}

impl ScanReport {
    pub fn count(&self) -> usize {
        self.primes.len()
    }

    pub fn to_json(&self) -> Result<String, AksError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Decides every candidate in order on the calling thread, forwarding each
/// decision's events to `observer`.
pub fn scan(range: ScanRange, observer: &mut dyn AksObserver) -> Result<ScanReport, AksError> {
    let mut primes = Vec::new();
    for n in range.lo..=range.hi {
        if aks::decide(n, observer)?.is_prime() {
            primes.push(n);
        }
    }

    Ok(ScanReport {
        lo: range.lo,
        hi: range.hi,
        primes,
    })
}

/// Decides candidates in parallel on the current rayon pool.
pub fn par_scan(range: ScanRange) -> Result<ScanReport, AksError> {
    par_scan_with_cancel(range, &CancelToken::new())
}

/// Like [`par_scan`], but every decision stops once `cancel` is set.
pub fn par_scan_with_cancel(
    range: ScanRange,
    cancel: &CancelToken,
) -> Result<ScanReport, AksError> {
    let primes = (range.lo..=range.hi)
        .into_par_iter()
        .filter_map(|n| match aks::decide_with_cancel(n, &mut (), cancel) {
            Ok(verdict) if verdict.is_prime() => Some(Ok(n)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<Result<Vec<u64>, AksError>>()?;

    log::debug!(
        "scanned [{}, {}]: {} primes",
        range.lo,
        range.hi,
        primes.len()
    );

    Ok(ScanReport {
        lo: range.lo,
        hi: range.hi,
        primes,
    })
}
