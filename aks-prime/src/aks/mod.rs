//! # AKS primality test
//!
//! A decision runs seven gates in a fixed order. Each gate either settles the
//! verdict or falls through to the next:
//!
//! 1. `n <= 1` is composite.
//! 2. Perfect powers are composite.
//! 3. Find the smallest `r` whose order check of `n` mod `r` exceeds
//!    `floor((log2 n)^2)`.
//! 4. A nontrivial `gcd(a, n)` for some `a` in `[2, r]` proves `n` composite.
//! 5. `n <= r` is prime.
//! 6. For every `a` in `[1, floor(sqrt(phi(r)) * log2 n)]`, check
//!    `(a + x)^n == a + x^(n mod r)` in (Z/nZ)[x]/(x^r - 1). A mismatch proves
//!    `n` composite.
//! 7. Otherwise `n` is prime.
//!
//! Every context a decision opens is local to it, so independent decisions can
//! run on as many threads as the caller likes.

pub mod cancel;
pub mod events;
pub mod params;
pub mod verdict;

pub use cancel::CancelToken;
pub use events::{AksEvent, AksObserver, LogObserver};
pub use params::AksParameters;
pub use verdict::{CompositeReason, Verdict};

use crate::aks::cancel::checkpoint;
use crate::aks::params::{find_r, small_factor, witness_bound};
use crate::errors::AksError;
use crate::ring::{PolyContext, euler_phi, is_perfect_power};

/// Decides whether `n` is prime.
///
/// # Example
///
/// ```
/// # use aks_prime::aks::is_prime;
/// assert!(is_prime(97));
/// assert!(!is_prime(561));
/// ```
pub fn is_prime(n: u64) -> bool {
    matches!(decide(n, &mut ()), Ok(Verdict::Prime))
}

/// Runs all gates for `n`, reporting progress to `observer`.
pub fn decide(n: u64, observer: &mut dyn AksObserver) -> Result<Verdict, AksError> {
    Decision {
        n,
        observer,
        cancel: None,
    }
    .run()
}

/// Like [`decide`], but stops with `AksError::Cancelled` once `cancel` is set.
pub fn decide_with_cancel(
    n: u64,
    observer: &mut dyn AksObserver,
    cancel: &CancelToken,
) -> Result<Verdict, AksError> {
    Decision {
        n,
        observer,
        cancel: Some(cancel),
    }
    .run()
}

struct Decision<'a> {
    n: u64,
    observer: &'a mut dyn AksObserver,
    cancel: Option<&'a CancelToken>,
}

impl Decision<'_> {
    fn run(mut self) -> Result<Verdict, AksError> {
        let verdict = self.gates()?;
        log::trace!("decided n={} verdict={:?}", self.n, verdict);
        self.emit(AksEvent::Decided { n: self.n, verdict });

        Ok(verdict)
    }

    fn emit(&mut self, event: AksEvent) {
        self.observer.on_event(&event);
    }

    fn gates(&mut self) -> Result<Verdict, AksError> {
        let n = self.n;

        if n <= 1 {
            return Ok(Verdict::Composite(CompositeReason::TooSmall));
        }

        if is_perfect_power(n) {
            return Ok(Verdict::Composite(CompositeReason::PerfectPower));
        }
        self.emit(AksEvent::NotPerfectPower { n });

        let (r, order) = find_r(n, self.cancel)?;
        self.emit(AksEvent::OrderFound { n, r, order });

        if let Some(factor) = small_factor(n, r) {
            return Ok(Verdict::Composite(CompositeReason::SmallFactor { factor }));
        }
        self.emit(AksEvent::SmallFactorsCleared { n, r });

        if n <= r {
            return Ok(Verdict::Prime);
        }
        self.emit(AksEvent::ExceedsOrder { n, r });

        let bound = witness_bound(n, euler_phi(r));
        self.emit(AksEvent::WitnessBound { n, bound });

        match self.polynomial_witness(r, bound)? {
            Some(witness) => Ok(Verdict::Composite(
                CompositeReason::PolynomialMismatch { witness },
            )),
            None => Ok(Verdict::Prime),
        }
    }

    /// First `a` in `1..=bound` breaking `(a + x)^n == a + x^(n mod r)`.
    fn polynomial_witness(&mut self, r: u64, bound: u64) -> Result<Option<u64>, AksError> {
        let n = self.n;
        let width = usize::try_from(r)
            .map_err(|_| AksError::InvalidWidth(format!("r={r} does not fit in usize")))?;

        PolyContext::try_scoped(n, width, |ctx| -> Result<Option<u64>, AksError> {
            let ring = ctx.ring();
            let x_to_n = ctx.monomial(ring.one(), (n % r) as usize);

            for a in 1..=bound {
                checkpoint(self.cancel)?;

                let constant = ctx.sparse([(0, ring.element(a))]);
                let lhs = (&constant + &ctx.monomial(ring.one(), 1)).pow(n);
                let rhs = &constant + &x_to_n;
                if lhs != rhs {
                    return Ok(Some(a));
                }
                self.emit(AksEvent::WitnessPassed { n, a });
            }

            Ok(None)
        })?
    }
}
