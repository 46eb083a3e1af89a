use crate::aks::cancel::{CancelToken, checkpoint};
use crate::errors::AksError;
use crate::ring::{RingContext, euler_phi, gcd, is_perfect_power};

use serde::{Deserialize, Serialize};

/// Parameters a decision derives for a candidate `n`.
///
/// Recomputed per decision, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AksParameters {
    pub n: u64,
    /// Smallest `r >= 2` whose order check exceeds `order_bound(n)`.
    pub r: u64,
    /// Result of the order computation of `n` mod `r`.
    pub order: u64,
    pub phi_r: u64,
    /// Upper end of the polynomial witness range `1..=witness_bound`.
    pub witness_bound: u64,
}

impl AksParameters {
    /// Derives the parameters for `n`.
    ///
    /// Returns `Ok(None)` when the decision never reaches the order search,
    /// i.e. for `n <= 1` and for perfect powers.
    ///
    /// # Example
    ///
    /// ```
    /// # use aks_prime::aks::AksParameters;
    /// let params = AksParameters::derive(31).unwrap().unwrap();
    /// assert_eq!(params.r, 29);
    /// assert!(AksParameters::derive(32).unwrap().is_none());
    /// ```
    pub fn derive(n: u64) -> Result<Option<Self>, AksError> {
        if n <= 1 || is_perfect_power(n) {
            return Ok(None);
        }

        let (r, order) = find_r(n, None)?;
        let phi_r = euler_phi(r);

        Ok(Some(Self {
            n,
            r,
            order,
            phi_r,
            witness_bound: witness_bound(n, phi_r),
        }))
    }
}

/// `floor((log2 n)^2)`: the order of `n` mod `r` has to exceed this.
pub fn order_bound(n: u64) -> u64 {
    (n as f64).log2().powi(2).floor() as u64
}

/// `floor(sqrt(phi(r)) * log2 n)`.
pub fn witness_bound(n: u64, phi_r: u64) -> u64 {
    ((phi_r as f64).sqrt() * (n as f64).log2()).floor() as u64
}

/// Walks `r = 2, 3, ...` until the order of `n` mod `r` exceeds
/// [`order_bound`]. Returns `(r, order)`.
pub(crate) fn find_r(n: u64, cancel: Option<&CancelToken>) -> Result<(u64, u64), AksError> {
    let bound = order_bound(n);

    let mut r = 2;
    loop {
        checkpoint(cancel)?;

        let order = RingContext::try_scoped(r, |ring| ring.element(n).order())?;
        if order > bound {
            return Ok((r, order));
        }
        r += 1;
    }
}

/// First `gcd(a, n)` with `1 < gcd < n` for `a` in `[2, r]`.
pub(crate) fn small_factor(n: u64, r: u64) -> Option<u64> {
    (2..=r).map(|a| gcd(a, n)).find(|&g| 1 < g && g < n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_bound() {
        assert_eq!(order_bound(2), 1);
        assert_eq!(order_bound(3), 2);
        assert_eq!(order_bound(97), 43);
        assert_eq!(order_bound(1 << 10), 100);
    }

    #[test]
    fn test_witness_bound() {
        assert_eq!(witness_bound(1 << 10, 16), 40);
        assert_eq!(witness_bound(97, 0), 0);
    }

    #[test]
    fn test_find_r_small() -> Result<(), AksError> {
        // bound(2) = 1: 2 mod 2 = 0 has order 0, 2 mod 3 has order 2.
        assert_eq!(find_r(2, None)?, (3, 2));
        // bound(3) = 2: orders of 3 are 1, 0, 2 for r = 2, 3, 4 and 4 for r = 5.
        assert_eq!(find_r(3, None)?, (5, 4));
        Ok(())
    }

    #[test]
    fn test_find_r_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        assert!(matches!(find_r(97, Some(&token)), Err(AksError::Cancelled)));
    }

    #[test]
    fn test_small_factor() {
        assert_eq!(small_factor(561, 90), Some(3));
        assert_eq!(small_factor(97, 50), None);
        assert_eq!(small_factor(7, 10), None);
        assert_eq!(small_factor(35, 4), None);
        assert_eq!(small_factor(35, 5), Some(5));
    }

    #[test]
    fn test_derive() -> Result<(), AksError> {
        assert_eq!(AksParameters::derive(0)?, None);
        assert_eq!(AksParameters::derive(1)?, None);
        assert_eq!(AksParameters::derive(49)?, None);

        let Some(params) = AksParameters::derive(97)? else {
            panic!("97 should reach the order search");
        };
        assert!(params.order > order_bound(97));
        assert_eq!(params.phi_r, euler_phi(params.r));
        assert_eq!(params.witness_bound, witness_bound(97, params.phi_r));
        Ok(())
    }
}
