//! Implementation of ring ops using modular arithmetic.
//!
//! A [`RingContext`] only exists inside the closure passed to
//! [`RingContext::scoped`]. Each call introduces a fresh invariant lifetime
//! (the *brand*), and every [`ModElement`] carries the brand of the context that
//! built it, so elements of two different rings never type-check together.
//!
//! ```compile_fail
//! # use aks_prime::ring::RingContext;
//! RingContext::try_scoped(7, |mod7| {
//!     RingContext::try_scoped(11, |mod11| (mod7.one() + mod11.one()).value())
//! });
//! ```

use crate::errors::AksError;

use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroU64;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Invariant lifetime marker tying values to the scope that created them.
pub(crate) type Brand<'id> = PhantomData<fn(&'id ()) -> &'id ()>;

/// `floor(sqrt(u64::MAX))`. Two representatives at or below this bound
/// multiply without leaving the native word.
pub const SQRT_WORD_MAX: u64 = u32::MAX as u64;

/// Represents the finite ring Z_m using modular arithmetic.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RingContext<'id> {
    modulus: u64,
    _brand: Brand<'id>,
}

impl RingContext<'_> {
    /// Opens a ring with the given modulus and runs `f` inside it.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::num::NonZeroU64;
    /// # use aks_prime::ring::RingContext;
    /// let modulus = NonZeroU64::new(13).unwrap();
    /// let value = RingContext::scoped(modulus, |ring| (ring.element(9) * ring.element(3)).value());
    /// assert_eq!(value, 1);
    /// ```
    pub fn scoped<R>(modulus: NonZeroU64, f: impl for<'id> FnOnce(RingContext<'id>) -> R) -> R {
        f(RingContext {
            modulus: modulus.get(),
            _brand: PhantomData,
        })
    }

    /// Like [`RingContext::scoped`], but validates a plain modulus first.
    ///
    /// # Errors
    ///
    /// Returns `AksError::InvalidModulus` if `modulus` is zero.
    pub fn try_scoped<R>(
        modulus: u64,
        f: impl for<'id> FnOnce(RingContext<'id>) -> R,
    ) -> Result<R, AksError> {
        let Some(modulus) = NonZeroU64::new(modulus) else {
            return Err(AksError::InvalidModulus(
                "Modulus must be positive, got 0".to_string(),
            ));
        };

        Ok(Self::scoped(modulus, f))
    }
}

impl<'id> RingContext<'id> {
    /// Returns the modulus of the ring.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Builds the residue class of `value`.
    pub fn element(&self, value: u64) -> ModElement<'id> {
        ModElement {
            value: self.normalize(value),
            ring: *self,
        }
    }

    /// Additive identity.
    pub fn zero(&self) -> ModElement<'id> {
        self.element(0)
    }

    /// Multiplicative identity. Equal to zero in the trivial ring Z_1.
    pub fn one(&self) -> ModElement<'id> {
        self.element(1)
    }

    /// Normalizes a value to be within the range `[0, modulus - 1]`.
    pub fn normalize(&self, value: u64) -> u64 {
        value % self.modulus
    }

    /// Computes `(a + b) mod modulus` without overflowing, even for moduli
    /// close to `u64::MAX`.
    pub fn add(&self, a: u64, b: u64) -> u64 {
        self.add_reduced(self.normalize(a), self.normalize(b))
    }

    /// Computes `(a - b) mod modulus` as `a + (-b)`.
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        self.add(a, self.neg(b))
    }

    /// Computes the additive inverse `-a mod modulus`.
    pub fn neg(&self, a: u64) -> u64 {
        let a_norm = self.normalize(a);
        if a_norm == 0 {
            return 0;
        }

        self.modulus - a_norm
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// Operands at or below [`SQRT_WORD_MAX`] multiply in `u64` directly.
    /// Anything larger is widened to `u128` before the reduction.
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        self.mul_reduced(self.normalize(a), self.normalize(b))
    }

    /// Computes `base^exp mod modulus` by square-and-multiply.
    pub fn pow(&self, base: u64, mut exp: u64) -> u64 {
        let mut result = self.normalize(1);
        let mut base = self.normalize(base);

        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul_reduced(result, base);
            }
            exp >>= 1;
            if exp > 0 {
                base = self.mul_reduced(base, base);
            }
        }

        result
    }

    // Both operands must already lie in [0, modulus).
    fn add_reduced(&self, a: u64, b: u64) -> u64 {
        let gap = self.modulus - b;
        if a >= gap { a - gap } else { a + b }
    }

    // Both operands must already lie in [0, modulus).
    fn mul_reduced(&self, a: u64, b: u64) -> u64 {
        if a <= SQRT_WORD_MAX && b <= SQRT_WORD_MAX {
            return (a * b) % self.modulus;
        }

        ((a as u128 * b as u128) % self.modulus as u128) as u64
    }
}

impl fmt::Display for RingContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z/{}Z", self.modulus)
    }
}

/// A residue class modulo the modulus of its [`RingContext`].
///
/// The representative is always reduced into `[0, modulus)`.
#[derive(Debug, Copy, Clone)]
pub struct ModElement<'id> {
    value: u64,
    ring: RingContext<'id>,
}

impl<'id> ModElement<'id> {
    /// The reduced representative.
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn ring(&self) -> RingContext<'id> {
        self.ring
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0
    }

    pub fn square(self) -> Self {
        self * self
    }

    /// Raises the element to `exp`; `exp == 0` yields the multiplicative identity.
    ///
    /// # Example
    ///
    /// ```
    /// # use aks_prime::ring::RingContext;
    /// RingContext::try_scoped(10, |ring| {
    ///     assert_eq!(ring.element(3).pow(4).value(), 1);
    ///     assert_eq!(ring.element(7).pow(0), ring.one());
    /// }).unwrap();
    /// ```
    pub fn pow(self, exp: u64) -> Self {
        self.ring.element(self.ring.pow(self.value, exp))
    }

    /// Multiplicative order: the smallest `e >= 1` with `self^e == 1`.
    ///
    /// Returns 0 for the additive identity. For non-units the powers never
    /// reach 1, so the search gives up once `e` passes the modulus and returns
    /// `modulus + 1`. That cap is a stopping rule, not an order.
    pub fn order(&self) -> u64 {
        if self.is_zero() {
            return 0;
        }

        let one = self.ring.one();
        let modulus = self.ring.modulus();

        let mut current = *self;
        for e in 1..=modulus {
            if current == one {
                return e;
            }
            current *= *self;
        }

        modulus.saturating_add(1)
    }
}

impl PartialEq for ModElement<'_> {
    fn eq(&self, other: &Self) -> bool {
        (*self - *other).is_zero()
    }
}

impl Eq for ModElement<'_> {}

impl<'id> Add for ModElement<'id> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        ModElement {
            value: self.ring.add_reduced(self.value, rhs.value),
            ring: self.ring,
        }
    }
}

impl<'id> Sub for ModElement<'id> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        ModElement {
            value: self.ring.add_reduced(self.value, self.ring.neg(rhs.value)),
            ring: self.ring,
        }
    }
}

impl<'id> Mul for ModElement<'id> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        ModElement {
            value: self.ring.mul_reduced(self.value, rhs.value),
            ring: self.ring,
        }
    }
}

impl<'id> Neg for ModElement<'id> {
    type Output = Self;

    fn neg(self) -> Self {
        ModElement {
            value: self.ring.neg(self.value),
            ring: self.ring,
        }
    }
}

impl AddAssign for ModElement<'_> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for ModElement<'_> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for ModElement<'_> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// `{}` prints the representative, `{:#}` appends the modulus.
impl fmt::Display for ModElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{} (mod {})", self.value, self.ring.modulus())
        } else {
            write!(f, "{}", self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2^64 - 59, the largest prime below 2^64.
    const BIG_PRIME: u64 = u64::MAX - 58;

    #[test]
    fn test_ring_creation() {
        assert!(RingContext::try_scoped(11, |ring| ring.modulus()).is_ok());
        assert!(RingContext::try_scoped(1, |ring| ring.modulus()).is_ok());
        assert!(RingContext::try_scoped(0, |ring| ring.modulus()).is_err());
    }

    #[test]
    fn test_element_normalization() -> Result<(), AksError> {
        RingContext::try_scoped(11, |ring| {
            assert_eq!(ring.element(5).value(), 5);
            assert_eq!(ring.element(16).value(), 5);
            assert_eq!(ring.element(11).value(), 0);
            assert_eq!(ring.normalize(u64::MAX), u64::MAX % 11);
        })
    }

    #[test]
    fn test_addition() -> Result<(), AksError> {
        RingContext::try_scoped(11, |ring| {
            assert_eq!(ring.add(5, 8), 2);
            assert_eq!(ring.add(10, 0), 10);
            assert_eq!((ring.element(7) + ring.element(4)).value(), 0);
        })
    }

    #[test]
    fn test_subtraction() -> Result<(), AksError> {
        RingContext::try_scoped(11, |ring| {
            assert_eq!(ring.sub(5, 8), 8);
            assert_eq!(ring.sub(8, 5), 3);
            assert_eq!(ring.sub(0, 0), 0);
            assert_eq!((ring.element(0) - ring.element(1)).value(), 10);
        })
    }

    #[test]
    fn test_multiplication() -> Result<(), AksError> {
        RingContext::try_scoped(11, |ring| {
            assert_eq!(ring.mul(5, 8), 7);
            assert_eq!(ring.mul(10, 10), 1);
            assert_eq!((ring.element(3) * ring.element(4)).value(), 1);
        })
    }

    #[test]
    fn test_negation() -> Result<(), AksError> {
        RingContext::try_scoped(11, |ring| {
            assert_eq!(ring.neg(5), 6);
            assert_eq!(ring.neg(0), 0);
            assert_eq!(-ring.element(1), ring.element(10));
            assert_eq!(ring.element(4) + -ring.element(4), ring.zero());
        })
    }

    #[test]
    fn test_word_sized_modulus() -> Result<(), AksError> {
        RingContext::try_scoped(BIG_PRIME, |ring| {
            let minus_one = ring.element(BIG_PRIME - 1);
            let minus_two = ring.element(BIG_PRIME - 2);

            assert_eq!((minus_one + minus_two).value(), BIG_PRIME - 3);
            assert_eq!((minus_one * minus_two).value(), 2);
            assert_eq!((ring.one() - minus_one).value(), 2);
            assert_eq!(minus_one.square(), ring.one());
            // Fermat: a^(p-1) == 1
            assert_eq!(ring.element(123_456_789).pow(BIG_PRIME - 1), ring.one());
        })
    }

    #[test]
    fn test_max_modulus_addition_does_not_overflow() -> Result<(), AksError> {
        RingContext::try_scoped(u64::MAX, |ring| {
            assert_eq!(ring.add(u64::MAX - 1, u64::MAX - 1), u64::MAX - 2);
            assert_eq!(ring.sub(0, u64::MAX - 1), 1);
        })
    }

    #[test]
    fn test_pow() -> Result<(), AksError> {
        RingContext::try_scoped(13, |ring| {
            let two = ring.element(2);
            assert_eq!(two.pow(0), ring.one());
            assert_eq!(two.pow(1), two);
            assert_eq!(two.pow(12), ring.one());
            assert_eq!(two.pow(5).value(), 6);
        })
    }

    #[test]
    fn test_pow_in_trivial_ring() -> Result<(), AksError> {
        RingContext::try_scoped(1, |ring| {
            assert!(ring.element(5).pow(0).is_zero());
            assert_eq!(ring.one(), ring.zero());
        })
    }

    #[test]
    fn test_order() -> Result<(), AksError> {
        RingContext::try_scoped(7, |ring| {
            assert_eq!(ring.zero().order(), 0);
            assert_eq!(ring.one().order(), 1);
            assert_eq!(ring.element(6).order(), 2);
            assert_eq!(ring.element(2).order(), 3);
            assert_eq!(ring.element(3).order(), 6);
        })
    }

    #[test]
    fn test_order_of_non_unit_hits_cap() -> Result<(), AksError> {
        RingContext::try_scoped(12, |ring| {
            assert_eq!(ring.element(4).order(), 13);
            assert_eq!(ring.element(6).order(), 13);
            assert_eq!(ring.element(5).order(), 2);
        })
    }

    #[test]
    fn test_order_in_trivial_ring() -> Result<(), AksError> {
        RingContext::try_scoped(1, |ring| assert_eq!(ring.element(9).order(), 0))
    }

    #[test]
    fn test_display() -> Result<(), AksError> {
        RingContext::try_scoped(10, |ring| {
            assert_eq!(ring.to_string(), "Z/10Z");
            assert_eq!(ring.element(13).to_string(), "3");
            assert_eq!(format!("{:#}", ring.element(13)), "3 (mod 10)");
        })
    }
}
