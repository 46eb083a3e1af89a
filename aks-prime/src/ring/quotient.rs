//! The quotient ring (Z/nZ)[x]/(x^r - 1).
//!
//! Polynomials are dense vectors of exactly `r` coefficients; `coeffs[i]` is
//! the coefficient of `x^i`. A [`PolyContext`] owns a freshly branded
//! coefficient ring, so every polynomial sharing a brand also shares the
//! modulus and the width.

use crate::errors::AksError;
use crate::ring::math::{ModElement, RingContext};

use itertools::Itertools;

use std::fmt;
use std::num::{NonZeroU64, NonZeroUsize};
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PolyContext<'id> {
    ring: RingContext<'id>,
    width: usize,
}

impl PolyContext<'_> {
    /// Opens (Z/`modulus`Z)[x]/(x^`width` - 1) and runs `f` inside it.
    pub fn scoped<R>(
        modulus: NonZeroU64,
        width: NonZeroUsize,
        f: impl for<'id> FnOnce(PolyContext<'id>) -> R,
    ) -> R {
        RingContext::scoped(modulus, |ring| {
            f(PolyContext {
                ring,
                width: width.get(),
            })
        })
    }

    /// # Errors
    ///
    /// Returns `AksError::InvalidModulus` for a zero modulus and
    /// `AksError::InvalidWidth` for a zero width.
    pub fn try_scoped<R>(
        modulus: u64,
        width: usize,
        f: impl for<'id> FnOnce(PolyContext<'id>) -> R,
    ) -> Result<R, AksError> {
        let Some(width) = NonZeroUsize::new(width) else {
            return Err(AksError::InvalidWidth(
                "Width must be positive, got 0".to_string(),
            ));
        };
        let Some(modulus) = NonZeroU64::new(modulus) else {
            return Err(AksError::InvalidModulus(
                "Modulus must be positive, got 0".to_string(),
            ));
        };

        Ok(Self::scoped(modulus, width, f))
    }
}

impl<'id> PolyContext<'id> {
    /// The coefficient ring.
    pub fn ring(&self) -> RingContext<'id> {
        self.ring
    }

    /// The exponent width `r`.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn zero(&self) -> Polynomial<'id> {
        Polynomial {
            coeffs: vec![self.ring.zero(); self.width],
            ctx: *self,
        }
    }

    pub fn one(&self) -> Polynomial<'id> {
        self.monomial(self.ring.one(), 0)
    }

    /// `coefficient * x^exponent`, with the exponent reduced mod `r`.
    pub fn monomial(&self, coefficient: ModElement<'id>, exponent: usize) -> Polynomial<'id> {
        self.sparse([(exponent, coefficient)])
    }

    /// Builds a polynomial from `(exponent, coefficient)` pairs.
    ///
    /// Unlisted exponents are zero. Exponents are reduced mod `r` (x^r = 1 in
    /// this ring) and coefficients landing on the same slot are summed.
    ///
    /// # Example
    ///
    /// ```
    /// # use aks_prime::ring::PolyContext;
    /// PolyContext::try_scoped(7, 3, |ctx| {
    ///     let ring = ctx.ring();
    ///     // 2 + x
    ///     let p = ctx.sparse([(0, ring.element(2)), (1, ring.one())]);
    ///     assert_eq!(p.coefficient(0).value(), 2);
    ///     assert_eq!(p.coefficient(2).value(), 0);
    ///     // x^4 == x when r = 3
    ///     assert_eq!(ctx.monomial(ring.one(), 4), ctx.monomial(ring.one(), 1));
    /// }).unwrap();
    /// ```
    pub fn sparse(
        &self,
        terms: impl IntoIterator<Item = (usize, ModElement<'id>)>,
    ) -> Polynomial<'id> {
        let mut poly = self.zero();
        for (exponent, coefficient) in terms {
            poly.coeffs[exponent % self.width] += coefficient;
        }
        poly
    }

    /// Builds a polynomial from a dense coefficient vector.
    ///
    /// # Errors
    ///
    /// Returns `AksError::WidthMismatch` unless `coeffs.len() == r`.
    pub fn from_coefficients(
        &self,
        coeffs: Vec<ModElement<'id>>,
    ) -> Result<Polynomial<'id>, AksError> {
        if coeffs.len() != self.width {
            return Err(AksError::WidthMismatch {
                expected: self.width,
                actual: coeffs.len(),
            });
        }

        Ok(Polynomial { coeffs, ctx: *self })
    }
}

/// An element of (Z/nZ)[x]/(x^r - 1).
#[derive(Debug, Clone)]
pub struct Polynomial<'id> {
    coeffs: Vec<ModElement<'id>>,
    ctx: PolyContext<'id>,
}

impl<'id> Polynomial<'id> {
    pub fn coefficients(&self) -> &[ModElement<'id>] {
        &self.coeffs
    }

    /// Coefficient of `x^(exponent mod r)`.
    pub fn coefficient(&self, exponent: usize) -> ModElement<'id> {
        self.coeffs[exponent % self.ctx.width]
    }

    pub fn context(&self) -> PolyContext<'id> {
        self.ctx
    }

    pub fn width(&self) -> usize {
        self.ctx.width
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(ModElement::is_zero)
    }

    /// Multiplies every coefficient by `scalar`.
    pub fn scale(&self, scalar: ModElement<'id>) -> Self {
        Polynomial {
            coeffs: self.coeffs.iter().map(|&c| c * scalar).collect(),
            ctx: self.ctx,
        }
    }

    /// Additive inverse, i.e. the polynomial scaled by -1.
    pub fn negated(&self) -> Self {
        self.scale(-self.ctx.ring.one())
    }

    /// `self * self` by a rotating accumulator.
    ///
    /// For each coefficient `c_i` the whole coefficient vector, scaled by
    /// `c_i`, is added to the accumulator, which is then rotated left by one.
    /// After `r` rounds the term added in round `i` has moved right by `i`
    /// slots, so slot `k` holds `sum_i c_i * c_(k - i)`: the convolution.
    pub fn square(&self) -> Self {
        let mut acc = vec![self.ctx.ring.zero(); self.ctx.width];

        for &scalar in &self.coeffs {
            if !scalar.is_zero() {
                for (slot, &c) in acc.iter_mut().zip(&self.coeffs) {
                    *slot += scalar * c;
                }
            }
            acc.rotate_left(1);
        }

        Polynomial {
            coeffs: acc,
            ctx: self.ctx,
        }
    }

    /// Raises the polynomial to `exp` by square-and-multiply.
    ///
    /// `exp == 0` yields the multiplicative identity. O(r^2 log exp).
    pub fn pow(&self, mut exp: u64) -> Self {
        let mut result = self.ctx.one();
        let mut base = self.clone();

        while exp > 0 {
            if exp & 1 == 1 {
                result = &result * &base;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.square();
            }
        }

        result
    }
}

impl PartialEq for Polynomial<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.coeffs == other.coeffs
    }
}

impl Eq for Polynomial<'_> {}

impl<'id> Add for &Polynomial<'id> {
    type Output = Polynomial<'id>;

    fn add(self, rhs: Self) -> Polynomial<'id> {
        Polynomial {
            coeffs: self
                .coeffs
                .iter()
                .zip(&rhs.coeffs)
                .map(|(&a, &b)| a + b)
                .collect(),
            ctx: self.ctx,
        }
    }
}

impl<'id> Sub for &Polynomial<'id> {
    type Output = Polynomial<'id>;

    fn sub(self, rhs: Self) -> Polynomial<'id> {
        Polynomial {
            coeffs: self
                .coeffs
                .iter()
                .zip(&rhs.coeffs)
                .map(|(&a, &b)| a - b)
                .collect(),
            ctx: self.ctx,
        }
    }
}

/// Full convolution: `result[(i + j) mod r] += lhs[i] * rhs[j]`.
impl<'id> Mul for &Polynomial<'id> {
    type Output = Polynomial<'id>;

    fn mul(self, rhs: Self) -> Polynomial<'id> {
        let width = self.ctx.width;
        let mut out = self.ctx.zero();

        for (i, &lhs_c) in self.coeffs.iter().enumerate() {
            if lhs_c.is_zero() {
                continue;
            }
            for (j, &rhs_c) in rhs.coeffs.iter().enumerate() {
                out.coeffs[(i + j) % width] += lhs_c * rhs_c;
            }
        }

        out
    }
}

impl<'id> Neg for &Polynomial<'id> {
    type Output = Polynomial<'id>;

    fn neg(self) -> Polynomial<'id> {
        self.negated()
    }
}

impl<'id> Add for Polynomial<'id> {
    type Output = Polynomial<'id>;

    fn add(self, rhs: Self) -> Polynomial<'id> {
        &self + &rhs
    }
}

impl<'id> Sub for Polynomial<'id> {
    type Output = Polynomial<'id>;

    fn sub(self, rhs: Self) -> Polynomial<'id> {
        &self - &rhs
    }
}

impl<'id> Mul for Polynomial<'id> {
    type Output = Polynomial<'id>;

    fn mul(self, rhs: Self) -> Polynomial<'id> {
        &self * &rhs
    }
}

/// Non-zero terms as `c*x^i`, lowest exponent first; `0` for the zero polynomial.
impl fmt::Display for Polynomial<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let terms = self
            .coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, c)| match i {
                0 => format!("{c}"),
                1 => format!("{c}*x"),
                _ => format!("{c}*x^{i}"),
            })
            .join(" + ");

        write!(f, "{terms}")
    }
}
