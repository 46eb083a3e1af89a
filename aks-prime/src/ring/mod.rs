//! # Ring Module
//!
//! Provides [`RingContext`] / [`ModElement`] for the finite ring Z_m, the
//! quotient ring (Z/nZ)[x]/(x^r - 1) built on top of it, and the
//! number-theoretic helpers the AKS test needs.

pub mod helper;
pub mod math;
pub mod quotient;

pub use helper::{euler_phi, gcd, is_coprime, is_perfect_power};
pub use math::{ModElement, RingContext};
pub use quotient::{PolyContext, Polynomial};
