//! Deterministic primality testing with the AKS algorithm on `u64`.
//!
//! ```
//! use aks_prime::aks::{decide, CompositeReason, Verdict};
//!
//! assert_eq!(decide(97, &mut ()).unwrap(), Verdict::Prime);
//! assert_eq!(
//!     decide(561, &mut ()).unwrap(),
//!     Verdict::Composite(CompositeReason::SmallFactor { factor: 3 })
//! );
//! ```

pub mod aks;
pub mod errors;
pub mod ring;
pub mod scan;

pub use aks::{Verdict, decide, is_prime};
pub use errors::AksError;
