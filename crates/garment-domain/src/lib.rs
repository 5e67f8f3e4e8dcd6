//! Garment Domain Layer
//!
//! Value types for the contested-garment dispute: a single divisible resource
//! claimed by several parties whose fractional claims may sum to more than 1.
//!
//! ## Key Concepts
//!
//! - **ExactFraction**: exact rational confined to [0, 1]; leaving the range is an error
//! - **Claim**: the fraction of the garment a party asserts
//! - **Concession**: `1 - claim`, the part a claimant implicitly yields to the others
//! - **Garment**: the resource, tracking its unallocated remainder
//!
//! ## Architecture
//!
//! - Pure value types and bookkeeping only; the resolution algorithm lives in
//!   `garment-resolver`
//! - Mutation goes through the [`traits::Claimant`] and
//!   [`traits::DisputedResource`] capabilities

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claimant;
pub mod error;
pub mod fraction;
pub mod resource;
pub mod traits;

// Re-exports for convenience
pub use claimant::{ClaimantId, GarmentClaimant};
pub use error::{DisputeError, FractionError};
pub use fraction::ExactFraction;
pub use resource::Garment;
