//! Error taxonomy for fractions and dispute bookkeeping

use crate::ClaimantId;
use thiserror::Error;

/// Errors produced while constructing or combining fractions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FractionError {
    /// The value falls outside the closed interval [0, 1]
    #[error("Invalid fraction {value}. Must be within [0, 1]")]
    OutOfRange {
        /// The offending value, rendered as `n/d`
        value: String,
    },

    /// A zero divisor or denominator
    #[error("Cannot divide by zero")]
    DivideByZero,

    /// Text that is not a fraction, integer, or decimal literal
    #[error("Cannot parse '{0}' as a fraction")]
    Parse(String),

    /// NaN or an infinite float
    #[error("Non-finite value cannot be represented as a fraction")]
    NotFinite,
}

/// Errors raised while resolving a dispute
///
/// Apart from [`DisputeError::Fraction`] and [`DisputeError::NoClaimants`],
/// these signal a breach of the conservation law inside the resolution
/// algorithm and are always fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisputeError {
    /// Range or division failure in fraction arithmetic
    #[error(transparent)]
    Fraction(#[from] FractionError),

    /// A claimant would end up holding more than they claimed
    #[error("Claimant {claimant} cannot collect {amount}: already collected {collected} of a {claim} claim")]
    AllocationExceedsClaim {
        /// Claimant that attempted to collect
        claimant: ClaimantId,
        /// Amount offered
        amount: String,
        /// Amount already collected
        collected: String,
        /// The claimant's claim
        claim: String,
    },

    /// A claimant would concede more than they have left to concede
    #[error("Claimant {claimant} cannot concede {amount}: only {remaining} remains")]
    ConcessionExceedsRemaining {
        /// Claimant that attempted to concede
        claimant: ClaimantId,
        /// Amount requested
        amount: String,
        /// Outstanding concession
        remaining: String,
    },

    /// The garment cannot hand out more than its unallocated remainder
    #[error("Cannot allocate {amount}: only {remainder} of the garment remains")]
    InsufficientRemainder {
        /// Amount requested
        amount: String,
        /// Unallocated remainder
        remainder: String,
    },

    /// A dispute needs at least one claim
    #[error("A dispute requires at least one claimant")]
    NoClaimants,

    /// Final allocations of a contested garment did not sum to exactly 1
    #[error("Allocations sum to {total}, expected exactly 1")]
    ConservationViolated {
        /// The actual total, rendered as `n/d`
        total: String,
    },
}
