//! Capability traits for dispute participants
//!
//! A claimant-like entity can collect and concede; a resource-like entity can
//! allocate. The resolver only mutates dispute state through these methods.

use crate::{ClaimantId, DisputeError, ExactFraction};

/// A party that asserts a fractional claim over a disputed resource
///
/// Implemented by [`crate::GarmentClaimant`]
pub trait Claimant {
    /// Stable identifier within the dispute
    fn id(&self) -> ClaimantId;

    /// The asserted claim, fixed at creation
    fn claim(&self) -> &ExactFraction;

    /// Concession still outstanding (starts at `1 - claim`)
    fn concession(&self) -> &ExactFraction;

    /// Total collected so far
    fn collected(&self) -> &ExactFraction;

    /// Receive part of the resource
    ///
    /// # Errors
    /// [`DisputeError::AllocationExceedsClaim`] if collected would exceed the claim
    fn collect(&mut self, amount: &ExactFraction) -> Result<(), DisputeError>;

    /// Mark part of the concession as resolved
    ///
    /// # Errors
    /// [`DisputeError::ConcessionExceedsRemaining`] if `amount` exceeds the concession
    fn concede(&mut self, amount: &ExactFraction) -> Result<(), DisputeError>;

    /// A claimant is partial while any concession is outstanding
    fn is_partial(&self) -> bool {
        !self.concession().is_zero()
    }
}

/// A divisible item whose unallocated remainder is tracked
///
/// Implemented by [`crate::Garment`]
pub trait DisputedResource {
    /// Fraction not yet allocated
    fn remainder(&self) -> &ExactFraction;

    /// Remove `amount` from the remainder
    ///
    /// # Errors
    /// [`DisputeError::InsufficientRemainder`] if `amount` exceeds the remainder
    fn allocate(&mut self, amount: &ExactFraction) -> Result<(), DisputeError>;
}
