//! Claimant module - one party to a garment dispute

use crate::traits::Claimant;
use crate::{DisputeError, ExactFraction};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a claimant within one dispute
///
/// Identifiers are 1-based positions in the claim list after it has been
/// sorted from largest to smallest claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimantId(usize);

impl ClaimantId {
    /// Create an identifier from a 1-based position
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    /// Get the raw position
    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ClaimantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A claimant in a garment dispute
///
/// The claim is fixed at creation. The concession starts at `1 - claim` and
/// only shrinks; the collected amount starts at 0 and only grows, never past
/// the claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GarmentClaimant {
    id: ClaimantId,
    claim: ExactFraction,
    concession: ExactFraction,
    collected: ExactFraction,
}

impl GarmentClaimant {
    /// Create a claimant with its concession implied by the claim
    pub fn new(id: ClaimantId, claim: ExactFraction) -> Self {
        let concession = claim.complement();
        Self {
            id,
            claim,
            concession,
            collected: ExactFraction::zero(),
        }
    }
}

impl Claimant for GarmentClaimant {
    fn id(&self) -> ClaimantId {
        self.id
    }

    fn claim(&self) -> &ExactFraction {
        &self.claim
    }

    fn concession(&self) -> &ExactFraction {
        &self.concession
    }

    fn collected(&self) -> &ExactFraction {
        &self.collected
    }

    fn collect(&mut self, amount: &ExactFraction) -> Result<(), DisputeError> {
        let exceeds = || DisputeError::AllocationExceedsClaim {
            claimant: self.id,
            amount: amount.to_string(),
            collected: self.collected.to_string(),
            claim: self.claim.to_string(),
        };

        // A sum above 1 is necessarily above the claim too
        let collected = self.collected.checked_add(amount).map_err(|_| exceeds())?;
        if collected > self.claim {
            return Err(exceeds());
        }

        self.collected = collected;
        Ok(())
    }

    fn concede(&mut self, amount: &ExactFraction) -> Result<(), DisputeError> {
        if amount > &self.concession {
            return Err(DisputeError::ConcessionExceedsRemaining {
                claimant: self.id,
                amount: amount.to_string(),
                remaining: self.concession.to_string(),
            });
        }

        self.concession = self.concession.checked_sub(amount)?;
        Ok(())
    }
}

impl fmt::Display for GarmentClaimant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Claimant {} with claim {} (collected {})",
            self.id, self.claim, self.collected
        )
    }
}
