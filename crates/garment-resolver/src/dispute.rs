//! Dispute state and the round-by-round mechanics of concession resolution

use crate::distribution::Distribution;
use crate::resolver::{Allocation, Resolution};
use garment_domain::traits::{Claimant, DisputedResource};
use garment_domain::{ClaimantId, DisputeError, ExactFraction, Garment, GarmentClaimant};
use serde::Serialize;

/// What one round of concession resolution did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundRecord {
    /// 1-based round number
    pub round: usize,
    /// The smallest outstanding concession, resolved this round
    pub concession: ExactFraction,
    /// Share of the concession per claimant other than the conceder
    pub full_share: ExactFraction,
    /// Share kept by each partial claimant
    pub partial_share: ExactFraction,
    /// Full claimants when the round started
    pub fulls_before: usize,
    /// Partial claimants when the round started
    pub partials_before: usize,
    /// Amount of the garment handed out this round
    pub allocated: ExactFraction,
    /// Claimants whose concession reached zero this round
    pub promoted: Vec<ClaimantId>,
    /// Unallocated garment after the round
    pub remainder: ExactFraction,
}

/// The even split of whatever the rounds left unallocated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemainderSplit {
    /// Garment left after the last round
    pub remainder: ExactFraction,
    /// `remainder / N`, credited to every claimant
    pub share: ExactFraction,
}

/// A garment dispute in progress
///
/// Claimants are sorted by claim, largest first, and numbered from 1 in that
/// order. They live in exactly one of two groups: partial (concession still
/// outstanding) or full (concession resolved). A claimant moves from partial
/// to full at most once.
#[derive(Debug, Clone)]
pub struct Dispute {
    garment: Garment,
    partial: Vec<GarmentClaimant>,
    full: Vec<GarmentClaimant>,
    claimant_count: usize,
    rounds: usize,
}

impl Dispute {
    /// Set up a dispute over the given claims
    ///
    /// # Errors
    /// [`DisputeError::NoClaimants`] for an empty claim list
    pub fn new(claims: &[ExactFraction]) -> Result<Self, DisputeError> {
        if claims.is_empty() {
            return Err(DisputeError::NoClaimants);
        }

        let mut sorted = claims.to_vec();
        sorted.sort_by(|a, b| b.cmp(a));

        let (partial, full): (Vec<_>, Vec<_>) = sorted
            .into_iter()
            .enumerate()
            .map(|(i, claim)| GarmentClaimant::new(ClaimantId::new(i + 1), claim))
            .partition(|claimant| claimant.is_partial());

        Ok(Self {
            garment: Garment::new(),
            partial,
            full,
            claimant_count: claims.len(),
            rounds: 0,
        })
    }

    /// Number of claimants, fixed for the life of the dispute
    pub fn claimant_count(&self) -> usize {
        self.claimant_count
    }

    /// Rounds resolved so far
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Unallocated part of the garment
    pub fn remainder(&self) -> &ExactFraction {
        self.garment.remainder()
    }

    /// Claimants with concession still outstanding, largest claim first
    pub fn partial_claimants(&self) -> &[GarmentClaimant] {
        &self.partial
    }

    /// Claimants whose concession is resolved, in promotion order
    pub fn full_claimants(&self) -> &[GarmentClaimant] {
        &self.full
    }

    /// All claimants ordered by identifier
    pub fn claimants(&self) -> Vec<&GarmentClaimant> {
        let mut all: Vec<_> = self.full.iter().chain(self.partial.iter()).collect();
        all.sort_by_key(|claimant| claimant.id());
        all
    }

    /// True once no concession is outstanding
    pub fn is_settled(&self) -> bool {
        self.partial.is_empty()
    }

    /// The smallest outstanding concession, if any claimant is still partial
    pub fn lowest_concession(&self) -> Option<&ExactFraction> {
        self.partial.iter().map(|claimant| claimant.concession()).min()
    }

    /// Give every claimant exactly their claim
    ///
    /// Only valid when the claims sum to at most 1; otherwise the garment
    /// runs out and this fails with [`DisputeError::InsufficientRemainder`].
    pub fn award_claims(&mut self) -> Result<(), DisputeError> {
        for claimant in self.full.iter_mut().chain(self.partial.iter_mut()) {
            let claim = claimant.claim().clone();
            self.garment.allocate(&claim)?;
            claimant.collect(&claim)?;
        }
        Ok(())
    }

    /// Resolve the smallest outstanding concession
    ///
    /// Returns `None` once every claimant is full. Claimants sharing the
    /// smallest concession are all promoted in the same round.
    pub fn resolve_round(&mut self) -> Result<Option<RoundRecord>, DisputeError> {
        let Some(concession) = self.lowest_concession().cloned() else {
            return Ok(None);
        };

        let fulls_before = self.full.len();
        let partials_before = self.partial.len();
        let distribution = Distribution::new(concession, fulls_before, partials_before)?;

        let allocated = distribution.total()?;
        self.garment.allocate(&allocated)?;

        for claimant in &mut self.partial {
            claimant.concede(&distribution.concession)?;
        }
        if !self.full.is_empty() {
            let for_fulls = distribution.for_fulls()?;
            for claimant in &mut self.full {
                claimant.collect(&for_fulls)?;
            }
        }
        for claimant in &mut self.partial {
            claimant.collect(&distribution.partial_share)?;
        }

        let promoted = self.promote_resolved();
        self.rounds += 1;

        Ok(Some(RoundRecord {
            round: self.rounds,
            concession: distribution.concession,
            full_share: distribution.full_share,
            partial_share: distribution.partial_share,
            fulls_before,
            partials_before,
            allocated,
            promoted,
            remainder: self.garment.remainder().clone(),
        }))
    }

    /// Move every claimant whose concession reached zero into the full group
    fn promote_resolved(&mut self) -> Vec<ClaimantId> {
        let (still_partial, resolved): (Vec<_>, Vec<_>) = std::mem::take(&mut self.partial)
            .into_iter()
            .partition(|claimant| claimant.is_partial());

        self.partial = still_partial;
        let promoted = resolved.iter().map(|claimant| claimant.id()).collect();
        self.full.extend(resolved);
        promoted
    }

    /// Split the unallocated remainder evenly across all claimants
    pub fn split_remainder(&mut self) -> Result<RemainderSplit, DisputeError> {
        let remainder = self.garment.remainder().clone();
        let share = remainder.checked_div_int(self.claimant_count)?;

        self.garment.allocate(&remainder)?;
        for claimant in self.full.iter_mut().chain(self.partial.iter_mut()) {
            claimant.collect(&share)?;
        }

        Ok(RemainderSplit { remainder, share })
    }

    /// Final allocations, ordered by identifier
    pub fn into_resolution(self, disputed: bool) -> Resolution {
        let rounds = self.rounds;
        let mut claimants: Vec<_> = self.full.into_iter().chain(self.partial).collect();
        claimants.sort_by_key(|claimant| claimant.id());

        let allocations = claimants
            .into_iter()
            .map(|claimant| Allocation {
                id: claimant.id(),
                claim: claimant.claim().clone(),
                allocation: claimant.collected().clone(),
            })
            .collect();

        Resolution {
            allocations,
            rounds,
            disputed,
        }
    }
}
