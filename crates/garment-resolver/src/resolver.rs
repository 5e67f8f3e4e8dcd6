//! Concession resolver
//!
//! Drives a [`Dispute`] from setup to settlement:
//! 1. Claims summing to at most 1 are awarded in full
//! 2. Otherwise concessions are resolved smallest first, one round each
//! 3. Whatever the rounds leave is split evenly across all claimants
//! 4. The final allocations are checked to sum to exactly 1

use crate::config::ResolverConfig;
use crate::dispute::Dispute;
use crate::observer::{ResolutionObserver, TracingObserver};
use garment_domain::{ClaimantId, DisputeError, ExactFraction};
use num::{BigRational, One};
use serde::Serialize;

/// One claimant's outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    /// 1-based position in descending-claim order
    pub id: ClaimantId,
    /// What the claimant asked for
    pub claim: ExactFraction,
    /// What the claimant received
    pub allocation: ExactFraction,
}

/// Result of resolving a dispute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Outcomes ordered by identifier
    pub allocations: Vec<Allocation>,
    /// Concession rounds it took
    pub rounds: usize,
    /// Whether the claims exceeded the garment
    pub disputed: bool,
}

impl Resolution {
    /// Sum of all allocations
    ///
    /// Returned as an unbounded rational so an over-allocation shows up
    /// as a value rather than an error.
    pub fn total(&self) -> BigRational {
        self.allocations
            .iter()
            .map(|allocation| allocation.allocation.as_ratio())
            .sum()
    }

    /// Allocated amounts alone, in identifier order
    pub fn amounts(&self) -> Vec<ExactFraction> {
        self.allocations
            .iter()
            .map(|allocation| allocation.allocation.clone())
            .collect()
    }
}

/// Resolves garment disputes by successive concession
#[derive(Debug, Clone, Default)]
pub struct ConcessionResolver {
    config: ResolverConfig,
}

impl ConcessionResolver {
    /// Create a resolver with the given configuration
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Create a resolver with the default configuration
    pub fn default_config() -> Self {
        Self::new(ResolverConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a dispute, logging progress through `tracing`
    ///
    /// # Examples
    ///
    /// ```
    /// use garment_domain::ExactFraction;
    /// use garment_resolver::ConcessionResolver;
    ///
    /// let claims = vec![ExactFraction::one(), ExactFraction::new(1, 2).unwrap()];
    /// let resolution = ConcessionResolver::default_config().resolve(&claims).unwrap();
    ///
    /// assert_eq!(resolution.allocations[0].allocation, ExactFraction::new(3, 4).unwrap());
    /// assert_eq!(resolution.allocations[1].allocation, ExactFraction::new(1, 4).unwrap());
    /// ```
    pub fn resolve(&self, claims: &[ExactFraction]) -> Result<Resolution, DisputeError> {
        self.resolve_observed(claims, &mut TracingObserver)
    }

    /// Resolve a dispute, reporting every step to `observer`
    ///
    /// # Errors
    /// - [`DisputeError::NoClaimants`] for an empty claim list
    /// - [`DisputeError::Fraction`] when a round's shares leave [0, 1]
    /// - [`DisputeError::InsufficientRemainder`] when a round would hand out
    ///   more garment than is left
    /// - [`DisputeError::AllocationExceedsClaim`] when a claimant would be
    ///   credited beyond its claim
    /// - [`DisputeError::ConservationViolated`] when verification is on and
    ///   a contested garment is not fully distributed
    pub fn resolve_observed<O>(
        &self,
        claims: &[ExactFraction],
        observer: &mut O,
    ) -> Result<Resolution, DisputeError>
    where
        O: ResolutionObserver + ?Sized,
    {
        let mut dispute = Dispute::new(claims)?;

        let claimed: BigRational = claims.iter().map(ExactFraction::as_ratio).sum();
        let disputed = claimed > BigRational::one();
        observer.dispute_opened(&dispute, disputed);

        if disputed {
            while let Some(record) = dispute.resolve_round()? {
                observer.round_resolved(&record);
            }
            let split = dispute.split_remainder()?;
            observer.remainder_split(&split);
        } else {
            dispute.award_claims()?;
        }

        let resolution = dispute.into_resolution(disputed);

        if disputed && self.config.verify_conservation {
            let total = resolution.total();
            if !total.is_one() {
                return Err(DisputeError::ConservationViolated {
                    total: total.to_string(),
                });
            }
        }

        observer.dispute_settled(&resolution);
        Ok(resolution)
    }
}

/// Resolve a dispute with the default resolver and return only the allocations
pub fn resolve(claims: &[ExactFraction]) -> Result<Vec<Allocation>, DisputeError> {
    ConcessionResolver::default_config()
        .resolve(claims)
        .map(|resolution| resolution.allocations)
}
