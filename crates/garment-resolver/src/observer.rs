//! Observers for the resolution side-channel
//!
//! The resolver reports each step to a [`ResolutionObserver`]. Observers only
//! watch: nothing they do feeds back into the allocation.

use crate::dispute::{Dispute, RemainderSplit, RoundRecord};
use crate::resolver::Resolution;
use garment_domain::traits::Claimant;
use garment_domain::ExactFraction;
use serde::Serialize;

/// Receives resolution events as they happen
///
/// All methods default to doing nothing.
pub trait ResolutionObserver {
    /// The dispute has been set up; `disputed` is false when the claims fit
    fn dispute_opened(&mut self, _dispute: &Dispute, _disputed: bool) {}

    /// One concession round finished
    fn round_resolved(&mut self, _record: &RoundRecord) {}

    /// The leftover garment was split evenly
    fn remainder_split(&mut self, _split: &RemainderSplit) {}

    /// Final allocations are ready
    fn dispute_settled(&mut self, _resolution: &Resolution) {}
}

/// Ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ResolutionObserver for NoopObserver {}

/// Emits every event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ResolutionObserver for TracingObserver {
    fn dispute_opened(&mut self, dispute: &Dispute, disputed: bool) {
        for claimant in dispute.claimants() {
            tracing::debug!("Creating claimant {} with claim {}", claimant.id(), claimant.claim());
        }
        tracing::info!(
            claimants = dispute.claimant_count(),
            full = dispute.full_claimants().len(),
            disputed,
            "Dispute setup complete"
        );
    }

    fn round_resolved(&mut self, record: &RoundRecord) {
        tracing::info!(
            round = record.round,
            concession = %record.concession,
            full_share = %record.full_share,
            partial_share = %record.partial_share,
            allocated = %record.allocated,
            remainder = %record.remainder,
            "Resolved concession"
        );
        if !record.promoted.is_empty() {
            let ids: Vec<String> = record.promoted.iter().map(|id| id.to_string()).collect();
            tracing::debug!("Claimants {} are now full", ids.join(", "));
        }
    }

    fn remainder_split(&mut self, split: &RemainderSplit) {
        tracing::info!(
            "Splitting remainder {} evenly: {} each",
            split.remainder,
            split.share
        );
    }

    fn dispute_settled(&mut self, resolution: &Resolution) {
        for allocation in &resolution.allocations {
            tracing::debug!(
                "Claimant {} collected {} of a {} claim",
                allocation.id,
                allocation.allocation,
                allocation.claim
            );
        }
        tracing::info!(rounds = resolution.rounds, "Dispute resolved");
    }
}

/// Forwards every event to both observers, left first
impl<A, B> ResolutionObserver for (A, B)
where
    A: ResolutionObserver,
    B: ResolutionObserver,
{
    fn dispute_opened(&mut self, dispute: &Dispute, disputed: bool) {
        self.0.dispute_opened(dispute, disputed);
        self.1.dispute_opened(dispute, disputed);
    }

    fn round_resolved(&mut self, record: &RoundRecord) {
        self.0.round_resolved(record);
        self.1.round_resolved(record);
    }

    fn remainder_split(&mut self, split: &RemainderSplit) {
        self.0.remainder_split(split);
        self.1.remainder_split(split);
    }

    fn dispute_settled(&mut self, resolution: &Resolution) {
        self.0.dispute_settled(resolution);
        self.1.dispute_settled(resolution);
    }
}

/// One recorded step of a resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ResolutionEvent {
    /// Dispute set up
    Opened {
        /// Claims in identifier order
        claims: Vec<ExactFraction>,
        /// Whether the claims exceed the garment
        disputed: bool,
    },
    /// A concession round
    Round(RoundRecord),
    /// The even split of the leftover
    RemainderSplit(RemainderSplit),
    /// Resolution finished
    Settled {
        /// Rounds taken
        rounds: usize,
    },
}

/// Records every event in memory, in order
///
/// # Examples
///
/// ```
/// use garment_domain::ExactFraction;
/// use garment_resolver::{AuditTrail, ConcessionResolver};
///
/// let claims = vec![ExactFraction::one(), ExactFraction::new(1, 2).unwrap()];
/// let mut trail = AuditTrail::new();
/// ConcessionResolver::default_config()
///     .resolve_observed(&claims, &mut trail)
///     .unwrap();
/// assert_eq!(trail.rounds().count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuditTrail {
    events: Vec<ResolutionEvent>,
}

impl AuditTrail {
    /// Create an empty trail
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far
    pub fn events(&self) -> &[ResolutionEvent] {
        &self.events
    }

    /// Only the concession rounds
    pub fn rounds(&self) -> impl Iterator<Item = &RoundRecord> {
        self.events.iter().filter_map(|event| match event {
            ResolutionEvent::Round(record) => Some(record),
            _ => None,
        })
    }

    /// The remainder split, if the dispute got that far
    pub fn remainder_split(&self) -> Option<&RemainderSplit> {
        self.events.iter().find_map(|event| match event {
            ResolutionEvent::RemainderSplit(split) => Some(split),
            _ => None,
        })
    }

    /// Forget recorded events so the trail can be reused
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl ResolutionObserver for AuditTrail {
    fn dispute_opened(&mut self, dispute: &Dispute, disputed: bool) {
        let claims = dispute
            .claimants()
            .into_iter()
            .map(|claimant| claimant.claim().clone())
            .collect();
        self.events.push(ResolutionEvent::Opened { claims, disputed });
    }

    fn round_resolved(&mut self, record: &RoundRecord) {
        self.events.push(ResolutionEvent::Round(record.clone()));
    }

    fn remainder_split(&mut self, split: &RemainderSplit) {
        self.events.push(ResolutionEvent::RemainderSplit(split.clone()));
    }

    fn dispute_settled(&mut self, resolution: &Resolution) {
        self.events.push(ResolutionEvent::Settled {
            rounds: resolution.rounds,
        });
    }
}
