//! Share computation for a single concession round

use garment_domain::{ExactFraction, FractionError};

/// How one resolved concession is shared out
///
/// The concession is split into `N - 1` equal full shares, one for every
/// claimant other than the conceder. A partial claimant splits its share
/// with every full claimant, so it keeps `full_share / (fulls + 1)` and each
/// full claimant receives that same slice from every partial claimant on top
/// of its own full share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// The concession being resolved
    pub concession: ExactFraction,
    /// Claimants whose concession was already resolved
    pub fulls_count: usize,
    /// Claimants with concession still outstanding, the conceder included
    pub partials_count: usize,
    /// `concession / (N - 1)`
    pub full_share: ExactFraction,
    /// `full_share / (fulls_count + 1)`, credited to each partial claimant
    pub partial_share: ExactFraction,
}

impl Distribution {
    /// Compute the shares for a concession given the current full/partial split
    ///
    /// # Errors
    /// [`FractionError::DivideByZero`] with fewer than two claimants, or
    /// [`FractionError::OutOfRange`] if a share cannot be a fraction of the garment.
    pub fn new(
        concession: ExactFraction,
        fulls_count: usize,
        partials_count: usize,
    ) -> Result<Self, FractionError> {
        let claimant_count = fulls_count + partials_count;
        let full_share = concession.checked_div_int(claimant_count.saturating_sub(1))?;
        let partial_share = full_share.checked_div_int(fulls_count + 1)?;

        Ok(Self {
            concession,
            fulls_count,
            partials_count,
            full_share,
            partial_share,
        })
    }

    /// Credited to each full claimant: `full_share + partial_share * partials_count`
    ///
    /// Only meaningful when at least one claimant is full; with no fulls the
    /// value is never handed out and may not even be a valid fraction.
    pub fn for_fulls(&self) -> Result<ExactFraction, FractionError> {
        self.full_share
            .checked_add(&self.partial_share.checked_mul_int(self.partials_count)?)
    }

    /// Total number of claimants in the dispute
    pub fn claimant_count(&self) -> usize {
        self.fulls_count + self.partials_count
    }

    /// Amount of the garment this round hands out: `full_share * N`
    ///
    /// Equal to `for_fulls * fulls + partial_share * partials`.
    pub fn total(&self) -> Result<ExactFraction, FractionError> {
        self.full_share.checked_mul_int(self.claimant_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: i64, d: i64) -> ExactFraction {
        ExactFraction::new(n, d).unwrap()
    }

    #[test]
    fn test_two_claimants_one_full() {
        // Claims {1, 1/2}: the half-claimant concedes 1/2
        let d = Distribution::new(frac(1, 2), 1, 1).unwrap();
        assert_eq!(d.full_share, frac(1, 2));
        assert_eq!(d.partial_share, frac(1, 4));
        assert_eq!(d.for_fulls().unwrap(), frac(3, 4));
        assert_eq!(d.total().unwrap(), ExactFraction::one());
    }

    #[test]
    fn test_no_fulls_yet() {
        let d = Distribution::new(frac(1, 2), 0, 3).unwrap();
        assert_eq!(d.full_share, frac(1, 4));
        assert_eq!(d.partial_share, frac(1, 4));
        assert_eq!(d.total().unwrap(), frac(3, 4));
    }

    #[test]
    fn test_total_matches_credited_shares() {
        let d = Distribution::new(frac(1, 2), 2, 4).unwrap();
        let credited = d
            .for_fulls()
            .unwrap()
            .checked_mul_int(d.fulls_count)
            .unwrap()
            .checked_add(&d.partial_share.checked_mul_int(d.partials_count).unwrap())
            .unwrap();
        assert_eq!(credited, d.total().unwrap());
    }

    #[test]
    fn test_single_claimant_cannot_distribute() {
        assert_eq!(
            Distribution::new(frac(1, 2), 0, 1),
            Err(FractionError::DivideByZero)
        );
    }

    #[test]
    fn test_oversized_round_is_out_of_range() {
        // Claims {1, 1/4}: a 3/4 concession to one other claimant would hand out 3/2
        let d = Distribution::new(frac(3, 4), 1, 1).unwrap();
        assert!(matches!(d.total(), Err(FractionError::OutOfRange { .. })));
        assert!(matches!(d.for_fulls(), Err(FractionError::OutOfRange { .. })));
    }

    #[test]
    fn test_fulls_share_not_needed_without_fulls() {
        // Claims {3/5, 3/5}: nobody is full in the only round
        let d = Distribution::new(frac(2, 5), 0, 2).unwrap();
        assert_eq!(d.total().unwrap(), frac(4, 5));
        assert!(d.for_fulls().is_err());
    }
}
