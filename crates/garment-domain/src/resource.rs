//! The disputed garment

use crate::traits::DisputedResource;
use crate::{DisputeError, ExactFraction};

/// The disputed item, tracking how much of it is still unallocated
///
/// Every allocation during a resolution passes through [`Garment::allocate`],
/// which is the single checkpoint keeping the total handed out at or below 1.
///
/// # Examples
///
/// ```
/// use garment_domain::{ExactFraction, Garment};
/// use garment_domain::traits::DisputedResource;
///
/// let mut garment = Garment::new();
/// garment.allocate(&ExactFraction::new(1, 4).unwrap()).unwrap();
/// assert_eq!(garment.remainder(), &ExactFraction::new(3, 4).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Garment {
    remainder: ExactFraction,
}

impl Garment {
    /// A whole, unallocated garment
    pub fn new() -> Self {
        Self {
            remainder: ExactFraction::one(),
        }
    }
}

impl Default for Garment {
    fn default() -> Self {
        Self::new()
    }
}

impl DisputedResource for Garment {
    fn remainder(&self) -> &ExactFraction {
        &self.remainder
    }

    fn allocate(&mut self, amount: &ExactFraction) -> Result<(), DisputeError> {
        if amount > &self.remainder {
            return Err(DisputeError::InsufficientRemainder {
                amount: amount.to_string(),
                remainder: self.remainder.to_string(),
            });
        }

        self.remainder = self.remainder.checked_sub(amount)?;
        Ok(())
    }
}
