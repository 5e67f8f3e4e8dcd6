//! Resolver configuration

use serde::{Deserialize, Serialize};

/// Configuration for the concession resolver
///
/// # Examples
///
/// ```
/// use garment_resolver::ResolverConfig;
///
/// let config = ResolverConfig::default();
/// assert!(config.verify_conservation);
///
/// let config = ResolverConfig::unverified();
/// assert!(!config.verify_conservation);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Re-sum the final allocations of a contested garment and fail unless
    /// they total exactly 1
    /// Default: true
    #[serde(default = "default_verify_conservation")]
    pub verify_conservation: bool,
}

fn default_verify_conservation() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            verify_conservation: true,
        }
    }
}

impl ResolverConfig {
    /// Skip the final conservation check
    ///
    /// The garment's remainder still guards every allocation; this only
    /// drops the redundant re-summation at the end.
    pub fn unverified() -> Self {
        Self {
            verify_conservation: false,
        }
    }
}
