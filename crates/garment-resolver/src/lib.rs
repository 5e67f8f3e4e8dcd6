//! Garment Resolver
//!
//! Divides a contested garment among claimants by successive concession.
//!
//! Each claimant implicitly concedes `1 - claim` to the others. Concessions
//! are resolved smallest first: the conceded amount is shared among every
//! other claimant, and claimants whose concession is resolved become "full"
//! and collect a larger slice of later rounds. The leftover is split evenly.
//!
//! The resolver provides:
//! - Exact rational arithmetic throughout; no rounding
//! - Stepwise access through [`Dispute`] for inspection between rounds
//! - A [`ResolutionObserver`] side-channel for logging and audit trails
//! - A final check that a contested garment is fully distributed
//!
//! # Examples
//!
//! ```
//! use garment_domain::ExactFraction;
//! use garment_resolver::{ConcessionResolver, ResolverConfig};
//!
//! let claims: Vec<ExactFraction> = ["1", "1/2", "1/2"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//!
//! let resolver = ConcessionResolver::new(ResolverConfig::default());
//! let resolution = resolver.resolve(&claims).unwrap();
//!
//! assert_eq!(resolution.allocations[0].allocation.to_string(), "7/12");
//! assert_eq!(resolution.allocations[1].allocation.to_string(), "5/24");
//! ```

#![warn(missing_docs)]

mod config;
mod dispute;
mod distribution;
mod observer;
mod resolver;

pub use config::ResolverConfig;
pub use dispute::{Dispute, RemainderSplit, RoundRecord};
pub use distribution::Distribution;
pub use observer::{AuditTrail, NoopObserver, ResolutionEvent, ResolutionObserver, TracingObserver};
pub use resolver::{resolve, Allocation, ConcessionResolver, Resolution};
