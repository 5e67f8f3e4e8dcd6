//! Command implementations.

pub mod init;
pub mod resolve;
pub mod scenarios;

pub use self::init::execute_init;
pub use self::resolve::{execute_resolve, parse_claims, resolve_claims};
pub use self::scenarios::execute_scenarios;
