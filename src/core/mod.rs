//! Core failover engine: candidates, probing, policy, and the driver.

pub mod candidate;
pub mod driver;
pub mod http;
pub mod logging;
pub mod policy;
pub mod probe;

pub use candidate::{ModelRef, parse_candidates};
pub use driver::{FailoverTarget, Outcome, run_selection};
pub use policy::Selection;
pub use probe::{ProbeStrategy, probe};
