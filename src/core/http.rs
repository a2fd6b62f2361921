//! HTTP client construction for availability probes.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::error::Result;

/// Build a probe client bounded by `timeout`.
///
/// The same timeout applies to connect and to the whole request; the probe
/// loop additionally wraps each call in its own deadline, so a stuck request
/// can never outlive the candidate it belongs to.
///
/// # Errors
///
/// Returns an error if client construction fails.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(format!("clawover/{}", env!("CARGO_PKG_VERSION")))
        .build()?)
}
