//! Shared HTTP client construction policy for registry resolvers.
//!
//! Centralizes timeout, user-agent, compression and redirect defaults so
//! every resolver talks to its registry the same way.

use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};
use tracing::debug;

use crate::user_agent;

use super::ResolveError;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default whole-request timeout in seconds.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;
/// Redirect hops followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// Connect and read timeouts applied to registry requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub read: Duration,
}

impl HttpTimeouts {
    /// Builds timeouts from whole seconds.
    #[must_use]
    pub fn from_secs(connect_secs: u64, read_secs: u64) -> Self {
        Self {
            connect: Duration::from_secs(connect_secs),
            read: Duration::from_secs(read_secs),
        }
    }
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS)
    }
}

/// Builds a resolver HTTP client using the shared project policy.
///
/// `resolver_name` is only used for error messages and logging.
///
/// # Errors
///
/// Returns [`ResolveError::Internal`] when client construction fails.
pub fn build_resolver_http_client(
    resolver_name: &str,
    timeouts: HttpTimeouts,
) -> Result<Client, ResolveError> {
    debug!(
        resolver = resolver_name,
        connect_timeout_ms = timeouts.connect.as_millis(),
        read_timeout_ms = timeouts.read.as_millis(),
        "Building resolver HTTP client"
    );
    base_builder(timeouts).build().map_err(|error| {
        ResolveError::internal(
            resolver_name,
            &format!("HTTP client construction failed: {error}"),
        )
    })
}

fn base_builder(timeouts: HttpTimeouts) -> ClientBuilder {
    Client::builder()
        .connect_timeout(timeouts.connect)
        .timeout(timeouts.read)
        .user_agent(user_agent::default_registry_user_agent())
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
}
