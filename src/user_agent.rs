//! User-Agent string sent to metadata registries.
//!
//! Crossref asks clients to identify themselves so traffic can be attributed.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/doicite";

/// Default User-Agent for registry requests.
#[must_use]
pub(crate) fn default_registry_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("doicite/{version} (citation-tool; +{PROJECT_UA_URL})")
}
