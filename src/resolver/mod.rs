//! Metadata resolution: identifier in, normalized [`Metadata`] or typed failure out.
//!
//! # Architecture
//!
//! - [`MetadataResolver`] - Async trait that registry resolvers implement
//! - [`CrossrefResolver`] - Crossref UNIXREF implementation
//! - [`ResolveError`] - Typed failure with a stable code and short message
//! - [`parse_unixref`] - Offline UNIXREF parsing, shared with the resolver
//!
//! # Example
//!
//! ```no_run
//! use doicite_core::resolver::{CrossrefResolver, MetadataResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = CrossrefResolver::new()?;
//! let metadata = resolver.resolve("10.1001/jama.2020.2648").await?;
//! println!("{:?}", metadata.title);
//! # Ok(())
//! # }
//! ```

mod crossref;
mod doi;
mod error;
mod http_client;
mod unixref;
mod xml;

pub use crossref::{CrossrefResolver, DEFAULT_BASE_URL};
pub use doi::normalize_doi;
pub use error::{ResolveError, ResolveErrorKind};
pub use http_client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, HttpTimeouts};
pub use unixref::parse_unixref;
pub use xml::XmlError;

use async_trait::async_trait;

use crate::metadata::Metadata;

/// Trait that all metadata resolvers implement.
///
/// Expected conditions (blank input, unknown DOI, unreadable record,
/// unreachable registry) are returned as [`ResolveError`], never panics.
/// A single attempt is made per call; there are no retries.
///
/// # Object Safety
///
/// This trait uses `async_trait` to support dynamic dispatch via
/// `&dyn MetadataResolver`, which the citation pipeline relies on.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Returns the resolver's name (e.g., "crossref").
    fn name(&self) -> &str;

    /// Resolves an identifier to metadata.
    async fn resolve(&self, identifier: &str) -> Result<Metadata, ResolveError>;
}
