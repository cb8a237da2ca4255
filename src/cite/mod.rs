//! Citation pipeline: identifier in, formatted citation out.
//!
//! [`cite`] chains a [`MetadataResolver`] with a [`StyleRegistry`]. The
//! [`tags`] submodule applies the same pipeline to every `<doi>…</doi>` tag
//! in a block of text.

pub mod tags;

pub use tags::{
    DEFAULT_CONCURRENCY, DoiTag, MAX_CONCURRENCY, Notice, Substitution, SubstitutionOptions,
    TagFailure, find_doi_tags, substitute_doi_tags,
};

use thiserror::Error;
use tracing::{debug, info};

use crate::resolver::{MetadataResolver, ResolveError};
use crate::style::StyleRegistry;

/// Errors produced by the citation pipeline.
#[derive(Debug, Clone, Error)]
pub enum CiteError {
    /// The identifier could not be resolved to metadata.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The record resolved but nothing in it is renderable as a citation.
    #[error(
        "no citable metadata for '{identifier}': record has no authors, title, or journal\n  Suggestion: Confirm the DOI refers to a journal article"
    )]
    EmptyCitation {
        /// The identifier that resolved to empty metadata
        identifier: String,
    },
}

impl CiteError {
    /// Short user-facing message, matching the resolver's messages.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Resolve(error) => error.message(),
            Self::EmptyCitation { .. } => "No citable metadata",
        }
    }
}

/// Resolves `identifier` and renders it with the named style.
///
/// `style` of `None`, or a name the registry does not know, uses the
/// registry's default style.
///
/// # Errors
///
/// Returns [`CiteError::Resolve`] when resolution fails and
/// [`CiteError::EmptyCitation`] when the rendered citation is empty.
#[tracing::instrument(skip(resolver, styles), fields(resolver = resolver.name()))]
pub async fn cite(
    resolver: &dyn MetadataResolver,
    styles: &StyleRegistry,
    identifier: &str,
    style: Option<&str>,
) -> Result<String, CiteError> {
    let metadata = resolver.resolve(identifier).await?;

    let citation = styles.format(&metadata, style);
    if citation.is_empty() {
        debug!("Resolved record rendered to an empty citation");
        return Err(CiteError::EmptyCitation {
            identifier: identifier.trim().to_string(),
        });
    }

    info!("Citation generated");
    Ok(citation)
}
