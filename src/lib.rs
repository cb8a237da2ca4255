//! doicite core library
//!
//! Turns DOIs into formatted bibliographic citations: resolve the DOI against
//! the Crossref registry, normalize the UNIXREF record into [`Metadata`], and
//! render it with a named [`CitationStyle`].
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`metadata`] - Normalized bibliographic record
//! - [`resolver`] - DOI normalization, registry client, UNIXREF parsing
//! - [`style`] - Citation styles and the style registry (AMA built in)
//! - [`cite`] - Single-DOI pipeline and `<doi>` tag substitution

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cite;
pub mod metadata;
pub mod resolver;
pub mod style;

#[cfg(test)]
#[path = "../tests/support/mod.rs"]
pub(crate) mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use cite::{
    CiteError, Notice, Substitution, SubstitutionOptions, cite, find_doi_tags, substitute_doi_tags,
};
pub use metadata::{Authors, Journal, Metadata, PartialDate, Person, PubMedium};
pub use resolver::{
    CrossrefResolver, HttpTimeouts, MetadataResolver, ResolveError, ResolveErrorKind,
    normalize_doi, parse_unixref,
};
pub use style::{CitationStyle, DEFAULT_STYLE, StyleRegistry, builtin_styles, format_citation};
