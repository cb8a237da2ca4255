//! Error types for metadata resolution.
//!
//! Every variant follows the What/Why/Fix message pattern used across the
//! project. Each failure also carries a stable numeric code and a short
//! message for callers that surface it to end users.

use std::fmt;

use thiserror::Error;

/// Category of a resolution failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
    /// Empty input, or the registry rejected the identifier's syntax.
    MalformedIdentifier,
    /// The registry returned something other than an XML record.
    NotFound,
    /// The registry record could not be parsed.
    Internal,
    /// The registry could not be reached or the response could not be read.
    Network,
}

impl ResolveErrorKind {
    /// Stable numeric code for the failure category.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Internal => 1,
            Self::MalformedIdentifier => 2,
            Self::NotFound => 3,
            Self::Network => 4,
        }
    }

    /// Short user-facing message for the failure category.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Internal => "Internal error.",
            Self::MalformedIdentifier => "Malformed DOI",
            Self::NotFound => "DOI not found",
            Self::Network => "Network error.",
        }
    }
}

impl fmt::Display for ResolveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Errors that can occur while resolving an identifier to metadata.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// Identifier is empty or the registry reports it as malformed
    #[error("malformed DOI '{identifier}': {reason}\n  Suggestion: {suggestion}")]
    MalformedIdentifier {
        /// The identifier as supplied
        identifier: String,
        /// Why it was rejected
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// Registry has no record for the identifier
    #[error(
        "DOI not found '{identifier}': registry returned no XML record\n  Suggestion: Check the DOI for typos or confirm it is registered with Crossref"
    )]
    NotFound {
        /// The identifier that could not be found
        identifier: String,
    },

    /// Registry response could not be parsed
    #[error("internal error resolving '{identifier}': {reason}\n  Suggestion: {suggestion}")]
    Internal {
        /// The identifier being resolved
        identifier: String,
        /// What went wrong
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// Transport-level failure (DNS, refused connection, timeout, broken body)
    #[error("network error resolving '{identifier}': {reason}\n  Suggestion: {suggestion}")]
    Network {
        /// The identifier being resolved
        identifier: String,
        /// What went wrong
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },
}

impl ResolveError {
    /// Creates a `MalformedIdentifier` error for blank input.
    #[must_use]
    pub fn empty_identifier() -> Self {
        Self::MalformedIdentifier {
            identifier: String::new(),
            reason: "identifier is empty".to_string(),
            suggestion: "Provide a DOI such as 10.1000/xyz123".to_string(),
        }
    }

    /// Creates a `MalformedIdentifier` error reported by the registry.
    #[must_use]
    pub fn malformed(identifier: &str) -> Self {
        Self::MalformedIdentifier {
            identifier: identifier.to_string(),
            reason: "registry reported the DOI as malformed".to_string(),
            suggestion: "DOIs start with '10.' followed by a registrant code, '/' and a suffix"
                .to_string(),
        }
    }

    /// Creates a `NotFound` error.
    #[must_use]
    pub fn not_found(identifier: &str) -> Self {
        Self::NotFound {
            identifier: identifier.to_string(),
        }
    }

    /// Creates an `Internal` error for a registry record that failed to parse.
    #[must_use]
    pub fn parse_failed(identifier: &str, reason: &str) -> Self {
        Self::Internal {
            identifier: identifier.to_string(),
            reason: format!("registry XML could not be parsed: {reason}"),
            suggestion: "Try again later; the registry may have returned a truncated record"
                .to_string(),
        }
    }

    /// Creates an `Internal` error for local setup failures (e.g. client construction).
    #[must_use]
    pub fn internal(identifier: &str, reason: &str) -> Self {
        Self::Internal {
            identifier: identifier.to_string(),
            reason: reason.to_string(),
            suggestion: "Check the resolver configuration and try again".to_string(),
        }
    }

    /// Creates a `Network` error.
    #[must_use]
    pub fn network(identifier: &str, reason: &str) -> Self {
        Self::Network {
            identifier: identifier.to_string(),
            reason: reason.to_string(),
            suggestion: "Check your network connection or increase the resolver timeouts"
                .to_string(),
        }
    }

    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ResolveErrorKind {
        match self {
            Self::MalformedIdentifier { .. } => ResolveErrorKind::MalformedIdentifier,
            Self::NotFound { .. } => ResolveErrorKind::NotFound,
            Self::Internal { .. } => ResolveErrorKind::Internal,
            Self::Network { .. } => ResolveErrorKind::Network,
        }
    }

    /// Stable numeric code; see [`ResolveErrorKind::code`].
    #[must_use]
    pub fn code(&self) -> u8 {
        self.kind().code()
    }

    /// Short user-facing message; see [`ResolveErrorKind::message`].
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.kind().message()
    }
}
