//! Crossref resolver - fetches UNIXREF records from the Crossref registry.
//!
//! The [`CrossrefResolver`] requests `{base_url}/{doi}` with
//! `Accept: application/unixref+xml`, classifies the raw body, and parses it
//! into [`Metadata`]. The body, not the HTTP status, decides the outcome:
//! the registry answers unknown DOIs with a plain-text page.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::{debug, warn};
use url::Url;

use crate::metadata::Metadata;

use super::doi::{encode_doi_path, normalize_doi};
use super::http_client::{HttpTimeouts, build_resolver_http_client};
use super::unixref::parse_unixref;
use super::{MetadataResolver, ResolveError};

/// Default Crossref registry base URL.
pub const DEFAULT_BASE_URL: &str = "http://data.crossref.org";

/// Content type requested from the registry.
const UNIXREF_MEDIA_TYPE: &str = "application/unixref+xml";

/// Marker the registry puts in the body when it rejects DOI syntax.
const MALFORMED_MARKER: &str = "Malformed DOI";

/// Any XML record carries a prolog; anything else is a not-found page.
const XML_PROLOG: &str = "<?xml";

/// Resolves DOIs to metadata via Crossref content negotiation.
pub struct CrossrefResolver {
    client: Client,
    base_url: String,
}

impl CrossrefResolver {
    /// Creates a resolver against the public Crossref registry with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if HTTP client construction fails.
    pub fn new() -> Result<Self, ResolveError> {
        Self::with_options(DEFAULT_BASE_URL, HttpTimeouts::default())
    }

    /// Creates a resolver with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the URL is invalid or client construction fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ResolveError> {
        Self::with_options(base_url, HttpTimeouts::default())
    }

    /// Creates a resolver with a custom base URL and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Internal`] if `base_url` is not an absolute
    /// `http`/`https` URL or HTTP client construction fails.
    #[tracing::instrument(skip_all, fields(base_url))]
    pub fn with_options(
        base_url: impl Into<String>,
        timeouts: HttpTimeouts,
    ) -> Result<Self, ResolveError> {
        let base_url = base_url.into();
        tracing::Span::current().record("base_url", base_url.as_str());

        let parsed = Url::parse(&base_url).map_err(|error| {
            ResolveError::internal("crossref", &format!("invalid registry URL '{base_url}': {error}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ResolveError::internal(
                "crossref",
                &format!("registry URL '{base_url}' must use http or https"),
            ));
        }

        Ok(Self {
            client: build_resolver_http_client("crossref", timeouts)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Registry base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_url(&self, doi: &str) -> String {
        format!("{}/{}", self.base_url, encode_doi_path(doi))
    }
}

impl std::fmt::Debug for CrossrefResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossrefResolver")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MetadataResolver for CrossrefResolver {
    fn name(&self) -> &'static str {
        "crossref"
    }

    #[tracing::instrument(skip(self), fields(resolver = "crossref"))]
    async fn resolve(&self, identifier: &str) -> Result<Metadata, ResolveError> {
        let doi = normalize_doi(identifier);
        if doi.is_empty() {
            debug!("Rejecting blank identifier without contacting registry");
            return Err(ResolveError::empty_identifier());
        }

        let url = self.request_url(&doi);
        debug!(url = %url, "Requesting UNIXREF record");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, UNIXREF_MEDIA_TYPE)
            .send()
            .await
            .map_err(|error| {
                warn!(url = %url, error = %error, "Registry request failed");
                ResolveError::network(&doi, &describe_transport_error(&error))
            })?;

        let status = response.status();
        debug!(status = status.as_u16(), "Registry responded");

        let body = response.text().await.map_err(|error| {
            warn!(url = %url, error = %error, "Failed to read registry response body");
            ResolveError::network(&doi, &describe_transport_error(&error))
        })?;

        classify_body(&doi, &url, &body)
    }
}

/// Turns a raw registry body into metadata or a typed failure.
fn classify_body(doi: &str, url: &str, body: &str) -> Result<Metadata, ResolveError> {
    if body.contains(MALFORMED_MARKER) {
        debug!("Registry reported malformed DOI");
        return Err(ResolveError::malformed(doi));
    }
    if !body.contains(XML_PROLOG) {
        debug!(body_len = body.len(), "Registry body is not an XML record");
        return Err(ResolveError::not_found(doi));
    }

    parse_unixref(body).map_err(|error| {
        warn!(url = %url, error = %error, "Encountered error while parsing registry XML");
        ResolveError::parse_failed(doi, &error.to_string())
    })
}

fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("request timed out ({error})")
    } else if error.is_connect() {
        format!("cannot connect to registry ({error})")
    } else if error.is_redirect() {
        format!("too many redirects ({error})")
    } else {
        error.to_string()
    }
}
