//! Citation styles: named, deterministic renderers over [`Metadata`].
//!
//! Styles implement [`CitationStyle`] and live in a [`StyleRegistry`], a lookup
//! table with a designated default. Adding a style means implementing the
//! trait and registering it; existing styles are untouched. Unknown style
//! names never fail: they fall back to the default with a warning.
//!
//! The built-in table ([`builtin_styles`]) is built once and shared read-only.

mod ama;

pub use ama::{AmaStyle, DOI_RESOLVER_PREFIX, format_name};

use std::sync::LazyLock;

use tracing::{debug, warn};

use crate::metadata::Metadata;

/// Name of the default built-in style.
pub const DEFAULT_STYLE: &str = "AMA";

static BUILTIN_STYLES: LazyLock<StyleRegistry> = LazyLock::new(StyleRegistry::builtin);

/// A named citation renderer.
///
/// Rendering is pure: the same metadata always yields the same string, and
/// metadata with nothing renderable yields an empty string.
pub trait CitationStyle: Send + Sync {
    /// Style name used for lookup (e.g. "AMA"). Matched case-insensitively.
    fn name(&self) -> &str;

    /// Renders the metadata as a citation.
    fn format(&self, meta: &Metadata) -> String;
}

/// Lookup table from style name to renderer, with a default entry.
pub struct StyleRegistry {
    styles: Vec<Box<dyn CitationStyle>>,
    default_index: usize,
}

impl StyleRegistry {
    /// Creates a registry whose only (and default) entry is `default_style`.
    #[must_use]
    pub fn new(default_style: Box<dyn CitationStyle>) -> Self {
        Self {
            styles: vec![default_style],
            default_index: 0,
        }
    }

    /// Creates a registry holding every built-in style, AMA as default.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Box::new(AmaStyle))
    }

    /// Registers a style, replacing any style with the same name.
    #[tracing::instrument(skip(self, style), fields(style_name = style.name()))]
    pub fn register(&mut self, style: Box<dyn CitationStyle>) {
        if let Some(index) = self.position(style.name()) {
            debug!("Replacing registered style");
            self.styles[index] = style;
        } else {
            debug!("Registering style");
            self.styles.push(style);
        }
    }

    /// Looks up a style by name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn CitationStyle> {
        self.position(name).map(|index| self.styles[index].as_ref())
    }

    /// The style used when none, or an unknown one, is requested.
    #[must_use]
    pub fn default_style(&self) -> &dyn CitationStyle {
        self.styles[self.default_index].as_ref()
    }

    #[must_use]
    pub fn default_style_name(&self) -> &str {
        self.default_style().name()
    }

    /// Registered style names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|style| style.name())
    }

    /// Returns the named style, or the default when `name` is `None` or unknown.
    #[must_use]
    pub fn select(&self, name: Option<&str>) -> &dyn CitationStyle {
        let Some(name) = name else {
            return self.default_style();
        };
        self.get(name).unwrap_or_else(|| {
            let fallback = self.default_style();
            warn!(
                requested = name,
                fallback = fallback.name(),
                "Style is not defined; using default style"
            );
            fallback
        })
    }

    /// Renders `meta` with the named style (default on `None` or unknown name).
    #[must_use]
    pub fn format(&self, meta: &Metadata, style: Option<&str>) -> String {
        self.select(style).format(meta)
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.styles
            .iter()
            .position(|style| style.name().eq_ignore_ascii_case(name))
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for StyleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleRegistry")
            .field("styles", &self.names().collect::<Vec<_>>())
            .field("default", &self.default_style_name())
            .finish()
    }
}

/// Process-wide, read-only table of built-in styles.
#[must_use]
pub fn builtin_styles() -> &'static StyleRegistry {
    &BUILTIN_STYLES
}

/// Renders `meta` with a built-in style (default on `None` or unknown name).
#[must_use]
pub fn format_citation(meta: &Metadata, style: Option<&str>) -> String {
    builtin_styles().format(meta, style)
}
