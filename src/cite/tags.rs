//! `<doi>…</doi>` tag scanning and substitution over free text.
//!
//! Each tag's interior is cited independently. Successful tags are replaced by
//! their citation; failed tags stay exactly as written. Failures are reported
//! through a single aggregate [`Notice`] rather than per tag.

use std::ops::Range;
use std::sync::LazyLock;

use futures_util::stream::{self, StreamExt};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::resolver::MetadataResolver;
use crate::style::StyleRegistry;

use super::{CiteError, cite};

/// Tag pattern: the interior runs up to the next `<`, so tags never nest.
#[allow(clippy::expect_used)]
static DOI_TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<doi>([^<]*)</doi>").expect("DOI tag regex is valid") // Static pattern, safe to panic
});

/// Default number of resolutions in flight during substitution.
pub const DEFAULT_CONCURRENCY: usize = 4;
/// Upper bound accepted for substitution concurrency.
pub const MAX_CONCURRENCY: usize = 16;

/// One `<doi>…</doi>` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoiTag {
    /// Byte range of the whole tag in the scanned text.
    pub span: Range<usize>,
    /// Tag interior, verbatim.
    pub identifier: String,
}

/// Finds every `<doi>…</doi>` tag, left to right.
#[must_use]
pub fn find_doi_tags(text: &str) -> Vec<DoiTag> {
    DOI_TAG_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let interior = caps.get(1)?;
            Some(DoiTag {
                span: whole.range(),
                identifier: interior.as_str().to_string(),
            })
        })
        .collect()
}

/// Knobs for [`substitute_doi_tags`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionOptions {
    /// Style name; `None` uses the registry default.
    pub style: Option<String>,
    /// Maximum resolutions in flight. Clamped to `1..=MAX_CONCURRENCY`.
    pub concurrency: usize,
}

impl Default for SubstitutionOptions {
    fn default() -> Self {
        Self {
            style: None,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// A tag that could not be cited.
#[derive(Debug, Clone)]
pub struct TagFailure {
    /// The tag as found in the input text.
    pub tag: DoiTag,
    /// Why it could not be cited.
    pub error: CiteError,
}

/// Outcome of [`substitute_doi_tags`].
#[derive(Debug, Clone)]
pub struct Substitution {
    /// Text with successful tags replaced.
    pub text: String,
    /// Number of tags replaced by a citation.
    pub replaced: usize,
    /// Tags left untouched, in input order.
    pub failures: Vec<TagFailure>,
}

impl Substitution {
    /// The single notice to show alongside the text, if any.
    ///
    /// Failures take precedence over the accuracy reminder, which is only
    /// shown when something was replaced and `ask_to_validate` is set.
    #[must_use]
    pub fn notice(&self, ask_to_validate: bool) -> Option<Notice> {
        if !self.failures.is_empty() {
            Some(Notice::Unresolved)
        } else if self.replaced > 0 && ask_to_validate {
            Some(Notice::PleaseCheck)
        } else {
            None
        }
    }
}

/// Aggregate notice attached to a substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// At least one tag could not be resolved and was left in place.
    Unresolved,
    /// Citations were generated; the reader should verify them.
    PleaseCheck,
}

impl Notice {
    /// Text shown to the user.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Unresolved => {
                "Some DOIs could not be resolved. Their <doi> tags were left unchanged."
            }
            Self::PleaseCheck => {
                "Citations were generated automatically from DOI metadata. Please check them for accuracy."
            }
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Replaces every `<doi>…</doi>` tag in `text` with its citation.
///
/// Resolutions run concurrently up to `options.concurrency`; results are
/// applied in input order regardless of completion order.
#[tracing::instrument(skip_all, fields(resolver = resolver.name(), tags = tracing::field::Empty))]
pub async fn substitute_doi_tags(
    text: &str,
    resolver: &dyn MetadataResolver,
    styles: &StyleRegistry,
    options: &SubstitutionOptions,
) -> Substitution {
    let tags = find_doi_tags(text);
    tracing::Span::current().record("tags", tags.len());

    if tags.is_empty() {
        debug!("No <doi> tags in text");
        return Substitution {
            text: text.to_string(),
            replaced: 0,
            failures: Vec::new(),
        };
    }

    let concurrency = options.concurrency.clamp(1, MAX_CONCURRENCY);
    let style = options.style.as_deref();

    let results: Vec<Result<String, CiteError>> = stream::iter(&tags)
        .map(|tag| cite(resolver, styles, &tag.identifier, style))
        .buffered(concurrency)
        .collect()
        .await;

    let mut output = String::with_capacity(text.len());
    let mut failures = Vec::new();
    let mut replaced = 0;
    let mut cursor = 0;

    for (tag, result) in tags.into_iter().zip(results) {
        output.push_str(&text[cursor..tag.span.start]);
        cursor = tag.span.end;
        match result {
            Ok(citation) => {
                output.push_str(&citation);
                replaced += 1;
            }
            Err(error) => {
                warn!(identifier = %tag.identifier, error = %error, "Leaving unresolved <doi> tag in place");
                output.push_str(&text[tag.span.clone()]);
                failures.push(TagFailure { tag, error });
            }
        }
    }
    output.push_str(&text[cursor..]);

    info!(replaced, failed = failures.len(), "DOI tag substitution complete");
    Substitution {
        text: output,
        replaced,
        failures,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cite::test_resolver::{StaticResolver, article};
    use crate::style::builtin_styles;

    // ==================== Scanning Tests ====================

    #[test]
    fn test_find_doi_tags_spans_and_identifiers() {
        let text = "See <doi>10.1/a</doi> and <doi> 10.1/b </doi>.";
        let tags = find_doi_tags(text);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].identifier, "10.1/a");
        assert_eq!(&text[tags[0].span.clone()], "<doi>10.1/a</doi>");
        assert_eq!(tags[1].identifier, " 10.1/b ");
    }

    #[test]
    fn test_find_doi_tags_ignores_nested_markup() {
        assert!(find_doi_tags("<doi>10.1/<b>x</b></doi>").is_empty());
        assert!(find_doi_tags("no tags here").is_empty());
        assert_eq!(find_doi_tags("<doi></doi>")[0].identifier, "");
    }

    // ==================== Notice Tests ====================

    #[test]
    fn test_notice_precedence() {
        let mut sub = Substitution {
            text: String::new(),
            replaced: 0,
            failures: Vec::new(),
        };
        assert_eq!(sub.notice(true), None);

        sub.replaced = 2;
        assert_eq!(sub.notice(true), Some(Notice::PleaseCheck));
        assert_eq!(sub.notice(false), None);

        sub.failures.push(TagFailure {
            tag: DoiTag {
                span: 0..11,
                identifier: String::new(),
            },
            error: CiteError::EmptyCitation {
                identifier: String::new(),
            },
        });
        assert_eq!(sub.notice(true), Some(Notice::Unresolved));
        assert_eq!(sub.notice(false), Some(Notice::Unresolved));
    }

    // ==================== Substitution Tests ====================

    #[tokio::test]
    async fn test_substitute_without_tags_returns_text_unchanged() {
        let resolver = StaticResolver::default();
        let sub = substitute_doi_tags(
            "plain text",
            &resolver,
            builtin_styles(),
            &SubstitutionOptions::default(),
        )
        .await;
        assert_eq!(sub.text, "plain text");
        assert_eq!(sub.notice(true), None);
        assert_eq!(resolver.call_count(), 0);
    }

    #[tokio::test]
    async fn test_substitute_replaces_successes_and_keeps_failures() {
        let resolver = StaticResolver::default()
            .with_record("10.1/a", article("Smith", "First"))
            .with_record("10.1/c", article("Jones", "Third"));
        let text = "A <doi>10.1/a</doi>; B <doi>10.1/missing</doi>; C <doi>10.1/c</doi>; D <doi></doi>.";

        let sub = substitute_doi_tags(text, &resolver, builtin_styles(), &SubstitutionOptions::default())
            .await;

        assert_eq!(
            sub.text,
            "A Smith A. First. ''Journal of Things''.; B <doi>10.1/missing</doi>; \
             C Jones A. Third. ''Journal of Things''.; D <doi></doi>."
        );
        assert_eq!(sub.replaced, 2);
        assert_eq!(
            sub.failures
                .iter()
                .map(|f| f.tag.identifier.as_str())
                .collect::<Vec<_>>(),
            ["10.1/missing", ""]
        );
        assert_eq!(sub.notice(true), Some(Notice::Unresolved));
    }

    #[tokio::test]
    async fn test_substitute_preserves_order_under_concurrency() {
        // Earlier tags finish last.
        let resolver = StaticResolver::default()
            .with_record("10.1/a", article("Alpha", "One"))
            .with_delay("10.1/a", Duration::from_millis(60))
            .with_record("10.1/b", article("Beta", "Two"))
            .with_delay("10.1/b", Duration::from_millis(30))
            .with_record("10.1/c", article("Gamma", "Three"));
        let text = "<doi>10.1/a</doi>|<doi>10.1/b</doi>|<doi>10.1/c</doi>";
        let options = SubstitutionOptions {
            style: Some("ama".to_string()),
            concurrency: 3,
        };

        let sub = substitute_doi_tags(text, &resolver, builtin_styles(), &options).await;

        let parts: Vec<_> = sub.text.split('|').collect();
        assert!(parts[0].starts_with("Alpha A. One."), "{}", sub.text);
        assert!(parts[1].starts_with("Beta A. Two."), "{}", sub.text);
        assert!(parts[2].starts_with("Gamma A. Three."), "{}", sub.text);
        assert_eq!(sub.notice(true), Some(Notice::PleaseCheck));
    }

    #[tokio::test]
    async fn test_substitute_zero_concurrency_is_clamped() {
        let resolver = StaticResolver::default().with_record("10.1/a", article("Smith", "T"));
        let options = SubstitutionOptions {
            style: None,
            concurrency: 0,
        };
        let sub = substitute_doi_tags("<doi>10.1/a</doi>", &resolver, builtin_styles(), &options).await;
        assert_eq!(sub.replaced, 1);
    }
}
