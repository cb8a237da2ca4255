//! Extraction of [`Metadata`] from Crossref UNIXREF records.
//!
//! Expected shape:
//!
//! ```text
//! doi_records/doi_record/crossref/journal
//!     journal_metadata/{full_title, abbrev_title}
//!     journal_issue/{journal_volume/volume, issue}
//!     journal_article/{contributors, titles/title, pages, publication_date*, doi_data/doi}
//! ```
//!
//! Every step is optional. A missing node only drops the fields that depend
//! on it; it never aborts extraction.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::metadata::{Authors, Journal, Metadata, PartialDate, Person, PubMedium};

use super::xml::{XmlError, XmlNode, parse_document};

const JOURNAL_PATH: [&str; 3] = ["doi_record", "crossref", "journal"];

/// Parses a UNIXREF document into metadata.
///
/// # Errors
///
/// Returns [`XmlError`] if the document is not well-formed XML. A well-formed
/// document without a journal record yields empty metadata, not an error.
pub fn parse_unixref(xml: &str) -> Result<Metadata, XmlError> {
    let root = parse_document(xml)?;
    Ok(extract_metadata(&root))
}

/// Extracts whatever journal-article metadata the tree carries.
#[must_use]
pub(crate) fn extract_metadata(root: &XmlNode) -> Metadata {
    let mut meta = Metadata::default();

    let Some(journal) = root.descend(&JOURNAL_PATH) else {
        debug!(root = root.name(), "UNIXREF document has no journal record");
        return meta;
    };

    if let Some(article) = journal.child("journal_article") {
        meta.authors = extract_authors(article);
        meta.title = article.descend(&["titles", "title"]).and_then(XmlNode::text);
        meta.pages = extract_pages(article);
        meta.pub_date = extract_publication_dates(article);
        meta.doi = article.descend(&["doi_data", "doi"]).and_then(XmlNode::text);
    }

    meta.journal = journal.child("journal_metadata").and_then(extract_journal);

    if let Some(issue) = journal.child("journal_issue") {
        meta.volume = issue
            .descend(&["journal_volume", "volume"])
            .and_then(XmlNode::text);
        meta.issue = issue.child_text("issue");
    }

    trace!(?meta, "Extracted UNIXREF metadata");
    meta
}

/// Splits author contributors into the first-sequence author and the rest.
///
/// Only `contributor_role="author"` entries count. If several entries claim
/// `sequence="first"`, the earliest wins and the others stay in document order
/// among the additional authors.
fn extract_authors(article: &XmlNode) -> Authors {
    let mut authors = Authors::default();
    let Some(contributors) = article.child("contributors") else {
        return authors;
    };

    for entry in contributors.children_named("person_name") {
        if entry.attr("contributor_role").map(str::trim) != Some("author") {
            continue;
        }
        let person = Person::new(
            entry.child_text("given_name").unwrap_or_default(),
            entry.child_text("surname").unwrap_or_default(),
        );
        if authors.first.is_none() && entry.attr("sequence").map(str::trim) == Some("first") {
            authors.first = Some(person);
        } else {
            authors.additional.push(person);
        }
    }

    authors
}

fn extract_journal(journal_metadata: &XmlNode) -> Option<Journal> {
    let journal = Journal::new(journal_metadata.child_text("full_title")?);
    Some(match journal_metadata.child_text("abbrev_title") {
        Some(abbrev) => journal.with_abbrev_title(abbrev),
        None => journal,
    })
}

fn extract_pages(article: &XmlNode) -> Option<String> {
    let pages = article.child("pages")?;
    let first = pages.child_text("first_page")?;
    Some(match pages.child_text("last_page") {
        Some(last) => format!("{first}-{last}"),
        None => first,
    })
}

fn extract_publication_dates(article: &XmlNode) -> BTreeMap<PubMedium, PartialDate> {
    let mut dates = BTreeMap::new();

    for node in article.children_named("publication_date") {
        let Some(medium) = PubMedium::from_media_type(node.attr("media_type")) else {
            debug!(
                media_type = node.attr("media_type").unwrap_or_default(),
                "Skipping publication date with unsupported media type"
            );
            continue;
        };
        let Some(year) = node.child_text("year") else {
            continue;
        };

        let mut date = PartialDate::new(year);
        if let Some(month) = node.child_text("month") {
            date = date.with_month(month);
            if let Some(day) = node.child_text("day") {
                date = date.with_day(day);
            }
        }
        dates.insert(medium, date);
    }

    dates
}
