//! American Medical Association (AMA) citation style.
//!
//! Output shape, with every part optional:
//!
//! ```text
//! Smith JP, Doe J. Article title. ''J Abbrev''. 2020;323(13):1239-1242. [http://dx.doi.org/10.x doi:10.x].
//! ```
//!
//! Segments are joined by a single space, added only when something has
//! already been written; punctuation attaches without a space.

use crate::metadata::{Metadata, Person};

use super::CitationStyle;

/// URL prefix of the hyperlink emitted for the DOI.
pub const DOI_RESOLVER_PREFIX: &str = "http://dx.doi.org/";

/// Additional authors are listed in full only below this count.
const FULL_LIST_LIMIT: usize = 6;
/// Additional authors kept before "et al" when the list is truncated.
const TRUNCATED_LIST_LEN: usize = 2;

/// Renders citations in AMA style. This is the default built-in style.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmaStyle;

impl CitationStyle for AmaStyle {
    fn name(&self) -> &'static str {
        "AMA"
    }

    fn format(&self, meta: &Metadata) -> String {
        let mut out = String::new();

        if let Some(authors) = author_segment(meta) {
            push_segment(&mut out, &authors);
        }
        if let Some(title) = &meta.title {
            push_segment(&mut out, &format!("{title}."));
        }
        if let Some(journal) = &meta.journal {
            push_segment(&mut out, &format!("''{}''.", journal.display_title()));
        }

        // Nothing to anchor a citation on.
        if out.is_empty() {
            return out;
        }

        if let Some(year) = meta.publication_year() {
            let terminator = if meta.volume.is_some() { ';' } else { '.' };
            push_segment(&mut out, &format!("{year}{terminator}"));
        }

        if let Some(volume) = &meta.volume {
            if !out.ends_with(';') {
                out.push(' ');
            }
            out.push_str(volume);
            if let Some(issue) = &meta.issue {
                out.push('(');
                out.push_str(issue);
                out.push(')');
            }
            if let Some(pages) = &meta.pages {
                out.push(':');
                out.push_str(pages);
            }
            out.push('.');
        }

        if let Some(doi) = &meta.doi {
            out.push_str(&format!(" [{DOI_RESOLVER_PREFIX}{doi} doi:{doi}]."));
        }

        out
    }
}

/// Formats a person as surname followed by unpunctuated initials.
///
/// Initials are the first letter of each whitespace-separated given name, so
/// "John Paul" gives "JP" and "J." gives "J". A person without given names
/// renders as the surname alone.
#[must_use]
pub fn format_name(person: &Person) -> String {
    let initials: String = person
        .first_name
        .split_whitespace()
        .filter_map(|token| token.chars().find(|c| c.is_alphabetic()))
        .collect();

    if initials.is_empty() {
        person.last_name.clone()
    } else {
        format!("{} {initials}", person.last_name)
    }
}

fn author_segment(meta: &Metadata) -> Option<String> {
    let first = meta.authors.first.as_ref()?;
    let additional = &meta.authors.additional;

    let mut names = vec![format_name(first)];
    if additional.len() < FULL_LIST_LIMIT {
        names.extend(additional.iter().map(format_name));
    } else {
        names.extend(additional.iter().take(TRUNCATED_LIST_LEN).map(format_name));
        names.push("et al".to_string());
    }

    Some(format!("{}.", names.join(", ")))
}

fn push_segment(out: &mut String, segment: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(segment);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{Journal, PartialDate, PubMedium};

    fn ama(meta: &Metadata) -> String {
        AmaStyle.format(meta)
    }

    fn with_authors(additional: usize) -> Metadata {
        let mut meta = Metadata::default();
        meta.authors.first = Some(Person::new("Ann", "Lead"));
        meta.authors.additional = (0..additional)
            .map(|i| Person::new("Co", format!("Author{i}")))
            .collect();
        meta
    }

    // ==================== Names ====================

    #[test]
    fn test_format_name_multiple_given_names() {
        assert_eq!(format_name(&Person::new("John Paul", "Smith")), "Smith JP");
    }

    #[test]
    fn test_format_name_initial_with_period() {
        assert_eq!(format_name(&Person::new("J.", "Doe")), "Doe J");
        assert_eq!(format_name(&Person::new("J. R. R.", "Tolkien")), "Tolkien JRR");
    }

    #[test]
    fn test_format_name_without_given_name() {
        assert_eq!(format_name(&Person::new("", "Plato")), "Plato");
        assert_eq!(format_name(&Person::new("  ", "Plato")), "Plato");
    }

    // ==================== Author Truncation ====================

    #[test]
    fn test_fewer_than_six_additional_authors_are_all_listed() {
        for k in 0..6 {
            let out = ama(&with_authors(k));
            let listed = (0..k).filter(|i| out.contains(&format!("Author{i} C"))).count();
            assert_eq!(listed, k, "k={k}: {out}");
            assert!(!out.contains("et al"), "k={k}: {out}");
        }
        assert_eq!(ama(&with_authors(1)), "Lead A, Author0 C.");
    }

    #[test]
    fn test_six_or_more_additional_authors_truncate_to_two() {
        for k in [6, 7, 20] {
            let out = ama(&with_authors(k));
            assert_eq!(out, "Lead A, Author0 C, Author1 C, et al.", "k={k}");
        }
    }

    #[test]
    fn test_additional_authors_without_first_are_not_rendered() {
        let mut meta = with_authors(2);
        meta.authors.first = None;
        assert_eq!(ama(&meta), "");
    }

    // ==================== Punctuation and Segments ====================

    #[test]
    fn test_title_and_journal_without_authors() {
        let meta = Metadata {
            title: Some("A Study".to_string()),
            journal: Some(Journal::new("Journal of Things")),
            ..Metadata::default()
        };
        assert_eq!(ama(&meta), "A Study. ''Journal of Things''.");
    }

    #[test]
    fn test_journal_prefers_abbreviated_title() {
        let meta = Metadata {
            journal: Some(Journal::new("Journal of Things").with_abbrev_title("J Things")),
            ..Metadata::default()
        };
        assert_eq!(ama(&meta), "''J Things''.");
    }

    #[test]
    fn test_year_followed_by_volume_uses_semicolon() {
        let mut meta = Metadata {
            title: Some("T".to_string()),
            volume: Some("5".to_string()),
            ..Metadata::default()
        };
        meta.pub_date.insert(PubMedium::Print, PartialDate::new("2020"));
        assert_eq!(ama(&meta), "T. 2020;5.");

        meta.volume = None;
        assert_eq!(ama(&meta), "T. 2020.");
    }

    #[test]
    fn test_year_prefers_print_over_online() {
        let mut meta = Metadata {
            title: Some("T".to_string()),
            ..Metadata::default()
        };
        meta.pub_date.insert(PubMedium::Online, PartialDate::new("2019"));
        assert_eq!(ama(&meta), "T. 2019.");
        meta.pub_date.insert(PubMedium::Print, PartialDate::new("2020"));
        assert_eq!(ama(&meta), "T. 2020.");
    }

    #[test]
    fn test_volume_without_year_gets_space() {
        let meta = Metadata {
            title: Some("T".to_string()),
            volume: Some("12".to_string()),
            issue: Some("3".to_string()),
            pages: Some("45-67".to_string()),
            ..Metadata::default()
        };
        assert_eq!(ama(&meta), "T. 12(3):45-67.");
    }

    #[test]
    fn test_doi_suffix() {
        let meta = Metadata {
            title: Some("T".to_string()),
            doi: Some("10.1/xyz".to_string()),
            ..Metadata::default()
        };
        let out = ama(&meta);
        assert!(
            out.ends_with(" [http://dx.doi.org/10.1/xyz doi:10.1/xyz]."),
            "{out}"
        );
    }

    #[test]
    fn test_nothing_anchoring_yields_empty_string() {
        assert_eq!(ama(&Metadata::default()), "");

        let mut meta = Metadata {
            volume: Some("5".to_string()),
            pages: Some("1-2".to_string()),
            doi: Some("10.1/xyz".to_string()),
            ..Metadata::default()
        };
        meta.pub_date.insert(PubMedium::Print, PartialDate::new("2020"));
        assert_eq!(ama(&meta), "", "year/volume/doi alone are not a citation");
    }

    #[test]
    fn test_full_citation() {
        let mut meta = Metadata {
            title: Some("Characteristics of Patients".to_string()),
            journal: Some(
                Journal::new("Journal of the American Medical Association").with_abbrev_title("JAMA"),
            ),
            volume: Some("323".to_string()),
            issue: Some("13".to_string()),
            pages: Some("1239-1242".to_string()),
            doi: Some("10.1001/jama.2020.2648".to_string()),
            ..Metadata::default()
        };
        meta.authors.first = Some(Person::new("John Paul", "Smith"));
        meta.authors.additional = vec![Person::new("Wei", "Wang"), Person::new("J.", "Doe")];
        meta.pub_date.insert(
            PubMedium::Print,
            PartialDate::new("2020").with_month("04"),
        );

        assert_eq!(
            ama(&meta),
            "Smith JP, Wang W, Doe J. Characteristics of Patients. ''JAMA''. 2020;323(13):1239-1242. \
             [http://dx.doi.org/10.1001/jama.2020.2648 doi:10.1001/jama.2020.2648]."
        );
    }
}
