//! Normalized bibliographic metadata produced by resolvers and consumed by styles.
//!
//! A [`Metadata`] value only ever represents a successful resolution. Failures
//! travel separately as [`crate::resolver::ResolveError`], so a caller cannot
//! read content fields off a failed lookup.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A contributor name, always carried as a given-name/surname pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// All given names, space separated (e.g. "John Paul").
    pub first_name: String,
    /// Surname.
    pub last_name: String,
}

impl Person {
    /// Creates a person from given name(s) and surname.
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Author list split into the first-sequence author and everyone else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authors {
    /// The author flagged as first in the record, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<Person>,
    /// Remaining authors in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional: Vec<Person>,
}

impl Authors {
    /// Returns true if neither a first nor any additional author is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.additional.is_empty()
    }
}

/// Journal titles. An abbreviated title cannot exist without the full one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub full_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbrev_title: Option<String>,
}

impl Journal {
    #[must_use]
    pub fn new(full_title: impl Into<String>) -> Self {
        Self {
            full_title: full_title.into(),
            abbrev_title: None,
        }
    }

    #[must_use]
    pub fn with_abbrev_title(mut self, abbrev_title: impl Into<String>) -> Self {
        self.abbrev_title = Some(abbrev_title.into());
        self
    }

    /// The title a citation should display: abbreviated when known, else full.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.abbrev_title.as_deref().unwrap_or(&self.full_title)
    }
}

/// Publication medium a date applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PubMedium {
    Print,
    Online,
}

impl PubMedium {
    /// Maps a UNIXREF `media_type` attribute to a medium.
    ///
    /// A missing attribute means print (the registry schema default); values
    /// other than `print`/`online` have no medium.
    #[must_use]
    pub fn from_media_type(media_type: Option<&str>) -> Option<Self> {
        match media_type.map(str::trim) {
            None => Some(Self::Print),
            Some(value) if value.eq_ignore_ascii_case("print") => Some(Self::Print),
            Some(value) if value.eq_ignore_ascii_case("online") => Some(Self::Online),
            Some(_) => None,
        }
    }
}

impl fmt::Display for PubMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Print => write!(f, "print"),
            Self::Online => write!(f, "online"),
        }
    }
}

/// A date with strictly nested optional parts: no day without a month.
///
/// Fields are private so the nesting cannot be broken; JSON input is routed
/// through the same constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPartialDate")]
pub struct PartialDate {
    year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    day: Option<String>,
}

impl PartialDate {
    /// Creates a year-only date.
    #[must_use]
    pub fn new(year: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            month: None,
            day: None,
        }
    }

    /// Sets the month.
    #[must_use]
    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    /// Sets the day. Ignored unless a month is already set.
    #[must_use]
    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        if self.month.is_some() {
            self.day = Some(day.into());
        }
        self
    }

    #[must_use]
    pub fn year(&self) -> &str {
        &self.year
    }

    #[must_use]
    pub fn month(&self) -> Option<&str> {
        self.month.as_deref()
    }

    #[must_use]
    pub fn day(&self) -> Option<&str> {
        self.day.as_deref()
    }
}

#[derive(Deserialize)]
struct RawPartialDate {
    year: String,
    #[serde(default)]
    month: Option<String>,
    #[serde(default)]
    day: Option<String>,
}

impl From<RawPartialDate> for PartialDate {
    fn from(raw: RawPartialDate) -> Self {
        let mut date = PartialDate::new(raw.year);
        if let Some(month) = raw.month {
            date = date.with_month(month);
            if let Some(day) = raw.day {
                date = date.with_day(day);
            }
        }
        date
    }
}

/// Bibliographic metadata for one resolved identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Authors::is_empty")]
    pub authors: Authors,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<Journal>,
    /// Article title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `"start"` or `"start-end"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pub_date: BTreeMap<PubMedium, PartialDate>,
    /// Identifier as echoed by the registry (may differ in case from the input).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
}

impl Metadata {
    /// Year of publication, preferring the print date over the online one.
    #[must_use]
    pub fn publication_year(&self) -> Option<&str> {
        self.pub_date
            .get(&PubMedium::Print)
            .or_else(|| self.pub_date.get(&PubMedium::Online))
            .map(PartialDate::year)
    }

    /// Returns true if no field at all was populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
