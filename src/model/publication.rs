//! Publication types: the catalog record and its unsaved draft.

use std::fmt;

use jiff::civil::Date;
use serde::Serialize;

/// Store-assigned identifier of a publication. Immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PublicationId(pub i64);

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A catalog record for one published document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: PublicationId,
    pub title: String,

    /// ISO calendar date text (`YYYY-MM-DD`).
    ///
    /// Kept as text so records with a malformed date still load;
    /// see [`Publication::release_date`] for the parsed form.
    pub release_date: String,

    pub description: Option<String>,
    pub cover_url: String,
}

impl Publication {
    /// The release date parsed as a calendar date, if well-formed.
    pub fn release_date(&self) -> Option<Date> {
        parse_release_date(&self.release_date)
    }

    /// Description text, treating an empty string as absent.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// Parses `YYYY-MM-DD` text, ignoring surrounding whitespace.
pub fn parse_release_date(text: &str) -> Option<Date> {
    text.trim().parse::<Date>().ok()
}

/// Field values of a publication that has not been assigned an id yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationDraft {
    pub title: String,
    pub release_date: String,
    pub description: Option<String>,
    pub cover_url: String,
}

impl PublicationDraft {
    /// Names of required fields that are empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.release_date.trim().is_empty() {
            missing.push("release date");
        }
        if self.cover_url.trim().is_empty() {
            missing.push("cover url");
        }
        missing
    }

    /// Attach an id, producing a committed record.
    pub fn with_id(self, id: PublicationId) -> Publication {
        Publication {
            id,
            title: self.title,
            release_date: self.release_date,
            description: self.description.filter(|d| !d.is_empty()),
            cover_url: self.cover_url,
        }
    }
}

impl From<&Publication> for PublicationDraft {
    fn from(p: &Publication) -> Self {
        Self {
            title: p.title.clone(),
            release_date: p.release_date.clone(),
            description: p.description.clone(),
            cover_url: p.cover_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Publication {
        Publication {
            id: PublicationId(7),
            title: "Papua in Figures 2024".into(),
            release_date: "2024-02-28".into(),
            description: Some(String::new()),
            cover_url: "https://img.example/cover.png".into(),
        }
    }

    #[test]
    fn release_date_parses_iso_text() {
        let p = sample();
        assert_eq!(p.release_date(), Some(jiff::civil::date(2024, 2, 28)));
    }

    #[test]
    fn malformed_release_date_is_none() {
        let mut p = sample();
        p.release_date = "28/02/2024".into();
        assert_eq!(p.release_date(), None);
    }

    #[test]
    fn empty_description_reads_as_absent() {
        assert_eq!(sample().description(), None);
    }

    #[test]
    fn draft_reports_missing_required_fields() {
        let draft = PublicationDraft {
            title: "  ".into(),
            ..Default::default()
        };
        assert_eq!(
            draft.missing_fields(),
            vec!["title", "release date", "cover url"]
        );
    }

    #[test]
    fn with_id_drops_empty_description() {
        let draft = PublicationDraft::from(&sample());
        let p = draft.with_id(PublicationId(9));
        assert_eq!(p.id, PublicationId(9));
        assert_eq!(p.description, None);
    }
}
