//! List view: filter, order, and abbreviate publications for display.
//!
//! [`compute`] is a pure function of the records, the search term, and the
//! sort key. [`ListView`] memoizes it over those three inputs so callers can
//! ask for rows on every keystroke without re-sorting an unchanged list.

use std::cmp::Reverse;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::model::{Publication, SortKey, ViewState};

/// Marker appended to truncated text. Counts as one character.
pub const ELLIPSIS: char = '…';

/// Shown in place of an absent description.
pub const NO_DESCRIPTION: &str = "No description";

/// Filter `records` by `search_term`, then order them by `sort_key`.
///
/// A record matches when the term, compared case-insensitively, occurs in
/// its title or in its description. An empty term matches everything.
///
/// The sort is stable. Records whose release date does not parse sort after
/// every dated record for both date orders.
pub fn compute(records: &[Publication], search_term: &str, sort_key: SortKey) -> Vec<Publication> {
    let needle = search_term.to_lowercase();
    let mut rows: Vec<Publication> = records
        .iter()
        .filter(|p| matches(p, &needle))
        .cloned()
        .collect();

    match sort_key {
        SortKey::Newest => {
            rows.sort_by_cached_key(|p| {
                let date = p.release_date();
                (date.is_none(), Reverse(date))
            });
        }
        SortKey::Oldest => {
            rows.sort_by_cached_key(|p| {
                let date = p.release_date();
                (date.is_none(), date)
            });
        }
        SortKey::Title => {
            rows.sort_by_cached_key(|p| (title_key(&p.title), p.title.clone()));
        }
    }

    rows
}

/// Collation key for titles: diacritics folded away, then lowercased, so
/// "Ékspor" files under E rather than after Z.
fn title_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// `needle` must already be lowercased.
fn matches(p: &Publication, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    p.title.to_lowercase().contains(needle)
        || p.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

/// First `max_chars` characters of `text`, plus [`ELLIPSIS`] if anything
/// was cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => {
            let mut short = text[..cut].to_string();
            short.push(ELLIPSIS);
            short
        }
    }
}

/// The description as a row shows it: full when expanded, truncated
/// otherwise, or [`NO_DESCRIPTION`] when absent.
pub fn description_preview(p: &Publication, view: &ViewState, max_chars: usize) -> String {
    match p.description() {
        None => NO_DESCRIPTION.to_string(),
        Some(d) if view.is_expanded(p.id) => d.to_string(),
        Some(d) => truncate(d, max_chars),
    }
}

/// Memoized [`compute`].
#[derive(Debug, Default)]
pub struct ListView {
    inputs: Option<(Vec<Publication>, String, SortKey)>,
    rows: Vec<Publication>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows for the current inputs, recomputed only when one changed.
    pub fn rows(&mut self, records: &[Publication], view: &ViewState) -> &[Publication] {
        let fresh = self.inputs.as_ref().is_some_and(|(r, s, k)| {
            *k == view.sort_key && *s == view.search_term && r.as_slice() == records
        });
        if !fresh {
            tracing::trace!(
                records = records.len(),
                search = %view.search_term,
                sort = %view.sort_key,
                "recomputing list view"
            );
            self.rows = compute(records, &view.search_term, view.sort_key);
            self.inputs = Some((records.to_vec(), view.search_term.clone(), view.sort_key));
        }
        &self.rows
    }
}
