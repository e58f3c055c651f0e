//! View state for one list session: search, sort, and expanded rows.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::PublicationId;

/// How the list is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Latest release date first.
    #[default]
    Newest,

    /// Earliest release date first.
    Oldest,

    /// Alphabetical by title.
    Title,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Title => "title",
        })
    }
}

/// Per-session list state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    pub sort_key: SortKey,

    /// Records whose description is shown in full.
    pub expanded: BTreeSet<PublicationId>,
}

impl ViewState {
    pub fn new(sort_key: SortKey) -> Self {
        Self {
            sort_key,
            ..Self::default()
        }
    }

    /// Flip a record between truncated and full description.
    /// Returns whether it is expanded afterwards.
    pub fn toggle_description(&mut self, id: PublicationId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    pub fn is_expanded(&self, id: PublicationId) -> bool {
        self.expanded.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sort_is_newest() {
        assert_eq!(ViewState::default().sort_key, SortKey::Newest);
    }

    #[test]
    fn toggle_expands_then_collapses() {
        let mut view = ViewState::default();
        let id = PublicationId(3);

        assert!(view.toggle_description(id));
        assert!(view.is_expanded(id));
        assert!(!view.toggle_description(id));
        assert!(!view.is_expanded(id));
    }

    #[test]
    fn sort_key_parses_from_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            sort: SortKey,
        }
        let w: Wrapper = toml::from_str("sort = \"oldest\"").unwrap();
        assert_eq!(w.sort, SortKey::Oldest);
    }
}
