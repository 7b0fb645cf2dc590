use crate::entry::Entry;

/// Descriptions up to this many characters are shown in full.
pub const PREVIEW_LIMIT: usize = 15;

const ELLIPSIS: &str = "...";

const EMPTY_STORE: &str = "The dictionary is empty.";
const NO_MATCHES: &str = "No matching terms.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview<'a> {
    Full(&'a str),
    Truncated { text: String, href: String },
}

pub fn preview(entry: &Entry) -> Preview<'_> {
    // counted in chars so multi-byte text is never split mid-character
    match entry.description.char_indices().nth(PREVIEW_LIMIT) {
        None => Preview::Full(&entry.description),
        Some((cut, _)) => Preview::Truncated {
            text: format!("{}{ELLIPSIS}", &entry.description[..cut]),
            href: detail_href(&entry.name),
        },
    }
}

pub fn detail_href(name: &str) -> String {
    format!("/entry/{}", urlencoding::encode(name))
}

/// Last full entry set fetched from the server.
///
/// Search and clear always start from this value, never from a previous
/// search result. It is only replaced by a fresh fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingSet {
    entries: Vec<Entry>,
}

impl WorkingSet {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Filters by case-folded substring of `name`. A blank query restores the full set.
    pub fn search(&self, query: &str) -> SearchOutcome<'_> {
        let needle = query.trim().to_lowercase();

        if needle.is_empty() {
            return self.clear();
        }

        let entries = self
            .entries
            .iter()
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .collect();

        SearchOutcome::Matches {
            entries,
            total: self.entries.len(),
        }
    }

    pub fn clear(&self) -> SearchOutcome<'_> {
        SearchOutcome::All {
            entries: &self.entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    All {
        entries: &'a [Entry],
    },
    Matches {
        entries: Vec<&'a Entry>,
        total: usize,
    },
}

impl<'a> SearchOutcome<'a> {
    pub fn entries(&self) -> Vec<&'a Entry> {
        match self {
            Self::All { entries } => entries.iter().collect(),
            Self::Matches { entries, .. } => entries.clone(),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Self::All { entries } => entries.len(),
            Self::Matches { entries, .. } => entries.len(),
        }
    }

    /// True when the working set itself has no entries, whatever the query.
    pub fn store_is_empty(&self) -> bool {
        match self {
            Self::All { entries } => entries.is_empty(),
            Self::Matches { total, .. } => *total == 0,
        }
    }

    pub fn no_matches(&self) -> bool {
        matches!(self, Self::Matches { entries, total } if entries.is_empty() && *total > 0)
    }

    /// Status line for a search. Clearing or a blank query reports nothing.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::All { .. } => None,
            Self::Matches { total: 0, .. } => Some(EMPTY_STORE.to_string()),
            Self::Matches { entries, .. } => Some(match entries.len() {
                0 => NO_MATCHES.to_string(),
                1 => "1 match found.".to_string(),
                n => format!("{n} matches found."),
            }),
        }
    }

    /// Text shown in place of the list when nothing is displayed.
    pub fn placeholder(&self) -> Option<&'static str> {
        if self.store_is_empty() {
            Some(EMPTY_STORE)
        } else if self.no_matches() {
            Some(NO_MATCHES)
        } else {
            None
        }
    }
}
