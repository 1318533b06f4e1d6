//! Shared search/sort state observed by the list pages.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid sort field: {0}. Valid values are: stars, reactions, date")]
    InvalidSortBy(String),
    #[error("Invalid sort direction: {0}. Valid values are: asc, desc")]
    InvalidSortDirection(String),
}

/// Field the backend ranks repositories by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortBy {
    #[default]
    Stars,
    Reactions,
    Date,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::Reactions => "reactions",
            Self::Date => "date",
        }
    }

    /// Next field in the cycle stars -> reactions -> date -> stars
    pub fn next(&self) -> Self {
        match self {
            Self::Stars => Self::Reactions,
            Self::Reactions => Self::Date,
            Self::Date => Self::Stars,
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stars" => Ok(Self::Stars),
            "reactions" => Ok(Self::Reactions),
            "date" => Ok(Self::Date),
            other => Err(FilterError::InvalidSortBy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Short label for the sort button ("Asc" / "Desc")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Asc => "Asc",
            Self::Desc => "Desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(FilterError::InvalidSortDirection(other.to_string())),
        }
    }
}

/// Snapshot of the current filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub sort_by: SortBy,
    pub sort_direction: SortDirection,
    pub selected_tags: Vec<String>,
}

/// Session-lifetime filter container.
///
/// Every setter updates the snapshot immediately and marks it changed for all
/// receivers handed out by [`FilterStore::subscribe`]. Nothing is persisted.
pub struct FilterStore {
    tx: watch::Sender<FilterState>,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FilterState::default());
        Self { tx }
    }

    pub fn snapshot(&self) -> FilterState {
        self.tx.borrow().clone()
    }

    pub fn search(&self) -> String {
        self.tx.borrow().search.clone()
    }

    pub fn sort_by(&self) -> SortBy {
        self.tx.borrow().sort_by
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.tx.borrow().sort_direction
    }

    pub fn selected_tags(&self) -> Vec<String> {
        self.tx.borrow().selected_tags.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.tx.subscribe()
    }

    pub fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        self.tx.send_modify(|state| state.search = search);
    }

    pub fn set_sort_by(&self, sort_by: SortBy) {
        self.tx.send_modify(|state| state.sort_by = sort_by);
    }

    pub fn set_sort_direction(&self, direction: SortDirection) {
        self.tx.send_modify(|state| state.sort_direction = direction);
    }

    pub fn set_selected_tags(&self, tags: Vec<String>) {
        self.tx.send_modify(|state| state.selected_tags = tags);
    }

    pub fn toggle_sort_direction(&self) {
        self.tx
            .send_modify(|state| state.sort_direction = state.sort_direction.toggled());
    }

    pub fn cycle_sort_by(&self) {
        self.tx.send_modify(|state| state.sort_by = state.sort_by.next());
    }

    /// Restore search "", stars, desc and no tags
    pub fn reset_filters(&self) {
        self.tx.send_replace(FilterState::default());
    }

    /// Edit the search text in place (used by the search input line)
    pub fn push_search_char(&self, c: char) {
        self.tx.send_modify(|state| state.search.push(c));
    }

    pub fn pop_search_char(&self) {
        self.tx.send_modify(|state| {
            state.search.pop();
        });
    }
}
