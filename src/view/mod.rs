//! List page state: fetch lifecycle, stale-response fencing and the
//! client-side search filter.

pub mod articles;
pub mod repos;

pub use articles::{ArticlesPage, ArticlesQuery};
pub use repos::{ReposPage, ReposQuery};

use std::fmt::Debug;
use std::future::Future;

use crate::api::{ApiClient, RequestError};

/// An entity a list page can fetch, search and display
pub trait TrendingItem: Clone + Debug + Send + Sync + 'static {
    /// Everything that selects which batch the backend returns
    type Query: Clone + PartialEq + Debug + Send + Sync + 'static;

    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    fn id(&self) -> u64;

    /// Display name ("owner/repo", article title)
    fn label(&self) -> &str;

    fn url(&self) -> &str;

    /// Case-insensitive match on label or URL. `needle` is already lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.label().to_lowercase().contains(needle) || self.url().to_lowercase().contains(needle)
    }

    fn fetch(
        client: &ApiClient,
        query: &Self::Query,
    ) -> impl Future<Output = Result<Vec<Self>, RequestError>> + Send;
}

/// Items whose label or URL contains `search`, in backend order
pub fn filter_items<'a, T: TrendingItem>(items: &'a [T], search: &str) -> Vec<&'a T> {
    if search.is_empty() {
        return items.iter().collect();
    }
    let needle = search.to_lowercase();
    items.iter().filter(|item| item.matches(&needle)).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Ready(Vec<T>),
}

/// A request the caller must run and report back through
/// [`ListController::complete`]
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket<Q> {
    pub seq: u64,
    pub query: Q,
}

pub struct ListController<T: TrendingItem> {
    state: ViewState<T>,
    last_query: Option<T::Query>,
    latest_seq: u64,
    backend_address: String,
}

impl<T: TrendingItem> ListController<T> {
    pub fn new(backend_address: impl Into<String>) -> Self {
        Self {
            state: ViewState::Loading,
            last_query: None,
            latest_seq: 0,
            backend_address: backend_address.into(),
        }
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    /// Enter Loading and issue a new ticket; any ticket issued earlier is stale
    pub fn request(&mut self, query: T::Query) -> FetchTicket<T::Query> {
        self.latest_seq += 1;
        self.state = ViewState::Loading;
        self.last_query = Some(query.clone());
        FetchTicket {
            seq: self.latest_seq,
            query,
        }
    }

    /// Like [`request`](Self::request), but only when `query` differs from the last one issued
    pub fn request_if_changed(&mut self, query: T::Query) -> Option<FetchTicket<T::Query>> {
        if self.last_query.as_ref() == Some(&query) {
            return None;
        }
        Some(self.request(query))
    }

    /// Re-issue the identical request. Only valid from the Error state.
    pub fn retry(&mut self) -> Option<FetchTicket<T::Query>> {
        match self.state {
            ViewState::Error(_) => self.refresh(),
            _ => None,
        }
    }

    /// Re-issue the last request from any state
    pub fn refresh(&mut self) -> Option<FetchTicket<T::Query>> {
        let query = self.last_query.clone()?;
        Some(self.request(query))
    }

    /// Apply a finished request. Returns false (and changes nothing) when the
    /// ticket was superseded by a newer one.
    pub fn complete(&mut self, seq: u64, result: Result<Vec<T>, RequestError>) -> bool {
        if seq != self.latest_seq {
            crate::log_debug!(
                "Discarding stale {} response (#{}, latest #{})",
                T::PLURAL,
                seq,
                self.latest_seq
            );
            return false;
        }

        self.state = match result {
            Ok(items) => ViewState::Ready(items),
            Err(e) => ViewState::Error(self.error_message(&e)),
        };
        true
    }

    pub fn error_message(&self, err: &RequestError) -> String {
        format!(
            "{}. Make sure backend is running on {}",
            err, self.backend_address
        )
    }

    /// Full unfiltered batch (empty unless Ready)
    pub fn items(&self) -> &[T] {
        match &self.state {
            ViewState::Ready(items) => items,
            _ => &[],
        }
    }

    /// Items to display for the current search text
    pub fn visible(&self, search: &str) -> Vec<&T> {
        filter_items(self.items(), search)
    }

    /// "Showing N repositories"
    pub fn summary(&self, search: &str) -> String {
        crate::output::format_count(self.visible(search).len(), T::SINGULAR, T::PLURAL)
    }

    /// "No repositories found matching your criteria"
    pub fn empty_message() -> String {
        format!("No {} found matching your criteria", T::PLURAL)
    }
}
