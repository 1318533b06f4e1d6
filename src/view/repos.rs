use tokio::sync::watch;

use crate::api::{ApiClient, Repository, RequestError};
use crate::filter::{FilterState, FilterStore, SortBy, SortDirection};
use crate::view::{FetchTicket, ListController, TrendingItem};

/// Backend ranking for the repositories page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReposQuery {
    pub sort_by: SortBy,
    pub sort_direction: SortDirection,
}

impl ReposQuery {
    pub fn from_filters(state: &FilterState) -> Self {
        Self {
            sort_by: state.sort_by,
            sort_direction: state.sort_direction,
        }
    }
}

impl TrendingItem for Repository {
    type Query = ReposQuery;

    const SINGULAR: &'static str = "repository";
    const PLURAL: &'static str = "repositories";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.full_name
    }

    fn url(&self) -> &str {
        &self.html_url
    }

    async fn fetch(client: &ApiClient, query: &ReposQuery) -> Result<Vec<Self>, RequestError> {
        client
            .get_trending_repos(query.sort_by, query.sort_direction)
            .await
    }
}

/// Repositories page: refetches whenever the sort field or direction changes.
/// Search edits only re-filter the batch already on screen.
pub struct ReposPage {
    pub controller: ListController<Repository>,
    filters: watch::Receiver<FilterState>,
}

impl ReposPage {
    pub fn new(store: &FilterStore, backend_address: impl Into<String>) -> Self {
        Self {
            controller: ListController::new(backend_address),
            filters: store.subscribe(),
        }
    }

    /// Always fetch when the page is shown
    pub fn mount(&mut self) -> FetchTicket<ReposQuery> {
        let query = ReposQuery::from_filters(&self.filters.borrow_and_update());
        self.controller.request(query)
    }

    /// Pick up filter changes since the last call
    pub fn sync(&mut self) -> Option<FetchTicket<ReposQuery>> {
        if !self.filters.has_changed().unwrap_or(false) {
            return None;
        }
        let query = ReposQuery::from_filters(&self.filters.borrow_and_update());
        self.controller.request_if_changed(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_uses_current_sort() {
        let store = FilterStore::new();
        store.set_sort_by(SortBy::Date);
        let mut page = ReposPage::new(&store, "http://localhost:8080");

        let ticket = page.mount();
        assert_eq!(
            ticket.query,
            ReposQuery {
                sort_by: SortBy::Date,
                sort_direction: SortDirection::Desc,
            }
        );
        assert!(page.controller.is_loading());
    }

    #[test]
    fn test_mount_twice_refetches() {
        let store = FilterStore::new();
        let mut page = ReposPage::new(&store, "http://localhost:8080");
        let first = page.mount();
        let second = page.mount();
        assert_eq!(first.query, second.query);
        assert!(second.seq > first.seq);
    }

    #[test]
    fn test_direction_change_triggers_fetch() {
        let store = FilterStore::new();
        let mut page = ReposPage::new(&store, "http://localhost:8080");
        let first = page.mount();
        page.controller.complete(first.seq, Ok(vec![]));
        assert!(page.sync().is_none());

        store.toggle_sort_direction();

        let ticket = page.sync().unwrap();
        assert_eq!(ticket.query.sort_direction, SortDirection::Asc);
        assert!(page.controller.is_loading());
        assert!(page.sync().is_none());
    }

    #[test]
    fn test_search_change_does_not_refetch() {
        let store = FilterStore::new();
        let mut page = ReposPage::new(&store, "http://localhost:8080");
        let first = page.mount();
        page.controller.complete(first.seq, Ok(vec![]));

        store.set_search("react");
        store.set_selected_tags(vec!["js".to_string()]);

        assert!(page.sync().is_none());
        assert!(!page.controller.is_loading());
    }

    #[test]
    fn test_toggle_back_before_sync_is_a_no_op() {
        let store = FilterStore::new();
        let mut page = ReposPage::new(&store, "http://localhost:8080");
        page.mount();

        store.toggle_sort_direction();
        store.toggle_sort_direction();

        assert!(page.sync().is_none());
    }

    #[test]
    fn test_reset_after_sort_change_refetches_defaults() {
        let store = FilterStore::new();
        let mut page = ReposPage::new(&store, "http://localhost:8080");
        page.mount();
        store.cycle_sort_by();
        assert_eq!(page.sync().unwrap().query.sort_by, SortBy::Reactions);

        store.reset_filters();
        assert_eq!(page.sync().unwrap().query, ReposQuery::from_filters(&FilterState::default()));
    }
}
