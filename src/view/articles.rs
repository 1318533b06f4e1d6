use crate::api::{ApiClient, Article, RequestError};
use crate::view::{FetchTicket, ListController, TrendingItem};

/// Backend selection for the articles page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlesQuery {
    pub tag: Option<String>,
    pub order: String,
}

impl TrendingItem for Article {
    type Query = ArticlesQuery;

    const SINGULAR: &'static str = "article";
    const PLURAL: &'static str = "articles";

    fn id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.title
    }

    fn url(&self) -> &str {
        &self.canonical_url
    }

    async fn fetch(client: &ApiClient, query: &ArticlesQuery) -> Result<Vec<Self>, RequestError> {
        client
            .get_trending_articles(query.tag.as_deref(), &query.order)
            .await
    }
}

/// Articles page: refetches when a different tag is submitted.
///
/// The submitted tag belongs to the page and is cleared on every mount; the
/// shared search text is not.
pub struct ArticlesPage {
    pub controller: ListController<Article>,
    submitted_tag: String,
    order: String,
}

impl ArticlesPage {
    pub fn new(backend_address: impl Into<String>, order: impl Into<String>) -> Self {
        Self {
            controller: ListController::new(backend_address),
            submitted_tag: String::new(),
            order: order.into(),
        }
    }

    pub fn submitted_tag(&self) -> &str {
        &self.submitted_tag
    }

    fn query(&self) -> ArticlesQuery {
        ArticlesQuery {
            tag: (!self.submitted_tag.is_empty()).then(|| self.submitted_tag.clone()),
            order: self.order.clone(),
        }
    }

    pub fn mount(&mut self) -> FetchTicket<ArticlesQuery> {
        self.submitted_tag.clear();
        let query = self.query();
        self.controller.request(query)
    }

    /// Submit the search box as a tag. Fetches only if the tag changed.
    pub fn submit_tag(&mut self, tag: &str) -> Option<FetchTicket<ArticlesQuery>> {
        self.submitted_tag = tag.trim().to_string();
        let query = self.query();
        self.controller.request_if_changed(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DEFAULT_ARTICLES_ORDER;

    fn article(id: u64, title: &str) -> Article {
        Article {
            id,
            title: title.to_string(),
            canonical_url: format!("https://dev.to/someone/{}", id),
            positive_reactions_count: 3,
            published_at: "2024-01-05T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_mount_fetches_without_tag() {
        let mut page = ArticlesPage::new("http://localhost:8080", DEFAULT_ARTICLES_ORDER);
        let ticket = page.mount();
        assert_eq!(
            ticket.query,
            ArticlesQuery {
                tag: None,
                order: "hotness".to_string(),
            }
        );
    }

    #[test]
    fn test_submit_new_tag_fetches() {
        let mut page = ArticlesPage::new("http://localhost:8080", DEFAULT_ARTICLES_ORDER);
        let first = page.mount();
        page.controller.complete(first.seq, Ok(vec![article(1, "Intro")]));

        let ticket = page.submit_tag(" webdev ").unwrap();
        assert_eq!(ticket.query.tag.as_deref(), Some("webdev"));
        assert_eq!(page.submitted_tag(), "webdev");
        assert!(page.controller.is_loading());
    }

    #[test]
    fn test_resubmitting_same_tag_is_ignored() {
        let mut page = ArticlesPage::new("http://localhost:8080", DEFAULT_ARTICLES_ORDER);
        page.mount();
        assert!(page.submit_tag("node").is_some());
        assert!(page.submit_tag("node").is_none());
        // Clearing the box goes back to the untagged feed
        assert_eq!(page.submit_tag("").unwrap().query.tag, None);
    }

    #[test]
    fn test_remount_clears_tag() {
        let mut page = ArticlesPage::new("http://localhost:8080", DEFAULT_ARTICLES_ORDER);
        page.mount();
        page.submit_tag("react");
        let ticket = page.mount();
        assert_eq!(ticket.query.tag, None);
        assert_eq!(page.submitted_tag(), "");
    }

    #[test]
    fn test_article_search_matches_title_and_url() {
        let mut page = ArticlesPage::new("http://localhost:8080", DEFAULT_ARTICLES_ORDER);
        let ticket = page.mount();
        page.controller.complete(
            ticket.seq,
            Ok(vec![article(1, "Async Rust"), article(2, "CSS Grid")]),
        );

        assert_eq!(page.controller.visible("grid").len(), 1);
        assert_eq!(page.controller.visible("DEV.TO/SOMEONE/1")[0].id, 1);
        assert_eq!(page.controller.summary("css"), "Showing 1 article");
    }
}
