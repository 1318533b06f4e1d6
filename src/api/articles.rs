use reqwest::Url;

use crate::api::client::ApiClient;
use crate::api::error::RequestError;
use crate::api::types::{find_duplicate_id, Article};

const RESOURCE: &str = "articles";

pub const DEFAULT_ARTICLES_ORDER: &str = "hotness";

/// Build `{base}/devto-articles[?search={tag}]&order={order}`.
/// `search` is omitted entirely when the tag is empty.
pub fn articles_url(client: &ApiClient, search: Option<&str>, order: &str) -> Result<Url, RequestError> {
    let mut url = client.endpoint("devto-articles")?;
    {
        let mut query = url.query_pairs_mut();
        if let Some(tag) = search.filter(|s| !s.is_empty()) {
            query.append_pair("search", tag);
        }
        query.append_pair("order", order);
    }
    Ok(url)
}

impl ApiClient {
    /// Fetch trending articles, optionally narrowed to one tag
    pub async fn get_trending_articles(
        &self,
        search: Option<&str>,
        order: &str,
    ) -> Result<Vec<Article>, RequestError> {
        let url = articles_url(self, search, order)?;
        let articles: Vec<Article> = self.get_json(RESOURCE, url).await.inspect_err(|e| {
            crate::log_warn!("Error fetching trending articles: {}", e);
        })?;

        if let Some(id) = find_duplicate_id(articles.iter().map(|a| a.id)) {
            let err = RequestError::Schema {
                resource: RESOURCE,
                message: format!("duplicate article id {}", id),
            };
            crate::log_warn!("Error fetching trending articles: {}", err);
            return Err(err);
        }

        crate::log_debug!("Fetched {} articles", articles.len());
        Ok(articles)
    }
}
