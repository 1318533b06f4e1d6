use reqwest::Url;

use crate::api::client::ApiClient;
use crate::api::error::RequestError;
use crate::api::types::{find_duplicate_id, Repository};
use crate::filter::{SortBy, SortDirection};

const RESOURCE: &str = "repositories";

/// Build `{base}/github-repos?search={sort_by}&order={order}`.
///
/// The backend reads the sort field from a parameter named `search`; keep it
/// that way or existing backends stop sorting.
pub fn repos_url(client: &ApiClient, sort_by: SortBy, order: SortDirection) -> Result<Url, RequestError> {
    let mut url = client.endpoint("github-repos")?;
    url.query_pairs_mut()
        .append_pair("search", sort_by.as_str())
        .append_pair("order", order.as_str());
    Ok(url)
}

impl ApiClient {
    /// Fetch trending repositories, ranked by the backend
    pub async fn get_trending_repos(
        &self,
        sort_by: SortBy,
        order: SortDirection,
    ) -> Result<Vec<Repository>, RequestError> {
        let url = repos_url(self, sort_by, order)?;
        let repos: Vec<Repository> = self.get_json(RESOURCE, url).await.inspect_err(|e| {
            crate::log_warn!("Error fetching trending repos: {}", e);
        })?;

        if let Some(id) = find_duplicate_id(repos.iter().map(|r| r.id)) {
            let err = RequestError::Schema {
                resource: RESOURCE,
                message: format!("duplicate repository id {}", id),
            };
            crate::log_warn!("Error fetching trending repos: {}", err);
            return Err(err);
        }

        crate::log_debug!("Fetched {} repositories", repos.len());
        Ok(repos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{client, closed_base_url, serve_once};

    #[test]
    fn test_repos_url_for_every_sort_pair() {
        let api = client("http://localhost:8080/api");
        for sort_by in [SortBy::Stars, SortBy::Reactions, SortBy::Date] {
            for order in [SortDirection::Asc, SortDirection::Desc] {
                let url = repos_url(&api, sort_by, order).unwrap();
                assert_eq!(url.path(), "/api/github-repos");
                let pairs: Vec<(String, String)> = url
                    .query_pairs()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect();
                assert_eq!(
                    pairs,
                    vec![
                        ("search".to_string(), sort_by.to_string()),
                        ("order".to_string(), order.to_string()),
                    ]
                );
            }
        }
    }

    #[test]
    fn test_repos_url_default_literal() {
        let api = client("http://localhost:8080/api");
        let url = repos_url(&api, SortBy::default(), SortDirection::default()).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/github-repos?search=stars&order=desc"
        );
    }

    #[tokio::test]
    async fn test_get_trending_repos_success() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"id":1,"fullName":"foo/bar","htmlUrl":"https://x/foo/bar","stargazersCount":120},
                {"id":2,"fullName":"baz/qux","htmlUrl":"https://x/baz/qux","stargazersCount":80}]"#,
        )
        .await;

        let repos = client(&base)
            .get_trending_repos(SortBy::Stars, SortDirection::Asc)
            .await
            .unwrap();

        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].full_name, "foo/bar");
        assert_eq!(repos[1].stargazers_count, 80);
        assert_eq!(
            server.await.unwrap(),
            "GET /api/github-repos?search=stars&order=asc HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_get_trending_repos_http_error() {
        let (base, _server) = serve_once("503 Service Unavailable", "").await;

        let err = client(&base)
            .get_trending_repos(SortBy::Stars, SortDirection::Desc)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert_eq!(
            err.to_string(),
            "Failed to fetch repositories: 503 Service Unavailable"
        );
    }

    #[tokio::test]
    async fn test_get_trending_repos_bad_json() {
        let (base, _server) = serve_once("200 OK", "<html>oops</html>").await;

        let err = client(&base)
            .get_trending_repos(SortBy::Stars, SortDirection::Desc)
            .await
            .unwrap_err();

        assert!(matches!(err, RequestError::Parse { .. }));
        assert!(err.to_string().starts_with("Failed to parse repositories response"));
    }

    #[tokio::test]
    async fn test_get_trending_repos_duplicate_ids() {
        let (base, _server) = serve_once(
            "200 OK",
            r#"[{"id":9,"fullName":"a/b","htmlUrl":"u","stargazersCount":1},
                {"id":9,"fullName":"c/d","htmlUrl":"v","stargazersCount":2}]"#,
        )
        .await;

        let err = client(&base)
            .get_trending_repos(SortBy::Stars, SortDirection::Desc)
            .await
            .unwrap_err();

        assert!(matches!(err, RequestError::Schema { .. }));
        assert!(err.to_string().contains("duplicate repository id 9"));
    }

    #[tokio::test]
    async fn test_get_trending_repos_connection_refused() {
        let base = closed_base_url().await;

        let err = client(&base)
            .get_trending_repos(SortBy::Stars, SortDirection::Desc)
            .await
            .unwrap_err();

        assert!(matches!(err, RequestError::Network { .. }));
        assert_eq!(err.status(), None);
    }
}
