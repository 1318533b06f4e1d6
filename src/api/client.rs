use anyhow::{Context, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::error::RequestError;

/// HTTP client bound to one trending backend
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Create a client for the backend at `base_url` (e.g. "http://localhost:8080/api").
/// Without `timeout` a request waits as long as the backend takes.
pub fn create_client(base_url: &str, timeout: Option<Duration>) -> Result<ApiClient> {
    let mut builder =
        reqwest::Client::builder().user_agent(concat!("js-trends/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let http = builder.build().context("Failed to create HTTP client")?;
    Ok(ApiClient::from_parts(http, base_url))
}

impl ApiClient {
    pub fn from_parts(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Address shown in "make sure the backend is running" hints
    pub fn backend_address(&self) -> String {
        backend_address(&self.base_url)
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| RequestError::InvalidUrl {
            reason: e.to_string(),
            url: raw,
        })
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// Non-2xx responses become `Status`, transport failures `Network` and
    /// undecodable bodies `Parse`. No retries.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        url: Url,
    ) -> Result<T, RequestError> {
        crate::log_debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| RequestError::Network { resource, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status {
                resource,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| RequestError::Network { resource, source })?;

        serde_json::from_slice(&body).map_err(|source| RequestError::Parse { resource, source })
    }
}

/// Reduce a base URL to its origin ("http://host:8080/api" -> "http://host:8080").
/// Unparseable input is returned unchanged.
pub fn backend_address(base_url: &str) -> String {
    match Url::parse(base_url) {
        Ok(url) if url.has_host() => url.origin().ascii_serialization(),
        _ => base_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_address_strips_path() {
        assert_eq!(
            backend_address("http://192.168.254.88:8080/api"),
            "http://192.168.254.88:8080"
        );
        assert_eq!(backend_address("https://trends.example.com/api/"), "https://trends.example.com");
    }

    #[test]
    fn test_backend_address_keeps_garbage() {
        assert_eq!(backend_address("not a url"), "not a url");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::from_parts(reqwest::Client::new(), "http://localhost:8080/api/");
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(
            client.endpoint("github-repos").unwrap().as_str(),
            "http://localhost:8080/api/github-repos"
        );
    }

    #[test]
    fn test_create_client_with_and_without_timeout() {
        let client = create_client("http://localhost:8080/api/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert!(create_client("http://localhost:8080/api", Some(Duration::from_secs(5))).is_ok());
    }

    #[tokio::test]
    async fn test_configured_timeout_is_network_error() {
        use tokio::io::AsyncWriteExt;

        // Answers only after the 50 ms timeout has passed
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/api", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_millis(300)).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\n[]")
                .await;
        });

        let short = create_client(&base, Some(Duration::from_millis(50))).unwrap();
        let url = short.endpoint("github-repos").unwrap();
        let err = short.get_json::<Vec<u64>>("repositories", url).await.unwrap_err();
        assert!(matches!(err, RequestError::Network { .. }));
    }

    #[test]
    fn test_invalid_base_url() {
        let client = ApiClient::from_parts(reqwest::Client::new(), "not a url");
        let err = client.endpoint("github-repos").unwrap_err();
        assert!(matches!(err, RequestError::InvalidUrl { .. }));
    }
}
