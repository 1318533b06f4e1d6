use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_ARTICLES_ORDER;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL, e.g. "http://localhost:8080/api"
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// `order` sent to /devto-articles
    #[serde(default = "default_articles_order")]
    pub articles_order: String,
    /// Per-request timeout. Unset means requests never time out.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_articles_order() -> String {
    DEFAULT_ARTICLES_ORDER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            articles_order: default_articles_order(),
            request_timeout_secs: None,
        }
    }
}
