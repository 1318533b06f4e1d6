use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A trending GitHub repository as returned by `/github-repos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: u64,
    pub full_name: String,
    pub html_url: String,
    pub stargazers_count: u64,
}

/// A trending Dev.to article as returned by `/devto-articles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub canonical_url: String,
    pub positive_reactions_count: u64,
    pub published_at: String, // ISO-8601, kept verbatim
}

/// Return the first id that appears twice in a batch
pub fn find_duplicate_id<I>(ids: I) -> Option<u64>
where
    I: IntoIterator<Item = u64>,
{
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}
