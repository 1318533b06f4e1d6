pub mod articles;
pub mod client;
pub mod error;
pub mod repos;
pub mod types;

pub use articles::{articles_url, DEFAULT_ARTICLES_ORDER};
pub use client::{backend_address, create_client, ApiClient};
pub use error::RequestError;
pub use repos::repos_url;
pub use types::{Article, Repository};
