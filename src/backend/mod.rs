pub mod client;
pub mod handlers;
pub mod types;

use async_trait::async_trait;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::fetch::FetchResult;

pub use client::BackendClient;
pub use handlers::*;
pub use types::*;

/// Source of the search-box title list and of similarity recommendations.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn titles(&self) -> FetchResult<Vec<String>>;
    async fn similar(&self, title: &str) -> FetchResult<Vec<String>>;
}

/// The in-process catalog answers the same contract as a remote backend.
#[async_trait]
impl RecommendationSource for Arc<Catalog> {
    async fn titles(&self) -> FetchResult<Vec<String>> {
        Ok(self.all_titles())
    }

    async fn similar(&self, title: &str) -> FetchResult<Vec<String>> {
        Ok(self.recommend(title))
    }
}
