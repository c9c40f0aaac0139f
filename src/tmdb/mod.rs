pub mod client;
pub mod image;
pub mod types;

use async_trait::async_trait;

use crate::fetch::{FetchError, FetchResult};

pub use client::TmdbClient;
pub use image::{image_url, wikipedia_url, youtube_url, BACKDROP_SIZE, POSTER_SIZE, PROFILE_SIZE};
pub use types::*;

/// The metadata API as seen by the page flows.
#[async_trait]
pub trait MetadataApi: Send + Sync {
    async fn genres(&self) -> FetchResult<Vec<Genre>>;
    async fn search_movies(&self, query: &str) -> FetchResult<Vec<MovieSummary>>;
    async fn credits(&self, movie_id: u64) -> FetchResult<Vec<CastMember>>;
    async fn details_with_videos(&self, movie_id: u64) -> FetchResult<MovieDetails>;
    async fn discover(&self, query: &DiscoverQuery) -> FetchResult<Vec<MovieSummary>>;

    /// The first search result for `query`; an empty result list is `NoMatch`.
    async fn first_match(&self, query: &str) -> FetchResult<MovieSummary> {
        self.search_movies(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::NoMatch(query.to_string()))
    }
}
