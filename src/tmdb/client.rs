use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::config::ClientConfig;
use crate::fetch::{get_json, FetchError, FetchResult};

use super::types::*;
use super::MetadataApi;

/// HTTP client for the TMDB v3 REST API. The api key travels as a query
/// parameter on every request.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(config: &ClientConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::transport(&config.metadata_base_url, e))?;

        Ok(Self {
            client,
            base_url: config.metadata_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T>(&self, path: &str, extra: &[(&str, String)]) -> FetchResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut params: Vec<(&str, String)> = vec![("api_key", self.api_key.clone())];
        params.extend(extra.iter().cloned());
        get_json(&self.client, &self.url(path), &params).await
    }
}

#[async_trait]
impl MetadataApi for TmdbClient {
    async fn genres(&self) -> FetchResult<Vec<Genre>> {
        let response: GenreListResponse = self.get("/genre/movie/list", &[]).await?;
        Ok(response.genres)
    }

    async fn search_movies(&self, query: &str) -> FetchResult<Vec<MovieSummary>> {
        debug!(query = %query, "Searching TMDB movies");
        let response: SearchResponse<MovieSummary> = self
            .get("/search/movie", &[("query", query.to_string())])
            .await?;
        Ok(response.results)
    }

    async fn credits(&self, movie_id: u64) -> FetchResult<Vec<CastMember>> {
        let response: CreditsResponse = self
            .get(&format!("/movie/{}/credits", movie_id), &[])
            .await?;
        Ok(response.cast)
    }

    async fn details_with_videos(&self, movie_id: u64) -> FetchResult<MovieDetails> {
        self.get(
            &format!("/movie/{}", movie_id),
            &[("append_to_response", "videos".to_string())],
        )
        .await
    }

    async fn discover(&self, query: &DiscoverQuery) -> FetchResult<Vec<MovieSummary>> {
        let mut params = vec![
            ("sort_by", "popularity.desc".to_string()),
            ("with_genres", query.with_genres()),
        ];
        if let Some(date) = query.release_date_lte {
            params.push(("release_date.lte", date.format("%Y-%m-%d").to_string()));
        }

        let response: SearchResponse<MovieSummary> = self.get("/discover/movie", &params).await?;
        Ok(response.results)
    }
}
