use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

use crate::config::ClientConfig;
use crate::fetch::{get_json, FetchError, FetchResult};

use super::RecommendationSource;

const NO_PARAMS: &[(&str, &str)] = &[];

/// Client for a remote similarity backend speaking the `/api/movies` and
/// `/api/similarity/:name` contract.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, config: &ClientConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::transport(base_url, e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Pull a list of strings out of `field`. A missing field is treated as an
/// empty list when `required` is false; anything other than an array is a
/// shape error. Non-string elements are skipped.
fn string_array(url: &str, body: &Value, field: &str, required: bool) -> FetchResult<Vec<String>> {
    match body.get(field) {
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()),
        None if !required => Ok(Vec::new()),
        Some(other) => Err(FetchError::shape(
            url,
            format!("field {:?} is not an array: {}", field, other),
        )),
        None => Err(FetchError::shape(url, format!("missing field {:?}", field))),
    }
}

#[async_trait]
impl RecommendationSource for BackendClient {
    async fn titles(&self) -> FetchResult<Vec<String>> {
        let url = format!("{}/api/movies", self.base_url);
        let body: Value = get_json(&self.client, &url, NO_PARAMS).await?;
        string_array(&url, &body, "arr", false)
    }

    async fn similar(&self, title: &str) -> FetchResult<Vec<String>> {
        let url = format!(
            "{}/api/similarity/{}",
            self.base_url,
            urlencoding::encode(title)
        );
        let body: Value = get_json(&self.client, &url, NO_PARAMS).await?;
        string_array(&url, &body, "movies", true).map_err(|e| {
            warn!(error = %e, "Invalid movies array from backend");
            e
        })
    }
}
