use std::future::Future;

use futures::future::join_all;
use serde::de::DeserializeOwned;
use tracing::debug;

pub type FetchResult<T> = Result<T, FetchError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("unexpected response shape from {url}: {message}")]
    Shape { url: String, message: String },
    #[error("no match for {0:?}")]
    NoMatch(String),
}

impl FetchError {
    pub fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub fn shape(url: &str, message: impl Into<String>) -> Self {
        FetchError::Shape {
            url: url.to_string(),
            message: message.into(),
        }
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, FetchError::NoMatch(_))
    }
}

/// Issue a GET and decode the JSON body. Query parameters are appended by
/// reqwest, so callers never concatenate user input into the URL.
pub async fn get_json<T, P>(client: &reqwest::Client, url: &str, params: &[P]) -> FetchResult<T>
where
    T: DeserializeOwned,
    P: serde::Serialize,
{
    debug!(url = %url, "GET");

    let response = client
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(|e| FetchError::transport(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::transport(url, e))?;

    serde_json::from_slice(&bytes).map_err(|e| FetchError::shape(url, e.to_string()))
}

/// Wait for every future to finish and return all outcomes in input order,
/// regardless of which ones failed or when each completed.
pub async fn settle_all<I, F, T>(futures: I) -> Vec<FetchResult<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = FetchResult<T>>,
{
    join_all(futures).await
}

/// Keep the successful outcomes, preserving their relative order.
pub fn successes<T>(settled: Vec<FetchResult<T>>) -> Vec<T> {
    settled.into_iter().filter_map(Result::ok).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_settle_all_keeps_input_order() {
        // Later items finish first; the output order must not change.
        let futs = (0..5u64).map(|i| async move {
            tokio::time::sleep(Duration::from_millis(50 - i * 10)).await;
            if i == 2 {
                Err(FetchError::NoMatch(i.to_string()))
            } else {
                Ok(i)
            }
        });

        let settled = settle_all(futs).await;
        assert_eq!(settled.len(), 5);
        assert!(settled[2].as_ref().unwrap_err().is_no_match());
        assert_eq!(successes(settled), vec![0, 1, 3, 4]);
    }

    #[tokio::test]
    async fn test_settle_all_empty() {
        let settled: Vec<FetchResult<u32>> =
            settle_all(Vec::<futures::future::Ready<FetchResult<u32>>>::new()).await;
        assert!(settled.is_empty());
    }
}
