use serde::{Deserialize, Serialize};

/// `GET /api/movies`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviesResponse {
    pub arr: Vec<String>,
}

/// `GET /api/similarity/:name`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResponse {
    pub movies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
