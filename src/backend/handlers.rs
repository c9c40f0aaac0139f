use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::types::*;
use crate::server::AppState;

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(message)),
    )
        .into_response()
}

pub async fn list_movies(State(state): State<AppState>) -> Response {
    let Some(catalog) = state.catalog.clone() else {
        error!("Error in /api/movies: no catalog loaded");
        return internal_error("Internal server error");
    };

    Json(MoviesResponse {
        arr: catalog.all_titles(),
    })
    .into_response()
}

pub async fn similarity(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let Some(catalog) = state.catalog.clone() else {
        error!("Error in /api/similarity/{}: no catalog loaded", name);
        return internal_error("Failed to fetch recommendations");
    };

    let query = name.clone();
    match tokio::task::spawn_blocking(move || catalog.recommend(&query)).await {
        Ok(movies) => Json(SimilarityResponse { movies }).into_response(),
        Err(e) => {
            error!("Error in /api/similarity/{}: {}", name, e);
            internal_error("Failed to fetch recommendations")
        }
    }
}
