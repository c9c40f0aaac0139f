use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::server::AppState;
use crate::tmdb::Genre;

use super::discovery::{DiscoveryFlow, GridState};
use super::home::{genre_list, search_box, HomePage};
use super::view::DetailPage;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct DiscoverParams {
    #[serde(default)]
    pub genres: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LookupResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    pub not_found: bool,
}

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub placeholder: String,
    pub titles: Vec<String>,
    pub genres: Vec<Genre>,
    pub grid: GridState,
}

pub async fn get_home(State(state): State<AppState>) -> Json<HomeResponse> {
    let home = HomePage::mount(
        state.metadata.as_ref(),
        state.recommendations.as_ref(),
        &state.client,
    )
    .await;

    Json(HomeResponse {
        placeholder: home.search.placeholder().to_string(),
        titles: home.search.titles().to_vec(),
        grid: home.discovery.grid(),
        genres: home.genres,
    })
}

pub async fn get_genres(State(state): State<AppState>) -> Json<Vec<Genre>> {
    Json(genre_list(state.metadata.as_ref()).await)
}

pub async fn suggest(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SuggestResponse> {
    let mut sb = search_box(state.recommendations.as_ref()).await;
    sb.input(&params.q);
    Json(SuggestResponse {
        suggestions: sb.suggestions().to_vec(),
    })
}

pub async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<LookupResponse> {
    let mut sb = search_box(state.recommendations.as_ref()).await;
    sb.input(&params.q);
    let route = sb.submit();
    Json(LookupResponse {
        route: route.map(|r| r.path()),
        not_found: sb.not_found(),
    })
}

/// Parse `28,12` into genre ids. Blank entries are ignored.
pub fn parse_genre_ids(raw: &str) -> Result<Vec<u32>, std::num::ParseIntError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

pub async fn discover(
    State(state): State<AppState>,
    Query(params): Query<DiscoverParams>,
) -> Result<Json<GridState>, StatusCode> {
    let ids = parse_genre_ids(params.genres.as_deref().unwrap_or(""))
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    let mut flow = DiscoveryFlow::new(state.client.release_date_lte);
    let command = flow.select(ids);
    Ok(Json(flow.run(state.metadata.as_ref(), command).await))
}

pub async fn get_detail(State(state): State<AppState>, Path(title): Path<String>) -> Json<DetailPage> {
    Json(state.aggregator.aggregate(&title).await)
}
