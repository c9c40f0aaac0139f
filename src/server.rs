use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::backend::{ErrorResponse, RecommendationSource};
use crate::catalog::Catalog;
use crate::config::{ClientConfig, Config};
use crate::tmdb::MetadataApi;
use crate::web::{Collaborators, ResultAggregator};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<ClientConfig>,
    pub catalog: Option<Arc<Catalog>>,
    pub metadata: Arc<dyn MetadataApi>,
    pub recommendations: Arc<dyn RecommendationSource>,
    pub aggregator: Arc<ResultAggregator>,
}

impl AppState {
    pub fn new(
        config: Config,
        client: ClientConfig,
        catalog: Option<Arc<Catalog>>,
        collaborators: Collaborators,
    ) -> Self {
        let aggregator = ResultAggregator::new(
            collaborators.metadata.clone(),
            collaborators.recommendations.clone(),
            client.image_base_url.clone(),
        );

        Self {
            config: Arc::new(config),
            client: Arc::new(client),
            catalog,
            metadata: collaborators.metadata,
            recommendations: collaborators.recommendations,
            aggregator: Arc::new(aggregator),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let mut api_routes = Router::new()
        .route("/api/genres", get(crate::web::get_genres))
        .route("/api/suggest", get(crate::web::suggest))
        .route("/api/lookup", get(crate::web::lookup))
        .route("/api/discover", get(crate::web::discover))
        .route("/api/home", get(crate::web::get_home))
        .route("/api/detail/:title", get(crate::web::get_detail));

    // The similarity backend contract is only served from a local catalog.
    if state.catalog.is_some() {
        api_routes = api_routes
            .route("/api/movies", get(crate::backend::list_movies))
            .route("/api/similarity/:name", get(crate::backend::similarity));
    }

    let cors = cors_layer(&state.config.cors.origins);

    let mut router = Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(api_routes.layer(cors))
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        // Unknown paths get index.html so client-side routes like
        // /search/:title load the app.
        let index = Path::new(appdir).join("index.html");
        router = router.fallback_service(ServeDir::new(appdir).fallback(ServeFile::new(index)));
    }

    let router = router
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Path rewriting has to happen before the inner router matches.
    Router::new()
        .fallback_service(router)
        .layer(axum::middleware::from_fn(crate::middleware::normalize_path))
}

/// An empty origin list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found"))).into_response()
}
