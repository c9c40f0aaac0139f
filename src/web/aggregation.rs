use std::sync::Arc;
use tracing::{error, warn};

use crate::backend::RecommendationSource;
use crate::catalog::Catalog;
use crate::config::{ClientConfig, ConfigError};
use crate::fetch::{settle_all, successes, FetchError, FetchResult};
use crate::tmdb::{CastMember, Genre, MetadataApi, MovieSummary, Video};

use super::sources::Collaborators;
use super::view::DetailPage;

/// Recommendation titles looked up per page.
pub const MAX_RECOMMENDATIONS: usize = 16;
pub const TOP_CAST: usize = 5;
pub const GENRES_SHOWN: usize = 3;
pub const OFFICIAL_TRAILER: &str = "Official Trailer";

/// Outcome of step one and its enrichment.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    Resolved {
        movie: MovieSummary,
        cast: Vec<CastMember>,
        trailer: Option<Video>,
    },
    NotFound,
    Unavailable(FetchError),
}

pub struct ResultAggregator {
    metadata: Arc<dyn MetadataApi>,
    recommendations: Arc<dyn RecommendationSource>,
    image_base_url: String,
}

impl ResultAggregator {
    pub fn new(
        metadata: Arc<dyn MetadataApi>,
        recommendations: Arc<dyn RecommendationSource>,
        image_base_url: impl Into<String>,
    ) -> Self {
        Self {
            metadata,
            recommendations,
            image_base_url: image_base_url.into(),
        }
    }

    pub fn from_config(config: &ClientConfig, catalog: Option<Arc<Catalog>>) -> Result<Self, ConfigError> {
        let Collaborators {
            metadata,
            recommendations,
        } = Collaborators::connect(config, catalog)?;
        Ok(Self::new(metadata, recommendations, config.image_base_url.clone()))
    }

    /// Resolve `title` into a full detail page. The three independent chains
    /// (primary + enrichment, recommendations, genre table) run concurrently
    /// and none of their failures is fatal.
    pub async fn aggregate(&self, title: &str) -> DetailPage {
        let (primary, recommendations, genres) = tokio::join!(
            self.resolve_primary(title),
            self.recommendations(title),
            self.genre_table(),
        );

        DetailPage::build(title, primary, &genres, recommendations, &self.image_base_url)
    }

    pub async fn resolve_primary(&self, title: &str) -> Primary {
        let movie = match self.metadata.first_match(title).await {
            Ok(movie) => movie,
            Err(FetchError::NoMatch(_)) => {
                warn!(title = %title, "No metadata match for title");
                return Primary::NotFound;
            }
            Err(e) => {
                error!(title = %title, error = %e, "Error resolving title");
                return Primary::Unavailable(e);
            }
        };

        let (cast, trailer) = tokio::join!(self.cast(movie.id), self.trailer(movie.id));
        Primary::Resolved {
            movie,
            cast,
            trailer,
        }
    }

    pub async fn cast(&self, movie_id: u64) -> Vec<CastMember> {
        match self.metadata.credits(movie_id).await {
            Ok(cast) => top_cast(cast),
            Err(e) => {
                error!(movie_id = movie_id, error = %e, "Error fetching credits");
                Vec::new()
            }
        }
    }

    pub async fn trailer(&self, movie_id: u64) -> Option<Video> {
        match self.metadata.details_with_videos(movie_id).await {
            Ok(details) => details
                .videos
                .and_then(|v| select_trailer(&v.results).cloned()),
            Err(e) => {
                error!(movie_id = movie_id, error = %e, "Error fetching videos");
                None
            }
        }
    }

    /// Backend recommendations for `title`, each resolved to its first
    /// metadata match. Unresolvable titles are dropped; the rest keep the
    /// backend's order.
    pub async fn recommendations(&self, title: &str) -> Vec<MovieSummary> {
        let titles = match self.recommendations.similar(title).await {
            Ok(titles) => titles,
            Err(e) => {
                error!(title = %title, error = %e, "Error fetching recommendations");
                return Vec::new();
            }
        };

        let capped = &titles[..titles.len().min(MAX_RECOMMENDATIONS)];
        self.resolve_titles(capped).await
    }

    /// Look every title up in parallel and keep the first match of each
    /// resolvable one, in input order. One failed lookup never aborts the
    /// batch.
    pub async fn resolve_titles(&self, titles: &[String]) -> Vec<MovieSummary> {
        let lookups = titles.iter().map(|t| self.lookup(t));
        successes(settle_all(lookups).await)
    }

    async fn lookup(&self, title: &str) -> FetchResult<MovieSummary> {
        self.metadata.first_match(title).await.map_err(|e| {
            if e.is_no_match() {
                warn!(title = %title, "No TMDb results");
            } else {
                error!(title = %title, error = %e, "Error fetching TMDb data");
            }
            e
        })
    }

    async fn genre_table(&self) -> Vec<Genre> {
        match self.metadata.genres().await {
            Ok(genres) => genres,
            Err(e) => {
                error!(error = %e, "Error fetching genres");
                Vec::new()
            }
        }
    }
}

pub fn top_cast(mut cast: Vec<CastMember>) -> Vec<CastMember> {
    cast.truncate(TOP_CAST);
    cast
}

/// "Official Trailer" by exact name, else the first video, else none.
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|v| v.name == OFFICIAL_TRAILER)
        .or_else(|| videos.first())
}

/// Names for the first few genre ids; ids missing from the table are skipped.
pub fn genre_names(ids: &[u32], table: &[Genre]) -> Vec<String> {
    ids.iter()
        .take(GENRES_SHOWN)
        .filter_map(|id| table.iter().find(|g| g.id == *id))
        .map(|g| g.name.clone())
        .collect()
}

/// Separators go between rendered names only, so a skipped id never leaves a
/// dangling or doubled comma.
pub fn genre_line(names: &[String]) -> String {
    names.join(", ")
}
