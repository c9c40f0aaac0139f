use tracing::{error, info};

use crate::backend::RecommendationSource;
use crate::config::ClientConfig;
use crate::tmdb::{Genre, MetadataApi};

use super::discovery::DiscoveryFlow;
use super::search_box::SearchBox;

pub const SEARCH_PLACEHOLDER: &str = "Search for a Movie";

/// Home page state after mount: the search box, the genre picker and an
/// empty discovery grid.
#[derive(Debug, Clone)]
pub struct HomePage {
    pub search: SearchBox,
    pub genres: Vec<Genre>,
    pub discovery: DiscoveryFlow,
}

impl HomePage {
    /// Fetch the title list and the genre catalog concurrently. Either may
    /// fail on its own and leaves its region empty.
    pub async fn mount(
        metadata: &dyn MetadataApi,
        source: &dyn RecommendationSource,
        config: &ClientConfig,
    ) -> Self {
        let (search, genres) = tokio::join!(search_box(source), genre_list(metadata));
        info!(
            titles = search.titles().len(),
            genres = genres.len(),
            "Home page mounted"
        );

        Self {
            search,
            genres,
            discovery: DiscoveryFlow::new(config.release_date_lte),
        }
    }

    pub fn genre_selected(&self, id: u32) -> bool {
        self.discovery.selection().contains(id)
    }
}

/// Search box over the backend's title list, empty when the list is unavailable.
pub async fn search_box(source: &dyn RecommendationSource) -> SearchBox {
    let titles = source.titles().await.unwrap_or_else(|e| {
        error!(error = %e, "Error fetching movies");
        Vec::new()
    });
    SearchBox::new(titles, SEARCH_PLACEHOLDER)
}

pub async fn genre_list(metadata: &dyn MetadataApi) -> Vec<Genre> {
    metadata.genres().await.unwrap_or_else(|e| {
        error!(error = %e, "Error fetching genres");
        Vec::new()
    })
}
