use std::sync::Arc;
use tracing::info;

use crate::backend::{BackendClient, RecommendationSource};
use crate::catalog::Catalog;
use crate::config::{ClientConfig, ConfigError};
use crate::tmdb::{MetadataApi, TmdbClient};

/// The two external collaborators every page flow talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub metadata: Arc<dyn MetadataApi>,
    pub recommendations: Arc<dyn RecommendationSource>,
}

impl Collaborators {
    /// A configured remote backend wins over the local catalog.
    pub fn connect(config: &ClientConfig, catalog: Option<Arc<Catalog>>) -> Result<Self, ConfigError> {
        let metadata = TmdbClient::new(config).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let recommendations: Arc<dyn RecommendationSource> =
            match (&config.backend_base_url, catalog) {
                (Some(url), _) => {
                    info!("Using recommendation backend at {}", url);
                    Arc::new(
                        BackendClient::new(url, config)
                            .map_err(|e| ConfigError::Invalid(e.to_string()))?,
                    )
                }
                (None, Some(catalog)) => {
                    info!("Using in-process catalog for recommendations");
                    Arc::new(catalog)
                }
                (None, None) => return Err(ConfigError::NoRecommendationSource),
            };

        Ok(Self {
            metadata: Arc::new(metadata),
            recommendations,
        })
    }
}
