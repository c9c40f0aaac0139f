use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Environment variable that overrides `tmdb.apikey`.
pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub discover: DiscoverConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default = "default_logformat")]
    pub logformat: String,
    #[serde(skip)]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(alias = "api_key", rename = "apikey")]
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(alias = "base_url", rename = "baseurl")]
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    #[serde(alias = "image_base_url", rename = "imagebaseurl")]
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_tmdb_base_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

/// Remote similarity backend. When `baseurl` is unset the local catalog
/// answers recommendation queries in-process.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct BackendConfig {
    #[serde(alias = "base_url", rename = "baseurl")]
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoverConfig {
    #[serde(default = "default_release_date_lte")]
    pub release_date_lte: Option<NaiveDate>,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            release_date_lte: default_release_date_lte(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Origins allowed to call `/api/*` from a browser.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub origins: Vec<String>,
}

/// Everything the page flows need to reach their collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub backend_base_url: Option<String>,
    pub metadata_base_url: String,
    pub image_base_url: String,
    pub release_date_lte: Option<NaiveDate>,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            backend_base_url: None,
            metadata_base_url: default_tmdb_base_url(),
            image_base_url: default_image_base_url(),
            release_date_lte: default_release_date_lte(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_metadata_base_url(mut self, url: impl Into<String>) -> Self {
        self.metadata_base_url = url.into();
        self
    }
}

fn default_port() -> String {
    "5000".to_string()
}

fn default_logformat() -> String {
    "text".to_string()
}

fn default_tmdb_base_url() -> String {
    DEFAULT_TMDB_BASE_URL.to_string()
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_release_date_lte() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2019, 12, 12)
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(path, &content)
    }

    pub fn from_yaml(path: &str, content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        if let Ok(key) = std::env::var(TMDB_API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.tmdb.api_key = Some(key);
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.is_none() && self.backend.base_url.is_none() {
            return Err(ConfigError::NoRecommendationSource);
        }
        if self.listen.tlscert.is_some() != self.listen.tlskey.is_some() {
            return Err(ConfigError::Invalid(
                "listen.tlscert and listen.tlskey must be set together".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the explicit client configuration handed to the page flows.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let api_key = self
            .tmdb
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(ClientConfig {
            api_key,
            backend_base_url: self.backend.base_url.clone(),
            metadata_base_url: self.tmdb.base_url.clone(),
            image_base_url: self.tmdb.image_base_url.clone(),
            release_date_lte: self.discover.release_date_lte,
            timeout_secs: self.http.timeout_secs,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("No TMDB api key configured (set tmdb.apikey or {})", TMDB_API_KEY_ENV)]
    MissingApiKey,
    #[error("Either catalog.filename or backend.baseurl must be configured")]
    NoRecommendationSource,
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
