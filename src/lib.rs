pub mod backend;
pub mod catalog;
pub mod config;
pub mod fetch;
pub mod middleware;
pub mod server;
pub mod tmdb;
pub mod web;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::web::{Collaborators, DetailPage, DiscoveryFlow, GridState, ResultAggregator};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] catalog::CatalogError),
    #[error("Server error: {0}")]
    Server(String),
}

pub fn load_catalog(config: &Config) -> Result<Option<Arc<Catalog>>, ServerError> {
    match &config.catalog {
        Some(catalog) => {
            info!("Loading catalog from {}", catalog.filename);
            Ok(Some(Arc::new(Catalog::from_path(&catalog.filename)?)))
        }
        None => Ok(None),
    }
}

pub async fn serve(config: Config) -> Result<(), ServerError> {
    let client = config.client_config()?;
    let catalog = load_catalog(&config)?;
    let collaborators = Collaborators::connect(&client, catalog.clone())?;

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let tls = match (&config.listen.tlscert, &config.listen.tlskey) {
        (Some(cert), Some(key)) => Some((cert.clone(), key.clone())),
        _ => None,
    };

    let state = server::AppState::new(config, client, catalog, collaborators);
    let app = server::build_router(state);

    if let Some((cert_path, key_path)) = tls {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}

/// Build the detail page for one title without starting a server.
pub async fn lookup(config: &Config, title: &str) -> Result<DetailPage, ServerError> {
    let client = config.client_config()?;
    let catalog = load_catalog(config)?;
    let aggregator = ResultAggregator::from_config(&client, catalog)?;
    Ok(aggregator.aggregate(title).await)
}

/// Run one discover-by-genre query.
pub async fn discover(config: &Config, genres: &[u32]) -> Result<GridState, ServerError> {
    let client = config.client_config()?;
    let catalog = load_catalog(config)?;
    let collaborators = Collaborators::connect(&client, catalog)?;

    let mut flow = DiscoveryFlow::new(client.release_date_lte);
    let command = flow.select(genres.iter().copied());
    Ok(flow.run(collaborators.metadata.as_ref(), command).await)
}
