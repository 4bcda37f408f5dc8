//! HTTP surface for the braid calculator.
//!
//! # Endpoints
//!
//! - `GET /` - Braid form
//! - `POST /` - Submit the form, render cord lengths or field errors
//! - `GET /health` - Health check with catalog details
//! - `GET /api/braids` - List catalog patterns
//! - `GET /api/braids/{name}` - Get one pattern
//! - `POST /api/calculate` - Calculate cord lengths from a JSON request

mod api;
mod pages;
mod security;

use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use calc_core::{Catalog, CatalogInfo};

use crate::config::Config;

pub use api::{ApiError, BraidListResponse, HealthResponse};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Braid catalog (immutable after load)
    catalog: Arc<Catalog>,
    /// Where the catalog came from
    catalog_info: Arc<CatalogInfo>,
}

impl AppState {
    /// Creates application state from an already loaded catalog.
    pub fn new(config: Config, catalog: Catalog, catalog_info: CatalogInfo) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            catalog_info: Arc::new(catalog_info),
        }
    }

    /// Loads the catalog named by the configuration and builds the state.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or is invalid.
    pub fn load(config: Config) -> anyhow::Result<Self> {
        let (catalog, info) = calc_core::load_catalog_from(config.catalog.path.as_deref())
            .context("Failed to load braid catalog")?;

        info!(
            "Loaded {} braid patterns from {}",
            info.pattern_count, info.source
        );

        Ok(Self::new(config, catalog, info))
    }

    /// Returns the braid catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the catalog load details.
    #[must_use]
    pub fn catalog_info(&self) -> &CatalogInfo {
        &self.catalog_info
    }
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let hsts = state.config.security.hsts;

    let router = Router::new()
        // Form page
        .route("/", get(pages::show_form).post(pages::submit_form))
        // Health check
        .route("/health", get(api::health_check))
        // Catalog endpoints
        .route("/api/braids", get(api::list_braids))
        .route("/api/braids/{name}", get(api::get_braid))
        // Calculation endpoint
        .route("/api/calculate", post(api::calculate))
        .with_state(state);

    security::with_security_headers(router, hsts).layer(TraceLayer::new_for_http())
}

/// Runs the web server until it fails.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the address cannot be
/// bound, or the server stops with an I/O error.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let state = AppState::load(config)?;
    let app = create_router(state);

    info!("Starting braid calculator on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
