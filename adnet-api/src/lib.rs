//! # ADNET API Server
//!
//! REST API for the ADNET registry.
//!
//! ## Endpoints
//!
//! - `POST /api/v1/ads` - Create an ad campaign
//! - `GET  /api/v1/ads/:id` - Get a campaign
//! - `PUT  /api/v1/ads/:id/status` - Update campaign status (owner only)
//! - `PUT  /api/v1/ads/:id/budget` - Update campaign budget (owner only)
//! - `POST /api/v1/publishers` - Register a publisher
//! - `GET  /api/v1/publishers/:id` - Get a publisher
//! - `PUT  /api/v1/publishers/:id/ad-spaces` - Replace ad spaces (owner only)
//! - `POST /api/v1/publishers/:id/earnings` - Credit earnings (any caller)
//! - `GET  /api/v1/stats` - Registry statistics
//!
//! The caller principal is supplied per request via the `x-adnet-caller`
//! header; in a full deployment this is set by the signing gateway in front
//! of the server.
//!
//! ## Example
//!
//! ```rust,ignore
//! use adnet_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::new(config).await?;
//! server.run(([0, 0, 0, 0], 3001)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{ApiConfig, AppState};
pub use error::ApiError;
pub use handlers::CALLER_HEADER;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// API server for ADNET.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    ///
    /// Opens the ledger file when `ledger_path` is configured.
    pub async fn new(config: ApiConfig) -> adnet_core::Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config).await?),
        })
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("ADNET API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}
