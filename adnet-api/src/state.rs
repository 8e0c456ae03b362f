//! App state: registry backends and configuration.

use std::path::PathBuf;
use std::sync::Arc;

use adnet_core::error::Result;
use adnet_core::traits::{AdRegistry, PublisherRegistry};
use adnet_registry::{FileLedger, MemoryAdRegistry, MemoryPublisherRegistry};

/// Server configuration, read from the environment.
#[derive(Clone, Debug, Default)]
pub struct ApiConfig {
    /// Path to a ledger snapshot file. When unset, the server runs on
    /// in-memory registries and state is lost on shutdown.
    pub ledger_path: Option<PathBuf>,
}

impl ApiConfig {
    /// Reads configuration from the environment (and `.env` if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            ledger_path: std::env::var("ADNET_LEDGER_PATH").ok().map(PathBuf::from),
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Configuration the server was started with.
    pub config: ApiConfig,
    /// Ad campaign registry backend.
    pub ads: Arc<dyn AdRegistry>,
    /// Publisher registry backend.
    pub publishers: Arc<dyn PublisherRegistry>,
}

impl AppState {
    /// Creates state per the configuration: a shared file ledger when
    /// `ledger_path` is set, in-memory registries otherwise.
    pub async fn new(config: ApiConfig) -> Result<Self> {
        let (ads, publishers): (Arc<dyn AdRegistry>, Arc<dyn PublisherRegistry>) =
            match &config.ledger_path {
                Some(path) => {
                    let ledger = Arc::new(FileLedger::new(path).await?);
                    (ledger.clone(), ledger)
                }
                None => (
                    Arc::new(MemoryAdRegistry::new()),
                    Arc::new(MemoryPublisherRegistry::new()),
                ),
            };

        Ok(Self {
            config,
            ads,
            publishers,
        })
    }
}
