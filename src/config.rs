//! Runtime configuration from environment variables
//!
//! - `CATALOG_PATH`: optional JSON catalog replacing the built-in one
//! - `STORE_PATH`: analysis store file (default `soil_analysis_store.json`)
//! - `ANALYST_NAME`: name recorded on new readings (default `Utilisateur`)

use anyhow::Result;
use std::path::PathBuf;

use crate::catalog::ParameterCatalog;
use crate::reading::DEFAULT_ANALYST_NAME;

pub const DEFAULT_STORE_PATH: &str = "soil_analysis_store.json";

/// Default log filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "soil_scorer_rust=info,warn";

#[derive(Debug, Clone, PartialEq)]
pub struct ScorerConfig {
    pub catalog_path: Option<PathBuf>,
    pub store_path: PathBuf,
    pub analyst_name: String,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            analyst_name: DEFAULT_ANALYST_NAME.to_string(),
        }
    }
}

impl ScorerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            catalog_path: var("CATALOG_PATH").map(PathBuf::from),
            store_path: var("STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            analyst_name: var("ANALYST_NAME").unwrap_or(defaults.analyst_name),
        }
    }

    /// Built-in catalog unless `catalog_path` points at a custom one
    pub fn load_catalog(&self) -> Result<ParameterCatalog> {
        match &self.catalog_path {
            Some(path) => {
                tracing::info!("Loading catalog: {:?}", path);
                ParameterCatalog::load(path)
            }
            None => Ok(ParameterCatalog::standard()),
        }
    }
}

/// Initialize tracing (structured logging) for the binaries
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
