//! Catalog configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::Result;

/// Catalog settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub max_connections: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("meals.db"),
            max_connections: 1,
        }
    }
}

impl CatalogSettings {
    /// Settings pointing at the given database file
    pub fn with_database(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
            ..Self::default()
        }
    }

    /// Load settings from a JSON file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let settings: CatalogSettings = serde_json::from_str(&raw)?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings.normalized())
    }

    /// Enforce sane minimums
    pub fn normalized(mut self) -> Self {
        if self.max_connections == 0 {
            self.max_connections = 1;
        }
        self
    }
}
