use std::fmt::Debug;
use std::fs::read_to_string;
use std::path::PathBuf;
use rocket::figment::Figment;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::info;
use shared::catalog::{Catalog, CatalogError};
use crate::store::{JsonFileVoteStore, MemoryVoteStore, VoteStore};

const DEFAULT_VOTES_FILE: &str = "data/votes.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Figment(#[from] rocket::figment::Error),
    #[error("Failed to read catalog {}: {source}", .path.display())]
    CatalogIo { path: PathBuf, source: std::io::Error },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    storage: Option<StorageKind>,
    votes_file: Option<PathBuf>,
    catalog_file: Option<PathBuf>,
    static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageKind,
    pub votes_file: PathBuf,
    pub catalog_file: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            votes_file: PathBuf::from(DEFAULT_VOTES_FILE),
            catalog_file: None,
            static_dir: None,
        }
    }
}

fn or_default<T: Debug>(key: &str, value: Option<T>, default: T) -> T {
    value.unwrap_or_else(|| {
        info!("{key} not set, using default: {default:?}");
        default
    })
}

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let raw: RawConfig = figment.extract()?;
        let defaults = AppConfig::default();

        let config = Self {
            storage: or_default("storage", raw.storage, defaults.storage),
            votes_file: or_default("votes_file", raw.votes_file, defaults.votes_file),
            catalog_file: raw.catalog_file,
            static_dir: raw.static_dir,
        };

        if config.catalog_file.is_none() {
            info!("catalog_file not set, using built-in catalog");
        }
        Ok(config)
    }

    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        let Some(path) = &self.catalog_file else {
            return Ok(Catalog::default());
        };

        let json = read_to_string(path).map_err(|source| ConfigError::CatalogIo {
            path: path.clone(),
            source,
        })?;
        let catalog = Catalog::from_json(&json)?;
        info!(
            "📋 Loaded catalog from {}: {} participants, {} modules",
            path.display(),
            catalog.participants().len(),
            catalog.modules().len()
        );
        Ok(catalog)
    }

    pub fn build_store(&self) -> Box<dyn VoteStore> {
        match self.storage {
            StorageKind::File => {
                info!("💾 Storing votes in {}", self.votes_file.display());
                Box::new(JsonFileVoteStore::new(&self.votes_file))
            }
            StorageKind::Memory => {
                info!("💾 Storing votes in memory");
                Box::new(MemoryVoteStore::new())
            }
        }
    }
}
