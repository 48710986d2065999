//! Config and catalog sources backed by files or bundled assets.

use std::path::PathBuf;

use async_trait::async_trait;

use drill_core::model::Difficulty;
use services::error::{CatalogSourceError, ConfigSourceError};
use services::{CatalogSource, ConfigSource};

/// Reads the config document from a JSON file on disk.
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    async fn fetch(&self) -> Result<String, ConfigSourceError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(ConfigSourceError::NotFound)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Reads per-tier catalog documents from a directory on disk.
///
/// Expects `exercises_<tier>.json` files; a missing file means the tier has
/// no exercises.
pub struct DirCatalogSource {
    dir: PathBuf,
}

impl DirCatalogSource {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

fn catalog_file_name(tier: Difficulty) -> &'static str {
    match tier {
        Difficulty::Basic => "exercises_basic.json",
        Difficulty::Intermediate => "exercises_intermediate.json",
        Difficulty::Advanced => "exercises_advanced.json",
    }
}

#[async_trait]
impl CatalogSource for DirCatalogSource {
    async fn fetch(&self, tier: Difficulty) -> Result<String, CatalogSourceError> {
        let path = self.dir.join(catalog_file_name(tier));
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(CatalogSourceError::NotFound)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// The catalogs compiled into the binary, used when no directory is given.
pub struct BundledCatalogSource;

#[async_trait]
impl CatalogSource for BundledCatalogSource {
    async fn fetch(&self, tier: Difficulty) -> Result<String, CatalogSourceError> {
        let raw = match tier {
            Difficulty::Basic => include_str!("../data/exercises_basic.json"),
            Difficulty::Intermediate => include_str!("../data/exercises_intermediate.json"),
            Difficulty::Advanced => include_str!("../data/exercises_advanced.json"),
        };
        Ok(raw.to_string())
    }
}
