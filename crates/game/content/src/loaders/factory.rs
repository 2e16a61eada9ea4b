//! Content factory for locating match data files.

use std::path::{Path, PathBuf};

use cherts_core::MatchConfig;

use crate::loaders::{ConfigLoader, LoadResult};

/// Content factory that loads match content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// └── config.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load match configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<MatchConfig> {
        ConfigLoader::load(&self.config_path())
    }

    /// Load `config.toml` if the directory has one, else the embedded default.
    pub fn load_config_or_embedded(&self) -> LoadResult<MatchConfig> {
        let path = self.config_path();
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            tracing::info!(
                data_dir = %self.data_dir.display(),
                "no config.toml found, using embedded match"
            );
            ConfigLoader::embedded()
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(Self::CONFIG_FILE)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
