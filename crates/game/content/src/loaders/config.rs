//! Match configuration loader.

use std::path::Path;

use anyhow::Context;
use cherts_core::MatchConfig;

use crate::loaders::{LoadResult, read_file};

/// Default match content compiled into the crate.
const EMBEDDED_CONFIG: &str = include_str!("../../data/config.toml");

/// Loader for match configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing a MatchConfig
    pub fn load(path: &Path) -> LoadResult<MatchConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to load config {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            moves = config.moves.len(),
            patterns = config.patterns.len(),
            pieces = config.pieces.len(),
            "loaded match config"
        );
        Ok(config)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<MatchConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }

    /// The default match shipped with this crate.
    pub fn embedded() -> LoadResult<MatchConfig> {
        Self::parse(EMBEDDED_CONFIG).context("Embedded config is invalid")
    }
}

#[cfg(test)]
mod tests {
    use cherts_core::MoveMode;

    use super::*;

    #[test]
    fn parses_minimal_config() {
        let config = ConfigLoader::parse(
            r#"
            [board]
            width = 5
            height = 6

            [moves.step]
            mode = "jump"
            waypoints = ["(x, y + 1)"]

            [pieces.pawn]
            radius = 0.3
            moves = ["step"]
            "#,
        )
        .unwrap();

        assert_eq!(config.board.width, 5);
        assert_eq!(config.board.height, 6);
        assert_eq!(config.moves["step"].mode, MoveMode::Jump);
        assert_eq!(config.pieces["pawn"].cooldown_sec, 0.0);
        assert!(config.pieces["pawn"].patterns.is_empty());
        assert!(config.setup.pieces.is_empty());
    }

    #[test]
    fn accepts_both_cooldown_spellings() {
        for key in ["move_cooldown_sec", "cooldown_sec"] {
            let text = format!(
                "[board]\nwidth = 8\nheight = 8\n[pieces.rook]\nradius = 0.4\nmoves = []\n{key} = 2.5\n"
            );
            let config = ConfigLoader::parse(&text).unwrap();
            assert_eq!(config.pieces["rook"].cooldown_sec, 2.5, "{key}");
        }
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = ConfigLoader::parse(
            "[board]\nwidth = 8\nheight = 8\n[moves.warp]\nmode = \"teleport\"\nwaypoints = []\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }

    #[test]
    fn embedded_config_parses() {
        let config = ConfigLoader::embedded().unwrap();
        assert_eq!(config.board.width, 8);
        assert!(config.pieces.contains_key("king"));
        assert!(!config.setup.pieces.is_empty());
    }
}
