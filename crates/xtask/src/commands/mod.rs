//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check;
mod preview;

pub use check::Check;
pub use preview::Preview;

use std::path::Path;

use anyhow::Result;
use cherts_content::{ConfigLoader, ContentFactory};
use cherts_core::MatchConfig;

/// Loads `config.toml` from `data_dir`, or the embedded match when no directory is given.
fn load_config(data_dir: Option<&Path>) -> Result<MatchConfig> {
    match data_dir {
        Some(dir) => ContentFactory::new(dir).load_config(),
        None => ConfigLoader::embedded(),
    }
}
