//! Match content and the loaders that read it.
//!
//! The core never touches the filesystem; this crate turns TOML data files into
//! the already-parsed [`cherts_core::MatchConfig`] the core builds its registry
//! and world from. A default chess-like match ships embedded in the crate
//! (`data/config.toml`).

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult};
