//! Static match content.
//!
//! Move, pattern and piece types are immutable descriptors shared by every
//! piece that uses them. [`ContentRegistry`] builds them once from the
//! already-parsed [`crate::config::MatchConfig`] and hands out shared handles.
mod error;
mod registry;
mod types;

pub use error::ConfigError;
pub use registry::ContentRegistry;
pub use types::{MoveMode, MoveType, PatternType, PieceType};
