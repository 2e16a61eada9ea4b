//! Already-parsed match parameters.
//!
//! The core never reads files. A loader (see the content crate) deserializes
//! these structures and hands them to [`crate::ContentRegistry::from_config`],
//! [`crate::Board::from_params`] and [`crate::Player::place_initial_pieces`].

use std::collections::BTreeMap;

use crate::env::MoveMode;

/// Complete description of a match: board, shared types and initial setup.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchConfig {
    pub board: BoardParams,
    #[cfg_attr(feature = "serde", serde(default))]
    pub moves: BTreeMap<String, MoveTypeParams>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub patterns: BTreeMap<String, PatternTypeParams>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pieces: BTreeMap<String, PieceTypeParams>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub setup: SetupParams,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardParams {
    pub width: u32,
    pub height: u32,
}

impl BoardParams {
    pub const DEFAULT_WIDTH: u32 = 8;
    pub const DEFAULT_HEIGHT: u32 = 8;
}

impl Default for BoardParams {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveTypeParams {
    pub mode: MoveMode,
    pub waypoints: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternTypeParams {
    pub waypoints: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub on_complete: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub must_complete: bool,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceTypeParams {
    pub radius: f64,
    /// Move type names, in the order moves are generated.
    pub moves: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub patterns: Vec<String>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "move_cooldown_sec", alias = "cooldown_sec", default)
    )]
    pub cooldown_sec: f64,
}

/// Pieces each player starts with, positioned in that player's own frame.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetupParams {
    #[cfg_attr(feature = "serde", serde(default))]
    pub pieces: Vec<PiecePlacement>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PiecePlacement {
    pub name: String,
    pub pos: [f64; 2],
}

impl PiecePlacement {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            pos: [x, y],
        }
    }
}
