//! Configuration errors.
//!
//! Raised while turning already-parsed parameters into boards, players and the
//! shared move/pattern/piece type registry. None of these can be fixed without
//! changing the configuration, so they surface straight to session setup.

use crate::action::waypoint::ExpressionError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ParticipantId, PlayerSide, Vector};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    /// Only the two non-referee participants own a player frame.
    #[error("{0} cannot own pieces; expected player one or player two")]
    UnknownParticipant(ParticipantId),

    /// Heading components must be exactly +1 or -1.
    #[error("invalid heading {heading}: components must be +1 or -1")]
    InvalidHeading { heading: Vector },

    #[error("invalid board extent {width}x{height}: both dimensions must be positive")]
    InvalidBoard { width: u32, height: u32 },

    #[error("piece type '{piece}' references unknown move type '{name}'")]
    UnknownMoveType { piece: String, name: String },

    #[error("piece type '{piece}' references unknown pattern type '{name}'")]
    UnknownPatternType { piece: String, name: String },

    #[error("unknown piece type '{name}'")]
    UnknownPieceType { name: String },

    #[error("piece type '{piece}' has invalid radius {radius}: must be positive")]
    InvalidRadius { piece: String, radius: f64 },

    #[error("piece type '{piece}' has invalid cooldown {cooldown_sec}s: must be non-negative")]
    InvalidCooldown { piece: String, cooldown_sec: f64 },

    /// A waypoint expression failed to parse while building its type.
    #[error("'{owner}' has an invalid waypoint expression: {error}")]
    InvalidExpression {
        owner: String,
        #[source]
        error: ExpressionError,
    },

    #[error("a match has at most two players")]
    TooManyPlayers,

    #[error("player {0} has already joined")]
    DuplicatePlayer(PlayerSide),
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        use ConfigError::*;
        match self {
            // Session setup cannot proceed
            UnknownParticipant(_) | InvalidHeading { .. } | InvalidBoard { .. } => {
                ErrorSeverity::Fatal
            }
            TooManyPlayers | DuplicatePlayer(_) => ErrorSeverity::Fatal,

            // Content-authoring errors
            UnknownMoveType { .. }
            | UnknownPatternType { .. }
            | UnknownPieceType { .. }
            | InvalidRadius { .. }
            | InvalidCooldown { .. }
            | InvalidExpression { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ConfigError::*;
        match self {
            UnknownParticipant(_) => "CONFIG_UNKNOWN_PARTICIPANT",
            InvalidHeading { .. } => "CONFIG_INVALID_HEADING",
            InvalidBoard { .. } => "CONFIG_INVALID_BOARD",
            UnknownMoveType { .. } => "CONFIG_UNKNOWN_MOVE_TYPE",
            UnknownPatternType { .. } => "CONFIG_UNKNOWN_PATTERN_TYPE",
            UnknownPieceType { .. } => "CONFIG_UNKNOWN_PIECE_TYPE",
            InvalidRadius { .. } => "CONFIG_INVALID_RADIUS",
            InvalidCooldown { .. } => "CONFIG_INVALID_COOLDOWN",
            InvalidExpression { .. } => "CONFIG_INVALID_EXPRESSION",
            TooManyPlayers => "CONFIG_TOO_MANY_PLAYERS",
            DuplicatePlayer(_) => "CONFIG_DUPLICATE_PLAYER",
        }
    }
}
