//! Piece movement rules for a two-player, chess-like board game.
//!
//! `cherts-core` turns declarative content (move, pattern and piece types whose
//! waypoints are written as small arithmetic expressions) into concrete moves
//! for pieces on a board. Each player sees the board from its own side;
//! [`state::Frame`] maps that view onto shared world coordinates. The core is
//! pure: it never reads files, and content arrives as an already-parsed
//! [`config::MatchConfig`].
pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod state;
pub use action::{
    Bindings, ExpressionError, LegalityRules, Move, Pattern, Path, PermitAll, WaypointExpr,
    eval_waypoint_expr, eval_waypoint_exprs, find_legal_moves, find_possible_moves,
    find_possible_patterns,
};
pub use config::{
    BoardParams, MatchConfig, MoveTypeParams, PatternTypeParams, PiecePlacement, PieceTypeParams,
    SetupParams,
};
pub use env::{ConfigError, ContentRegistry, MoveMode, MoveType, PatternType, PieceType};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Board, Color, Frame, Heading, ParticipantId, Piece, PieceId, Player, PlayerSide, Sign, Vector,
    World,
};
