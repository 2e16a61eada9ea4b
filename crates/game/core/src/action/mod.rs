//! Piece movement: waypoint expressions and the moves/patterns built from them.
//!
//! # Module Structure
//!
//! - `waypoint`: Tokenizer, parser and interpreter for waypoint expressions
//! - `movement`: Move/Pattern instances, generation, and the legality seam

pub mod movement;
pub mod waypoint;

pub use movement::{
    LegalityRules, Move, Pattern, PermitAll, find_legal_moves, find_possible_moves,
    find_possible_patterns, make_moves, make_patterns,
};
pub use waypoint::{
    Bindings, ExpressionError, Path, WaypointExpr, bindings_for, eval_waypoint_expr,
    eval_waypoint_exprs,
};
