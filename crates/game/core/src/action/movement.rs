//! Move and pattern generation.
//!
//! A piece's type lists move and pattern types; each of those carries waypoint
//! expressions. Generation evaluates those expressions for one piece on one
//! board and wraps every resulting world-frame path as a [`Move`] or
//! [`Pattern`]. Output order is declaration order: types in the order the
//! piece type lists them, then paths in expression order.

use std::sync::Arc;

use crate::action::waypoint::{ExpressionError, Path, eval_waypoint_exprs};
use crate::env::{MoveMode, MoveType, PatternType};
use crate::state::{Board, Piece, PieceId, Vector};

/// One concrete way a piece could move: a move type applied to a piece.
#[derive(Clone, Debug, PartialEq)]
pub struct Move {
    move_type: Arc<MoveType>,
    piece: PieceId,
    waypoint_path: Path,
}

impl Move {
    pub fn new(move_type: Arc<MoveType>, piece: PieceId, waypoint_path: Path) -> Self {
        Self {
            move_type,
            piece,
            waypoint_path,
        }
    }

    pub fn move_type(&self) -> &Arc<MoveType> {
        &self.move_type
    }

    pub fn mode(&self) -> MoveMode {
        self.move_type.mode()
    }

    pub fn piece(&self) -> PieceId {
        self.piece
    }

    /// World-frame waypoints, in traversal order.
    pub fn waypoint_path(&self) -> &[Vector] {
        &self.waypoint_path
    }

    /// Where the piece ends up.
    pub fn destination(&self) -> Option<Vector> {
        self.waypoint_path.last().copied()
    }
}

/// A pattern type laid out for a piece, with how far along it the piece is.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    pattern_type: Arc<PatternType>,
    piece: PieceId,
    waypoint_path: Path,
    reached: usize,
}

impl Pattern {
    pub fn new(pattern_type: Arc<PatternType>, piece: PieceId, waypoint_path: Path) -> Self {
        Self {
            pattern_type,
            piece,
            waypoint_path,
            reached: 0,
        }
    }

    pub fn pattern_type(&self) -> &Arc<PatternType> {
        &self.pattern_type
    }

    pub fn piece(&self) -> PieceId {
        self.piece
    }

    /// World-frame waypoints; a NaN component matches any coordinate.
    pub fn waypoint_path(&self) -> &[Vector] {
        &self.waypoint_path
    }

    /// True if this pattern pre-empts the piece's other moves until it resolves.
    pub fn is_captive(&self) -> bool {
        self.pattern_type.must_complete()
    }

    /// Number of waypoints reached so far.
    pub fn reached(&self) -> usize {
        self.reached
    }

    /// The waypoint the piece must reach next, if any remain.
    pub fn next_waypoint(&self) -> Option<Vector> {
        self.waypoint_path.get(self.reached).copied()
    }

    /// Marks the next waypoint as reached. Returns false once already complete.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.reached += 1;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.reached >= self.waypoint_path.len()
    }
}

/// Every move one move type offers `piece` on `board`.
pub fn make_moves(
    move_type: &Arc<MoveType>,
    piece: &Piece,
    board: &Board,
) -> Result<Vec<Move>, ExpressionError> {
    let paths = eval_waypoint_exprs(move_type.waypoint_exprs(), piece, board, false)?;
    tracing::trace!(
        piece = %piece.id(),
        move_type = move_type.name(),
        paths = paths.len(),
        "evaluated move type"
    );
    Ok(paths
        .into_iter()
        .map(|path| Move::new(Arc::clone(move_type), piece.id(), path))
        .collect())
}

/// Every pattern one pattern type lays out for `piece` on `board`.
///
/// Pattern expressions may use the `any` wildcard.
pub fn make_patterns(
    pattern_type: &Arc<PatternType>,
    piece: &Piece,
    board: &Board,
) -> Result<Vec<Pattern>, ExpressionError> {
    let paths = eval_waypoint_exprs(pattern_type.waypoint_exprs(), piece, board, true)?;
    tracing::trace!(
        piece = %piece.id(),
        pattern_type = pattern_type.name(),
        paths = paths.len(),
        "evaluated pattern type"
    );
    Ok(paths
        .into_iter()
        .map(|path| Pattern::new(Arc::clone(pattern_type), piece.id(), path))
        .collect())
}

/// All moves the piece's type describes, not yet filtered for legality.
pub fn find_possible_moves(piece: &Piece, board: &Board) -> Result<Vec<Move>, ExpressionError> {
    let mut moves = Vec::new();
    for move_type in piece.piece_type().move_types() {
        moves.extend(make_moves(move_type, piece, board)?);
    }
    tracing::debug!(piece = %piece.id(), count = moves.len(), "found possible moves");
    Ok(moves)
}

/// All patterns the piece's type describes.
pub fn find_possible_patterns(
    piece: &Piece,
    board: &Board,
) -> Result<Vec<Pattern>, ExpressionError> {
    let mut patterns = Vec::new();
    for pattern_type in piece.piece_type().pattern_types() {
        patterns.extend(make_patterns(pattern_type, piece, board)?);
    }
    Ok(patterns)
}

/// Decides whether a candidate move is allowed in the current world state.
///
/// Occupancy and captive-pattern rules belong to the implementor; an
/// implementation typically borrows whatever world state it needs.
pub trait LegalityRules {
    fn permits(&self, piece: &Piece, candidate: &Move) -> bool;
}

/// Rules that allow every possible move. Used for move previews.
#[derive(Clone, Copy, Debug, Default)]
pub struct PermitAll;

impl LegalityRules for PermitAll {
    fn permits(&self, _piece: &Piece, _candidate: &Move) -> bool {
        true
    }
}

/// The subset of [`find_possible_moves`] that `rules` permits, in the same order.
pub fn find_legal_moves<R>(
    piece: &Piece,
    board: &Board,
    rules: &R,
) -> Result<Vec<Move>, ExpressionError>
where
    R: LegalityRules + ?Sized,
{
    let mut moves = find_possible_moves(piece, board)?;
    moves.retain(|candidate| rules.permits(piece, candidate));
    Ok(moves)
}
