use std::sync::Arc;

use crate::action::movement::{self, LegalityRules, Move, Pattern};
use crate::action::waypoint::ExpressionError;
use crate::env::PieceType;

use super::{Board, Frame, PieceId, PlayerSide, Vector};

/// A piece on the board.
///
/// The position is stored in the world frame. The piece keeps a copy of its
/// owner's frame (players never change frame) and refers to its owner only by
/// side, so there is no ownership cycle between players and pieces.
#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    id: PieceId,
    frame: Frame,
    piece_type: Arc<PieceType>,
    position: Vector,
    current_move: Option<Move>,
    current_pattern: Option<Pattern>,
}

impl Piece {
    /// Creates a piece at a world-frame position.
    pub fn new(id: PieceId, frame: Frame, piece_type: Arc<PieceType>, position: Vector) -> Self {
        Self {
            id,
            frame,
            piece_type,
            position,
            current_move: None,
            current_pattern: None,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn owner(&self) -> PlayerSide {
        self.id.owner
    }

    /// The owning player's reference frame.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn piece_type(&self) -> &Arc<PieceType> {
        &self.piece_type
    }

    /// World-frame position.
    pub fn position(&self) -> Vector {
        self.position
    }

    /// Position as seen from the owner's side of the board.
    pub fn player_position(&self) -> Vector {
        self.frame.player_from_world(self.position)
    }

    pub fn set_position(&mut self, xyw: Vector) {
        self.position = xyw;
    }

    pub fn current_move(&self) -> Option<&Move> {
        self.current_move.as_ref()
    }

    /// Replaces the in-progress move, returning the previous one.
    pub fn set_current_move(&mut self, current: Option<Move>) -> Option<Move> {
        std::mem::replace(&mut self.current_move, current)
    }

    pub fn current_pattern(&self) -> Option<&Pattern> {
        self.current_pattern.as_ref()
    }

    pub fn current_pattern_mut(&mut self) -> Option<&mut Pattern> {
        self.current_pattern.as_mut()
    }

    /// Replaces the in-progress pattern, returning the previous one.
    pub fn set_current_pattern(&mut self, current: Option<Pattern>) -> Option<Pattern> {
        std::mem::replace(&mut self.current_pattern, current)
    }

    /// True while an unfinished must-complete pattern holds this piece.
    pub fn is_held_captive(&self) -> bool {
        self.current_pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_captive() && !pattern.is_complete())
    }

    pub fn find_possible_moves(&self, board: &Board) -> Result<Vec<Move>, ExpressionError> {
        movement::find_possible_moves(self, board)
    }

    pub fn find_possible_patterns(&self, board: &Board) -> Result<Vec<Pattern>, ExpressionError> {
        movement::find_possible_patterns(self, board)
    }

    pub fn find_legal_moves<R>(
        &self,
        board: &Board,
        rules: &R,
    ) -> Result<Vec<Move>, ExpressionError>
    where
        R: LegalityRules + ?Sized,
    {
        movement::find_legal_moves(self, board, rules)
    }
}
