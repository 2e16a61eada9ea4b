use std::sync::Arc;

use crate::config::SetupParams;
use crate::env::{ConfigError, ContentRegistry, PieceType};

use super::{Board, Color, Frame, Heading, ParticipantId, Piece, PieceId, PlayerSide, Vector};

/// One side of the match: a reference frame plus the pieces it owns.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    side: PlayerSide,
    frame: Frame,
    pieces: Vec<Piece>,
    next_index: u32,
}

impl Player {
    pub fn new(side: PlayerSide, frame: Frame) -> Self {
        Self {
            side,
            frame,
            pieces: Vec::new(),
            next_index: 0,
        }
    }

    /// Creates a player from raw origin/heading vectors.
    ///
    /// Fails unless both heading components are exactly ±1.
    pub fn with_heading(
        side: PlayerSide,
        origin: Vector,
        heading: Vector,
    ) -> Result<Self, ConfigError> {
        let heading = Heading::try_from(heading)?;
        Ok(Self::new(side, Frame::new(origin, heading)))
    }

    /// Player factory keyed by participant identity.
    ///
    /// Player one sits at the world origin facing forward. Player two sits in
    /// the opposite corner with both axes mirrored, so "forward" in either
    /// player's frame points at the opponent.
    pub fn from_participant(
        participant: ParticipantId,
        board: &Board,
    ) -> Result<Self, ConfigError> {
        let side = PlayerSide::try_from(participant)?;
        let frame = match side {
            PlayerSide::One => Frame::new(Vector::ZERO, Heading::FORWARD),
            PlayerSide::Two => Frame::new(board.corner(), Heading::REVERSED),
        };
        tracing::debug!(%participant, %side, origin = %frame.origin, "created player");
        Ok(Self::new(side, frame))
    }

    pub fn side(&self) -> PlayerSide {
        self.side
    }

    pub fn color(&self) -> Color {
        self.side.color()
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn origin(&self) -> Vector {
        self.frame.origin
    }

    pub fn heading(&self) -> Heading {
        self.frame.heading
    }

    pub fn world_from_player(&self, xyp: Vector) -> Vector {
        self.frame.world_from_player(xyp)
    }

    pub fn player_from_world(&self, xyw: Vector) -> Vector {
        self.frame.player_from_world(xyw)
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_mut(&mut self) -> &mut [Piece] {
        &mut self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id() == id)
    }

    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|piece| piece.id() == id)
    }

    /// Adds a piece at a world-frame position and returns its id.
    pub fn spawn_piece(&mut self, piece_type: Arc<PieceType>, xyw: Vector) -> PieceId {
        let id = PieceId::new(self.side, self.next_index);
        self.next_index += 1;
        self.pieces.push(Piece::new(id, self.frame, piece_type, xyw));
        id
    }

    /// Adds several pieces at world-frame positions, preserving order.
    pub fn gain_pieces<I>(&mut self, pieces: I) -> Vec<PieceId>
    where
        I: IntoIterator<Item = (Arc<PieceType>, Vector)>,
    {
        pieces
            .into_iter()
            .map(|(piece_type, xyw)| self.spawn_piece(piece_type, xyw))
            .collect()
    }

    /// Removes a captured or otherwise retired piece.
    pub fn remove_piece(&mut self, id: PieceId) -> Option<Piece> {
        let index = self.pieces.iter().position(|piece| piece.id() == id)?;
        Some(self.pieces.remove(index))
    }

    /// Spawns the initial pieces; placements are given in this player's frame.
    ///
    /// Nothing is spawned if any placement names an unknown piece type.
    pub fn place_initial_pieces(
        &mut self,
        setup: &SetupParams,
        registry: &ContentRegistry,
    ) -> Result<Vec<PieceId>, ConfigError> {
        let placements = setup
            .pieces
            .iter()
            .map(|placement| {
                let piece_type = registry.require_piece_type(&placement.name)?;
                Ok((piece_type, self.world_from_player(placement.pos.into())))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let ids = self.gain_pieces(placements);
        tracing::debug!(side = %self.side, count = ids.len(), "placed initial pieces");
        Ok(ids)
    }
}
