use std::sync::Arc;

use crate::action::movement::{LegalityRules, Move, Pattern};
use crate::action::waypoint::ExpressionError;
use crate::config::MatchConfig;
use crate::env::{ConfigError, ContentRegistry};

use super::{Board, ParticipantId, Piece, PieceId, Player, PlayerSide};

/// Everything a match needs at runtime: the board, the shared content
/// registry and up to two players.
#[derive(Clone, Debug)]
pub struct World {
    board: Board,
    registry: Arc<ContentRegistry>,
    players: Vec<Player>,
}

impl World {
    pub const MAX_PLAYERS: usize = 2;

    /// Creates a world with no players.
    pub fn new(board: Board, registry: Arc<ContentRegistry>) -> Self {
        Self {
            board,
            registry,
            players: Vec::with_capacity(Self::MAX_PLAYERS),
        }
    }

    /// Builds content from `config`, seats both players and places their
    /// initial pieces (the same placements, each in its own frame).
    pub fn setup(config: &MatchConfig) -> Result<Self, ConfigError> {
        let board = Board::from_params(&config.board)?;
        let registry = Arc::new(ContentRegistry::from_config(config)?);
        let mut world = Self::new(board, registry);

        for participant in [ParticipantId::PLAYER_ONE, ParticipantId::PLAYER_TWO] {
            world.add_player(participant)?;
        }
        for player in &mut world.players {
            player.place_initial_pieces(&config.setup, &world.registry)?;
        }

        tracing::info!(
            width = board.width(),
            height = board.height(),
            pieces = world.pieces().count(),
            "match world ready"
        );
        Ok(world)
    }

    /// Seats the player for `participant`.
    pub fn add_player(&mut self, participant: ParticipantId) -> Result<&mut Player, ConfigError> {
        let player = Player::from_participant(participant, &self.board)?;
        if self.players.len() >= Self::MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers);
        }
        if self.players.iter().any(|seated| seated.side() == player.side()) {
            return Err(ConfigError::DuplicatePlayer(player.side()));
        }

        let index = self.players.len();
        self.players.push(player);
        Ok(&mut self.players[index])
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn registry(&self) -> &Arc<ContentRegistry> {
        &self.registry
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, side: PlayerSide) -> Option<&Player> {
        self.players.iter().find(|player| player.side() == side)
    }

    pub fn player_mut(&mut self, side: PlayerSide) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.side() == side)
    }

    /// Every piece on the board, player one's first.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.players.iter().flat_map(|player| player.pieces())
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.player(id.owner)?.piece(id)
    }

    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.player_mut(id.owner)?.piece_mut(id)
    }

    /// Possible moves for a piece; `None` if no such piece exists.
    pub fn find_possible_moves(
        &self,
        id: PieceId,
    ) -> Option<Result<Vec<Move>, ExpressionError>> {
        self.piece(id).map(|piece| piece.find_possible_moves(&self.board))
    }

    pub fn find_possible_patterns(
        &self,
        id: PieceId,
    ) -> Option<Result<Vec<Pattern>, ExpressionError>> {
        self.piece(id).map(|piece| piece.find_possible_patterns(&self.board))
    }

    pub fn find_legal_moves<R>(
        &self,
        id: PieceId,
        rules: &R,
    ) -> Option<Result<Vec<Move>, ExpressionError>>
    where
        R: LegalityRules + ?Sized,
    {
        self.piece(id).map(|piece| piece.find_legal_moves(&self.board, rules))
    }
}
