//! Match state: the board, coordinate frames, players and their pieces.
//!
//! Positions are stored in the world frame. Each player has a frame
//! (origin plus a heading of ±1 per axis) that maps its own view of the board
//! onto world coordinates, so content can be written once from "my side".
pub mod types;

pub use types::{
    Board, Color, Frame, Heading, ParticipantId, Piece, PieceId, Player, PlayerSide, Sign, Vector,
    World,
};
