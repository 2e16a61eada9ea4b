pub mod board;
pub mod common;
pub mod piece;
pub mod player;
pub mod world;

pub use board::Board;
pub use common::{Color, Frame, Heading, ParticipantId, PieceId, PlayerSide, Sign, Vector};
pub use piece::Piece;
pub use player::Player;
pub use world::World;
