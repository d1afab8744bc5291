pub mod moves;
pub mod piece;
pub mod position;
pub mod square;
pub mod tables;
pub mod zobrist;

pub use moves::{Move, MoveList, UndoInfo, MAX_MOVES};
pub use piece::Piece;
pub use position::{Position, A1_CASTLE, A8_CASTLE, H1_CASTLE, H8_CASTLE};
pub use square::Square;
