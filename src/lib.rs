// Chess rules core: board, move generation, hashing and transposition table
pub mod board;
pub mod io;
pub mod movegen;
pub mod perft;
pub mod search;

pub use board::{Move, MoveList, Piece, Position, UndoInfo};
pub use search::tt::{Bound, TranspositionTable};
