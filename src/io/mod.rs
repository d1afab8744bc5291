pub mod fen;

use thiserror::Error;

use crate::board::square::parse_square;
use crate::board::{Move, Piece, Position};
use crate::movegen;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("malformed move: {0}")]
    Malformed(String),
    #[error("illegal move: {0}")]
    Illegal(String),
}

/// Resolves a coordinate move ("e2e4", "e7e8q", "e1g1") against the legal
/// moves of `pos`.
pub fn parse_move(pos: &mut Position, s: &str) -> Result<Move, MoveParseError> {
    let s = s.trim();
    if !(4..=5).contains(&s.len()) || !s.is_ascii() {
        return Err(MoveParseError::Malformed(s.to_string()));
    }
    let from = parse_square(&s[0..2]).ok_or_else(|| MoveParseError::Malformed(s.to_string()))?;
    let to = parse_square(&s[2..4]).ok_or_else(|| MoveParseError::Malformed(s.to_string()))?;
    let white = pos.white_move();
    let promote_to = match s.as_bytes().get(4) {
        None => Piece::Empty,
        Some(b'q') => Piece::queen(white),
        Some(b'r') => Piece::rook(white),
        Some(b'b') => Piece::bishop(white),
        Some(b'n') => Piece::knight(white),
        Some(_) => return Err(MoveParseError::Malformed(s.to_string())),
    };
    let wanted = Move::new(from, to, promote_to);
    movegen::legal_moves(pos)
        .iter()
        .find(|m| **m == wanted)
        .copied()
        .ok_or_else(|| MoveParseError::Illegal(s.to_string()))
}

/// Plays a sequence of coordinate moves from `pos`.
pub fn play_moves(pos: &mut Position, moves: &[&str]) -> Result<(), MoveParseError> {
    let mut undo = crate::board::UndoInfo::default();
    for s in moves {
        let m = parse_move(pos, s)?;
        pos.make_move(&m, &mut undo);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_rejects() {
        let mut pos = Position::startpos();
        assert_eq!(parse_move(&mut pos, "e2e4").unwrap(), Move::new(12, 28, Piece::Empty));
        assert_eq!(parse_move(&mut pos, "e2e5").unwrap_err(), MoveParseError::Illegal("e2e5".to_string()));
        assert!(matches!(parse_move(&mut pos, "e2"), Err(MoveParseError::Malformed(_))));
        assert!(matches!(parse_move(&mut pos, "e2e4x"), Err(MoveParseError::Malformed(_))));
    }

    #[test]
    fn plays_sequence() {
        let mut pos = Position::startpos();
        play_moves(&mut pos, &["e2e4", "e7e5", "g1f3"]).unwrap();
        assert!(!pos.white_move());
        assert_eq!(pos.piece(21), Piece::WKnight);
    }
}
