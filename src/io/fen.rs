use thiserror::Error;

use crate::board::square::{file, parse_square, rank, square, square_name};
use crate::board::{Piece, Position, A1_CASTLE, A8_CASTLE, H1_CASTLE, H8_CASTLE};
use crate::movegen;

/// Largest accepted half-move clock; leaves `make_move` room to keep counting.
pub const MAX_HALF_MOVE_CLOCK: u32 = u16::MAX as u32;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN has too few fields")]
    TooFewFields,
    #[error("bad piece placement: {0}")]
    Placement(String),
    #[error("bad side to move: {0}")]
    SideToMove(String),
    #[error("bad castling field: {0}")]
    Castling(String),
    #[error("bad en passant square: {0}")]
    EnPassant(String),
    #[error("bad move counter: {0}")]
    Counter(String),
    #[error("each side needs exactly one king")]
    KingCount,
    #[error("pawn on first or last rank")]
    PawnOnBackRank,
    #[error("side not to move is in check")]
    OpponentInCheck,
}

/// Parses a FEN string. Counters may be omitted. Castling rights whose king or
/// rook is not on its home square are dropped.
pub fn parse_fen(fen: &str) -> Result<Position, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 2 { return Err(FenError::TooFewFields); }

    let mut pos = Position::new();
    let ranks: Vec<&str> = fields[0].split('/').collect();
    if ranks.len() != 8 { return Err(FenError::Placement(fields[0].to_string())); }
    for (i, row) in ranks.iter().enumerate() {
        let y = 7 - i;
        let mut x = 0usize;
        for c in row.chars() {
            if let Some(d) = c.to_digit(10) {
                if !(1..=8).contains(&d) { return Err(FenError::Placement(row.to_string())); }
                x += d as usize;
            } else {
                let p = Piece::from_char(c).ok_or_else(|| FenError::Placement(row.to_string()))?;
                if x >= 8 { return Err(FenError::Placement(row.to_string())); }
                pos.set_piece(square(x, y), p);
                x += 1;
            }
            if x > 8 { return Err(FenError::Placement(row.to_string())); }
        }
        if x != 8 { return Err(FenError::Placement(row.to_string())); }
    }

    match fields[1] {
        "w" => pos.set_white_move(true),
        "b" => pos.set_white_move(false),
        other => return Err(FenError::SideToMove(other.to_string())),
    }

    let mut mask = 0u8;
    if let Some(&c) = fields.get(2) {
        if c != "-" {
            for ch in c.chars() {
                mask |= 1 << match ch {
                    'K' => H1_CASTLE,
                    'Q' => A1_CASTLE,
                    'k' => H8_CASTLE,
                    'q' => A8_CASTLE,
                    _ => return Err(FenError::Castling(c.to_string())),
                };
            }
        }
    }
    for bit in [A1_CASTLE, H1_CASTLE, A8_CASTLE, H8_CASTLE] {
        let (k, r) = Position::castle_home(bit);
        let white = bit < A8_CASTLE;
        if pos.piece(k) != Piece::king(white) || pos.piece(r) != Piece::rook(white) {
            mask &= !(1 << bit);
        }
    }
    pos.set_castle_mask(mask);

    if let Some(&ep) = fields.get(3) {
        if ep != "-" {
            let sq = parse_square(ep).ok_or_else(|| FenError::EnPassant(ep.to_string()))?;
            let expected = if pos.white_move() { 5 } else { 2 };
            if rank(sq) != expected { return Err(FenError::EnPassant(ep.to_string())); }
            // Kept only if an enemy pawn just double-stepped past `sq` and a
            // pawn of the side to move can actually take it.
            let wtm = pos.white_move();
            let (pawn_sq, origin) = if wtm { (sq - 8, sq + 8) } else { (sq + 8, sq - 8) };
            let own_pawn = Piece::pawn(wtm);
            let x = file(pawn_sq);
            let pushed = pos.piece(pawn_sq) == Piece::pawn(!wtm)
                && pos.piece(sq) == Piece::Empty
                && pos.piece(origin) == Piece::Empty;
            let capturable = (x > 0 && pos.piece(pawn_sq - 1) == own_pawn) || (x < 7 && pos.piece(pawn_sq + 1) == own_pawn);
            if pushed && capturable {
                pos.set_ep_square(Some(sq));
            }
        }
    }

    if let Some(&hmc) = fields.get(4) {
        let v: u32 = hmc.parse().map_err(|_| FenError::Counter(hmc.to_string()))?;
        if v > MAX_HALF_MOVE_CLOCK { return Err(FenError::Counter(hmc.to_string())); }
        pos.set_half_move_clock(v);
    }
    if let Some(&fmc) = fields.get(5) {
        let v: u32 = fmc.parse().map_err(|_| FenError::Counter(fmc.to_string()))?;
        pos.set_full_move_counter(v.max(1));
    }

    if pos.n_pieces(Piece::WKing) != 1 || pos.n_pieces(Piece::BKing) != 1 {
        return Err(FenError::KingCount);
    }
    let back_ranks = 0xFF00_0000_0000_00FFu64;
    if (pos.piece_type_bb(Piece::WPawn) | pos.piece_type_bb(Piece::BPawn)) & back_ranks != 0 {
        return Err(FenError::PawnOnBackRank);
    }
    if movegen::can_take_king(&mut pos) {
        return Err(FenError::OpponentInCheck);
    }
    Ok(pos)
}

pub fn to_fen(pos: &Position) -> String {
    let mut s = String::with_capacity(90);
    for y in (0..8).rev() {
        let mut empty = 0;
        for x in 0..8 {
            let p = pos.piece(square(x, y));
            if p == Piece::Empty {
                empty += 1;
                continue;
            }
            if empty > 0 {
                s.push(char::from(b'0' + empty));
                empty = 0;
            }
            s.push(p.to_char());
        }
        if empty > 0 { s.push(char::from(b'0' + empty)); }
        if y > 0 { s.push('/'); }
    }
    s.push_str(if pos.white_move() { " w " } else { " b " });

    let before = s.len();
    if pos.h1_castle() { s.push('K'); }
    if pos.a1_castle() { s.push('Q'); }
    if pos.h8_castle() { s.push('k'); }
    if pos.a8_castle() { s.push('q'); }
    if s.len() == before { s.push('-'); }

    s.push(' ');
    match pos.ep_square() {
        Some(sq) => s.push_str(&square_name(sq)),
        None => s.push('-'),
    }
    s.push_str(&format!(" {} {}", pos.half_move_clock(), pos.full_move_counter()));
    s
}
