use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

use super::piece::Piece;
use super::square::{square_name, Square};

/// A move plus a transient ordering score. Equality and hashing ignore `score`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Piece the pawn becomes, or `Piece::Empty`.
    pub promote_to: Piece,
    pub score: i32,
}

impl Move {
    /// `from == to`; used by the table as "no move".
    pub const NULL: Move = Move { from: 0, to: 0, promote_to: Piece::Empty, score: 0 };

    #[inline]
    pub fn new(from: Square, to: Square, promote_to: Piece) -> Self {
        Self { from, to, promote_to, score: 0 }
    }

    #[inline]
    pub fn is_null(&self) -> bool { self.from == self.to }

    /// 16-bit encoding: `from + (to << 6) + (promote << 12)`.
    #[inline]
    pub fn pack(&self) -> u16 {
        (self.from + (self.to << 6) + (self.promote_to.index() << 12)) as u16
    }

    #[inline]
    pub fn unpack(v: u16) -> Self {
        let v = v as usize;
        Self::new(v & 63, (v >> 6) & 63, Piece::from_index((v >> 12) & 15))
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.promote_to == other.promote_to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) { self.pack().hash(state); }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() { return f.write_str("0000"); }
        write!(f, "{}{}", square_name(self.from), square_name(self.to))?;
        if !self.promote_to.is_empty() {
            write!(f, "{}", self.promote_to.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// State destroyed by `make_move`; exactly enough to invert it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UndoInfo {
    pub captured_piece: Piece,
    pub castle_mask: u8,
    pub ep_square: Option<Square>,
    pub half_move_clock: u32,
}

pub const MAX_MOVES: usize = 256;

/// Inline move buffer. Generation writes into one of these instead of a heap
/// list, so a search can keep one per ply and never allocate.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub fn new() -> Self { Self { moves: [Move::NULL; MAX_MOVES], len: 0 } }

    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub fn clear(&mut self) { self.len = 0; }

    /// Keep only the moves for which `f` returns true, preserving order.
    pub fn retain(&mut self, mut f: impl FnMut(&Move) -> bool) {
        let mut w = 0;
        for r in 0..self.len {
            if f(&self.moves[r]) {
                self.moves[w] = self.moves[r];
                w += 1;
            }
        }
        self.len = w;
    }

    /// Stable sort, highest `score` first.
    pub fn sort_by_score(&mut self) {
        self.moves[..self.len].sort_by(|a, b| b.score.cmp(&a.score));
    }
}

impl Default for MoveList {
    fn default() -> Self { Self::new() }
}

impl Deref for MoveList {
    type Target = [Move];
    fn deref(&self) -> &[Move] { &self.moves[..self.len] }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut [Move] { &mut self.moves[..self.len] }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|m| m.to_string())).finish()
    }
}
