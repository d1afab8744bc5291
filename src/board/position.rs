use std::fmt;

use super::moves::{Move, UndoInfo};
use super::piece::Piece;
use super::square::{file, square, Square, A1, A8, CORNERS, E1, E8, H1, H8};
use super::tables::{piece_square_tables, KING_VALUE, PIECE_VALUE};
use super::zobrist::keys;

/// Bits of the castle mask.
pub const A1_CASTLE: u8 = 0;
pub const H1_CASTLE: u8 = 1;
pub const A8_CASTLE: u8 = 2;
pub const H8_CASTLE: u8 = 3;

/// Full mutable game state. One instance is walked by make/unmake with an
/// `UndoInfo` per ply; nothing here validates its input.
///
/// Everything except the move counters is part of the Zobrist hash, which is
/// updated incrementally by every mutation.
#[derive(Clone)]
pub struct Position {
    squares: [Piece; 64],

    piece_type_bb: [u64; Piece::COUNT],
    white_bb: u64,
    black_bb: u64,

    ps_score_mg: [i16; Piece::COUNT],
    ps_score_eg: [i16; Piece::COUNT],

    white_move: bool,
    castle_mask: u8,
    ep_square: Option<Square>,
    half_move_clock: u32,
    full_move_counter: u32,

    hash_key: u64,
    pawn_hash_key: u64,
    w_king_sq: Option<Square>,
    b_king_sq: Option<Square>,

    // Kings are excluded: totals start at minus one king.
    w_mtrl: i32,
    b_mtrl: i32,
    w_mtrl_pawns: i32,
    b_mtrl_pawns: i32,
}

impl Default for Position {
    fn default() -> Self { Self::new() }
}

impl Position {
    /// Empty board, White to move, no castling rights.
    pub fn new() -> Self {
        let mut pos = Self {
            squares: [Piece::Empty; 64],
            piece_type_bb: [0; Piece::COUNT],
            white_bb: 0,
            black_bb: 0,
            ps_score_mg: [0; Piece::COUNT],
            ps_score_eg: [0; Piece::COUNT],
            white_move: true,
            castle_mask: 0,
            ep_square: None,
            half_move_clock: 0,
            full_move_counter: 1,
            hash_key: 0,
            pawn_hash_key: 0,
            w_king_sq: None,
            b_king_sq: None,
            w_mtrl: -KING_VALUE,
            b_mtrl: -KING_VALUE,
            w_mtrl_pawns: 0,
            b_mtrl_pawns: 0,
        };
        pos.piece_type_bb[Piece::Empty as usize] = !0;
        pos.hash_key = pos.compute_zobrist_hash();
        pos
    }

    pub fn startpos() -> Self {
        const BACK: [fn(bool) -> Piece; 8] =
            [Piece::rook, Piece::knight, Piece::bishop, Piece::queen, Piece::king, Piece::bishop, Piece::knight, Piece::rook];
        let mut pos = Self::new();
        for (x, make) in BACK.iter().enumerate() {
            pos.set_piece(square(x, 0), make(true));
            pos.set_piece(square(x, 1), Piece::WPawn);
            pos.set_piece(square(x, 6), Piece::BPawn);
            pos.set_piece(square(x, 7), make(false));
        }
        pos.set_castle_mask(0b1111);
        pos
    }

    // ----- hashes -----

    #[inline]
    pub fn zobrist_hash(&self) -> u64 { self.hash_key }

    #[inline]
    pub fn pawn_zobrist_hash(&self) -> u64 { self.pawn_hash_key }

    /// Hash of the two king placements; absent kings contribute nothing.
    pub fn king_zobrist_hash(&self) -> u64 {
        let k = keys();
        let w = self.w_king_sq.map_or(0, |sq| k.piece_square[Piece::WKing as usize][sq]);
        let b = self.b_king_sq.map_or(0, |sq| k.piece_square[Piece::BKing as usize][sq]);
        w ^ b
    }

    /// Position hash that also separates positions close to the fifty-move
    /// limit, for use as a table key.
    pub fn history_hash(&self) -> u64 {
        let mut ret = self.hash_key;
        if self.half_move_clock >= 80 {
            ret ^= keys().move_count[self.half_move_clock.min(100) as usize];
        }
        ret
    }

    /// Hash recomputed from the board. Verification only; the search path
    /// relies on the incremental value.
    pub fn compute_zobrist_hash(&self) -> u64 {
        let k = keys();
        let mut hash = 0;
        for (sq, &p) in self.squares.iter().enumerate() {
            hash ^= k.piece_square[p as usize][sq];
        }
        if self.white_move { hash ^= k.white_to_move; }
        hash ^= k.castle[self.castle_mask as usize];
        hash ^= k.ep[self.ep_square.map_or(0, |sq| file(sq) + 1)];
        hash
    }

    /// Pawn hash recomputed from the board. Verification only.
    pub fn compute_pawn_hash(&self) -> u64 {
        let k = keys();
        self.squares.iter().enumerate()
            .filter(|(_, p)| p.is_pawn())
            .fold(0, |h, (sq, &p)| h ^ k.piece_square[p as usize][sq])
    }

    // ----- plain state -----

    #[inline]
    pub fn white_move(&self) -> bool { self.white_move }

    /// Sets the side to move, toggling the side key if it changes.
    #[inline]
    pub fn set_white_move(&mut self, white_move: bool) {
        if white_move != self.white_move {
            self.hash_key ^= keys().white_to_move;
            self.white_move = white_move;
        }
    }

    #[inline]
    pub fn piece(&self, sq: Square) -> Piece { self.squares[sq] }

    #[inline]
    pub fn castle_mask(&self) -> u8 { self.castle_mask }

    pub fn set_castle_mask(&mut self, castle_mask: u8) {
        let k = keys();
        self.hash_key ^= k.castle[self.castle_mask as usize];
        self.hash_key ^= k.castle[castle_mask as usize];
        self.castle_mask = castle_mask;
    }

    #[inline]
    pub fn a1_castle(&self) -> bool { self.castle_mask & (1 << A1_CASTLE) != 0 }
    #[inline]
    pub fn h1_castle(&self) -> bool { self.castle_mask & (1 << H1_CASTLE) != 0 }
    #[inline]
    pub fn a8_castle(&self) -> bool { self.castle_mask & (1 << A8_CASTLE) != 0 }
    #[inline]
    pub fn h8_castle(&self) -> bool { self.castle_mask & (1 << H8_CASTLE) != 0 }

    #[inline]
    pub fn ep_square(&self) -> Option<Square> { self.ep_square }

    pub fn set_ep_square(&mut self, ep_square: Option<Square>) {
        if self.ep_square != ep_square {
            let k = keys();
            self.hash_key ^= k.ep[self.ep_square.map_or(0, |sq| file(sq) + 1)];
            self.hash_key ^= k.ep[ep_square.map_or(0, |sq| file(sq) + 1)];
            self.ep_square = ep_square;
        }
    }

    #[inline]
    pub fn half_move_clock(&self) -> u32 { self.half_move_clock }
    #[inline]
    pub fn set_half_move_clock(&mut self, v: u32) { self.half_move_clock = v; }
    #[inline]
    pub fn full_move_counter(&self) -> u32 { self.full_move_counter }
    #[inline]
    pub fn set_full_move_counter(&mut self, v: u32) { self.full_move_counter = v; }

    #[inline]
    pub fn king_sq(&self, white: bool) -> Option<Square> {
        if white { self.w_king_sq } else { self.b_king_sq }
    }

    #[inline]
    pub fn piece_type_bb(&self, p: Piece) -> u64 { self.piece_type_bb[p as usize] }
    #[inline]
    pub fn white_bb(&self) -> u64 { self.white_bb }
    #[inline]
    pub fn black_bb(&self) -> u64 { self.black_bb }
    #[inline]
    pub fn occupied_bb(&self) -> u64 { self.white_bb | self.black_bb }

    /// Material excluding the king.
    #[inline]
    pub fn material(&self, white: bool) -> i32 { if white { self.w_mtrl } else { self.b_mtrl } }
    #[inline]
    pub fn pawn_material(&self, white: bool) -> i32 { if white { self.w_mtrl_pawns } else { self.b_mtrl_pawns } }

    /// Accumulated middle-game piece-square score for one piece kind.
    #[inline]
    pub fn ps_score_mg(&self, p: Piece) -> i32 { self.ps_score_mg[p as usize] as i32 }
    #[inline]
    pub fn ps_score_eg(&self, p: Piece) -> i32 { self.ps_score_eg[p as usize] as i32 }

    pub fn n_pieces(&self, p: Piece) -> u32 { self.piece_type_bb[p as usize].count_ones() }

    /// Equality under the repetition rule: board, side, castling and en passant.
    pub fn draw_rule_equals(&self, other: &Position) -> bool {
        self.squares == other.squares
            && self.white_move == other.white_move
            && self.castle_mask == other.castle_mask
            && self.ep_square == other.ep_square
    }

    // ----- mutation -----

    /// Puts `piece` on `sq`, replacing whatever was there, and updates every
    /// incremental quantity.
    pub fn set_piece(&mut self, sq: Square, piece: Piece) {
        let k = keys();
        let old = self.squares[sq];

        self.hash_key ^= k.piece_square[old as usize][sq] ^ k.piece_square[piece as usize][sq];
        if old.is_pawn() { self.pawn_hash_key ^= k.piece_square[old as usize][sq]; }
        if piece.is_pawn() { self.pawn_hash_key ^= k.piece_square[piece as usize][sq]; }

        let v = PIECE_VALUE[old as usize];
        if old.is_white() {
            self.w_mtrl -= v;
            if old == Piece::WPawn { self.w_mtrl_pawns -= v; }
        } else if old.is_black() {
            self.b_mtrl -= v;
            if old == Piece::BPawn { self.b_mtrl_pawns -= v; }
        }
        let v = PIECE_VALUE[piece as usize];
        if piece.is_white() {
            self.w_mtrl += v;
            if piece == Piece::WPawn { self.w_mtrl_pawns += v; }
        } else if piece.is_black() {
            self.b_mtrl += v;
            if piece == Piece::BPawn { self.b_mtrl_pawns += v; }
        }

        self.squares[sq] = piece;
        self.update_bitboards(sq, old, piece);

        match old {
            Piece::WKing if self.w_king_sq == Some(sq) => self.w_king_sq = None,
            Piece::BKing if self.b_king_sq == Some(sq) => self.b_king_sq = None,
            _ => {}
        }
        match piece {
            Piece::WKing => self.w_king_sq = Some(sq),
            Piece::BKing => self.b_king_sq = Some(sq),
            _ => {}
        }

        let pst = piece_square_tables();
        self.ps_score_mg[old as usize] -= pst.mg[old as usize][sq];
        self.ps_score_eg[old as usize] -= pst.eg[old as usize][sq];
        self.ps_score_mg[piece as usize] += pst.mg[piece as usize][sq];
        self.ps_score_eg[piece as usize] += pst.eg[piece as usize][sq];
    }

    /// `set_piece` restricted to board and occupancy, for exchange evaluation.
    #[inline]
    fn set_see_piece(&mut self, sq: Square, piece: Piece) {
        let old = self.squares[sq];
        self.squares[sq] = piece;
        self.update_bitboards(sq, old, piece);
    }

    #[inline]
    fn update_bitboards(&mut self, sq: Square, old: Piece, piece: Piece) {
        let mask = 1u64 << sq;
        self.piece_type_bb[old as usize] &= !mask;
        self.piece_type_bb[piece as usize] |= mask;
        if old.is_white() {
            self.white_bb &= !mask;
        } else if old.is_black() {
            self.black_bb &= !mask;
        }
        if piece.is_white() {
            self.white_bb |= mask;
        } else if piece.is_black() {
            self.black_bb |= mask;
        }
    }

    fn remove_castle_rights(&mut self, sq: Square) {
        let bit = match sq {
            A1 => A1_CASTLE,
            H1 => H1_CASTLE,
            A8 => A8_CASTLE,
            H8 => H8_CASTLE,
            _ => return,
        };
        self.set_castle_mask(self.castle_mask & !(1 << bit));
    }

    /// Plays a pseudo-legal move, saving what it destroys into `undo`.
    pub fn make_move(&mut self, m: &Move, undo: &mut UndoInfo) {
        undo.captured_piece = self.squares[m.to];
        undo.castle_mask = self.castle_mask;
        undo.ep_square = self.ep_square;
        undo.half_move_clock = self.half_move_clock;
        let wtm = self.white_move;

        let p = self.squares[m.from];
        let cap_p = self.squares[m.to];

        if cap_p != Piece::Empty || p.is_pawn() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock += 1;
        }
        if !wtm {
            self.full_move_counter += 1;
        }

        if p.is_king() {
            let k0 = m.from;
            if m.to == k0 + 2 {
                self.set_piece(k0 + 1, self.squares[k0 + 3]);
                self.set_piece(k0 + 3, Piece::Empty);
            } else if m.to + 2 == k0 {
                self.set_piece(k0 - 1, self.squares[k0 - 4]);
                self.set_piece(k0 - 4, Piece::Empty);
            }
            let lost = if wtm { (1 << A1_CASTLE) | (1 << H1_CASTLE) } else { (1 << A8_CASTLE) | (1 << H8_CASTLE) };
            self.set_castle_mask(self.castle_mask & !lost);
        }
        if CORNERS & (1 << m.from) != 0 && p == Piece::rook(wtm) {
            self.remove_castle_rights(m.from);
        }
        if CORNERS & (1 << m.to) != 0 && cap_p == Piece::rook(!wtm) {
            self.remove_castle_rights(m.to);
        }

        // A double step only opens en passant if an enemy pawn can use it.
        let prev_ep = self.ep_square;
        self.set_ep_square(None);
        if p == Piece::WPawn {
            if m.to == m.from + 16 {
                if self.has_adjacent(m.to, Piece::BPawn) { self.set_ep_square(Some(m.from + 8)); }
            } else if Some(m.to) == prev_ep {
                self.set_piece(m.to - 8, Piece::Empty);
            }
        } else if p == Piece::BPawn {
            if m.to + 16 == m.from {
                if self.has_adjacent(m.to, Piece::WPawn) { self.set_ep_square(Some(m.from - 8)); }
            } else if Some(m.to) == prev_ep {
                self.set_piece(m.to + 8, Piece::Empty);
            }
        }

        self.set_piece(m.from, Piece::Empty);
        if m.promote_to != Piece::Empty {
            self.set_piece(m.to, m.promote_to);
        } else {
            self.set_piece(m.to, p);
        }
        self.hash_key ^= keys().white_to_move;
        self.white_move = !wtm;
    }

    #[inline]
    fn has_adjacent(&self, sq: Square, pawn: Piece) -> bool {
        let x = file(sq);
        (x > 0 && self.squares[sq - 1] == pawn) || (x < 7 && self.squares[sq + 1] == pawn)
    }

    /// Exact inverse of `make_move` with the same `undo`.
    pub fn unmake_move(&mut self, m: &Move, undo: &UndoInfo) {
        self.hash_key ^= keys().white_to_move;
        self.white_move = !self.white_move;
        let mut p = self.squares[m.to];
        self.set_piece(m.from, p);
        self.set_piece(m.to, undo.captured_piece);
        self.set_castle_mask(undo.castle_mask);
        self.set_ep_square(undo.ep_square);
        self.half_move_clock = undo.half_move_clock;
        let wtm = self.white_move;
        if m.promote_to != Piece::Empty {
            p = Piece::pawn(wtm);
            self.set_piece(m.from, p);
        }
        if !wtm {
            self.full_move_counter -= 1;
        }

        if p == Piece::king(wtm) {
            let k0 = m.from;
            if m.to == k0 + 2 {
                self.set_piece(k0 + 3, self.squares[k0 + 1]);
                self.set_piece(k0 + 1, Piece::Empty);
            } else if m.to + 2 == k0 {
                self.set_piece(k0 - 4, self.squares[k0 - 1]);
                self.set_piece(k0 - 1, Piece::Empty);
            }
        }

        if Some(m.to) == self.ep_square {
            if p == Piece::WPawn {
                self.set_piece(m.to - 8, Piece::BPawn);
            } else if p == Piece::BPawn {
                self.set_piece(m.to + 8, Piece::WPawn);
            }
        }
    }

    /// Like `make_move` but only touches board, occupancy and side to move.
    /// Hashes, material, castling, counters and king squares go stale until
    /// the matching `unmake_see_move`.
    pub fn make_see_move(&mut self, m: &Move, undo: &mut UndoInfo) {
        undo.captured_piece = self.squares[m.to];
        let p = self.squares[m.from];

        if p.is_king() {
            let k0 = m.from;
            if m.to == k0 + 2 {
                self.set_see_piece(k0 + 1, self.squares[k0 + 3]);
                self.set_see_piece(k0 + 3, Piece::Empty);
            } else if m.to + 2 == k0 {
                self.set_see_piece(k0 - 1, self.squares[k0 - 4]);
                self.set_see_piece(k0 - 4, Piece::Empty);
            }
        }

        if Some(m.to) == self.ep_square {
            if p == Piece::WPawn {
                self.set_see_piece(m.to - 8, Piece::Empty);
            } else if p == Piece::BPawn {
                self.set_see_piece(m.to + 8, Piece::Empty);
            }
        }

        self.set_see_piece(m.from, Piece::Empty);
        if m.promote_to != Piece::Empty {
            self.set_see_piece(m.to, m.promote_to);
        } else {
            self.set_see_piece(m.to, p);
        }
        self.white_move = !self.white_move;
    }

    pub fn unmake_see_move(&mut self, m: &Move, undo: &UndoInfo) {
        self.white_move = !self.white_move;
        let mut p = self.squares[m.to];
        self.set_see_piece(m.from, p);
        self.set_see_piece(m.to, undo.captured_piece);
        let wtm = self.white_move;
        if m.promote_to != Piece::Empty {
            p = Piece::pawn(wtm);
            self.set_see_piece(m.from, p);
        }

        if p == Piece::king(wtm) {
            let k0 = m.from;
            if m.to == k0 + 2 {
                self.set_see_piece(k0 + 3, self.squares[k0 + 1]);
                self.set_see_piece(k0 + 1, Piece::Empty);
            } else if m.to + 2 == k0 {
                self.set_see_piece(k0 - 4, self.squares[k0 - 1]);
                self.set_see_piece(k0 - 1, Piece::Empty);
            }
        }

        if Some(m.to) == self.ep_square {
            if p == Piece::WPawn {
                self.set_see_piece(m.to - 8, Piece::BPawn);
            } else if p == Piece::BPawn {
                self.set_see_piece(m.to + 8, Piece::WPawn);
            }
        }
    }

    /// Home squares of the king for each castle bit, used when validating
    /// rights read from text.
    pub(crate) fn castle_home(bit: u8) -> (Square, Square) {
        match bit {
            A1_CASTLE => (E1, A1),
            H1_CASTLE => (E1, H1),
            A8_CASTLE => (E8, A8),
            _ => (E8, H8),
        }
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.draw_rule_equals(other)
            && self.half_move_clock == other.half_move_clock
            && self.full_move_counter == other.full_move_counter
            && self.hash_key == other.hash_key
            && self.pawn_hash_key == other.pawn_hash_key
    }
}

impl Eq for Position {}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..8).rev() {
            for x in 0..8 {
                write!(f, "{}", self.squares[square(x, y)].to_char())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", if self.white_move { "white" } else { "black" })?;
        writeln!(f, "{:016x}", self.hash_key)
    }
}
