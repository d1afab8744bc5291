//! Pseudo-legal move generation, attack detection and the legality filter.
//!
//! # King-capture early exit
//!
//! Generation is pseudo-legal, so it can run on a position where the side to
//! move is able to capture the enemy king (the previous move left its own king
//! en prise). When the generator produces such a capture it stops immediately
//! and the list is replaced by a single move: that king capture. Callers test
//! "did the last move leave the king capturable" by checking for this
//! singleton, so any rewrite of the generator has to keep the behaviour.

use crate::board::square::{
    file, offset, rank, square, Square, BISHOP_DIRS, DIRECTIONS, E1, E8, KING_STEPS, KNIGHT_STEPS, RAY_LEN, ROOK_DIRS,
};
use crate::board::{Move, MoveList, Piece, Position, UndoInfo, A1_CASTLE, A8_CASTLE, H1_CASTLE, H8_CASTLE};

/// All pseudo-legal moves for the side to move.
pub fn pseudo_legal_moves(pos: &Position) -> MoveList {
    let mut ml = MoveList::new();
    pseudo_legal_moves_into(pos, &mut ml);
    ml
}

/// Same as `pseudo_legal_moves`, reusing a caller-owned buffer.
pub fn pseudo_legal_moves_into(pos: &Position, ml: &mut MoveList) {
    ml.clear();
    generate::<false>(pos, ml);
}

/// Captures (en passant included) and non-capturing promotions, for
/// quiescence search.
pub fn pseudo_legal_captures(pos: &Position) -> MoveList {
    let mut ml = MoveList::new();
    pseudo_legal_captures_into(pos, &mut ml);
    ml
}

pub fn pseudo_legal_captures_into(pos: &Position, ml: &mut MoveList) {
    ml.clear();
    generate::<true>(pos, ml);
}

/// Pseudo-legal moves with the illegal ones filtered out.
pub fn legal_moves(pos: &mut Position) -> MoveList {
    let moves = pseudo_legal_moves(pos);
    remove_illegal(pos, &moves)
}

fn generate<const CAPTURES: bool>(pos: &Position, ml: &mut MoveList) {
    let wtm = pos.white_move();
    for x in 0..8 {
        for y in 0..8 {
            let sq = square(x, y);
            let p = pos.piece(sq);
            if !p.is_color(wtm) { continue; }
            match p {
                Piece::WRook | Piece::BRook | Piece::WQueen | Piece::BQueen
                | Piece::WBishop | Piece::BBishop => {
                    if !matches!(p, Piece::WBishop | Piece::BBishop) {
                        for d in ROOK_DIRS {
                            if add_direction::<CAPTURES>(ml, pos, sq, RAY_LEN[sq][d], DIRECTIONS[d]) { return; }
                        }
                    }
                    if !matches!(p, Piece::WRook | Piece::BRook) {
                        for d in BISHOP_DIRS {
                            if add_direction::<CAPTURES>(ml, pos, sq, RAY_LEN[sq][d], DIRECTIONS[d]) { return; }
                        }
                    }
                }
                Piece::WKnight | Piece::BKnight => {
                    for (dx, dy) in KNIGHT_STEPS {
                        if let Some(to) = offset(sq, dx, dy) {
                            if add_direction::<CAPTURES>(ml, pos, sq, 1, to as isize - sq as isize) { return; }
                        }
                    }
                }
                Piece::WKing | Piece::BKing => {
                    for (dx, dy) in KING_STEPS {
                        if let Some(to) = offset(sq, dx, dy) {
                            if add_direction::<CAPTURES>(ml, pos, sq, 1, to as isize - sq as isize) { return; }
                        }
                    }
                    if !CAPTURES {
                        add_castles(ml, pos, sq);
                    }
                }
                Piece::WPawn | Piece::BPawn => {
                    if add_pawn_moves_from::<CAPTURES>(ml, pos, sq) { return; }
                }
                Piece::Empty => {}
            }
        }
    }
}

/// Walks from `sq0` in steps of `delta`. Returns true if the enemy king was
/// hit, in which case `ml` now holds only that capture.
fn add_direction<const CAPTURES: bool>(ml: &mut MoveList, pos: &Position, sq0: Square, max_steps: u8, delta: isize) -> bool {
    let wtm = pos.white_move();
    let mut sq = sq0 as isize;
    for _ in 0..max_steps {
        sq += delta;
        let to = sq as usize;
        let p = pos.piece(to);
        if p == Piece::Empty {
            if !CAPTURES { ml.push(Move::new(sq0, to, Piece::Empty)); }
            continue;
        }
        if p.is_color(!wtm) {
            if p == Piece::king(!wtm) {
                ml.clear();
                ml.push(Move::new(sq0, to, Piece::Empty));
                return true;
            }
            ml.push(Move::new(sq0, to, Piece::Empty));
        }
        break;
    }
    false
}

fn add_castles(ml: &mut MoveList, pos: &Position, sq: Square) {
    let wtm = pos.white_move();
    let k0 = if wtm { E1 } else { E8 };
    if sq != k0 { return; }
    let (a_bit, h_bit) = if wtm { (A1_CASTLE, H1_CASTLE) } else { (A8_CASTLE, H8_CASTLE) };
    let rook = Piece::rook(wtm);
    let mask = pos.castle_mask();
    if mask & (1 << h_bit) != 0
        && pos.piece(k0 + 1) == Piece::Empty
        && pos.piece(k0 + 2) == Piece::Empty
        && pos.piece(k0 + 3) == rook
        && !sq_attacked(pos, k0)
        && !sq_attacked(pos, k0 + 1)
    {
        ml.push(Move::new(k0, k0 + 2, Piece::Empty));
    }
    if mask & (1 << a_bit) != 0
        && pos.piece(k0 - 1) == Piece::Empty
        && pos.piece(k0 - 2) == Piece::Empty
        && pos.piece(k0 - 3) == Piece::Empty
        && pos.piece(k0 - 4) == rook
        && !sq_attacked(pos, k0)
        && !sq_attacked(pos, k0 - 1)
    {
        ml.push(Move::new(k0, k0 - 2, Piece::Empty));
    }
}

fn add_pawn_moves_from<const CAPTURES: bool>(ml: &mut MoveList, pos: &Position, sq: Square) -> bool {
    let wtm = pos.white_move();
    let x = file(sq);
    let y = rank(sq);
    let fwd = if wtm { sq + 8 } else { sq - 8 };
    let last_rank = matches!(rank(fwd), 0 | 7);

    if (!CAPTURES || last_rank) && pos.piece(fwd) == Piece::Empty {
        add_pawn_moves(ml, sq, fwd);
        if !CAPTURES && y == (if wtm { 1 } else { 6 }) {
            let fwd2 = if wtm { fwd + 8 } else { fwd - 8 };
            if pos.piece(fwd2) == Piece::Empty {
                add_pawn_moves(ml, sq, fwd2);
            }
        }
    }

    for (ok, to) in [(x > 0, fwd.wrapping_sub(1)), (x < 7, fwd + 1)] {
        if !ok { continue; }
        let cap = pos.piece(to);
        if cap != Piece::Empty {
            if cap.is_color(!wtm) {
                if cap == Piece::king(!wtm) {
                    ml.clear();
                    ml.push(Move::new(sq, to, Piece::Empty));
                    return true;
                }
                add_pawn_moves(ml, sq, to);
            }
        } else if Some(to) == pos.ep_square() {
            add_pawn_moves(ml, sq, to);
        }
    }
    false
}

/// Adds a pawn move, expanding it into the four promotions on the last rank.
fn add_pawn_moves(ml: &mut MoveList, from: Square, to: Square) {
    match rank(to) {
        7 => {
            for p in [Piece::WQueen, Piece::WKnight, Piece::WRook, Piece::WBishop] {
                ml.push(Move::new(from, to, p));
            }
        }
        0 => {
            for p in [Piece::BQueen, Piece::BKnight, Piece::BRook, Piece::BBishop] {
                ml.push(Move::new(from, to, p));
            }
        }
        _ => ml.push(Move::new(from, to, Piece::Empty)),
    }
}

/// True if the side to move is in check.
pub fn in_check(pos: &Position) -> bool {
    match pos.king_sq(pos.white_move()) {
        Some(k) => sq_attacked(pos, k),
        None => false,
    }
}

/// True if the side to move could capture the opponent's king.
pub fn can_take_king(pos: &mut Position) -> bool {
    pos.set_white_move(!pos.white_move());
    let ret = in_check(pos);
    pos.set_white_move(!pos.white_move());
    ret
}

/// First piece met walking from `sq` (exclusive), or `Empty`.
#[inline]
fn check_direction(pos: &Position, sq: Square, max_steps: u8, delta: isize) -> Piece {
    let mut s = sq as isize;
    for _ in 0..max_steps {
        s += delta;
        let p = pos.piece(s as usize);
        if p != Piece::Empty { return p; }
    }
    Piece::Empty
}

/// True if the side *not* to move attacks `sq`.
pub fn sq_attacked(pos: &Position, sq: Square) -> bool {
    let wtm = pos.white_move();
    let o_queen = Piece::queen(!wtm);
    let o_rook = Piece::rook(!wtm);
    let o_bish = Piece::bishop(!wtm);
    let o_knight = Piece::knight(!wtm);

    for d in ROOK_DIRS {
        let p = check_direction(pos, sq, RAY_LEN[sq][d], DIRECTIONS[d]);
        if p == o_queen || p == o_rook { return true; }
    }
    for d in BISHOP_DIRS {
        let p = check_direction(pos, sq, RAY_LEN[sq][d], DIRECTIONS[d]);
        if p == o_queen || p == o_bish { return true; }
    }
    for (dx, dy) in KNIGHT_STEPS {
        if let Some(s) = offset(sq, dx, dy) {
            if pos.piece(s) == o_knight { return true; }
        }
    }

    let x = file(sq);
    let y = rank(sq);
    if wtm {
        if y < 6 {
            if x < 7 && pos.piece(sq + 9) == Piece::BPawn { return true; }
            if x > 0 && pos.piece(sq + 7) == Piece::BPawn { return true; }
        }
    } else if y > 1 {
        if x < 7 && pos.piece(sq - 7) == Piece::WPawn { return true; }
        if x > 0 && pos.piece(sq - 9) == Piece::WPawn { return true; }
    }

    if let Some(ok) = pos.king_sq(!wtm) {
        let dx = (file(ok) as isize - x as isize).abs();
        let dy = (rank(ok) as isize - y as isize).abs();
        if dx <= 1 && dy <= 1 { return true; }
    }
    false
}

/// Keeps the moves that do not leave the mover's king attacked.
pub fn remove_illegal(pos: &mut Position, moves: &MoveList) -> MoveList {
    let mut ret = MoveList::new();
    let mut undo = UndoInfo::default();
    for m in moves {
        pos.make_move(m, &mut undo);
        pos.set_white_move(!pos.white_move());
        if !in_check(pos) { ret.push(*m); }
        pos.set_white_move(!pos.white_move());
        pos.unmake_move(m, &undo);
    }
    ret
}

/// 1 = rook line, 2 = bishop line, 3 = knight jump, 0 = unrelated.
fn slide_direction_type(sq1: Square, sq2: Square) -> u8 {
    let dx = (file(sq1) as isize - file(sq2) as isize).abs();
    let dy = (rank(sq1) as isize - rank(sq2) as isize).abs();
    if dx == 0 || dy == 0 { return 1; }
    if dx == dy { return 2; }
    if (dx == 1 && dy == 2) || (dx == 2 && dy == 1) { return 3; }
    0
}

/// True if `m` checks the opponent. Moves that cannot touch a line to the
/// enemy king are answered without playing them; the rest are made, tested
/// and unmade using `undo`.
pub fn gives_check(pos: &mut Position, m: &Move, undo: &mut UndoInfo) -> bool {
    let Some(oking) = pos.king_sq(!pos.white_move()) else { return false };
    let mut need_test = slide_direction_type(oking, m.to) > 0 || slide_direction_type(oking, m.from) > 0;
    if !need_test {
        let p = pos.piece(m.from);
        if p.is_king() {
            // castling rook
            need_test = true;
        } else if p.is_pawn() && (pos.piece(m.to) != Piece::Empty || Some(m.to) == pos.ep_square()) {
            // en passant removes a second pawn
            need_test = true;
        }
    }
    if need_test {
        pos.make_move(m, undo);
        let gives = in_check(pos);
        pos.unmake_move(m, undo);
        return gives;
    }
    false
}

/// Number of knights of one colour attacking `sq`, pins ignored.
pub fn num_knight_attacks(pos: &Position, sq: Square, white: bool) -> u32 {
    let knight = Piece::knight(white);
    KNIGHT_STEPS.iter()
        .filter_map(|&(dx, dy)| offset(sq, dx, dy))
        .filter(|&s| pos.piece(s) == knight)
        .count() as u32
}
