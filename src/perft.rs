// Perft using make/unmake on a single position (no cloning)
use crate::board::{Move, Position, UndoInfo};
use crate::movegen;

/// Number of legal move sequences of length `depth` from `pos`.
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = movegen::pseudo_legal_moves(pos);
    let mut undo = UndoInfo::default();
    let mut nodes = 0u64;
    for m in &moves {
        pos.make_move(m, &mut undo);
        if !movegen::can_take_king(pos) {
            nodes += if depth == 1 { 1 } else { perft(pos, depth - 1) };
        }
        pos.unmake_move(m, &undo);
    }
    nodes
}

/// Per-root-move node counts, in generation order.
pub fn divide(pos: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    let moves = movegen::legal_moves(pos);
    let mut undo = UndoInfo::default();
    let mut out = Vec::with_capacity(moves.len());
    for m in &moves {
        pos.make_move(m, &mut undo);
        let n = perft(pos, depth.saturating_sub(1));
        pos.unmake_move(m, &undo);
        out.push((*m, n));
    }
    out
}
