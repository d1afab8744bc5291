use crate::board::tables::{PAWN_VALUE, PIECE_VALUE};
use crate::board::{Move, Piece, Position, UndoInfo};
use crate::movegen;

// Every capture removes a piece, so no exchange is longer than this.
const MAX_EXCHANGE: usize = 32;

/// Static exchange evaluation: net material won by the side playing `m` if
/// both sides keep recapturing on `m.to` with their cheapest piece and may
/// stop whenever that is better. Only occupancy is updated while the exchange
/// is played out; `pos` is restored before returning.
pub fn see(pos: &mut Position, m: &Move) -> i32 {
    let target = m.to;
    let mover = pos.piece(m.from);
    let captured = if pos.piece(target) == Piece::Empty && mover.is_pawn() && Some(target) == pos.ep_square() {
        PAWN_VALUE
    } else {
        PIECE_VALUE[pos.piece(target) as usize]
    };
    let mut occupant = if m.promote_to != Piece::Empty { PIECE_VALUE[m.promote_to as usize] } else { PIECE_VALUE[mover as usize] };

    let mut gains = [0i32; MAX_EXCHANGE];
    let mut played = [(Move::NULL, UndoInfo::default()); MAX_EXCHANGE];
    gains[0] = captured;
    played[0].0 = *m;
    pos.make_see_move(m, &mut played[0].1);
    let mut len = 1;

    // Recaptures on the target square are never en passant.
    let saved_ep = pos.ep_square();
    pos.set_ep_square(None);

    while len < MAX_EXCHANGE {
        // A king capture elsewhere collapses the list and ends the exchange.
        let caps = movegen::pseudo_legal_captures(pos);
        let mut best: Option<Move> = None;
        let mut best_val = i32::MAX;
        for c in caps.iter().filter(|c| c.to == target) {
            let v = PIECE_VALUE[pos.piece(c.from) as usize];
            if v < best_val {
                best_val = v;
                best = Some(*c);
            }
        }
        let Some(r) = best else { break };
        gains[len] = occupant - gains[len - 1];
        occupant = if r.promote_to != Piece::Empty { PIECE_VALUE[r.promote_to as usize] } else { best_val };
        played[len].0 = r;
        pos.make_see_move(&r, &mut played[len].1);
        len += 1;
    }

    for (mv, u) in played[1..len].iter().rev() {
        pos.unmake_see_move(mv, u);
    }
    pos.set_ep_square(saved_ep);
    let (mv, u) = &played[0];
    pos.unmake_see_move(mv, u);

    for i in (0..len - 1).rev() {
        gains[i] = -(-gains[i]).max(gains[i + 1]);
    }
    gains[0]
}
