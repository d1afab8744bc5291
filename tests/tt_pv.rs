use kestrel::io::parse_move;
use kestrel::search::tt::{Bound, TranspositionTable};
use kestrel::{Move, Position, UndoInfo};

/// Plays `line` from `pos`, storing each move under the position it was
/// played from.
fn store_line(tt: &mut TranspositionTable, pos: &Position, line: &[(&str, Bound)]) {
    let mut pos = pos.clone();
    let mut undo = UndoInfo::default();
    for (ply, (s, bound)) in line.iter().enumerate() {
        let m = parse_move(&mut pos, s).unwrap();
        tt.insert(pos.history_hash(), &m, *bound, ply as i32, 10 - ply as i32, 0);
        pos.make_move(&m, &mut undo);
    }
}

fn as_strings(moves: &[Move]) -> Vec<String> {
    moves.iter().map(|m| m.to_string()).collect()
}

#[test]
fn pv_follows_stored_moves() {
    let mut tt = TranspositionTable::new(16);
    let root = Position::startpos();
    store_line(&mut tt, &root, &[("e2e4", Bound::Exact), ("e7e5", Bound::Lower), ("g1f3", Bound::Upper)]);

    assert_eq!(tt.extract_pv(&root), "e2e4 >e7e5 <g1f3");

    let mut scratch = root.clone();
    let first = parse_move(&mut scratch, "e2e4").unwrap();
    assert_eq!(as_strings(&tt.extract_pv_moves(&root, first)), ["e2e4", "e7e5", "g1f3"]);
    assert_eq!(scratch, root);
}

#[test]
fn pv_stops_at_illegal_stored_move() {
    let mut tt = TranspositionTable::new(16);
    let root = Position::startpos();
    store_line(&mut tt, &root, &[("e2e4", Bound::Exact), ("e7e5", Bound::Exact)]);

    // a move that is not legal after 1.e4 e5 stored for that position
    let mut pos = root.clone();
    let mut undo = UndoInfo::default();
    for s in ["e2e4", "e7e5"] {
        let m = parse_move(&mut pos, s).unwrap();
        pos.make_move(&m, &mut undo);
    }
    tt.insert(pos.history_hash(), &Move::new(12, 28, kestrel::Piece::Empty), Bound::Exact, 2, 8, 0);

    assert_eq!(tt.extract_pv(&root), "e2e4 e7e5");
}

#[test]
fn pv_stops_on_repetition() {
    let mut tt = TranspositionTable::new(16);
    let root = Position::startpos();
    let cycle = [("g1f3", Bound::Exact), ("g8f6", Bound::Exact), ("f3g1", Bound::Exact), ("f6g8", Bound::Exact)];
    store_line(&mut tt, &root, &cycle);

    let pv = tt.extract_pv(&root);
    assert_eq!(pv, "g1f3 g8f6 f3g1 f6g8 g1f3");

    let mut scratch = root.clone();
    let first = parse_move(&mut scratch, "g1f3").unwrap();
    let moves = tt.extract_pv_moves(&root, first);
    assert_eq!(as_strings(&moves), ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3"]);
}

#[test]
fn empty_table_gives_empty_pv() {
    let tt = TranspositionTable::new(8);
    let root = Position::startpos();
    assert_eq!(tt.extract_pv(&root), "");
    let m = Move::new(12, 28, kestrel::Piece::Empty);
    assert_eq!(tt.extract_pv_moves(&root, m), vec![m]);
}
