use kestrel::board::square::parse_square;
use kestrel::io::fen::{parse_fen, to_fen};
use kestrel::io::play_moves;
use kestrel::{Piece, Position};

#[test]
fn move_order_does_not_change_hash() {
    let mut a = Position::startpos();
    play_moves(&mut a, &["e2e4", "e7e5", "g1f3"]).unwrap();
    let mut b = Position::startpos();
    play_moves(&mut b, &["g1f3", "e7e5", "e2e4"]).unwrap();

    assert_eq!(a.piece(parse_square("f3").unwrap()), Piece::WKnight);
    assert_eq!(a.ep_square(), None);
    assert_eq!(a.castle_mask(), 0b1111);
    assert_eq!(a.zobrist_hash(), b.zobrist_hash());
    assert_eq!(a.pawn_zobrist_hash(), b.pawn_zobrist_hash());
    assert!(a.draw_rule_equals(&b));

    assert_eq!(to_fen(&a), "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2");
    let c = parse_fen(&to_fen(&a)).unwrap();
    assert_eq!(c.zobrist_hash(), a.zobrist_hash());
}

#[test]
fn en_passant_right_separates_positions() {
    let mut a = Position::startpos();
    play_moves(&mut a, &["e2e4", "a7a6", "e4e5", "d7d5"]).unwrap();
    let mut b = Position::startpos();
    play_moves(&mut b, &["e2e3", "d7d6", "e3e4", "a7a6", "e4e5", "d6d5"]).unwrap();

    assert!(a.ep_square().is_some());
    assert_eq!(b.ep_square(), None);
    assert!(!a.draw_rule_equals(&b));
    assert_ne!(a.zobrist_hash(), b.zobrist_hash());

    a.set_ep_square(None);
    assert!(a.draw_rule_equals(&b));
    assert_eq!(a.zobrist_hash(), b.zobrist_hash());
}

#[test]
fn lost_castling_right_separates_positions() {
    let mut a = Position::startpos();
    play_moves(&mut a, &["g1f3", "g8f6", "h1g1", "f6g8", "g1h1", "g8f6", "f3g1", "f6g8"]).unwrap();
    let b = Position::startpos();
    assert!(!a.h1_castle());
    assert_ne!(a.zobrist_hash(), b.zobrist_hash());
    a.set_castle_mask(b.castle_mask());
    assert_eq!(a.zobrist_hash(), b.zobrist_hash());
}
