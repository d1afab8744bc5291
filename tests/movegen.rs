use kestrel::board::square::parse_square;
use kestrel::io::fen::parse_fen;
use kestrel::io::{parse_move, play_moves};
use kestrel::movegen::{
    gives_check, in_check, legal_moves, num_knight_attacks, pseudo_legal_captures, pseudo_legal_moves, remove_illegal,
    sq_attacked,
};
use kestrel::{Move, Piece, Position, UndoInfo};

const FENS: [&str; 6] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q2/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    "rnbqkbnr/1pp1pppp/p7/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
];

fn sq(name: &str) -> usize {
    parse_square(name).unwrap()
}

fn names(moves: &[Move]) -> Vec<String> {
    let mut v: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
    v.sort();
    v
}

#[test]
fn king_capture_collapses_move_list() {
    let mut pos = Position::new();
    pos.set_piece(sq("e1"), Piece::WKing);
    pos.set_piece(sq("e4"), Piece::WRook);
    pos.set_piece(sq("a2"), Piece::WPawn);
    pos.set_piece(sq("e8"), Piece::BKing);

    let moves = pseudo_legal_moves(&pos);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0], Move::new(sq("e4"), sq("e8"), Piece::Empty));

    let caps = pseudo_legal_captures(&pos);
    assert_eq!(caps.len(), 1);
    assert_eq!(pos.piece(caps[0].to), Piece::BKing);
}

#[test]
fn captures_are_the_tactical_subset() {
    for fen in FENS {
        let pos = parse_fen(fen).unwrap();
        let all = pseudo_legal_moves(&pos);
        let expected: Vec<Move> = all
            .iter()
            .filter(|m| {
                pos.piece(m.to) != Piece::Empty || m.promote_to != Piece::Empty
                    || (Some(m.to) == pos.ep_square() && pos.piece(m.from).is_pawn())
            })
            .copied()
            .collect();
        assert_eq!(names(&pseudo_legal_captures(&pos)), names(&expected), "{fen}");
    }
}

#[test]
fn promotions_generate_all_four_pieces() {
    let pos = parse_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let caps = pseudo_legal_captures(&pos);
    assert_eq!(names(&caps), vec!["b7b8b", "b7b8n", "b7b8q", "b7b8r"]);
    assert_eq!(caps[0].promote_to, Piece::WQueen);
}

#[test]
fn legal_counts() {
    let expected = [20, 48, 14, 6, 44, 31];
    for (fen, n) in FENS.iter().zip(expected) {
        let mut pos = parse_fen(fen).unwrap();
        assert_eq!(legal_moves(&mut pos).len(), n, "{fen}");
        let pseudo = pseudo_legal_moves(&pos);
        assert_eq!(remove_illegal(&mut pos, &pseudo).len(), n);
    }
}

#[test]
fn attacked_squares_in_start_position() {
    let mut pos = Position::startpos();
    // White to move, so this asks about Black's attacks
    assert!(sq_attacked(&pos, sq("f6")));
    assert!(sq_attacked(&pos, sq("d6")));
    assert!(!sq_attacked(&pos, sq("e5")));
    assert!(!sq_attacked(&pos, sq("e3")));
    pos.set_white_move(false);
    assert!(sq_attacked(&pos, sq("e3")));
    assert!(sq_attacked(&pos, sq("h3")));
    assert!(!sq_attacked(&pos, sq("e4")));
    assert_eq!(num_knight_attacks(&pos, sq("d2"), true), 1);
    assert_eq!(num_knight_attacks(&pos, sq("f6"), false), 1);
    assert_eq!(num_knight_attacks(&pos, sq("e4"), true), 0);
}

#[test]
fn in_check_detection() {
    let mut pos = Position::startpos();
    assert!(!in_check(&pos));
    play_moves(&mut pos, &["e2e4", "f7f6", "d2d4", "g7g5", "d1h5"]).unwrap();
    assert!(in_check(&pos));
    assert!(legal_moves(&mut pos).is_empty());
}

#[test]
fn no_castling_through_or_out_of_check() {
    // f1 covered
    let mut pos = parse_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = names(&pseudo_legal_moves(&pos));
    assert!(!moves.contains(&"e1g1".to_string()));
    assert!(moves.contains(&"e1c1".to_string()));
    assert!(parse_move(&mut pos, "e1g1").is_err());

    // b1 covered is fine, only the king's path matters
    let pos = parse_fen("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = names(&pseudo_legal_moves(&pos));
    assert!(moves.contains(&"e1c1".to_string()));
    assert!(moves.contains(&"e1g1".to_string()));

    // in check
    let pos = parse_fen("4k3/4r3/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = names(&pseudo_legal_moves(&pos));
    assert!(!moves.contains(&"e1c1".to_string()));
    assert!(!moves.contains(&"e1g1".to_string()));

    // blocked
    let pos = parse_fen("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1").unwrap();
    assert!(pseudo_legal_moves(&pos).iter().all(|m| !(m.from == sq("e1") && m.to.abs_diff(m.from) == 2)));
}

#[test]
fn en_passant_generated_only_when_available() {
    let mut pos = Position::startpos();
    play_moves(&mut pos, &["e2e4", "a7a6", "e4e5", "d7d5"]).unwrap();
    assert!(names(&legal_moves(&mut pos)).contains(&"e5d6".to_string()));

    play_moves(&mut pos, &["g1f3", "h7h6"]).unwrap();
    assert!(!names(&legal_moves(&mut pos)).contains(&"e5d6".to_string()));
}

#[test]
fn gives_check_matches_make_and_test() {
    let extra = [
        "5k2/8/8/8/8/8/8/4K2R w K - 0 1",
        "8/8/8/k2pP2R/8/8/8/4K3 w - d6 0 1",
        "3k4/8/8/8/3B4/8/3R4/3K4 w - - 0 1",
    ];
    let mut undo = UndoInfo::default();
    for fen in FENS.iter().chain(extra.iter()) {
        let mut pos = parse_fen(fen).unwrap();
        let before = pos.clone();
        for m in &legal_moves(&mut pos) {
            pos.make_move(m, &mut undo);
            let expected = in_check(&pos);
            pos.unmake_move(m, &undo);
            assert_eq!(gives_check(&mut pos, m, &mut undo), expected, "{fen} {m}");
            assert_eq!(pos, before);
        }
    }
}

#[test]
fn castling_can_give_check() {
    let mut pos = parse_fen("5k2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let m = parse_move(&mut pos, "e1g1").unwrap();
    let mut undo = UndoInfo::default();
    assert!(gives_check(&mut pos, &m, &mut undo));
}
