use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kestrel::io::fen::parse_fen;
use kestrel::movegen;
use kestrel::{MoveList, UndoInfo};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q2/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_movegen(c: &mut Criterion) {
    let mut pos = parse_fen(KIWIPETE).unwrap();
    let mut ml = MoveList::new();

    c.bench_function("pseudo_legal_moves", |b| {
        b.iter(|| {
            movegen::pseudo_legal_moves_into(black_box(&pos), &mut ml);
            black_box(ml.len())
        })
    });
    c.bench_function("pseudo_legal_captures", |b| {
        b.iter(|| {
            movegen::pseudo_legal_captures_into(black_box(&pos), &mut ml);
            black_box(ml.len())
        })
    });
    c.bench_function("legal_moves", |b| b.iter(|| black_box(movegen::legal_moves(&mut pos).len())));

    let moves = movegen::legal_moves(&mut pos);
    c.bench_function("gives_check_all", |b| {
        let mut undo = UndoInfo::default();
        b.iter(|| moves.iter().filter(|m| movegen::gives_check(&mut pos, m, &mut undo)).count())
    });
    c.bench_function("make_unmake_all", |b| {
        let mut undo = UndoInfo::default();
        b.iter(|| {
            for m in &moves {
                pos.make_move(m, &mut undo);
                pos.unmake_move(m, &undo);
            }
            black_box(pos.zobrist_hash())
        })
    });
}

criterion_group!(benches, bench_movegen);
criterion_main!(benches);
