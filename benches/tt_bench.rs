use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kestrel::search::tt::{Bound, TranspositionTable};
use kestrel::{Move, Piece};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn bench_tt(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(0x7777);
    let keys: Vec<u64> = (0..100_000).map(|_| rng.gen()).collect();
    let m = Move::new(12, 28, Piece::Empty);

    c.bench_function("tt_insert", |b| {
        let mut tt = TranspositionTable::with_capacity_mb(16);
        let mut i = 0usize;
        b.iter(|| {
            let k = keys[i % keys.len()];
            tt.insert(k, &m, Bound::Lower, 3, (k & 15) as i32, 0);
            i += 1;
        })
    });

    c.bench_function("tt_probe", |b| {
        let mut tt = TranspositionTable::with_capacity_mb(16);
        for (d, &k) in keys.iter().enumerate() {
            tt.insert(k, &m, Bound::Exact, 0, (d % 12) as i32, 0);
        }
        let mut i = 0usize;
        b.iter(|| {
            let e = tt.probe(black_box(keys[i % keys.len()]));
            i += 1;
            black_box(e.depth)
        })
    });
}

criterion_group!(benches, bench_tt);
criterion_main!(benches);
