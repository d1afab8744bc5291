use std::sync::OnceLock;

use super::piece::Piece;

/// Random keys for incremental hashing. The `Piece::Empty` row is all zero, so
/// replacing a piece is always `key[old] ^ key[new]`.
pub struct ZobristKeys {
    pub piece_square: [[u64; 64]; Piece::COUNT],
    pub white_to_move: u64,
    /// Indexed by the full 4-bit castle mask.
    pub castle: [u64; 16],
    /// Indexed by en-passant file + 1; 0 means no en-passant square.
    pub ep: [u64; 9],
    /// Indexed by `min(half_move_clock, 100)`.
    pub move_count: [u64; 101],
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

static KEYS: OnceLock<ZobristKeys> = OnceLock::new();

pub fn keys() -> &'static ZobristKeys {
    KEYS.get_or_init(|| {
        let mut seed = 0xF00D_F00D_DEAD_BEEF;
        let mut next = || {
            seed = splitmix64(seed);
            seed
        };
        let mut k = ZobristKeys {
            piece_square: [[0; 64]; Piece::COUNT],
            white_to_move: 0,
            castle: [0; 16],
            ep: [0; 9],
            move_count: [0; 101],
        };
        for row in k.piece_square.iter_mut().skip(1) {
            for v in row.iter_mut() { *v = next(); }
        }
        k.white_to_move = next();
        for v in &mut k.castle { *v = next(); }
        for v in &mut k.ep { *v = next(); }
        for v in &mut k.move_count { *v = next(); }
        k
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_distinct_and_empty_row_zero() {
        let k = keys();
        assert!(k.piece_square[0].iter().all(|&v| v == 0));
        let mut seen = HashSet::new();
        for row in &k.piece_square[1..] {
            for &v in row { assert!(seen.insert(v)); }
        }
        assert!(seen.insert(k.white_to_move));
        for &v in k.castle.iter().chain(k.ep.iter()).chain(k.move_count.iter()) {
            assert!(seen.insert(v));
        }
    }
}
