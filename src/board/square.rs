/// Board square index, a1 = 0 .. h8 = 63 (rank-major).
pub type Square = usize;

#[inline]
pub const fn square(x: usize, y: usize) -> Square { y * 8 + x }

/// File, 0 = a.
#[inline]
pub const fn file(sq: Square) -> usize { sq & 7 }

/// Rank, 0 = first rank.
#[inline]
pub const fn rank(sq: Square) -> usize { sq >> 3 }

pub const A1: Square = 0;
pub const E1: Square = 4;
pub const H1: Square = 7;
pub const A8: Square = 56;
pub const E8: Square = 60;
pub const H8: Square = 63;

pub const CORNERS: u64 = (1 << A1) | (1 << H1) | (1 << A8) | (1 << H8);

/// Sliding directions: E, N, W, S, NE, NW, SW, SE.
pub const DIRECTIONS: [isize; 8] = [1, 8, -1, -8, 9, 7, -9, -7];
pub const ROOK_DIRS: [usize; 4] = [0, 1, 2, 3];
pub const BISHOP_DIRS: [usize; 4] = [4, 5, 6, 7];

const fn min(a: usize, b: usize) -> usize { if a < b { a } else { b } }

const fn build_ray_len() -> [[u8; 8]; 64] {
    let mut t = [[0u8; 8]; 64];
    let mut sq = 0;
    while sq < 64 {
        let x = sq & 7;
        let y = sq >> 3;
        t[sq][0] = (7 - x) as u8;
        t[sq][1] = (7 - y) as u8;
        t[sq][2] = x as u8;
        t[sq][3] = y as u8;
        t[sq][4] = min(7 - x, 7 - y) as u8;
        t[sq][5] = min(x, 7 - y) as u8;
        t[sq][6] = min(x, y) as u8;
        t[sq][7] = min(7 - x, y) as u8;
        sq += 1;
    }
    t
}

/// Number of steps from a square to the board edge along each of `DIRECTIONS`.
pub static RAY_LEN: [[u8; 8]; 64] = build_ray_len();

/// Knight and king steps as (dx, dy).
pub const KNIGHT_STEPS: [(isize, isize); 8] = [(2, 1), (1, 2), (-1, 2), (-2, 1), (-2, -1), (-1, -2), (1, -2), (2, -1)];
pub const KING_STEPS: [(isize, isize); 8] = [(1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1)];

/// Square reached by stepping (dx, dy) from `sq`, or `None` off the board.
#[inline]
pub fn offset(sq: Square, dx: isize, dy: isize) -> Option<Square> {
    let x = file(sq) as isize + dx;
    let y = rank(sq) as isize + dy;
    if (0..8).contains(&x) && (0..8).contains(&y) { Some(square(x as usize, y as usize)) } else { None }
}

/// Algebraic name, e.g. "e4".
pub fn square_name(sq: Square) -> String {
    let mut s = String::with_capacity(2);
    s.push((b'a' + file(sq) as u8) as char);
    s.push((b'1' + rank(sq) as u8) as char);
    s
}

pub fn parse_square(s: &str) -> Option<Square> {
    let b = s.as_bytes();
    if b.len() != 2 { return None; }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) { return None; }
    Some(square((f - b'a') as usize, (r - b'1') as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for sq in 0..64 {
            assert_eq!(parse_square(&square_name(sq)), Some(sq));
        }
        assert_eq!(parse_square("e4"), Some(28));
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
    }

    #[test]
    fn rays_stop_at_edge() {
        for sq in 0..64 {
            for (d, &delta) in DIRECTIONS.iter().enumerate() {
                let n = RAY_LEN[sq][d] as isize;
                let last = sq as isize + delta * n;
                assert!((0..64).contains(&last));
                let dx = (file(last as usize) as isize - file(sq) as isize).abs();
                assert!(dx <= n, "ray from {} dir {} wrapped", sq, d);
            }
        }
        assert_eq!(RAY_LEN[0], [7, 7, 0, 0, 7, 0, 0, 0]);
    }
}
