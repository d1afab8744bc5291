/// Contents of a board square. `Empty` is index 0 so per-piece tables can be
/// indexed directly with `piece as usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Piece {
    #[default]
    Empty = 0,
    WKing,
    WQueen,
    WRook,
    WBishop,
    WKnight,
    WPawn,
    BKing,
    BQueen,
    BRook,
    BBishop,
    BKnight,
    BPawn,
}

impl Piece {
    pub const COUNT: usize = 13;

    pub const ALL: [Piece; Piece::COUNT] = [
        Piece::Empty,
        Piece::WKing, Piece::WQueen, Piece::WRook, Piece::WBishop, Piece::WKnight, Piece::WPawn,
        Piece::BKing, Piece::BQueen, Piece::BRook, Piece::BBishop, Piece::BKnight, Piece::BPawn,
    ];

    #[inline]
    pub fn from_index(i: usize) -> Piece { Piece::ALL[i] }

    #[inline]
    pub fn index(self) -> usize { self as usize }

    #[inline]
    pub fn is_empty(self) -> bool { self == Piece::Empty }

    #[inline]
    pub fn is_white(self) -> bool { matches!(self as u8, 1..=6) }

    #[inline]
    pub fn is_black(self) -> bool { (self as u8) >= 7 }

    /// True if the square holds a piece belonging to the given side.
    #[inline]
    pub fn is_color(self, white: bool) -> bool {
        if white { self.is_white() } else { self.is_black() }
    }

    #[inline]
    pub fn is_pawn(self) -> bool { matches!(self, Piece::WPawn | Piece::BPawn) }

    #[inline]
    pub fn is_king(self) -> bool { matches!(self, Piece::WKing | Piece::BKing) }

    #[inline]
    pub fn king(white: bool) -> Piece { if white { Piece::WKing } else { Piece::BKing } }
    #[inline]
    pub fn queen(white: bool) -> Piece { if white { Piece::WQueen } else { Piece::BQueen } }
    #[inline]
    pub fn rook(white: bool) -> Piece { if white { Piece::WRook } else { Piece::BRook } }
    #[inline]
    pub fn bishop(white: bool) -> Piece { if white { Piece::WBishop } else { Piece::BBishop } }
    #[inline]
    pub fn knight(white: bool) -> Piece { if white { Piece::WKnight } else { Piece::BKnight } }
    #[inline]
    pub fn pawn(white: bool) -> Piece { if white { Piece::WPawn } else { Piece::BPawn } }

    /// FEN letter, upper case for White. Empty squares map to `'.'`.
    pub fn to_char(self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::WKing => 'K',
            Piece::WQueen => 'Q',
            Piece::WRook => 'R',
            Piece::WBishop => 'B',
            Piece::WKnight => 'N',
            Piece::WPawn => 'P',
            Piece::BKing => 'k',
            Piece::BQueen => 'q',
            Piece::BRook => 'r',
            Piece::BBishop => 'b',
            Piece::BKnight => 'n',
            Piece::BPawn => 'p',
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let p = match c {
            'K' => Piece::WKing,
            'Q' => Piece::WQueen,
            'R' => Piece::WRook,
            'B' => Piece::WBishop,
            'N' => Piece::WKnight,
            'P' => Piece::WPawn,
            'k' => Piece::BKing,
            'q' => Piece::BQueen,
            'r' => Piece::BRook,
            'b' => Piece::BBishop,
            'n' => Piece::BKnight,
            'p' => Piece::BPawn,
            _ => return None,
        };
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_and_index_roundtrip() {
        for (i, &p) in Piece::ALL.iter().enumerate() {
            assert_eq!(Piece::from_index(i), p);
            assert_eq!(p.index(), i);
            if p != Piece::Empty {
                assert_ne!(p.is_white(), p.is_black());
                assert_eq!(Piece::from_char(p.to_char()), Some(p));
            }
        }
        assert!(!Piece::Empty.is_white() && !Piece::Empty.is_black());
    }
}
