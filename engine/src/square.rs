use strum_macros::{Display, EnumIter, EnumString, FromRepr};

use crate::geometry::{is_valid_square_index, NUM_SQUARES_PER_ROW};

/// Board square, numbered row-major from black's back rank: `A8` is 0 and `H1` is 63.
#[allow(dead_code)]
#[rustfmt::skip]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumString, FromRepr, Display, PartialOrd, Ord, Hash)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Square {
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
}

impl Square {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn row(self) -> usize {
        self.index() / NUM_SQUARES_PER_ROW
    }

    pub const fn column(self) -> usize {
        self.index() % NUM_SQUARES_PER_ROW
    }

    pub fn from_index(idx: usize) -> Option<Square> {
        u8::try_from(idx).ok().and_then(Square::from_repr)
    }

    /// Raw index arithmetic. Only rejects results that leave 0..64; callers are responsible for
    /// the column wrap checks in [`crate::geometry`].
    pub fn offset(self, delta: i8) -> Option<Square> {
        let idx = self as i16 + delta as i16;
        if !is_valid_square_index(idx) {
            return None;
        }
        Square::from_repr(idx as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::Square::*;
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;
    use test_case::test_case;
    use testresult::TestResult;

    #[test]
    fn test_indices_are_row_major_from_black() {
        for (idx, sq) in Square::iter().enumerate() {
            assert_eq!(sq.index(), idx);
            assert_eq!(Square::from_index(idx), Some(sq));
        }
        assert_eq!(A8.index(), 0);
        assert_eq!(H1.index(), 63);
        assert_eq!(Square::from_index(64), None);
    }

    #[test_case(A8, 0, 0)]
    #[test_case(H8, 0, 7)]
    #[test_case(E4, 4, 4)]
    #[test_case(H1, 7, 7)]
    fn test_row_column(sq: Square, row: usize, column: usize) {
        assert_eq!(sq.row(), row);
        assert_eq!(sq.column(), column);
    }

    #[test_case(E2, -8, Some(E3) ; "one row towards black")]
    #[test_case(E2, -16, Some(E4) ; "two rows towards black")]
    #[test_case(A8, -1, None ; "off the top")]
    #[test_case(H1, 1, None ; "off the bottom")]
    #[test_case(H4, 1, Some(A3) ; "raw wrap is not rejected here")]
    fn test_offset(sq: Square, delta: i8, want: Option<Square>) {
        assert_eq!(sq.offset(delta), want);
    }

    #[test_case("e4", E4)]
    #[test_case("A8", A8)]
    #[test_case("h1", H1)]
    fn test_from_str(inp: &str, want: Square) -> TestResult {
        assert_eq!(Square::from_str(inp)?, want);
        Ok(())
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(E4.to_string(), "e4");
    }
}
