use crate::geometry::{EIGHTH_COLUMN, FIRST_COLUMN, SECOND_COLUMN, SEVENTH_COLUMN};
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;

use super::{is_single_step_exclusion, major_move_to, PieceMoves};

const KNIGHT_OFFSETS: [i8; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
const KING_OFFSETS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

pub(super) fn gen_knight_moves(piece: Piece, position: &Position) -> PieceMoves {
    gen_leaping_moves(piece, position, &KNIGHT_OFFSETS, is_knight_exclusion)
}

pub(super) fn gen_king_moves(piece: Piece, position: &Position) -> PieceMoves {
    gen_leaping_moves(piece, position, &KING_OFFSETS, is_single_step_exclusion)
}

fn gen_leaping_moves(
    piece: Piece,
    position: &Position,
    offsets: &[i8],
    is_excluded: fn(Square, i8) -> bool,
) -> PieceMoves {
    offsets
        .iter()
        .filter(|&&offset| !is_excluded(piece.square(), offset))
        .filter_map(|&offset| piece.square().offset(offset))
        .filter_map(|dest| major_move_to(piece, position, dest))
        .collect()
}

fn is_knight_exclusion(square: Square, offset: i8) -> bool {
    let idx = square.index();
    (FIRST_COLUMN[idx] && matches!(offset, -17 | -10 | 6 | 15))
        || (SECOND_COLUMN[idx] && matches!(offset, -10 | 6))
        || (SEVENTH_COLUMN[idx] && matches!(offset, -6 | 10))
        || (EIGHTH_COLUMN[idx] && matches!(offset, -15 | -6 | 10 | 17))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::moves::Move;
    use crate::square::Square::*;
    use test_case::test_case;

    fn dests(moves: &PieceMoves) -> HashSet<Square> {
        moves.iter().filter_map(Move::dest).collect()
    }

    #[test_case("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1", D4, &[B5, C6, E6, F5, B3, C2, E2, F3] ; "center")]
    #[test_case("N3k3/8/8/8/8/8/8/4K3 w - - 0 1", A8, &[B6, C7] ; "corner")]
    #[test_case("4k3/8/8/8/N7/8/8/4K3 w - - 0 1", A4, &[B6, C5, C3, B2] ; "a file")]
    #[test_case("4k3/8/8/8/1N6/8/8/4K3 w - - 0 1", B4, &[A6, C6, D5, D3, A2, C2] ; "b file")]
    #[test_case("4k3/8/8/8/6N1/8/8/4K3 w - - 0 1", G4, &[F6, H6, E5, E3, F2, H2] ; "g file")]
    #[test_case("4k3/8/8/8/7N/8/8/4K3 w - - 0 1", H4, &[G6, F5, F3, G2] ; "h file")]
    #[test_case("4k3/8/8/8/8/8/3P4/1N2K3 w - - 0 1", B1, &[A3, C3] ; "own piece blocks")]
    fn test_gen_knight_moves(fen: &str, square: Square, want: &[Square]) {
        let pos = Position::from_fen(fen).unwrap();
        let knight = pos.piece_at(square).unwrap();

        let got = gen_knight_moves(knight, &pos);
        assert_eq!(dests(&got), want.iter().copied().collect());
    }

    #[test_case("4k3/8/8/8/3K4/8/8/8 w - - 0 1", D4, &[C5, D5, E5, C4, E4, C3, D3, E3] ; "center")]
    #[test_case("K7/8/8/8/8/8/8/4k3 w - - 0 1", A8, &[A7, B7, B8] ; "corner")]
    #[test_case("4k3/8/8/8/7K/8/8/8 w - - 0 1", H4, &[H5, G5, G4, G3, H3] ; "h file")]
    #[test_case("4k3/8/8/8/8/8/8/2K5 w - - 0 1", C1, &[B1, B2, C2, D2, D1] ; "edge")]
    fn test_gen_king_moves(fen: &str, square: Square, want: &[Square]) {
        let pos = Position::from_fen(fen).unwrap();
        let king = pos.piece_at(square).unwrap();

        let got = gen_king_moves(king, &pos);
        assert_eq!(dests(&got), want.iter().copied().collect());
    }

    #[test]
    fn test_king_captures_enemy() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1").unwrap();
        let king = pos.piece_at(E1).unwrap();
        let got = gen_king_moves(king, &pos);

        assert!(got
            .iter()
            .any(|m| matches!(m, Move::Attack { dest: D2, .. })));
    }
}
