use crate::moves::Move;
use crate::piece::Piece;
use crate::position::Position;

use super::{is_single_step_exclusion, major_move_to, PieceMoves};

pub(super) const BISHOP_OFFSETS: [i8; 4] = [-9, -7, 7, 9];
pub(super) const ROOK_OFFSETS: [i8; 4] = [-8, -1, 1, 8];
pub(super) const QUEEN_OFFSETS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

pub(super) fn gen_sliding_moves(piece: Piece, position: &Position, offsets: &[i8]) -> PieceMoves {
    let mut moves = PieceMoves::new();

    for &offset in offsets {
        let mut curr = piece.square();
        while !is_single_step_exclusion(curr, offset) {
            let Some(dest) = curr.offset(offset) else {
                break;
            };
            let Some(mve) = major_move_to(piece, position, dest) else {
                break;
            };
            moves.push(mve);
            if let Move::Attack { .. } = mve {
                break;
            }
            curr = dest;
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::piece::{Color, PieceKind};
    use crate::square::Square;
    use crate::square::Square::*;
    use test_case::test_case;

    fn dests(moves: &PieceMoves) -> HashSet<Square> {
        moves.iter().filter_map(Move::dest).collect()
    }

    #[test_case("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", A1, &[A2, A3, A4, A5, A6, A7, A8, B1, C1, D1] ; "rook from corner")]
    #[test_case("4k3/8/8/8/7R/8/8/4K3 w - - 0 1", H4, &[H1, H2, H3, H5, H6, H7, H8, G4, F4, E4, D4, C4, B4, A4] ; "rook on h file doesn't wrap")]
    #[test_case("4k3/8/8/8/8/8/1P6/B3K3 w - - 0 1", A1, &[] ; "bishop blocked by own pawn")]
    #[test_case("4k3/8/8/3p4/8/1B6/8/4K3 w - - 0 1", B3, &[A4, A2, C4, D5, C2, D1] ; "bishop stops at capture")]
    #[test_case("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1", A1, &[A2, A3, A4, A5, A6, A7, A8, B1, C1, D1, B2, C3, D4, E5, F6, G7, H8] ; "queen from corner")]
    fn test_gen_sliding_moves(fen: &str, square: Square, want: &[Square]) {
        let pos = Position::from_fen(fen).unwrap();
        let piece = pos.piece_at(square).unwrap();
        let offsets: &[i8] = match piece.kind() {
            PieceKind::Bishop => &BISHOP_OFFSETS,
            PieceKind::Rook => &ROOK_OFFSETS,
            _ => &QUEEN_OFFSETS,
        };

        let got = gen_sliding_moves(piece, &pos, offsets);
        assert_eq!(dests(&got), want.iter().copied().collect());
    }

    #[test]
    fn test_capture_only_enemy() {
        let pos = Position::from_fen("4k3/8/8/8/r2R3q/8/8/4K3 w - - 0 1").unwrap();
        let rook = pos.piece_at(D4).unwrap();
        let moves = gen_sliding_moves(rook, &pos, &ROOK_OFFSETS);

        let captured: Vec<_> = moves.iter().filter_map(Move::captured_piece).collect();
        assert_eq!(captured.len(), 2);
        assert!(captured.iter().all(|p| p.color() == Color::Black));
        // a rook without a castling right comes out of the FEN as moved
        let enemy_rook = Piece::new(PieceKind::Rook, Color::Black, A4).with_has_moved(true);
        assert!(captured.contains(&enemy_rook));
        assert!(captured.contains(&Piece::new(PieceKind::Queen, Color::Black, H4)));
    }
}
