use arrayvec::ArrayVec;

use crate::moves::Move;
use crate::piece::{Color, Piece};
use crate::position::Position;
use crate::square::Square;
use crate::square::Square::*;

use super::calculate_attacks_on_square;

struct CastleSquares {
    king_home: Square,
    king_side_rook: Square,
    king_side_transit: [Square; 2],
    queen_side_rook: Square,
    queen_side_between: [Square; 3],
    queen_side_king_dest: Square,
    queen_side_rook_dest: Square,
}

const WHITE_CASTLE_SQUARES: CastleSquares = CastleSquares {
    king_home: E1,
    king_side_rook: H1,
    king_side_transit: [F1, G1],
    queen_side_rook: A1,
    queen_side_between: [D1, C1, B1],
    queen_side_king_dest: C1,
    queen_side_rook_dest: D1,
};

const BLACK_CASTLE_SQUARES: CastleSquares = CastleSquares {
    king_home: E8,
    king_side_rook: H8,
    king_side_transit: [F8, G8],
    queen_side_rook: A8,
    queen_side_between: [D8, C8, B8],
    queen_side_king_dest: C8,
    queen_side_rook_dest: D8,
};

/// Castles available to `king`'s side.
///
/// King side needs both transit squares empty and unattacked. Queen side only needs the three
/// squares between king and rook empty; its transit squares are not checked for attacks.
pub(super) fn gen_castle_moves(
    position: &Position,
    king: Piece,
    in_check: bool,
    opponent_moves: &[Move],
) -> ArrayVec<Move, 2> {
    let mut moves = ArrayVec::new();
    let squares = match king.color() {
        Color::White => &WHITE_CASTLE_SQUARES,
        Color::Black => &BLACK_CASTLE_SQUARES,
    };

    if in_check || king.has_moved() || king.square() != squares.king_home {
        return moves;
    }

    let is_empty = |sq: &Square| position.piece_at(*sq).is_none();
    let is_attacked =
        |sq: &Square| !calculate_attacks_on_square(*sq, opponent_moves).is_empty();

    if let Some(rook) = unmoved_rook(position, king.color(), squares.king_side_rook) {
        let [rook_dest, king_dest] = squares.king_side_transit;
        if squares.king_side_transit.iter().all(is_empty)
            && !squares.king_side_transit.iter().any(is_attacked)
        {
            moves.push(Move::KingSideCastle {
                piece: king,
                dest: king_dest,
                rook,
                rook_dest,
            });
        }
    }

    if let Some(rook) = unmoved_rook(position, king.color(), squares.queen_side_rook) {
        if squares.queen_side_between.iter().all(is_empty) {
            moves.push(Move::QueenSideCastle {
                piece: king,
                dest: squares.queen_side_king_dest,
                rook,
                rook_dest: squares.queen_side_rook_dest,
            });
        }
    }

    moves
}

fn unmoved_rook(position: &Position, color: Color, square: Square) -> Option<Piece> {
    position
        .piece_at(square)
        .filter(|piece| piece.is_rook() && piece.color() == color && piece.is_first_move())
}
