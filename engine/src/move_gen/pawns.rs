use crate::geometry::{EIGHTH_COLUMN, FIRST_COLUMN};
use crate::moves::Move;
use crate::piece::{Color, Piece};
use crate::position::Position;
use crate::square::Square;

use super::PieceMoves;

pub(super) fn gen_pawn_moves(piece: Piece, position: &Position) -> PieceMoves {
    let mut moves = PieceMoves::new();
    let color = piece.color();
    let square = piece.square();

    if let Some(dest) = square.offset(8 * color.direction()) {
        if position.piece_at(dest).is_none() {
            moves.push(Move::PawnMove { piece, dest });

            if piece.is_first_move() && color.pawn_start_row()[square.index()] {
                if let Some(jump_dest) = square.offset(16 * color.direction()) {
                    if position.piece_at(jump_dest).is_none() {
                        moves.push(Move::PawnJump {
                            piece,
                            dest: jump_dest,
                        });
                    }
                }
            }
        }
    }

    for offset in [7, 9] {
        if is_diagonal_exclusion(square, color, offset) {
            continue;
        }
        let Some(dest) = square.offset(offset * color.direction()) else {
            continue;
        };

        match position.piece_at(dest) {
            Some(other) if other.color() != color => moves.push(Move::PawnAttack {
                piece,
                dest,
                captured: other,
            }),
            Some(_) => {}
            None => {
                if let Some(captured) = en_passant_capture(position, color, dest) {
                    moves.push(Move::PawnEnPassantAttack {
                        piece,
                        dest,
                        captured,
                    });
                }
            }
        }
    }

    moves
}

/// Diagonals that would leave the board sideways. Offsets 7 and 9 point to opposite files
/// depending on which way the pawn walks.
fn is_diagonal_exclusion(square: Square, color: Color, offset: i8) -> bool {
    let idx = square.index();
    match offset {
        7 => (EIGHTH_COLUMN[idx] && color.is_white()) || (FIRST_COLUMN[idx] && color.is_black()),
        9 => (EIGHTH_COLUMN[idx] && color.is_black()) || (FIRST_COLUMN[idx] && color.is_white()),
        _ => false,
    }
}

/// The en passant pawn, if it stands just behind `dest` from the capturing pawn's view.
fn en_passant_capture(position: &Position, color: Color, dest: Square) -> Option<Piece> {
    let pawn = position.en_passant_pawn()?;
    let behind = dest.offset(8 * color.facing_direction())?;
    (pawn.color() != color && pawn.square() == behind).then_some(pawn)
}
