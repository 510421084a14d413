//! Pseudo-legal move generation: piece geometry, blocking and captures, without king safety.
//!
//! Every generator walks signed index offsets from the piece's square and consults the column
//! tables in [`crate::geometry`] before each step so a move never wraps across a board edge.

mod leaping_pieces;
mod pawns;
mod sliding_pieces;

use arrayvec::ArrayVec;

use crate::geometry::{EIGHTH_COLUMN, FIRST_COLUMN};
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceKind};
use crate::position::Position;
use crate::square::Square;

/// A queen in the open reaches 27 squares; nothing else gets close.
pub type PieceMoves = ArrayVec<Move, 32>;

impl Piece {
    /// Every destination this piece reaches on `position` under its movement rules alone.
    /// Castling is not a piece move and is added by [`crate::player::Player`].
    pub fn pseudo_legal_moves(&self, position: &Position) -> PieceMoves {
        match self.kind() {
            PieceKind::Pawn => pawns::gen_pawn_moves(*self, position),
            PieceKind::Knight => leaping_pieces::gen_knight_moves(*self, position),
            PieceKind::King => leaping_pieces::gen_king_moves(*self, position),
            PieceKind::Bishop => {
                sliding_pieces::gen_sliding_moves(*self, position, &sliding_pieces::BISHOP_OFFSETS)
            }
            PieceKind::Rook => {
                sliding_pieces::gen_sliding_moves(*self, position, &sliding_pieces::ROOK_OFFSETS)
            }
            PieceKind::Queen => {
                sliding_pieces::gen_sliding_moves(*self, position, &sliding_pieces::QUEEN_OFFSETS)
            }
        }
    }
}

pub(crate) fn gen_pseudo_legal_moves(position: &Position, color: Color) -> Vec<Move> {
    position
        .active_pieces(color)
        .flat_map(|piece| piece.pseudo_legal_moves(position))
        .collect()
}

/// One-square steps that would leave the a or h file through the side of the board.
fn is_single_step_exclusion(square: Square, offset: i8) -> bool {
    let idx = square.index();
    (FIRST_COLUMN[idx] && matches!(offset, -9 | -1 | 7))
        || (EIGHTH_COLUMN[idx] && matches!(offset, -7 | 1 | 9))
}

/// Quiet move onto an empty square, capture of an enemy piece, nothing on a friendly one.
fn major_move_to(piece: Piece, position: &Position, dest: Square) -> Option<Move> {
    match position.piece_at(dest) {
        None => Some(Move::Major { piece, dest }),
        Some(other) if other.color() != piece.color() => Some(Move::Attack {
            piece,
            dest,
            captured: other,
        }),
        Some(_) => None,
    }
}
