mod castling;
mod transition;

use log::{debug, warn};

use crate::moves::{Move, MoveError};
use crate::piece::{Color, Piece};
use crate::position::Position;
use crate::square::Square;

pub use transition::{MoveStatus, MoveTransition};

/// One color's view of a position: its legal moves, its king, and whether that king is attacked.
///
/// Derived fresh from the position it borrows. "Legal" here means pseudo-legal plus castles;
/// king safety is only settled per move by [`Player::try_move`].
#[derive(Clone, Debug)]
pub struct Player<'a> {
    position: &'a Position,
    color: Color,
    king: Piece,
    legal_moves: Vec<Move>,
    in_check: bool,
}

impl<'a> Player<'a> {
    pub fn new(position: &'a Position, color: Color) -> Self {
        let king = position.king(color);
        let opponent_moves = position.pseudo_legal_moves(color.opposite());
        let in_check = !calculate_attacks_on_square(king.square(), opponent_moves).is_empty();

        let mut legal_moves = position.pseudo_legal_moves(color).to_vec();
        legal_moves.extend(castling::gen_castle_moves(
            position,
            king,
            in_check,
            opponent_moves,
        ));

        Self {
            position,
            color,
            king,
            legal_moves,
            in_check,
        }
    }

    pub fn position(&self) -> &'a Position {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn king(&self) -> Piece {
        self.king
    }

    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    pub fn opponent(&self) -> Player<'a> {
        Player::new(self.position, self.color.opposite())
    }

    pub fn is_move_legal(&self, mve: &Move) -> bool {
        self.legal_moves.contains(mve)
    }

    pub fn is_in_check(&self) -> bool {
        self.in_check
    }

    pub fn is_in_checkmate(&self) -> bool {
        self.in_check && !self.has_escape_moves()
    }

    pub fn is_in_stalemate(&self) -> bool {
        !self.in_check && !self.has_escape_moves()
    }

    /// Attempts `mve`. Rejections are reported through the status, with the current position
    /// handed back unchanged.
    ///
    /// Errors only when the move can't be applied at all: a null move, a move taken from
    /// another position, or a successor that isn't a valid position.
    pub fn try_move(&self, mve: &Move) -> Result<MoveTransition, MoveError> {
        let (status, candidate) = self.validate(mve)?;
        let position = candidate.unwrap_or_else(|| self.position.clone());
        Ok(MoveTransition::new(position, *mve, status))
    }

    /// Every legal move that passes [`Player::try_move`], with its successor position.
    pub fn valid_transitions(&self) -> Vec<MoveTransition> {
        self.legal_moves
            .iter()
            .filter_map(|mve| match self.validate(mve) {
                Ok((MoveStatus::Done, Some(candidate))) => {
                    Some(MoveTransition::new(candidate, *mve, MoveStatus::Done))
                }
                Ok(_) => None,
                Err(err) => {
                    warn!("skipping {}: {}", mve, err);
                    None
                }
            })
            .collect()
    }

    fn has_escape_moves(&self) -> bool {
        self.legal_moves
            .iter()
            .any(|mve| match self.validate(mve) {
                Ok((status, _)) => status.is_done(),
                Err(err) => {
                    warn!("{} can't be tried on\n{}\n{}", mve, self.position, err);
                    false
                }
            })
    }

    fn validate(&self, mve: &Move) -> Result<(MoveStatus, Option<Position>), MoveError> {
        if !self.is_move_legal(mve) {
            debug!("{} rejected: not a legal move for {}", mve, self.color);
            return Ok((MoveStatus::IllegalMove, None));
        }

        let candidate = mve.execute(self.position)?;
        let king_square = candidate.king(self.color).square();
        let opponent_moves = candidate.pseudo_legal_moves(self.color.opposite());

        if !calculate_attacks_on_square(king_square, opponent_moves).is_empty() {
            debug!(
                "{} rejected: leaves the {} king on {} attacked",
                mve, self.color, king_square
            );
            return Ok((MoveStatus::LeavesPlayerInCheck, None));
        }

        Ok((MoveStatus::Done, Some(candidate)))
    }
}

/// The moves in `moves` that land on `square`.
pub fn calculate_attacks_on_square(square: Square, moves: &[Move]) -> Vec<Move> {
    moves
        .iter()
        .filter(|mve| mve.dest() == Some(square))
        .copied()
        .collect()
}
