use std::fmt;
use std::hash::{Hash, Hasher};

use crate::piece::Piece;
use crate::position::{Builder, Position, PositionError};
use crate::square::Square;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MoveError {
    #[error("the null move can't be executed")]
    NullMove,

    #[error("move {0} doesn't match the position it was applied to")]
    StaleMove(String),

    #[error(transparent)]
    Position(#[from] PositionError),
}

/// A single move, holding the pre-move value of every piece it touches.
///
/// Moves carry no reference to the position that produced them. Two moves compare equal when
/// they move the same piece value to the same square, whatever their variant.
#[derive(Clone, Copy, Debug)]
pub enum Move {
    Major {
        piece: Piece,
        dest: Square,
    },
    Attack {
        piece: Piece,
        dest: Square,
        captured: Piece,
    },
    PawnMove {
        piece: Piece,
        dest: Square,
    },
    PawnJump {
        piece: Piece,
        dest: Square,
    },
    PawnAttack {
        piece: Piece,
        dest: Square,
        captured: Piece,
    },
    /// The captured pawn stands beside the mover, not on `dest`.
    PawnEnPassantAttack {
        piece: Piece,
        dest: Square,
        captured: Piece,
    },
    KingSideCastle {
        piece: Piece,
        dest: Square,
        rook: Piece,
        rook_dest: Square,
    },
    QueenSideCastle {
        piece: Piece,
        dest: Square,
        rook: Piece,
        rook_dest: Square,
    },
    Null,
}

impl Move {
    pub fn moved_piece(&self) -> Option<Piece> {
        match *self {
            Move::Major { piece, .. }
            | Move::Attack { piece, .. }
            | Move::PawnMove { piece, .. }
            | Move::PawnJump { piece, .. }
            | Move::PawnAttack { piece, .. }
            | Move::PawnEnPassantAttack { piece, .. }
            | Move::KingSideCastle { piece, .. }
            | Move::QueenSideCastle { piece, .. } => Some(piece),
            Move::Null => None,
        }
    }

    pub fn src(&self) -> Option<Square> {
        self.moved_piece().map(|piece| piece.square())
    }

    pub fn dest(&self) -> Option<Square> {
        match *self {
            Move::Major { dest, .. }
            | Move::Attack { dest, .. }
            | Move::PawnMove { dest, .. }
            | Move::PawnJump { dest, .. }
            | Move::PawnAttack { dest, .. }
            | Move::PawnEnPassantAttack { dest, .. }
            | Move::KingSideCastle { dest, .. }
            | Move::QueenSideCastle { dest, .. } => Some(dest),
            Move::Null => None,
        }
    }

    pub fn captured_piece(&self) -> Option<Piece> {
        match *self {
            Move::Attack { captured, .. }
            | Move::PawnAttack { captured, .. }
            | Move::PawnEnPassantAttack { captured, .. } => Some(captured),
            _ => None,
        }
    }

    /// The rook and its destination, for castles.
    pub fn castle_rook(&self) -> Option<(Piece, Square)> {
        match *self {
            Move::KingSideCastle {
                rook, rook_dest, ..
            }
            | Move::QueenSideCastle {
                rook, rook_dest, ..
            } => Some((rook, rook_dest)),
            _ => None,
        }
    }

    pub fn is_attack(&self) -> bool {
        self.captured_piece().is_some()
    }

    pub fn is_castle(&self) -> bool {
        self.castle_rook().is_some()
    }

    pub fn is_en_passant(&self) -> bool {
        matches!(self, Move::PawnEnPassantAttack { .. })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Move::Null)
    }

    /// Applies the move to `position`, producing the successor position.
    ///
    /// Every piece not moved or captured is carried over, the side to move flips, and the
    /// en passant pawn is only set after a pawn jump.
    pub fn execute(&self, position: &Position) -> Result<Position, MoveError> {
        let piece = self.moved_piece().ok_or(MoveError::NullMove)?;
        let dest = self.dest().ok_or(MoveError::NullMove)?;
        self.check_applies_to(position, piece)?;

        let mover = piece.color();
        let rook = self.castle_rook();
        let captured = self.captured_piece();

        let mut builder = Builder::new();

        for own in position.active_pieces(mover) {
            let is_castle_rook = rook.is_some_and(|(rook, _)| rook == own);
            if own != piece && !is_castle_rook {
                builder.set_piece(own);
            }
        }
        for other in position.active_pieces(mover.opposite()) {
            if Some(other) != captured {
                builder.set_piece(other);
            }
        }

        builder.set_piece(piece.moved_to(dest));
        if let Some((rook, rook_dest)) = rook {
            builder.set_piece(rook.moved_to(rook_dest));
        }

        builder.set_move_maker(mover.opposite());
        if let Move::PawnJump { .. } = self {
            builder.set_en_passant_pawn(piece.moved_to(dest));
        }

        Ok(builder.build()?)
    }

    fn check_applies_to(&self, position: &Position, piece: Piece) -> Result<(), MoveError> {
        let present = |p: Piece| position.piece_at(p.square()) == Some(p);

        let captured_present = self.captured_piece().map_or(true, present);
        let rook_present = self.castle_rook().map_or(true, |(rook, _)| present(rook));

        if present(piece) && captured_present && rook_present {
            Ok(())
        } else {
            Err(MoveError::StaleMove(self.to_string()))
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.dest() == other.dest() && self.moved_piece() == other.moved_piece()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.moved_piece().hash(state);
        self.dest().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.src(), self.dest()) {
            (Some(src), Some(dest)) => write!(f, "{}{}", src, dest),
            _ => write!(f, "0000"),
        }
    }
}

/// Finds the current player's legal move going from `src` to `dest`, or [`Move::Null`].
pub fn resolve_move(position: &Position, src: Square, dest: Square) -> Move {
    position
        .current_player()
        .legal_moves()
        .iter()
        .find(|mve| mve.src() == Some(src) && mve.dest() == Some(dest))
        .copied()
        .unwrap_or(Move::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Color, PieceKind};
    use crate::square::Square::*;
    use test_case::test_case;
    use testresult::TestResult;

    fn play(position: &Position, moves: &[(Square, Square)]) -> Result<Position, MoveError> {
        let mut position = position.clone();
        for &(src, dest) in moves {
            position = resolve_move(&position, src, dest).execute(&position)?;
        }
        Ok(position)
    }

    #[test]
    fn test_null_move_fails() {
        let pos = Position::start();
        assert_eq!(Move::Null.execute(&pos), Err(MoveError::NullMove));
    }

    #[test]
    fn test_resolve_move_no_match_is_null() {
        let pos = Position::start();
        let got = resolve_move(&pos, E2, E5);
        assert!(got.is_null());
        assert_eq!(got.execute(&pos), Err(MoveError::NullMove));
    }

    #[test]
    fn test_resolve_move_ignores_opponent() {
        let pos = Position::start();
        assert!(resolve_move(&pos, E7, E5).is_null());
    }

    #[test]
    fn test_pawn_jump_sets_en_passant_pawn() -> TestResult {
        let pos = Position::start();
        let mve = resolve_move(&pos, E2, E4);
        assert!(matches!(mve, Move::PawnJump { .. }));

        let next = mve.execute(&pos)?;
        let pawn = Piece::new(PieceKind::Pawn, Color::White, E4).with_has_moved(true);
        assert_eq!(next.en_passant_pawn(), Some(pawn));
        assert_eq!(next.piece_at(E4), Some(pawn));
        assert_eq!(next.piece_at(E2), None);
        assert_eq!(next.to_move(), Color::Black);

        let after = play(&next, &[(G8, F6)])?;
        assert_eq!(after.en_passant_pawn(), None);
        Ok(())
    }

    #[test]
    fn test_single_push_has_no_en_passant_pawn() -> TestResult {
        let next = play(&Position::start(), &[(E2, E3)])?;
        assert_eq!(next.en_passant_pawn(), None);
        Ok(())
    }

    #[test]
    fn test_capture_drops_piece_count() -> TestResult {
        let pos = play(&Position::start(), &[(E2, E4), (D7, D5)])?;
        let mve = resolve_move(&pos, E4, D5);
        assert!(matches!(mve, Move::PawnAttack { .. }));

        let next = mve.execute(&pos)?;
        assert_eq!(next.piece_count(), 31);
        assert_eq!(next.tiles().len(), 64);
        assert_eq!(next.piece_at(D5).map(|p| p.color()), Some(Color::White));
        Ok(())
    }

    #[test]
    fn test_en_passant_removes_passed_pawn() -> TestResult {
        let pos = play(
            &Position::start(),
            &[(E2, E4), (A7, A6), (E4, E5), (D7, D5)],
        )?;
        let mve = resolve_move(&pos, E5, D6);
        assert!(mve.is_en_passant());

        let next = mve.execute(&pos)?;
        assert_eq!(next.piece_at(D5), None);
        assert_eq!(next.piece_at(D6).map(|p| p.kind()), Some(PieceKind::Pawn));
        assert_eq!(next.piece_count(), 31);
        Ok(())
    }

    #[test]
    fn test_castle_relocates_king_and_rook() -> TestResult {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")?;
        let mve = resolve_move(&pos, E1, G1);
        assert!(matches!(mve, Move::KingSideCastle { .. }));

        let next = mve.execute(&pos)?;
        assert_eq!(next.piece_at(E1), None);
        assert_eq!(next.piece_at(H1), None);
        assert!(next.piece_at(G1).is_some_and(|p| p.is_king() && p.has_moved()));
        assert!(next.piece_at(F1).is_some_and(|p| p.is_rook() && p.has_moved()));
        assert!(next.piece_at(A1).is_some_and(|p| p.is_first_move()));
        assert_eq!(next.piece_count(), pos.piece_count());
        Ok(())
    }

    #[test]
    fn test_moving_one_piece_leaves_others_unmoved() -> TestResult {
        let next = play(&Position::start(), &[(G1, F3)])?;
        assert!(next.piece_at(F3).is_some_and(|p| p.has_moved()));
        assert!(next
            .active_pieces(Color::White)
            .filter(|p| p.square() != F3)
            .all(|p| p.is_first_move()));
        Ok(())
    }

    #[test]
    fn test_stale_move_fails() -> TestResult {
        let start = Position::start();
        let mve = resolve_move(&start, E2, E4);
        let other = play(&start, &[(E2, E3), (E7, E6)])?;

        assert_eq!(
            mve.execute(&other),
            Err(MoveError::StaleMove("e2e4".to_string()))
        );
        Ok(())
    }

    #[test_case(&[(E2, E4)] ; "pawn jump")]
    #[test_case(&[(E2, E3)] ; "pawn move")]
    #[test_case(&[(B1, C3)] ; "major")]
    fn test_every_move_flips_side(moves: &[(Square, Square)]) -> TestResult {
        let next = play(&Position::start(), moves)?;
        assert_eq!(next.to_move(), Color::Black);
        Ok(())
    }

    #[test]
    fn test_equality_is_piece_and_dest() {
        let pawn = Piece::new(PieceKind::Pawn, Color::White, E2);
        let quiet = Move::PawnMove {
            piece: pawn,
            dest: E3,
        };
        let jump = Move::PawnJump {
            piece: pawn,
            dest: E3,
        };
        let other = Move::PawnMove {
            piece: pawn,
            dest: E4,
        };

        assert_eq!(quiet, jump);
        assert_ne!(quiet, other);
        assert_ne!(quiet, Move::Null);
        assert_eq!(Move::Null, Move::Null);
    }

    #[test]
    fn test_display() {
        let knight = Piece::new(PieceKind::Knight, Color::White, G1);
        let mve = Move::Major {
            piece: knight,
            dest: F3,
        };
        assert_eq!(mve.to_string(), "g1f3");
        assert_eq!(Move::Null.to_string(), "0000");
    }
}
