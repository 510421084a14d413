use std::fmt;

use strum_macros::{Display, EnumIter};

use crate::geometry::{NUM_SQUARES, SECOND_ROW, SEVENTH_ROW};
use crate::square::Square;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PieceError {
    #[error("char -> piece: got {0}")]
    FromCharPiece(char),
}

#[derive(Debug, PartialEq, Eq, EnumIter, Clone, Copy, Display, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Sign applied to forward offsets. White advances towards index 0.
    pub const fn direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Sign pointing back towards this color's own side of the board.
    pub const fn facing_direction(self) -> i8 {
        -self.direction()
    }

    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }

    pub(crate) fn pawn_start_row(self) -> &'static [bool; NUM_SQUARES] {
        match self {
            Color::White => &SEVENTH_ROW,
            Color::Black => &SECOND_ROW,
        }
    }
}

#[derive(Debug, PartialEq, Eq, EnumIter, Clone, Copy, Display, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl From<PieceKind> for char {
    fn from(kind: PieceKind) -> char {
        match kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl TryFrom<char> for PieceKind {
    type Error = PieceError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'p' => Ok(PieceKind::Pawn),
            'n' => Ok(PieceKind::Knight),
            'b' => Ok(PieceKind::Bishop),
            'r' => Ok(PieceKind::Rook),
            'q' => Ok(PieceKind::Queen),
            'k' => Ok(PieceKind::King),
            _ => Err(PieceError::FromCharPiece(value)),
        }
    }
}

/// A piece standing on a particular square.
///
/// Pieces are plain values: moving one produces a new `Piece` at the destination with
/// `has_moved` set, while the value held by the previous position is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    square: Square,
    has_moved: bool,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
            has_moved: false,
        }
    }

    pub const fn with_has_moved(mut self, has_moved: bool) -> Self {
        self.has_moved = has_moved;
        self
    }

    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub const fn square(&self) -> Square {
        self.square
    }

    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub const fn is_first_move(&self) -> bool {
        !self.has_moved
    }

    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    /// The post-move value of this piece.
    pub fn moved_to(self, dest: Square) -> Piece {
        Piece {
            square: dest,
            has_moved: true,
            ..self
        }
    }

    /// Board character: uppercase for white, lowercase for black.
    pub fn to_char(&self) -> char {
        let ch: char = self.kind.into();
        if self.color.is_white() {
            ch.to_ascii_uppercase()
        } else {
            ch
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
