use std::fmt;

use crate::geometry::NUM_SQUARES;
use crate::piece::Piece;
use crate::square::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty(Square),
    Occupied { square: Square, piece: Piece },
}

pub(crate) const EMPTY_TILES: [Tile; NUM_SQUARES] = init_empty_tiles();

const fn init_empty_tiles() -> [Tile; NUM_SQUARES] {
    let mut tiles = [Tile::Empty(Square::A8); NUM_SQUARES];
    let mut idx = 0;
    while idx < NUM_SQUARES {
        tiles[idx] = match Square::from_repr(idx as u8) {
            Some(sq) => Tile::Empty(sq),
            None => panic!("square out of bounds"),
        };
        idx += 1;
    }
    tiles
}

impl Tile {
    /// The only way positions create tiles: empty squares come from the shared table.
    pub fn new(square: Square, piece: Option<Piece>) -> Tile {
        match piece {
            Some(piece) => Tile::Occupied { square, piece },
            None => EMPTY_TILES[square.index()],
        }
    }

    pub const fn square(&self) -> Square {
        match self {
            Tile::Empty(square) | Tile::Occupied { square, .. } => *square,
        }
    }

    pub const fn piece(&self) -> Option<&Piece> {
        match self {
            Tile::Empty(_) => None,
            Tile::Occupied { piece, .. } => Some(piece),
        }
    }

    pub const fn is_occupied(&self) -> bool {
        matches!(self, Tile::Occupied { .. })
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.piece() {
            Some(piece) => write!(f, "{}", piece),
            None => write!(f, "."),
        }
    }
}
