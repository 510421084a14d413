use std::fmt;

use log::trace;
use strum::IntoEnumIterator;

use crate::geometry::{NUM_SQUARES, NUM_SQUARES_PER_ROW};
use crate::move_gen::gen_pseudo_legal_moves;
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceKind};
use crate::player::Player;
use crate::square::Square;
use crate::square::Square::*;

mod fen;
mod tile;

pub use fen::FenParseError;
pub use tile::Tile;

use tile::EMPTY_TILES;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PositionError {
    #[error("want exactly one {color} king, got {count}")]
    KingCount { color: Color, count: usize },

    #[error("en passant pawn at {0} doesn't match the board")]
    EnPassantPawn(Square),
}

/// An immutable board snapshot.
///
/// Holds the 64 tiles, the color to move, the pawn (if any) that just made a two square advance,
/// and the pseudo-legal moves of both colors, which are computed once when the position is built.
#[derive(Clone)]
pub struct Position {
    tiles: [Tile; NUM_SQUARES],
    to_move: Color,
    en_passant_pawn: Option<Piece>,
    white_king: Piece,
    black_king: Piece,
    white_moves: Vec<Move>,
    black_moves: Vec<Move>,
}

pub fn standard_start_position() -> Position {
    Position::start()
}

impl Position {
    #[rustfmt::skip]
    pub fn start() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop, PieceKind::Queen,
            PieceKind::King, PieceKind::Bishop, PieceKind::Knight, PieceKind::Rook,
        ];
        let black_back = [A8, B8, C8, D8, E8, F8, G8, H8];
        let black_pawns = [A7, B7, C7, D7, E7, F7, G7, H7];
        let white_pawns = [A2, B2, C2, D2, E2, F2, G2, H2];
        let white_back = [A1, B1, C1, D1, E1, F1, G1, H1];

        let mut builder = Builder::new();
        for (kind, (black_sq, white_sq)) in BACK_RANK.iter().zip(black_back.into_iter().zip(white_back)) {
            builder.set_piece(Piece::new(*kind, Color::Black, black_sq));
            builder.set_piece(Piece::new(*kind, Color::White, white_sq));
        }
        for (black_sq, white_sq) in black_pawns.into_iter().zip(white_pawns) {
            builder.set_piece(Piece::new(PieceKind::Pawn, Color::Black, black_sq));
            builder.set_piece(Piece::new(PieceKind::Pawn, Color::White, white_sq));
        }
        builder.set_move_maker(Color::White);

        builder.assemble(
            Piece::new(PieceKind::King, Color::White, E1),
            Piece::new(PieceKind::King, Color::Black, E8),
        )
    }

    pub fn tile(&self, square: Square) -> &Tile {
        &self.tiles[square.index()]
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.tile(square).piece().copied()
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn en_passant_pawn(&self) -> Option<Piece> {
        self.en_passant_pawn
    }

    pub fn king(&self, color: Color) -> Piece {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// Pieces of one color, in square order. A view over the tiles, not separate storage.
    pub fn active_pieces(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.tiles
            .iter()
            .filter_map(|tile| tile.piece())
            .filter(move |piece| piece.color() == color)
            .copied()
    }

    pub fn piece_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_occupied()).count()
    }

    /// Moves that obey piece geometry, blocking and capture rules, but may leave the mover's own
    /// king attacked. Castling is not included.
    pub fn pseudo_legal_moves(&self, color: Color) -> &[Move] {
        match color {
            Color::White => &self.white_moves,
            Color::Black => &self.black_moves,
        }
    }

    pub fn player(&self, color: Color) -> Player<'_> {
        Player::new(self, color)
    }

    pub fn white_player(&self) -> Player<'_> {
        self.player(Color::White)
    }

    pub fn black_player(&self) -> Player<'_> {
        self.player(Color::Black)
    }

    pub fn current_player(&self) -> Player<'_> {
        self.player(self.to_move)
    }

    /// The public legal move set of `color`: pseudo-legal moves plus available castles.
    pub fn legal_moves_for(&self, color: Color) -> Vec<Move> {
        self.player(color).legal_moves().to_vec()
    }
}

// Cached moves are derived from the tiles, so they're left out of the comparison
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
            && self.to_move == other.to_move
            && self.en_passant_pawn == other.en_passant_pawn
    }
}

impl Eq for Position {}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board_str = String::with_capacity(NUM_SQUARES + 7);
        for (idx, tile) in self.tiles.iter().enumerate() {
            board_str.push_str(&tile.to_string());
            if (idx + 1) % NUM_SQUARES_PER_ROW == 0 && idx != NUM_SQUARES - 1 {
                board_str.push('\n');
            }
        }
        write!(f, "{}", board_str)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Collects pieces for a new [`Position`].
///
/// Setting a piece on an already occupied square replaces whatever was there.
#[derive(Clone, Debug)]
pub struct Builder {
    board_config: [Option<Piece>; NUM_SQUARES],
    move_maker: Color,
    en_passant_pawn: Option<Piece>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            board_config: [None; NUM_SQUARES],
            move_maker: Color::White,
            en_passant_pawn: None,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_piece(&mut self, piece: Piece) -> &mut Self {
        self.board_config[piece.square().index()] = Some(piece);
        self
    }

    pub fn set_move_maker(&mut self, move_maker: Color) -> &mut Self {
        self.move_maker = move_maker;
        self
    }

    pub fn set_en_passant_pawn(&mut self, pawn: Piece) -> &mut Self {
        self.en_passant_pawn = Some(pawn);
        self
    }

    pub fn build(&self) -> Result<Position, PositionError> {
        let white_king = self.find_king(Color::White)?;
        let black_king = self.find_king(Color::Black)?;

        if let Some(pawn) = self.en_passant_pawn {
            let on_board = self.board_config[pawn.square().index()] == Some(pawn);
            if !on_board
                || pawn.kind() != PieceKind::Pawn
                || pawn.color() != self.move_maker.opposite()
            {
                return Err(PositionError::EnPassantPawn(pawn.square()));
            }
        }

        Ok(self.assemble(white_king, black_king))
    }

    fn find_king(&self, color: Color) -> Result<Piece, PositionError> {
        let mut kings = self
            .board_config
            .iter()
            .flatten()
            .filter(|piece| piece.is_king() && piece.color() == color);

        match (kings.next(), kings.count()) {
            (Some(king), 0) => Ok(*king),
            (None, _) => Err(PositionError::KingCount { color, count: 0 }),
            (Some(_), extra) => Err(PositionError::KingCount {
                color,
                count: extra + 1,
            }),
        }
    }

    fn assemble(&self, white_king: Piece, black_king: Piece) -> Position {
        let mut tiles = EMPTY_TILES;
        for sq in Square::iter() {
            tiles[sq.index()] = Tile::new(sq, self.board_config[sq.index()]);
        }

        let mut position = Position {
            tiles,
            to_move: self.move_maker,
            en_passant_pawn: self.en_passant_pawn,
            white_king,
            black_king,
            white_moves: Vec::new(),
            black_moves: Vec::new(),
        };
        position.white_moves = gen_pseudo_legal_moves(&position, Color::White);
        position.black_moves = gen_pseudo_legal_moves(&position, Color::Black);

        trace!(
            "built position: {} to move, {} white / {} black pseudo-legal moves",
            position.to_move,
            position.white_moves.len(),
            position.black_moves.len()
        );

        position
    }
}
