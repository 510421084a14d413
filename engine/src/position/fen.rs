use std::str::FromStr;

use crate::geometry::NUM_SQUARES;
use crate::piece::{Color, Piece, PieceKind};
use crate::position::{Builder, Position, PositionError};
use crate::square::Square;
use crate::square::Square::*;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FenParseError {
    #[error("num fields: want 6 got {0}")]
    NumFields(usize),

    #[error("piece placement: got {0}, err at {1}")]
    PiecePlacement(String, usize),

    #[error("side to move: want 'w'|'b' got {0}")]
    SideToMove(String),

    #[error("castling rights given: got {0}, err at idx {1}")]
    CastlingRights(String, usize),

    #[error("en passant target: got {0}")]
    EnPassantTarget(String),

    #[error("halfmove clock: got {0}")]
    HalfmoveClock(String),

    #[error("full move counter: got {0}")]
    FullMoveCounter(String),

    #[error("invalid position: {0}")]
    InvalidPosition(#[from] PositionError),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
struct CastlingRights {
    white_king_side: bool,
    white_queen_side: bool,
    black_king_side: bool,
    black_queen_side: bool,
}

impl CastlingRights {
    fn new(
        white_king_side: bool,
        white_queen_side: bool,
        black_king_side: bool,
        black_queen_side: bool,
    ) -> Self {
        Self {
            white_king_side,
            white_queen_side,
            black_king_side,
            black_queen_side,
        }
    }

    fn any(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_side || self.white_queen_side,
            Color::Black => self.black_king_side || self.black_queen_side,
        }
    }
}

impl Position {
    /// Parses a FEN string. The halfmove clock and fullmove counter are validated but not kept.
    ///
    /// Castling rights become the has-moved flags of the king and rooks on their home squares,
    /// and pawns standing on their starting row count as unmoved.
    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let fields = fen.split_whitespace().collect::<Vec<&str>>();

        if fields.len() != 6 {
            Err(FenParseError::NumFields(fields.len()))?
        }

        let placements = pieces_from_fen(fields[0])?;

        let to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => Err(FenParseError::SideToMove(String::from(fields[1])))?,
        };

        let castling_rights = castling_rights_from_fen(fields[2])?;
        let en_passant_target = en_passant_target_from_fen(fields[3])?;

        fields[4]
            .parse::<u16>()
            .map_err(|_| FenParseError::HalfmoveClock(fields[4].to_string()))?;
        fields[5]
            .parse::<u16>()
            .map_err(|_| FenParseError::FullMoveCounter(fields[5].to_string()))?;

        let mut builder = Builder::new();
        for &(kind, color, square) in &placements {
            let unmoved = match kind {
                PieceKind::Pawn => color.pawn_start_row()[square.index()],
                PieceKind::King => square == king_home(color) && castling_rights.any(color),
                PieceKind::Rook => rook_has_right(castling_rights, color, square),
                PieceKind::Knight | PieceKind::Bishop | PieceKind::Queen => true,
            };
            builder.set_piece(Piece::new(kind, color, square).with_has_moved(!unmoved));
        }
        builder.set_move_maker(to_move);

        if let Some(target) = en_passant_target {
            let pawn_color = to_move.opposite();
            let pawn = en_passant_pawn_square(target, pawn_color)
                .and_then(|sq| {
                    placements.iter().find(|&&(kind, color, p_sq)| {
                        p_sq == sq && kind == PieceKind::Pawn && color == pawn_color
                    })
                })
                .map(|&(kind, color, square)| {
                    Piece::new(kind, color, square)
                        .with_has_moved(!color.pawn_start_row()[square.index()])
                })
                .ok_or_else(|| FenParseError::EnPassantTarget(fields[3].to_string()))?;
            builder.set_en_passant_pawn(pawn);
        }

        Ok(builder.build()?)
    }

    pub fn to_fen(&self) -> String {
        let mut pieces = String::with_capacity(NUM_SQUARES);
        let mut curr_empty_count = 0;

        for (idx, tile) in self.tiles().iter().enumerate() {
            if let Some(piece) = tile.piece() {
                if curr_empty_count != 0 {
                    pieces += &curr_empty_count.to_string();
                    curr_empty_count = 0;
                }
                pieces.push(piece.to_char());
            } else {
                curr_empty_count += 1;
            }
            if (idx + 1) % 8 == 0 {
                if curr_empty_count != 0 {
                    pieces += &curr_empty_count.to_string();
                    curr_empty_count = 0;
                }
                if idx != NUM_SQUARES - 1 {
                    pieces += "/";
                }
            }
        }

        let side_to_move_char = if self.to_move().is_white() { 'w' } else { 'b' };

        let mut castling_rights = String::with_capacity(4);
        for (ch, color, rook_square) in [
            ('K', Color::White, H1),
            ('Q', Color::White, A1),
            ('k', Color::Black, H8),
            ('q', Color::Black, A8),
        ] {
            if self.has_castling_right(color, rook_square) {
                castling_rights.push(ch);
            }
        }
        if castling_rights.is_empty() {
            castling_rights += "-";
        }

        let en_passant = self
            .en_passant_pawn()
            .and_then(|pawn| pawn.square().offset(8 * pawn.color().facing_direction()))
            .map_or_else(|| "-".to_string(), |target| target.to_string());

        format!(
            "{} {} {} {} 0 1",
            pieces, side_to_move_char, castling_rights, en_passant
        )
    }

    fn has_castling_right(&self, color: Color, rook_square: Square) -> bool {
        let king = self.king(color);
        let king_ready = king.square() == king_home(color) && king.is_first_move();
        let rook_ready = self.piece_at(rook_square).is_some_and(|rook| {
            rook.is_rook() && rook.color() == color && rook.is_first_move()
        });
        king_ready && rook_ready
    }
}

fn king_home(color: Color) -> Square {
    match color {
        Color::White => E1,
        Color::Black => E8,
    }
}

fn rook_has_right(rights: CastlingRights, color: Color, square: Square) -> bool {
    match (color, square) {
        (Color::White, H1) => rights.white_king_side,
        (Color::White, A1) => rights.white_queen_side,
        (Color::Black, H8) => rights.black_king_side,
        (Color::Black, A8) => rights.black_queen_side,
        _ => false,
    }
}

/// The pawn that just jumped sits one row past the target square, in its own forward direction.
fn en_passant_pawn_square(target: Square, pawn_color: Color) -> Option<Square> {
    target.offset(8 * pawn_color.direction())
}

fn castling_rights_from_fen(castling_rights_str: &str) -> Result<CastlingRights, FenParseError> {
    if castling_rights_str.is_empty() || castling_rights_str == "-" {
        return Ok(CastlingRights::default());
    }

    let mut rights = CastlingRights::default();

    for (idx, ch) in castling_rights_str.chars().enumerate() {
        let right = match ch {
            'K' => &mut rights.white_king_side,
            'Q' => &mut rights.white_queen_side,
            'k' => &mut rights.black_king_side,
            'q' => &mut rights.black_queen_side,
            _ => {
                return Err(FenParseError::CastlingRights(
                    castling_rights_str.to_string(),
                    idx,
                ))
            }
        };
        if *right {
            return Err(FenParseError::CastlingRights(
                castling_rights_str.to_string(),
                idx,
            ));
        }
        *right = true;
    }

    Ok(rights)
}

fn en_passant_target_from_fen(
    en_passant_target_str: &str,
) -> Result<Option<Square>, FenParseError> {
    if en_passant_target_str == "-" {
        return Ok(None);
    }

    Square::from_str(en_passant_target_str)
        .map_err(|_| FenParseError::EnPassantTarget(en_passant_target_str.to_string()))
        .map(Some)
}

/// FEN lists squares from a8 to h1, which is the square index order.
fn pieces_from_fen(pieces_str: &str) -> Result<Vec<(PieceKind, Color, Square)>, FenParseError> {
    let mut placements = Vec::with_capacity(32);
    let mut sq_idx = 0;
    let placement_err = |ch_idx| FenParseError::PiecePlacement(pieces_str.to_string(), ch_idx);

    for (ch_idx, ch) in pieces_str.chars().enumerate() {
        if let Ok(kind) = PieceKind::try_from(ch.to_ascii_lowercase()) {
            let square = Square::from_index(sq_idx).ok_or_else(|| placement_err(ch_idx))?;
            let color = if ch.is_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            placements.push((kind, color, square));
            sq_idx += 1;
        } else if let Some(digit) = ch.to_digit(10) {
            sq_idx += digit as usize;
        } else if ch == '/' {
            if sq_idx % 8 != 0 {
                Err(placement_err(ch_idx))?
            }
        } else {
            Err(placement_err(ch_idx))?
        }
    }

    if sq_idx != NUM_SQUARES {
        Err(placement_err(pieces_str.len()))?
    }

    Ok(placements)
}
