pub mod geometry;
pub mod move_gen;
pub mod moves;
pub mod perft;
pub mod piece;
pub mod player;
pub mod position;
pub mod square;

pub use geometry::{NUM_SQUARES, NUM_SQUARES_PER_ROW};
pub use moves::{resolve_move, Move, MoveError};
pub use perft::{perft, perft_full, PerftDepthResult, PerftResult};
pub use piece::{Color, Piece, PieceError, PieceKind};
pub use player::{MoveStatus, MoveTransition, Player};
pub use position::{standard_start_position, Builder, FenParseError, Position, PositionError, Tile};
pub use square::Square;
