//! Precomputed column and row lookups over the 64 square indices.
//!
//! Offset based move generation adds a signed delta to a square index, which happily wraps from
//! the h-file of one row onto the a-file of the next. These tables are what every piece consults
//! before taking a step so that only true board geometry survives.

pub const NUM_SQUARES: usize = 64;
pub const NUM_SQUARES_PER_ROW: usize = 8;

pub const FIRST_COLUMN: [bool; NUM_SQUARES] = init_column(0);
pub const SECOND_COLUMN: [bool; NUM_SQUARES] = init_column(1);
pub const SEVENTH_COLUMN: [bool; NUM_SQUARES] = init_column(6);
pub const EIGHTH_COLUMN: [bool; NUM_SQUARES] = init_column(7);

/// Row 0 is black's back rank, row 7 is white's.
pub const ROWS: [[bool; NUM_SQUARES]; NUM_SQUARES_PER_ROW] = [
    init_row(0),
    init_row(1),
    init_row(2),
    init_row(3),
    init_row(4),
    init_row(5),
    init_row(6),
    init_row(7),
];

pub const FIRST_ROW: [bool; NUM_SQUARES] = ROWS[0];
pub const SECOND_ROW: [bool; NUM_SQUARES] = ROWS[1];
pub const SEVENTH_ROW: [bool; NUM_SQUARES] = ROWS[6];
pub const EIGHTH_ROW: [bool; NUM_SQUARES] = ROWS[7];

const fn init_column(column: usize) -> [bool; NUM_SQUARES] {
    let mut mask = [false; NUM_SQUARES];
    let mut idx = column;
    while idx < NUM_SQUARES {
        mask[idx] = true;
        idx += NUM_SQUARES_PER_ROW;
    }
    mask
}

const fn init_row(row: usize) -> [bool; NUM_SQUARES] {
    let mut mask = [false; NUM_SQUARES];
    let mut idx = row * NUM_SQUARES_PER_ROW;
    while idx < (row + 1) * NUM_SQUARES_PER_ROW {
        mask[idx] = true;
        idx += 1;
    }
    mask
}

pub const fn is_valid_square_index(idx: i16) -> bool {
    idx >= 0 && idx < NUM_SQUARES as i16
}
