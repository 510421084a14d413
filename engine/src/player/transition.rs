use std::fmt;

use crate::moves::Move;
use crate::position::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveStatus {
    Done,
    IllegalMove,
    LeavesPlayerInCheck,
}

impl MoveStatus {
    pub fn is_done(self) -> bool {
        matches!(self, MoveStatus::Done)
    }
}

impl fmt::Display for MoveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MoveStatus::Done => "done",
            MoveStatus::IllegalMove => "illegal move",
            MoveStatus::LeavesPlayerInCheck => "leaves player in check",
        };
        write!(f, "{}", msg)
    }
}

/// Outcome of a move attempt. On anything but [`MoveStatus::Done`] the position is the one the
/// move was attempted from.
#[derive(Clone, Debug)]
pub struct MoveTransition {
    position: Position,
    mve: Move,
    status: MoveStatus,
}

impl MoveTransition {
    pub(crate) fn new(position: Position, mve: Move, status: MoveStatus) -> Self {
        Self {
            position,
            mve,
            status,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn into_position(self) -> Position {
        self.position
    }

    pub fn mve(&self) -> Move {
        self.mve
    }

    pub fn status(&self) -> MoveStatus {
        self.status
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }
}
