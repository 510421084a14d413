use std::fmt;
use std::str::FromStr;

use rulebook::Square;
use winnow::combinator::{alt, opt, preceded, separated_pair};
use winnow::token::{one_of, rest};
use winnow::Parser;
use winnow::Result as WinnowResult;

/// A line of input to a play session.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    Board,
    /// Legal moves of the side to move, optionally only those leaving `from`.
    Moves {
        from: Option<Square>,
    },
    Move {
        src: Square,
        dest: Square,
    },
    Undo,
    Fen,
    /// `None` is the standard starting position.
    Position {
        fen: Option<String>,
    },
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Board => write!(f, "board"),
            Command::Moves { from } => match from {
                Some(sq) => write!(f, "moves {}", sq),
                None => write!(f, "moves"),
            },
            Command::Move { src, dest } => write!(f, "move {} {}", src, dest),
            Command::Undo => write!(f, "undo"),
            Command::Fen => write!(f, "fen"),
            Command::Position { fen } => match fen {
                Some(fen) => write!(f, "position fen {}", fen),
                None => write!(f, "position startpos"),
            },
            Command::Quit => write!(f, "quit"),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("cannot parse: [{0}]")]
pub struct CommandParseError(String);

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        alt((
            parse_board,
            // `moves` must go before `move` because they share a prefix
            parse_moves,
            parse_move,
            parse_bare_move,
            parse_undo,
            parse_fen,
            parse_position,
            parse_quit,
        ))
        .parse(trimmed)
        .map_err(|_| CommandParseError(trimmed.to_string()))
    }
}

fn parse_square(input: &mut &str) -> WinnowResult<Square> {
    (one_of('a'..='h'), one_of('1'..='8'))
        .take()
        .try_map(Square::from_str)
        .parse_next(input)
}

fn parse_board(input: &mut &str) -> WinnowResult<Command> {
    "board".value(Command::Board).parse_next(input)
}

fn parse_moves(input: &mut &str) -> WinnowResult<Command> {
    preceded("moves", opt(preceded(' ', parse_square)))
        .map(|from| Command::Moves { from })
        .parse_next(input)
}

fn parse_move(input: &mut &str) -> WinnowResult<Command> {
    preceded("move ", parse_bare_move).parse_next(input)
}

/// `e2e4` or `e2 e4`.
fn parse_bare_move(input: &mut &str) -> WinnowResult<Command> {
    separated_pair(parse_square, opt(' '), parse_square)
        .map(|(src, dest)| Command::Move { src, dest })
        .parse_next(input)
}

fn parse_undo(input: &mut &str) -> WinnowResult<Command> {
    "undo".value(Command::Undo).parse_next(input)
}

fn parse_fen(input: &mut &str) -> WinnowResult<Command> {
    "fen".value(Command::Fen).parse_next(input)
}

fn parse_position(input: &mut &str) -> WinnowResult<Command> {
    preceded(
        "position ",
        alt((
            "startpos".value(None),
            preceded("fen ", rest.map(|fen: &str| Some(fen.to_string()))),
        )),
    )
    .map(|fen| Command::Position { fen })
    .parse_next(input)
}

fn parse_quit(input: &mut &str) -> WinnowResult<Command> {
    alt(("quit", "exit")).value(Command::Quit).parse_next(input)
}
