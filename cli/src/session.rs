use std::io::Write;

use anyhow::{Context, Result};
use rulebook::{resolve_move, MoveStatus, Position, Square};
use tracing::{debug, info};

use crate::commands::Command;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Flow {
    Continue,
    Quit,
}

/// A game played one command at a time. Earlier positions are kept so moves can be taken back.
pub struct Session<W: Write> {
    current: Position,
    history: Vec<Position>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(position: Position, out: W) -> Self {
        Self {
            current: position,
            history: Vec::new(),
            out,
        }
    }

    pub fn position(&self) -> &Position {
        &self.current
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    pub fn handle_command(&mut self, command: &Command) -> Result<Flow> {
        debug!("> {}", command);

        match command {
            Command::Board => writeln!(self.out, "{}", self.current)?,
            Command::Moves { from } => {
                let mut moves: Vec<String> = self
                    .current
                    .current_player()
                    .legal_moves()
                    .iter()
                    .filter(|mve| from.is_none() || mve.src() == *from)
                    .map(|mve| mve.to_string())
                    .collect();
                moves.sort();
                writeln!(self.out, "{}", moves.join(" "))?;
            }
            Command::Move { src, dest } => self.play_move(*src, *dest)?,
            Command::Undo => match self.history.pop() {
                Some(prev) => {
                    self.current = prev;
                    writeln!(self.out, "undone, {} to move", self.current.to_move())?;
                }
                None => writeln!(self.out, "nothing to undo")?,
            },
            Command::Fen => writeln!(self.out, "{}", self.current.to_fen())?,
            Command::Position { fen } => {
                self.current = match fen {
                    Some(fen) => Position::from_fen(fen)
                        .with_context(|| format!("Couldn't parse given fen: `{}`", fen))?,
                    None => Position::start(),
                };
                self.history.clear();
                info!("new position: {}", self.current.to_fen());
                writeln!(self.out, "{} to move", self.current.to_move())?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn play_move(&mut self, src: Square, dest: Square) -> Result<()> {
        let mve = resolve_move(&self.current, src, dest);
        let transition = self.current.current_player().try_move(&mve)?;

        match transition.status() {
            MoveStatus::Done => {
                let prev = std::mem::replace(&mut self.current, transition.into_position());
                self.history.push(prev);
                writeln!(self.out, "{}{}: {}", src, dest, MoveStatus::Done)?;
            }
            status => {
                writeln!(self.out, "{}{}: {}", src, dest, status)?;
                return Ok(());
            }
        }

        let player = self.current.current_player();
        if player.is_in_checkmate() {
            writeln!(self.out, "checkmate, {} wins", player.color().opposite())?;
        } else if player.is_in_stalemate() {
            writeln!(self.out, "stalemate")?;
        } else if player.is_in_check() {
            writeln!(self.out, "{} is in check", player.color())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulebook::Square::*;
    use testresult::TestResult;

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8_lossy(&session.into_writer()).into_owned()
    }

    #[test]
    fn test_move_and_undo() -> TestResult {
        let mut session = Session::new(Position::start(), Vec::new());

        session.handle_command(&Command::Move { src: E2, dest: E4 })?;
        assert_eq!(session.position().piece_at(E4).map(|p| p.to_char()), Some('P'));

        session.handle_command(&Command::Undo)?;
        assert_eq!(session.position(), &Position::start());

        session.handle_command(&Command::Undo)?;
        assert_eq!(
            output(session),
            "e2e4: done\nundone, White to move\nnothing to undo\n"
        );
        Ok(())
    }

    #[test]
    fn test_illegal_move_keeps_position() -> TestResult {
        let mut session = Session::new(Position::start(), Vec::new());

        session.handle_command(&Command::Move { src: E2, dest: E5 })?;
        assert_eq!(session.position(), &Position::start());
        assert_eq!(output(session), "e2e5: illegal move\n");
        Ok(())
    }

    #[test]
    fn test_moves_from_square() -> TestResult {
        let mut session = Session::new(Position::start(), Vec::new());

        session.handle_command(&Command::Moves { from: Some(G1) })?;
        assert_eq!(output(session), "g1f3 g1h3\n");
        Ok(())
    }

    #[test]
    fn test_quit() -> TestResult {
        let mut session = Session::new(Position::start(), Vec::new());
        assert_eq!(session.handle_command(&Command::Quit)?, Flow::Quit);
        Ok(())
    }

    #[test]
    fn test_bad_fen_is_an_error() {
        let mut session = Session::new(Position::start(), Vec::new());
        let got = session.handle_command(&Command::Position {
            fen: Some("not a fen".to_string()),
        });
        assert!(got.is_err());
        assert_eq!(session.position(), &Position::start());
    }
}
