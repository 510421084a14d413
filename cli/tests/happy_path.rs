use std::str::FromStr;

use rulebook::Position;
use rulebook_cli::{Command, Flow, Session};

use testresult::TestResult;

fn run(position: Position, lines: &[&str]) -> TestResult<(Vec<String>, Flow)> {
    let mut session = Session::new(position, Vec::new());
    let mut flow = Flow::Continue;
    for line in lines {
        flow = session.handle_command(&Command::from_str(line)?)?;
        if flow == Flow::Quit {
            break;
        }
    }
    let out = String::from_utf8(session.into_writer())?;
    Ok((out.lines().map(str::to_string).collect(), flow))
}

#[test]
fn test_happy_path() -> TestResult {
    let (responses, flow) = run(
        Position::start(),
        &[
            "moves g1",
            "move f2 f3",
            "e7e5",
            "g2g4",
            "move d8 h4",
            "fen",
            "quit",
            "board",
        ],
    )?;

    assert_eq!(
        responses,
        vec![
            "g1f3 g1h3",
            "f2f3: done",
            "e7e5: done",
            "g2g4: done",
            "d8h4: done",
            "checkmate, Black wins",
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 0 1",
        ]
    );
    assert_eq!(flow, Flow::Quit);
    Ok(())
}

#[test]
fn test_position_and_castle() -> TestResult {
    let (responses, _) = run(
        Position::start(),
        &[
            "position fen r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
            "e1g1",
            "fen",
            "undo",
            "position startpos",
            "board",
        ],
    )?;

    assert_eq!(
        responses,
        vec![
            "White to move",
            "e1g1: done",
            "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 0 1",
            "undone, White to move",
            "White to move",
            "rnbqkbnr",
            "pppppppp",
            "........",
            "........",
            "........",
            "........",
            "PPPPPPPP",
            "RNBQKBNR",
        ]
    );
    Ok(())
}

#[test]
fn test_pinned_piece_reports_check() -> TestResult {
    let (responses, _) = run(
        Position::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1")?,
        &["e2d3", "e1d1", "moves"],
    )?;

    assert_eq!(responses[0], "e2d3: leaves player in check");
    assert_eq!(responses[1], "e1d1: done");
    Ok(())
}

#[test]
fn test_unknown_command() {
    assert!(Command::from_str("go infinite").is_err());
}
