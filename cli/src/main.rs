use std::{
    env,
    fs::{self, File},
    io::{self, BufRead},
    path::PathBuf,
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use rulebook::{perft, perft_full, Position};
use tracing::{debug, level_filters::LevelFilter, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, prelude::*, util::SubscriberInitExt, Registry};

use rulebook_cli::{Command, Flow, Session};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Play moves read from stdin, one command per line.
    Play {
        /// Start from this position instead of the standard one.
        #[arg(long)]
        fen: Option<String>,
    },
    /// Count the leaf nodes below a position.
    Perft {
        fen: String,
        depth: u8,
        /// Print a per depth breakdown instead of per move counts.
        #[arg(long)]
        full: bool,
    },
    /// List the moves of the side to move that don't leave its king attacked.
    Moves { fen: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    enable_logging()?;

    match cli.command {
        Some(Commands::Play { fen }) => play_main_loop(fen.as_deref()),
        Some(Commands::Perft { fen, depth, full }) => cli_perft(&fen, depth, full),
        Some(Commands::Moves { fen }) => cli_moves(&fen),
        None => play_main_loop(None),
    }
}

fn parse_fen(fen: &str) -> Result<Position> {
    Position::from_fen(fen).with_context(|| format!("Couldn't parse given fen: `{}`", fen))
}

fn cli_perft(fen: &str, depth: u8, full: bool) -> Result<()> {
    let position = parse_fen(fen)?;
    if full {
        println!("{}", perft_full(&position, depth as usize));
        return Ok(());
    }

    let (move_counts, tot_moves) = perft(&position, depth as usize);
    let mut move_counts: Vec<_> = move_counts.into_iter().collect();
    move_counts.sort_by_key(|(mve, _)| mve.to_string());
    for (mve, move_nodes) in move_counts {
        println!("{}:  {}", mve, move_nodes);
    }
    println!("Total: {:?}", tot_moves);
    Ok(())
}

fn cli_moves(fen: &str) -> Result<()> {
    let position = parse_fen(fen)?;
    let player = position.current_player();

    for transition in player.valid_transitions() {
        println!("{}", transition.mve());
    }
    if player.is_in_checkmate() {
        println!("checkmate");
    } else if player.is_in_stalemate() {
        println!("stalemate");
    } else if player.is_in_check() {
        println!("check");
    }
    Ok(())
}

fn play_main_loop(fen: Option<&str>) -> Result<()> {
    let position = match fen {
        Some(fen) => parse_fen(fen)?,
        None => Position::start(),
    };
    let mut session = Session::new(position, io::stdout().lock());

    for line in io::stdin().lock().lines() {
        let line = line?;
        debug!("{}", line);

        let command = match Command::from_str(&line) {
            Ok(command) => command,
            Err(err) => {
                warn!("{}", err);
                continue;
            }
        };

        match session.handle_command(&command) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => warn!("{:#}", err),
        }
    }
    Ok(())
}

fn enable_logging() -> Result<()> {
    let log_path = if let Ok(log_path_str) = env::var("RULEBOOK_LOG_PATH") {
        PathBuf::from_str(&log_path_str)?
    } else {
        let log_path = get_default_log_path()?;
        if let Some(log_path_dir) = log_path.parent() {
            if !log_path_dir.exists() {
                fs::create_dir_all(log_path_dir)?;
            }
        }
        log_path
    };

    let log_file =
        File::create(log_path.clone()).context(format!("Couldn't create file {:?}", log_path))?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        );

    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_filter(LevelFilter::from_level(Level::DEBUG));

    Registry::default().with(stderr_layer).with(log_layer).init();

    Ok(())
}

fn get_default_log_path() -> Result<PathBuf> {
    let mut log_path = dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/state")))
        .context("Home directory not set")?;
    log_path.push("rulebook");
    log_path.push("rulebook.log");
    Ok(log_path)
}
