use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sweeper_core::{CellCount, Coord, Difficulty, Engine};

use crate::session::play;
use crate::settings::{BoardSettings, Settings};

mod session;
mod settings;

/// Minesweeper in the terminal.
///
/// Commands are read from stdin, one per line: `r ROW COL` reveals (or chords a revealed number),
/// `f ROW COL` toggles a flag and `q` quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Board preset
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Custom board rows, needs --cols and --mines
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<Coord>,

    /// Custom board columns
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<Coord>,

    /// Custom mine count
    #[arg(long, requires_all = ["rows", "cols"], allow_negative_numbers = true)]
    mines: Option<CellCount>,

    /// Seed for a reproducible board
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML settings file, command line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if let Some(difficulty) = cli.difficulty {
        settings.difficulty = difficulty;
        settings.board = None;
    }
    if let (Some(rows), Some(cols), Some(mines)) = (cli.rows, cli.cols, cli.mines) {
        settings.board = Some(BoardSettings { rows, cols, mines });
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let settings = resolve_settings(&cli)?;
    let config = settings.game_config().context("Invalid board")?;
    log::info!(
        "Starting {}x{} game with {} mines",
        config.rows,
        config.cols,
        config.mines
    );

    let mut engine = match settings.seed {
        Some(seed) => Engine::with_seed(config, seed)?,
        None => Engine::new(config)?,
    };

    let state = play(&mut engine, io::stdin().lock(), &mut io::stdout().lock())?;
    log::info!("Session ended: {:?}", state);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{ConfigError, GameConfig};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sweeper").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_beginner() {
        let settings = resolve_settings(&parse(&[])).unwrap();

        assert_eq!(settings.game_config(), Ok(Difficulty::Beginner.config()));
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn difficulty_and_seed_flags() {
        let settings = resolve_settings(&parse(&["-d", "intermediate", "--seed", "12"])).unwrap();

        assert_eq!(settings.game_config(), Ok(GameConfig::new_unchecked(16, 16, 40)));
        assert_eq!(settings.seed, Some(12));
    }

    #[test]
    fn custom_board_flags() {
        let cli = parse(&["--rows", "10", "--cols", "12", "--mines", "20"]);
        let settings = resolve_settings(&cli).unwrap();

        assert_eq!(settings.game_config(), Ok(GameConfig::new_unchecked(10, 12, 20)));
    }

    #[test]
    fn negative_mines_reach_validation() {
        let cli = parse(&["--rows", "9", "--cols", "9", "--mines", "-1"]);
        let settings = resolve_settings(&cli).unwrap();

        assert_eq!(settings.game_config(), Err(ConfigError::NegativeMines));
    }

    #[test]
    fn partial_custom_board_is_a_usage_error() {
        assert!(Cli::try_parse_from(["sweeper", "--rows", "10"]).is_err());
        assert!(Cli::try_parse_from(["sweeper", "-d", "legendary"]).is_err());
    }
}
