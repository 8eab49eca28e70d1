// SPDX-License-Identifier: MIT OR Apache-2.0

//! gridtoe CLI - play the grid game in a terminal
//!
//! Human players type cell ids such as `b2`. A comma-separated `--moves`
//! list replaces the prompt for scripted, non-interactive runs.

mod prompt;
mod render;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use gridtoe_core::config::{self, GameConfig};
use gridtoe_core::{GameEngine, GameError, MoveSource, ScriptedMoves};
use prompt::TerminalPrompt;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(
    name = "gridtoe",
    about = "Tic-tac-toe style grid game for the terminal",
    version
)]
struct Args {
    /// Board rows (3-9)
    #[clap(long)]
    rows: Option<u8>,

    /// Board columns (3-9)
    #[clap(long)]
    cols: Option<u8>,

    /// Square board size, shorthand for --rows N --cols N
    #[clap(short, long, conflicts_with_all = ["rows", "cols"])]
    size: Option<u8>,

    /// Run length needed to win (defaults to the shorter board side)
    #[clap(short, long)]
    win_on: Option<u8>,

    /// Number of players
    #[clap(short, long)]
    players: Option<usize>,

    /// Player name, repeat once per seat
    #[clap(short, long = "name")]
    names: Vec<String>,

    /// Player symbol, repeat once per seat
    #[clap(long = "symbol")]
    symbols: Vec<String>,

    /// Seat number (1-based) to fill with a bot
    #[clap(long = "bot")]
    bots: Vec<usize>,

    /// Play these cell ids in order instead of prompting
    #[clap(short, long, value_delimiter = ',')]
    moves: Option<Vec<String>>,

    /// Config file (TOML)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,
}

impl Args {
    /// Config file values with command-line overrides applied
    fn resolve_config(&self) -> Result<GameConfig> {
        let mut config = config::load_or_default(self.config.as_deref())?;

        if let Some(size) = self.size {
            config.rows = size;
            config.cols = size;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if self.win_on.is_some() {
            config.win_on = self.win_on;
        }
        if let Some(players) = self.players {
            config.players = players;
        }
        if !self.names.is_empty() {
            config.names = self.names.clone();
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

fn init_logging(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

/// Seat the configured players, marking `--bot` seats as bots
fn seat_players(game: &mut GameEngine, config: &GameConfig, args: &Args) -> Result<()> {
    for seat in 0..config.players {
        let symbol = args.symbols.get(seat).map(String::as_str);
        let name = config.names.get(seat).map(String::as_str);

        let player = if args.bots.contains(&(seat + 1)) {
            game.add_bot(symbol, name)
        } else {
            game.add_player(symbol, name)
        }
        .with_context(|| format!("Failed to seat player {}", seat + 1))?;

        tracing::debug!(seat = seat + 1, symbol = player.symbol(), "Seated");
    }
    Ok(())
}

/// Message shown before asking the same player again
fn retry_message(err: &GameError) -> String {
    match err {
        GameError::CellOccupied { cell, occupant } => {
            format!("Cell {} is already taken by {}, pick another one.", cell, occupant)
        }
        GameError::OutOfBounds { cell, rows, cols } => {
            format!("{} is off the {}x{} board.", cell, rows, cols)
        }
        GameError::InvalidCellFormat(_) => {
            "Enter a row letter followed by a column number, e.g. b2.".to_string()
        }
        other => other.to_string(),
    }
}

fn print_board(game: &GameEngine) {
    println!("\n{}", render::render_board(&game.table()));
}

/// Run rounds until the players decline a rematch. Closed input or a bot
/// turn ends the session with an error.
fn run_game_loop(game: &mut GameEngine) -> Result<()> {
    loop {
        print_board(game);

        loop {
            match game.step() {
                Ok(true) => print_board(game),
                Ok(false) => {
                    print_board(game);
                    match game.winner() {
                        Some(winner) => println!("{} ({}) wins!", winner.display_name(), winner.symbol()),
                        None => println!("It's a draw."),
                    }
                    break;
                }
                Err(e) if e.is_retryable() => eprintln!("{}", retry_message(&e)),
                Err(e) => return Err(e).context("Game aborted"),
            }
        }

        if !game.wants_rematch() {
            return Ok(());
        }
        game.reset_preserve_players();
    }
}

/// Main entry point
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug)?;

    let config = args.resolve_config()?;
    tracing::info!(
        rows = config.rows,
        cols = config.cols,
        win_on = ?config.win_on,
        players = config.players,
        "Starting game"
    );

    let source: Box<dyn MoveSource> = match &args.moves {
        Some(moves) => Box::new(ScriptedMoves::new(moves.clone())),
        None => Box::new(TerminalPrompt::stdio()),
    };

    let mut game = GameEngine::from_config(&config, source)?;
    seat_players(&mut game, &config, &args)?;

    run_game_loop(&mut game)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides() {
        let args = Args::parse_from(["gridtoe", "--size", "5", "--win-on", "4", "-p", "3"]);
        let config = args.resolve_config().unwrap();
        assert_eq!((config.rows, config.cols), (5, 5));
        assert_eq!(config.win_on, Some(4));
        assert_eq!(config.players, 3);
    }

    #[test]
    fn test_moves_are_comma_separated() {
        let args = Args::parse_from(["gridtoe", "--moves", "a1,b2,c3"]);
        assert_eq!(args.moves.unwrap(), ["a1", "b2", "c3"]);
    }

    #[test]
    fn test_bot_seat() {
        let args = Args::parse_from(["gridtoe", "--bot", "2", "--name", "Ada"]);
        let config = args.resolve_config().unwrap();
        let mut game = GameEngine::new(config.board().unwrap(), Box::new(ScriptedMoves::default()));
        seat_players(&mut game, &config, &args).unwrap();

        assert!(game.players()[0].is_human());
        assert_eq!(game.players()[0].name(), Some("Ada"));
        assert!(game.players()[1].is_bot());
    }

    #[test]
    fn test_scripted_game_runs_to_completion() {
        let mut game = GameEngine::new(
            gridtoe_core::Board::square(3),
            Box::new(ScriptedMoves::new(["a1", "a1", "b1", "a2", "b2", "a3"])),
        );
        game.add_player(None, None).unwrap();
        game.add_player(None, None).unwrap();

        run_game_loop(&mut game).unwrap();
        assert_eq!(game.winner().map(|p| p.symbol()), Some("X"));
    }

    #[test]
    fn test_script_ending_mid_game_is_an_error() {
        let mut game = GameEngine::new(
            gridtoe_core::Board::square(3),
            Box::new(ScriptedMoves::new(["a1", "b2"])),
        );
        game.add_player(None, None).unwrap();
        game.add_player(None, None).unwrap();

        let err = run_game_loop(&mut game).unwrap_err();
        assert_eq!(err.downcast_ref::<GameError>(), Some(&GameError::InputClosed));
        assert_eq!(game.status(), gridtoe_core::GameStatus::Error);
    }

    #[test]
    fn test_bot_turn_ends_the_session() {
        let mut game = GameEngine::new(
            gridtoe_core::Board::square(3),
            Box::new(ScriptedMoves::new(["a1"])),
        );
        game.add_player(None, None).unwrap();
        game.add_bot(None, None).unwrap();

        let err = run_game_loop(&mut game).unwrap_err();
        assert!(matches!(err.downcast_ref::<GameError>(), Some(GameError::NotImplemented(_))));
    }

    #[test]
    fn test_retry_messages_are_specific() {
        let occupied = GameError::CellOccupied { cell: "b2".into(), occupant: "X".into() };
        assert!(retry_message(&occupied).contains("already taken by X"));
        assert!(retry_message(&GameError::InvalidCellFormat("zz".into())).contains("e.g. b2"));
    }
}
