// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game engine: roster, turn order and status transitions

use crate::board::Board;
use crate::config::GameConfig;
use crate::player::{MoveSource, Player};
use crate::{rules, GameError, GameStatus};

/// Symbols handed out to players that do not bring their own
pub const DEFAULT_SYMBOLS: [&str; 6] = ["X", "O", "H", "W", ">", "<"];

/// Owns a board and an ordered roster and runs one move per [`GameEngine::step`]
pub struct GameEngine {
    board: Board,
    players: Vec<Player>,
    status: GameStatus,
    palette: Vec<String>,
    source: Box<dyn MoveSource>,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("board", &self.board)
            .field("players", &self.players)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    /// Create a game on `board` whose human players read from `source`
    pub fn new(board: Board, source: Box<dyn MoveSource>) -> Self {
        let mut engine = Self {
            board,
            players: Vec::new(),
            status: GameStatus::Init,
            palette: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            source,
        };
        engine.reset();
        engine
    }

    /// Create a game from a validated config. Players listed in the config
    /// are not added; that is left to the caller.
    pub fn from_config(config: &GameConfig, source: Box<dyn MoveSource>) -> Result<Self, GameError> {
        let mut engine = Self::new(config.board()?, source);
        if !config.symbols.is_empty() {
            engine.palette = config.symbols.clone();
        }
        Ok(engine)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Get a nested list representation of the board
    pub fn table(&self) -> Vec<Vec<String>> {
        self.board.as_table()
    }

    /// Player whose move is next
    pub fn current_player(&self) -> Option<&Player> {
        if self.players.is_empty() {
            return None;
        }
        self.players.get(self.board.turn() % self.players.len())
    }

    /// Add a human player. Without a symbol the next palette entry is used.
    pub fn add_player(&mut self, symbol: Option<&str>, name: Option<&str>) -> Result<&Player, GameError> {
        let symbol = self.resolve_symbol(symbol)?;
        self.push_player(Player::human(symbol, name.map(str::to_string)))
    }

    /// Add a bot player
    pub fn add_bot(&mut self, symbol: Option<&str>, name: Option<&str>) -> Result<&Player, GameError> {
        let symbol = self.resolve_symbol(symbol)?;
        self.push_player(Player::bot(symbol, name.map(str::to_string)))
    }

    fn resolve_symbol(&self, symbol: Option<&str>) -> Result<String, GameError> {
        if self.status == GameStatus::Ongoing {
            return Err(GameError::InvalidStatus(self.status));
        }
        let symbol = match symbol.filter(|s| !s.is_empty()) {
            Some(s) if s.trim().is_empty() => return Err(GameError::InvalidOccupant(s.to_string())),
            Some(s) => s.to_string(),
            None => self.palette[self.players.len() % self.palette.len()].clone(),
        };
        if self.players.iter().any(|p| p.symbol() == symbol) {
            return Err(GameError::DuplicateSymbol(symbol));
        }
        Ok(symbol)
    }

    fn push_player(&mut self, player: Player) -> Result<&Player, GameError> {
        tracing::debug!(symbol = player.symbol(), kind = ?player.kind(), "Player added");
        self.players.push(player);
        // Just pushed
        Ok(&self.players[self.players.len() - 1])
    }

    /// Execute a single move.
    ///
    /// Returns `Ok(true)` while the game continues and `Ok(false)` once it
    /// is over. A rejected move leaves board, turn and status untouched, so
    /// calling `step` again asks the same player.
    pub fn step(&mut self) -> Result<bool, GameError> {
        if !matches!(self.status, GameStatus::Ready | GameStatus::Ongoing) {
            return Err(GameError::InvalidStatus(self.status));
        }
        let idx = match self.players.len() {
            0 => return Err(GameError::NoPlayers),
            n => self.board.turn() % n,
        };

        self.status = GameStatus::Ongoing;
        let player = &self.players[idx];

        let mv = match player.play(self.source.as_mut()) {
            Ok(mv) => mv,
            Err(GameError::InputClosed) => {
                tracing::warn!(symbol = player.symbol(), "Move input closed, aborting game");
                self.status = GameStatus::Error;
                return Err(GameError::InputClosed);
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = self.board.add_play(&mv, player.symbol(), false) {
            tracing::debug!(symbol = player.symbol(), mv = %mv, error = %e, "Move rejected");
            return Err(e);
        }

        Ok(!self.game_over())
    }

    /// Player who completed a winning run with the last move
    pub fn winner(&self) -> Option<&Player> {
        let symbol = rules::winning_symbol(&self.board)?;
        self.players.iter().find(|p| p.symbol() == symbol)
    }

    /// Board full with no winner
    pub fn is_draw(&self) -> bool {
        rules::is_draw(&self.board)
    }

    /// Check for a winner or a full board and move to `Over` if either holds
    pub fn game_over(&mut self) -> bool {
        if let Some(winner) = self.winner() {
            tracing::info!(
                symbol = winner.symbol(),
                name = winner.display_name(),
                turn = self.board.turn(),
                "Game won"
            );
            self.status = GameStatus::Over;
            return true;
        }
        if self.board.is_full() {
            tracing::info!(turn = self.board.turn(), "Game drawn");
            self.status = GameStatus::Over;
            return true;
        }
        false
    }

    /// Clear the board and drop every player
    pub fn reset(&mut self) {
        self.board.reset();
        self.players.iter_mut().for_each(Player::reset);
        self.players.clear();
        self.status = GameStatus::Ready;
        tracing::info!("Game reset");
    }

    /// Clear the board for another round with the same roster
    pub fn reset_preserve_players(&mut self) {
        self.board.reset();
        self.players.iter_mut().for_each(Player::reset);
        self.status = GameStatus::Ready;
        tracing::info!(players = self.players.len(), "Game reset, roster kept");
    }

    /// Ask the move source whether to play another round
    pub fn wants_rematch(&mut self) -> bool {
        self.source.play_again()
    }
}
