// SPDX-License-Identifier: MIT OR Apache-2.0

//! Players and the move-source capability

use crate::GameError;
use std::collections::VecDeque;

/// Where a player's moves come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    /// Moves are read from the injected [`MoveSource`]
    Human,
    /// Moves would be computed; no strategy exists yet
    Bot,
}

/// Supplies cell ids for human players.
///
/// This is the one place a game waits for the outside world: a terminal
/// prompt, a test script, or a UI event loop.
pub trait MoveSource {
    /// Get the next cell id for `player`
    fn next_move(&mut self, player: &Player) -> Result<String, GameError>;

    /// Ask whether another round should be played with the same roster
    fn play_again(&mut self) -> bool {
        false
    }
}

/// Move source that replays a fixed list of cell ids
#[derive(Debug, Clone, Default)]
pub struct ScriptedMoves {
    moves: VecDeque<String>,
    rounds: usize,
}

impl ScriptedMoves {
    /// Create a script from cell ids, played in order regardless of player
    pub fn new<I, S>(moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            moves: moves.into_iter().map(Into::into).collect(),
            rounds: 0,
        }
    }

    /// Answer "yes" to the next `rounds` play-again questions
    pub fn with_rematches(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Moves not yet handed out
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl MoveSource for ScriptedMoves {
    fn next_move(&mut self, _player: &Player) -> Result<String, GameError> {
        self.moves.pop_front().ok_or(GameError::InputClosed)
    }

    fn play_again(&mut self) -> bool {
        if self.rounds == 0 {
            return false;
        }
        self.rounds -= 1;
        true
    }
}

/// A participant in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    symbol: String,
    name: Option<String>,
    kind: PlayerKind,
}

impl Player {
    /// Create a human player
    pub fn human(symbol: impl Into<String>, name: Option<String>) -> Self {
        Self::new(symbol, name, PlayerKind::Human)
    }

    /// Create a bot player
    pub fn bot(symbol: impl Into<String>, name: Option<String>) -> Self {
        Self::new(symbol, name, PlayerKind::Bot)
    }

    fn new(symbol: impl Into<String>, name: Option<String>, kind: PlayerKind) -> Self {
        Self {
            symbol: symbol.into(),
            name,
            kind,
        }
    }

    /// Get the player unique symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the player name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name if set, symbol otherwise
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(&self.symbol)
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    pub fn is_bot(&self) -> bool {
        self.kind == PlayerKind::Bot
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }

    /// Get this player's next move
    pub fn play(&self, source: &mut dyn MoveSource) -> Result<String, GameError> {
        match self.kind {
            PlayerKind::Human => source.next_move(self),
            PlayerKind::Bot => Err(GameError::NotImplemented(format!(
                "bot move selection for player {}",
                self.symbol
            ))),
        }
    }

    /// Players keep no per-round state
    pub fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_reads_from_source() {
        let player = Player::human("X", Some("Ada".into()));
        let mut source = ScriptedMoves::new(["b2"]);
        assert_eq!(player.play(&mut source).unwrap(), "b2");
        assert!(matches!(player.play(&mut source), Err(GameError::InputClosed)));
    }

    #[test]
    fn test_bot_is_not_implemented() {
        let player = Player::bot("O", None);
        let mut source = ScriptedMoves::new(["a1"]);
        assert!(matches!(player.play(&mut source), Err(GameError::NotImplemented(_))));
        // The source is left untouched
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_source_receives_player_identity() {
        struct Echo;
        impl MoveSource for Echo {
            fn next_move(&mut self, player: &Player) -> Result<String, GameError> {
                Ok(format!("{}:{}", player.display_name(), player.symbol()))
            }
        }

        let player = Player::human("W", Some("Grace".into()));
        assert_eq!(player.play(&mut Echo).unwrap(), "Grace:W");
        assert_eq!(Player::human("H", None).play(&mut Echo).unwrap(), "H:H");
    }

    #[test]
    fn test_scripted_rematches() {
        let mut source = ScriptedMoves::new(Vec::<String>::new()).with_rematches(1);
        assert!(source.play_again());
        assert!(!source.play_again());
    }
}
