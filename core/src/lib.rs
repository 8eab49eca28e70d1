// SPDX-License-Identifier: MIT OR Apache-2.0

//! gridtoe Core - Game Rules and Board Logic
//!
//! This crate provides the core game functionality including:
//! - Sparse board representation with cell-id parsing
//! - Players and the move-source capability that feeds them
//! - The turn engine and its status state machine
//! - Win and draw detection
//! - TOML game configuration

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod config;
pub mod engine;
pub mod player;
pub mod rules;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use board::{Board, CellPos, Segment, BLANK, MAX_SIZE, MIN_SIZE};
pub use config::GameConfig;
pub use engine::{GameEngine, DEFAULT_SYMBOLS};
pub use player::{MoveSource, Player, PlayerKind, ScriptedMoves};

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Constructed but not yet reset
    Init,
    /// Waiting for the first move
    Ready,
    /// At least one step has started
    Ongoing,
    /// Someone won or the board filled up
    Over,
    /// The move source failed in a way the game cannot recover from
    Error,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameStatus::Init => "init",
            GameStatus::Ready => "ready",
            GameStatus::Ongoing => "ongoing",
            GameStatus::Over => "over",
            GameStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// Errors that can occur during game play
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The cell id does not look like a letter followed by a digit
    #[error("Invalid cell id. Expected \"[a-z][1-9]\", got: {0:?}")]
    InvalidCellFormat(String),

    /// The cell id decodes to a position outside the board
    #[error("Selected cell {cell} is out of the board's bounds ({rows}x{cols})")]
    OutOfBounds {
        /// The offending cell id as typed
        cell: String,
        /// Board rows
        rows: u8,
        /// Board columns
        cols: u8,
    },

    /// The occupant symbol is empty
    #[error("Invalid occupant symbol: {0:?}")]
    InvalidOccupant(String),

    /// The cell already holds a symbol
    #[error("Cell {cell} is already occupied by player {occupant}")]
    CellOccupied {
        /// Cell id of the occupied cell
        cell: String,
        /// Symbol currently in the cell
        occupant: String,
    },

    /// Another player already uses this symbol
    #[error("Player symbol {0:?} is already in use")]
    DuplicateSymbol(String),

    /// Capability that exists in the model but has no implementation
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// `step()` was called on a game without players
    #[error("The game has no players")]
    NoPlayers,

    /// The operation is not allowed in the current status
    #[error("Operation not allowed while game is {0}")]
    InvalidStatus(GameStatus),

    /// Win length below 3 or longer than any board line
    #[error("Invalid win length {win_on} for a {rows}x{cols} board")]
    InvalidWinLength {
        /// Requested run length
        win_on: u8,
        /// Board rows
        rows: u8,
        /// Board columns
        cols: u8,
    },

    /// The move source has no more input
    #[error("Move input closed")]
    InputClosed,
}

impl GameError {
    /// Whether the same player may simply be asked again
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GameError::InvalidCellFormat(_)
                | GameError::OutOfBounds { .. }
                | GameError::CellOccupied { .. }
        )
    }
}
