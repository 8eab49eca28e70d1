// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation
//!
//! The board is sparse: only played cells are stored, in play order. The
//! last entry is always the most recent play, which is what win detection
//! looks at.

use crate::GameError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Smallest supported board dimension
pub const MIN_SIZE: u8 = 3;
/// Largest supported board dimension (column digits run 1-9)
pub const MAX_SIZE: u8 = 9;
/// Placeholder for an unplayed cell inside a [`Segment`]
pub const BLANK: &str = " ";

static CELL_ID: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^\s*([a-zA-Z])\s*([1-9])\s*$").unwrap()
});

/// A line of cells through a given cell, in board order, with occupants
/// (or [`BLANK`])
pub type Segment<'a> = Vec<(CellPos, &'a str)>;

/// Zero-based board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    /// Row index, `a` is 0
    pub row: u8,
    /// Column index, `1` is 0
    pub col: u8,
}

impl CellPos {
    /// Create a new position
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Decode a cell id such as `"b2"` or `" C 3 "` without any bounds check
    pub fn parse(cell_id: &str) -> Result<Self, GameError> {
        let caps = CELL_ID
            .captures(cell_id)
            .ok_or_else(|| GameError::InvalidCellFormat(cell_id.to_string()))?;

        // Both groups are single ASCII characters once the regex matched
        let row = caps[1].to_ascii_lowercase().as_bytes()[0] - b'a';
        let col = caps[2].as_bytes()[0] - b'1';
        Ok(Self { row, col })
    }

    /// Check if the position fits a board of the given size
    pub fn is_valid(&self, rows: u8, cols: u8) -> bool {
        self.row < rows && self.col < cols
    }

    /// Encode as a cell id (`row letter` + `column digit`)
    pub fn cell_id(&self) -> String {
        self.to_string()
    }

    /// Row letter for a row index, `?` past `z`
    pub fn row_label(row: u8) -> char {
        match row {
            0..=25 => (b'a' + row) as char,
            _ => '?',
        }
    }

    /// Column label for a column index
    pub fn col_label(col: u8) -> String {
        (u16::from(col) + 1).to_string()
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::row_label(self.row), Self::col_label(self.col))
    }
}

/// Line directions as (row step, col step): row, column, diagonal, anti-diagonal
const DIRECTIONS: [(i16, i16); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Sparse grid of plays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: u8,
    cols: u8,
    win_on: u8,
    /// Plays in insertion order
    plays: Vec<(CellPos, String)>,
}

impl Board {
    /// Create an empty board. Dimensions are clamped to [3, 9] and the win
    /// length defaults to the shorter side.
    pub fn new(rows: u8, cols: u8) -> Self {
        let rows = rows.clamp(MIN_SIZE, MAX_SIZE);
        let cols = cols.clamp(MIN_SIZE, MAX_SIZE);
        Self {
            rows,
            cols,
            win_on: rows.min(cols),
            plays: Vec::new(),
        }
    }

    /// Create an empty square board
    pub fn square(size: u8) -> Self {
        Self::new(size, size)
    }

    /// Set the run length needed to win
    pub fn with_win_on(mut self, win_on: u8) -> Result<Self, GameError> {
        if win_on < MIN_SIZE || win_on > self.rows.max(self.cols) {
            return Err(GameError::InvalidWinLength {
                win_on,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.win_on = win_on;
        Ok(self)
    }

    /// Board size as (rows, cols)
    pub fn size(&self) -> (u8, u8) {
        (self.rows, self.cols)
    }

    /// Run length needed to win
    pub fn win_on(&self) -> u8 {
        self.win_on
    }

    /// Number of plays made so far
    pub fn turn(&self) -> usize {
        self.plays.len()
    }

    /// Remove every play. Size and win length are kept.
    pub fn reset(&mut self) {
        self.plays.clear();
    }

    /// Plays in order as (cell id, symbol)
    pub fn plays(&self) -> Vec<(String, String)> {
        self.plays
            .iter()
            .map(|(pos, symbol)| (pos.cell_id(), symbol.clone()))
            .collect()
    }

    /// Symbol at a position, if played
    pub fn get(&self, pos: CellPos) -> Option<&str> {
        self.plays
            .iter()
            .find(|(p, _)| *p == pos)
            .map(|(_, symbol)| symbol.as_str())
    }

    /// True once every cell holds a symbol
    pub fn is_full(&self) -> bool {
        self.plays.len() >= usize::from(self.rows) * usize::from(self.cols)
    }

    /// Decode a cell id and check it against the board bounds
    pub fn parse_cell(&self, cell_id: &str) -> Result<CellPos, GameError> {
        let pos = CellPos::parse(cell_id)?;
        if !pos.is_valid(self.rows, self.cols) {
            return Err(GameError::OutOfBounds {
                cell: pos.cell_id(),
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(pos)
    }

    /// Record `occupant` at `cell_id`.
    ///
    /// An occupied cell is only replaced when `override_cell` is set; the
    /// replaced cell then becomes the most recent play and the turn count
    /// stays the same.
    pub fn add_play(
        &mut self,
        cell_id: &str,
        occupant: &str,
        override_cell: bool,
    ) -> Result<CellPos, GameError> {
        let pos = self.parse_cell(cell_id)?;

        // A blank symbol would be indistinguishable from an unplayed cell
        if occupant.trim().is_empty() {
            return Err(GameError::InvalidOccupant(occupant.to_string()));
        }

        if let Some(idx) = self.plays.iter().position(|(p, _)| *p == pos) {
            if !override_cell {
                return Err(GameError::CellOccupied {
                    cell: pos.cell_id(),
                    occupant: self.plays[idx].1.clone(),
                });
            }
            self.plays.remove(idx);
        }

        self.plays.push((pos, occupant.to_string()));
        tracing::debug!(cell = %pos, occupant, turn = self.turn(), "Play recorded");
        Ok(pos)
    }

    /// Rows x cols grid of symbols, empty string for unplayed cells
    pub fn as_table(&self) -> Vec<Vec<String>> {
        let mut table = vec![vec![String::new(); usize::from(self.cols)]; usize::from(self.rows)];
        for (pos, symbol) in &self.plays {
            table[usize::from(pos.row)][usize::from(pos.col)] = symbol.clone();
        }
        table
    }

    /// Lines through `cell_id` (row, column, diagonal, anti-diagonal), each
    /// reaching `max_distance` cells to both sides (default `win_on - 1`)
    /// and clipped to the board.
    pub fn connected_cells(
        &self,
        cell_id: &str,
        max_distance: Option<u8>,
    ) -> Result<[Segment<'_>; 4], GameError> {
        let pos = self.parse_cell(cell_id)?;
        Ok(self.connected_cells_at(pos, max_distance))
    }

    /// Same as [`Board::connected_cells`] for an already decoded position
    pub fn connected_cells_at(&self, pos: CellPos, max_distance: Option<u8>) -> [Segment<'_>; 4] {
        let reach = i16::from(max_distance.unwrap_or(self.win_on.saturating_sub(1)));
        DIRECTIONS.map(|(dr, dc)| {
            (-reach..=reach)
                .filter_map(|k| {
                    let row = i16::from(pos.row) + k * dr;
                    let col = i16::from(pos.col) + k * dc;
                    if row < 0 || col < 0 || row >= i16::from(self.rows) || col >= i16::from(self.cols) {
                        return None;
                    }
                    let cell = CellPos::new(row as u8, col as u8);
                    Some((cell, self.get(cell).unwrap_or(BLANK)))
                })
                .collect()
        })
    }

    /// Position of the most recent play
    pub fn last_cell_position(&self) -> Option<CellPos> {
        self.plays.last().map(|(pos, _)| *pos)
    }

    /// Cell id of the most recent play
    pub fn last_cell_id(&self) -> Option<String> {
        self.last_cell_position().map(|pos| pos.cell_id())
    }

    /// Symbol of the most recent play
    pub fn last_player_id(&self) -> Option<&str> {
        self.plays.last().map(|(_, symbol)| symbol.as_str())
    }
}
