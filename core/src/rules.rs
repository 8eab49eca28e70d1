// SPDX-License-Identifier: MIT OR Apache-2.0

//! Win and draw rules
//!
//! Only lines through the most recent play are inspected. A run of
//! `win_on` that did not exist before the last move must pass through
//! that move, so it lies inside one of the four segments of length
//! `2 * win_on - 1` centred on it.

use crate::board::{Board, CellPos};

/// Symbol of the player who completed a run with the last play, if any
pub fn winning_symbol(board: &Board) -> Option<&str> {
    let last = board.last_cell_position()?;
    let symbol = board.last_player_id()?;
    let win_on = usize::from(board.win_on());

    let won = board
        .connected_cells_at(last, None)
        .iter()
        .any(|segment| has_run(segment, symbol, win_on));

    if won {
        tracing::debug!(cell = %last, symbol, win_on, "Winning run found");
        Some(symbol)
    } else {
        None
    }
}

/// Whether `segment` holds `symbol` at least `len` times in a row.
///
/// Occupants are compared whole, so a multi-character symbol never
/// matches across a neighbour and blanks always break a run.
pub fn has_run(segment: &[(CellPos, &str)], symbol: &str, len: usize) -> bool {
    if len == 0 {
        return true;
    }
    let mut run = 0;
    for (_, occupant) in segment {
        if *occupant == symbol {
            run += 1;
            if run >= len {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

/// Full board and nobody completed a run
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && winning_symbol(board).is_none()
}
