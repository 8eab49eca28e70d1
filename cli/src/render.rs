// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use gridtoe_core::CellPos;

/// Render a board table with row letters and column numbers
pub fn render_board(table: &[Vec<String>]) -> String {
    let cols = table.first().map_or(0, Vec::len);
    let width = table
        .iter()
        .flatten()
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(1)
        .max(1);

    let mut output = String::new();

    // Column labels
    let labels: Vec<String> = (0..cols)
        .map(|col| format!(" {:^width$} ", CellPos::col_label(col as u8)))
        .collect();
    output.push_str("  ");
    output.push_str(&labels.join(" "));
    output.push('\n');

    let separator = vec!["-".repeat(width + 2); cols].join("+");

    for (row, cells) in table.iter().enumerate() {
        if row > 0 {
            output.push_str("  ");
            output.push_str(&separator);
            output.push('\n');
        }
        let cells: Vec<String> = cells
            .iter()
            .map(|cell| format!(" {:^width$} ", cell))
            .collect();
        output.push(CellPos::row_label(row as u8));
        output.push(' ');
        output.push_str(cells.join("|").trim_end());
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_render_empty_3x3_board() {
        let output = render_board(&vec![vec![String::new(); 3]; 3]);
        let lines: Vec<&str> = output.lines().collect();

        // Label row, 3 board rows, 2 separators
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "   1   2   3 ");
        assert_eq!(lines[2], "  ---+---+---");
        assert!(lines[1].starts_with('a'));
        assert!(lines[5].starts_with('c'));
    }

    #[test]
    fn test_render_board_with_symbols() {
        let output = render_board(&table(&[&["X", "", "O"], &["", "X", ""], &["", "", ""]]));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], "a  X |   | O");
        assert_eq!(lines[3], "b    | X |");
    }

    #[test]
    fn test_wide_symbols_widen_every_cell() {
        let output = render_board(&table(&[&["XX", "", ""], &["", "", ""], &["", "", ""]]));
        assert!(output.contains("----+----+----"));
    }

    #[test]
    fn test_rectangular_board() {
        let output = render_board(&vec![vec![String::new(); 5]; 4]);
        assert!(output.lines().next().unwrap_or_default().contains('5'));
        assert_eq!(output.lines().count(), 8);
    }
}
