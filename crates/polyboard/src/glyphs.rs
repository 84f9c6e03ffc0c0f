//! Text rendering of cell-state asset names.
//!
//! Engines describe cells with asset names such as `OthelloBlack` or
//! `KalahPit7Seeds`. Front ends without images draw each one as a short
//! glyph, padded to a common width per board.

use polyboard_core::BoardView;
use unicode_width::UnicodeWidthStr;

/// Piece family a glyph belongs to, used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// Empty or blank cells.
    Empty,
    /// First player's pieces.
    First,
    /// Second player's pieces.
    Second,
    /// Obstacles.
    Blocked,
    /// Seed counts and other neutral values.
    Neutral,
}

/// Short text for an asset name.
pub fn glyph(asset: &str) -> String {
    if asset == "KalahBlank" {
        return " ".to_string();
    }
    if asset == "KalahPitEmpty" {
        return "0".to_string();
    }
    if asset == "KalahPitManySeeds" {
        return "20+".to_string();
    }
    if let Some(count) = asset
        .strip_prefix("KalahPit")
        .and_then(|rest| rest.strip_suffix("Seeds"))
    {
        return count.to_string();
    }
    if asset.ends_with("Empty") {
        return "·".to_string();
    }

    match asset {
        name if name.ends_with("Blocked") => "#",
        name if name.ends_with("Blue") => "B",
        name if name.ends_with("Red") => "R",
        name if name.ends_with("Black") => "●",
        name if name.ends_with("White") => "○",
        name if name.ends_with("Cross") => "X",
        name if name.ends_with("Nought") => "O",
        _ => "?",
    }
    .to_string()
}

/// Colour family for an asset name.
pub fn tint(asset: &str) -> Tint {
    if asset.ends_with("Empty") || asset == "KalahBlank" {
        Tint::Empty
    } else if asset.starts_with("Kalah") {
        Tint::Neutral
    } else if asset.ends_with("Blocked") {
        Tint::Blocked
    } else if ["Blue", "Black", "Cross"].iter().any(|s| asset.ends_with(s)) {
        Tint::First
    } else {
        Tint::Second
    }
}

/// Display width shared by every cell of a board.
pub fn cell_width(view: &BoardView) -> usize {
    view.asset_names()
        .iter()
        .map(|asset| glyph(asset).width())
        .max()
        .unwrap_or(1)
}

/// Pads `text` on the left to `width` display columns.
pub fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", " ".repeat(fill), text)
}

/// Letter naming a board column.
pub fn file_label(column: usize) -> char {
    char::from(b'A' + (column % 26) as u8)
}

/// Number naming a board row, counted from the bottom.
pub fn rank_label(row: usize, rows: usize) -> usize {
    rows - row
}

/// Name of a cell in move text, such as `B2`.
pub fn square_name(row: usize, column: usize, rows: usize) -> String {
    format!("{}{}", file_label(column), rank_label(row, rows))
}

/// The board as plain lines, with rank and file labels when the variant
/// draws them.
pub fn board_lines(view: &BoardView) -> Vec<String> {
    let (rows, columns) = (*view.rows(), *view.columns());
    let width = cell_width(view);
    let labels = *view.coordinate_labels();
    let rank_width = rows.to_string().len();

    let mut lines = Vec::with_capacity(rows + 1);
    for row in 0..rows {
        let cells: Vec<String> = (0..columns)
            .map(|column| pad(&glyph(view.asset_at(row, column).unwrap_or("")), width))
            .collect();
        let body = cells.join(" ");
        if labels {
            lines.push(format!("{:>rank_width$} {}", rank_label(row, rows), body));
        } else {
            lines.push(body);
        }
    }
    if labels {
        let files: Vec<String> = (0..columns)
            .map(|column| pad(&file_label(column).to_string(), width))
            .collect();
        lines.push(format!("{:>rank_width$} {}", "", files.join(" ")));
    }
    lines
}
