//! Stateless rendering of the terminal UI.

use super::app::TuiApp;
use crate::glyphs::{self, Tint};
use polyboard_core::BoardView;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const INPUT_PROMPT: &str = "> ";

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Board and log
            Constraint::Length(3), // Status
            Constraint::Length(3), // Input
        ])
        .split(frame.area());

    let title = Paragraph::new(app.title().as_str())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);
    draw_board(frame, body[0], app);
    draw_log(frame, body[1], app);

    let status = Paragraph::new(app.status().as_str())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    draw_input(frame, chunks[3], app);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let block = Block::default()
        .title(" Board ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(view) = app.board() else {
        return;
    };
    let lines = board_lines(view, *app.cursor(), *app.mark());
    let width = lines.iter().map(Line::width).max().unwrap_or_default() as u16;
    let height = lines.len() as u16;

    let board = Paragraph::new(lines);
    frame.render_widget(board, center_rect(inner, width, height));
}

fn board_lines(
    view: &BoardView,
    cursor: (usize, usize),
    mark: Option<(usize, usize)>,
) -> Vec<Line<'static>> {
    let (rows, columns) = (*view.rows(), *view.columns());
    let width = glyphs::cell_width(view);
    let labels = *view.coordinate_labels();
    let rank_width = rows.to_string().len();
    let label_style = Style::default().fg(Color::DarkGray);

    let mut lines = Vec::with_capacity(rows + 1);
    for row in 0..rows {
        let mut spans = Vec::with_capacity(columns + 1);
        if labels {
            spans.push(Span::styled(
                format!("{:>rank_width$} ", glyphs::rank_label(row, rows)),
                label_style,
            ));
        }
        for column in 0..columns {
            let asset = view.asset_at(row, column).unwrap_or_default();
            let mut style = tint_style(glyphs::tint(asset));
            if (row, column) == cursor {
                style = style.bg(Color::White).fg(Color::Black);
            } else if Some((row, column)) == mark {
                style = style.bg(Color::Yellow).fg(Color::Black);
            }
            spans.push(Span::styled(
                format!(" {} ", glyphs::pad(&glyphs::glyph(asset), width)),
                style,
            ));
        }
        lines.push(Line::from(spans));
    }

    if labels {
        let mut files = format!("{:>rank_width$} ", "");
        for column in 0..columns {
            files.push_str(&format!(
                " {} ",
                glyphs::pad(&glyphs::file_label(column).to_string(), width)
            ));
        }
        lines.push(Line::from(Span::styled(files, label_style)));
    }
    lines
}

fn tint_style(tint: Tint) -> Style {
    match tint {
        Tint::Empty => Style::default().fg(Color::DarkGray),
        Tint::First => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        Tint::Second => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Tint::Blocked => Style::default().fg(Color::Gray),
        Tint::Neutral => Style::default().fg(Color::Yellow),
    }
}

fn draw_log(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = app.log().len().saturating_sub(visible);
    let lines: Vec<Line> = app.log()[start..]
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();

    let log = Paragraph::new(lines).block(Block::default().title(" Log ").borders(Borders::ALL));
    frame.render_widget(log, area);
}

fn draw_input(frame: &mut Frame, area: Rect, app: &TuiApp) {
    let hint = match *app.mark() {
        Some((row, column)) => {
            let rows = app.board().as_ref().map(|b| *b.rows()).unwrap_or_default();
            format!(
                " From {} - Space on target, Backspace to cancel ",
                glyphs::square_name(row, column, rows)
            )
        }
        None => " Move or :command - Enter submits, Tab next game, Esc quits ".to_string(),
    };
    let input = Paragraph::new(format!("{}{}", INPUT_PROMPT, app.input()))
        .block(Block::default().title(hint).borders(Borders::ALL));
    frame.render_widget(input, area);

    let typed = (INPUT_PROMPT.width() + app.input().width()) as u16;
    frame.set_cursor_position((area.x + 1 + typed, area.y + 1));
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
