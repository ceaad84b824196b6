//! Board rendering for the terminal host.
//!
//! Hex columns are drawn offset: every grid row takes two terminal lines, even
//! columns on the first and odd columns on the second, so each odd column sits
//! half a row lower than its even neighbours.

use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::board::{Position, Tile};
use crate::engine::{Engine, EventSummary};

/// Host state the scene needs besides the engine itself.
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    pub cursor: Position,
    /// Tally of the last activation, if it did anything.
    pub last_move: Option<EventSummary>,
    /// Input is ignored while the last activation is still animating.
    pub busy: bool,
    pub moves: u32,
    /// The last obstacle of the level has fallen.
    pub cleared: bool,
    pub message: Option<String>,
}

/// Render the board scene.
pub fn render_board<R: Rng>(frame: &mut Frame, area: Rect, engine: &Engine<R>, view: &BoardView) {
    frame.render_widget(Clear, area);

    // Split: grid on left, info panel on right (28 chars wide)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(28)])
        .split(area);

    render_grid(frame, chunks[0], engine, view);
    render_info_panel(frame, chunks[1], engine, view);

    if view.cleared {
        render_cleared_overlay(frame, chunks[0]);
    }
}

fn render_grid<R: Rng>(frame: &mut Frame, area: Rect, engine: &Engine<R>, view: &BoardView) {
    let title = match engine.level() {
        Some(level) => format!(" {} ", level.name()),
        None => " Custom ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grid = engine.grid();
    // Each cell is 2 chars wide; each grid row takes two lines.
    let grid_width = (grid.cols() * 2) as u16;
    let grid_height = (grid.rows() * 2 + 1) as u16;

    let x_offset = inner.x + (inner.width.saturating_sub(grid_width)) / 2;
    let y_offset = inner.y + (inner.height.saturating_sub(grid_height)) / 2;

    for line_idx in 0..grid.rows() * 2 + 1 {
        let mut spans = Vec::with_capacity(grid.cols());
        for col in 0..grid.cols() {
            // Odd columns are drawn one line lower.
            let shifted = line_idx.checked_sub(col % 2);
            let row = match shifted {
                Some(l) if l % 2 == 0 && l / 2 < grid.rows() => Some(l / 2),
                _ => None,
            };

            let span = match row {
                Some(row) => {
                    let pos = Position::new(row, col);
                    let (text, mut style) = cell_display(grid.get(pos));
                    if view.cursor == pos {
                        style = style.bg(Color::DarkGray);
                    }
                    Span::styled(text, style)
                }
                None => Span::raw("  "),
            };
            spans.push(span);
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_offset, y_offset + line_idx as u16, grid_width, 1),
        );
    }
}

/// Display text and style for a cell.
fn cell_display(tile: Option<&Tile>) -> (&'static str, Style) {
    match tile {
        None => (". ", Style::default().fg(Color::DarkGray)),
        Some(Tile::Colored { color, .. }) => ("● ", Style::default().fg(color_for(*color))),
        Some(Tile::Bomb { .. }) => (
            "✹ ",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ),
        Some(tile @ Tile::Obstacle { .. }) => {
            let ratio = tile.durability_ratio().unwrap_or(1.0);
            ("▓ ", Style::default().fg(obstacle_color(ratio)))
        }
    }
}

fn color_for(color: u8) -> Color {
    match color {
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Blue,
        4 => Color::Yellow,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::White,
    }
}

/// Fades from a cracked brown towards solid grey as health rises.
fn obstacle_color(ratio: f32) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    let lerp = |from: u8, to: u8| (from as f32 + (to as f32 - from as f32) * ratio) as u8;
    Color::Rgb(lerp(120, 200), lerp(70, 200), lerp(40, 200))
}

fn render_info_panel<R: Rng>(frame: &mut Frame, area: Rect, engine: &Engine<R>, view: &BoardView) {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let config = engine.config();

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Hexfall",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Grid: ", label),
            Span::styled(format!("{}x{}", config.rows, config.cols), value),
        ]),
        Line::from(vec![
            Span::styled("Min match: ", label),
            Span::styled(config.minimum_match_count.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Moves: ", label),
            Span::styled(view.moves.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Obstacles: ", label),
            Span::styled(engine.obstacles_remaining().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Bombs: ", label),
            Span::styled(engine.grid().bomb_count().to_string(), value),
        ]),
        Line::from(""),
    ];

    if let Some(ratio) = engine.obstacle_health(view.cursor) {
        lines.push(Line::from(vec![
            Span::styled("Obstacle health: ", label),
            Span::styled(
                format!("{:.0}%", ratio * 100.0),
                Style::default().fg(obstacle_color(ratio)),
            ),
        ]));
    }

    if let Some(summary) = view.last_move {
        lines.push(Line::from(vec![
            Span::styled("Cleared: ", label),
            Span::styled(summary.destroyed.to_string(), value),
        ]));
        if summary.exploded > 0 {
            lines.push(Line::from(Span::styled(
                format!("Chain of {}!", summary.exploded),
                Style::default().fg(Color::LightRed),
            )));
        }
        if summary.spawned_bombs > 0 {
            lines.push(Line::from(Span::styled(
                "Bomb spawned",
                Style::default().fg(Color::LightRed),
            )));
        }
    }

    if let Some(message) = &view.message {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::LightYellow),
        )));
    }

    lines.push(Line::from(""));
    let status = if view.busy {
        Span::styled("Settling...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("Ready", Style::default().fg(Color::Green))
    };
    lines.push(Line::from(status));
    lines.push(Line::from(""));

    for hint in [
        "[Arrows] Move",
        "[Enter] Activate",
        "[N/P] Next/prev level",
        "[R] Restart",
        "[Q] Quit",
    ] {
        lines.push(Line::from(Span::styled(hint, label)));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_cleared_overlay(frame: &mut Frame, area: Rect) {
    let width = 30;
    let height = 5;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let lines = vec![
        Line::from(Span::styled(
            "Level Cleared!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[N] Next level",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
