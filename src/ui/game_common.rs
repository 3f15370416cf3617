//! Screen chrome shared by the menu and the run screen: the bordered split,
//! the key hint bar, the side panel and the end-of-run card.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub const TITLE: &str = " Hopper ";
pub const ACCENT: Color = Color::LightGreen;
pub const SIDE_PANEL_WIDTH: u16 = 22;
const HINT_ROWS: u16 = 2;
const MIN_FIELD_COLS: u16 = 20;

/// A key and what it does, e.g. `("[P]", "Pause")`.
pub type KeyHint = (&'static str, &'static str);

/// Areas inside the outer border.
///
/// ```text
/// ┌─ Hopper ────────────────────────┬─ Info ──────┐
/// │ field                           │ side        │
/// │                                 │             │
/// │ hints (2 rows)                  │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub struct ScreenAreas {
    pub field: Rect,
    pub hints: Rect,
    pub side: Rect,
}

/// Clear `area`, draw the outer border and carve it into field, hint bar and
/// side panel. The side panel gives way first on narrow terminals.
pub fn split_screen(frame: &mut Frame, area: Rect) -> ScreenAreas {
    frame.render_widget(Clear, area);
    let outer = Block::default()
        .title(TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let side_width = SIDE_PANEL_WIDTH.min(inner.width.saturating_sub(MIN_FIELD_COLS));
    let left_width = inner.width - side_width;
    let hint_rows = HINT_ROWS.min(inner.height);
    let field_rows = inner.height - hint_rows;

    ScreenAreas {
        field: Rect::new(inner.x, inner.y, left_width, field_rows),
        hints: Rect::new(inner.x, inner.y + field_rows, left_width, hint_rows),
        side: Rect::new(inner.x + left_width, inner.y, side_width, inner.height),
    }
}

/// Status message over a row of key hints.
#[derive(Debug, Clone, Copy)]
pub struct HintBar {
    pub message: &'static str,
    pub color: Color,
    pub keys: &'static [KeyHint],
}

pub const FORFEIT_BAR: HintBar = HintBar {
    message: "Forfeit run?",
    color: Color::Red,
    keys: &[("[Esc]", "Confirm"), ("[Any]", "Cancel")],
};

pub fn render_hint_bar(frame: &mut Frame, area: Rect, bar: &HintBar) {
    if area.height == 0 {
        return;
    }

    let mut keys = Vec::with_capacity(bar.keys.len() * 3);
    for (i, (key, action)) in bar.keys.iter().enumerate() {
        if i > 0 {
            keys.push(Span::raw("  "));
        }
        keys.push(Span::styled(*key, Style::default().fg(Color::White)));
        keys.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let lines = vec![
        Line::from(Span::styled(bar.message, Style::default().fg(bar.color))),
        Line::from(keys),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Bordered " Info " panel holding `lines`.
pub fn render_side_panel(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    if area.width == 0 {
        return;
    }
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// `label: value` row for the side panel.
pub fn stat_line(label: &str, value: impl Into<String>, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value.into(), Style::default().fg(color)),
    ])
}

/// Full-screen card shown once a run is over: a bold title, body lines and
/// the keys that lead on, vertically centred.
pub fn render_run_card(
    frame: &mut Frame,
    area: Rect,
    color: Color,
    title: &str,
    body: &[String],
    keys: &str,
) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for text in body {
        lines.push(Line::from(Span::styled(
            text.clone(),
            Style::default().fg(Color::White),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        keys.to_string(),
        Style::default().fg(Color::DarkGray),
    )));

    let height = (lines.len() as u16).min(inner.height);
    let top = inner.y + (inner.height - height) / 2;
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect::new(inner.x, top, inner.width, height),
    );
}
