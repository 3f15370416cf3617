//! Difficulty selection screen.

use super::game_common::{
    render_hint_bar, render_side_panel, split_screen, stat_line, HintBar, ACCENT,
};
use crate::menu::{describe, DifficultyMenu};
use crate::runner::{Difficulty, Features};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_menu_screen(frame: &mut Frame, area: Rect, menu: &DifficultyMenu, best_score: u32) {
    let areas = split_screen(frame, area);

    render_difficulty_selector(frame, areas.field, menu.selected);
    render_hint_bar(frame, areas.hints, &MENU_BAR);
    render_side_panel(frame, areas.side, rules_lines(&menu.features, best_score));
}

const MENU_BAR: HintBar = HintBar {
    message: "Choose a difficulty",
    color: ACCENT,
    keys: &[
        ("[\u{2191}/\u{2193}]", "Select"),
        ("[Enter]", "Start"),
        ("[Q]", "Quit"),
    ],
};

fn render_difficulty_selector(frame: &mut Frame, area: Rect, selected: usize) {
    if area.height < 2 {
        return;
    }
    let title = Paragraph::new("Select difficulty:").style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, Rect { height: 1, ..area });

    // Name + description + blank per option
    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let row_y = area.y + 2 + (i as u16) * 3;
        if row_y + 1 >= area.y + area.height {
            break;
        }

        let is_selected = i == selected;
        let prefix = if is_selected { "> " } else { "  " };
        let name_style = if is_selected {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        let detail_style = if is_selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let name_line = Paragraph::new(Line::from(vec![
            Span::styled(prefix, Style::default().fg(ACCENT)),
            Span::styled(difficulty.name(), name_style),
        ]));
        frame.render_widget(name_line, Rect::new(area.x, row_y, area.width, 1));

        let detail_line = Paragraph::new(Span::styled(
            format!("    {}", describe(*difficulty)),
            detail_style,
        ));
        frame.render_widget(detail_line, Rect::new(area.x, row_y + 1, area.width, 1));
    }
}

fn rules_lines(features: &Features, best_score: u32) -> Vec<Line<'static>> {
    let flag = |on: bool| if on { "on" } else { "off" };
    vec![
        stat_line("Best", best_score.to_string(), Color::White),
        Line::from(""),
        Line::from(Span::styled(
            "Rules:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        stat_line("Double jump", flag(features.double_jump), Color::White),
        stat_line("Lives", flag(features.lives), Color::White),
        stat_line("Scrolling", flag(features.camera_scroll), Color::White),
        stat_line("Carrots", flag(features.collectibles), Color::White),
        stat_line("Steering", flag(features.steering), Color::White),
    ]
}
