//! Runner scene rendering.
//!
//! `render_scene` draws one frame of the world onto any [`RenderSurface`] in
//! a fixed order: sky, hills, ground, player, carrots, obstacles, HUD,
//! overlays. `render_runner_screen` wraps it in the terminal layout with a
//! status bar and info panel.

use super::game_common::{
    render_hint_bar, render_run_card, render_side_panel, split_screen, stat_line, HintBar,
    ACCENT, FORFEIT_BAR,
};
use super::sprites::{SpriteBank, SpriteId};
use super::surface::{CellCanvas, RenderSurface};
use crate::constants::{GROUND_HEIGHT, GROUND_Y, MAX_LIVES, VIEWPORT_WIDTH};
use crate::runner::{Facing, Features, RunPhase, RunnerGame};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

const SKY_COLOR: Color = Color::Rgb(18, 22, 44);
const GROUND_COLOR: Color = Color::Rgb(70, 52, 36);
const GRASS_COLOR: Color = Color::Rgb(60, 120, 50);
const HUD_COLOR: Color = Color::White;
const OVERLAY_COLOR: Color = Color::LightYellow;

const HILLS_WIDTH: f64 = 400.0;
const HILLS_HEIGHT: f64 = 60.0;
const PARALLAX_FACTOR: f64 = 0.3;
const GRASS_HEIGHT: f64 = 6.0;
const BLINK_MS: u64 = 100;

/// Best-score context for the HUD and the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub best: u32,
    /// The finished run set a new best.
    pub new_record: bool,
}

/// Draw one frame of the world.
pub fn render_scene<S: RenderSurface>(
    surface: &mut S,
    game: &RunnerGame,
    sprites: &SpriteBank,
    scores: ScoreBoard,
) {
    draw_sky(surface);
    draw_hills(surface, game, sprites);
    draw_ground(surface);
    draw_player(surface, game, sprites);
    draw_carrots(surface, game, sprites);
    draw_obstacles(surface, game, sprites);
    draw_hud(surface, game, scores);
    draw_overlays(surface, game);
}

/// Sprite if loaded, flat rectangle otherwise.
#[allow(clippy::too_many_arguments)]
fn draw_slot<S: RenderSurface>(
    surface: &mut S,
    sprites: &SpriteBank,
    id: SpriteId,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    opacity: f64,
    flip: bool,
) {
    match sprites.get(id) {
        Some(sprite) => surface.draw_sprite(sprite, x, y, width, height, opacity, flip),
        None if opacity > 0.0 => surface.fill_rect(x, y, width, height, id.color()),
        None => {}
    }
}

fn draw_sky<S: RenderSurface>(surface: &mut S) {
    surface.fill_rect(0.0, 0.0, VIEWPORT_WIDTH, GROUND_Y, SKY_COLOR);
}

fn draw_hills<S: RenderSurface>(surface: &mut S, game: &RunnerGame, sprites: &SpriteBank) {
    let offset = (game.camera.x * PARALLAX_FACTOR) % HILLS_WIDTH;
    let y = GROUND_Y - HILLS_HEIGHT;
    let mut x = -offset;
    while x < VIEWPORT_WIDTH {
        draw_slot(
            surface,
            sprites,
            SpriteId::Hills,
            x,
            y,
            HILLS_WIDTH,
            HILLS_HEIGHT,
            1.0,
            false,
        );
        x += HILLS_WIDTH;
    }
}

fn draw_ground<S: RenderSurface>(surface: &mut S) {
    surface.fill_rect(0.0, GROUND_Y, VIEWPORT_WIDTH, GROUND_HEIGHT, GROUND_COLOR);
    surface.fill_rect(0.0, GROUND_Y, VIEWPORT_WIDTH, GRASS_HEIGHT, GRASS_COLOR);
}

/// Blink at 10 Hz while invulnerable.
fn player_opacity(game: &RunnerGame) -> f64 {
    let player = &game.player;
    if !player.invulnerable {
        return 1.0;
    }
    let elapsed = game.clock_ms.saturating_sub(player.invulnerable_since_ms);
    if (elapsed / BLINK_MS) % 2 == 0 {
        0.4
    } else {
        0.0
    }
}

fn draw_player<S: RenderSurface>(surface: &mut S, game: &RunnerGame, sprites: &SpriteBank) {
    let player = &game.player;
    let id = if !player.is_on_ground() {
        SpriteId::PlayerJump
    } else if player.anim_frame == 0 {
        SpriteId::PlayerRun0
    } else {
        SpriteId::PlayerRun1
    };
    draw_slot(
        surface,
        sprites,
        id,
        game.camera.to_screen_x(player.x),
        player.y,
        player.width,
        player.height,
        player_opacity(game),
        player.facing == Facing::Left,
    );
}

fn draw_carrots<S: RenderSurface>(surface: &mut S, game: &RunnerGame, sprites: &SpriteBank) {
    for carrot in game.carrots.iter().filter(|c| !c.collected) {
        draw_slot(
            surface,
            sprites,
            SpriteId::Carrot,
            game.camera.to_screen_x(carrot.x),
            carrot.y,
            carrot.size,
            carrot.size,
            1.0,
            false,
        );
    }
}

fn draw_obstacles<S: RenderSurface>(surface: &mut S, game: &RunnerGame, sprites: &SpriteBank) {
    for obstacle in &game.obstacles {
        draw_slot(
            surface,
            sprites,
            SpriteId::Obstacle,
            game.camera.to_screen_x(obstacle.x),
            obstacle.y,
            obstacle.width,
            obstacle.height,
            1.0,
            false,
        );
    }
}

pub fn hud_text(game: &RunnerGame, scores: ScoreBoard) -> String {
    let mut text = format!(
        "Score {}  Best {}  Level {}",
        game.score,
        scores.best.max(game.score),
        game.level
    );
    if game.features.lives {
        let hearts: String = "\u{2665}".repeat(game.player.lives as usize);
        text.push_str(&format!("  Lives {}", hearts));
    }
    text
}

fn draw_hud<S: RenderSurface>(surface: &mut S, game: &RunnerGame, scores: ScoreBoard) {
    surface.draw_text(&hud_text(game, scores), 10.0, 5.0, HUD_COLOR);
}

/// Overlay message for the current phase, if any.
pub fn overlay_text(game: &RunnerGame) -> Option<String> {
    if game.forfeit_pending {
        return Some("Forfeit? Esc again to confirm".to_string());
    }
    if game.paused {
        return Some("PAUSED".to_string());
    }
    match game.phase {
        RunPhase::Ready => Some("Press Space to start".to_string()),
        RunPhase::LevelTransition => Some(format!("Level {}  ...{}", game.level, game.countdown)),
        RunPhase::GameOver if !game.summary_shown => Some("GAME OVER".to_string()),
        _ => None,
    }
}

fn draw_overlays<S: RenderSurface>(surface: &mut S, game: &RunnerGame) {
    if let Some(text) = overlay_text(game) {
        let x = (VIEWPORT_WIDTH - surface.text_width(&text)).max(0.0) / 2.0;
        surface.draw_text(&text, x, GROUND_Y / 2.0, OVERLAY_COLOR);
    }
}

/// Render the full runner screen: play field, status bar and info panel, or
/// the summary once the run is over.
pub fn render_runner_screen(
    frame: &mut Frame,
    area: Rect,
    game: &RunnerGame,
    sprites: &SpriteBank,
    scores: ScoreBoard,
) {
    if game.summary_shown {
        render_summary(frame, area, game, scores);
        return;
    }

    let areas = split_screen(frame, area);

    let mut canvas = CellCanvas::new(areas.field.width, areas.field.height);
    render_scene(&mut canvas, game, sprites, scores);
    canvas.render(frame, areas.field);

    render_hint_bar(frame, areas.hints, &hint_bar(game));
    render_side_panel(frame, areas.side, side_panel_lines(game, scores));
}

const READY_BAR: HintBar = HintBar {
    message: "Ready",
    color: ACCENT,
    keys: &[("[Space/Up]", "Start"), ("[Esc]", "Menu")],
};

const GAME_OVER_BAR: HintBar = HintBar {
    message: "Game over",
    color: Color::Red,
    keys: &[("[R]", "Restart"), ("[Enter]", "Menu")],
};

const PAUSED_BAR: HintBar = HintBar {
    message: "Paused",
    color: Color::Yellow,
    keys: &[("[P]", "Resume"), ("[Esc]", "Forfeit")],
};

const RUNNING_BAR: HintBar = HintBar {
    message: "Run!",
    color: ACCENT,
    keys: &[
        ("[Space/Up]", "Jump"),
        ("[\u{2190}/\u{2192}]", "Move"),
        ("[P]", "Pause"),
        ("[Esc]", "Forfeit"),
    ],
};

fn hint_bar(game: &RunnerGame) -> HintBar {
    if game.forfeit_pending {
        return FORFEIT_BAR;
    }
    match game.phase {
        RunPhase::Ready => READY_BAR,
        RunPhase::GameOver => GAME_OVER_BAR,
        _ if game.paused => PAUSED_BAR,
        _ => RUNNING_BAR,
    }
}

fn side_panel_lines(game: &RunnerGame, scores: ScoreBoard) -> Vec<Line<'static>> {
    let mut lines = vec![
        stat_line("Difficulty", game.difficulty.name(), ACCENT),
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                game.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        stat_line("Best", scores.best.max(game.score).to_string(), Color::White),
        Line::from(""),
        stat_line("Level", game.level.to_string(), Color::White),
        stat_line("Next at", game.level_target().to_string(), Color::DarkGray),
        stat_line("Speed", format!("{:.2}", game.obstacle_speed), Color::White),
        stat_line(
            "Jumps",
            format!("{}/{}", game.player.jumps_used, game.player.max_jumps),
            Color::White,
        ),
    ];

    if game.features.lives {
        lines.push(stat_line(
            "Lives",
            format!("{}/{}", game.player.lives, MAX_LIVES),
            Color::Red,
        ));
    }

    if game.features == Features::classic() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Classic rules",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

fn render_summary(frame: &mut Frame, area: Rect, game: &RunnerGame, scores: ScoreBoard) {
    let (color, record) = if scores.new_record {
        (Color::Green, "New best score!".to_string())
    } else {
        (Color::Red, format!("Best: {}", scores.best))
    };
    let body = [
        format!(
            "Score {} on {} - reached level {}",
            game.score,
            game.difficulty.name(),
            game.level
        ),
        String::new(),
        record,
    ];
    render_run_card(
        frame,
        area,
        color,
        "RUN OVER",
        &body,
        "[R] Restart   [Enter] Menu   [Q] Quit",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{Carrot, Difficulty, Obstacle};
    use crate::ui::sprites::Sprite;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Fill(Color),
        Sprite(Color, bool),
        Text(String),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl RenderSurface for Recorder {
        fn fill_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64, color: Color) {
            self.calls.push(Call::Fill(color));
        }

        fn draw_sprite(
            &mut self,
            sprite: &Sprite,
            _x: f64,
            _y: f64,
            _w: f64,
            _h: f64,
            _opacity: f64,
            flip: bool,
        ) {
            self.calls.push(Call::Sprite(sprite.color, flip));
        }

        fn draw_text(&mut self, text: &str, _x: f64, _y: f64, _color: Color) {
            self.calls.push(Call::Text(text.to_string()));
        }

        fn text_width(&self, text: &str) -> f64 {
            text.len() as f64 * 10.0
        }
    }

    impl Recorder {
        fn position(&self, call: &Call) -> usize {
            self.calls
                .iter()
                .position(|c| c == call)
                .unwrap_or_else(|| panic!("{:?} not drawn in {:?}", call, self.calls))
        }
    }

    fn populated_game() -> RunnerGame {
        let mut game = RunnerGame::new(Difficulty::Normal, Features::default());
        game.phase = RunPhase::Running;
        game.obstacles.push(Obstacle {
            x: 400.0,
            y: GROUND_Y - 100.0,
            width: 50.0,
            height: 100.0,
            speed: 4.0,
            passed: false,
        });
        game.carrots.push(Carrot {
            x: 300.0,
            y: 200.0,
            size: 30.0,
            speed: 2.0,
            collected: false,
        });
        game
    }

    #[test]
    fn test_draw_order() {
        let game = populated_game();
        let mut rec = Recorder::default();
        render_scene(&mut rec, &game, &SpriteBank::builtin(), ScoreBoard::default());

        let sky = rec.position(&Call::Fill(SKY_COLOR));
        let hills = rec.position(&Call::Sprite(SpriteId::Hills.color(), false));
        let ground = rec.position(&Call::Fill(GROUND_COLOR));
        let player = rec.position(&Call::Sprite(SpriteId::PlayerRun0.color(), false));
        let carrot = rec.position(&Call::Sprite(SpriteId::Carrot.color(), false));
        let obstacle = rec.position(&Call::Sprite(SpriteId::Obstacle.color(), false));
        let hud = rec.position(&Call::Text(hud_text(&game, ScoreBoard::default())));

        assert!(sky < hills);
        assert!(hills < ground);
        assert!(ground < player);
        assert!(player < carrot);
        assert!(carrot < obstacle);
        assert!(obstacle < hud);
    }

    #[test]
    fn test_unloaded_sprites_draw_as_rects() {
        let game = populated_game();
        let mut rec = Recorder::default();
        render_scene(&mut rec, &game, &SpriteBank::empty(), ScoreBoard::default());
        assert!(!rec.calls.iter().any(|c| matches!(c, Call::Sprite(..))));
        rec.position(&Call::Fill(SpriteId::Obstacle.color()));
        rec.position(&Call::Fill(SpriteId::Carrot.color()));
    }

    #[test]
    fn test_player_flips_when_facing_left() {
        let mut game = populated_game();
        game.player.facing = Facing::Left;
        let mut rec = Recorder::default();
        render_scene(&mut rec, &game, &SpriteBank::builtin(), ScoreBoard::default());
        rec.position(&Call::Sprite(SpriteId::PlayerRun0.color(), true));
    }

    #[test]
    fn test_collected_carrots_not_drawn() {
        let mut game = populated_game();
        game.carrots[0].collected = true;
        let mut rec = Recorder::default();
        render_scene(&mut rec, &game, &SpriteBank::empty(), ScoreBoard::default());
        assert!(!rec.calls.contains(&Call::Fill(SpriteId::Carrot.color())));
    }

    #[test]
    fn test_invulnerable_player_blinks() {
        let mut game = populated_game();
        game.player.invulnerable = true;
        game.player.invulnerable_since_ms = 1_000;

        game.clock_ms = 1_050;
        assert!(player_opacity(&game) > 0.0 && player_opacity(&game) < 1.0);
        game.clock_ms = 1_150;
        assert_eq!(player_opacity(&game), 0.0);

        game.player.invulnerable = false;
        assert_eq!(player_opacity(&game), 1.0);
    }

    #[test]
    fn test_hud_text() {
        let mut game = populated_game();
        game.score = 7;
        let text = hud_text(
            &game,
            ScoreBoard {
                best: 3,
                new_record: false,
            },
        );
        assert!(text.contains("Score 7"));
        assert!(text.contains("Best 7"));
        assert!(text.contains("Level 1"));
        assert_eq!(text.matches('\u{2665}').count(), 3);

        game.features.lives = false;
        assert!(!hud_text(&game, ScoreBoard::default()).contains("Lives"));
    }

    #[test]
    fn test_overlay_text_by_phase() {
        let mut game = RunnerGame::new(Difficulty::Easy, Features::default());
        assert_eq!(overlay_text(&game).as_deref(), Some("Press Space to start"));

        game.phase = RunPhase::Running;
        assert_eq!(overlay_text(&game), None);

        game.paused = true;
        assert_eq!(overlay_text(&game).as_deref(), Some("PAUSED"));
        game.paused = false;

        game.phase = RunPhase::LevelTransition;
        game.level = 2;
        game.countdown = 3;
        assert!(overlay_text(&game).is_some_and(|t| t.contains("Level 2")));

        game.phase = RunPhase::GameOver;
        assert_eq!(overlay_text(&game).as_deref(), Some("GAME OVER"));
        game.summary_shown = true;
        assert_eq!(overlay_text(&game), None);
    }

    #[test]
    fn test_scene_on_cell_canvas() {
        let game = populated_game();
        let mut canvas = CellCanvas::new(80, 40);
        render_scene(&mut canvas, &game, &SpriteBank::builtin(), ScoreBoard::default());
        assert!(canvas.row_text(0).contains("Score 0"));
        // Ground rows carry the ground color
        assert_eq!(canvas.cell(0, 39).map(|c| c.bg), Some(GROUND_COLOR));
    }

    #[test]
    fn test_hint_bar_follows_state() {
        let mut game = RunnerGame::new(Difficulty::Normal, Features::default());
        assert_eq!(hint_bar(&game).message, "Ready");
        game.phase = RunPhase::Running;
        assert_eq!(hint_bar(&game).message, "Run!");
        game.paused = true;
        assert_eq!(hint_bar(&game).message, "Paused");
        game.forfeit_pending = true;
        assert_eq!(hint_bar(&game).message, FORFEIT_BAR.message);
    }

    #[test]
    fn test_summary_replaces_play_field() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut game = populated_game();
        game.phase = RunPhase::GameOver;
        game.summary_shown = true;
        game.score = 11;
        let scores = ScoreBoard {
            best: 11,
            new_record: true,
        };

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                render_runner_screen(frame, frame.size(), &game, &SpriteBank::builtin(), scores)
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let screen: String = (0..24)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .map(|(x, y)| buffer.get(x, y).symbol().to_string())
            .collect();
        assert!(screen.contains("RUN OVER"));
        assert!(screen.contains("New best score!"));
        assert!(!screen.contains("Info"));
    }
}
