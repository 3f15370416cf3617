use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use hopper::config::{self, Command, Settings};
use hopper::constants::{FRAME_MS, SPRITE_DIR};
use hopper::input::KeyTranslator;
use hopper::logging;
use hopper::menu::DifficultyMenu;
use hopper::runner::{process_input, tick_run, Difficulty, RunPhase, RunnerGame};
use hopper::scores::{record_final_score, JsonScoreStore, ScoreStore};
use hopper::ui::menu_scene::render_menu_screen;
use hopper::ui::runner_scene::{render_runner_screen, ScoreBoard};
use hopper::ui::sprites::SpriteBank;
use hopper::utils::build_info;
use hopper::utils::persistence::data_dir;
use rand::Rng;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::time::{Duration, Instant};

enum Screen {
    Menu(DifficultyMenu),
    Run(Box<RunnerGame>),
}

struct App {
    settings: Settings,
    screen: Screen,
    sprites: SpriteBank,
    store: Option<JsonScoreStore>,
    scores: ScoreBoard,
    keys: KeyTranslator,
    quit: bool,
}

impl App {
    fn new(settings: Settings, skip_menu: bool, release_events: bool) -> Self {
        let store = match JsonScoreStore::new() {
            Ok(store) => Some(store),
            Err(e) => {
                log::warn!("best score will not be saved: {}", e);
                None
            }
        };
        let best = store.as_ref().map_or(0, |s| s.load_best());
        let sprite_dir = data_dir().ok().map(|dir| dir.join(SPRITE_DIR));

        let screen = if skip_menu {
            Screen::Run(Box::new(RunnerGame::new(settings.difficulty, settings.features)))
        } else {
            Screen::Menu(DifficultyMenu::new(settings.difficulty, settings.features))
        };

        Self {
            settings,
            screen,
            sprites: SpriteBank::spawn_loader(sprite_dir),
            store,
            scores: ScoreBoard {
                best,
                new_record: false,
            },
            keys: KeyTranslator::new(release_events),
            quit: false,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.size();
        match &self.screen {
            Screen::Menu(menu) => render_menu_screen(frame, area, menu, self.scores.best),
            Screen::Run(game) => {
                render_runner_screen(frame, area, game, &self.sprites, self.scores)
            }
        }
    }

    fn start_run(&mut self, difficulty: Difficulty) {
        if self.settings.difficulty != difficulty {
            self.settings.difficulty = difficulty;
            if let Err(e) = self.settings.save() {
                log::warn!("could not save settings: {}", e);
            }
        }
        self.scores.new_record = false;
        self.keys.reset();
        self.screen = Screen::Run(Box::new(RunnerGame::new(
            difficulty,
            self.settings.features,
        )));
    }

    fn open_menu(&mut self) {
        self.keys.reset();
        self.screen = Screen::Menu(DifficultyMenu::new(
            self.settings.difficulty,
            self.settings.features,
        ));
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Press
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && key.code == KeyCode::Char('c')
        {
            self.quit = true;
            return;
        }

        match &mut self.screen {
            Screen::Menu(menu) => {
                if key.kind == KeyEventKind::Release {
                    return;
                }
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => menu.navigate_up(),
                    KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => {
                        menu.navigate_down()
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        let difficulty = menu.selected_difficulty();
                        self.start_run(difficulty);
                    }
                    KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
                    _ => {}
                }
            }
            Screen::Run(game) => {
                if game.phase == RunPhase::GameOver {
                    if key.kind != KeyEventKind::Press || !game.summary_shown {
                        return;
                    }
                    match key.code {
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            let fresh = game.restarted();
                            self.scores.new_record = false;
                            self.keys.reset();
                            self.screen = Screen::Run(Box::new(fresh));
                        }
                        KeyCode::Enter => self.open_menu(),
                        KeyCode::Char('q') => self.quit = true,
                        _ => {}
                    }
                    return;
                }

                if game.phase == RunPhase::Ready
                    && key.kind == KeyEventKind::Press
                    && key.code == KeyCode::Esc
                {
                    self.open_menu();
                    return;
                }

                for input in self.keys.translate(&key, now) {
                    process_input(game, input);
                }
            }
        }
    }

    fn update<R: Rng>(&mut self, dt_ms: u64, now: Instant, rng: &mut R) {
        let Screen::Run(game) = &mut self.screen else {
            return;
        };

        for input in self.keys.expire(now) {
            process_input(game, input);
        }

        let events = tick_run(game, dt_ms, rng);
        if events.summary_ready {
            let final_score = game.score;
            if let Some(store) = &mut self.store {
                match record_final_score(store, final_score) {
                    Ok(true) => {
                        self.scores.best = final_score;
                        self.scores.new_record = true;
                    }
                    Ok(false) => {}
                    Err(e) => log::warn!("could not save best score: {}", e),
                }
            }
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Err(e) = logging::init() {
        eprintln!("Logging disabled: {}", e);
    }

    let (settings, skip_menu) = match config::parse_args(&args, Settings::load()) {
        Ok(Command::Play {
            settings,
            skip_menu,
        }) => (settings, skip_menu),
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Ok(Command::Help) => {
            println!("{}", config::help_text());
            return Ok(());
        }
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Run 'hopper --help' for usage.");
            std::process::exit(1);
        }
    };

    log::info!("{}", build_info::version_line());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let release_events = matches!(supports_keyboard_enhancement(), Ok(true));
    if release_events {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    log::info!("key release events: {}", release_events);
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(settings, skip_menu, release_events);
    let result = run(&mut terminal, &mut app);

    // Cleanup terminal
    if release_events {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("exiting on error: {}", e);
    }
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let frame_time = Duration::from_millis(FRAME_MS);
    let mut rng = rand::thread_rng();
    let mut last_tick = Instant::now();

    while !app.quit {
        app.sprites.poll();
        terminal.draw(|f| app.draw(f))?;

        let timeout = frame_time.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            loop {
                if let Event::Key(key) = event::read()? {
                    app.handle_key(key, Instant::now());
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        let now = Instant::now();
        let dt_ms = now.duration_since(last_tick).as_millis() as u64;
        last_tick = now;
        app.update(dt_ms, now, &mut rng);
    }

    Ok(())
}
