//! ASCII sprites, loaded off the frame loop.
//!
//! Built-in art ships with the binary. A file named after the sprite in the
//! override directory (`~/.hopper/sprites/player_run_0.txt`, ...) replaces it.
//! Loading runs on a background thread; every frame the bank drains whatever
//! has arrived. A slot that is not `Ready` is drawn as a flat rectangle.

use ratatui::style::Color;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

const PLAYER_RUN_0: &str = "\
(\\_/)
(o.o)
/   \\";

const PLAYER_RUN_1: &str = "\
(\\_/)
(o.o)
 | | ";

const PLAYER_JUMP: &str = "\
(\\_/)
(^.^)
/> <\\";

const CARROT: &str = "\
\\|/
\\#/
 V ";

const OBSTACLE: &str = "\
/##\\
|##|
|##|";

const HILLS: &str = "\
      /\\           /\\
  /\\ /  \\    /\\   /  \\
 /  \\    \\  /  \\_/    \\";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    PlayerRun0,
    PlayerRun1,
    PlayerJump,
    Carrot,
    Obstacle,
    Hills,
}

impl SpriteId {
    pub const ALL: [SpriteId; 6] = [
        SpriteId::PlayerRun0,
        SpriteId::PlayerRun1,
        SpriteId::PlayerJump,
        SpriteId::Carrot,
        SpriteId::Obstacle,
        SpriteId::Hills,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Override file name.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::PlayerRun0 => "player_run_0.txt",
            Self::PlayerRun1 => "player_run_1.txt",
            Self::PlayerJump => "player_jump.txt",
            Self::Carrot => "carrot.txt",
            Self::Obstacle => "obstacle.txt",
            Self::Hills => "hills.txt",
        }
    }

    /// Sprite color, also used for the flat-rectangle fallback.
    pub fn color(self) -> Color {
        match self {
            Self::PlayerRun0 | Self::PlayerRun1 | Self::PlayerJump => Color::White,
            Self::Carrot => Color::Rgb(255, 140, 0),
            Self::Obstacle => Color::Rgb(140, 110, 80),
            Self::Hills => Color::Rgb(70, 110, 70),
        }
    }

    fn builtin_art(self) -> &'static str {
        match self {
            Self::PlayerRun0 => PLAYER_RUN_0,
            Self::PlayerRun1 => PLAYER_RUN_1,
            Self::PlayerJump => PLAYER_JUMP,
            Self::Carrot => CARROT,
            Self::Obstacle => OBSTACLE,
            Self::Hills => HILLS,
        }
    }
}

/// Character grid. Spaces are transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    rows: Vec<Vec<char>>,
    pub color: Color,
}

impl Sprite {
    /// Parse ASCII art. Rows are right-padded to the widest one.
    pub fn parse(text: &str, color: Color) -> Result<Self, String> {
        let mut rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end_matches('\r').chars().collect())
            .collect();
        while rows.last().is_some_and(|r| r.iter().all(|c| c.is_whitespace())) {
            rows.pop();
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return Err("sprite has no visible characters".to_string());
        }
        for row in &mut rows {
            row.resize(width, ' ');
        }
        Ok(Self { rows, color })
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn char_at(&self, col: usize, row: usize) -> char {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(' ')
    }
}

/// Mirror image of a character for horizontally flipped sprites.
pub fn mirror_char(ch: char) -> char {
    match ch {
        '/' => '\\',
        '\\' => '/',
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteSlot {
    Loading,
    Ready(Sprite),
    Failed,
}

type LoadResult = (SpriteId, Result<Sprite, String>);

/// Read one sprite: the override file if present, else the built-in art.
pub fn load_sprite(id: SpriteId, override_dir: Option<&Path>) -> Result<Sprite, String> {
    if let Some(dir) = override_dir {
        let path = dir.join(id.file_name());
        match fs::read_to_string(&path) {
            Ok(text) => {
                return Sprite::parse(&text, id.color())
                    .map_err(|e| format!("{}: {}", path.display(), e));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(format!("{}: {}", path.display(), e)),
        }
    }
    Sprite::parse(id.builtin_art(), id.color())
}

pub struct SpriteBank {
    slots: Vec<SpriteSlot>,
    receiver: Option<Receiver<LoadResult>>,
}

impl SpriteBank {
    /// Every slot `Loading`, nothing in flight.
    pub fn empty() -> Self {
        Self {
            slots: vec![SpriteSlot::Loading; SpriteId::ALL.len()],
            receiver: None,
        }
    }

    /// Built-in art, loaded synchronously.
    pub fn builtin() -> Self {
        let mut bank = Self::empty();
        for id in SpriteId::ALL {
            bank.store(id, load_sprite(id, None));
        }
        bank
    }

    /// Start loading on a background thread. Call [`poll`](Self::poll) each
    /// frame to pick up results.
    pub fn spawn_loader(override_dir: Option<PathBuf>) -> Self {
        let mut bank = Self::empty();
        let (sender, receiver) = channel();

        let spawned = thread::Builder::new()
            .name("sprite-loader".to_string())
            .spawn(move || {
                for id in SpriteId::ALL {
                    let result = load_sprite(id, override_dir.as_deref());
                    if sender.send((id, result)).is_err() {
                        return; // bank dropped
                    }
                }
            });

        match spawned {
            Ok(_) => bank.receiver = Some(receiver),
            Err(e) => {
                log::warn!("sprite loader failed to start: {}", e);
                bank.fail_pending();
            }
        }
        bank
    }

    /// Drain finished loads without blocking.
    pub fn poll(&mut self) {
        let Some(receiver) = &self.receiver else {
            return;
        };
        let mut disconnected = false;
        let mut arrived = Vec::new();
        loop {
            match receiver.try_recv() {
                Ok(result) => arrived.push(result),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }
        for (id, result) in arrived {
            self.store(id, result);
        }
        if disconnected {
            self.receiver = None;
            self.fail_pending();
        }
    }

    fn store(&mut self, id: SpriteId, result: Result<Sprite, String>) {
        let slot = match result {
            Ok(sprite) => {
                log::debug!("sprite {:?} loaded", id);
                SpriteSlot::Ready(sprite)
            }
            Err(e) => {
                log::warn!("sprite {:?} failed to load: {}", id, e);
                SpriteSlot::Failed
            }
        };
        self.slots[id.index()] = slot;
    }

    fn fail_pending(&mut self) {
        for slot in &mut self.slots {
            if *slot == SpriteSlot::Loading {
                *slot = SpriteSlot::Failed;
            }
        }
    }

    pub fn slot(&self, id: SpriteId) -> &SpriteSlot {
        &self.slots[id.index()]
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        match self.slot(id) {
            SpriteSlot::Ready(sprite) => Some(sprite),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.slots.iter().any(|s| *s == SpriteSlot::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_parse_pads_rows() {
        let sprite = Sprite::parse("ab\nc\n\n", Color::White).unwrap();
        assert_eq!(sprite.width(), 2);
        assert_eq!(sprite.height(), 2);
        assert_eq!(sprite.char_at(1, 1), ' ');
        assert_eq!(sprite.char_at(9, 9), ' ');
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(Sprite::parse("", Color::White).is_err());
        assert!(Sprite::parse("   \n  ", Color::White).is_err());
    }

    #[test]
    fn test_builtin_art_all_parses() {
        let bank = SpriteBank::builtin();
        for id in SpriteId::ALL {
            assert!(bank.get(id).is_some(), "{:?} missing", id);
        }
        assert!(!bank.is_loading());
    }

    #[test]
    fn test_mirror_char() {
        assert_eq!(mirror_char('/'), '\\');
        assert_eq!(mirror_char('('), ')');
        assert_eq!(mirror_char('x'), 'x');
    }

    #[test]
    fn test_override_file_replaces_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("carrot.txt"), "CC\nCC").unwrap();
        let sprite = load_sprite(SpriteId::Carrot, Some(dir.path())).unwrap();
        assert_eq!(sprite.char_at(0, 0), 'C');
        // Missing override falls back to built-in art
        assert!(load_sprite(SpriteId::Obstacle, Some(dir.path())).is_ok());
    }

    #[test]
    fn test_bad_override_fails_slot() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("obstacle.txt"), "   ").unwrap();
        let mut bank = SpriteBank::spawn_loader(Some(dir.path().to_path_buf()));

        let deadline = Instant::now() + Duration::from_secs(5);
        while bank.is_loading() && Instant::now() < deadline {
            bank.poll();
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(*bank.slot(SpriteId::Obstacle), SpriteSlot::Failed);
        assert!(bank.get(SpriteId::PlayerRun0).is_some());
    }

    #[test]
    fn test_empty_bank_stays_loading() {
        let mut bank = SpriteBank::empty();
        bank.poll();
        assert!(bank.is_loading());
        assert!(bank.get(SpriteId::Carrot).is_none());
    }
}
