//! Terminal key events to runner input.
//!
//! Terminals that support the keyboard enhancement protocol report real key
//! releases. Everywhere else a held key shows up as a stream of repeated
//! presses, so releases are synthesized once the repeats stop. Jump taps are
//! told apart from that stream by their spacing, so a quick second tap still
//! double jumps.

use crate::runner::RunnerInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};

/// Without release events, a held key counts as released after this long
/// without a repeat. Covers the usual initial auto-repeat delay.
pub const HOLD_TIMEOUT: Duration = Duration::from_millis(550);

/// Without release events, jump presses closer together than this are
/// auto-repeat; anything slower is a fresh tap (a double jump).
pub const REPEAT_GAP: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeldKey {
    Jump,
    Left,
    Right,
}

impl HeldKey {
    const ALL: [HeldKey; 3] = [HeldKey::Jump, HeldKey::Left, HeldKey::Right];

    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => {
                Some(Self::Jump)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Self::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Self::Right),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn pressed(self) -> RunnerInput {
        match self {
            Self::Jump => RunnerInput::JumpPressed,
            Self::Left => RunnerInput::LeftPressed,
            Self::Right => RunnerInput::RightPressed,
        }
    }

    fn released(self) -> RunnerInput {
        match self {
            Self::Jump => RunnerInput::JumpReleased,
            Self::Left => RunnerInput::LeftReleased,
            Self::Right => RunnerInput::RightReleased,
        }
    }
}

/// Tracks held keys and turns raw key events into [`RunnerInput`]s.
#[derive(Debug)]
pub struct KeyTranslator {
    release_events: bool,
    held: [Option<Instant>; 3],
}

impl KeyTranslator {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            held: [None; 3],
        }
    }

    pub fn translate(&mut self, key: &KeyEvent, now: Instant) -> Vec<RunnerInput> {
        let held_key = HeldKey::from_code(key.code);

        match (key.kind, held_key) {
            (KeyEventKind::Release, Some(k)) => {
                if self.held[k.index()].take().is_some() {
                    vec![k.released()]
                } else {
                    Vec::new()
                }
            }
            (KeyEventKind::Release, None) => Vec::new(),
            (KeyEventKind::Repeat, Some(k)) => {
                self.held[k.index()] = Some(now);
                Vec::new()
            }
            (_, Some(k)) => {
                let last = self.held[k.index()].replace(now);
                if self.is_new_press(k, last, now) {
                    vec![k.pressed()]
                } else {
                    Vec::new()
                }
            }
            (KeyEventKind::Repeat, None) => Vec::new(),
            (_, None) => vec![match key.code {
                KeyCode::Char('p') | KeyCode::Char('P') => RunnerInput::Pause,
                KeyCode::Esc => RunnerInput::Forfeit,
                _ => RunnerInput::Other,
            }],
        }
    }

    /// Whether a `Press` for `k` starts a new press rather than repeating
    /// one still held since `last`.
    fn is_new_press(&self, k: HeldKey, last: Option<Instant>, now: Instant) -> bool {
        match last {
            None => true,
            // Repeats arrive as `Repeat` here, so a `Press` is always real
            Some(_) if self.release_events => true,
            Some(since) if k == HeldKey::Jump => now.duration_since(since) >= REPEAT_GAP,
            Some(_) => false,
        }
    }

    /// Synthesize releases for keys that stopped repeating. No-op when the
    /// terminal reports releases itself.
    pub fn expire(&mut self, now: Instant) -> Vec<RunnerInput> {
        if self.release_events {
            return Vec::new();
        }
        let mut released = Vec::new();
        for k in HeldKey::ALL {
            let slot = &mut self.held[k.index()];
            if let Some(since) = *slot {
                if now.duration_since(since) >= HOLD_TIMEOUT {
                    *slot = None;
                    released.push(k.released());
                }
            }
        }
        released
    }

    /// Forget all holds (screen change, restart).
    pub fn reset(&mut self) {
        self.held = [None; 3];
    }
}
