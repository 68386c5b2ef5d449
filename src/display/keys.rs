/// Held-key tracking for terminals.
///
/// Terminals with keyboard enhancement report Press / Repeat / Release;
/// classic terminals only send repeated Press events while a key is down.
/// `KeyTracker` covers both: a key counts as held until it is released or
/// until no event for it has arrived within the hold window.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use star_shooter::input::{InputFrame, Key};

/// Hold window for terminals that never send Release. Covers the gap
/// between OS key repeats, not the longer delay before the first repeat:
/// a key held through that delay reads as a short tap followed by a
/// fresh press once repeats start.
pub const CLASSIC_HOLD_WINDOW_MS: u64 = 150;

/// Hold window when Release events are reported. Only a lost Release
/// (focus change mid-press) ever reaches it.
pub const ENHANCED_HOLD_WINDOW_MS: u64 = 2_000;

#[derive(Debug)]
pub struct KeyTracker {
    /// Key → time (ms) of its last press or repeat.
    held: HashMap<Key, u64>,
    hold_window_ms: u64,
}

impl KeyTracker {
    pub fn new(hold_window_ms: u64) -> Self {
        Self {
            held: HashMap::new(),
            hold_window_ms,
        }
    }

    /// Fold this tick's raw key events into an `InputFrame`.
    pub fn frame(&mut self, events: impl IntoIterator<Item = KeyEvent>, now: u64) -> InputFrame {
        let mut frame = InputFrame::new();

        for event in events {
            let Some(key) = map_key(&event) else {
                continue;
            };
            match event.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if self.held.insert(key, now).is_none() {
                        frame.pressed.push(key);
                    }
                }
                KeyEventKind::Release => {
                    if self.held.remove(&key).is_some() {
                        frame.released.push(key);
                    }
                }
            }
        }

        let window = self.hold_window_ms;
        let stale: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, last)| now.saturating_sub(**last) > window)
            .map(|(key, _)| *key)
            .collect();
        for key in stale {
            self.held.remove(&key);
            frame.released.push(key);
        }

        frame.held = self.held.keys().copied().collect();
        frame
    }
}

/// Physical key to game key. Letters fold to lowercase; Ctrl+C acts as Esc.
pub fn map_key(event: &KeyEvent) -> Option<Key> {
    match event.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if event.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(Key::Esc)
        }
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::F(n) => Some(Key::F(n)),
        _ => None,
    }
}
