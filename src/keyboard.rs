//! Held-key tracking on top of crossterm key events.
//!
//! Terminals report presses (and, with keyboard enhancement, repeats and
//! releases) but have no key-state query.  A key counts as held if its last
//! press or repeat arrived within `HOLD_WINDOW` polls; a release event drops
//! it immediately when the terminal sends one.

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use boom::surface::{InputEvent, Key};

/// Covers terminals without release events: OS key repeat is at least
/// 15 Hz, so four ~30 ms frames are refreshed before they expire.
const HOLD_WINDOW: u64 = 4;

#[derive(Debug, Default)]
pub struct Keyboard {
    /// Each held key → the poll it was last seen on.
    key_frame: HashMap<Key, u64>,
    frame: u64,
    /// Latest terminal size reported since the last `take_resize`.
    resized: Option<(u16, u16)>,
}

impl Keyboard {
    /// Drain every pending terminal event without blocking.
    pub fn poll(&mut self) -> std::io::Result<Vec<InputEvent>> {
        self.frame += 1;
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Some(input) = self.handle(event::read()?) {
                events.push(input);
            }
        }
        Ok(events)
    }

    /// New terminal size, if one arrived since the last call.
    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resized.take()
    }

    fn handle(&mut self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key_event) => self.record(key_event),
            Event::Resize(cols, rows) => {
                self.resized = Some((cols, rows));
                None
            }
            _ => None,
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn record(&mut self, KeyEvent { code, kind, modifiers, .. }: KeyEvent) -> Option<InputEvent> {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Some(InputEvent::Quit);
        }
        let key = map_key(code)?;
        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(key, self.frame);
                Some(InputEvent::KeyDown(key))
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(key, self.frame);
                None
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&key);
                None
            }
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Key::W,
        KeyCode::Char('a') | KeyCode::Char('A') => Key::A,
        KeyCode::Char('s') | KeyCode::Char('S') => Key::S,
        KeyCode::Char('d') | KeyCode::Char('D') => Key::D,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };
    Some(key)
}
