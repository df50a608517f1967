//! Keyboard state polled by the application each update.
use std::collections::HashSet;

use sdl2::keyboard::Keycode;

#[derive(Debug, Default)]
pub struct Input {
    held: HashSet<Keycode>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Keycode) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Keycode) {
        self.held.remove(&key);
    }

    /// Is `key` held right now?
    pub fn is_key_down(&self, key: Keycode) -> bool {
        self.held.contains(&key)
    }

    /// Forget held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}
