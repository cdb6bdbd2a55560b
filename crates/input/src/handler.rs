//! Held-key tracking for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! while Down is held the terminal keeps sending repeats, and a gap longer than
//! the timeout is treated as a release.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, is_soft_drop_key, repeats};
use crate::types::GameAction;

/// Most actions a single key event or update can produce.
pub const MAX_INPUT_ACTIONS: usize = 2;

pub type InputActions = ArrayVec<GameAction, MAX_INPUT_ACTIONS>;

// Longer than the usual auto-repeat start delay, so a held key is not
// released between its first press and the first repeat.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 600;

/// Turns raw key events into session commands.
#[derive(Debug, Clone)]
pub struct InputHandler {
    soft_drop_held: bool,
    last_soft_drop_at: u64,
    key_release_timeout_ms: u64,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            soft_drop_held: false,
            last_soft_drop_at: 0,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u64 {
        self.key_release_timeout_ms
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// Handle one key event received at `now_ms`.
    pub fn handle_key(&mut self, key: KeyEvent, now_ms: u64) -> InputActions {
        let mut actions = InputActions::new();

        if is_soft_drop_key(key.code) {
            match key.kind {
                KeyEventKind::Release => self.release_soft_drop(&mut actions),
                // Re-sent on every repeat: the session ignores it outside
                // Running and clears it on restart.
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    self.last_soft_drop_at = now_ms;
                    self.soft_drop_held = true;
                    let _ = actions.try_push(GameAction::SoftDropStart);
                }
            }
            return actions;
        }

        let Some(action) = handle_key_event(key) else {
            return actions;
        };
        let fire = match key.kind {
            KeyEventKind::Press => true,
            KeyEventKind::Repeat => repeats(action),
            KeyEventKind::Release => false,
        };
        if fire {
            let _ = actions.try_push(action);
        }
        actions
    }

    /// Auto-release the soft drop when the terminal went quiet.
    pub fn update(&mut self, now_ms: u64) -> InputActions {
        let mut actions = InputActions::new();
        if self.soft_drop_held
            && now_ms.saturating_sub(self.last_soft_drop_at) > self.key_release_timeout_ms
        {
            self.release_soft_drop(&mut actions);
        }
        actions
    }

    fn release_soft_drop(&mut self, actions: &mut InputActions) {
        if self.soft_drop_held {
            self.soft_drop_held = false;
            let _ = actions.try_push(GameAction::SoftDropStop);
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
