//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a game action.
///
/// Down only starts the soft drop; [`InputHandler`](crate::InputHandler)
/// issues the matching stop.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDropStart),

        // Rotation and drop
        KeyCode::Char(' ') => Some(GameAction::Rotate),
        KeyCode::Up => Some(GameAction::HardDrop),

        // Session
        KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::PauseToggle),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => Some(GameAction::Start),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(GameAction::ShowRanking),

        _ => None,
    }
}

/// Whether the key is the soft-drop key.
pub fn is_soft_drop_key(code: KeyCode) -> bool {
    code == KeyCode::Down
}

/// Whether holding the key should keep producing the action.
pub fn repeats(action: GameAction) -> bool {
    matches!(action, GameAction::MoveLeft | GameAction::MoveRight)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
