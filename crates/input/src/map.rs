//! Key mapping from terminal events to game actions.

use crate::types::{ActionMode, Direction, GameAction, MenuKey};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input in the mine to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    let KeyCode::Char(c) = key.code else {
        return match key.code {
            KeyCode::Up => Some(GameAction::Move(Direction::Up)),
            KeyCode::Down => Some(GameAction::Move(Direction::Down)),
            KeyCode::Left => Some(GameAction::Move(Direction::Left)),
            KeyCode::Right => Some(GameAction::Move(Direction::Right)),
            _ => None,
        };
    };

    match c.to_ascii_lowercase() {
        // Movement
        'w' => Some(GameAction::Move(Direction::Up)),
        's' => Some(GameAction::Move(Direction::Down)),
        'a' => Some(GameAction::Move(Direction::Left)),
        'd' => Some(GameAction::Move(Direction::Right)),

        // Directional action in the current mode
        'k' => Some(GameAction::Act(Some(Direction::Up))),
        'j' => Some(GameAction::Act(Some(Direction::Down))),
        'h' => Some(GameAction::Act(Some(Direction::Left))),
        'l' => Some(GameAction::Act(Some(Direction::Right))),
        '.' => Some(GameAction::Act(None)),

        // Mode selection
        'c' => Some(GameAction::SelectMode(ActionMode::Dig)),
        'x' => Some(GameAction::SelectMode(ActionMode::PlaceSupport)),
        'z' => Some(GameAction::SelectMode(ActionMode::PlaceLadder)),
        'v' => Some(GameAction::SelectMode(ActionMode::UseDynamite)),

        'o' => Some(GameAction::ToggleAutoDig),
        'f' => Some(GameAction::Wait),

        _ => None,
    }
}

/// Map keyboard input on the surface menu and shop.
pub fn handle_menu_key(key: KeyEvent) -> Option<MenuKey> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(MenuKey::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(MenuKey::Down),
        KeyCode::Enter => Some(MenuKey::Select),
        _ => None,
    }
}

/// Check if key dismisses a message screen.
pub fn is_confirm(key: KeyEvent) -> bool {
    key.code == KeyCode::Enter
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(c: char) -> KeyEvent {
        KeyEvent::from(KeyCode::Char(c))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(key('a')),
            Some(GameAction::Move(Direction::Left))
        );
        assert_eq!(
            handle_key_event(key('D')),
            Some(GameAction::Move(Direction::Right))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::Move(Direction::Up))
        );
        assert_eq!(
            handle_key_event(key('s')),
            Some(GameAction::Move(Direction::Down))
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(key('h')),
            Some(GameAction::Act(Some(Direction::Left)))
        );
        assert_eq!(
            handle_key_event(key('j')),
            Some(GameAction::Act(Some(Direction::Down)))
        );
        assert_eq!(handle_key_event(key('.')), Some(GameAction::Act(None)));
    }

    #[test]
    fn test_mode_keys() {
        assert_eq!(
            handle_key_event(key('z')),
            Some(GameAction::SelectMode(ActionMode::PlaceLadder))
        );
        assert_eq!(
            handle_key_event(key('x')),
            Some(GameAction::SelectMode(ActionMode::PlaceSupport))
        );
        assert_eq!(
            handle_key_event(key('c')),
            Some(GameAction::SelectMode(ActionMode::Dig))
        );
        assert_eq!(
            handle_key_event(key('v')),
            Some(GameAction::SelectMode(ActionMode::UseDynamite))
        );
        assert_eq!(handle_key_event(key('o')), Some(GameAction::ToggleAutoDig));
        assert_eq!(handle_key_event(key('f')), Some(GameAction::Wait));
        assert_eq!(handle_key_event(key('m')), None);
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(handle_menu_key(key('k')), Some(MenuKey::Up));
        assert_eq!(handle_menu_key(key('j')), Some(MenuKey::Down));
        assert_eq!(
            handle_menu_key(KeyEvent::from(KeyCode::Enter)),
            Some(MenuKey::Select)
        );
        assert_eq!(handle_menu_key(key('w')), None);
        assert!(is_confirm(KeyEvent::from(KeyCode::Enter)));
        assert!(!is_confirm(key(' ')));
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(key('q')));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(key('c')));
    }
}
