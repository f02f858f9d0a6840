//! Event mapping from terminal input to game input.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::types::GameCommand;

/// One unit of game input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Command(GameCommand),
    /// Left mouse press at a terminal position (column, row); the view decides
    /// which board cell, if any, lies under it.
    Pointer { column: u16, row: u16 },
    Quit,
}

/// Map a key to a game command.
pub fn map_key(key: KeyEvent) -> Option<GameCommand> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameCommand::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameCommand::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameCommand::SoftDrop)
        }

        // Rotation
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(GameCommand::RotateLeft),
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Some(GameCommand::RotateRight),

        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameCommand::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Left button presses only; drags, releases and other buttons are ignored.
pub fn map_mouse(mouse: MouseEvent) -> Option<InputEvent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Pointer {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

/// Map any terminal event. Input is edge-triggered: key repeats and releases
/// produce nothing.
pub fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if should_quit(*key) {
                Some(InputEvent::Quit)
            } else {
                map_key(*key).map(InputEvent::Command)
            }
        }
        Event::Mouse(mouse) => map_mouse(*mouse),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Left)),
            Some(GameCommand::MoveLeft)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Right)),
            Some(GameCommand::MoveRight)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Down)),
            Some(GameCommand::SoftDrop)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('a'))),
            Some(GameCommand::MoveLeft)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('L'))),
            Some(GameCommand::MoveRight)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('j'))),
            Some(GameCommand::SoftDrop)
        );
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('z'))),
            Some(GameCommand::RotateLeft)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('x'))),
            Some(GameCommand::RotateRight)
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Up)),
            Some(GameCommand::RotateRight)
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
        assert_eq!(
            map_event(&Event::Key(KeyEvent::from(KeyCode::Char('q')))),
            Some(InputEvent::Quit)
        );
    }

    #[test]
    fn test_repeats_and_releases_are_ignored() {
        for kind in [KeyEventKind::Repeat, KeyEventKind::Release] {
            let key = KeyEvent {
                code: KeyCode::Left,
                modifiers: KeyModifiers::NONE,
                kind,
                state: KeyEventState::NONE,
            };
            assert_eq!(map_event(&Event::Key(key)), None);
        }
        assert_eq!(
            map_event(&Event::Key(KeyEvent::from(KeyCode::Left))),
            Some(InputEvent::Command(GameCommand::MoveLeft))
        );
    }

    #[test]
    fn test_left_press_is_a_pointer_event() {
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(InputEvent::Pointer { column: 12, row: 7 })
        );
        assert_eq!(map_mouse(mouse(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(map_mouse(mouse(MouseEventKind::Up(MouseButton::Left))), None);
        assert_eq!(map_mouse(mouse(MouseEventKind::Drag(MouseButton::Left))), None);
    }
}
