use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    Quit,
    None,
}

/// Keys understood by the spectator list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectatorKey {
    Next,
    Previous,
    Watch,
    Refresh,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if is_interrupt(&key) {
            return KeyAction::Quit;
        }

        if let Some(direction) = steering(key.code) {
            return KeyAction::Game(Command::Turn(direction));
        }

        match key.code {
            KeyCode::Char(' ') => KeyAction::Game(Command::TogglePause),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'p' => KeyAction::Game(Command::TogglePause),
                'r' => KeyAction::Game(Command::Restart),
                'q' => KeyAction::Quit,
                _ => KeyAction::None,
            },
            KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    pub fn handle_spectator_key(&self, key: KeyEvent) -> SpectatorKey {
        if is_interrupt(&key) {
            return SpectatorKey::Quit;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => SpectatorKey::Next,
            KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => SpectatorKey::Previous,
            KeyCode::Enter | KeyCode::Char(' ') => SpectatorKey::Watch,
            KeyCode::Char('r') | KeyCode::Char('R') => SpectatorKey::Refresh,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => SpectatorKey::Quit,
            _ => SpectatorKey::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Arrow keys and WASD, either case
fn steering(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_steering_keys() {
        let handler = InputHandler::new();
        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Char('W'), Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Char('s'), Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Char('A'), Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('d'), Direction::Right),
        ];

        for (code, direction) in cases {
            assert_eq!(
                handler.handle_key_event(press(code)),
                KeyAction::Game(Command::Turn(direction)),
                "{:?}",
                code
            );
        }
    }

    #[test]
    fn test_pause_and_restart() {
        let handler = InputHandler::new();

        for code in [KeyCode::Char(' '), KeyCode::Char('p'), KeyCode::Char('P')] {
            assert_eq!(
                handler.handle_key_event(press(code)),
                KeyAction::Game(Command::TogglePause)
            );
        }
        for code in [KeyCode::Char('r'), KeyCode::Char('R')] {
            assert_eq!(
                handler.handle_key_event(press(code)),
                KeyAction::Game(Command::Restart)
            );
        }
    }

    #[test]
    fn test_quit_and_interrupt() {
        let handler = InputHandler::new();

        for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
            assert_eq!(handler.handle_key_event(press(code)), KeyAction::Quit);
        }

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
        assert_eq!(handler.handle_spectator_key(ctrl_c), SpectatorKey::Quit);

        // Plain 'c' is not bound
        assert_eq!(handler.handle_key_event(press(KeyCode::Char('c'))), KeyAction::None);
    }

    #[test]
    fn test_spectator_keys() {
        let handler = InputHandler::new();
        let cases = [
            (KeyCode::Tab, SpectatorKey::Next),
            (KeyCode::Down, SpectatorKey::Next),
            (KeyCode::Up, SpectatorKey::Previous),
            (KeyCode::BackTab, SpectatorKey::Previous),
            (KeyCode::Enter, SpectatorKey::Watch),
            (KeyCode::Char(' '), SpectatorKey::Watch),
            (KeyCode::Char('r'), SpectatorKey::Refresh),
            (KeyCode::Esc, SpectatorKey::Quit),
            (KeyCode::Char('w'), SpectatorKey::None),
        ];

        for (code, expected) in cases {
            assert_eq!(handler.handle_spectator_key(press(code)), expected, "{:?}", code);
        }
    }
}
