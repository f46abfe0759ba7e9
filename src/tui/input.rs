// Keyboard input handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A keystroke as seen by the image window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A printable character, handed to the action resolver
    Char(char),
    /// Ctrl+C; raw mode turns it into a key event instead of a signal
    Interrupt,
    /// Anything else (arrows, function keys, key releases)
    Ignored,
}

/// Maps keyboard events to window input
pub fn handle_key_event(key: KeyEvent) -> KeyInput {
    if key.kind != KeyEventKind::Press {
        return KeyInput::Ignored;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyInput::Interrupt,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            KeyInput::Char(c)
        }
        _ => KeyInput::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    #[test]
    fn test_plain_characters() {
        let key = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyInput::Char('m'));

        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyInput::Char('x'));
    }

    #[test]
    fn test_shifted_characters() {
        let key = KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(key), KeyInput::Char('C'));
    }

    #[test]
    fn test_ctrl_c_interrupts() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key), KeyInput::Interrupt);
    }

    #[test]
    fn test_other_keys_ignored() {
        for code in [KeyCode::Left, KeyCode::Enter, KeyCode::Esc, KeyCode::F(1)] {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), KeyInput::Ignored);
        }

        let key = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::ALT);
        assert_eq!(handle_key_event(key), KeyInput::Ignored);
    }

    #[test]
    fn test_release_events_ignored() {
        let key = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('m'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(handle_key_event(key), KeyInput::Ignored);
    }
}
