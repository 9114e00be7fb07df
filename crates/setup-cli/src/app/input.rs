use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A key press, reduced to what the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

/// One input event delivered to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Key(Key),
    /// Bracketed paste; may contain line breaks.
    Paste(String),
}

impl Input {
    /// Translate a terminal event. Returns `None` for events the session ignores
    /// (releases, mouse, focus, resize).
    pub fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) => Key::from_key_event(key).map(Input::Key),
            Event::Paste(text) => Some(Input::Paste(text.clone())),
            _ => None,
        }
    }
}

impl Key {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        // Windows reports both press and release
        if event.kind != KeyEventKind::Press {
            return None;
        }

        // AltGr arrives as Ctrl+Alt on Windows and produces plain characters
        if event.modifiers.contains(KeyModifiers::CONTROL)
            && !event.modifiers.contains(KeyModifiers::ALT)
        {
            return match event.code {
                KeyCode::Char(c) => Some(Key::Ctrl(c.to_ascii_lowercase())),
                _ => None,
            };
        }

        let key = match event.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Esc,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => return None,
        };
        Some(key)
    }
}
