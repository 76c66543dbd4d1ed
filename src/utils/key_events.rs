use std::{borrow::Cow, ops::Deref};

use crossterm::event::{KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers};

/// Short, lowercase name of a key, as shown in the help footer.
fn key_code_name(code: KeyCode) -> Cow<'static, str> {
    match code {
        KeyCode::Backspace => "backspace".into(),
        KeyCode::Enter => "enter".into(),
        KeyCode::Left => "left".into(),
        KeyCode::Right => "right".into(),
        KeyCode::Up => "up".into(),
        KeyCode::Down => "down".into(),
        KeyCode::Home => "home".into(),
        KeyCode::End => "end".into(),
        KeyCode::PageUp => "pageup".into(),
        KeyCode::PageDown => "pagedown".into(),
        KeyCode::Tab => "tab".into(),
        KeyCode::BackTab => "shift-tab".into(),
        KeyCode::Delete => "delete".into(),
        KeyCode::Insert => "insert".into(),
        KeyCode::Esc => "esc".into(),
        KeyCode::F(n) => format!("f{n}").into(),
        KeyCode::Char(' ') => "space".into(),
        KeyCode::Char(c) => c.to_string().into(),
        _ => "".into(),
    }
}

pub fn key_event_to_string(key_event: &CrosstermKeyEvent) -> String {
    let mut key = String::new();
    for (modifier, name) in [
        (KeyModifiers::CONTROL, "ctrl-"),
        (KeyModifiers::SHIFT, "shift-"),
        (KeyModifiers::ALT, "alt-"),
    ] {
        // BackTab already names its shift
        if key_event.modifiers.intersects(modifier)
            && !(modifier == KeyModifiers::SHIFT && key_event.code == KeyCode::BackTab)
        {
            key.push_str(name);
        }
    }
    key.push_str(&key_code_name(key_event.code));
    key
}

#[derive(Clone, Debug, PartialEq)]
pub struct KeyEvent(pub CrosstermKeyEvent);

impl From<CrosstermKeyEvent> for KeyEvent {
    fn from(key_event: CrosstermKeyEvent) -> Self {
        Self(key_event)
    }
}
impl From<KeyCode> for KeyEvent {
    fn from(key_code: KeyCode) -> Self {
        Self(CrosstermKeyEvent::new(key_code, KeyModifiers::NONE))
    }
}
impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self(CrosstermKeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }
}
impl Deref for KeyEvent {
    type Target = CrosstermKeyEvent;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl std::fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", key_event_to_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(KeyEvent::from('q').to_string(), "q");
        assert_eq!(KeyEvent::from(KeyCode::Char(' ')).to_string(), "space");
        assert_eq!(KeyEvent::from(KeyCode::F(5)).to_string(), "f5");
        assert_eq!(KeyEvent::from(KeyCode::Tab).to_string(), "tab");
    }

    #[test]
    fn modifiers() {
        let ctrl_o = CrosstermKeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL);
        assert_eq!(KeyEvent::from(ctrl_o).to_string(), "ctrl-o");

        let back_tab = CrosstermKeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(KeyEvent::from(back_tab).to_string(), "shift-tab");

        let both = CrosstermKeyEvent::new(
            KeyCode::Left,
            KeyModifiers::CONTROL | KeyModifiers::ALT,
        );
        assert_eq!(key_event_to_string(&both), "ctrl-alt-left");
    }
}
