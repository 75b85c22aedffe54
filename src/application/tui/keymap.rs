use crate::entities::SessionEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the demo view to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Session(SessionEvent),
    ToggleHelp,
    Quit,
    Ignore,
}

/// Map a key press to an action, given the input text currently shown.
///
/// Editing keys become a full replacement text so the session only ever
/// sees text-changed events.
pub fn action_for_key(key: KeyEvent, input: &str) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }

    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') | KeyCode::Char('d') if control => KeyAction::Quit,

        KeyCode::Enter => KeyAction::Session(SessionEvent::SaveRequested),
        KeyCode::Char('l') if control => KeyAction::Session(SessionEvent::HistoryCleared),
        KeyCode::F(1) => KeyAction::ToggleHelp,

        KeyCode::Char('u') if control => text_changed(input, String::new()),
        KeyCode::Char('w') if control => text_changed(input, without_last_word(input)),
        KeyCode::Backspace => {
            let mut text = input.to_string();
            text.pop();
            text_changed(input, text)
        }

        KeyCode::Char(c) if !control && !key.modifiers.contains(KeyModifiers::ALT) => {
            let mut text = input.to_string();
            text.push(c);
            KeyAction::Session(SessionEvent::TextChanged(text))
        }

        _ => KeyAction::Ignore,
    }
}

fn text_changed(input: &str, text: String) -> KeyAction {
    if text == input {
        KeyAction::Ignore
    } else {
        KeyAction::Session(SessionEvent::TextChanged(text))
    }
}

fn without_last_word(input: &str) -> String {
    let trimmed = input.trim_end();
    match trimmed.char_indices().rev().find(|(_, c)| c.is_whitespace()) {
        Some((index, c)) => trimmed[..index + c.len_utf8()].to_string(),
        None => String::new(),
    }
}
