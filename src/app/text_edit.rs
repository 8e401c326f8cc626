use crossterm::event::{KeyCode, KeyEvent};

/// Result of applying one key to a single-line text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TextEdit {
    /// The text changed; carries the new text and cursor.
    Changed(String, usize),
    /// Only the cursor moved.
    Moved(usize),
    Ignored,
}

/// Apply `key` to `text` with the cursor at char index `cursor`.
pub(crate) fn apply_key(text: &str, cursor: usize, key: &KeyEvent) -> TextEdit {
    let len = text.chars().count();
    let cursor = cursor.min(len);
    match key.code {
        KeyCode::Char(ch) => {
            let mut chars: Vec<char> = text.chars().collect();
            chars.insert(cursor, ch);
            TextEdit::Changed(chars.into_iter().collect(), cursor + 1)
        }
        KeyCode::Backspace if cursor > 0 => {
            let mut chars: Vec<char> = text.chars().collect();
            chars.remove(cursor - 1);
            TextEdit::Changed(chars.into_iter().collect(), cursor - 1)
        }
        KeyCode::Delete if cursor < len => {
            let mut chars: Vec<char> = text.chars().collect();
            chars.remove(cursor);
            TextEdit::Changed(chars.into_iter().collect(), cursor)
        }
        KeyCode::Left if cursor > 0 => TextEdit::Moved(cursor - 1),
        KeyCode::Right if cursor < len => TextEdit::Moved(cursor + 1),
        KeyCode::Home => TextEdit::Moved(0),
        KeyCode::End => TextEdit::Moved(len),
        _ => TextEdit::Ignored,
    }
}
