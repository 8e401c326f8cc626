use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{
    keymap::{KeymapContext, KeymapStore},
    screen::Screen,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Save,
    Reset,
    Quit,
    ResetStatus,
    ShowScreen(Screen),
    ScreenStep(i32),
    FieldStep(i32),
    RowStep(i32),
    ColumnStep(i32),
    ToggleCell,
    ToggleColumn,
    CycleSort,
    EditFilter,
    ClearFilter,
    FinishFilter,
    AddField,
    EditField,
    DeleteField,
}

/// What a key press turned into.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Dispatch {
    Action(KeyAction),
    Text(KeyEvent),
    None,
}

pub(crate) struct InputRouter {
    store: Arc<KeymapStore>,
}

impl InputRouter {
    pub(crate) fn new(store: Arc<KeymapStore>) -> Self {
        Self { store }
    }

    /// Unbound keys become text input where a text box has focus.
    pub(crate) fn classify(&self, context: KeymapContext, key: &KeyEvent) -> Dispatch {
        if let Some(action) = self.store.classify(context, key) {
            return Dispatch::Action(action);
        }
        match context {
            KeymapContext::General | KeymapContext::Filter if is_text_key(key) => {
                Dispatch::Text(*key)
            }
            _ => Dispatch::None,
        }
    }
}

fn is_text_key(key: &KeyEvent) -> bool {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return false;
    }
    matches!(
        key.code,
        KeyCode::Char(_)
            | KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End
    )
}
