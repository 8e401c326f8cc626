use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;
use std::sync::{Arc, LazyLock};

use super::{input::KeyAction, screen::Screen};

macro_rules! keymap_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/keymap/default.keymap.json"
        ))
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum KeymapContext {
    Global,
    General,
    Fields,
    Filter,
}

impl KeymapContext {
    fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "global" => Some(KeymapContext::Global),
            "general" => Some(KeymapContext::General),
            "fields" => Some(KeymapContext::Fields),
            "filter" => Some(KeymapContext::Filter),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    id: String,
    description: String,
    contexts: Vec<String>,
    action: RawAction,
    combos: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
enum RawScreen {
    General,
    Fields,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawAction {
    Save,
    Reset,
    Quit,
    ResetStatus,
    ShowScreen { screen: RawScreen },
    ScreenStep { delta: i32 },
    FieldStep { delta: i32 },
    RowStep { delta: i32 },
    ColumnStep { delta: i32 },
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

impl RawAction {
    fn into_action(self) -> KeyAction {
        match self {
            RawAction::Save => KeyAction::Save,
            RawAction::Reset => KeyAction::Reset,
            RawAction::Quit => KeyAction::Quit,
            RawAction::ResetStatus => KeyAction::ResetStatus,
            RawAction::ShowScreen { screen } => KeyAction::ShowScreen(match screen {
                RawScreen::General => Screen::General,
                RawScreen::Fields => Screen::Fields,
            }),
            RawAction::ScreenStep { delta } => KeyAction::ScreenStep(delta),
            RawAction::FieldStep { delta } => KeyAction::FieldStep(delta),
            RawAction::RowStep { delta } => KeyAction::RowStep(delta),
            RawAction::ColumnStep { delta } => KeyAction::ColumnStep(delta),
            RawAction::ToggleCell => KeyAction::ToggleCell,
            RawAction::ToggleColumn => KeyAction::ToggleColumn,
            RawAction::CycleSort => KeyAction::CycleSort,
            RawAction::EditFilter => KeyAction::EditFilter,
            RawAction::ClearFilter => KeyAction::ClearFilter,
            RawAction::FinishFilter => KeyAction::FinishFilter,
            RawAction::AddField => KeyAction::AddField,
            RawAction::EditField => KeyAction::EditField,
            RawAction::DeleteField => KeyAction::DeleteField,
        }
    }
}

struct KeyBinding {
    action: KeyAction,
    contexts: Vec<KeymapContext>,
    combos: Vec<KeyPattern>,
    snippet: String,
}

impl KeyBinding {
    fn from_raw(raw: RawEntry) -> Self {
        let contexts = raw
            .contexts
            .iter()
            .filter_map(|ctx| KeymapContext::from_str(ctx))
            .collect::<Vec<_>>();
        assert!(
            !contexts.is_empty(),
            "keymap entry {} must declare at least one context",
            raw.id
        );
        let action = raw.action.into_action();
        let combos = raw
            .combos
            .iter()
            .map(|combo| {
                KeyPattern::parse(combo).unwrap_or_else(|err| {
                    panic!("failed to parse combo '{combo}' for {}: {err}", raw.id)
                })
            })
            .collect::<Vec<_>>();
        assert!(
            !combos.is_empty(),
            "keymap entry {} must declare combos",
            raw.id
        );
        let combos_display = combos
            .iter()
            .map(|pattern| pattern.display.clone())
            .collect::<Vec<_>>()
            .join("/");
        let snippet = format!("{combos_display} {}", raw.description);
        Self {
            action,
            contexts,
            combos,
            snippet,
        }
    }

    fn matches(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.combos
            .iter()
            .find(|pattern| pattern.matches(key))
            .map(|_| self.action)
    }
}

struct KeyPattern {
    matcher: CodeMatcher,
    required: KeyModifiers,
    allow_shift: bool,
    display: String,
}

impl KeyPattern {
    fn parse(spec: &str) -> Result<Self, String> {
        let display = spec.trim().to_string();
        if display.is_empty() {
            return Err("combo cannot be empty".into());
        }
        let mut tokens = display
            .split('+')
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>();
        let Some(key_token) = tokens.pop() else {
            return Err("combo must contain key".into());
        };
        let matcher = CodeMatcher::from_token(key_token)?;
        let mut required = KeyModifiers::empty();
        for token in tokens {
            match token.to_lowercase().as_str() {
                "ctrl" | "control" => required |= KeyModifiers::CONTROL,
                "shift" => required |= KeyModifiers::SHIFT,
                "alt" => required |= KeyModifiers::ALT,
                other => {
                    return Err(format!("unsupported modifier '{other}'"));
                }
            }
        }
        let allow_shift = matcher.allows_extra_shift() && !required.contains(KeyModifiers::SHIFT);
        Ok(Self {
            matcher,
            required,
            allow_shift,
            display,
        })
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        if !self.matcher.matches(&key.code) {
            return false;
        }
        if !key.modifiers.contains(self.required) {
            return false;
        }
        let extra = key.modifiers - self.required;
        if self.allow_shift {
            (extra - KeyModifiers::SHIFT).is_empty()
        } else {
            extra.is_empty()
        }
    }
}

#[derive(Clone)]
enum CodeMatcher {
    Literal(KeyCode),
    Char(char),
}

impl CodeMatcher {
    fn from_token(token: &str) -> Result<Self, String> {
        let normalized = token.to_lowercase();
        let matcher = match normalized.as_str() {
            "tab" => CodeMatcher::Literal(KeyCode::Tab),
            "backtab" => CodeMatcher::Literal(KeyCode::BackTab),
            "enter" => CodeMatcher::Literal(KeyCode::Enter),
            "esc" | "escape" => CodeMatcher::Literal(KeyCode::Esc),
            "left" => CodeMatcher::Literal(KeyCode::Left),
            "right" => CodeMatcher::Literal(KeyCode::Right),
            "up" => CodeMatcher::Literal(KeyCode::Up),
            "down" => CodeMatcher::Literal(KeyCode::Down),
            "pageup" => CodeMatcher::Literal(KeyCode::PageUp),
            "pagedown" => CodeMatcher::Literal(KeyCode::PageDown),
            "delete" | "del" => CodeMatcher::Literal(KeyCode::Delete),
            "space" => CodeMatcher::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => CodeMatcher::Char(ch),
                    _ => return Err(format!("unsupported key '{token}'")),
                }
            }
        };
        Ok(matcher)
    }

    fn matches(&self, code: &KeyCode) -> bool {
        match (self, code) {
            (CodeMatcher::Literal(expected), actual) => actual == expected,
            (CodeMatcher::Char(expected), KeyCode::Char(actual)) => {
                actual.to_ascii_lowercase() == *expected
            }
            _ => false,
        }
    }

    fn allows_extra_shift(&self) -> bool {
        matches!(
            self,
            CodeMatcher::Char(_) | CodeMatcher::Literal(KeyCode::BackTab)
        )
    }
}

/// Parsed key bindings, shared between the options and the input router.
pub(crate) struct KeymapStore {
    bindings: Vec<KeyBinding>,
}

impl std::fmt::Debug for KeymapStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeymapStore")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

impl KeymapStore {
    fn from_json(source: &str) -> Self {
        let raw_entries: Vec<RawEntry> =
            serde_json::from_str(source).expect("invalid keymap/default.keymap.json");
        Self {
            bindings: raw_entries.into_iter().map(KeyBinding::from_raw).collect(),
        }
    }

    /// Bindings of `context` win over global ones.
    pub(crate) fn classify(&self, context: KeymapContext, key: &KeyEvent) -> Option<KeyAction> {
        self.lookup(context, key)
            .or_else(|| self.lookup(KeymapContext::Global, key))
    }

    fn lookup(&self, context: KeymapContext, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings
            .iter()
            .filter(|binding| binding.contexts.contains(&context))
            .find_map(|binding| binding.matches(key))
    }

    pub(crate) fn help_text(&self, context: KeymapContext) -> Option<String> {
        let snippets = self
            .bindings
            .iter()
            .filter(|binding| {
                binding.contexts.contains(&context) || binding.contexts.contains(&KeymapContext::Global)
            })
            .map(|binding| binding.snippet.clone())
            .collect::<Vec<_>>();
        if snippets.is_empty() {
            None
        } else {
            Some(snippets.join(" • "))
        }
    }
}

static DEFAULT_STORE: LazyLock<Arc<KeymapStore>> =
    LazyLock::new(|| Arc::new(KeymapStore::from_json(keymap_source!())));

pub(crate) fn default_store() -> Arc<KeymapStore> {
    Arc::clone(&DEFAULT_STORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_s_saves_from_every_context() {
        let store = default_store();
        for context in [
            KeymapContext::General,
            KeymapContext::Fields,
            KeymapContext::Filter,
        ] {
            let action = store.classify(context, &key(KeyCode::Char('s'), KeyModifiers::CONTROL));
            assert!(matches!(action, Some(KeyAction::Save)), "{context:?}");
        }
    }

    #[test]
    fn plain_letters_are_text_outside_the_table() {
        let store = default_store();
        let typed = key(KeyCode::Char('s'), KeyModifiers::NONE);
        assert!(store.classify(KeymapContext::General, &typed).is_none());
        assert!(store.classify(KeymapContext::Filter, &typed).is_none());
        assert!(matches!(
            store.classify(KeymapContext::Fields, &typed),
            Some(KeyAction::CycleSort)
        ));
    }

    #[test]
    fn uppercase_letters_match_with_shift() {
        let store = default_store();
        let action = store.classify(
            KeymapContext::Fields,
            &key(KeyCode::Char('A'), KeyModifiers::SHIFT),
        );
        assert!(matches!(action, Some(KeyAction::ToggleColumn)));
    }

    #[test]
    fn space_toggles_and_slash_starts_filtering() {
        let store = default_store();
        assert!(matches!(
            store.classify(KeymapContext::Fields, &key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(KeyAction::ToggleCell)
        ));
        assert!(matches!(
            store.classify(KeymapContext::Fields, &key(KeyCode::Char('/'), KeyModifiers::NONE)),
            Some(KeyAction::EditFilter)
        ));
    }

    #[test]
    fn enter_means_different_things_per_context() {
        let store = default_store();
        let enter = key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(
            store.classify(KeymapContext::General, &enter),
            Some(KeyAction::FieldStep(1))
        ));
        assert!(matches!(
            store.classify(KeymapContext::Filter, &enter),
            Some(KeyAction::FinishFilter)
        ));
    }

    #[test]
    fn help_lists_context_and_global_bindings() {
        let help = default_store()
            .help_text(KeymapContext::Fields)
            .expect("fields help");
        assert!(help.contains("Ctrl+S save"));
        assert!(help.contains("Space toggle"));
        assert!(!help.contains("next input"));
    }

    #[test]
    fn screen_switch_only_advertises_chords_terminals_deliver() {
        let store = default_store();
        assert!(matches!(
            store.classify(
                KeymapContext::Fields,
                &key(KeyCode::Char('l'), KeyModifiers::CONTROL)
            ),
            Some(KeyAction::ScreenStep(1))
        ));
        assert!(
            store
                .classify(KeymapContext::Fields, &key(KeyCode::Tab, KeyModifiers::CONTROL))
                .is_none()
        );
        let help = store.help_text(KeymapContext::General).expect("general help");
        assert!(help.contains("Ctrl+L"));
        assert!(!help.contains("Ctrl+Tab"));
    }
}
