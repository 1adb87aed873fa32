use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::app::Action;

/// A key combination
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Context for keybindings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    LogViewer,
    Help,
}

/// Keybinding configuration
pub struct KeyBindings {
    bindings: HashMap<KeyContext, HashMap<KeyBinding, Action>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        // Global bindings
        let mut global = HashMap::new();
        // '?' is typed with SHIFT on most layouts and some terminals report it
        global.insert(KeyBinding::new(KeyCode::Char('?')), Action::ToggleHelp);
        global.insert(KeyBinding::shift(KeyCode::Char('?')), Action::ToggleHelp);
        global.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        global.insert(KeyBinding::new(KeyCode::Char('q')), Action::Quit);
        bindings.insert(KeyContext::Global, global);

        // Log viewer bindings
        let mut log_viewer = HashMap::new();
        log_viewer.insert(KeyBinding::new(KeyCode::Char('j')), Action::ScrollDown);
        log_viewer.insert(KeyBinding::new(KeyCode::Down), Action::ScrollDown);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('k')), Action::ScrollUp);
        log_viewer.insert(KeyBinding::new(KeyCode::Up), Action::ScrollUp);
        log_viewer.insert(KeyBinding::new(KeyCode::PageDown), Action::PageDown);
        log_viewer.insert(KeyBinding::new(KeyCode::PageUp), Action::PageUp);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('g')), Action::ScrollToTop);
        log_viewer.insert(KeyBinding::new(KeyCode::Home), Action::ScrollToTop);
        // Terminals disagree on whether 'G' carries SHIFT
        log_viewer.insert(KeyBinding::shift(KeyCode::Char('G')), Action::ScrollToBottom);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('G')), Action::ScrollToBottom);
        log_viewer.insert(KeyBinding::new(KeyCode::End), Action::ScrollToBottom);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('w')), Action::ToggleWrap);
        log_viewer.insert(KeyBinding::new(KeyCode::Char('e')), Action::ToggleErrorsOnly);
        bindings.insert(KeyContext::LogViewer, log_viewer);

        // Help overlay swallows navigation
        let mut help = HashMap::new();
        help.insert(KeyBinding::new(KeyCode::Esc), Action::CloseHelp);
        bindings.insert(KeyContext::Help, help);

        Self { bindings }
    }

    /// Look up action for key event in given context
    pub fn get_action(&self, context: KeyContext, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        // First check context-specific bindings
        if let Some(action) = self
            .bindings
            .get(&context)
            .and_then(|context_bindings| context_bindings.get(&binding))
        {
            return Some(action.clone());
        }

        // Fall back to global bindings
        self.bindings
            .get(&KeyContext::Global)?
            .get(&binding)
            .cloned()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_viewer_keys() {
        let bindings = KeyBindings::new();
        let lookup = |code| bindings.get_action(KeyContext::LogViewer, &key(code, KeyModifiers::NONE));

        assert_eq!(lookup(KeyCode::Char('j')), Some(Action::ScrollDown));
        assert_eq!(lookup(KeyCode::Up), Some(Action::ScrollUp));
        assert_eq!(lookup(KeyCode::Home), Some(Action::ScrollToTop));
        assert_eq!(lookup(KeyCode::End), Some(Action::ScrollToBottom));
        assert_eq!(lookup(KeyCode::PageDown), Some(Action::PageDown));
        assert_eq!(lookup(KeyCode::Char('w')), Some(Action::ToggleWrap));
        assert_eq!(lookup(KeyCode::Char('e')), Some(Action::ToggleErrorsOnly));
        assert_eq!(lookup(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_shifted_end_key() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_action(KeyContext::LogViewer, &key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Action::ScrollToBottom)
        );
    }

    #[test]
    fn test_help_key_with_and_without_shift() {
        let bindings = KeyBindings::new();
        for modifiers in [KeyModifiers::NONE, KeyModifiers::SHIFT] {
            assert_eq!(
                bindings.get_action(KeyContext::LogViewer, &key(KeyCode::Char('?'), modifiers)),
                Some(Action::ToggleHelp)
            );
            assert_eq!(
                bindings.get_action(KeyContext::Help, &key(KeyCode::Char('?'), modifiers)),
                Some(Action::ToggleHelp)
            );
        }
    }

    #[test]
    fn test_global_fallback() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_action(KeyContext::LogViewer, &key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            bindings.get_action(KeyContext::Help, &key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_help_context_ignores_scrolling() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_action(KeyContext::Help, &key(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Action::CloseHelp)
        );
        assert_eq!(
            bindings.get_action(KeyContext::Help, &key(KeyCode::Char('j'), KeyModifiers::NONE)),
            None
        );
    }
}
