use crossterm::event::KeyEvent;

use crate::app::App;
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    LaneLeft,
    LaneRight,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    ToggleFocus,
    Select,
    Close,
    NextMedia,
    PrevMedia,
    OpenMedia,
    GotoWorks,
    GotoContact,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    let binding = KeyBinding::new(key.code, key.modifiers);

    if keymap.is_g_prefix(&binding) {
        return if app.pending_key == Some('g') {
            keymap.get_pending_g_action().copied().unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    keymap.get(&binding).copied().unwrap_or(Action::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use folio_core::{AppConfig, ContentCatalog};
    use std::sync::Arc;

    fn app() -> App {
        let catalog = ContentCatalog::builtin().unwrap();
        App::new(Arc::new(AppConfig::default()), catalog).unwrap()
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_gg_sequence() {
        let keymap = Keymap::default();
        let mut app = app();
        let g = press(KeyCode::Char('g'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(g, &app, &keymap), Action::PendingG);
        app.pending_key = Some('g');
        assert_eq!(handle_key_event(g, &app, &keymap), Action::JumpToTop);
    }

    #[test]
    fn test_mapped_and_unmapped_keys() {
        let keymap = Keymap::default();
        let app = app();
        assert_eq!(
            handle_key_event(press(KeyCode::Enter, KeyModifiers::NONE), &app, &keymap),
            Action::Select
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('G'), KeyModifiers::SHIFT), &app, &keymap),
            Action::JumpToBottom
        );
        assert_eq!(
            handle_key_event(press(KeyCode::Char('z'), KeyModifiers::NONE), &app, &keymap),
            Action::None
        );
    }

    #[test]
    fn test_shifted_punctuation_matches_plain_binding() {
        let config = folio_core::config::KeymapConfig {
            close: "?".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        let app = app();
        for modifiers in [KeyModifiers::NONE, KeyModifiers::SHIFT] {
            assert_eq!(
                handle_key_event(press(KeyCode::Char('?'), modifiers), &app, &keymap),
                Action::Close
            );
        }
    }
}
