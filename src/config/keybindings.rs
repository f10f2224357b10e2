//! Keyboard bindings configuration.

use crate::model::key_action::StripAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to strip actions.
///
/// Provides default vim-style bindings alongside arrow keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, StripAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<StripAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut bindings = HashMap::new();

        // Paging
        bindings.insert(
            KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE),
            StripAction::Prev,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE),
            StripAction::Next,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            StripAction::Prev,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            StripAction::Next,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE),
            StripAction::Prev,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE),
            StripAction::Next,
        );

        // Free scrolling
        bindings.insert(
            KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT),
            StripAction::NudgeLeft,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT),
            StripAction::NudgeRight,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT),
            StripAction::NudgeLeft,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT),
            StripAction::NudgeRight,
        );

        // Jump to item 0-9
        for (digit, c) in ('0'..='9').enumerate() {
            bindings.insert(
                KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE),
                StripAction::JumpTo(digit),
            );
        }

        bindings.insert(
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE),
            StripAction::Refresh,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            StripAction::Quit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            StripAction::Quit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            StripAction::Quit,
        );

        Self { bindings }
    }
}
