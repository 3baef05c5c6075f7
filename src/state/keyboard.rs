//! Keyboard Module - Key events forwarded by the presentation shell
//!
//! Bridges crossterm's event system with the widget's key-down surface.
//! The widget never polls the terminal itself; the shell reads events and
//! forwards the converted `KeyboardEvent` into
//! [`crate::input::PhoneInput::handle_key_down`].
//!
//! # Example
//!
//! ```ignore
//! use tui_phone_input::state::keyboard::convert_key_event;
//!
//! if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
//!     widget.handle_key_down(&convert_key_event(key));
//! }
//! ```

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers};

// =============================================================================
// TYPES
// =============================================================================

bitflags! {
    /// Keyboard modifier state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Modifiers: u8 {
        const CTRL = 1;
        const ALT = 1 << 1;
        const SHIFT = 1 << 2;
        const META = 1 << 3;
    }
}

/// Keyboard event with browser-style key names ("a", "Enter", "Backspace").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "5", "Backspace", "ArrowLeft")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::empty(),
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// Whether this event is a deletion keystroke.
    pub fn is_backspace(&self) -> bool {
        self.key == "Backspace"
    }
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert a crossterm KeyEvent to a [`KeyboardEvent`].
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        _ => String::new(),
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
    }
}

/// Convert crossterm KeyModifiers to [`Modifiers`].
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::CTRL, mods.contains(KeyModifiers::CONTROL));
    out.set(Modifiers::ALT, mods.contains(KeyModifiers::ALT));
    out.set(Modifiers::SHIFT, mods.contains(KeyModifiers::SHIFT));
    // Meta is not exposed by crossterm
    out
}

// =============================================================================
// Tests
// =============================================================================
