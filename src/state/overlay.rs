//! Overlay Module - Country-picker open/close state machine
//!
//! Two states, `closed` and `open`. The flag affordance toggles between
//! them; a close request from the overlay's own framework only lands when
//! the search field does not hold input focus, so the framework's
//! close-on-blur behavior cannot fight the user while they type a query.
//!
//! The search-focus flag is an independent boolean fact feeding the machine;
//! it is not folded into the overlay state itself.

use std::cell::Cell;

use spark_signals::{Signal, signal};

/// Country-picker overlay state.
///
/// `open` is a signal so presentation shells can bind to it reactively;
/// search focus is plain interior state read only at close-request time.
pub struct Overlay {
    open: Signal<bool>,
    search_focused: Cell<bool>,
}

impl Overlay {
    pub fn new() -> Self {
        Self {
            open: signal(false),
            search_focused: Cell::new(false),
        }
    }

    /// The open flag as a signal, for reactive shell bindings.
    pub fn open_signal(&self) -> Signal<bool> {
        self.open.clone()
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Flag-affordance activation: closed → open, open → closed.
    pub fn toggle(&self) {
        self.open.set(!self.open.get());
    }

    /// Close request from the overlay framework.
    ///
    /// Suppressed while the search field holds focus; the overlay stays open.
    pub fn request_close(&self) {
        if self.search_focused.get() {
            return;
        }
        self.open.set(false);
    }

    /// Track search-field focus (shell forwards focus/blur).
    pub fn set_search_focus(&self, focused: bool) {
        self.search_focused.set(focused);
    }

    pub fn search_has_focus(&self) -> bool {
        self.search_focused.get()
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
