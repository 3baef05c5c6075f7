//! Widget types - Records, metadata, and callback contracts.
//!
//! These types define the data that flows between the presentation shell
//! and the phone input state machine. All of them are plain values: records
//! are copied out of the static table, metadata is rebuilt fresh on every
//! event and never mutated afterwards.

use std::any::Any;
use std::rc::Rc;

use crate::format;
use crate::state::keyboard::KeyboardEvent;

// =============================================================================
// Country Record
// =============================================================================

/// One row of the country table: ISO 3166-1 alpha-2 code, display name,
/// dial code (digits only, no `+`), and the input mask.
///
/// Masks embed the literal dial code and mark subscriber digit slots with
/// `.`, e.g. `"+44 .... ......"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountryRecord {
    pub iso2: &'static str,
    pub name: &'static str,
    pub dial_code: &'static str,
    pub mask: &'static str,
}

impl CountryRecord {
    /// Selector option key: ISO code concatenated with the dial code.
    pub fn option_key(&self) -> String {
        format!("{}{}", self.iso2, self.dial_code)
    }

    /// Number of subscriber digit slots (`.`) in the mask.
    pub fn slot_count(&self) -> usize {
        self.mask.chars().filter(|c| *c == format::SLOT).count()
    }
}

/// Option key reported when neither the current digits nor the tracked
/// country code resolve to a record. Can never collide with a real
/// `iso2 + dial_code` key.
pub const UNSELECTED_OPTION_KEY: &str = "--";

// =============================================================================
// Phone Metadata
// =============================================================================

/// Parse result delivered to consumers on mount and on every change.
///
/// Constructed fresh per event by [`crate::format::parse_phone_number`] and
/// never mutated. Validity is a method over the metadata rather than stored
/// state, so both strict and lenient answers stay available to the consumer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhoneMetadata {
    /// Country matched by dial-code prefix, if any.
    pub country: Option<CountryRecord>,
    /// Digits after the dial code (all digits when no country matched).
    pub national_number: String,
    /// The display-formatted value the metadata was parsed from.
    pub formatted: String,
}

impl PhoneMetadata {
    /// ISO code of the matched country.
    pub fn iso_code(&self) -> Option<&'static str> {
        self.country.map(|c| c.iso2)
    }

    /// Dial code of the matched country (digits only).
    pub fn dial_code(&self) -> Option<&'static str> {
        self.country.map(|c| c.dial_code)
    }

    /// Whether the number is valid. See [`crate::format::check_validity`]
    /// for the strict/lenient contract.
    pub fn valid(&self, strict: bool) -> bool {
        format::check_validity(self, strict)
    }

    /// Selector option key for the matched country.
    pub fn option_key(&self) -> Option<String> {
        self.country.map(|c| c.option_key())
    }
}

// =============================================================================
// Events
// =============================================================================

/// Raw input event forwarded from the presentation shell.
///
/// Carries the text exactly as the shell captured it, before cleaning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub raw: String,
}

impl ChangeEvent {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

// =============================================================================
// Callback Types
// =============================================================================

/// Fired exactly once per widget instance, after mount normalization.
pub type MountCallback = Rc<dyn Fn(&PhoneMetadata)>;

/// Fired with the raw event before the formatting commit.
pub type InputCallback = Rc<dyn Fn(&ChangeEvent)>;

/// Fired after every formatting pipeline run, with fresh metadata and the
/// original event.
pub type ChangeCallback = Rc<dyn Fn(&PhoneMetadata, &ChangeEvent)>;

/// Fired for every forwarded key-down event.
pub type KeyDownCallback = Rc<dyn Fn(&KeyboardEvent)>;

// =============================================================================
// Variant
// =============================================================================

/// Visual variant hint passed through to the presentation shell.
/// The state machine never interprets it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Outlined,
    Filled,
    Standard,
}

// =============================================================================
// Text Control Handle
// =============================================================================

/// Opaque handle to the host's underlying text control.
///
/// The widget stores and returns it so the host can drive focus/selection
/// imperatively; the widget itself never reads through it.
#[derive(Clone)]
pub struct TextControlRef(Rc<dyn Any>);

impl TextControlRef {
    pub fn new(control: Rc<dyn Any>) -> Self {
        Self(control)
    }

    /// The wrapped control, for the host to downcast.
    pub fn control(&self) -> &Rc<dyn Any> {
        &self.0
    }
}

impl std::fmt::Debug for TextControlRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TextControlRef(..)")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const GB: CountryRecord = CountryRecord {
        iso2: "GB",
        name: "United Kingdom",
        dial_code: "44",
        mask: "+44 .... ......",
    };

    #[test]
    fn test_option_key() {
        assert_eq!(GB.option_key(), "GB44");
    }

    #[test]
    fn test_slot_count() {
        assert_eq!(GB.slot_count(), 10);
    }

    #[test]
    fn test_metadata_accessors() {
        let meta = PhoneMetadata {
            country: Some(GB),
            national_number: "7911123456".to_string(),
            formatted: "+44 7911 123456".to_string(),
        };

        assert_eq!(meta.iso_code(), Some("GB"));
        assert_eq!(meta.dial_code(), Some("44"));
        assert_eq!(meta.option_key(), Some("GB44".to_string()));
    }

    #[test]
    fn test_metadata_absent_country() {
        let meta = PhoneMetadata {
            country: None,
            national_number: "999".to_string(),
            formatted: "+999".to_string(),
        };

        assert_eq!(meta.iso_code(), None);
        assert_eq!(meta.dial_code(), None);
        assert_eq!(meta.option_key(), None);
        assert!(!meta.valid(false));
        assert!(!meta.valid(true));
    }

    #[test]
    fn test_text_control_ref_round_trip() {
        let control: Rc<dyn Any> = Rc::new(Cell::new(42u16));
        let handle = TextControlRef::new(control);

        let inner = handle
            .control()
            .downcast_ref::<Cell<u16>>()
            .expect("host-side downcast");
        assert_eq!(inner.get(), 42);
    }
}
