//! Phone Input - The synchronization state machine.
//!
//! Owns the four pieces of widget state (formatted value, selected country
//! code, search query, overlay open flag) and keeps them consistent across
//! every user action. Each handler runs synchronously inside the event that
//! triggered it: clean → format → parse → commit → callback, in that order,
//! with no background work.
//!
//! # Example
//!
//! ```ignore
//! use tui_phone_input::{PhoneInput, PhoneInputProps};
//! use spark_signals::signal;
//!
//! let value = signal("+1 555".to_string());
//! let widget = PhoneInput::new(PhoneInputProps::new(value.clone()));
//!
//! widget.mount();               // fires on_mount exactly once
//! widget.handle_change("15551234567");
//! assert_eq!(value.get(), "+1 (555) 123-4567");
//! ```

use std::cell::Cell;

use spark_signals::{Signal, signal};

use crate::countries::{COUNTRIES, CountryFilter, filter_countries};
use crate::format;
use crate::state::keyboard::KeyboardEvent;
use crate::state::overlay::Overlay;
use crate::types::{
    ChangeCallback, ChangeEvent, CountryRecord, InputCallback, KeyDownCallback, MountCallback,
    PhoneMetadata, TextControlRef, UNSELECTED_OPTION_KEY, Variant,
};

// =============================================================================
// Lifecycle
// =============================================================================

/// Widget lifecycle phase. Mount normalization transitions this exactly
/// once; re-renders triggered by its own state commits see `Normalized`
/// and skip the pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LifecyclePhase {
    Uninitialized,
    Normalized,
}

// =============================================================================
// Props
// =============================================================================

/// Properties for the phone input widget.
///
/// `value` is the display value, two-way bound: the widget commits every
/// formatted result into it, and the shell renders from it.
pub struct PhoneInputProps {
    /// The display value (required, two-way bound).
    pub value: Signal<String>,

    /// Visual variant hint forwarded to the shell.
    pub variant: Variant,

    /// Variant for the search field; defaults to `variant`.
    pub search_variant: Option<Variant>,

    /// Initially selected ISO code; defaults to the locale region.
    pub country: Option<String>,

    /// Whether the overlay shows the search field.
    pub enable_search: bool,

    /// Disables the flag affordance entirely.
    pub disable_dropdown: bool,

    /// Allow-list of ISO codes; empty means all.
    pub only_countries: Vec<String>,

    /// Deny-list of ISO codes.
    pub exclude_countries: Vec<String>,

    /// ISO codes listed first in the overlay.
    pub preferred_countries: Vec<String>,

    /// Shell text for an empty search result.
    pub search_not_found: String,

    /// Shell placeholder for the search field.
    pub search_placeholder: String,

    /// Fired once after mount normalization.
    pub on_mount: Option<MountCallback>,

    /// Fired with the raw event before the formatting commit.
    pub on_input: Option<InputCallback>,

    /// Fired after every change pipeline run.
    pub on_change: Option<ChangeCallback>,

    /// Fired for every forwarded key-down event.
    pub on_key_down: Option<KeyDownCallback>,

    /// Opaque handle to the underlying text control, forwarded untouched.
    pub text_ref: Option<TextControlRef>,
}

impl PhoneInputProps {
    pub fn new(value: Signal<String>) -> Self {
        Self {
            value,
            variant: Variant::default(),
            search_variant: None,
            country: None,
            enable_search: false,
            disable_dropdown: false,
            only_countries: Vec::new(),
            exclude_countries: Vec::new(),
            preferred_countries: Vec::new(),
            search_not_found: "No country found".to_string(),
            search_placeholder: "Search country".to_string(),
            on_mount: None,
            on_input: None,
            on_change: None,
            on_key_down: None,
            text_ref: None,
        }
    }
}

// =============================================================================
// Widget
// =============================================================================

/// The phone input state machine.
///
/// All state lives for the widget's mounted lifetime and is owned by this
/// single instance; derivations ([`Self::countries`],
/// [`Self::selected_option`], [`Self::metadata`]) are pure functions over
/// the current snapshot, recomputed per call.
pub struct PhoneInput {
    value: Signal<String>,
    country_code: Signal<String>,
    query: Signal<String>,
    overlay: Overlay,
    phase: Cell<LifecyclePhase>,
    backspace: Cell<bool>,

    variant: Variant,
    search_variant: Variant,
    enable_search: bool,
    disable_dropdown: bool,
    filter: CountryFilter,
    search_not_found: String,
    search_placeholder: String,

    on_mount: Option<MountCallback>,
    on_input: Option<InputCallback>,
    on_change: Option<ChangeCallback>,
    on_key_down: Option<KeyDownCallback>,
    text_ref: Option<TextControlRef>,
}

impl PhoneInput {
    pub fn new(props: PhoneInputProps) -> Self {
        let country = props.country.unwrap_or_else(format::default_iso2);

        Self {
            value: props.value,
            country_code: signal(country),
            query: signal(String::new()),
            overlay: Overlay::new(),
            phase: Cell::new(LifecyclePhase::Uninitialized),
            backspace: Cell::new(false),
            variant: props.variant,
            search_variant: props.search_variant.unwrap_or(props.variant),
            enable_search: props.enable_search,
            disable_dropdown: props.disable_dropdown,
            filter: CountryFilter {
                only: props.only_countries,
                exclude: props.exclude_countries,
                preferred: props.preferred_countries,
                query: String::new(),
            },
            search_not_found: props.search_not_found,
            search_placeholder: props.search_placeholder,
            on_mount: props.on_mount,
            on_input: props.on_input,
            on_change: props.on_change,
            on_key_down: props.on_key_down,
            text_ref: props.text_ref,
        }
    }

    // =========================================================================
    // Derivations
    // =========================================================================

    /// The active country table: configured filters plus the live search
    /// query, applied to the built-in table.
    pub fn countries(&self) -> Vec<CountryRecord> {
        let filter = CountryFilter {
            query: self.query.get(),
            ..self.filter.clone()
        };
        filter_countries(COUNTRIES, &filter)
    }

    /// The highlighted selector option key (`iso2 + dial_code`).
    ///
    /// Derived from the current digits against the active table, falling
    /// back to the tracked country code in the full table, then to
    /// [`UNSELECTED_OPTION_KEY`].
    pub fn selected_option(&self) -> String {
        let digits = format::raw_value(&self.value.get());
        let active = self.countries();

        format::match_by_digits(&digits, &active)
            .or_else(|| format::lookup_country(&self.country_code.get(), COUNTRIES))
            .map(|c| c.option_key())
            .unwrap_or_else(|| UNSELECTED_OPTION_KEY.to_string())
    }

    /// Metadata for the current value, parsed against the active table.
    pub fn metadata(&self) -> PhoneMetadata {
        format::parse_phone_number(&self.value.get(), &self.countries())
    }

    // =========================================================================
    // Mount normalization (runs once)
    // =========================================================================

    /// Normalize the initial value and notify the consumer.
    ///
    /// If the initial digits do not start with the dial code implied by the
    /// initial state, the value is replaced with that dial code alone. Runs
    /// exactly once per instance; later calls are no-ops.
    pub fn mount(&self) {
        if self.phase.get() == LifecyclePhase::Normalized {
            return;
        }
        self.phase.set(LifecyclePhase::Normalized);

        let active = self.countries();
        let mut digits = format::raw_value(&self.value.get());

        let implied = format::match_by_digits(&digits, &active)
            .or_else(|| format::lookup_country(&self.country_code.get(), COUNTRIES));
        if let Some(country) = implied {
            if !digits.starts_with(country.dial_code) {
                digits = country.dial_code.to_string();
            }
        }

        let formatted = format::display_format(&digits, &active);
        let metadata = format::parse_phone_number(&formatted, &active);

        if let Some(cb) = &self.on_mount {
            cb(&metadata);
        }
        if let Some(iso) = metadata.iso_code() {
            self.country_code.set(iso.to_string());
        }
        self.value.set(formatted);
    }

    // =========================================================================
    // Keystroke pipeline
    // =========================================================================

    /// Run the formatting pipeline for a raw text change.
    ///
    /// Cleans the raw text, formats it against the active table, commits
    /// the new value, and fires `on_change` with fresh metadata and the
    /// original event.
    pub fn handle_change(&self, raw: &str) {
        let active = self.countries();
        let digits: String = format::clean(raw).into_iter().collect();
        let formatted = format::display_format(&digits, &active);
        let metadata = format::parse_phone_number(&formatted, &active);

        self.value.set(formatted);

        if let Some(cb) = &self.on_change {
            cb(&metadata, &ChangeEvent::new(raw));
        }
    }

    /// Forward a raw input event, then commit the formatted value.
    ///
    /// The input path formats without emitting metadata; shells wiring a
    /// single event stream should call [`Self::handle_change`] instead.
    pub fn handle_input(&self, raw: &str) {
        if let Some(cb) = &self.on_input {
            cb(&ChangeEvent::new(raw));
        }

        let active = self.countries();
        let digits: String = format::clean(raw).into_iter().collect();
        self.value.set(format::display_format(&digits, &active));
    }

    /// Record the deletion flag and forward the key-down event.
    ///
    /// The flag is informational: the formatting pipeline treats every
    /// keystroke identically regardless of it.
    pub fn handle_key_down(&self, event: &KeyboardEvent) {
        self.backspace.set(event.is_backspace());

        if let Some(cb) = &self.on_key_down {
            cb(event);
        }
    }

    /// Whether the most recent forwarded key press was a deletion.
    pub fn last_key_was_backspace(&self) -> bool {
        self.backspace.get()
    }

    // =========================================================================
    // Country selection
    // =========================================================================

    /// Select a country from the overlay.
    ///
    /// Re-selecting the active option is a no-op. Otherwise the tracked
    /// country code switches and the value resets to the empty-mask
    /// template for the new country, abandoning any typed national number.
    pub fn select_country(&self, record: &CountryRecord) {
        if record.option_key() == self.selected_option() {
            return;
        }

        self.country_code.set(record.iso2.to_string());

        // Cleaning the mask against itself leaves the dial prefix only
        let template: String = format::clean(record.mask).into_iter().collect();
        self.value
            .set(format::display_format(&template, &self.countries()));
    }

    // =========================================================================
    // Overlay & search
    // =========================================================================

    /// Flag-affordance activation. No-op when the dropdown is disabled.
    pub fn toggle_overlay(&self) {
        if self.disable_dropdown {
            return;
        }
        self.overlay.toggle();
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay.is_open()
    }

    /// The overlay open flag as a signal, for reactive shell bindings.
    pub fn overlay_open_signal(&self) -> Signal<bool> {
        self.overlay.open_signal()
    }

    /// Close request from the overlay framework; suppressed while the
    /// search field holds focus.
    pub fn request_overlay_close(&self) {
        self.overlay.request_close();
    }

    /// Track search-field focus (shell forwards focus/blur events).
    pub fn set_search_focus(&self, focused: bool) {
        self.overlay.set_search_focus(focused);
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.query.set(query.into());
    }

    /// The search query as a signal, for reactive shell bindings.
    pub fn query(&self) -> Signal<String> {
        self.query.clone()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The display value signal (two-way bound).
    pub fn value(&self) -> Signal<String> {
        self.value.clone()
    }

    /// The tracked country code signal.
    pub fn country_code(&self) -> Signal<String> {
        self.country_code.clone()
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn search_variant(&self) -> Variant {
        self.search_variant
    }

    pub fn search_enabled(&self) -> bool {
        self.enable_search
    }

    pub fn dropdown_disabled(&self) -> bool {
        self.disable_dropdown
    }

    pub fn search_not_found(&self) -> &str {
        &self.search_not_found
    }

    pub fn search_placeholder(&self) -> &str {
        &self.search_placeholder
    }

    /// The forwarded text-control handle. The widget never reads through it.
    pub fn text_ref(&self) -> Option<TextControlRef> {
        self.text_ref.clone()
    }
}

// =============================================================================
// Tests
// =============================================================================
