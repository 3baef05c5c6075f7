//! # tui-phone-input
//!
//! Reactive phone-number input widget core for terminal UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity: the widget owns its state as signals, commits a
//! freshly formatted value on every event, and delivers parsed metadata
//! through callbacks. Rendering is left entirely to the presentation shell;
//! this crate is the synchronization state machine, the country table, and
//! the mask-driven formatting behind it.
//!
//! ## Data flow
//!
//! ```text
//! shell event → PhoneInput handler → (clean → format → parse) → signal commit → callback
//! ```
//!
//! Every transition runs synchronously inside the handler for the event
//! that triggered it; there is no background work and no shared state
//! across widget instances.
//!
//! ## Modules
//!
//! - [`types`] - Records, metadata, events, callback contracts
//! - [`countries`] - Built-in country table and filter composition
//! - [`format`] - Cleaning, mask formatting, parsing, validity
//! - [`state`] - Keyboard conversion and the overlay machine
//! - [`input`] - The phone input state machine

pub mod countries;
pub mod format;
pub mod input;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::{
    ChangeCallback, ChangeEvent, CountryRecord, InputCallback, KeyDownCallback, MountCallback,
    PhoneMetadata, TextControlRef, UNSELECTED_OPTION_KEY, Variant,
};

pub use countries::{COUNTRIES, CountryFilter, filter_countries};

pub use format::{
    check_validity, clean, default_iso2, display_format, lookup_country, match_by_digits,
    parse_phone_number, raw_value,
};

pub use input::{PhoneInput, PhoneInputProps};

pub use state::{KeyboardEvent, Modifiers, Overlay, convert_key_event};
