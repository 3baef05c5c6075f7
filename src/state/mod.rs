//! State Module - Event and overlay state systems
//!
//! - **Keyboard** - Event type, modifier flags, crossterm conversion
//! - **Overlay** - Country-picker open/close machine with search-focus
//!   suppression

pub mod keyboard;
pub mod overlay;

pub use keyboard::{KeyboardEvent, Modifiers, convert_key_event};
pub use overlay::Overlay;
