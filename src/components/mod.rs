//! Reusable UI components
//!
//! The design-system kit used to build the provider form:
//! - `button` - primary / secondary / tertiary buttons
//! - `input` - single-line text input, optionally masked for secrets
//! - `select` - single choice over a fixed option list
//! - `field` - label + control + inline error layout
//!
//! Plus the keybinding registry and the help overlay.

pub mod button;
pub mod field;
pub mod help_overlay;
pub mod input;
pub mod keybindings;
pub mod select;

pub use button::{Button, ButtonVariant};
pub use field::Field;
pub use input::TextInput;
pub use select::Select;
