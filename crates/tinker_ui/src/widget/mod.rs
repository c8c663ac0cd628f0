//! Widget system for UI components.
//!
//! Widgets hold their own state and draw into a [`Surface`](crate::surface::Surface).
//! Interaction is reported back through [`WidgetResponse`]; the owner reads it
//! after `update` and reacts.

mod button;
mod core;
mod label;
mod list;
mod panel;
mod text_area;
mod text_input;

pub use button::Button;
pub use core::{Widget, WidgetFlags, WidgetResponse, WidgetState};
pub use label::Label;
pub use list::{List, ListEntry};
pub use panel::{ContentLayout, Panel};
pub use text_area::{wrap_text, TextArea};
pub use text_input::TextInput;
