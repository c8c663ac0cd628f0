//! # Tinker UI
//!
//! Toolkit layer for the game's interface:
//! - Panels described as screen fractions, resolved to pixels per resolution
//! - Widgets drawn into software surfaces
//! - Render caches that redraw only when content or size changes
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       UI PIPELINE                         │
//! ├──────────────────────────────────────────────────────────┤
//! │  PanelOptions → PanelBuilder → Panel rect → child layout │
//! │                                                   ↓      │
//! │  InputState → Widget::update → mark dirty → RenderCache  │
//! │                                                   ↓      │
//! │                         PixelBuffer → host upload (bytes) │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on the frame thread. No locks, no globals: fonts, images
//! and colors travel in a [`UiResources`] value.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cache;
pub mod input;
pub mod layout;
pub mod nine_slice;
pub mod panel;
pub mod style;
pub mod surface;
pub mod widget;

pub use cache::{BackgroundPool, CachedBackground, CachedList, CachedTextArea, RenderCache};
pub use input::{InputState, Key, MouseButton};
pub use layout::{Anchor, AnchorPosition, Insets, Rect, ScreenLayout};
pub use nine_slice::NineSlice;
pub use panel::{LayoutKind, PanelBuilder, PanelOptions, PanelPadding, PanelSpec, ResolvedPanel};
pub use style::{Color, FontFace, UiResources};
pub use surface::{PixelBuffer, Surface};
pub use widget::{
    Button, Label, List, ListEntry, Panel, TextArea, TextInput, Widget, WidgetResponse,
};
