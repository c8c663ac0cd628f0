//! Core widget types and traits.

use crate::input::{InputState, MouseButton};
use crate::layout::Rect;
use crate::surface::Surface;

/// Widget state flags (bitfield).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetFlags(u32);

impl WidgetFlags {
    /// Widget is visible.
    pub const VISIBLE: u32 = 1 << 0;
    /// Widget is enabled (can receive input).
    pub const ENABLED: u32 = 1 << 1;
    /// Widget has keyboard focus.
    pub const FOCUSED: u32 = 1 << 2;
    /// Widget is hovered.
    pub const HOVERED: u32 = 1 << 3;
    /// Widget is pressed.
    pub const PRESSED: u32 = 1 << 4;

    /// Default flags for a new widget.
    pub const DEFAULT: Self = Self(Self::VISIBLE | Self::ENABLED);

    /// Creates new flags with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    /// Sets or clears a flag.
    #[inline]
    pub fn assign(&mut self, flag: u32, on: bool) {
        if on {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }
}

/// Common widget state.
#[derive(Debug, Clone, Copy)]
pub struct WidgetState {
    /// Bounding rectangle in screen pixels (set by layout).
    pub rect: Rect,
    /// State flags.
    pub flags: WidgetFlags,
}

impl WidgetState {
    /// Creates a new widget state with an empty rect.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rect: Rect::ZERO,
            flags: WidgetFlags::DEFAULT,
        }
    }

    /// Returns true if the widget is visible.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.flags.has(WidgetFlags::VISIBLE)
    }

    /// Returns true if the widget accepts input.
    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.flags.has(WidgetFlags::ENABLED)
    }

    /// Returns true if the widget is hovered.
    #[inline]
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.flags.has(WidgetFlags::HOVERED)
    }

    /// Returns true if the widget is pressed.
    #[inline]
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.flags.has(WidgetFlags::PRESSED)
    }

    /// Returns true if the widget has keyboard focus.
    #[inline]
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.flags.has(WidgetFlags::FOCUSED)
    }

    /// Shows or hides the widget.
    pub fn set_visible(&mut self, visible: bool) {
        self.flags.assign(WidgetFlags::VISIBLE, visible);
    }

    /// Enables or disables input.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.flags.assign(WidgetFlags::ENABLED, enabled);
    }

    /// Returns true if this widget should react to input this frame.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.is_visible() && self.is_enabled()
    }

    /// Updates hover/press flags from the mouse and reports transitions
    /// plus a left click landing inside the rect.
    pub fn track_pointer(&mut self, input: &InputState) -> WidgetResponse {
        let mut response = WidgetResponse::default();
        let (mx, my) = input.mouse_pos();
        let inside = self.is_interactive() && self.rect.contains(mx, my);

        if inside != self.is_hovered() {
            self.flags.assign(WidgetFlags::HOVERED, inside);
            response.hovered = inside;
            response.unhovered = !inside;
        }
        self.flags
            .assign(WidgetFlags::PRESSED, inside && input.mouse_down(MouseButton::Left));

        if inside && input.mouse_clicked(MouseButton::Left) {
            response.clicked = true;
            response.double_clicked = input.double_clicked();
        }
        response
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::new()
    }
}

/// Response from widget update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetResponse {
    /// Widget was clicked.
    pub clicked: bool,
    /// Widget was double-clicked.
    pub double_clicked: bool,
    /// Mouse entered the widget.
    pub hovered: bool,
    /// Mouse left the widget.
    pub unhovered: bool,
    /// Widget content or selection changed.
    pub changed: bool,
}

impl WidgetResponse {
    /// Returns true if anything visible about the widget changed.
    #[must_use]
    pub const fn needs_redraw(&self) -> bool {
        self.changed || self.hovered || self.unhovered || self.clicked
    }
}

/// Base trait for all widgets.
pub trait Widget {
    /// Returns the widget's state.
    fn state(&self) -> &WidgetState;

    /// Returns mutable access to the widget's state.
    fn state_mut(&mut self) -> &mut WidgetState;

    /// Handles this frame's input and updates widget state.
    fn update(&mut self, input: &InputState) -> WidgetResponse;

    /// Draws the widget at its current rect.
    fn render(&self, surface: &mut dyn Surface);

    /// Returns the minimum size of this widget.
    fn min_size(&self) -> (i32, i32) {
        (0, 0)
    }

    /// Returns the preferred size of this widget.
    fn preferred_size(&self) -> (i32, i32) {
        self.min_size()
    }

    /// Moves/resizes the widget.
    fn set_rect(&mut self, rect: Rect) {
        self.state_mut().rect = rect;
    }

    /// Current rect.
    fn rect(&self) -> Rect {
        self.state().rect
    }
}
