//! Single-line text entry.

use super::{Widget, WidgetFlags, WidgetResponse, WidgetState};
use crate::input::{InputState, Key, MouseButton};
use crate::layout::{Insets, Rect};
use crate::nine_slice::NineSlice;
use crate::style::{Color, FontFace, UiResources};
use crate::surface::Surface;

/// Caret width in pixels.
const CARET_WIDTH: i32 = 2;

/// A one-line editable field.
///
/// A click inside focuses it; a click elsewhere drops focus. While focused
/// it consumes [`InputState::typed_text`] and [`Key::Backspace`].
#[derive(Debug, Clone)]
pub struct TextInput {
    state: WidgetState,
    text: String,
    placeholder: String,
    max_chars: usize,
    font: FontFace,
    color: Color,
    placeholder_color: Color,
    background: NineSlice,
    padding: Insets,
}

impl TextInput {
    /// Creates an empty field styled from `res`.
    #[must_use]
    pub fn new(res: &UiResources) -> Self {
        Self {
            state: WidgetState::new(),
            text: String::new(),
            placeholder: String::new(),
            max_chars: usize::MAX,
            font: res.small_face.clone(),
            color: res.text,
            placeholder_color: res.text_disabled,
            background: res.widget_background.clone(),
            padding: Insets {
                left: 15,
                right: 15,
                top: 10,
                bottom: 10,
            },
        }
    }

    /// Text shown while the field is empty.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Caps the length in characters.
    #[must_use]
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text, truncated to the length cap.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into().chars().take(self.max_chars).collect();
    }

    /// Gives or removes keyboard focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.state.flags.assign(WidgetFlags::FOCUSED, focused);
    }

    fn edit(&mut self, input: &InputState) -> bool {
        let before = self.text.len();
        let mut changed = false;
        if input.key_pressed(Key::Backspace) {
            changed |= self.text.pop().is_some();
        }
        let room = self.max_chars.saturating_sub(self.text.chars().count());
        self.text.extend(input.typed_text().chars().take(room));
        changed || self.text.len() != before
    }
}

impl Widget for TextInput {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState) -> WidgetResponse {
        let was_focused = self.state.is_focused();
        let mut response = self.state.track_pointer(input);
        if response.clicked {
            self.set_focused(true);
        } else if input.mouse_clicked(MouseButton::Left) {
            self.set_focused(false);
        }

        let edited = self.state.is_focused() && self.state.is_enabled() && self.edit(input);
        response.changed = edited || was_focused != self.state.is_focused();
        response
    }

    fn render(&self, surface: &mut dyn Surface) {
        if !self.state.is_visible() {
            return;
        }
        let rect = self.state.rect;
        self.background.draw(surface, rect);

        let inner = rect.inset(self.padding);
        let (shown, color) = if self.text.is_empty() {
            (self.placeholder.as_str(), self.placeholder_color)
        } else {
            (self.text.as_str(), self.color)
        };
        surface.draw_text(shown, inner.x, inner.y, &self.font, color);

        if self.state.is_focused() {
            let (width, height) = self.font.measure(&self.text);
            surface.fill_rect(
                Rect::new(inner.x + width, inner.y, CARET_WIDTH, height),
                self.color,
            );
        }
    }

    fn min_size(&self) -> (i32, i32) {
        let (width, height) = self.font.measure(&self.placeholder);
        (width + self.padding.horizontal(), height + self.padding.vertical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixelBuffer;

    fn field() -> TextInput {
        let mut field = TextInput::new(&UiResources::standard())
            .with_placeholder("Enter squad name...")
            .with_max_chars(8);
        field.set_rect(Rect::new(0, 0, 300, 60));
        field
    }

    fn click(x: i32, y: i32) -> InputState {
        let mut input = InputState::new();
        input.set_mouse_pos(x, y);
        input.mouse_button_down(MouseButton::Left, 0.0);
        input
    }

    fn typing(text: &str) -> InputState {
        let mut input = InputState::new();
        input.type_text(text);
        input
    }

    #[test]
    fn test_typing_needs_focus() {
        let mut field = field();
        assert!(!field.update(&typing("abc")).changed);
        assert_eq!(field.text(), "");

        assert!(field.update(&click(10, 10)).changed);
        assert!(field.state().is_focused());
        assert!(field.update(&typing("Wolves")).changed);
        assert_eq!(field.text(), "Wolves");
    }

    #[test]
    fn test_backspace_and_cap() {
        let mut field = field();
        field.set_focused(true);
        field.update(&typing("Red Wolves"));
        assert_eq!(field.text(), "Red Wolv");

        let mut input = InputState::new();
        input.key_down(Key::Backspace);
        field.update(&input);
        assert_eq!(field.text(), "Red Wol");
    }

    #[test]
    fn test_click_outside_drops_focus() {
        let mut field = field();
        field.set_focused(true);
        field.update(&click(500, 500));
        assert!(!field.state().is_focused());
    }

    #[test]
    fn test_placeholder_when_empty() {
        let mut field = field();
        let mut buf = PixelBuffer::new(300, 60);
        field.render(&mut buf);
        assert_eq!(buf.text_runs()[0].text, "Enter squad name...");

        field.set_text("Hawks");
        let mut buf = PixelBuffer::new(300, 60);
        field.render(&mut buf);
        assert_eq!(buf.text_runs()[0].text, "Hawks");
    }
}
