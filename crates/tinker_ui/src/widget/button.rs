//! Clickable text button.

use super::{Widget, WidgetResponse, WidgetState};
use crate::input::InputState;
use crate::layout::Insets;
use crate::style::{ButtonImages, Color, FontFace, UiResources};
use crate::surface::Surface;

/// A button with a centered caption.
///
/// Clicks fire on press, matching the rest of the widget set. Callers read
/// [`WidgetResponse::clicked`] after `update`.
#[derive(Debug, Clone)]
pub struct Button {
    state: WidgetState,
    text: String,
    images: ButtonImages,
    padding: Insets,
    font: FontFace,
    color: Color,
    disabled_color: Color,
}

impl Button {
    /// Creates a button styled from `res`.
    #[must_use]
    pub fn new(text: impl Into<String>, res: &UiResources) -> Self {
        Self {
            state: WidgetState::new(),
            text: text.into(),
            images: res.button.clone(),
            padding: res.button_padding,
            font: res.small_face.clone(),
            color: res.text,
            disabled_color: res.text_disabled,
        }
    }

    /// Overrides the caption padding.
    #[must_use]
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Caption text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the caption.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Enables or disables the button.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.state.set_enabled(enabled);
    }
}

impl Widget for Button {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState) -> WidgetResponse {
        let was_pressed = self.state.is_pressed();
        let mut response = self.state.track_pointer(input);
        response.changed = was_pressed != self.state.is_pressed();
        response
    }

    fn render(&self, surface: &mut dyn Surface) {
        if !self.state.is_visible() {
            return;
        }
        let rect = self.state.rect;
        let (image, color) = if !self.state.is_enabled() {
            (&self.images.disabled, self.disabled_color)
        } else if self.state.is_pressed() {
            (&self.images.pressed, self.color)
        } else if self.state.is_hovered() {
            (&self.images.hover, self.color)
        } else {
            (&self.images.idle, self.color)
        };
        image.draw(surface, rect);

        let (tw, th) = self.font.measure(&self.text);
        let x = rect.x + (rect.width - tw) / 2;
        let y = rect.y + (rect.height - th) / 2;
        surface.draw_text(&self.text, x, y, &self.font, color);
    }

    fn min_size(&self) -> (i32, i32) {
        let (tw, th) = self.font.measure(&self.text);
        (tw + self.padding.horizontal(), th + self.padding.vertical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;
    use crate::layout::Rect;

    #[test]
    fn test_button_click_inside() {
        let mut button = Button::new("Throw", &UiResources::standard());
        button.set_rect(Rect::new(10, 10, 100, 40));

        let mut input = InputState::new();
        input.set_mouse_pos(50, 30);
        input.mouse_button_down(MouseButton::Left, 0.0);

        let response = button.update(&input);
        assert!(response.clicked);
        assert!(response.hovered);
        assert!(button.state().is_pressed());
    }

    #[test]
    fn test_disabled_button_ignores_clicks() {
        let mut button = Button::new("Throw", &UiResources::standard());
        button.set_rect(Rect::new(10, 10, 100, 40));
        button.set_enabled(false);

        let mut input = InputState::new();
        input.set_mouse_pos(50, 30);
        input.mouse_button_down(MouseButton::Left, 0.0);

        assert!(!button.update(&input).clicked);
    }

    #[test]
    fn test_caption_centered() {
        let res = UiResources::standard();
        let mut button = Button::new("ok", &res);
        button.set_rect(Rect::new(0, 0, 100, 100));

        let mut buf = crate::surface::PixelBuffer::new(100, 100);
        button.render(&mut buf);

        let run = &buf.text_runs()[0];
        let (tw, th) = res.small_face.measure("ok");
        assert_eq!((run.x, run.y), ((100 - tw) / 2, (100 - th) / 2));
    }
}
