//! Single-line text label.

use super::{Widget, WidgetResponse, WidgetState};
use crate::input::InputState;
use crate::style::{Color, FontFace};
use crate::surface::Surface;

/// Static text drawn at the top-left of its rect.
#[derive(Debug, Clone)]
pub struct Label {
    state: WidgetState,
    text: String,
    font: FontFace,
    color: Color,
}

impl Label {
    /// Creates a label.
    #[must_use]
    pub fn new(text: impl Into<String>, font: FontFace, color: Color) -> Self {
        Self {
            state: WidgetState::new(),
            text: text.into(),
            font,
            color,
        }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text. Returns true if it differed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        true
    }
}

impl Widget for Label {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, _input: &InputState) -> WidgetResponse {
        WidgetResponse::default()
    }

    fn render(&self, surface: &mut dyn Surface) {
        if !self.state.is_visible() {
            return;
        }
        let rect = self.state.rect;
        surface.draw_text(&self.text, rect.x, rect.y, &self.font, self.color);
    }

    fn min_size(&self) -> (i32, i32) {
        self.font.measure(&self.text)
    }
}
