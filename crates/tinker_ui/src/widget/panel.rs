//! Panel frame: a placed background that lays out caller-owned children.

use super::{Widget, WidgetResponse, WidgetState};
use crate::input::InputState;
use crate::layout::{AnchorLayoutData, Rect, RowLayout};
use crate::nine_slice::NineSlice;
use crate::surface::Surface;

/// How a panel arranges its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentLayout {
    /// Children stack in a row or column.
    Row(RowLayout),
    /// Each child is placed by its own anchor; the panel applies none.
    Anchor,
}

/// A sized, screen-placed panel.
///
/// Children stay owned by the caller so their concrete types (and any
/// render caches around them) remain reachable without downcasting.
#[derive(Debug, Clone)]
pub struct Panel {
    state: WidgetState,
    background: NineSlice,
    layout: ContentLayout,
    placement: AnchorLayoutData,
}

impl Panel {
    /// Creates a panel occupying `rect`.
    #[must_use]
    pub fn new(
        rect: Rect,
        background: NineSlice,
        layout: ContentLayout,
        placement: AnchorLayoutData,
    ) -> Self {
        let mut state = WidgetState::new();
        state.rect = rect;
        Self {
            state,
            background,
            layout,
            placement,
        }
    }

    /// Content layout.
    #[must_use]
    pub const fn content_layout(&self) -> ContentLayout {
        self.layout
    }

    /// Where the panel sits on the screen.
    #[must_use]
    pub const fn placement(&self) -> AnchorLayoutData {
        self.placement
    }

    /// The area left for content after row padding.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        match self.layout {
            ContentLayout::Row(row) => self.state.rect.inset(row.padding),
            ContentLayout::Anchor => self.state.rect,
        }
    }

    /// Rects for children of the given sizes.
    ///
    /// Row panels stack them; anchor panels center each child.
    #[must_use]
    pub fn arrange(&self, sizes: &[(i32, i32)]) -> Vec<Rect> {
        match self.layout {
            ContentLayout::Row(row) => row.arrange(self.state.rect, sizes),
            ContentLayout::Anchor => sizes
                .iter()
                .map(|&size| AnchorLayoutData::default().place(self.state.rect, size))
                .collect(),
        }
    }

    /// Positions each child at its preferred size.
    pub fn layout_children(&self, children: &mut [&mut dyn Widget]) {
        let sizes: Vec<_> = children.iter().map(|c| c.preferred_size()).collect();
        for (child, rect) in children.iter_mut().zip(self.arrange(&sizes)) {
            child.set_rect(rect);
        }
    }
}

impl Widget for Panel {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState) -> WidgetResponse {
        self.state.track_pointer(input)
    }

    fn render(&self, surface: &mut dyn Surface) {
        if self.state.is_visible() {
            self.background.draw(surface, self.state.rect);
        }
    }

    fn min_size(&self) -> (i32, i32) {
        self.state.rect.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Insets;
    use crate::style::Color;
    use crate::widget::Label;

    #[test]
    fn test_row_panel_stacks_children() {
        let row = RowLayout::vertical().with_padding(Insets::uniform(10));
        let panel = Panel::new(
            Rect::new(100, 100, 200, 300),
            NineSlice::solid(Color::BLACK),
            ContentLayout::Row(row),
            AnchorLayoutData::default(),
        );

        let rects = panel.arrange(&[(50, 20), (60, 30)]);
        assert_eq!(rects[0], Rect::new(110, 110, 50, 20));
        assert_eq!(rects[1], Rect::new(110, 135, 60, 30));
    }

    #[test]
    fn test_layout_children_sets_rects() {
        let panel = Panel::new(
            Rect::new(0, 0, 400, 400),
            NineSlice::solid(Color::BLACK),
            ContentLayout::Anchor,
            AnchorLayoutData::default(),
        );
        let font = crate::style::FontFace::new(10.0);
        let mut label = Label::new("abcd", font, Color::WHITE);
        panel.layout_children(&mut [&mut label as &mut dyn Widget]);

        assert_eq!(label.rect(), Rect::new(190, 194, 20, 12));
    }
}
