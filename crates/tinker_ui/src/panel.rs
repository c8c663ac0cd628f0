//! Percentage-based panel resolution.
//!
//! Panels are described in screen fractions so the same description works at
//! any resolution. [`PanelBuilder`] turns a description into pixel geometry:
//!
//! ```text
//!   size    = (trunc(width * W), trunc(height * H))
//!   padding = uniform fraction, applied on the anchored edges only,
//!             or explicit per-edge insets
//!   rect    = anchor placement of `size` inside the padded screen
//! ```
//!
//! Out-of-range fractions are passed through unchanged and only logged.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::layout::{Anchor, AnchorLayoutData, AnchorPosition, Insets, Rect, RowLayout, ScreenLayout};
use crate::style::UiResources;
use crate::widget::{ContentLayout, Panel};

/// Panel padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelPadding {
    /// A screen fraction applied on the edges the anchor hugs.
    Uniform(f64),
    /// Exact per-edge pixels, bypassing the fraction computation.
    Custom(Insets),
}

impl Default for PanelPadding {
    fn default() -> Self {
        Self::Uniform(0.0)
    }
}

/// Content layout of a panel, before it is resolved to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Vertical stack.
    #[default]
    Row,
    /// Horizontal stack.
    HorizontalRow,
    /// Children placed by anchor.
    Anchor,
}

/// Options for building one panel.
///
/// Defaults to a centered 20% × 30% panel with a vertical row layout and
/// render caching enabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelOptions {
    /// Anchor on the screen.
    pub anchor: Anchor,
    /// Width as a fraction of the screen width.
    pub width: f64,
    /// Height as a fraction of the screen height.
    pub height: f64,
    /// Padding from the screen edges.
    pub padding: PanelPadding,
    /// Content layout.
    pub layout: LayoutKind,
    /// Whether the panel's content should be render-cached.
    pub caching: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            anchor: Anchor::CENTER,
            width: 0.2,
            height: 0.3,
            padding: PanelPadding::default(),
            layout: LayoutKind::Row,
            caching: true,
        }
    }
}

impl PanelOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the anchor.
    #[must_use]
    pub const fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Top edge, centered.
    #[must_use]
    pub const fn top_center(self) -> Self {
        self.anchor(Anchor::TOP_CENTER)
    }

    /// Top-left corner.
    #[must_use]
    pub const fn top_left(self) -> Self {
        self.anchor(Anchor::TOP_LEFT)
    }

    /// Top-right corner.
    #[must_use]
    pub const fn top_right(self) -> Self {
        self.anchor(Anchor::TOP_RIGHT)
    }

    /// Left edge, centered.
    #[must_use]
    pub const fn left_center(self) -> Self {
        self.anchor(Anchor::LEFT_CENTER)
    }

    /// Bottom-left corner.
    #[must_use]
    pub const fn left_bottom(self) -> Self {
        self.anchor(Anchor::BOTTOM_LEFT)
    }

    /// Right edge, centered.
    #[must_use]
    pub const fn right_center(self) -> Self {
        self.anchor(Anchor::RIGHT_CENTER)
    }

    /// Bottom edge, centered.
    #[must_use]
    pub const fn bottom_center(self) -> Self {
        self.anchor(Anchor::BOTTOM_CENTER)
    }

    /// Bottom-left corner.
    #[must_use]
    pub const fn bottom_left(self) -> Self {
        self.anchor(Anchor::BOTTOM_LEFT)
    }

    /// Bottom-right corner.
    #[must_use]
    pub const fn bottom_right(self) -> Self {
        self.anchor(Anchor::BOTTOM_RIGHT)
    }

    /// Screen center.
    #[must_use]
    pub const fn center(self) -> Self {
        self.anchor(Anchor::CENTER)
    }

    /// Sets width and height as screen fractions.
    #[must_use]
    pub const fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Uniform padding as a screen fraction.
    #[must_use]
    pub const fn padding(mut self, fraction: f64) -> Self {
        self.padding = PanelPadding::Uniform(fraction);
        self
    }

    /// Exact per-edge padding in pixels.
    #[must_use]
    pub const fn custom_padding(mut self, insets: Insets) -> Self {
        self.padding = PanelPadding::Custom(insets);
        self
    }

    /// Vertical row layout.
    #[must_use]
    pub const fn row_layout(mut self) -> Self {
        self.layout = LayoutKind::Row;
        self
    }

    /// Horizontal row layout.
    #[must_use]
    pub const fn horizontal_row_layout(mut self) -> Self {
        self.layout = LayoutKind::HorizontalRow;
        self
    }

    /// Anchor layout.
    #[must_use]
    pub const fn anchor_layout(mut self) -> Self {
        self.layout = LayoutKind::Anchor;
        self
    }

    /// Enables or disables render caching.
    #[must_use]
    pub const fn caching(mut self, enabled: bool) -> Self {
        self.caching = enabled;
        self
    }
}

/// A named, reusable panel description.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    /// Unique name.
    pub name: String,
    /// Anchor on the screen.
    pub anchor: Anchor,
    /// Width fraction.
    pub width: f64,
    /// Height fraction.
    pub height: f64,
    /// Padding.
    pub padding: PanelPadding,
    /// Content layout.
    pub layout: LayoutKind,
}

impl PanelSpec {
    /// Creates a spec with uniform padding.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        anchor: Anchor,
        width: f64,
        height: f64,
        padding: f64,
        layout: LayoutKind,
    ) -> Self {
        Self {
            name: name.into(),
            anchor,
            width,
            height,
            padding: PanelPadding::Uniform(padding),
            layout,
        }
    }

    /// Builder options equivalent to this spec.
    #[must_use]
    pub fn options(&self) -> PanelOptions {
        PanelOptions {
            anchor: self.anchor,
            width: self.width,
            height: self.height,
            padding: self.padding,
            layout: self.layout,
            caching: true,
        }
    }
}

/// A panel resolved to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPanel {
    /// Pixel size.
    pub size: (i32, i32),
    /// Screen placement (anchor plus padding insets).
    pub placement: AnchorLayoutData,
    /// Content layout.
    pub content: ContentLayout,
    /// Final rect on the screen.
    pub rect: Rect,
    /// Whether content should be render-cached.
    pub caching: bool,
}

/// Resolves panel options against a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelBuilder {
    screen: ScreenLayout,
}

impl PanelBuilder {
    /// Row content padding as a fraction of the screen width.
    pub const ROW_PADDING: f64 = 0.0125;

    /// Creates a builder for `screen`.
    #[must_use]
    pub const fn new(screen: ScreenLayout) -> Self {
        Self { screen }
    }

    /// The screen this builder resolves against.
    #[must_use]
    pub const fn screen(&self) -> ScreenLayout {
        self.screen
    }

    /// Pixel size for the given fractions.
    #[must_use]
    pub fn size(&self, width: f64, height: f64) -> (i32, i32) {
        (
            self.screen.width_fraction(width),
            self.screen.height_fraction(height),
        )
    }

    /// Screen-edge insets for `padding` under `anchor`.
    ///
    /// Uniform padding lands on the leading edge for `Start`, the trailing
    /// edge for `End`, and nowhere for `Center`.
    #[must_use]
    pub fn padding_insets(&self, anchor: Anchor, padding: PanelPadding) -> Insets {
        let fraction = match padding {
            PanelPadding::Custom(insets) => return insets,
            PanelPadding::Uniform(p) if p > 0.0 => p,
            PanelPadding::Uniform(_) => return Insets::ZERO,
        };
        let span = self.screen.responsive_insets(fraction);

        let (left, right) = split_padding(anchor.horizontal, span.left);
        let (top, bottom) = split_padding(anchor.vertical, span.top);
        Insets {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Content layout for `kind`.
    #[must_use]
    pub fn content_layout(&self, kind: LayoutKind) -> ContentLayout {
        let padding = Insets::uniform(self.screen.width_fraction(Self::ROW_PADDING));
        match kind {
            LayoutKind::Row => ContentLayout::Row(RowLayout::vertical().with_padding(padding)),
            LayoutKind::HorizontalRow => {
                ContentLayout::Row(RowLayout::horizontal().with_padding(padding))
            }
            LayoutKind::Anchor => ContentLayout::Anchor,
        }
    }

    /// Resolves `options` to pixels.
    #[must_use]
    pub fn resolve(&self, options: &PanelOptions) -> ResolvedPanel {
        check_fraction("width", options.width);
        check_fraction("height", options.height);
        if let PanelPadding::Uniform(p) = options.padding {
            check_fraction("padding", p);
        }

        let size = self.size(options.width, options.height);
        let placement = AnchorLayoutData::new(
            options.anchor,
            self.padding_insets(options.anchor, options.padding),
        );
        ResolvedPanel {
            size,
            placement,
            content: self.content_layout(options.layout),
            rect: placement.place(self.screen.screen_rect(), size),
            caching: options.caching,
        }
    }

    /// Builds a panel from `options`, drawn with the standard panel background.
    #[must_use]
    pub fn build(&self, options: &PanelOptions, res: &UiResources) -> Panel {
        let resolved = self.resolve(options);
        debug!(
            x = resolved.rect.x,
            y = resolved.rect.y,
            width = resolved.rect.width,
            height = resolved.rect.height,
            "panel built"
        );
        Panel::new(
            resolved.rect,
            res.panel.clone(),
            resolved.content,
            resolved.placement,
        )
    }
}

/// Leading/trailing padding on one axis.
const fn split_padding(position: AnchorPosition, amount: i32) -> (i32, i32) {
    match position {
        AnchorPosition::Start => (amount, 0),
        AnchorPosition::End => (0, amount),
        AnchorPosition::Center => (0, 0),
    }
}

fn check_fraction(field: &'static str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        warn!(field, value, "panel fraction outside [0, 1]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Widget;

    fn builder() -> PanelBuilder {
        PanelBuilder::new(ScreenLayout::new(1920, 1080, 32))
    }

    #[test]
    fn test_size_truncates() {
        let b = builder();
        for &(w, h) in &[(0.0, 0.0), (0.15, 0.08), (0.33, 0.333), (0.45, 0.75), (1.0, 1.0)] {
            let resolved = b.resolve(&PanelOptions::new().size(w, h));
            let expected = ((1920.0 * w) as i32, (1080.0 * h) as i32);
            assert_eq!(resolved.size, expected);
        }
        assert_eq!(b.size(0.15, 0.08), (288, 86));
    }

    #[test]
    fn test_start_padding_on_leading_edge() {
        let b = builder();
        let insets = b.padding_insets(Anchor::TOP_LEFT, PanelPadding::Uniform(0.015));
        assert_eq!(insets, Insets { left: 28, right: 0, top: 16, bottom: 0 });
    }

    #[test]
    fn test_end_padding_on_trailing_edge() {
        let b = builder();
        let insets = b.padding_insets(Anchor::BOTTOM_RIGHT, PanelPadding::Uniform(0.015));
        assert_eq!(insets, Insets { left: 0, right: 28, top: 0, bottom: 16 });
    }

    #[test]
    fn test_center_gets_no_padding() {
        let b = builder();
        let insets = b.padding_insets(Anchor::CENTER, PanelPadding::Uniform(0.05));
        assert_eq!(insets, Insets::ZERO);

        let top = b.padding_insets(Anchor::TOP_CENTER, PanelPadding::Uniform(0.05));
        assert_eq!((top.left, top.right), (0, 0));
        assert_eq!(top.top, 54);
    }

    #[test]
    fn test_zero_padding_is_none() {
        let insets = builder().padding_insets(Anchor::TOP_LEFT, PanelPadding::Uniform(0.0));
        assert_eq!(insets, Insets::ZERO);
    }

    #[test]
    fn test_custom_padding_overrides() {
        let custom = Insets { left: 3, right: 4, top: 5, bottom: 6 };
        let options = PanelOptions::new().top_left().padding(0.5).custom_padding(custom);
        let resolved = builder().resolve(&options);
        assert_eq!(resolved.placement.padding, custom);
    }

    #[test]
    fn test_resolve_placement() {
        let b = builder();

        let turn_order = b.resolve(&PanelOptions::new().top_center().size(0.4, 0.08).padding(0.015));
        assert_eq!(turn_order.rect, Rect::new(576, 16, 768, 86));

        let log = b.resolve(&PanelOptions::new().bottom_right().size(0.15, 0.15).padding(0.015));
        assert_eq!(log.rect, Rect::new(1920 - 28 - 288, 1080 - 16 - 162, 288, 162));

        let centered = b.resolve(&PanelOptions::new());
        assert_eq!(centered.rect, Rect::new(768, 378, 384, 324));
    }

    #[test]
    fn test_out_of_range_fractions_pass_through() {
        let resolved = builder().resolve(&PanelOptions::new().top_left().size(-0.1, 1.5));
        assert_eq!(resolved.size, (-192, 1620));
    }

    #[test]
    fn test_row_layout_padding_and_spacing() {
        let b = builder();
        match b.content_layout(LayoutKind::Row) {
            ContentLayout::Row(row) => {
                assert_eq!(row.padding, Insets::uniform(24));
                assert_eq!(row.spacing, 5);
            }
            ContentLayout::Anchor => panic!("expected row"),
        }
        match b.content_layout(LayoutKind::HorizontalRow) {
            ContentLayout::Row(row) => assert_eq!(row.spacing, 10),
            ContentLayout::Anchor => panic!("expected row"),
        }
    }

    #[test]
    fn test_layout_presets() {
        let options = PanelOptions::new().horizontal_row_layout();
        assert_eq!(options.layout, LayoutKind::HorizontalRow);
        assert_eq!(options.anchor_layout().row_layout().layout, LayoutKind::Row);
    }

    #[test]
    fn test_build_panel() {
        let panel = builder().build(&PanelOptions::new().left_center().size(0.15, 0.5), &UiResources::standard());
        assert_eq!(panel.rect(), Rect::new(0, 270, 288, 540));
    }
}
