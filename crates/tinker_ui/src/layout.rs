//! Layout system for UI positioning.
//!
//! Everything here works in whole screen pixels. Fractional sizes are
//! resolved against a [`ScreenLayout`] before they reach this module.

use serde::{Deserialize, Serialize};

/// A rectangle in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// X position (left edge).
    pub x: i32,
    /// Y position (top edge).
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Returns the bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns `(width, height)`.
    #[must_use]
    pub const fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Returns true if the rect covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Shrinks the rectangle by per-edge insets.
    #[must_use]
    pub const fn inset(&self, insets: Insets) -> Self {
        Self::new(
            self.x + insets.left,
            self.y + insets.top,
            self.width - insets.left - insets.right,
            self.height - insets.top - insets.bottom,
        )
    }

    /// Moves the rectangle by the given offset.
    #[must_use]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Per-edge pixel padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    /// Left inset.
    pub left: i32,
    /// Right inset.
    pub right: i32,
    /// Top inset.
    pub top: i32,
    /// Bottom inset.
    pub bottom: i32,
}

impl Insets {
    /// No padding on any edge.
    pub const ZERO: Self = Self::uniform(0);

    /// Same inset on all four edges.
    #[must_use]
    pub const fn uniform(amount: i32) -> Self {
        Self {
            left: amount,
            right: amount,
            top: amount,
            bottom: amount,
        }
    }

    /// `horizontal` on left/right, `vertical` on top/bottom.
    #[must_use]
    pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self {
            left: horizontal,
            right: horizontal,
            top: vertical,
            bottom: vertical,
        }
    }

    /// Total horizontal inset.
    #[must_use]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical inset.
    #[must_use]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Placement along a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPosition {
    /// Leading edge (left or top).
    Start,
    /// Centered.
    #[default]
    Center,
    /// Trailing edge (right or bottom).
    End,
}

impl AnchorPosition {
    /// Offset of an item of `size` inside `available` pixels.
    #[must_use]
    pub const fn offset(self, available: i32, size: i32) -> i32 {
        match self {
            Self::Start => 0,
            Self::Center => (available - size) / 2,
            Self::End => available - size,
        }
    }
}

/// Two-axis anchor: one of nine compass/center positions.
///
/// Serialized by name, e.g. `"top_left"` or `"right_center"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Anchor {
    /// Horizontal placement.
    pub horizontal: AnchorPosition,
    /// Vertical placement.
    pub vertical: AnchorPosition,
}

impl Anchor {
    /// Top-left corner.
    pub const TOP_LEFT: Self = Self::new(AnchorPosition::Start, AnchorPosition::Start);
    /// Top edge, centered.
    pub const TOP_CENTER: Self = Self::new(AnchorPosition::Center, AnchorPosition::Start);
    /// Top-right corner.
    pub const TOP_RIGHT: Self = Self::new(AnchorPosition::End, AnchorPosition::Start);
    /// Left edge, centered.
    pub const LEFT_CENTER: Self = Self::new(AnchorPosition::Start, AnchorPosition::Center);
    /// Screen center.
    pub const CENTER: Self = Self::new(AnchorPosition::Center, AnchorPosition::Center);
    /// Right edge, centered.
    pub const RIGHT_CENTER: Self = Self::new(AnchorPosition::End, AnchorPosition::Center);
    /// Bottom-left corner.
    pub const BOTTOM_LEFT: Self = Self::new(AnchorPosition::Start, AnchorPosition::End);
    /// Bottom edge, centered.
    pub const BOTTOM_CENTER: Self = Self::new(AnchorPosition::Center, AnchorPosition::End);
    /// Bottom-right corner.
    pub const BOTTOM_RIGHT: Self = Self::new(AnchorPosition::End, AnchorPosition::End);

    /// Creates an anchor from its two axis positions.
    #[must_use]
    pub const fn new(horizontal: AnchorPosition, vertical: AnchorPosition) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl Anchor {
    const NAMED: [(&'static str, Self); 9] = [
        ("top_left", Self::TOP_LEFT),
        ("top_center", Self::TOP_CENTER),
        ("top_right", Self::TOP_RIGHT),
        ("left_center", Self::LEFT_CENTER),
        ("center", Self::CENTER),
        ("right_center", Self::RIGHT_CENTER),
        ("bottom_left", Self::BOTTOM_LEFT),
        ("bottom_center", Self::BOTTOM_CENTER),
        ("bottom_right", Self::BOTTOM_RIGHT),
    ];

    /// Looks up an anchor by its snake_case name. `left_bottom` and
    /// `right_bottom` are accepted as aliases of the bottom corners.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left_bottom" => Some(Self::BOTTOM_LEFT),
            "right_bottom" => Some(Self::BOTTOM_RIGHT),
            _ => Self::NAMED.iter().find(|(n, _)| *n == name).map(|&(_, a)| a),
        }
    }

    /// The snake_case name of this anchor.
    #[must_use]
    pub fn name(self) -> &'static str {
        Self::NAMED
            .iter()
            .find(|(_, a)| *a == self)
            .map_or("center", |&(n, _)| n)
    }
}

impl TryFrom<String> for Anchor {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name).ok_or_else(|| format!("unknown anchor `{name}`"))
    }
}

impl From<Anchor> for String {
    fn from(anchor: Anchor) -> Self {
        anchor.name().to_owned()
    }
}

/// Where a child sits inside its parent: anchor plus edge padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorLayoutData {
    /// Anchor inside the parent.
    pub anchor: Anchor,
    /// Padding between the parent's edges and the child.
    pub padding: Insets,
}

impl AnchorLayoutData {
    /// Creates layout data for the given anchor and padding.
    #[must_use]
    pub const fn new(anchor: Anchor, padding: Insets) -> Self {
        Self { anchor, padding }
    }

    /// Places a child of `size` inside `parent`.
    #[must_use]
    pub const fn place(&self, parent: Rect, size: (i32, i32)) -> Rect {
        let inner = parent.inset(self.padding);
        Rect::new(
            inner.x + self.anchor.horizontal.offset(inner.width, size.0),
            inner.y + self.anchor.vertical.offset(inner.height, size.1),
            size.0,
            size.1,
        )
    }
}

/// Screen-relative sizing helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Screen width in pixels.
    pub screen_width: i32,
    /// Screen height in pixels.
    pub screen_height: i32,
    /// Map tile size in pixels.
    pub tile_size: i32,
}

impl ScreenLayout {
    /// Creates a layout for the given screen.
    #[must_use]
    pub const fn new(screen_width: i32, screen_height: i32, tile_size: i32) -> Self {
        Self {
            screen_width,
            screen_height,
            tile_size,
        }
    }

    /// The whole screen as a rect.
    #[must_use]
    pub const fn screen_rect(&self) -> Rect {
        Rect::new(0, 0, self.screen_width, self.screen_height)
    }

    /// `fraction` of the screen width, truncated toward zero.
    #[inline]
    #[must_use]
    pub fn width_fraction(&self, fraction: f64) -> i32 {
        (f64::from(self.screen_width) * fraction) as i32
    }

    /// `fraction` of the screen height, truncated toward zero.
    #[inline]
    #[must_use]
    pub fn height_fraction(&self, fraction: f64) -> i32 {
        (f64::from(self.screen_height) * fraction) as i32
    }

    /// Centered modal window covering the given fractions of the screen.
    #[must_use]
    pub fn center_window(&self, width_fraction: f64, height_fraction: f64) -> Rect {
        let width = self.width_fraction(width_fraction);
        let height = self.height_fraction(height_fraction);
        Rect::new(
            (self.screen_width - width) / 2,
            (self.screen_height - height) / 2,
            width,
            height,
        )
    }

    /// Two-column content area: 2% margins, bottom 12% left for a close button.
    #[must_use]
    pub fn grid_layout_area(&self) -> Rect {
        let margin = 0.02;
        Rect::new(
            self.width_fraction(margin),
            self.height_fraction(margin),
            self.screen_width - self.width_fraction(margin * 2.0),
            self.screen_height - self.height_fraction(0.12),
        )
    }

    /// Padding scaled to the screen: width-based on left/right, height-based on top/bottom.
    #[must_use]
    pub fn responsive_insets(&self, fraction: f64) -> Insets {
        Insets::symmetric(self.width_fraction(fraction), self.height_fraction(fraction))
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self::new(1920, 1080, 32)
    }
}

/// Layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Horizontal (left to right).
    Horizontal,
    /// Vertical (top to bottom).
    #[default]
    Vertical,
}

/// Cross-axis alignment of row children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Align to start (left/top).
    #[default]
    Start,
    /// Align to center.
    Center,
    /// Align to end (right/bottom).
    End,
    /// Stretch to fill available space.
    Stretch,
}

/// Stacks children along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    /// Stacking direction.
    pub direction: Direction,
    /// Gap between children.
    pub spacing: i32,
    /// Padding around content.
    pub padding: Insets,
    /// Cross axis alignment.
    pub cross_alignment: Alignment,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::vertical()
    }
}

impl RowLayout {
    /// Vertical stack with the default 5px spacing.
    #[must_use]
    pub const fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            spacing: 5,
            padding: Insets::ZERO,
            cross_alignment: Alignment::Start,
        }
    }

    /// Horizontal stack with the default 10px spacing.
    #[must_use]
    pub const fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            spacing: 10,
            padding: Insets::ZERO,
            cross_alignment: Alignment::Start,
        }
    }

    /// Sets the gap between elements.
    #[must_use]
    pub const fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets padding around content.
    #[must_use]
    pub const fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Sets cross axis alignment.
    #[must_use]
    pub const fn align_cross(mut self, alignment: Alignment) -> Self {
        self.cross_alignment = alignment;
        self
    }

    /// Lays out a list of sizes within the given bounds.
    ///
    /// Returns the rect for each element, in order.
    #[must_use]
    pub fn arrange(&self, bounds: Rect, sizes: &[(i32, i32)]) -> Vec<Rect> {
        let content = bounds.inset(self.padding);
        let mut results = Vec::with_capacity(sizes.len());

        match self.direction {
            Direction::Horizontal => {
                let mut x = content.x;
                for &(w, h) in sizes {
                    let (y, height) = self.cross(content.y, content.height, h);
                    results.push(Rect::new(x, y, w, height));
                    x += w + self.spacing;
                }
            }
            Direction::Vertical => {
                let mut y = content.y;
                for &(w, h) in sizes {
                    let (x, width) = self.cross(content.x, content.width, w);
                    results.push(Rect::new(x, y, width, h));
                    y += h + self.spacing;
                }
            }
        }

        results
    }

    /// Position and extent on the cross axis.
    const fn cross(&self, start: i32, available: i32, size: i32) -> (i32, i32) {
        match self.cross_alignment {
            Alignment::Start => (start, size),
            Alignment::Center => (start + (available - size) / 2, size),
            Alignment::End => (start + available - size, size),
            Alignment::Stretch => (start, available),
        }
    }
}

/// Equal-sized stretched cells, filled row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of columns.
    pub columns: usize,
    /// Horizontal and vertical gap between cells.
    pub spacing: (i32, i32),
    /// Padding around the grid.
    pub padding: Insets,
}

impl GridLayout {
    /// Creates a grid with the given column count.
    #[must_use]
    pub const fn new(columns: usize) -> Self {
        Self {
            columns,
            spacing: (5, 5),
            padding: Insets::ZERO,
        }
    }

    /// Sets cell spacing.
    #[must_use]
    pub const fn with_spacing(mut self, horizontal: i32, vertical: i32) -> Self {
        self.spacing = (horizontal, vertical);
        self
    }

    /// Sets padding around the grid.
    #[must_use]
    pub const fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Splits `bounds` into `count` cells.
    #[must_use]
    pub fn arrange(&self, bounds: Rect, count: usize) -> Vec<Rect> {
        if count == 0 || self.columns == 0 {
            return Vec::new();
        }

        let content = bounds.inset(self.padding);
        let columns = self.columns as i32;
        let rows = count.div_ceil(self.columns) as i32;
        let cell_w = (content.width - self.spacing.0 * (columns - 1)) / columns;
        let cell_h = (content.height - self.spacing.1 * (rows - 1)) / rows;

        (0..count)
            .map(|i| {
                let col = (i % self.columns) as i32;
                let row = (i / self.columns) as i32;
                Rect::new(
                    content.x + col * (cell_w + self.spacing.0),
                    content.y + row * (cell_h + self.spacing.1),
                    cell_w,
                    cell_h,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10, 20, 100, 50);

        assert!(rect.contains(50, 30));
        assert!(!rect.contains(5, 30));
        assert!(!rect.contains(50, 80));
        assert!(!rect.contains(110, 30));
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 60, 100, 100);

        assert_eq!(a.intersection(&b), Some(Rect::new(50, 60, 50, 40)));
        assert_eq!(a.intersection(&Rect::new(200, 0, 10, 10)), None);
    }

    #[test]
    fn test_row_layout_horizontal() {
        let layout = RowLayout::horizontal().with_spacing(10);
        let bounds = Rect::new(0, 0, 200, 50);
        let sizes = [(30, 20), (40, 20), (30, 20)];

        let result = layout.arrange(bounds, &sizes);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].x, 0);
        assert_eq!(result[1].x, 40); // 30 + 10 gap
        assert_eq!(result[2].x, 90); // 40 + 40 + 10 gap
    }

    #[test]
    fn test_row_layout_vertical_padding_and_stretch() {
        let layout = RowLayout::vertical()
            .with_padding(Insets::uniform(4))
            .align_cross(Alignment::Stretch);
        let result = layout.arrange(Rect::new(0, 0, 100, 100), &[(10, 20), (10, 30)]);

        assert_eq!(result[0], Rect::new(4, 4, 92, 20));
        assert_eq!(result[1], Rect::new(4, 29, 92, 30));
    }

    #[test]
    fn test_anchor_place() {
        let parent = Rect::new(0, 0, 800, 600);

        let top_left = AnchorLayoutData::new(Anchor::TOP_LEFT, Insets { left: 10, top: 5, ..Insets::ZERO });
        assert_eq!(top_left.place(parent, (100, 50)), Rect::new(10, 5, 100, 50));

        let bottom_right = AnchorLayoutData::new(Anchor::BOTTOM_RIGHT, Insets { right: 10, bottom: 5, ..Insets::ZERO });
        assert_eq!(bottom_right.place(parent, (100, 50)), Rect::new(690, 545, 100, 50));

        let center = AnchorLayoutData::new(Anchor::CENTER, Insets::ZERO);
        assert_eq!(center.place(parent, (100, 50)), Rect::new(350, 275, 100, 50));
    }

    #[test]
    fn test_anchor_names() {
        assert_eq!(Anchor::from_name("left_bottom"), Some(Anchor::BOTTOM_LEFT));
        assert_eq!(Anchor::from_name("sideways"), None);
        assert_eq!(Anchor::RIGHT_CENTER.name(), "right_center");
    }

    #[test]
    fn test_center_window() {
        let screen = ScreenLayout::new(800, 600, 32);
        assert_eq!(screen.center_window(0.5, 0.5), Rect::new(200, 150, 400, 300));
    }

    #[test]
    fn test_grid_layout_area() {
        let screen = ScreenLayout::new(1000, 500, 32);
        assert_eq!(screen.grid_layout_area(), Rect::new(20, 10, 960, 440));
    }

    #[test]
    fn test_grid_layout_cells() {
        let grid = GridLayout::new(3).with_spacing(5, 5);
        let cells = grid.arrange(Rect::new(0, 0, 310, 310), 9);

        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Rect::new(0, 0, 100, 100));
        assert_eq!(cells[4], Rect::new(105, 105, 100, 100));
        assert_eq!(cells[8], Rect::new(210, 210, 100, 100));
    }
}
