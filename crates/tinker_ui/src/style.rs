//! Colors, font faces and the shared resource set handed to widgets.
//!
//! There are no process-wide style globals: a [`UiResources`] is built when a
//! UI mode initializes and passed to every constructor that needs it.

use crate::layout::Insets;
use crate::nine_slice::NineSlice;
use crate::surface::Rgba8;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Default widget background.
    pub const WIDGET_BACKGROUND: Self = Self::hex_rgb(0x13_1a_22);
    /// Idle text.
    pub const TEXT_IDLE: Self = Self::hex_rgb(0xdf_f4_ff);
    /// Disabled text.
    pub const TEXT_DISABLED: Self = Self::hex_rgb(0x5a_7a_91);
    /// Selected list entry background.
    pub const LIST_SELECTED: Self = Self::hex_rgb(0x4b_68_7a);
    /// Focused list entry background (also disabled-selected).
    pub const LIST_FOCUSED: Self = Self::hex_rgb(0x2a_39_44);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Creates an opaque color from hex value (0xRRGGBB).
    #[must_use]
    pub const fn hex_rgb(hex: u32) -> Self {
        Self::hex((hex << 8) | 0xFF)
    }

    /// Quantizes to an 8-bit pixel.
    #[must_use]
    pub fn to_rgba8(self) -> Rgba8 {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba8::new(q(self.r), q(self.g), q(self.b), q(self.a))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A font face descriptor. Glyph rasterization belongs to the host engine.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    /// Font family name.
    pub family: String,
    /// Point size.
    pub size: f32,
}

impl FontFace {
    /// Default family used by the game UI.
    pub const DEFAULT_FAMILY: &'static str = "goregular";

    /// Creates a face of the default family at `size`.
    #[must_use]
    pub fn new(size: f32) -> Self {
        Self {
            family: Self::DEFAULT_FAMILY.to_owned(),
            size,
        }
    }

    /// Body text face.
    #[must_use]
    pub fn small() -> Self {
        Self::new(30.0)
    }

    /// Heading face.
    #[must_use]
    pub fn large() -> Self {
        Self::new(50.0)
    }

    /// Approximate advance of one character, for wrapping and sizing.
    #[must_use]
    pub fn char_width(&self) -> i32 {
        (self.size * 0.5).ceil() as i32
    }

    /// Line height in pixels.
    #[must_use]
    pub fn line_height(&self) -> i32 {
        (self.size * 6.0 / 5.0).ceil() as i32
    }

    /// Approximate pixel size of a single line of `text`.
    #[must_use]
    pub fn measure(&self, text: &str) -> (i32, i32) {
        (text.chars().count() as i32 * self.char_width(), self.line_height())
    }
}

/// Button background per interaction state.
#[derive(Debug, Clone)]
pub struct ButtonImages {
    /// Resting.
    pub idle: NineSlice,
    /// Mouse over.
    pub hover: NineSlice,
    /// Held down.
    pub pressed: NineSlice,
    /// Not interactive.
    pub disabled: NineSlice,
}

/// Scroll-container backgrounds for lists and text areas.
#[derive(Debug, Clone)]
pub struct ScrollImages {
    /// Enabled background.
    pub idle: NineSlice,
    /// Disabled background.
    pub disabled: NineSlice,
    /// Scrollbar track.
    pub track: NineSlice,
    /// Scrollbar handle.
    pub handle: NineSlice,
}

/// List entry colors.
#[derive(Debug, Clone, Copy)]
pub struct EntryColors {
    /// Unselected text.
    pub unselected: Color,
    /// Selected text.
    pub selected: Color,
    /// Disabled text.
    pub disabled: Color,
    /// Selected entry background.
    pub selected_background: Color,
    /// Focused entry background.
    pub focused_background: Color,
}

/// Every font, image and color a UI mode draws with.
#[derive(Debug, Clone)]
pub struct UiResources {
    /// Body text face.
    pub small_face: FontFace,
    /// Heading face.
    pub large_face: FontFace,
    /// Panel background.
    pub panel: NineSlice,
    /// Panel title bar.
    pub title_bar: NineSlice,
    /// Default panel content padding.
    pub panel_padding: Insets,
    /// Plain widget background.
    pub widget_background: NineSlice,
    /// Button backgrounds.
    pub button: ButtonImages,
    /// Button text padding.
    pub button_padding: Insets,
    /// List and text area backgrounds.
    pub scroll: ScrollImages,
    /// Scrollbar width in pixels.
    pub scrollbar_width: i32,
    /// List entry colors.
    pub entry: EntryColors,
    /// List entry padding.
    pub entry_padding: Insets,
    /// Idle text color.
    pub text: Color,
    /// Disabled text color.
    pub text_disabled: Color,
}

impl UiResources {
    /// The standard palette built entirely from solid slices.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            small_face: FontFace::small(),
            large_face: FontFace::large(),
            panel: NineSlice::solid(Color::hex_rgb(0x1c_26_31)),
            title_bar: NineSlice::solid(Color::hex_rgb(0x2a_39_44)),
            panel_padding: Insets {
                left: 30,
                right: 30,
                top: 20,
                bottom: 20,
            },
            widget_background: NineSlice::solid(Color::WIDGET_BACKGROUND),
            button: ButtonImages {
                idle: NineSlice::solid(Color::hex_rgb(0x3a_50_61)),
                hover: NineSlice::solid(Color::hex_rgb(0x4b_68_7a)),
                pressed: NineSlice::solid(Color::hex_rgb(0x2a_39_44)),
                disabled: NineSlice::solid(Color::hex_rgb(0x22_2b_33)),
            },
            button_padding: Insets::symmetric(30, 5),
            scroll: ScrollImages {
                idle: NineSlice::solid(Color::WIDGET_BACKGROUND),
                disabled: NineSlice::solid(Color::hex_rgb(0x0d_12_17)),
                track: NineSlice::solid(Color::hex_rgb(0x22_2b_33)),
                handle: NineSlice::solid(Color::hex_rgb(0x5a_7a_91)),
            },
            scrollbar_width: 20,
            entry: EntryColors {
                unselected: Color::TEXT_IDLE,
                selected: Color::TEXT_IDLE,
                disabled: Color::TEXT_DISABLED,
                selected_background: Color::LIST_SELECTED,
                focused_background: Color::LIST_FOCUSED,
            },
            entry_padding: Insets::uniform(5),
            text: Color::TEXT_IDLE,
            text_disabled: Color::TEXT_DISABLED,
        }
    }
}

impl Default for UiResources {
    fn default() -> Self {
        Self::standard()
    }
}
