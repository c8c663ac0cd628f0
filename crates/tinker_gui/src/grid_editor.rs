//! 3x3 formation grid.

use tinker_ui::layout::GridLayout;
use tinker_ui::widget::Widget;
use tinker_ui::{Button, CachedBackground, InputState, Insets, Rect, ScreenLayout, Surface, UiResources};

use crate::specs::{FORMATION_GRID_HEIGHT, FORMATION_GRID_WIDTH, PADDING_EXTRA_SMALL};

/// Rows and columns in a formation.
pub const GRID_SIZE: usize = 3;

/// Cell caption of a fresh grid.
#[must_use]
pub fn default_cell_text(row: usize, col: usize) -> String {
    format!("[{row},{col}]")
}

/// Grid editor options.
#[derive(Debug, Clone, Copy)]
pub struct GridEditorConfig {
    /// Initial caption of each cell.
    pub cell_text: fn(usize, usize) -> String,
    /// Padding around the cells. Defaults to 1.25% of the screen width.
    pub padding: Option<Insets>,
}

impl Default for GridEditorConfig {
    fn default() -> Self {
        Self {
            cell_text: default_cell_text,
            padding: None,
        }
    }
}

/// A centered 3x3 grid of cell buttons on a static background.
#[derive(Debug)]
pub struct GridEditor {
    rect: Rect,
    padding: Option<Insets>,
    background: CachedBackground,
    cells: [[Button; GRID_SIZE]; GRID_SIZE],
}

impl GridEditor {
    /// Builds the grid centered on `screen`.
    #[must_use]
    pub fn new(screen: &ScreenLayout, config: &GridEditorConfig, res: &UiResources) -> Self {
        let cell_padding = Insets::uniform(screen.width_fraction(PADDING_EXTRA_SMALL * 0.8));
        let cells = std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                Button::new((config.cell_text)(row, col), res).with_padding(cell_padding)
            })
        });

        let mut editor = Self {
            rect: Rect::ZERO,
            padding: config.padding,
            background: CachedBackground::new(res.panel.clone()),
            cells,
        };
        editor.resize(screen);
        editor
    }

    /// Recomputes the grid and cell rects for a new screen size.
    pub fn resize(&mut self, screen: &ScreenLayout) {
        self.rect = screen.center_window(FORMATION_GRID_WIDTH, FORMATION_GRID_HEIGHT);
        let padding = self
            .padding
            .unwrap_or_else(|| Insets::uniform(screen.width_fraction(PADDING_EXTRA_SMALL)));
        let rects = GridLayout::new(GRID_SIZE)
            .with_spacing(5, 5)
            .with_padding(padding)
            .arrange(self.rect, GRID_SIZE * GRID_SIZE);

        for (i, rect) in rects.into_iter().enumerate() {
            self.cells[i / GRID_SIZE][i % GRID_SIZE].set_rect(rect);
        }
    }

    /// Grid bounds.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// The cell button at `(row, col)`.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Button> {
        self.cells.get(row)?.get(col)
    }

    /// Caption of the cell at `(row, col)`.
    #[must_use]
    pub fn cell_text(&self, row: usize, col: usize) -> Option<&str> {
        self.cell(row, col).map(Button::text)
    }

    /// Replaces a cell caption. Returns false for an out-of-range cell.
    pub fn set_cell_text(&mut self, row: usize, col: usize, text: impl Into<String>) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                cell.set_text(text);
                true
            }
            None => false,
        }
    }

    /// Handles input. Returns the clicked cell.
    pub fn update(&mut self, input: &InputState) -> Option<(usize, usize)> {
        let mut clicked = None;
        for (row, cells) in self.cells.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                if cell.update(input).clicked {
                    clicked = Some((row, col));
                }
            }
        }
        clicked
    }

    /// Draws the background and cells.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        let image = self.background.image(self.rect.width, self.rect.height);
        surface.blit(image, self.rect.x, self.rect.y);
        for cell in self.cells.iter().flatten() {
            cell.render(surface);
        }
    }

    /// Releases the background buffer.
    pub fn dispose(&mut self) {
        self.background.dispose();
    }
}
