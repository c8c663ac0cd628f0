//! Squad formation editor.

use tinker_ui::layout::{AnchorLayoutData, RowLayout};
use tinker_ui::widget::Widget;
use tinker_ui::{
    Anchor, Button, CachedList, InputState, Insets, Key, List, NineSlice, Rect, RenderCache,
    ScreenLayout, Surface,
};
use tracing::debug;

use super::names;
use crate::grid_editor::{default_cell_text, GridEditor, GridEditorConfig, GRID_SIZE};
use crate::mode::{ModeRequest, ModeResources, UiContext, UiMode};
use crate::specs::{
    BOTTOM_BUTTON_OFFSET, FORMATION_PALETTE_HEIGHT, FORMATION_PALETTE_WIDTH, PADDING_STANDARD,
};

/// Palette entries. The last one clears a cell.
pub const UNIT_PALETTE: [&str; 4] = ["Tank", "DPS", "Support", "Remove Unit"];

const REMOVE_ENTRY: usize = UNIT_PALETTE.len() - 1;

const BAR_PADDING: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarAction {
    Save,
    Load,
    Close,
}

const BAR_BUTTONS: [(&str, BarAction); 3] = [
    ("Save Formation", BarAction::Save),
    ("Load Formation", BarAction::Load),
    ("Close (ESC)", BarAction::Close),
];

type Formation = [[String; GRID_SIZE]; GRID_SIZE];

/// Unit after `current` when cycling a cell with no palette pick.
fn next_unit(current: &str) -> Option<&'static str> {
    let units = &UNIT_PALETTE[..REMOVE_ENTRY];
    match units.iter().position(|u| *u == current) {
        None => units.first().copied(),
        Some(i) => units.get(i + 1).copied(),
    }
}

/// Grid, unit palette and save/load bar.
#[derive(Debug)]
pub struct FormationEditorMode {
    grid: GridEditor,
    palette: CachedList<String>,
    bar_background: NineSlice,
    bar_rect: Rect,
    bar: Vec<(Button, BarAction)>,
    saved: Option<Formation>,
}

impl FormationEditorMode {
    /// Builds an empty formation.
    #[must_use]
    pub fn new(kit: &ModeResources) -> Self {
        let res = &kit.resources;
        let palette =
            List::new(res).with_entries(UNIT_PALETTE.iter().map(|u| (*u).to_owned()).collect());
        let mut mode = Self {
            grid: GridEditor::new(&kit.screen, &GridEditorConfig::default(), res),
            palette: RenderCache::new(palette),
            bar_background: res.panel.clone(),
            bar_rect: Rect::ZERO,
            bar: BAR_BUTTONS
                .iter()
                .map(|&(text, action)| (Button::new(text, res), action))
                .collect(),
            saved: None,
        };
        mode.place(&kit.screen);
        mode
    }

    /// The formation grid.
    #[must_use]
    pub fn grid(&self) -> &GridEditor {
        &self.grid
    }

    /// Picked palette entry, if any.
    #[must_use]
    pub fn palette_selection(&self) -> Option<&str> {
        self.palette.selected_entry().map(String::as_str)
    }

    /// Palette bounds.
    #[must_use]
    pub fn palette_rect(&self) -> Rect {
        self.palette.rect()
    }

    /// Returns true once a formation has been saved.
    #[must_use]
    pub fn has_saved(&self) -> bool {
        self.saved.is_some()
    }

    /// Screen rect of the bar button with this caption.
    #[must_use]
    pub fn button_rect(&self, text: &str) -> Option<Rect> {
        self.bar
            .iter()
            .find(|(b, _)| b.text() == text)
            .map(|(b, _)| b.rect())
    }

    fn place(&mut self, screen: &ScreenLayout) {
        let whole = screen.screen_rect();

        let palette_anchor = AnchorLayoutData::new(
            Anchor::LEFT_CENTER,
            Insets {
                left: screen.width_fraction(PADDING_STANDARD),
                ..Insets::ZERO
            },
        );
        let palette_size = (
            screen.width_fraction(FORMATION_PALETTE_WIDTH),
            screen.height_fraction(FORMATION_PALETTE_HEIGHT),
        );
        self.palette.set_rect(palette_anchor.place(whole, palette_size));

        let row = RowLayout::horizontal().with_padding(Insets {
            left: BAR_PADDING,
            right: BAR_PADDING,
            ..Insets::ZERO
        });
        let sizes: Vec<_> = self.bar.iter().map(|(b, _)| b.min_size()).collect();
        let gaps = i32::try_from(sizes.len().saturating_sub(1)).unwrap_or(0) * row.spacing;
        let bar_size = (
            sizes.iter().map(|s| s.0).sum::<i32>() + gaps + 2 * BAR_PADDING,
            sizes.iter().map(|s| s.1).max().unwrap_or(0),
        );
        let bar_anchor = AnchorLayoutData::new(
            Anchor::BOTTOM_CENTER,
            Insets {
                bottom: screen.height_fraction(BOTTOM_BUTTON_OFFSET),
                ..Insets::ZERO
            },
        );
        self.bar_rect = bar_anchor.place(whole, bar_size);
        for ((button, _), rect) in self.bar.iter_mut().zip(row.arrange(self.bar_rect, &sizes)) {
            button.set_rect(rect);
        }
    }

    fn snapshot(&self) -> Formation {
        std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                self.grid
                    .cell_text(row, col)
                    .map_or_else(|| default_cell_text(row, col), str::to_owned)
            })
        })
    }

    fn place_unit(&mut self, row: usize, col: usize, messages: &mut Vec<String>) {
        let current = self.grid.cell_text(row, col).unwrap_or_default();
        let unit = match self.palette.selected() {
            Some(REMOVE_ENTRY) => None,
            Some(i) => UNIT_PALETTE.get(i).copied(),
            None => next_unit(current),
        };

        match unit {
            Some(unit) => {
                self.grid.set_cell_text(row, col, unit);
                messages.push(format!("Placed {unit} at [{row},{col}]"));
            }
            None => {
                self.grid.set_cell_text(row, col, default_cell_text(row, col));
                messages.push(format!("Removed unit at [{row},{col}]"));
            }
        }
    }

    fn run(&mut self, action: BarAction, messages: &mut Vec<String>) -> Option<ModeRequest> {
        match action {
            BarAction::Save => {
                self.saved = Some(self.snapshot());
                debug!("formation saved");
                messages.push("Formation saved".to_owned());
            }
            BarAction::Load => match self.saved.clone() {
                Some(formation) => {
                    for (row, cells) in formation.into_iter().enumerate() {
                        for (col, text) in cells.into_iter().enumerate() {
                            self.grid.set_cell_text(row, col, text);
                        }
                    }
                    debug!("formation loaded");
                    messages.push("Formation loaded".to_owned());
                }
                None => messages.push("No saved formation".to_owned()),
            },
            BarAction::Close => {
                return Some(ModeRequest::new(names::EXPLORATION, "Close Formation Editor"));
            }
        }
        None
    }
}

impl UiMode for FormationEditorMode {
    fn name(&self) -> &str {
        names::FORMATION_EDITOR
    }

    fn resize(&mut self, screen: &ScreenLayout) {
        self.grid.resize(screen);
        self.place(screen);
    }

    fn update(&mut self, ctx: &mut UiContext<'_>, input: &InputState) -> Option<ModeRequest> {
        if input.key_pressed(Key::Escape) {
            return Some(ModeRequest::new(names::EXPLORATION, "Close Formation Editor"));
        }

        let mut action = None;
        for (button, kind) in &mut self.bar {
            if button.update(input).clicked {
                action = Some(*kind);
            }
        }
        if let Some(action) = action {
            return self.run(action, ctx.messages);
        }

        self.palette.update(input);
        if let Some((row, col)) = self.grid.update(input) {
            self.place_unit(row, col, ctx.messages);
        }
        None
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        self.grid.render(surface);
        self.palette.render_cached(surface);
        self.bar_background.draw(surface, self.bar_rect);
        for (button, _) in &self.bar {
            button.render(surface);
        }
    }

    fn dispose(&mut self) {
        self.grid.dispose();
        self.palette.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Inventory;
    use tinker_ui::{MouseButton, PixelBuffer};

    fn mode() -> FormationEditorMode {
        FormationEditorMode::new(&ModeResources::default())
    }

    fn click(x: i32, y: i32) -> InputState {
        let mut input = InputState::new();
        input.set_mouse_pos(x, y);
        input.mouse_button_down(MouseButton::Left, 0.0);
        input
    }

    fn center(rect: Rect) -> (i32, i32) {
        (rect.x + rect.width / 2, rect.y + rect.height / 2)
    }

    fn step(mode: &mut FormationEditorMode, input: &InputState) -> (Option<ModeRequest>, Vec<String>) {
        let mut inventory = Inventory::new();
        let mut messages = Vec::new();
        let mut commands = Vec::new();
        let mut ctx = UiContext {
            inventory: &mut inventory,
            stats: None,
            loadout: None,
            messages: &mut messages,
            commands: &mut commands,
        };
        let request = mode.update(&mut ctx, input);
        (request, messages)
    }

    fn click_cell(mode: &mut FormationEditorMode, row: usize, col: usize) -> Vec<String> {
        let rect = mode.grid().cell(row, col).map(Widget::rect).unwrap_or(Rect::ZERO);
        let (x, y) = center(rect);
        step(mode, &click(x, y)).1
    }

    fn pick(mode: &mut FormationEditorMode, entry: usize) {
        let rect = mode.palette_rect();
        let row_h = 46;
        let y = rect.y + row_h * i32::try_from(entry).unwrap() + row_h / 2;
        step(mode, &click(rect.x + 20, y));
    }

    #[test]
    fn test_cell_cycles_without_pick() {
        let mut mode = mode();
        assert_eq!(click_cell(&mut mode, 0, 1), vec!["Placed Tank at [0,1]"]);
        click_cell(&mut mode, 0, 1);
        assert_eq!(mode.grid().cell_text(0, 1), Some("DPS"));
        click_cell(&mut mode, 0, 1);
        assert_eq!(mode.grid().cell_text(0, 1), Some("Support"));
        assert_eq!(click_cell(&mut mode, 0, 1), vec!["Removed unit at [0,1]"]);
        assert_eq!(mode.grid().cell_text(0, 1), Some("[0,1]"));
    }

    #[test]
    fn test_palette_pick_places_unit() {
        let mut mode = mode();
        pick(&mut mode, 2);
        assert_eq!(mode.palette_selection(), Some("Support"));

        assert_eq!(click_cell(&mut mode, 2, 2), vec!["Placed Support at [2,2]"]);
        click_cell(&mut mode, 1, 0);
        assert_eq!(mode.grid().cell_text(1, 0), Some("Support"));

        pick(&mut mode, REMOVE_ENTRY);
        click_cell(&mut mode, 2, 2);
        assert_eq!(mode.grid().cell_text(2, 2), Some("[2,2]"));
    }

    #[test]
    fn test_save_and_load() {
        let mut mode = mode();
        let save = mode.button_rect("Save Formation").unwrap();
        let load = mode.button_rect("Load Formation").unwrap();

        let (_, messages) = step(&mut mode, &click(center(load).0, center(load).1));
        assert_eq!(messages, vec!["No saved formation"]);

        click_cell(&mut mode, 1, 1);
        step(&mut mode, &click(center(save).0, center(save).1));
        assert!(mode.has_saved());

        click_cell(&mut mode, 1, 1);
        click_cell(&mut mode, 0, 0);
        assert_eq!(mode.grid().cell_text(1, 1), Some("DPS"));

        let (_, messages) = step(&mut mode, &click(center(load).0, center(load).1));
        assert_eq!(messages, vec!["Formation loaded"]);
        assert_eq!(mode.grid().cell_text(1, 1), Some("Tank"));
        assert_eq!(mode.grid().cell_text(0, 0), Some("[0,0]"));
    }

    #[test]
    fn test_escape_and_close_return_to_exploration() {
        let mut mode = mode();
        let mut input = InputState::new();
        input.key_down(Key::Escape);
        let (request, _) = step(&mut mode, &input);
        assert_eq!(request.map(|r| r.to), Some(names::EXPLORATION.to_owned()));

        let close = mode.button_rect("Close (ESC)").unwrap();
        let (request, _) = step(&mut mode, &click(center(close).0, center(close).1));
        assert_eq!(request.map(|r| r.reason), Some("Close Formation Editor".to_owned()));
    }

    #[test]
    fn test_layout_keeps_palette_clear_of_grid() {
        let mode = mode();
        let palette = mode.palette_rect();
        assert_eq!(palette, Rect::new(38, 162, 384, 756));
        assert!(palette.right() < mode.grid().rect().x);

        let bar = mode.button_rect("Save Formation").unwrap();
        assert_eq!(bar.bottom(), 1080 - 86);

        let mut mode = mode;
        let mut screen = PixelBuffer::new(1920, 1080);
        mode.render(&mut screen);
        assert!(screen.text_runs().iter().any(|run| run.text == "Remove Unit"));
    }
}
