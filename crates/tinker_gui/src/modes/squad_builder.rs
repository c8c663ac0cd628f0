//! Squad builder.
//!
//! Roster units go from the palette onto the 3x3 grid. A click on an
//! occupied cell takes its unit back off. The first unit in row-major
//! order can be made leader, and a named squad with a leader is handed to
//! the game as [`GameCommand::CreateSquad`].

use tinker_ui::layout::{AnchorLayoutData, RowLayout};
use tinker_ui::widget::Widget;
use tinker_ui::{
    Anchor, BackgroundPool, Button, CachedList, CachedTextArea, InputState, Insets, Key, Label,
    List, Panel, Rect, RenderCache, ScreenLayout, Surface, TextArea, TextInput,
};
use tracing::{debug, info, warn};

use super::{names, panels};
use crate::error::GuiResult;
use crate::grid_editor::{GridEditor, GridEditorConfig, GRID_SIZE};
use crate::mode::{GameCommand, ModeRequest, ModeResources, UiContext, UiMode};
use crate::registry::detail_rect;
use crate::specs::BOTTOM_BUTTON_OFFSET;
use crate::squad::{SquadDraft, UnitTemplate};

/// Unit details text while no unit is picked.
pub const NO_UNIT_TEXT: &str = "Select a unit to view details";

/// First palette entry; picking it drops the current unit pick.
const REMOVE_ENTRY_TEXT: &str = "[Remove Unit]";

const NAME_PLACEHOLDER: &str = "Enter squad name...";
const NAME_MAX_CHARS: usize = 24;
/// Width of the name field, as a fraction of the screen width.
const NAME_FIELD_WIDTH: f64 = 0.2;
const NAME_BAR_TOP: i32 = 20;

/// Capacity display size, as fractions of the screen.
const CAPACITY_WIDTH: f64 = 0.18;
const CAPACITY_HEIGHT: f64 = 0.15;
const CAPACITY_RIGHT: i32 = 20;
const CAPACITY_TOP: i32 = 80;

const BAR_PADDING: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarAction {
    Create,
    Clear,
    ToggleLeader,
    Close,
}

const BAR_BUTTONS: [(&str, BarAction); 4] = [
    ("Create Squad", BarAction::Create),
    ("Clear Grid", BarAction::Clear),
    ("Toggle Leader (L)", BarAction::ToggleLeader),
    ("Close (ESC)", BarAction::Close),
];

fn empty_cell_text(row: usize, col: usize) -> String {
    format!("Empty [{row},{col}]")
}

fn close_request() -> ModeRequest {
    ModeRequest::new(names::EXPLORATION, "Close Squad Builder")
}

/// Palette, unit details, grid, capacity readout, name field and action
/// bar.
#[derive(Debug)]
pub struct SquadBuilderMode {
    kit: ModeResources,
    roster: Vec<UnitTemplate>,
    draft: SquadDraft,
    grid: GridEditor,
    palette_panel: Panel,
    palette: CachedList<String>,
    detail_panel: Panel,
    unit_detail: CachedTextArea,
    capacity: CachedTextArea,
    name_rect: Rect,
    name_label: Label,
    name_input: TextInput,
    bar_rect: Rect,
    bar: Vec<(Button, BarAction)>,
    backgrounds: BackgroundPool,
}

impl SquadBuilderMode {
    /// Builds an empty builder offering the configured roster.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPanel` if the registry lacks `squad_list` or
    /// `squad_detail`.
    pub fn new(kit: &ModeResources) -> GuiResult<Self> {
        let res = &kit.resources;
        let roster = kit.roster.clone();

        let mut entries = vec![REMOVE_ENTRY_TEXT.to_owned()];
        entries.extend(roster.iter().map(UnitTemplate::palette_label));

        let config = GridEditorConfig {
            cell_text: empty_cell_text,
            ..GridEditorConfig::default()
        };

        let mut mode = Self {
            kit: kit.clone(),
            roster,
            draft: SquadDraft::new(),
            grid: GridEditor::new(&kit.screen, &config, res),
            palette_panel: Self::palette_frame(kit)?,
            palette: RenderCache::new(List::new(res).with_entries(entries)),
            detail_panel: Self::detail_frame(kit)?,
            unit_detail: RenderCache::new(TextArea::new(res).with_text(NO_UNIT_TEXT)),
            capacity: RenderCache::new(TextArea::new(res)),
            name_rect: Rect::ZERO,
            name_label: Label::new("Squad Name:", res.large_face.clone(), res.text),
            name_input: TextInput::new(res)
                .with_placeholder(NAME_PLACEHOLDER)
                .with_max_chars(NAME_MAX_CHARS),
            bar_rect: Rect::ZERO,
            bar: BAR_BUTTONS
                .iter()
                .map(|&(text, action)| (Button::new(text, res), action))
                .collect(),
            backgrounds: BackgroundPool::new(res.panel.clone()),
        };
        mode.place(&kit.screen);
        mode.sync_draft();
        Ok(mode)
    }

    /// The squad being built.
    #[must_use]
    pub fn draft(&self) -> &SquadDraft {
        &self.draft
    }

    /// The squad grid.
    #[must_use]
    pub fn grid(&self) -> &GridEditor {
        &self.grid
    }

    /// Palette bounds.
    #[must_use]
    pub fn palette_rect(&self) -> Rect {
        self.palette.rect()
    }

    /// Unit details text.
    #[must_use]
    pub fn unit_detail_text(&self) -> &str {
        self.unit_detail.text()
    }

    /// Capacity readout text.
    #[must_use]
    pub fn capacity_text(&self) -> &str {
        self.capacity.text()
    }

    /// The squad name field.
    #[must_use]
    pub fn name_input(&self) -> &TextInput {
        &self.name_input
    }

    /// Screen rect of the bar button with this caption.
    #[must_use]
    pub fn button_rect(&self, text: &str) -> Option<Rect> {
        self.bar
            .iter()
            .find(|(b, _)| b.text() == text)
            .map(|(b, _)| b.rect())
    }

    /// Number of panel backgrounds rendered so far.
    #[must_use]
    pub fn cached_backgrounds(&self) -> usize {
        self.backgrounds.len()
    }

    fn palette_frame(kit: &ModeResources) -> GuiResult<Panel> {
        kit.registry
            .require(&kit.builder(), panels::SQUAD_LIST, &kit.resources, |o| o.top_left())
    }

    fn detail_frame(kit: &ModeResources) -> GuiResult<Panel> {
        kit.registry
            .require(&kit.builder(), panels::SQUAD_DETAIL, &kit.resources, |o| o)
    }

    fn place(&mut self, screen: &ScreenLayout) {
        let whole = screen.screen_rect();
        self.palette.set_rect(detail_rect(&self.palette_panel));
        self.unit_detail.set_rect(detail_rect(&self.detail_panel));

        let capacity_anchor = AnchorLayoutData::new(
            Anchor::TOP_RIGHT,
            Insets {
                right: CAPACITY_RIGHT,
                top: CAPACITY_TOP,
                ..Insets::ZERO
            },
        );
        let capacity_size = (
            screen.width_fraction(CAPACITY_WIDTH),
            screen.height_fraction(CAPACITY_HEIGHT),
        );
        self.capacity.set_rect(capacity_anchor.place(whole, capacity_size));

        let name_row = RowLayout::horizontal().with_padding(Insets::uniform(BAR_PADDING));
        let (field_w, field_h) = self.name_input.min_size();
        let sizes = [
            self.name_label.min_size(),
            (field_w.max(screen.width_fraction(NAME_FIELD_WIDTH)), field_h),
        ];
        let name_size = (
            sizes[0].0 + sizes[1].0 + name_row.spacing + 2 * BAR_PADDING,
            sizes[0].1.max(sizes[1].1) + 2 * BAR_PADDING,
        );
        let name_anchor = AnchorLayoutData::new(
            Anchor::TOP_CENTER,
            Insets {
                top: NAME_BAR_TOP,
                ..Insets::ZERO
            },
        );
        self.name_rect = name_anchor.place(whole, name_size);
        if let [label, field] = name_row.arrange(self.name_rect, &sizes)[..] {
            self.name_label.set_rect(label);
            self.name_input.set_rect(field);
        }

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

    /// Roster unit behind the palette pick, if a unit is picked.
    fn picked_unit(&self) -> Option<&UnitTemplate> {
        let index = self.palette.selected()?.checked_sub(1)?;
        self.roster.get(index)
    }

    /// Pushes the draft into the grid captions and capacity readout.
    fn sync_draft(&mut self) {
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let text = match self.draft.unit_at(row, col) {
                    Some(placed) if self.draft.is_leader(row, col) => {
                        format!("{} *", placed.unit.palette_label())
                    }
                    Some(placed) => placed.unit.palette_label(),
                    None => empty_cell_text(row, col),
                };
                self.grid.set_cell_text(row, col, text);
            }
        }
        self.capacity.set_text(self.draft.capacity_text());
    }

    fn sync_unit_detail(&mut self) {
        let text = self
            .picked_unit()
            .map_or_else(|| NO_UNIT_TEXT.to_owned(), UnitTemplate::details);
        self.unit_detail.set_text(text);
    }

    fn reset(&mut self) {
        self.draft.clear();
        self.name_input.set_text("");
        self.name_input.set_focused(false);
        self.palette.set_selected(None);
        self.sync_unit_detail();
        self.sync_draft();
    }

    fn click_cell(&mut self, row: usize, col: usize, messages: &mut Vec<String>) {
        if let Some(removed) = self.draft.remove(row, col) {
            messages.push(format!("Removed {} from [{row},{col}]", removed.unit.name));
        } else if let Some(unit) = self.picked_unit().cloned() {
            let name = unit.name.clone();
            match self.draft.place(row, col, unit) {
                Ok(()) => messages.push(format!("Placed {name} at [{row},{col}]")),
                Err(e) => {
                    debug!(unit = %name, error = %e, "placement refused");
                    messages.push(format!("Cannot place {name}: {e}"));
                }
            }
        } else {
            messages.push("Select a unit first".to_owned());
        }
        self.sync_draft();
    }

    fn toggle_leader(&mut self, messages: &mut Vec<String>) {
        match self.draft.toggle_leader() {
            Some((row, col)) => {
                let name = self
                    .draft
                    .unit_at(row, col)
                    .map_or("", |p| p.unit.name.as_str());
                messages.push(format!("Leader: {name}"));
            }
            None if self.draft.is_empty() => messages.push("Place a unit first".to_owned()),
            None => messages.push("Leader cleared".to_owned()),
        }
        self.sync_draft();
    }

    fn create(&mut self, ctx: &mut UiContext<'_>) {
        let name = self.name_input.text().trim().to_owned();
        let refusal = if self.draft.is_empty() {
            Some("Place at least one unit")
        } else if self.draft.leader.is_none() {
            Some("Assign a leader first")
        } else if name.is_empty() {
            Some("Enter a squad name")
        } else {
            None
        };
        if let Some(refusal) = refusal {
            ctx.messages.push(refusal.to_owned());
            return;
        }

        let mut squad = std::mem::take(&mut self.draft);
        squad.name.clone_from(&name);
        let count = squad.units.len();
        info!(squad = %name, units = count, "squad created");
        ctx.messages
            .push(format!("Squad created: {name} with {count} units"));
        ctx.commands.push(GameCommand::CreateSquad(squad));
        self.reset();
    }

    fn run(&mut self, action: BarAction, ctx: &mut UiContext<'_>) -> Option<ModeRequest> {
        match action {
            BarAction::Create => self.create(ctx),
            BarAction::Clear => {
                self.reset();
                ctx.messages.push("Grid cleared".to_owned());
            }
            BarAction::ToggleLeader => self.toggle_leader(ctx.messages),
            BarAction::Close => return Some(close_request()),
        }
        None
    }

    fn draw_background(&mut self, surface: &mut dyn Surface, rect: Rect) {
        let image = self.backgrounds.image(rect.width, rect.height);
        surface.blit(image, rect.x, rect.y);
    }
}

impl UiMode for SquadBuilderMode {
    fn name(&self) -> &str {
        names::SQUAD_BUILDER
    }

    fn enter(&mut self, _ctx: &mut UiContext<'_>, _request: &ModeRequest) -> GuiResult<()> {
        self.reset();
        Ok(())
    }

    fn resize(&mut self, screen: &ScreenLayout) {
        self.kit.screen = *screen;
        match (Self::palette_frame(&self.kit), Self::detail_frame(&self.kit)) {
            (Ok(palette), Ok(detail)) => {
                self.palette_panel = palette;
                self.detail_panel = detail;
            }
            (Err(e), _) | (_, Err(e)) => warn!(error = %e, "squad builder panels kept"),
        }
        self.grid.resize(screen);
        self.backgrounds.clear();
        self.place(screen);
    }

    fn update(&mut self, ctx: &mut UiContext<'_>, input: &InputState) -> Option<ModeRequest> {
        if input.key_pressed(Key::Escape) {
            return Some(close_request());
        }

        self.name_input.update(input);
        if input.key_pressed(Key::L) && !self.name_input.state().is_focused() {
            self.toggle_leader(ctx.messages);
            return None;
        }

        let mut action = None;
        for (button, kind) in &mut self.bar {
            if button.update(input).clicked {
                action = Some(*kind);
            }
        }
        if let Some(action) = action {
            return self.run(action, ctx);
        }

        let before = self.palette.selected();
        self.palette.update(input);
        if self.palette.selected() != before {
            self.sync_unit_detail();
        }

        self.unit_detail.update(input);
        if let Some((row, col)) = self.grid.update(input) {
            self.click_cell(row, col, ctx.messages);
        }
        None
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        self.grid.render(surface);
        self.palette_panel.render(surface);
        self.palette.render_cached(surface);
        self.detail_panel.render(surface);
        self.unit_detail.render_cached(surface);

        let (capacity_rect, name_rect, bar_rect) = (self.capacity.rect(), self.name_rect, self.bar_rect);
        self.draw_background(surface, capacity_rect);
        self.capacity.render_cached(surface);

        self.draw_background(surface, name_rect);
        self.name_label.render(surface);
        self.name_input.render(surface);

        self.draw_background(surface, bar_rect);
        for (button, _) in &self.bar {
            button.render(surface);
        }
    }

    fn dispose(&mut self) {
        self.grid.dispose();
        self.palette.dispose();
        self.unit_detail.dispose();
        self.capacity.dispose();
        self.backgrounds.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Inventory;
    use tinker_ui::{MouseButton, PixelBuffer};

    /// Messages and commands from one frame.
    struct Frame {
        request: Option<ModeRequest>,
        messages: Vec<String>,
        commands: Vec<GameCommand>,
    }

    fn mode() -> SquadBuilderMode {
        let mut mode = SquadBuilderMode::new(&ModeResources::default()).unwrap();
        step(&mut mode, |m, ctx| {
            m.enter(ctx, &ModeRequest::new(names::SQUAD_BUILDER, "open")).unwrap();
            None
        });
        mode
    }

    fn step(
        mode: &mut SquadBuilderMode,
        f: impl FnOnce(&mut SquadBuilderMode, &mut UiContext<'_>) -> Option<ModeRequest>,
    ) -> Frame {
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
        let request = f(mode, &mut ctx);
        Frame {
            request,
            messages,
            commands,
        }
    }

    fn frame(mode: &mut SquadBuilderMode, input: &InputState) -> Frame {
        step(mode, |m, ctx| m.update(ctx, input))
    }

    fn click(rect: Rect) -> InputState {
        let mut input = InputState::new();
        input.set_mouse_pos(rect.x + rect.width / 2, rect.y + rect.height / 2);
        input.mouse_button_down(MouseButton::Left, 0.0);
        input
    }

    fn key(key: Key) -> InputState {
        let mut input = InputState::new();
        input.key_down(key);
        input
    }

    fn pick(mode: &mut SquadBuilderMode, entry: usize) {
        let rect = mode.palette_rect();
        let row_h = 46;
        let y = rect.y + row_h * i32::try_from(entry).unwrap() + row_h / 2;
        frame(mode, &click(Rect::new(rect.x + 20, y, 1, 1)));
    }

    fn click_cell(mode: &mut SquadBuilderMode, row: usize, col: usize) -> Vec<String> {
        let rect = mode.grid().cell(row, col).map(Widget::rect).unwrap_or(Rect::ZERO);
        frame(mode, &click(rect)).messages
    }

    fn press(mode: &mut SquadBuilderMode, text: &str) -> Frame {
        let rect = mode.button_rect(text).unwrap();
        frame(mode, &click(rect))
    }

    fn type_name(mode: &mut SquadBuilderMode, name: &str) {
        let field = mode.name_input().rect();
        frame(mode, &click(field));
        let mut input = InputState::new();
        input.type_text(name);
        frame(mode, &input);
    }

    #[test]
    fn test_palette_pick_shows_details() {
        let mut mode = mode();
        assert_eq!(mode.unit_detail_text(), NO_UNIT_TEXT);

        pick(&mut mode, 1);
        assert!(mode.unit_detail_text().starts_with("Unit: Knight\nRole: Tank"));

        pick(&mut mode, 0);
        assert_eq!(mode.unit_detail_text(), NO_UNIT_TEXT);
    }

    #[test]
    fn test_place_and_remove_units() {
        let mut mode = mode();
        assert_eq!(click_cell(&mut mode, 0, 0), vec!["Select a unit first"]);

        pick(&mut mode, 1);
        assert_eq!(click_cell(&mut mode, 1, 1), vec!["Placed Knight at [1,1]"]);
        assert_eq!(mode.grid().cell_text(1, 1), Some("Knight (Tank)"));
        assert!(mode.capacity_text().starts_with("Capacity: 2.0 / 6.0"));

        assert_eq!(click_cell(&mut mode, 1, 1), vec!["Removed Knight from [1,1]"]);
        assert_eq!(mode.grid().cell_text(1, 1), Some("Empty [1,1]"));
        assert!(mode.draft().is_empty());
    }

    #[test]
    fn test_capacity_limit_reported() {
        let mut mode = mode();
        pick(&mut mode, 1);
        for col in 0..GRID_SIZE {
            click_cell(&mut mode, 0, col);
        }
        let messages = click_cell(&mut mode, 1, 0);
        assert_eq!(
            messages,
            vec!["Cannot place Knight: needs 2.0 capacity, 0.0 remaining"]
        );
        assert_eq!(mode.draft().units.len(), 3);
        assert_eq!(mode.grid().cell_text(1, 0), Some("Empty [1,0]"));
    }

    #[test]
    fn test_leader_hotkey_skipped_while_typing() {
        let mut mode = mode();
        assert_eq!(frame(&mut mode, &key(Key::L)).messages, vec!["Place a unit first"]);

        pick(&mut mode, 5);
        click_cell(&mut mode, 2, 2);
        assert_eq!(frame(&mut mode, &key(Key::L)).messages, vec!["Leader: Cleric"]);
        assert_eq!(mode.grid().cell_text(2, 2), Some("Cleric (Support) *"));
        assert!(mode.capacity_text().ends_with("Leader assigned"));

        let field = mode.name_input().rect();
        frame(&mut mode, &click(field));
        assert!(frame(&mut mode, &key(Key::L)).messages.is_empty());
        assert!(mode.draft().leader.is_some());
    }

    #[test]
    fn test_create_needs_leader_and_name() {
        let mut mode = mode();
        assert_eq!(press(&mut mode, "Create Squad").messages, vec!["Place at least one unit"]);

        pick(&mut mode, 2);
        click_cell(&mut mode, 0, 1);
        assert_eq!(press(&mut mode, "Create Squad").messages, vec!["Assign a leader first"]);

        press(&mut mode, "Toggle Leader (L)");
        let created = press(&mut mode, "Create Squad");
        assert_eq!(created.messages, vec!["Enter a squad name"]);
        assert!(created.commands.is_empty());
    }

    #[test]
    fn test_create_hands_squad_to_game() {
        let mut mode = mode();
        pick(&mut mode, 1);
        click_cell(&mut mode, 0, 0);
        pick(&mut mode, 5);
        click_cell(&mut mode, 2, 1);
        press(&mut mode, "Toggle Leader (L)");
        type_name(&mut mode, "  Iron Wolves ");
        assert_eq!(mode.name_input().text(), "  Iron Wolves ");

        let created = press(&mut mode, "Create Squad");
        assert_eq!(created.messages, vec!["Squad created: Iron Wolves with 2 units"]);
        match created.commands.as_slice() {
            [GameCommand::CreateSquad(squad)] => {
                assert_eq!(squad.name, "Iron Wolves");
                assert_eq!(squad.units.len(), 2);
                assert_eq!(squad.leader, Some((0, 0)));
            }
            other => panic!("unexpected commands {other:?}"),
        }

        assert!(mode.draft().is_empty());
        assert_eq!(mode.name_input().text(), "");
        assert_eq!(mode.grid().cell_text(0, 0), Some("Empty [0,0]"));
    }

    #[test]
    fn test_clear_grid_resets_draft() {
        let mut mode = mode();
        pick(&mut mode, 3);
        click_cell(&mut mode, 1, 2);
        type_name(&mut mode, "Hawks");

        assert_eq!(press(&mut mode, "Clear Grid").messages, vec!["Grid cleared"]);
        assert!(mode.draft().is_empty());
        assert_eq!(mode.name_input().text(), "");
        assert_eq!(mode.unit_detail_text(), NO_UNIT_TEXT);
    }

    #[test]
    fn test_escape_and_close_return_to_exploration() {
        let mut mode = mode();
        let request = frame(&mut mode, &key(Key::Escape)).request.unwrap();
        assert_eq!(request.to, names::EXPLORATION);
        assert_eq!(request.reason, "Close Squad Builder");

        let request = press(&mut mode, "Close (ESC)").request;
        assert_eq!(request.map(|r| r.reason), Some("Close Squad Builder".to_owned()));
    }

    #[test]
    fn test_layout_and_background_reuse() {
        let mut mode = mode();
        let palette = mode.palette_rect();
        assert!(palette.right() < mode.grid().rect().x);
        assert_eq!(mode.button_rect("Create Squad").unwrap().bottom(), 1080 - 86);

        let mut screen = PixelBuffer::new(1920, 1080);
        mode.render(&mut screen);
        assert!(screen.text_runs().iter().any(|run| run.text == REMOVE_ENTRY_TEXT));
        assert!(screen.text_runs().iter().any(|run| run.text == NAME_PLACEHOLDER));
        assert_eq!(mode.cached_backgrounds(), 3);

        mode.render(&mut screen);
        assert_eq!(mode.cached_backgrounds(), 3);

        mode.resize(&ScreenLayout::new(1280, 720, 32));
        assert_eq!(mode.cached_backgrounds(), 0);
    }
}
