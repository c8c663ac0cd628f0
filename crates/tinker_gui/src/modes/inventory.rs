//! Full-screen inventory browser.
//!
//! Picking a throwable arms it and returns to exploration. Consumables are
//! used from the detail panel. The equipment view shows the current
//! loadout until something is picked.

use tinker_ui::layout::{AnchorLayoutData, RowLayout};
use tinker_ui::widget::Widget;
use tinker_ui::{
    Anchor, Button, CachedTextArea, InputState, Insets, Key, NineSlice, Panel, Rect, RenderCache,
    ScreenLayout, Surface, TextArea,
};
use tracing::{debug, info, warn};

use super::{names, panels};
use crate::error::GuiResult;
use crate::inventory::{InventorySource, ItemAction};
use crate::item_display::{ItemDisplay, ItemDisplayKind, EMPTY_DETAIL_TEXT};
use crate::mode::{GameCommand, ModeHint, ModeRequest, ModeResources, UiContext, UiMode};
use crate::registry::detail_rect;
use crate::specs::{BOTTOM_BUTTON_OFFSET, PADDING_STANDARD, PANEL_HEIGHT_TALL, PANEL_WIDTH_EXTRA_WIDE};

const FILTERS: [(&str, ItemDisplayKind); 4] = [
    ("All", ItemDisplayKind::All),
    ("Throwables", ItemDisplayKind::Throwable),
    ("Equipment", ItemDisplayKind::Equipment),
    ("Consumables", ItemDisplayKind::Consumable),
];

/// Padding inside the filter bar.
const FILTER_PADDING: i32 = 10;
/// Top offset of the item window, as a fraction of the screen height.
const LIST_TOP_OFFSET: f64 = 0.15;
/// Gap between the use button and the bottom of the detail panel.
const USE_PADDING: i32 = 10;

/// Filter bar, item window, detail panel and close button.
#[derive(Debug)]
pub struct InventoryMode {
    kit: ModeResources,
    filter_background: NineSlice,
    filter_rect: Rect,
    filters: Vec<(Button, ItemDisplayKind)>,
    display: ItemDisplay,
    detail_panel: Panel,
    detail: CachedTextArea,
    use_button: Button,
    picked: Option<usize>,
    close: Button,
}

impl InventoryMode {
    /// Builds the mode showing every item.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPanel` if the registry lacks `inventory_detail`.
    pub fn new(kit: &ModeResources) -> GuiResult<Self> {
        let res = &kit.resources;
        let detail_panel = Self::detail_frame(kit)?;
        let detail = RenderCache::new(TextArea::new(res).with_text(EMPTY_DETAIL_TEXT));

        let mut mode = Self {
            kit: kit.clone(),
            filter_background: res.panel.clone(),
            filter_rect: Rect::ZERO,
            filters: FILTERS
                .iter()
                .map(|&(text, kind)| (Button::new(text, res), kind))
                .collect(),
            display: ItemDisplay::new(ItemDisplayKind::All, res),
            detail_panel,
            detail,
            use_button: Button::new("Use Consumable", res),
            picked: None,
            close: Button::new("Close (ESC)", res),
        };
        mode.place_detail();
        mode.place(&kit.screen);
        mode.sync_use_button(None);
        Ok(mode)
    }

    /// The item window.
    #[must_use]
    pub fn display(&self) -> &ItemDisplay {
        &self.display
    }

    /// Detail panel text.
    #[must_use]
    pub fn detail_text(&self) -> &str {
        self.detail.text()
    }

    /// Screen rect of the filter button with this caption.
    #[must_use]
    pub fn filter_rect(&self, text: &str) -> Option<Rect> {
        self.filters
            .iter()
            .find(|(b, _)| b.text() == text)
            .map(|(b, _)| b.rect())
    }

    /// Screen rect of the close button.
    #[must_use]
    pub fn close_rect(&self) -> Rect {
        self.close.rect()
    }

    /// The use button, shown in the consumables view.
    #[must_use]
    pub fn use_button(&self) -> &Button {
        &self.use_button
    }

    fn detail_frame(kit: &ModeResources) -> GuiResult<Panel> {
        kit.registry
            .require(&kit.builder(), panels::INVENTORY_DETAIL, &kit.resources, |o| o)
    }

    /// Splits the detail panel between the text and the use button.
    fn place_detail(&mut self) {
        let (use_w, use_h) = self.use_button.min_size();
        let use_anchor = AnchorLayoutData::new(
            Anchor::BOTTOM_CENTER,
            Insets {
                bottom: USE_PADDING,
                ..Insets::ZERO
            },
        );
        let use_rect = use_anchor.place(self.detail_panel.rect(), (use_w, use_h));
        self.use_button.set_rect(use_rect);

        let area = detail_rect(&self.detail_panel);
        let height = (use_rect.y - USE_PADDING - area.y).clamp(0, area.height);
        self.detail.set_rect(Rect::new(area.x, area.y, area.width, height));
    }

    /// Detail text while nothing is picked.
    fn idle_detail(&self, ctx: &UiContext<'_>) -> String {
        match (self.display.kind(), ctx.loadout) {
            (ItemDisplayKind::Equipment, Some(loadout)) => loadout.to_string(),
            _ => EMPTY_DETAIL_TEXT.to_owned(),
        }
    }

    fn sync_use_button(&mut self, inventory: Option<&dyn InventorySource>) {
        let consumables = self.display.kind() == ItemDisplayKind::Consumable;
        let usable = self
            .picked
            .zip(inventory)
            .and_then(|(index, inv)| inv.item(index))
            .is_some_and(|item| item.has_action(ItemAction::Consumable));
        self.use_button.state_mut().set_visible(consumables);
        self.use_button.set_enabled(consumables && usable);
    }

    /// Reacts to a pick in the item window.
    fn pick(&mut self, index: usize, ctx: &mut UiContext<'_>) -> Option<ModeRequest> {
        let item = ctx.inventory.item(index)?.clone();
        self.picked = Some(index);

        if self.display.kind() == ItemDisplayKind::Throwable {
            self.detail.set_text(format!(
                "Selected: {}\n\n{}",
                item.name,
                item.effect_names().join("\n")
            ));
            info!(item = %item.name, index, "throwable prepared");
            ctx.commands.push(GameCommand::PrepareThrowable { index, item });
            return Some(Self::close_request("Throwable selected"));
        }

        self.detail
            .set_text(format!("Selected: {} x{}", item.name, item.count));
        self.sync_use_button(Some(&*ctx.inventory));
        None
    }

    /// Uses one of the picked consumable.
    fn use_picked(&mut self, ctx: &mut UiContext<'_>) {
        let Some(index) = self.picked.take() else {
            return;
        };
        let Some(item) = ctx.inventory.take_one(index) else {
            warn!(index, "picked consumable vanished");
            return;
        };
        debug!(item = %item.name, "consumable used");
        ctx.messages.push(format!("Used {}", item.name));
        self.detail.set_text(format!("Used {}", item.name));
        ctx.commands.push(GameCommand::ApplyConsumable(item));

        self.display.clear_selection();
        self.display.refresh(&*ctx.inventory);
        self.sync_use_button(Some(&*ctx.inventory));
    }

    fn place(&mut self, screen: &ScreenLayout) {
        let whole = screen.screen_rect();

        let row = RowLayout::horizontal().with_padding(Insets::uniform(FILTER_PADDING));
        let sizes: Vec<_> = self.filters.iter().map(|(b, _)| b.min_size()).collect();
        let gaps = i32::try_from(sizes.len().saturating_sub(1)).unwrap_or(0) * row.spacing;
        let bar_size = (
            sizes.iter().map(|s| s.0).sum::<i32>() + gaps + 2 * FILTER_PADDING,
            sizes.iter().map(|s| s.1).max().unwrap_or(0) + 2 * FILTER_PADDING,
        );
        let bar_anchor = AnchorLayoutData::new(
            Anchor::TOP_LEFT,
            Insets {
                left: screen.width_fraction(PADDING_STANDARD),
                top: screen.height_fraction(PADDING_STANDARD),
                ..Insets::ZERO
            },
        );
        self.filter_rect = bar_anchor.place(whole, bar_size);
        for ((button, _), rect) in self.filters.iter_mut().zip(row.arrange(self.filter_rect, &sizes)) {
            button.set_rect(rect);
        }

        let list_anchor = AnchorLayoutData::new(
            Anchor::LEFT_CENTER,
            Insets {
                left: screen.width_fraction(PADDING_STANDARD),
                top: screen.height_fraction(LIST_TOP_OFFSET),
                ..Insets::ZERO
            },
        );
        let list_size = (
            screen.width_fraction(PANEL_WIDTH_EXTRA_WIDE),
            screen.height_fraction(PANEL_HEIGHT_TALL),
        );
        self.display.layout(list_anchor.place(whole, list_size));

        let close_anchor = AnchorLayoutData::new(
            Anchor::BOTTOM_CENTER,
            Insets {
                bottom: screen.height_fraction(BOTTOM_BUTTON_OFFSET),
                ..Insets::ZERO
            },
        );
        let close_rect = close_anchor.place(whole, self.close.min_size());
        self.close.set_rect(close_rect);
    }

    fn close_request(reason: &str) -> ModeRequest {
        ModeRequest::new(names::EXPLORATION, reason)
    }
}

impl UiMode for InventoryMode {
    fn name(&self) -> &str {
        names::INVENTORY
    }

    fn enter(&mut self, ctx: &mut UiContext<'_>, request: &ModeRequest) -> GuiResult<()> {
        if let Some(ModeHint::ItemKind(kind)) = request.hint {
            self.display.set_kind(kind);
        }
        self.display.clear_selection();
        self.display.refresh(&*ctx.inventory);
        self.picked = None;
        self.sync_use_button(Some(&*ctx.inventory));
        let idle = self.idle_detail(ctx);
        self.detail.set_text(idle);
        Ok(())
    }

    fn resize(&mut self, screen: &ScreenLayout) {
        self.kit.screen = *screen;
        match Self::detail_frame(&self.kit) {
            Ok(panel) => {
                self.detail_panel = panel;
                self.place_detail();
            }
            Err(e) => warn!(error = %e, "inventory detail layout kept"),
        }
        self.place(screen);
    }

    fn update(&mut self, ctx: &mut UiContext<'_>, input: &InputState) -> Option<ModeRequest> {
        if input.key_pressed(Key::Escape) || input.key_pressed(Key::I) {
            return Some(Self::close_request("Close Inventory"));
        }
        if self.close.update(input).clicked {
            return Some(Self::close_request("Close Inventory"));
        }

        let mut chosen = None;
        for (button, kind) in &mut self.filters {
            if button.update(input).clicked {
                chosen = Some(*kind);
            }
        }
        if let Some(kind) = chosen {
            self.display.set_kind(kind);
            self.display.refresh(&*ctx.inventory);
            self.picked = None;
            self.sync_use_button(Some(&*ctx.inventory));
            let idle = self.idle_detail(ctx);
            self.detail.set_text(idle);
            return None;
        }

        if self.use_button.update(input).clicked {
            self.use_picked(ctx);
            return None;
        }

        self.detail.update(input);
        let index = self.display.update(input, &*ctx.inventory)?;
        self.pick(index, ctx)
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        self.filter_background.draw(surface, self.filter_rect);
        for (button, _) in &self.filters {
            button.render(surface);
        }
        self.display.render(surface);
        self.detail_panel.render(surface);
        self.detail.render_cached(surface);
        self.use_button.render(surface);
        self.close.render(surface);
    }

    fn dispose(&mut self) {
        self.display.dispose();
        self.detail.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Inventory, Item, ItemEffect};
    use crate::stats::Loadout;
    use tinker_ui::{MouseButton, PixelBuffer};

    fn fire_bomb() -> Item {
        Item::new("Fire Bomb")
            .with_effect(ItemEffect::Burning)
            .with_action(ItemAction::Throwable)
    }

    fn inventory() -> Inventory {
        let mut inv = Inventory::new();
        inv.add(Item::new("Potion").with_action(ItemAction::Consumable));
        inv.add(fire_bomb());
        inv.add(fire_bomb());
        inv.add(Item::new("Helmet").equippable());
        inv
    }

    fn click(x: i32, y: i32) -> InputState {
        let mut input = InputState::new();
        input.set_mouse_pos(x, y);
        input.mouse_button_down(MouseButton::Left, 0.0);
        input
    }

    fn click_rect(rect: Rect) -> InputState {
        click(rect.x + rect.width / 2, rect.y + rect.height / 2)
    }

    /// Game-side state a mode reads and writes.
    #[derive(Default)]
    struct World {
        loadout: Option<Loadout>,
        messages: Vec<String>,
        commands: Vec<GameCommand>,
    }

    fn run<R>(inv: &mut Inventory, f: impl FnOnce(&mut UiContext<'_>) -> R) -> R {
        with_world(inv, &mut World::default(), f)
    }

    fn with_world<R>(
        inv: &mut Inventory,
        world: &mut World,
        f: impl FnOnce(&mut UiContext<'_>) -> R,
    ) -> R {
        let mut ctx = UiContext {
            inventory: inv,
            stats: None,
            loadout: world.loadout.as_ref(),
            messages: &mut world.messages,
            commands: &mut world.commands,
        };
        f(&mut ctx)
    }

    fn first_row(mode: &InventoryMode) -> InputState {
        let window = mode.display().rect();
        click(window.x + 20, window.y + 30)
    }

    fn opened(inv: &mut Inventory, hint: Option<ItemDisplayKind>) -> InventoryMode {
        let mut mode = InventoryMode::new(&ModeResources::default()).unwrap();
        let mut request = ModeRequest::new(names::INVENTORY, "open");
        if let Some(kind) = hint {
            request = request.with_hint(ModeHint::ItemKind(kind));
        }
        run(inv, |ctx| mode.enter(ctx, &request)).unwrap();
        mode
    }

    fn shown(mode: &InventoryMode) -> Vec<&str> {
        mode.display()
            .inventory_entries()
            .iter()
            .map(|e| e.name.as_str())
            .collect()
    }

    #[test]
    fn test_layout_at_full_hd() {
        let mut inv = inventory();
        let mode = opened(&mut inv, None);

        assert_eq!(mode.display().rect(), Rect::new(38, 216, 864, 810));
        let all = mode.filter_rect("All").unwrap();
        assert_eq!((all.x, all.y), (48, 31));
        let throwables = mode.filter_rect("Throwables").unwrap();
        assert!(throwables.x > all.right());
        assert_eq!(mode.close_rect().bottom(), 1080 - 86);
    }

    #[test]
    fn test_hint_selects_kind() {
        let mut inv = inventory();
        let mode = opened(&mut inv, Some(ItemDisplayKind::Throwable));
        assert_eq!(mode.display().kind(), ItemDisplayKind::Throwable);
        assert_eq!(shown(&mode), vec!["Fire Bomb"]);
        assert_eq!(mode.detail_text(), EMPTY_DETAIL_TEXT);

        let mode = opened(&mut inv, None);
        assert_eq!(shown(&mode), vec!["Potion", "Fire Bomb", "Helmet"]);
    }

    #[test]
    fn test_filter_button_switches_kind() {
        let mut inv = inventory();
        let mut mode = opened(&mut inv, None);
        let equipment = mode.filter_rect("Equipment").unwrap();

        let request = run(&mut inv, |ctx| mode.update(ctx, &click_rect(equipment)));
        assert!(request.is_none());
        assert_eq!(mode.display().kind(), ItemDisplayKind::Equipment);
        assert_eq!(shown(&mode), vec!["Helmet"]);
    }

    #[test]
    fn test_pick_updates_detail_panel() {
        let mut inv = inventory();
        let mut mode = opened(&mut inv, None);
        let window = mode.display().rect();
        let row_h = 46;

        run(&mut inv, |ctx| mode.update(ctx, &click(window.x + 20, window.y + 25 + row_h + 5)));
        assert_eq!(mode.detail_text(), "Selected: Fire Bomb x2");
        assert_eq!(mode.display().selected_indices(), &[1]);

        let mut screen = PixelBuffer::new(1920, 1080);
        mode.render(&mut screen);
        assert!(screen.text_runs().iter().any(|run| run.text == "Selected: Fire Bomb x2"));
    }

    #[test]
    fn test_escape_and_hotkey_close() {
        let mut inv = inventory();
        let mut mode = opened(&mut inv, None);

        for key in [Key::Escape, Key::I] {
            let mut input = InputState::new();
            input.key_down(key);
            let request = run(&mut inv, |ctx| mode.update(ctx, &input)).unwrap();
            assert_eq!(request.to, names::EXPLORATION);
            assert_eq!(request.reason, "Close Inventory");
        }

        let close = mode.close_rect();
        let request = run(&mut inv, |ctx| mode.update(ctx, &click_rect(close)));
        assert!(request.is_some());
    }
    #[test]
    fn test_use_consumable_spends_one() {
        let mut inv = inventory();
        let mut mode = opened(&mut inv, Some(ItemDisplayKind::Consumable));
        assert!(mode.use_button().state().is_visible());
        assert!(!mode.use_button().state().is_enabled());

        let row = first_row(&mode);
        run(&mut inv, |ctx| mode.update(ctx, &row));
        assert_eq!(mode.detail_text(), "Selected: Potion x1");
        assert!(mode.use_button().state().is_enabled());

        let mut world = World::default();
        let use_rect = mode.use_button().rect();
        let request = with_world(&mut inv, &mut world, |ctx| mode.update(ctx, &click_rect(use_rect)));

        assert!(request.is_none());
        assert_eq!(
            world.commands,
            vec![GameCommand::ApplyConsumable(
                Item::new("Potion").with_action(ItemAction::Consumable)
            )]
        );
        assert_eq!(world.messages, vec!["Used Potion"]);
        assert_eq!(mode.detail_text(), "Used Potion");
        assert!(shown(&mode).is_empty());
        assert!(!inv.has_items(&crate::inventory::ItemFilter::Action(ItemAction::Consumable)));
        assert!(!mode.use_button().state().is_enabled());
    }

    #[test]
    fn test_use_button_hidden_outside_consumables() {
        let mut inv = inventory();
        let mode = opened(&mut inv, None);
        assert!(!mode.use_button().state().is_visible());
        let mode = opened(&mut inv, Some(ItemDisplayKind::Throwable));
        assert!(!mode.use_button().state().is_visible());
    }

    #[test]
    fn test_throwable_pick_returns_to_exploration() {
        let mut inv = inventory();
        let mut mode = opened(&mut inv, Some(ItemDisplayKind::Throwable));

        let mut world = World::default();
        let click = first_row(&mode);
        let request = with_world(&mut inv, &mut world, |ctx| mode.update(ctx, &click)).unwrap();

        assert_eq!(request.to, names::EXPLORATION);
        assert_eq!(request.reason, "Throwable selected");
        assert_eq!(mode.detail_text(), "Selected: Fire Bomb\n\nBurning");
        match world.commands.as_slice() {
            [GameCommand::PrepareThrowable { index, item }] => {
                assert_eq!(*index, 1);
                assert_eq!(item.name, "Fire Bomb");
            }
            other => panic!("unexpected commands {other:?}"),
        }
        assert_eq!(inv.get(1).map(|i| i.count), Some(2));
    }

    #[test]
    fn test_equipment_view_shows_loadout() {
        let mut inv = inventory();
        let mut mode = opened(&mut inv, None);
        let mut world = World {
            loadout: Some(Loadout {
                melee: Some("Iron Sword".to_owned()),
                armor: Some("Leather".to_owned()),
                ..Loadout::default()
            }),
            ..World::default()
        };

        let equipment = mode.filter_rect("Equipment").unwrap();
        with_world(&mut inv, &mut world, |ctx| mode.update(ctx, &click_rect(equipment)));
        assert_eq!(mode.detail_text(), "Melee: Iron Sword\nRanged: None\nArmor: Leather");

        let all = mode.filter_rect("All").unwrap();
        with_world(&mut inv, &mut world, |ctx| mode.update(ctx, &click_rect(all)));
        assert_eq!(mode.detail_text(), EMPTY_DETAIL_TEXT);
    }
}
