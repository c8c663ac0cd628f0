//! Filtered inventory windows.
//!
//! Equipment, consumables and throwables share one window shape: the
//! filtered inventory on the left, the items picked so far on the right, and
//! a detail box describing the last pick.

use tinker_ui::widget::Widget;
use tinker_ui::{
    CachedList, CachedTextArea, Color, InputState, Label, List, NineSlice, Rect, RenderCache,
    Surface, TextArea, UiResources,
};
use tracing::debug;

use crate::inventory::{InventoryEntry, InventorySource, ItemAction, ItemFilter};

/// Height of the title bar.
const TITLE_HEIGHT: i32 = 25;
/// Gap between the window sections.
const GAP: i32 = 10;

/// Shown before anything is picked.
pub const EMPTY_DETAIL_TEXT: &str = "Select an item to view details";

/// Which slice of the inventory a window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemDisplayKind {
    /// Everything carried.
    All,
    /// Wearable items.
    Equipment,
    /// Items used up on use.
    Consumable,
    /// Items thrown at tiles.
    Throwable,
}

impl ItemDisplayKind {
    /// Window title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::All => "Inventory",
            Self::Equipment => "Equipment",
            Self::Consumable => "Consumables",
            Self::Throwable => "Throwables",
        }
    }

    /// Items this window lists.
    #[must_use]
    pub fn filter(self) -> ItemFilter {
        match self {
            Self::All => ItemFilter::All,
            Self::Equipment => ItemFilter::Equippable,
            Self::Consumable => ItemFilter::Action(ItemAction::Consumable),
            Self::Throwable => ItemFilter::Action(ItemAction::Throwable),
        }
    }
}

/// A filtered inventory window.
#[derive(Debug)]
pub struct ItemDisplay {
    kind: ItemDisplayKind,
    rect: Rect,
    background: NineSlice,
    title_bar: NineSlice,
    title: Label,
    inventory_list: CachedList<InventoryEntry>,
    selected_list: CachedList<InventoryEntry>,
    selected_indices: Vec<usize>,
    detail: CachedTextArea,
}

impl ItemDisplay {
    /// Creates an empty window. Call [`ItemDisplay::layout`] and
    /// [`ItemDisplay::refresh`] before showing it.
    #[must_use]
    pub fn new(kind: ItemDisplayKind, res: &UiResources) -> Self {
        Self {
            kind,
            rect: Rect::ZERO,
            background: res.widget_background.clone(),
            title_bar: res.title_bar.clone(),
            title: Label::new(kind.title(), res.small_face.clone(), Color::WHITE),
            inventory_list: RenderCache::new(List::new(res)),
            selected_list: RenderCache::new(List::new(res)),
            selected_indices: Vec::new(),
            detail: RenderCache::new(TextArea::new(res).with_text(EMPTY_DETAIL_TEXT)),
        }
    }

    /// Window kind.
    #[must_use]
    pub const fn kind(&self) -> ItemDisplayKind {
        self.kind
    }

    /// Switches to another kind, dropping the picks. Call
    /// [`ItemDisplay::refresh`] afterwards.
    pub fn set_kind(&mut self, kind: ItemDisplayKind) {
        if kind == self.kind {
            return;
        }
        self.kind = kind;
        self.title.set_text(kind.title());
        self.layout(self.rect);
        self.clear_selection();
    }

    /// Inventory indices picked so far, in pick order.
    #[must_use]
    pub fn selected_indices(&self) -> &[usize] {
        &self.selected_indices
    }

    /// Rows of the filtered inventory list.
    #[must_use]
    pub fn inventory_entries(&self) -> &[InventoryEntry] {
        self.inventory_list.widget().entries()
    }

    /// Rows of the picked-items list.
    #[must_use]
    pub fn selected_entries(&self) -> &[InventoryEntry] {
        self.selected_list.widget().entries()
    }

    /// Detail box text.
    #[must_use]
    pub fn detail_text(&self) -> &str {
        self.detail.text()
    }

    /// Window bounds.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Places the window and its sections inside `rect`.
    pub fn layout(&mut self, rect: Rect) {
        self.rect = rect;
        let title_h = TITLE_HEIGHT.min(rect.height);
        let (title_w, text_h) = self.title.min_size();
        self.title.set_rect(Rect::new(
            rect.x + (rect.width - title_w) / 2,
            rect.y + (title_h - text_h) / 2,
            title_w,
            text_h,
        ));

        let body = Rect::new(rect.x, rect.y + title_h, rect.width, rect.height - title_h);
        let half_w = (body.width - GAP) / 2;
        let half_h = (body.height - GAP) / 2;
        let right_x = body.x + half_w + GAP;

        self.inventory_list
            .set_rect(Rect::new(body.x, body.y, half_w, body.height));
        self.selected_list
            .set_rect(Rect::new(right_x, body.y, half_w, half_h));
        self.detail.set_rect(Rect::new(
            right_x,
            body.y + half_h + GAP,
            half_w,
            body.height - half_h - GAP,
        ));
    }

    /// Reloads both lists from `inventory`.
    pub fn refresh(&mut self, inventory: &dyn InventorySource) {
        let entries = inventory.display_entries(&[], &self.kind.filter());
        debug!(kind = self.kind.title(), rows = entries.len(), "item display refresh");
        self.inventory_list.set_entries(entries);
        self.rebuild_selected(inventory);
    }

    /// Adds inventory `index` to the picks.
    ///
    /// Returns false, changing nothing, if it was already picked.
    pub fn select(&mut self, index: usize, inventory: &dyn InventorySource) -> bool {
        if self.selected_indices.contains(&index) {
            return false;
        }
        self.selected_indices.push(index);
        self.rebuild_selected(inventory);
        self.detail.set_text(describe(index, inventory));
        true
    }

    /// Drops every pick.
    pub fn clear_selection(&mut self) {
        self.selected_indices.clear();
        self.selected_list.set_entries(Vec::new());
        self.inventory_list.set_selected(None);
        self.detail.set_text(EMPTY_DETAIL_TEXT);
    }

    /// Handles input. Returns the inventory index picked this frame.
    pub fn update(&mut self, input: &InputState, inventory: &dyn InventorySource) -> Option<usize> {
        self.selected_list.update(input);
        self.detail.update(input);

        let response = self.inventory_list.update(input);
        if !(response.clicked || response.changed) {
            return None;
        }
        let index = self.inventory_list.selected_entry()?.index;
        self.select(index, inventory).then_some(index)
    }

    /// Draws the window.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        self.background.draw(surface, self.rect);
        self.title_bar.draw(
            surface,
            Rect::new(self.rect.x, self.rect.y, self.rect.width, TITLE_HEIGHT.min(self.rect.height)),
        );
        self.title.render(surface);
        self.inventory_list.render_cached(surface);
        self.selected_list.render_cached(surface);
        self.detail.render_cached(surface);
    }

    /// Releases every offscreen buffer.
    pub fn dispose(&mut self) {
        self.inventory_list.dispose();
        self.selected_list.dispose();
        self.detail.dispose();
    }

    fn rebuild_selected(&mut self, inventory: &dyn InventorySource) {
        let rows = inventory.display_entries(&self.selected_indices, &ItemFilter::All);
        self.selected_list.set_entries(rows);
    }
}

fn describe(index: usize, inventory: &dyn InventorySource) -> String {
    let Some(item) = inventory.item(index) else {
        return EMPTY_DETAIL_TEXT.to_owned();
    };
    let names = item.effect_names();
    let effects = if names.is_empty() {
        "none".to_owned()
    } else {
        names.join(", ")
    };
    format!("{} x{}\nEffects: {effects}", item.name, item.count)
}
