//! # Inventory View Model
//!
//! The interface never touches game entities. It sees the player's
//! inventory through [`InventorySource`], which yields plain display rows
//! and hands out single items when the player uses one.

use std::fmt;

use tinker_ui::ListEntry;
use tracing::debug;

/// Status effects an item can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemEffect {
    /// Sets the target on fire.
    Burning,
    /// Slows the target.
    Freezing,
    /// Roots the target in place.
    Sticky,
}

impl ItemEffect {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Burning => "Burning",
            Self::Freezing => "Freezing",
            Self::Sticky => "Sticky",
        }
    }
}

/// Things an item can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemAction {
    /// Can be thrown at a tile.
    Throwable,
    /// Consumed on use.
    Consumable,
}

/// An inventory stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Display name; stacks merge by name.
    pub name: String,
    /// Stack size.
    pub count: u32,
    /// Carried effects.
    pub effects: Vec<ItemEffect>,
    /// Supported actions.
    pub actions: Vec<ItemAction>,
    /// Can be worn.
    pub equippable: bool,
}

impl Item {
    /// A plain item with a count of one.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 1,
            effects: Vec::new(),
            actions: Vec::new(),
            equippable: false,
        }
    }

    /// Adds an effect.
    #[must_use]
    pub fn with_effect(mut self, effect: ItemEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Adds an action.
    #[must_use]
    pub fn with_action(mut self, action: ItemAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Marks the item as equipment.
    #[must_use]
    pub fn equippable(mut self) -> Self {
        self.equippable = true;
        self
    }

    /// True if the item carries every effect in `effects`.
    #[must_use]
    pub fn has_all_effects(&self, effects: &[ItemEffect]) -> bool {
        effects.iter().all(|e| self.effects.contains(e))
    }

    /// True if the item supports `action`.
    #[must_use]
    pub fn has_action(&self, action: ItemAction) -> bool {
        self.actions.contains(&action)
    }

    /// Names of the carried effects.
    #[must_use]
    pub fn effect_names(&self) -> Vec<&'static str> {
        self.effects.iter().map(|e| e.name()).collect()
    }
}

/// Which items a list shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ItemFilter {
    /// Everything.
    #[default]
    All,
    /// Items carrying all of these effects. An empty set matches everything.
    Effects(Vec<ItemEffect>),
    /// Items supporting this action.
    Action(ItemAction),
    /// Equipment only.
    Equippable,
}

impl ItemFilter {
    /// True if `item` passes.
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Self::All => true,
            Self::Effects(effects) => item.has_all_effects(effects),
            Self::Action(action) => item.has_action(*action),
            Self::Equippable => item.equippable,
        }
    }
}

/// One displayed inventory row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    /// Position in the inventory.
    pub index: usize,
    /// Item name.
    pub name: String,
    /// Stack size.
    pub count: u32,
}

impl fmt::Display for InventoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.name, self.count)
    }
}

impl ListEntry for InventoryEntry {
    fn label(&self) -> String {
        self.to_string()
    }
}

/// The player's items as the interface sees them.
pub trait InventorySource {
    /// Rows for display.
    ///
    /// With an empty `selected`, every item passing `filter` is listed in
    /// inventory order. Otherwise only the selected indices are listed, in
    /// selection order; indices past the end are skipped.
    fn display_entries(&self, selected: &[usize], filter: &ItemFilter) -> Vec<InventoryEntry>;

    /// The item at `index`.
    fn item(&self, index: usize) -> Option<&Item>;

    /// Takes one item off the stack at `index`. The returned item has a
    /// count of one. Later indices may shift when a stack empties.
    fn take_one(&mut self, index: usize) -> Option<Item>;

    /// True if any item passes `filter`.
    fn has_items(&self, filter: &ItemFilter) -> bool {
        !self.display_entries(&[], filter).is_empty()
    }
}

/// A simple in-memory inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    /// An empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one of `item`, merging into an existing stack of the same name.
    pub fn add(&mut self, item: Item) {
        if let Some(stack) = self.items.iter_mut().find(|i| i.name == item.name) {
            stack.count = stack.count.saturating_add(1);
        } else {
            self.items.push(Item { count: 1, ..item });
        }
    }

    /// Removes one from the stack at `index`, dropping the stack at zero.
    /// Returns false if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(stack) = self.items.get_mut(index) else {
            return false;
        };
        stack.count = stack.count.saturating_sub(1);
        if stack.count == 0 {
            self.items.remove(index);
        }
        true
    }

    /// The stack at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// True if any item supports `action`.
    #[must_use]
    pub fn has_items_with_action(&self, action: ItemAction) -> bool {
        self.items.iter().any(|i| i.has_action(action))
    }

    /// True if anything can be thrown.
    #[must_use]
    pub fn has_throwable_items(&self) -> bool {
        self.has_items_with_action(ItemAction::Throwable)
    }

    /// Number of stacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if there are no stacks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl InventorySource for Inventory {
    fn display_entries(&self, selected: &[usize], filter: &ItemFilter) -> Vec<InventoryEntry> {
        let row = |index: usize, item: &Item| InventoryEntry {
            index,
            name: item.name.clone(),
            count: item.count,
        };

        if selected.is_empty() {
            return self
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| filter.matches(item))
                .map(|(index, item)| row(index, item))
                .collect();
        }

        selected
            .iter()
            .filter_map(|&index| {
                let item = self.items.get(index);
                if item.is_none() {
                    debug!(index, len = self.items.len(), "selected index out of range");
                }
                item.filter(|item| filter.matches(item)).map(|item| row(index, item))
            })
            .collect()
    }

    fn item(&self, index: usize) -> Option<&Item> {
        self.get(index)
    }

    fn take_one(&mut self, index: usize) -> Option<Item> {
        let taken = Item {
            count: 1,
            ..self.items.get(index)?.clone()
        };
        self.remove(index);
        debug!(item = %taken.name, index, "item taken");
        Some(taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Inventory {
        let mut inv = Inventory::new();
        inv.add(Item::new("Fire Bomb").with_effect(ItemEffect::Burning).with_action(ItemAction::Throwable));
        inv.add(Item::new("Health Potion").with_action(ItemAction::Consumable));
        inv.add(Item::new("Iron Sword").equippable());
        inv.add(Item::new("Ice Tar").with_effect(ItemEffect::Freezing).with_effect(ItemEffect::Sticky));
        inv.add(Item::new("Health Potion").with_action(ItemAction::Consumable));
        inv
    }

    #[test]
    fn test_add_merges_by_name() {
        let inv = sample();
        assert_eq!(inv.len(), 4);
        assert_eq!(inv.get(1).map(|i| i.count), Some(2));
    }

    #[test]
    fn test_remove_decrements_then_drops() {
        let mut inv = sample();
        assert!(inv.remove(1));
        assert_eq!(inv.get(1).map(|i| i.count), Some(1));
        assert!(inv.remove(1));
        assert_eq!(inv.len(), 3);
        assert_eq!(inv.get(1).map(|i| i.name.as_str()), Some("Iron Sword"));
        assert!(!inv.remove(10));
    }

    #[test]
    fn test_filters() {
        let inv = sample();
        let names = |filter: ItemFilter| -> Vec<String> {
            inv.display_entries(&[], &filter).into_iter().map(|e| e.name).collect()
        };

        assert_eq!(names(ItemFilter::All).len(), 4);
        assert_eq!(names(ItemFilter::Action(ItemAction::Throwable)), vec!["Fire Bomb"]);
        assert_eq!(names(ItemFilter::Equippable), vec!["Iron Sword"]);
        assert_eq!(
            names(ItemFilter::Effects(vec![ItemEffect::Freezing, ItemEffect::Sticky])),
            vec!["Ice Tar"]
        );
        assert_eq!(names(ItemFilter::Effects(Vec::new())).len(), 4);
    }

    #[test]
    fn test_selected_order_and_bad_indices() {
        let inv = sample();
        let rows = inv.display_entries(&[2, 99, 0], &ItemFilter::All);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 2);
        assert_eq!(rows[1].index, 0);
        assert_eq!(rows[1].label(), "Fire Bomb x1");
    }

    #[test]
    fn test_throwables_and_effect_names() {
        let inv = sample();
        assert!(inv.has_throwable_items());
        assert!(inv.has_items(&ItemFilter::Equippable));
        assert!(!Inventory::new().has_items(&ItemFilter::All));
        assert_eq!(inv.get(3).map(Item::effect_names), Some(vec!["Freezing", "Sticky"]));
    }

    #[test]
    fn test_take_one_splits_stack() {
        let mut inv = sample();
        let potion = inv.take_one(1).unwrap();
        assert_eq!((potion.name.as_str(), potion.count), ("Health Potion", 1));
        assert_eq!(inv.get(1).map(|i| i.count), Some(1));

        inv.take_one(1).unwrap();
        assert_eq!(inv.len(), 3);
        assert!(inv.take_one(9).is_none());
    }
}
