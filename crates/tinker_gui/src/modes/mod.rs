//! Built-in screens.

mod exploration;
mod formation;
mod inventory;
mod squad_builder;

pub use exploration::ExplorationMode;
pub use formation::{FormationEditorMode, UNIT_PALETTE};
pub use inventory::InventoryMode;
pub use squad_builder::{SquadBuilderMode, NO_UNIT_TEXT};

use crate::error::GuiResult;
use crate::mode::{ModeManager, ModeResources};

/// Mode names.
pub mod names {
    /// In-world screen.
    pub const EXPLORATION: &str = "exploration";
    /// Inventory browser.
    pub const INVENTORY: &str = "inventory";
    /// Squad formation editor.
    pub const FORMATION_EDITOR: &str = "formation_editor";
    /// Squad builder.
    pub const SQUAD_BUILDER: &str = "squad_builder";
}

/// Registry names the built-in modes use.
pub(crate) mod panels {
    pub const STATS: &str = "stats_panel";
    pub const MESSAGE_LOG: &str = "message_log";
    pub const QUICK_INVENTORY: &str = "quick_inventory";
    pub const INVENTORY_DETAIL: &str = "inventory_detail";
    pub const SQUAD_LIST: &str = "squad_list";
    pub const SQUAD_DETAIL: &str = "squad_detail";
}

/// A manager holding the four built-in modes. No mode is current yet.
///
/// # Errors
///
/// Fails if a mode can't find one of its panels.
pub fn standard_manager(kit: &ModeResources) -> GuiResult<ModeManager> {
    let mut manager = ModeManager::new(kit.screen);
    manager.register(Box::new(ExplorationMode::new(kit)?))?;
    manager.register(Box::new(InventoryMode::new(kit)?))?;
    manager.register(Box::new(FormationEditorMode::new(kit)))?;
    manager.register(Box::new(SquadBuilderMode::new(kit)?))?;
    Ok(manager)
}
