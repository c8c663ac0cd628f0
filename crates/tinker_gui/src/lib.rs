//! # Tinker GUI
//!
//! Game screens built on `tinker_ui`:
//! - A registry of named panel layouts, overridable from TOML
//! - Inventory, stats and message-log views fed by a [`UiContext`]
//! - Modes (exploration, inventory, formation editor, squad builder) and the
//!   manager that switches between them
//!
//! ## Frame loop
//!
//! ```text
//! host input → ModeManager::update(ctx) → current mode → Option<ModeRequest>
//!                        ↓ (end of frame)
//!               exit old mode → enter new mode(request)
//!                        ↓
//!               ModeManager::render(surface)
//! ```
//!
//! Game state never lives here. Each frame the host lends the inventory,
//! player stats and pending messages through [`UiContext`]. Modes change the
//! inventory through [`InventorySource`] and queue everything else the game
//! must act on as [`GameCommand`]s.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod grid_editor;
pub mod inventory;
pub mod item_display;
pub mod message_log;
pub mod mode;
pub mod modes;
pub mod registry;
pub mod specs;
pub mod squad;
pub mod stats;

pub use config::{GuiConfig, PanelOverride, ScreenConfig};
pub use error::{GuiError, GuiResult};
pub use grid_editor::{GridEditor, GridEditorConfig};
pub use inventory::{Inventory, InventoryEntry, InventorySource, Item, ItemAction, ItemEffect, ItemFilter};
pub use item_display::{ItemDisplay, ItemDisplayKind};
pub use message_log::MessageLog;
pub use mode::{GameCommand, ModeHint, ModeManager, ModeRequest, ModeResources, UiContext, UiMode};
pub use modes::{
    standard_manager, ExplorationMode, FormationEditorMode, InventoryMode, SquadBuilderMode,
};
pub use registry::{PanelRegistry, TypedPanel, TypedPanelConfig, TypedPanelKind};
pub use squad::{
    standard_roster, PlacedUnit, PlacementError, SquadDraft, UnitRole, UnitTemplate, SQUAD_CAPACITY,
};
pub use stats::{Loadout, PlayerStats, StatsDisplay};
