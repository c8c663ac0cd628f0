//! Layout constants, as fractions of the screen.
//!
//! Widths are fractions of the screen width, heights of the screen height.

/// Narrow side panel.
pub const PANEL_WIDTH_NARROW: f64 = 0.15;
/// Standard panel width.
pub const PANEL_WIDTH_STANDARD: f64 = 0.2;
/// Medium panel width.
pub const PANEL_WIDTH_MEDIUM: f64 = 0.3;
/// Wide panel width.
pub const PANEL_WIDTH_WIDE: f64 = 0.4;
/// Extra-wide panel width.
pub const PANEL_WIDTH_EXTRA_WIDE: f64 = 0.45;

/// Single-row bars.
pub const PANEL_HEIGHT_TINY: f64 = 0.08;
/// Small info boxes.
pub const PANEL_HEIGHT_SMALL: f64 = 0.12;
/// Quarter height.
pub const PANEL_HEIGHT_QUARTER: f64 = 0.25;
/// Third height.
pub const PANEL_HEIGHT_THIRD: f64 = 0.33;
/// Half height.
pub const PANEL_HEIGHT_HALF: f64 = 0.5;
/// Extra-tall panels.
pub const PANEL_HEIGHT_EXTRA_TALL: f64 = 0.6;
/// Tall panels.
pub const PANEL_HEIGHT_TALL: f64 = 0.75;
/// Near full height.
pub const PANEL_HEIGHT_FULL: f64 = 0.85;

/// Extra-small padding; also the row content padding.
pub const PADDING_EXTRA_SMALL: f64 = 0.0125;
/// Tight padding.
pub const PADDING_TIGHT: f64 = 0.015;
/// Standard padding.
pub const PADDING_STANDARD: f64 = 0.02;
/// Loose padding.
pub const PADDING_LOOSE: f64 = 0.03;
/// Gap left for a widget stacked under another.
pub const PADDING_STACKED_WIDGET: f64 = 0.08;

/// Distance of bottom button bars from the screen bottom.
pub const BOTTOM_BUTTON_OFFSET: f64 = 0.08;

// Combat screen
/// Turn order bar width.
pub const COMBAT_TURN_ORDER_WIDTH: f64 = 0.4;
/// Turn order bar height.
pub const COMBAT_TURN_ORDER_HEIGHT: f64 = 0.08;
/// Faction info width.
pub const COMBAT_FACTION_INFO_WIDTH: f64 = 0.18;
/// Faction info height.
pub const COMBAT_FACTION_INFO_HEIGHT: f64 = 0.10;
/// Squad list width.
pub const COMBAT_SQUAD_LIST_WIDTH: f64 = 0.18;
/// Squad list height.
pub const COMBAT_SQUAD_LIST_HEIGHT: f64 = 0.35;
/// Squad detail width.
pub const COMBAT_SQUAD_DETAIL_WIDTH: f64 = 0.18;
/// Squad detail height.
pub const COMBAT_SQUAD_DETAIL_HEIGHT: f64 = 0.25;
/// Combat log width.
pub const COMBAT_LOG_WIDTH: f64 = 0.22;
/// Combat log height.
pub const COMBAT_LOG_HEIGHT: f64 = 0.15;
/// Action button bar width.
pub const COMBAT_ACTION_BUTTON_WIDTH: f64 = 0.35;
/// Action button bar height.
pub const COMBAT_ACTION_BUTTON_HEIGHT: f64 = 0.08;

// Inventory screen
/// Inventory list width.
pub const INVENTORY_LIST_WIDTH: f64 = 0.5;
/// Inventory list height.
pub const INVENTORY_LIST_HEIGHT: f64 = 0.75;

// Formation editor
/// Formation grid width.
pub const FORMATION_GRID_WIDTH: f64 = 0.5;
/// Formation grid height.
pub const FORMATION_GRID_HEIGHT: f64 = 0.6;
/// Squad list width.
pub const FORMATION_SQUAD_LIST_WIDTH: f64 = 0.2;
/// Squad list height.
pub const FORMATION_SQUAD_LIST_HEIGHT: f64 = 0.7;
/// Unit palette width.
pub const FORMATION_PALETTE_WIDTH: f64 = 0.2;
/// Unit palette height.
pub const FORMATION_PALETTE_HEIGHT: f64 = 0.7;
