//! # Squad Drafts
//!
//! The squad builder edits a [`SquadDraft`]: which roster units stand in
//! which cell of the 3x3 grid, who leads, and what the squad is called.
//! Capacity is the only rule enforced here; everything else about squads
//! belongs to the game.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid_editor::GRID_SIZE;

/// Capacity points a squad may spend on units.
pub const SQUAD_CAPACITY: f32 = 6.0;

/// Battlefield role of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitRole {
    /// Holds the front line.
    Tank,
    /// Deals damage.
    Dps,
    /// Heals and buffs.
    Support,
}

impl UnitRole {
    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tank => "Tank",
            Self::Dps => "DPS",
            Self::Support => "Support",
        }
    }
}

/// A unit the builder can place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTemplate {
    /// Display name.
    pub name: String,
    /// Role.
    pub role: UnitRole,
    /// Hit points.
    pub max_health: i32,
    /// Capacity points spent when placed.
    pub capacity_cost: f32,
}

impl UnitTemplate {
    /// Creates a template.
    #[must_use]
    pub fn new(name: impl Into<String>, role: UnitRole, max_health: i32, capacity_cost: f32) -> Self {
        Self {
            name: name.into(),
            role,
            max_health,
            capacity_cost,
        }
    }

    /// Palette row, e.g. `Knight (Tank)`.
    #[must_use]
    pub fn palette_label(&self) -> String {
        format!("{} ({})", self.name, self.role.name())
    }

    /// Multi-line description for the details panel.
    #[must_use]
    pub fn details(&self) -> String {
        format!(
            "Unit: {}\nRole: {}\n\nHP: {}\nCapacity Cost: {:.1}",
            self.name,
            self.role.name(),
            self.max_health,
            self.capacity_cost
        )
    }
}

/// Units offered when the config lists none.
#[must_use]
pub fn standard_roster() -> Vec<UnitTemplate> {
    vec![
        UnitTemplate::new("Knight", UnitRole::Tank, 40, 2.0),
        UnitTemplate::new("Fighter", UnitRole::Dps, 30, 1.5),
        UnitTemplate::new("Archer", UnitRole::Dps, 22, 1.0),
        UnitTemplate::new("Mage", UnitRole::Dps, 18, 1.5),
        UnitTemplate::new("Cleric", UnitRole::Support, 20, 1.0),
    ]
}

/// Why a unit can't go where it was asked to.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    /// The cell is outside the grid.
    #[error("cell [{row},{col}] is outside the grid")]
    OutOfGrid {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// Another unit already stands there.
    #[error("cell [{row},{col}] is occupied")]
    Occupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The unit costs more than the squad has left.
    #[error("needs {cost:.1} capacity, {remaining:.1} remaining")]
    OverCapacity {
        /// The unit's cost.
        cost: f32,
        /// Capacity left.
        remaining: f32,
    },
}

/// A unit standing in one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedUnit {
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub col: usize,
    /// What stands there.
    pub unit: UnitTemplate,
}

/// A squad under construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SquadDraft {
    /// Squad name.
    pub name: String,
    /// Placed units, in placement order.
    pub units: Vec<PlacedUnit>,
    /// Cell of the leader, if one is designated.
    pub leader: Option<(usize, usize)>,
}

impl SquadDraft {
    /// An empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capacity spent so far.
    #[must_use]
    pub fn used_capacity(&self) -> f32 {
        self.units.iter().map(|p| p.unit.capacity_cost).sum()
    }

    /// Capacity left.
    #[must_use]
    pub fn remaining_capacity(&self) -> f32 {
        SQUAD_CAPACITY - self.used_capacity()
    }

    /// The unit at `(row, col)`.
    #[must_use]
    pub fn unit_at(&self, row: usize, col: usize) -> Option<&PlacedUnit> {
        self.units.iter().find(|p| p.row == row && p.col == col)
    }

    /// Returns true if the unit at `(row, col)` leads.
    #[must_use]
    pub fn is_leader(&self, row: usize, col: usize) -> bool {
        self.leader == Some((row, col))
    }

    /// Returns true if no unit is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Places `unit` at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Fails if the cell is off the grid or taken, or the unit doesn't fit
    /// the remaining capacity.
    pub fn place(&mut self, row: usize, col: usize, unit: UnitTemplate) -> Result<(), PlacementError> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(PlacementError::OutOfGrid { row, col });
        }
        if self.unit_at(row, col).is_some() {
            return Err(PlacementError::Occupied { row, col });
        }
        let remaining = self.remaining_capacity();
        if unit.capacity_cost > remaining {
            return Err(PlacementError::OverCapacity {
                cost: unit.capacity_cost,
                remaining,
            });
        }
        self.units.push(PlacedUnit { row, col, unit });
        Ok(())
    }

    /// Removes the unit at `(row, col)`, dropping its leadership.
    pub fn remove(&mut self, row: usize, col: usize) -> Option<PlacedUnit> {
        let index = self.units.iter().position(|p| p.row == row && p.col == col)?;
        if self.is_leader(row, col) {
            self.leader = None;
        }
        Some(self.units.remove(index))
    }

    /// Toggles leadership of the first unit in row-major order.
    ///
    /// Returns the new leader cell, or `None` if leadership was cleared or
    /// no unit is placed.
    pub fn toggle_leader(&mut self) -> Option<(usize, usize)> {
        let first = self.units.iter().map(|p| (p.row, p.col)).min()?;
        self.leader = if self.leader == Some(first) { None } else { Some(first) };
        self.leader
    }

    /// Empties the draft.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Text for the capacity display.
    #[must_use]
    pub fn capacity_text(&self) -> String {
        let leader = if self.leader.is_some() { "Leader assigned" } else { "No leader" };
        format!(
            "Capacity: {:.1} / {SQUAD_CAPACITY:.1}\nRemaining: {:.1}\n{leader}",
            self.used_capacity(),
            self.remaining_capacity()
        )
    }
}

impl fmt::Display for SquadDraft {
    /// One line per grid row, `.` for an empty cell and `*` after the leader.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for row in 0..GRID_SIZE {
            let cells: Vec<String> = (0..GRID_SIZE)
                .map(|col| match self.unit_at(row, col) {
                    Some(p) if self.is_leader(row, col) => format!("{}*", p.unit.name),
                    Some(p) => p.unit.name.clone(),
                    None => ".".to_owned(),
                })
                .collect();
            if row + 1 < GRID_SIZE {
                writeln!(f, "{}", cells.join(" "))?;
            } else {
                write!(f, "{}", cells.join(" "))?;
            }
        }
        Ok(())
    }
}
