//! TOML configuration for the game interface.
//!
//! ```toml
//! message_log_capacity = 200
//!
//! [screen]
//! width = 2560
//! height = 1440
//!
//! [panels.message_log]
//! anchor = "bottom_left"
//! height = 0.2
//!
//! [panels.stats_panel.custom_padding]
//! top = 12
//! right = 12
//!
//! [[roster]]
//! name = "Knight"
//! role = "tank"
//! max_health = 40
//! capacity_cost = 2.0
//! ```
//!
//! Every field is optional; missing values fall back to the defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tinker_ui::panel::{LayoutKind, PanelPadding, PanelSpec};
use tinker_ui::{Anchor, Insets, ScreenLayout};

use crate::error::{GuiError, GuiResult};
use crate::squad::{UnitTemplate, SQUAD_CAPACITY};

/// Screen geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Map tile size in pixels.
    pub tile_size: i32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            tile_size: 32,
        }
    }
}

/// Per-panel overrides. Unset fields keep the registry's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelOverride {
    /// Anchor name, e.g. `"top_right"`.
    pub anchor: Option<Anchor>,
    /// Width fraction.
    pub width: Option<f64>,
    /// Height fraction.
    pub height: Option<f64>,
    /// Uniform padding fraction.
    pub padding: Option<f64>,
    /// Exact per-edge padding in pixels.
    pub custom_padding: Option<Insets>,
    /// Content layout.
    pub layout: Option<LayoutKind>,
}

impl PanelOverride {
    /// Applies the set fields to `spec`.
    pub fn apply(&self, spec: &mut PanelSpec) {
        if let Some(anchor) = self.anchor {
            spec.anchor = anchor;
        }
        if let Some(width) = self.width {
            spec.width = width;
        }
        if let Some(height) = self.height {
            spec.height = height;
        }
        if let Some(padding) = self.padding {
            spec.padding = PanelPadding::Uniform(padding);
        }
        if let Some(insets) = self.custom_padding {
            spec.padding = PanelPadding::Custom(insets);
        }
        if let Some(layout) = self.layout {
            spec.layout = layout;
        }
    }

    /// Builds a complete spec from this override alone.
    #[must_use]
    pub fn to_spec(&self, name: &str) -> PanelSpec {
        let defaults = tinker_ui::PanelOptions::default();
        let mut spec = PanelSpec::new(
            name,
            defaults.anchor,
            defaults.width,
            defaults.height,
            0.0,
            defaults.layout,
        );
        self.apply(&mut spec);
        spec
    }
}

/// Interface configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Screen geometry.
    pub screen: ScreenConfig,
    /// Panel overrides by name.
    pub panels: BTreeMap<String, PanelOverride>,
    /// Lines kept by message logs.
    pub message_log_capacity: usize,
    /// Squad builder units. Empty means the standard roster.
    pub roster: Vec<UnitTemplate>,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            panels: BTreeMap::new(),
            message_log_capacity: 100,
            roster: Vec::new(),
        }
    }
}

impl GuiConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on syntax errors, unknown anchors or layouts,
    /// a non-positive screen size, a zero log capacity, non-finite fractions,
    /// a panel setting both `padding` and `custom_padding`, or a roster unit
    /// with no name or a cost outside `(0, squad capacity]`.
    pub fn from_toml_str(text: &str) -> GuiResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| GuiError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigRead` if the file can't be read, otherwise as
    /// [`GuiConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> GuiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GuiError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Screen layout for this config.
    #[must_use]
    pub fn screen_layout(&self) -> ScreenLayout {
        ScreenLayout::new(self.screen.width, self.screen.height, self.screen.tile_size)
    }

    fn validate(&self) -> GuiResult<()> {
        let ScreenConfig {
            width,
            height,
            tile_size,
        } = self.screen;
        if width <= 0 || height <= 0 || tile_size <= 0 {
            return Err(GuiError::InvalidConfig(format!(
                "screen must be positive, got {width}x{height} tile {tile_size}"
            )));
        }
        if self.message_log_capacity == 0 {
            return Err(GuiError::InvalidConfig(
                "message_log_capacity must be at least 1".to_owned(),
            ));
        }
        for (name, panel) in &self.panels {
            if panel.padding.is_some() && panel.custom_padding.is_some() {
                return Err(GuiError::InvalidConfig(format!(
                    "panel {name}: set either padding or custom_padding, not both"
                )));
            }
            for value in [panel.width, panel.height, panel.padding].into_iter().flatten() {
                if !value.is_finite() {
                    return Err(GuiError::InvalidConfig(format!(
                        "panel {name}: fraction {value} is not finite"
                    )));
                }
            }
        }
        for unit in &self.roster {
            if unit.name.trim().is_empty() {
                return Err(GuiError::InvalidConfig("roster unit without a name".to_owned()));
            }
            if !(unit.capacity_cost > 0.0 && unit.capacity_cost <= SQUAD_CAPACITY) {
                return Err(GuiError::InvalidConfig(format!(
                    "roster unit {}: capacity_cost {} outside (0, {SQUAD_CAPACITY}]",
                    unit.name, unit.capacity_cost
                )));
            }
        }
        Ok(())
    }
}
