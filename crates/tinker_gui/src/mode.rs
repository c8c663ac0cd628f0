//! # UI Modes
//!
//! Each screen of the game interface is a [`UiMode`]. The [`ModeManager`]
//! owns every registered mode, forwards the frame to the current one, and
//! switches modes between frames.
//!
//! ```text
//! ┌──────────────┐  request   ┌──────────────┐
//! │ exploration  │ ─────────► │  inventory   │
//! │              │ ◄───────── │              │
//! └──────────────┘   Escape   └──────────────┘
//! ```
//!
//! Modes never hold game state. Whatever they show comes from the
//! [`UiContext`] handed to them each frame. Whatever they change goes back
//! through it: items leave the inventory directly, and everything else the
//! game must do is queued as a [`GameCommand`].

use std::collections::HashMap;

use tinker_ui::panel::PanelBuilder;
use tinker_ui::{InputState, ScreenLayout, Surface, UiResources};
use tracing::{debug, info, warn};

use crate::config::GuiConfig;
use crate::error::{GuiError, GuiResult};
use crate::inventory::{InventorySource, Item};
use crate::item_display::ItemDisplayKind;
use crate::registry::PanelRegistry;
use crate::squad::{standard_roster, SquadDraft, UnitTemplate};
use crate::stats::{Loadout, PlayerStats};

/// Work the interface hands back to the game.
#[derive(Debug, Clone, PartialEq)]
pub enum GameCommand {
    /// Apply a consumable's effects to the player. The item has already
    /// left the inventory.
    ApplyConsumable(Item),
    /// Arm a throwable for targeting.
    PrepareThrowable {
        /// Inventory index of the stack.
        index: usize,
        /// A copy of the stack. Nothing leaves the inventory until the
        /// game throws it.
        item: Item,
    },
    /// Create a squad from a finished draft.
    CreateSquad(SquadDraft),
}

/// Game data lent to the interface for one frame.
pub struct UiContext<'a> {
    /// The player's items.
    pub inventory: &'a mut dyn InventorySource,
    /// The player's attributes, if there is a player.
    pub stats: Option<&'a PlayerStats>,
    /// The player's equipped gear, if there is a player.
    pub loadout: Option<&'a Loadout>,
    /// Messages for the log. Both sides append; the log drains.
    pub messages: &'a mut Vec<String>,
    /// Commands for the game, drained by the host after the frame.
    pub commands: &'a mut Vec<GameCommand>,
}

/// Extra information attached to a mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeHint {
    /// Open an inventory screen on this kind.
    ItemKind(ItemDisplayKind),
}

/// A request to switch modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeRequest {
    /// Target mode name.
    pub to: String,
    /// Why, for the log.
    pub reason: String,
    /// Optional setup for the target.
    pub hint: Option<ModeHint>,
}

impl ModeRequest {
    /// Request to switch to `to`.
    #[must_use]
    pub fn new(to: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            reason: reason.into(),
            hint: None,
        }
    }

    /// Attaches a hint.
    #[must_use]
    pub fn with_hint(mut self, hint: ModeHint) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// One screen of the interface.
pub trait UiMode {
    /// Unique name used for transitions.
    fn name(&self) -> &str;

    /// Called when the mode becomes current.
    ///
    /// # Errors
    ///
    /// A mode may refuse to open; the manager then reports
    /// [`GuiError::ModeTransition`].
    fn enter(&mut self, _ctx: &mut UiContext<'_>, _request: &ModeRequest) -> GuiResult<()> {
        Ok(())
    }

    /// Called when another mode replaces this one.
    ///
    /// # Errors
    ///
    /// A mode may refuse to close.
    fn exit(&mut self, _ctx: &mut UiContext<'_>) -> GuiResult<()> {
        Ok(())
    }

    /// Lays the mode out for a new screen size.
    fn resize(&mut self, screen: &ScreenLayout);

    /// Handles one frame of input. Returns a switch request, if any.
    fn update(&mut self, ctx: &mut UiContext<'_>, input: &InputState) -> Option<ModeRequest>;

    /// Draws the mode.
    fn render(&mut self, surface: &mut dyn Surface);

    /// Releases offscreen buffers.
    fn dispose(&mut self) {}
}

/// Everything the built-in modes are constructed from.
#[derive(Debug, Clone)]
pub struct ModeResources {
    /// Screen geometry.
    pub screen: ScreenLayout,
    /// Panel table.
    pub registry: PanelRegistry,
    /// Fonts, images and colors.
    pub resources: UiResources,
    /// Lines kept by message logs.
    pub message_log_capacity: usize,
    /// Units offered by the squad builder.
    pub roster: Vec<UnitTemplate>,
}

impl ModeResources {
    /// The standard panel table with `config` applied.
    #[must_use]
    pub fn from_config(config: &GuiConfig) -> Self {
        let mut registry = PanelRegistry::standard();
        registry.apply_config(config);
        Self {
            screen: config.screen_layout(),
            registry,
            resources: UiResources::standard(),
            message_log_capacity: config.message_log_capacity,
            roster: if config.roster.is_empty() {
                standard_roster()
            } else {
                config.roster.clone()
            },
        }
    }

    /// A panel builder for the current screen.
    #[must_use]
    pub fn builder(&self) -> PanelBuilder {
        PanelBuilder::new(self.screen)
    }
}

impl Default for ModeResources {
    fn default() -> Self {
        Self::from_config(&GuiConfig::default())
    }
}

/// Owns the modes and switches between them.
#[derive(Default)]
pub struct ModeManager {
    modes: HashMap<String, Box<dyn UiMode>>,
    current: Option<String>,
    pending: Option<ModeRequest>,
    screen: ScreenLayout,
}

impl ModeManager {
    /// An empty manager for `screen`.
    #[must_use]
    pub fn new(screen: ScreenLayout) -> Self {
        Self {
            screen,
            ..Self::default()
        }
    }

    /// Adds a mode, laying it out for the current screen.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateMode` if the name is taken.
    pub fn register(&mut self, mut mode: Box<dyn UiMode>) -> GuiResult<()> {
        let name = mode.name().to_owned();
        if self.modes.contains_key(&name) {
            return Err(GuiError::DuplicateMode(name));
        }
        mode.resize(&self.screen);
        debug!(mode = %name, "ui mode registered");
        self.modes.insert(name, mode);
        Ok(())
    }

    /// Switches to `name` immediately.
    ///
    /// # Errors
    ///
    /// Returns `ModeNotRegistered` for an unknown name, or whatever the
    /// outgoing or incoming mode reports.
    pub fn set_mode(&mut self, name: &str, ctx: &mut UiContext<'_>) -> GuiResult<()> {
        self.transition(&ModeRequest::new(name, "set_mode"), ctx)
    }

    /// Queues a switch for the end of the next [`ModeManager::update`].
    pub fn request_transition(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.queue(ModeRequest::new(name, reason));
    }

    /// Queues a prepared request.
    pub fn queue(&mut self, request: ModeRequest) {
        if let Some(previous) = self.pending.replace(request) {
            debug!(dropped = %previous.to, "pending transition replaced");
        }
    }

    /// The queued request, if any.
    #[must_use]
    pub fn pending_transition(&self) -> Option<&ModeRequest> {
        self.pending.as_ref()
    }

    /// Name of the current mode.
    #[must_use]
    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Registered mode names, sorted.
    #[must_use]
    pub fn mode_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.modes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Screen the modes are laid out for.
    #[must_use]
    pub const fn screen(&self) -> ScreenLayout {
        self.screen
    }

    /// Runs the current mode for one frame, then applies any queued switch.
    ///
    /// # Errors
    ///
    /// Fails if the queued switch fails; the request is dropped either way.
    pub fn update(&mut self, ctx: &mut UiContext<'_>, input: &InputState) -> GuiResult<()> {
        let requested = match self.current_mode_mut() {
            Some(mode) => mode.update(ctx, input),
            None => None,
        };
        if let Some(request) = requested {
            self.queue(request);
        }

        match self.pending.take() {
            Some(request) => self.transition(&request, ctx),
            None => Ok(()),
        }
    }

    /// Draws the current mode.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        if let Some(mode) = self.current_mode_mut() {
            mode.render(surface);
        }
    }

    /// Lays every mode out for a new screen.
    pub fn resize(&mut self, screen: ScreenLayout) {
        if screen == self.screen {
            return;
        }
        info!(
            width = screen.screen_width,
            height = screen.screen_height,
            "ui resize"
        );
        self.screen = screen;
        for mode in self.modes.values_mut() {
            mode.resize(&screen);
        }
    }

    /// Releases every mode's buffers.
    pub fn dispose(&mut self) {
        for mode in self.modes.values_mut() {
            mode.dispose();
        }
    }

    fn current_mode_mut(&mut self) -> Option<&mut Box<dyn UiMode>> {
        let name = self.current.as_deref()?;
        self.modes.get_mut(name)
    }

    fn transition(&mut self, request: &ModeRequest, ctx: &mut UiContext<'_>) -> GuiResult<()> {
        if !self.modes.contains_key(&request.to) {
            warn!(mode = %request.to, reason = %request.reason, "transition to unknown mode");
            return Err(GuiError::ModeNotRegistered(request.to.clone()));
        }
        if self.current.as_deref() == Some(request.to.as_str()) {
            debug!(mode = %request.to, "already current");
            return Ok(());
        }

        if let Some(mode) = self.current_mode_mut() {
            mode.exit(ctx).map_err(|e| GuiError::ModeTransition {
                mode: request.to.clone(),
                reason: e.to_string(),
            })?;
        }

        let next = self
            .modes
            .get_mut(&request.to)
            .ok_or_else(|| GuiError::ModeNotRegistered(request.to.clone()))?;
        next.enter(ctx, request).map_err(|e| GuiError::ModeTransition {
            mode: request.to.clone(),
            reason: e.to_string(),
        })?;

        info!(
            from = self.current.as_deref().unwrap_or("none"),
            to = %request.to,
            reason = %request.reason,
            "ui mode transition"
        );
        self.current = Some(request.to.clone());
        Ok(())
    }
}

impl std::fmt::Debug for ModeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeManager")
            .field("modes", &self.mode_names())
            .field("current", &self.current)
            .field("pending", &self.pending)
            .field("screen", &self.screen)
            .finish()
    }
}
