//! The default in-world screen.

use tinker_ui::widget::Widget;
use tinker_ui::{Button, InputState, Insets, Key, Panel, Rect, ScreenLayout, Surface};
use tracing::warn;

use super::{names, panels};
use crate::error::GuiResult;
use crate::inventory::{InventorySource, ItemAction, ItemFilter};
use crate::item_display::ItemDisplayKind;
use crate::message_log::MessageLog;
use crate::mode::{ModeHint, ModeRequest, ModeResources, UiContext, UiMode};
use crate::registry::detail_rect;
use crate::specs::BOTTOM_BUTTON_OFFSET;
use crate::stats::StatsDisplay;

/// What a quick-inventory button opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuickAction {
    Items(ItemDisplayKind),
    Formation,
    SquadBuilder,
}

impl QuickAction {
    fn request(self, reason: &str) -> ModeRequest {
        match self {
            Self::Items(kind) => {
                ModeRequest::new(names::INVENTORY, reason).with_hint(ModeHint::ItemKind(kind))
            }
            Self::Formation => ModeRequest::new(names::FORMATION_EDITOR, reason),
            Self::SquadBuilder => ModeRequest::new(names::SQUAD_BUILDER, reason),
        }
    }
}

const QUICK_BUTTONS: [(&str, Key, QuickAction); 4] = [
    ("Throwables", Key::T, QuickAction::Items(ItemDisplayKind::Throwable)),
    ("Inventory (I)", Key::I, QuickAction::Items(ItemDisplayKind::All)),
    ("Equipment (E)", Key::E, QuickAction::Items(ItemDisplayKind::Equipment)),
    ("Formation (F)", Key::F, QuickAction::Formation),
];

/// Hotkeys with no button on the quick bar.
const HOTKEYS: [(Key, QuickAction); 1] = [(Key::B, QuickAction::SquadBuilder)];

/// Stats, message log and the quick-inventory bar.
#[derive(Debug)]
pub struct ExplorationMode {
    kit: ModeResources,
    stats_panel: Panel,
    stats: StatsDisplay,
    log_panel: Panel,
    log: MessageLog,
    quick_panel: Panel,
    buttons: Vec<(Button, QuickAction)>,
}

impl ExplorationMode {
    /// Builds the mode's panels.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPanel` if the registry lacks `stats_panel`,
    /// `message_log` or `quick_inventory`.
    pub fn new(kit: &ModeResources) -> GuiResult<Self> {
        let res = &kit.resources;
        let frames = Frames::build(kit)?;

        let mut stats = StatsDisplay::new(res);
        stats.set_rect(detail_rect(&frames.stats));
        let mut log = MessageLog::new(res, kit.message_log_capacity);
        log.set_rect(detail_rect(&frames.log));

        let buttons = QUICK_BUTTONS
            .iter()
            .map(|&(text, _, action)| (Button::new(text, res), action))
            .collect();

        let mut mode = Self {
            kit: kit.clone(),
            stats_panel: frames.stats,
            stats,
            log_panel: frames.log,
            log,
            quick_panel: frames.quick,
            buttons,
        };
        mode.place_buttons();
        Ok(mode)
    }

    /// The stats display.
    #[must_use]
    pub fn stats(&self) -> &StatsDisplay {
        &self.stats
    }

    /// The message log.
    #[must_use]
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Screen rect of the quick-inventory button with this caption.
    #[must_use]
    pub fn button_rect(&self, text: &str) -> Option<Rect> {
        self.buttons
            .iter()
            .find(|(b, _)| b.text() == text)
            .map(|(b, _)| b.rect())
    }

    /// Enables the throwables button only while something can be thrown.
    fn sync_throwables(&mut self, inventory: &dyn InventorySource) {
        let throwables = inventory.has_items(&ItemFilter::Action(ItemAction::Throwable));
        for (button, action) in &mut self.buttons {
            if *action == QuickAction::Items(ItemDisplayKind::Throwable) {
                button.set_enabled(throwables);
            }
        }
    }

    fn place_buttons(&mut self) {
        let mut children: Vec<&mut dyn Widget> = self
            .buttons
            .iter_mut()
            .map(|(b, _)| b as &mut dyn Widget)
            .collect();
        self.quick_panel.layout_children(&mut children);
    }
}

struct Frames {
    stats: Panel,
    log: Panel,
    quick: Panel,
}

impl Frames {
    fn build(kit: &ModeResources) -> GuiResult<Self> {
        let builder = kit.builder();
        let res = &kit.resources;
        let bottom = kit.screen.height_fraction(BOTTOM_BUTTON_OFFSET);
        Ok(Self {
            stats: kit.registry.require(&builder, panels::STATS, res, |o| o)?,
            log: kit.registry.require(&builder, panels::MESSAGE_LOG, res, |o| o)?,
            quick: kit.registry.require(&builder, panels::QUICK_INVENTORY, res, |o| {
                o.custom_padding(Insets {
                    bottom,
                    ..Insets::ZERO
                })
            })?,
        })
    }
}

impl UiMode for ExplorationMode {
    fn name(&self) -> &str {
        names::EXPLORATION
    }

    fn enter(&mut self, ctx: &mut UiContext<'_>, _request: &ModeRequest) -> GuiResult<()> {
        self.stats.refresh(ctx.stats);
        self.sync_throwables(&*ctx.inventory);
        Ok(())
    }

    fn resize(&mut self, screen: &ScreenLayout) {
        self.kit.screen = *screen;
        match Frames::build(&self.kit) {
            Ok(frames) => {
                self.stats.set_rect(detail_rect(&frames.stats));
                self.log.set_rect(detail_rect(&frames.log));
                self.stats_panel = frames.stats;
                self.log_panel = frames.log;
                self.quick_panel = frames.quick;
                self.place_buttons();
            }
            Err(e) => warn!(error = %e, "exploration layout kept"),
        }
    }

    fn update(&mut self, ctx: &mut UiContext<'_>, input: &InputState) -> Option<ModeRequest> {
        for message in ctx.messages.drain(..) {
            self.log.push(message);
        }
        self.stats.refresh(ctx.stats);
        self.sync_throwables(&*ctx.inventory);
        self.log.update(input);

        let mut request = None;
        for (button, action) in &mut self.buttons {
            if button.update(input).clicked {
                request = Some(action.request(button.text()));
            }
        }
        if request.is_some() {
            return request;
        }

        let bar = self
            .buttons
            .iter()
            .zip(QUICK_BUTTONS)
            .filter(|((button, _), _)| button.state().is_enabled())
            .map(|((_, action), (_, key, _))| (key, *action));
        bar.chain(HOTKEYS)
            .find(|(key, _)| input.key_pressed(*key))
            .map(|(key, action)| action.request(&format!("hotkey {key:?}")))
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        self.stats_panel.render(surface);
        self.stats.render(surface);
        self.log_panel.render(surface);
        self.log.render(surface);
        self.quick_panel.render(surface);
        for (button, _) in &self.buttons {
            button.render(surface);
        }
    }

    fn dispose(&mut self) {
        self.stats.dispose();
        self.log.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Inventory, Item};

    fn frame(
        mode: &mut ExplorationMode,
        inv: &mut Inventory,
        input: &InputState,
    ) -> Option<ModeRequest> {
        let mut messages = Vec::new();
        let mut commands = Vec::new();
        let mut ctx = UiContext {
            inventory: inv,
            stats: None,
            loadout: None,
            messages: &mut messages,
            commands: &mut commands,
        };
        mode.update(&mut ctx, input)
    }

    fn opened(inv: &mut Inventory) -> ExplorationMode {
        let mut mode = ExplorationMode::new(&ModeResources::default()).unwrap();
        let mut messages = Vec::new();
        let mut commands = Vec::new();
        let mut ctx = UiContext {
            inventory: inv,
            stats: None,
            loadout: None,
            messages: &mut messages,
            commands: &mut commands,
        };
        mode.enter(&mut ctx, &ModeRequest::new(names::EXPLORATION, "start"))
            .unwrap();
        mode
    }

    fn key(key: Key) -> InputState {
        let mut input = InputState::new();
        input.key_down(key);
        input
    }

    fn throwables_enabled(mode: &ExplorationMode) -> bool {
        mode.buttons
            .iter()
            .find(|(b, _)| b.text() == "Throwables")
            .is_some_and(|(b, _)| b.state().is_enabled())
    }

    #[test]
    fn test_pickup_enables_throwables_mid_mode() {
        let mut inv = Inventory::new();
        let mut mode = opened(&mut inv);
        assert!(!throwables_enabled(&mode));

        inv.add(Item::new("Fire Bomb").with_action(ItemAction::Throwable));
        let request = frame(&mut mode, &mut inv, &key(Key::T)).unwrap();

        assert!(throwables_enabled(&mode));
        assert_eq!(request.to, names::INVENTORY);
        assert_eq!(request.hint, Some(ModeHint::ItemKind(ItemDisplayKind::Throwable)));
    }

    #[test]
    fn test_last_throwable_used_disables_button() {
        let mut inv = Inventory::new();
        inv.add(Item::new("Fire Bomb").with_action(ItemAction::Throwable));
        let mut mode = opened(&mut inv);
        assert!(throwables_enabled(&mode));

        inv.take_one(0).unwrap();
        assert!(frame(&mut mode, &mut inv, &key(Key::T)).is_none());
        assert!(!throwables_enabled(&mode));
    }

    #[test]
    fn test_squad_builder_hotkey() {
        let mut inv = Inventory::new();
        let mut mode = opened(&mut inv);
        let request = frame(&mut mode, &mut inv, &key(Key::B)).unwrap();
        assert_eq!(request.to, names::SQUAD_BUILDER);
        assert_eq!(request.reason, "hotkey B");
    }
}
