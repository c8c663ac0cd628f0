//! Named panel layouts.
//!
//! The standard table covers every fixed panel the game screens use. Modes
//! look panels up by name so a config file can move or resize them without
//! touching mode code.

use std::collections::HashMap;

use tinker_ui::panel::{LayoutKind, PanelBuilder, PanelOptions, PanelSpec, ResolvedPanel};
use tinker_ui::widget::{List, Panel, TextArea, Widget};
use tinker_ui::{Anchor, CachedList, CachedTextArea, Rect, RenderCache, UiResources};
use tracing::debug;

use crate::config::GuiConfig;
use crate::error::{GuiError, GuiResult};
use crate::specs::{
    PADDING_STANDARD, PADDING_TIGHT, PANEL_HEIGHT_EXTRA_TALL, PANEL_HEIGHT_HALF,
    PANEL_HEIGHT_QUARTER, PANEL_HEIGHT_SMALL, PANEL_HEIGHT_TALL, PANEL_HEIGHT_TINY,
    PANEL_WIDTH_EXTRA_WIDE, PANEL_WIDTH_NARROW, PANEL_WIDTH_WIDE,
};

/// Inset of a detail panel's text area from the panel size, in pixels.
const DETAIL_INSET: i32 = 20;

/// Content area of a detail panel: the panel shrunk by 20 px and placed by
/// its content layout.
#[must_use]
pub fn detail_rect(panel: &Panel) -> Rect {
    let (width, height) = panel.rect().size();
    let size = ((width - DETAIL_INSET).max(0), (height - DETAIL_INSET).max(0));
    panel
        .arrange(&[size])
        .first()
        .copied()
        .unwrap_or_else(|| panel.rect())
}

/// Where a typed panel's geometry comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelSource {
    /// A registered spec.
    Spec(String),
    /// Explicit options.
    Options(PanelOptions),
}

/// Content added to a typed panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypedPanelKind {
    /// Frame only.
    Simple,
    /// A text area filling the panel, with initial text.
    Detail(String),
    /// A string list filling the panel.
    List(Vec<String>),
}

/// Request for [`PanelRegistry::build_typed`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypedPanelConfig {
    /// Geometry source.
    pub source: PanelSource,
    /// Content.
    pub kind: TypedPanelKind,
}

impl TypedPanelConfig {
    /// A typed panel from a registered spec.
    #[must_use]
    pub fn spec(name: impl Into<String>, kind: TypedPanelKind) -> Self {
        Self {
            source: PanelSource::Spec(name.into()),
            kind,
        }
    }

    /// A typed panel from explicit options.
    #[must_use]
    pub fn options(options: PanelOptions, kind: TypedPanelKind) -> Self {
        Self {
            source: PanelSource::Options(options),
            kind,
        }
    }
}

/// A panel and the content widget created for it.
#[derive(Debug)]
pub struct TypedPanel {
    /// The frame.
    pub panel: Panel,
    /// Present for detail panels.
    pub text_area: Option<CachedTextArea>,
    /// Present for list panels.
    pub list: Option<CachedList<String>>,
}

/// Panel specs by name.
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    specs: HashMap<String, PanelSpec>,
}

impl PanelRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard panel table.
    #[must_use]
    pub fn standard() -> Self {
        use LayoutKind::{Anchor as AnchorLayout, HorizontalRow, Row};

        let table = [
            ("turn_order", Anchor::TOP_CENTER, PANEL_WIDTH_WIDE, PANEL_HEIGHT_TINY, PADDING_TIGHT, HorizontalRow),
            ("faction_info", Anchor::TOP_LEFT, PANEL_WIDTH_NARROW, PANEL_HEIGHT_SMALL, PADDING_TIGHT, Row),
            ("squad_list", Anchor::LEFT_CENTER, PANEL_WIDTH_NARROW, PANEL_HEIGHT_HALF, PADDING_TIGHT, Row),
            ("squad_detail", Anchor::BOTTOM_LEFT, PANEL_WIDTH_NARROW, PANEL_HEIGHT_QUARTER, PADDING_TIGHT, Row),
            ("action_buttons", Anchor::BOTTOM_CENTER, 0.5, PANEL_HEIGHT_TINY, 0.0, HorizontalRow),
            ("stats_panel", Anchor::TOP_RIGHT, PANEL_WIDTH_NARROW, PANEL_HEIGHT_SMALL, PADDING_TIGHT, Row),
            ("message_log", Anchor::BOTTOM_RIGHT, PANEL_WIDTH_NARROW, 0.15, PADDING_TIGHT, Row),
            ("quick_inventory", Anchor::BOTTOM_CENTER, 0.5, PANEL_HEIGHT_TINY, 0.0, HorizontalRow),
            ("options_list", Anchor::CENTER, 0.25, PANEL_HEIGHT_HALF, 0.0, Row),
            ("inventory_detail", Anchor::RIGHT_CENTER, PANEL_WIDTH_EXTRA_WIDE, PANEL_HEIGHT_TALL, PADDING_STANDARD, AnchorLayout),
            ("info_detail", Anchor::RIGHT_CENTER, PANEL_WIDTH_WIDE, PANEL_HEIGHT_EXTRA_TALL, 0.01, AnchorLayout),
            ("combat_log", Anchor::BOTTOM_RIGHT, 0.24, 0.15, PADDING_TIGHT, AnchorLayout),
        ];

        let specs = table
            .into_iter()
            .map(|(name, anchor, width, height, padding, layout)| {
                (
                    name.to_owned(),
                    PanelSpec::new(name, anchor, width, height, padding, layout),
                )
            })
            .collect();
        Self { specs }
    }

    /// Looks up a spec.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PanelSpec> {
        self.specs.get(name)
    }

    /// Registers `spec` under `name`, replacing any previous entry.
    pub fn add_spec(&mut self, name: impl Into<String>, mut spec: PanelSpec) {
        let name = name.into();
        spec.name.clone_from(&name);
        self.specs.insert(name, spec);
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.specs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered specs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns true if no specs are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Merges the panel overrides of `config`. Unknown names become new specs.
    pub fn apply_config(&mut self, config: &GuiConfig) {
        for (name, patch) in &config.panels {
            match self.specs.get_mut(name) {
                Some(spec) => patch.apply(spec),
                None => {
                    debug!(panel = %name, "config adds panel spec");
                    self.specs.insert(name.clone(), patch.to_spec(name));
                }
            }
        }
    }

    /// Resolves a named spec to pixels.
    #[must_use]
    pub fn resolve(&self, builder: &PanelBuilder, name: &str) -> Option<ResolvedPanel> {
        self.lookup(name).map(|spec| builder.resolve(&spec.options()))
    }

    /// Builds the named panel.
    #[must_use]
    pub fn build(&self, builder: &PanelBuilder, name: &str, res: &UiResources) -> Option<Panel> {
        self.build_with(builder, name, res, |options| options)
    }

    /// Builds the named panel after `customize` adjusts its options.
    #[must_use]
    pub fn build_with(
        &self,
        builder: &PanelBuilder,
        name: &str,
        res: &UiResources,
        customize: impl FnOnce(PanelOptions) -> PanelOptions,
    ) -> Option<Panel> {
        let spec = self.lookup(name)?;
        Some(builder.build(&customize(spec.options()), res))
    }

    /// Builds a panel with standard content.
    ///
    /// Returns `None` when the source names an unregistered spec.
    #[must_use]
    pub fn build_typed(
        &self,
        builder: &PanelBuilder,
        config: TypedPanelConfig,
        res: &UiResources,
    ) -> Option<TypedPanel> {
        let options = match &config.source {
            PanelSource::Spec(name) => self.lookup(name)?.options(),
            PanelSource::Options(options) => *options,
        };
        let panel = builder.build(&options, res);
        let content_rect = detail_rect(&panel);

        let mut typed = TypedPanel {
            panel,
            text_area: None,
            list: None,
        };
        match config.kind {
            TypedPanelKind::Simple => {}
            TypedPanelKind::Detail(text) => {
                let mut area = RenderCache::new(TextArea::new(res).with_text(text));
                area.set_rect(content_rect);
                typed.text_area = Some(area);
            }
            TypedPanelKind::List(entries) => {
                let mut list = RenderCache::new(List::new(res).with_entries(entries));
                list.set_rect(content_rect);
                typed.list = Some(list);
            }
        }
        Some(typed)
    }

    /// Builds the named panel or fails with `UnknownPanel`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownPanel` if `name` is not registered.
    pub fn require(
        &self,
        builder: &PanelBuilder,
        name: &str,
        res: &UiResources,
        customize: impl FnOnce(PanelOptions) -> PanelOptions,
    ) -> GuiResult<Panel> {
        self.build_with(builder, name, res, customize)
            .ok_or_else(|| GuiError::UnknownPanel(name.to_owned()))
    }

    fn lookup(&self, name: &str) -> Option<&PanelSpec> {
        let spec = self.specs.get(name);
        if spec.is_none() {
            debug!(panel = name, "unknown panel spec");
        }
        spec
    }
}
