//! Selectable list of entries.

use super::{Widget, WidgetFlags, WidgetResponse, WidgetState};
use crate::input::{InputState, Key, MouseButton};
use crate::layout::{Insets, Rect};
use crate::nine_slice::NineSlice;
use crate::style::{EntryColors, FontFace, UiResources};
use crate::surface::Surface;

/// Something a [`List`] can show.
pub trait ListEntry {
    /// Text shown for this entry.
    fn label(&self) -> String;
}

impl ListEntry for String {
    fn label(&self) -> String {
        self.clone()
    }
}

impl ListEntry for &str {
    fn label(&self) -> String {
        (*self).to_owned()
    }
}

/// A vertical list with single selection.
///
/// Selection changes by clicking an entry or, while focused, with the arrow
/// keys. `update` reports `changed` whenever the selection or scroll moved.
#[derive(Debug, Clone)]
pub struct List<T> {
    state: WidgetState,
    entries: Vec<T>,
    selected: Option<usize>,
    scroll: usize,
    font: FontFace,
    colors: EntryColors,
    entry_padding: Insets,
    background: NineSlice,
    disabled_background: NineSlice,
    track: NineSlice,
    handle: NineSlice,
    scrollbar_width: i32,
}

impl<T: ListEntry> List<T> {
    /// Creates an empty list styled from `res`.
    #[must_use]
    pub fn new(res: &UiResources) -> Self {
        Self {
            state: WidgetState::new(),
            entries: Vec::new(),
            selected: None,
            scroll: 0,
            font: res.small_face.clone(),
            colors: res.entry,
            entry_padding: res.entry_padding,
            background: res.scroll.idle.clone(),
            disabled_background: res.scroll.disabled.clone(),
            track: res.scroll.track.clone(),
            handle: res.scroll.handle.clone(),
            scrollbar_width: res.scrollbar_width,
        }
    }

    /// Sets the initial entries.
    #[must_use]
    pub fn with_entries(mut self, entries: Vec<T>) -> Self {
        self.entries = entries;
        self
    }

    /// All entries.
    #[must_use]
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Replaces every entry and clears the selection.
    pub fn set_entries(&mut self, entries: Vec<T>) {
        self.entries = entries;
        self.selected = None;
        self.scroll = 0;
    }

    /// Index of the selected entry.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The selected entry.
    #[must_use]
    pub fn selected_entry(&self) -> Option<&T> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    /// Selects the entry at `index`, or clears the selection for `None` or
    /// an out-of-range index.
    pub fn set_selected(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.entries.len());
        if let Some(i) = self.selected {
            self.ensure_visible(i);
        }
    }

    /// Gives or removes keyboard focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.state.flags.assign(WidgetFlags::FOCUSED, focused);
    }

    /// Height of one entry row.
    #[must_use]
    pub fn entry_height(&self) -> i32 {
        self.font.line_height() + self.entry_padding.vertical()
    }

    /// Entry index under screen point `(x, y)`.
    #[must_use]
    pub fn entry_at(&self, x: i32, y: i32) -> Option<usize> {
        let area = self.entries_rect();
        if !area.contains(x, y) {
            return None;
        }
        let row = usize::try_from((y - area.y) / self.entry_height().max(1)).ok()?;
        let index = self.scroll + row;
        (index < self.entries.len()).then_some(index)
    }

    fn visible_rows(&self) -> usize {
        usize::try_from(self.state.rect.height / self.entry_height().max(1)).unwrap_or(0)
    }

    fn max_scroll(&self) -> usize {
        self.entries.len().saturating_sub(self.visible_rows())
    }

    fn ensure_visible(&mut self, index: usize) {
        let rows = self.visible_rows().max(1);
        if index < self.scroll {
            self.scroll = index;
        } else if index >= self.scroll + rows {
            self.scroll = index + 1 - rows;
        }
    }

    fn entries_rect(&self) -> Rect {
        let rect = self.state.rect;
        Rect::new(
            rect.x,
            rect.y,
            (rect.width - self.scrollbar_width).max(0),
            rect.height,
        )
    }

    fn keyboard_target(&self, input: &InputState) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        let current = self.selected;
        if input.key_pressed(Key::Down) {
            Some(current.map_or(0, |i| (i + 1).min(last)))
        } else if input.key_pressed(Key::Up) {
            Some(current.map_or(0, |i| i.saturating_sub(1)))
        } else if input.key_pressed(Key::Home) {
            Some(0)
        } else if input.key_pressed(Key::End) {
            Some(last)
        } else {
            None
        }
    }
}

impl<T: ListEntry> Widget for List<T> {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState) -> WidgetResponse {
        let mut response = self.state.track_pointer(input);
        if !self.state.is_interactive() {
            return response;
        }
        let before = (self.selected, self.scroll);

        if response.clicked {
            self.set_focused(true);
            if let Some(index) = self.entry_at(input.mouse_x, input.mouse_y) {
                self.selected = Some(index);
            }
        } else if input.mouse_clicked(MouseButton::Left) {
            self.set_focused(false);
        }

        if self.state.is_focused() {
            if let Some(index) = self.keyboard_target(input) {
                self.set_selected(Some(index));
            }
        }

        if input.wheel != 0 && self.state.is_hovered() {
            let step = usize::try_from(input.wheel.unsigned_abs()).unwrap_or(usize::MAX);
            self.scroll = if input.wheel > 0 {
                self.scroll.saturating_sub(step)
            } else {
                self.scroll.saturating_add(step).min(self.max_scroll())
            };
        }

        response.changed = before != (self.selected, self.scroll);
        response
    }

    fn render(&self, surface: &mut dyn Surface) {
        if !self.state.is_visible() {
            return;
        }
        let enabled = self.state.is_enabled();
        let background = if enabled {
            &self.background
        } else {
            &self.disabled_background
        };
        background.draw(surface, self.state.rect);

        let area = self.entries_rect();
        let height = self.entry_height();
        let rows = self.visible_rows();

        for (row, (index, entry)) in self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(rows)
            .enumerate()
        {
            let y = area.y + i32::try_from(row).unwrap_or(0) * height;
            let row_rect = Rect::new(area.x, y, area.width, height);
            let selected = self.selected == Some(index);

            if selected {
                let highlight = if self.state.is_focused() || !enabled {
                    self.colors.focused_background
                } else {
                    self.colors.selected_background
                };
                surface.fill_rect(row_rect, highlight);
            }

            let color = if !enabled {
                self.colors.disabled
            } else if selected {
                self.colors.selected
            } else {
                self.colors.unselected
            };
            let text_rect = row_rect.inset(self.entry_padding);
            surface.draw_text(&entry.label(), text_rect.x, text_rect.y, &self.font, color);
        }

        if self.entries.len() > rows && rows > 0 {
            let track = Rect::new(area.right(), area.y, self.scrollbar_width, area.height);
            self.track.draw(surface, track);

            let total = i32::try_from(self.entries.len()).unwrap_or(i32::MAX);
            let handle_h = (track.height * i32::try_from(rows).unwrap_or(0) / total).max(1);
            let handle_y = track.height * i32::try_from(self.scroll).unwrap_or(0) / total;
            self.handle.draw(
                surface,
                Rect::new(track.x, track.y + handle_y, track.width, handle_h),
            );
        }
    }

    fn min_size(&self) -> (i32, i32) {
        (
            self.scrollbar_width + self.entry_padding.horizontal() + self.font.char_width(),
            self.entry_height(),
        )
    }

    fn preferred_size(&self) -> (i32, i32) {
        let widest = self
            .entries
            .iter()
            .map(|e| self.font.measure(&e.label()).0)
            .max()
            .unwrap_or(0);
        let count = i32::try_from(self.entries.len()).unwrap_or(i32::MAX);
        (
            widest + self.entry_padding.horizontal() + self.scrollbar_width,
            self.entry_height().saturating_mul(count.max(1)),
        )
    }
}
