//! Offscreen render caches.
//!
//! Text areas and long lists are expensive to draw every frame. A
//! [`RenderCache`] draws its widget once into a [`PixelBuffer`] and blits
//! that buffer until the owner marks it dirty or the widget is resized.

use std::collections::HashMap;

use tracing::debug;

use crate::input::InputState;
use crate::layout::Rect;
use crate::nine_slice::NineSlice;
use crate::surface::{Offset, PixelBuffer, Surface};
use crate::widget::{List, ListEntry, TextArea, Widget, WidgetResponse, WidgetState};

/// Wraps a widget and replays its last rendering until invalidated.
///
/// The buffer is reused only while the cache is clean and its dimensions
/// equal the widget's current rect. Content changes made through
/// [`RenderCache::widget_mut`] are invisible to the cache; call
/// [`RenderCache::mark_dirty`] or use [`RenderCache::edit`].
#[derive(Debug)]
pub struct RenderCache<W> {
    widget: W,
    buffer: Option<PixelBuffer>,
    /// Rect size the buffer was drawn for. Differs from the buffer's own
    /// size when the rect is degenerate.
    drawn_size: Option<(i32, i32)>,
    dirty: bool,
    render_count: u64,
}

impl<W: Widget> RenderCache<W> {
    /// Wraps `widget`. The first render always draws.
    #[must_use]
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            buffer: None,
            drawn_size: None,
            dirty: true,
            render_count: 0,
        }
    }

    /// Forces a redraw on the next render.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns true if the next render will redraw.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.buffer.is_none() || self.drawn_size != Some(self.widget.rect().size())
    }

    /// Releases the offscreen buffer. The next render draws from scratch.
    pub fn dispose(&mut self) {
        self.buffer = None;
        self.drawn_size = None;
        self.dirty = true;
    }

    /// Number of times the wrapped widget has actually been drawn.
    #[must_use]
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Dimensions of the current buffer, if any.
    #[must_use]
    pub fn buffer_size(&self) -> Option<(i32, i32)> {
        self.buffer.as_ref().map(PixelBuffer::size)
    }

    /// The wrapped widget.
    #[must_use]
    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Mutable access without invalidating the cache.
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    /// Runs `f` on the widget and marks the cache dirty.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut W) -> R) -> R {
        self.dirty = true;
        f(&mut self.widget)
    }

    /// Unwraps the widget, dropping the buffer.
    pub fn into_inner(self) -> W {
        self.widget
    }

    fn redraw(&mut self) {
        let rect = self.widget.rect();
        let (width, height) = rect.size();

        let mut buffer = match self.buffer.take() {
            Some(mut buffer) if self.drawn_size == Some((width, height)) => {
                buffer.clear();
                buffer
            }
            Some(old) => {
                debug!(
                    old_width = old.width(),
                    old_height = old.height(),
                    width,
                    height,
                    "render cache resized"
                );
                PixelBuffer::new(width, height)
            }
            None => PixelBuffer::new(width, height),
        };

        {
            let mut local = Offset::new(&mut buffer, -rect.x, -rect.y);
            self.widget.render(&mut local);
        }
        self.buffer = Some(buffer);
        self.drawn_size = Some((width, height));
        self.dirty = false;
        self.render_count += 1;
        debug!(count = self.render_count, width, height, "render cache redraw");
    }
}

impl<W: Widget> Widget for RenderCache<W> {
    fn state(&self) -> &WidgetState {
        self.widget.state()
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        self.widget.state_mut()
    }

    /// Forwards input; a `changed` response invalidates the cache.
    fn update(&mut self, input: &InputState) -> WidgetResponse {
        let response = self.widget.update(input);
        if response.needs_redraw() {
            self.dirty = true;
        }
        response
    }

    /// Draws from the cached buffer, refreshing it first if stale.
    ///
    /// Takes `&self` to satisfy [`Widget`]; a stale cache falls back to
    /// drawing the widget directly. Use [`RenderCache::render_cached`] in
    /// frame loops.
    fn render(&self, surface: &mut dyn Surface) {
        if !self.widget.state().is_visible() {
            return;
        }
        match &self.buffer {
            Some(buffer) if !self.is_dirty() => {
                let rect = self.widget.rect();
                surface.blit(buffer, rect.x, rect.y);
            }
            _ => self.widget.render(surface),
        }
    }

    fn min_size(&self) -> (i32, i32) {
        self.widget.min_size()
    }

    fn preferred_size(&self) -> (i32, i32) {
        self.widget.preferred_size()
    }

    fn set_rect(&mut self, rect: Rect) {
        self.widget.set_rect(rect);
    }
}

impl<W: Widget> RenderCache<W> {
    /// Redraws into the buffer if stale, then blits it at the widget's
    /// screen position.
    pub fn render_cached(&mut self, target: &mut dyn Surface) {
        if !self.widget.state().is_visible() {
            return;
        }
        if self.is_dirty() {
            self.redraw();
        }
        if let Some(buffer) = &self.buffer {
            let rect = self.widget.rect();
            target.blit(buffer, rect.x, rect.y);
        }
    }
}

/// A text area whose rendering is cached.
pub type CachedTextArea = RenderCache<TextArea>;

impl CachedTextArea {
    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.widget.text()
    }

    /// Replaces the text and marks the cache dirty.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.widget.set_text(text);
        self.dirty = true;
    }

    /// Appends text and marks the cache dirty.
    pub fn append_text(&mut self, text: &str) {
        self.widget.append_text(text);
        self.dirty = true;
    }
}

/// A list whose rendering is cached.
pub type CachedList<T> = RenderCache<List<T>>;

impl<T: ListEntry> CachedList<T> {
    /// Replaces the entries and marks the cache dirty.
    pub fn set_entries(&mut self, entries: Vec<T>) {
        self.widget.set_entries(entries);
        self.dirty = true;
    }

    /// Changes the selection and marks the cache dirty.
    pub fn set_selected(&mut self, index: Option<usize>) {
        self.widget.set_selected(index);
        self.dirty = true;
    }

    /// Selected index.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.widget.selected()
    }

    /// Selected entry.
    #[must_use]
    pub fn selected_entry(&self) -> Option<&T> {
        self.widget.selected_entry()
    }
}

/// A nine-slice pre-rendered at one size.
#[derive(Debug)]
pub struct CachedBackground {
    source: NineSlice,
    buffer: Option<PixelBuffer>,
    drawn_size: Option<(i32, i32)>,
    dirty: bool,
}

impl CachedBackground {
    /// Wraps `source`; nothing is drawn until the first [`image`](Self::image).
    #[must_use]
    pub fn new(source: NineSlice) -> Self {
        Self {
            source,
            buffer: None,
            drawn_size: None,
            dirty: true,
        }
    }

    /// The background rendered at `(width, height)`.
    pub fn image(&mut self, width: i32, height: i32) -> &PixelBuffer {
        if self.is_stale(width, height) {
            let mut buffer = PixelBuffer::new(width, height);
            let bounds = buffer.bounds();
            self.source.draw(&mut buffer, bounds);
            self.buffer = Some(buffer);
            self.drawn_size = Some((width, height));
            self.dirty = false;
        }
        self.buffer.get_or_insert_with(|| PixelBuffer::new(width, height))
    }

    /// Forces a re-render on next access.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Releases the buffer.
    pub fn dispose(&mut self) {
        self.buffer = None;
        self.drawn_size = None;
        self.dirty = true;
    }

    /// Returns true if the next [`image`](Self::image) at `(width, height)`
    /// will re-render.
    #[must_use]
    pub fn is_stale(&self, width: i32, height: i32) -> bool {
        self.dirty || self.buffer.is_none() || self.drawn_size != Some((width, height))
    }
}

/// Pre-rendered backgrounds of one nine-slice, one per size in use.
#[derive(Debug)]
pub struct BackgroundPool {
    source: NineSlice,
    entries: HashMap<(i32, i32), CachedBackground>,
}

impl BackgroundPool {
    /// Creates an empty pool for `source`.
    #[must_use]
    pub fn new(source: NineSlice) -> Self {
        Self {
            source,
            entries: HashMap::new(),
        }
    }

    /// The background at `(width, height)`, rendering it on first use.
    pub fn image(&mut self, width: i32, height: i32) -> &PixelBuffer {
        self.entries
            .entry((width, height))
            .or_insert_with(|| CachedBackground::new(self.source.clone()))
            .image(width, height)
    }

    /// Invalidates every cached size.
    pub fn mark_all_dirty(&mut self) {
        for entry in self.entries.values_mut() {
            entry.mark_dirty();
        }
    }

    /// Drops every cached size.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached sizes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ScreenLayout;
    use crate::panel::{PanelBuilder, PanelOptions};
    use crate::style::{Color, UiResources};
    use crate::surface::Rgba8;

    fn cached_area() -> CachedTextArea {
        let mut area = RenderCache::new(TextArea::new(&UiResources::standard()).with_text("hello"));
        area.set_rect(Rect::new(10, 20, 200, 100));
        area
    }

    #[test]
    fn test_first_render_draws() {
        let mut area = cached_area();
        let mut target = PixelBuffer::new(400, 300);

        assert!(area.is_dirty());
        area.render_cached(&mut target);
        assert_eq!(area.render_count(), 1);
        assert_eq!(area.buffer_size(), Some((200, 100)));
    }

    #[test]
    fn test_clean_renders_reuse_buffer() {
        let mut area = cached_area();
        let mut target = PixelBuffer::new(400, 300);

        area.render_cached(&mut target);
        area.render_cached(&mut target);
        area.render_cached(&mut target);
        assert_eq!(area.render_count(), 1);
    }

    #[test]
    fn test_mark_dirty_redraws() {
        let mut area = cached_area();
        let mut target = PixelBuffer::new(400, 300);

        area.render_cached(&mut target);
        area.mark_dirty();
        area.render_cached(&mut target);
        assert_eq!(area.render_count(), 2);

        area.set_text("bye");
        area.render_cached(&mut target);
        assert_eq!(area.render_count(), 3);
    }

    #[test]
    fn test_resize_replaces_buffer() {
        let mut area = cached_area();
        let mut target = PixelBuffer::new(400, 300);

        area.render_cached(&mut target);
        area.set_rect(Rect::new(10, 20, 120, 80));
        assert!(area.is_dirty());
        area.render_cached(&mut target);

        assert_eq!(area.render_count(), 2);
        assert_eq!(area.buffer_size(), Some((120, 80)));
    }

    #[test]
    fn test_dispose_forces_redraw() {
        let mut area = cached_area();
        let mut target = PixelBuffer::new(400, 300);

        area.render_cached(&mut target);
        area.dispose();
        assert_eq!(area.buffer_size(), None);
        area.render_cached(&mut target);
        assert_eq!(area.render_count(), 2);
    }

    #[test]
    fn test_blit_lands_at_widget_position() {
        let mut area = cached_area();
        let mut target = PixelBuffer::new(400, 300);
        area.render_cached(&mut target);

        assert_ne!(target.pixel(10, 20), Some(Rgba8::TRANSPARENT));
        assert_eq!(target.pixel(9, 20), Some(Rgba8::TRANSPARENT));
        let run = &target.text_runs()[0];
        assert_eq!(run.text, "hello");
        assert!(run.x >= 10 && run.y >= 20);
    }

    #[test]
    fn test_widget_mut_does_not_invalidate() {
        let mut area = cached_area();
        let mut target = PixelBuffer::new(400, 300);
        area.render_cached(&mut target);

        area.widget_mut().set_text("quiet");
        area.render_cached(&mut target);
        assert_eq!(area.render_count(), 1);

        area.edit(|w| w.set_text("loud"));
        area.render_cached(&mut target);
        assert_eq!(area.render_count(), 2);
    }

    #[test]
    fn test_hidden_widget_skips_render() {
        let mut area = cached_area();
        area.state_mut().set_visible(false);
        let mut target = PixelBuffer::new(400, 300);
        area.render_cached(&mut target);
        assert_eq!(area.render_count(), 0);
    }

    #[test]
    fn test_degenerate_rect_draws_once() {
        let builder = PanelBuilder::new(ScreenLayout::new(1920, 1080, 32));
        let rect = builder.resolve(&PanelOptions::new().top_left().size(-0.1, 0.2)).rect;
        assert_eq!(rect.size(), (-192, 216));

        let mut area = RenderCache::new(TextArea::new(&UiResources::standard()).with_text("hi"));
        area.set_rect(rect);
        let mut target = PixelBuffer::new(400, 300);
        for _ in 0..3 {
            area.render_cached(&mut target);
        }

        assert_eq!(area.render_count(), 1);
        assert_eq!(area.buffer_size(), Some((0, 216)));
        assert!(!area.is_dirty());
    }

    #[test]
    fn test_degenerate_background_renders_once() {
        let mut background = CachedBackground::new(NineSlice::solid(Color::WHITE));

        assert_eq!(background.image(-5, 10).size(), (0, 10));
        assert!(!background.is_stale(-5, 10));
        assert!(background.is_stale(5, 10));
    }

    #[test]
    fn test_background_pool_per_size() {
        let mut pool = BackgroundPool::new(NineSlice::solid(Color::WHITE));

        assert_eq!(pool.image(10, 10).size(), (10, 10));
        assert_eq!(pool.image(20, 5).size(), (20, 5));
        assert_eq!(pool.image(10, 10).pixel(9, 9), Some(Rgba8::new(255, 255, 255, 255)));
        assert_eq!(pool.len(), 2);

        pool.mark_all_dirty();
        assert_eq!(pool.image(20, 5).size(), (20, 5));
        pool.clear();
        assert!(pool.is_empty());
    }
}
