//! Scrolling game message log.

use std::collections::VecDeque;

use tinker_ui::widget::Widget;
use tinker_ui::{CachedTextArea, InputState, Rect, RenderCache, Surface, TextArea, UiResources, WidgetResponse};

/// Bounded log of game messages shown newest-last.
#[derive(Debug)]
pub struct MessageLog {
    area: CachedTextArea,
    lines: VecDeque<String>,
    capacity: usize,
}

impl MessageLog {
    /// Creates an empty log keeping at most `capacity` lines.
    #[must_use]
    pub fn new(res: &UiResources, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            area: RenderCache::new(TextArea::new(res).follow_tail(true)),
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Wraps an existing text area, pinning it to its last line.
    #[must_use]
    pub fn from_area(area: CachedTextArea, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut area = RenderCache::new(area.into_inner().follow_tail(true));
        area.set_text(String::new());
        Self {
            area,
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a line, dropping the oldest past capacity.
    pub fn push(&mut self, message: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(message.into());
        self.sync();
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.sync();
    }

    /// Lines in display order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Number of lines held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Maximum number of lines kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The backing text area.
    #[must_use]
    pub fn area(&self) -> &CachedTextArea {
        &self.area
    }

    /// Moves the log.
    pub fn set_rect(&mut self, rect: Rect) {
        self.area.set_rect(rect);
    }

    /// Forwards input (wheel scrolling).
    pub fn update(&mut self, input: &InputState) -> WidgetResponse {
        self.area.update(input)
    }

    /// Draws through the cache.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        self.area.render_cached(surface);
    }

    /// Releases the offscreen buffer.
    pub fn dispose(&mut self) {
        self.area.dispose();
    }

    fn sync(&mut self) {
        let text = self.lines.iter().map(String::as_str).collect::<Vec<_>>().join("\n");
        self.area.set_text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinker_ui::PixelBuffer;

    #[test]
    fn test_push_drops_oldest() {
        let mut log = MessageLog::new(&UiResources::standard(), 3);
        for i in 1..=5 {
            log.push(format!("msg {i}"));
        }

        assert_eq!(log.len(), 3);
        assert_eq!(log.lines().collect::<Vec<_>>(), vec!["msg 3", "msg 4", "msg 5"]);
        assert_eq!(log.area().text(), "msg 3\nmsg 4\nmsg 5");
    }

    #[test]
    fn test_push_invalidates_cache() {
        let mut log = MessageLog::new(&UiResources::standard(), 10);
        log.set_rect(Rect::new(0, 0, 300, 120));
        let mut screen = PixelBuffer::new(400, 200);

        log.render(&mut screen);
        log.render(&mut screen);
        assert_eq!(log.area().render_count(), 1);

        log.push("You found a key.");
        assert!(log.area().is_dirty());
        log.render(&mut screen);
        assert_eq!(log.area().render_count(), 2);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut log = MessageLog::new(&UiResources::standard(), 0);
        log.push("a");
        log.push("b");
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.lines().collect::<Vec<_>>(), vec!["b"]);
    }
}
