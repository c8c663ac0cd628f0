//! Scrollable multi-line text.

use super::{Widget, WidgetResponse, WidgetState};
use crate::input::InputState;
use crate::layout::{Insets, Rect};
use crate::nine_slice::NineSlice;
use crate::style::{Color, FontFace, UiResources};
use crate::surface::Surface;

/// Lines scrolled per wheel notch.
const WHEEL_LINES: i32 = 3;

/// Read-only text area with word wrapping and a vertical scrollbar.
#[derive(Debug, Clone)]
pub struct TextArea {
    state: WidgetState,
    text: String,
    font: FontFace,
    color: Color,
    background: NineSlice,
    track: NineSlice,
    handle: NineSlice,
    scrollbar_width: i32,
    padding: Insets,
    scroll: usize,
    /// Re-pin to the last line whenever the user scrolls back down.
    tail_mode: bool,
    follow_tail: bool,
}

impl TextArea {
    /// Creates an empty text area styled from `res`.
    #[must_use]
    pub fn new(res: &UiResources) -> Self {
        Self {
            state: WidgetState::new(),
            text: String::new(),
            font: res.small_face.clone(),
            color: res.text,
            background: res.scroll.idle.clone(),
            track: res.scroll.track.clone(),
            handle: res.scroll.handle.clone(),
            scrollbar_width: res.scrollbar_width,
            padding: res.entry_padding,
            scroll: 0,
            tail_mode: false,
            follow_tail: false,
        }
    }

    /// Sets the initial text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Keeps the view pinned to the last line as text is appended.
    ///
    /// Scrolling up unpins the view; scrolling back to the bottom pins it
    /// again.
    #[must_use]
    pub fn follow_tail(mut self, follow: bool) -> Self {
        self.tail_mode = follow;
        self.follow_tail = follow;
        self
    }

    /// Returns true while the view tracks the last line.
    #[must_use]
    pub fn is_following_tail(&self) -> bool {
        self.follow_tail
    }

    /// Full text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text and scrolls back to the top (or the end when following).
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.scroll = 0;
    }

    /// Appends text verbatim.
    pub fn append_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Index of the first visible line.
    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        if self.follow_tail {
            self.max_scroll()
        } else {
            self.scroll.min(self.max_scroll())
        }
    }

    /// The text broken into display lines for the current width.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let columns = self.text_rect().width / self.font.char_width().max(1);
        wrap_text(&self.text, usize::try_from(columns).unwrap_or(0).max(1))
    }

    /// Number of whole lines that fit.
    #[must_use]
    pub fn visible_lines(&self) -> usize {
        let rows = self.text_rect().height / self.font.line_height().max(1);
        usize::try_from(rows).unwrap_or(0)
    }

    fn max_scroll(&self) -> usize {
        self.lines().len().saturating_sub(self.visible_lines())
    }

    fn text_rect(&self) -> Rect {
        let inner = self.state.rect.inset(self.padding);
        Rect::new(
            inner.x,
            inner.y,
            (inner.width - self.scrollbar_width).max(0),
            inner.height.max(0),
        )
    }

    fn scrollbar_rect(&self) -> Rect {
        let rect = self.state.rect;
        Rect::new(
            rect.right() - self.scrollbar_width,
            rect.y,
            self.scrollbar_width,
            rect.height,
        )
    }
}

impl Widget for TextArea {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, input: &InputState) -> WidgetResponse {
        let mut response = self.state.track_pointer(input);
        if input.wheel == 0 || !self.state.is_hovered() {
            return response;
        }

        let before = self.scroll_offset();
        let max = self.max_scroll();
        let delta = input.wheel.saturating_mul(WHEEL_LINES);
        let target = i64::try_from(before).unwrap_or(i64::MAX) - i64::from(delta);
        let after = usize::try_from(target.max(0)).unwrap_or(0).min(max);

        if self.tail_mode {
            self.follow_tail = after == max;
        }
        self.scroll = after;
        response.changed = after != before;
        response
    }

    fn render(&self, surface: &mut dyn Surface) {
        if !self.state.is_visible() {
            return;
        }
        self.background.draw(surface, self.state.rect);

        let lines = self.lines();
        let visible = self.visible_lines();
        let first = self.scroll_offset();
        let area = self.text_rect();
        let line_height = self.font.line_height();

        let mut y = area.y;
        for line in lines.iter().skip(first).take(visible) {
            surface.draw_text(line, area.x, y, &self.font, self.color);
            y += line_height;
        }

        if lines.len() > visible && visible > 0 {
            let track = self.scrollbar_rect();
            self.track.draw(surface, track);

            let total = lines.len() as i64;
            let height = i64::from(track.height);
            let handle_h = (height * visible as i64 / total).max(1);
            let handle_y = height * first as i64 / total;
            self.handle.draw(
                surface,
                Rect::new(
                    track.x,
                    track.y + i32::try_from(handle_y).unwrap_or(0),
                    track.width,
                    i32::try_from(handle_h).unwrap_or(track.height),
                ),
            );
        }
    }

    fn min_size(&self) -> (i32, i32) {
        (
            self.padding.horizontal() + self.scrollbar_width + self.font.char_width(),
            self.padding.vertical() + self.font.line_height(),
        )
    }
}

/// Breaks `text` into lines of at most `columns` characters.
///
/// Explicit newlines are kept. Words wrap at whitespace; a word longer than a
/// whole line is split.
#[must_use]
pub fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut out = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut len = 0;

        for word in paragraph.split_whitespace() {
            let mut word_len = word.chars().count();
            let mut rest = word;

            if len > 0 && len + 1 + word_len > columns {
                out.push(std::mem::take(&mut line));
                len = 0;
            }
            while word_len > columns {
                let split = rest.char_indices().nth(columns).map_or(rest.len(), |(i, _)| i);
                if len > 0 {
                    out.push(std::mem::take(&mut line));
                    len = 0;
                }
                out.push(rest[..split].to_owned());
                rest = &rest[split..];
                word_len -= columns;
            }
            if rest.is_empty() {
                continue;
            }
            if len > 0 {
                line.push(' ');
                len += 1;
            }
            line.push_str(rest);
            len += word_len;
        }
        out.push(line);
    }
    out
}
