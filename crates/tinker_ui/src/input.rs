//! Per-frame input snapshot.
//!
//! The host engine feeds raw events in; widgets read the snapshot during
//! `update`. Everything runs on the frame thread, so there is no queueing:
//! a click recorded this frame is handled this frame.

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Keys the UI reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Space bar.
    Space,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Deletes the character before the caret.
    Backspace,
    /// Opens the squad builder.
    B,
    /// Opens the equipment screen.
    E,
    /// Opens the inventory screen.
    I,
    /// Opens the formation editor.
    F,
    /// Toggles the squad leader.
    L,
    /// Opens the throwables screen.
    T,
}

impl MouseButton {
    const fn bit(self) -> u8 {
        match self {
            Self::Left => 0b001,
            Self::Right => 0b010,
            Self::Middle => 0b100,
        }
    }
}

/// Set of mouse buttons packed into one byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Buttons(u8);

impl Buttons {
    fn insert(&mut self, button: MouseButton) {
        self.0 |= button.bit();
    }

    fn remove(&mut self, button: MouseButton) {
        self.0 &= !button.bit();
    }

    const fn contains(self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }
}

/// Last left press, for double-click detection.
#[derive(Debug, Clone, Copy)]
struct LastClick {
    time: f32,
    x: i32,
    y: i32,
}

impl LastClick {
    /// Presses closer than this, in seconds, pair up.
    const WINDOW: f32 = 0.3;
    /// Per-axis slop in pixels.
    const SLOP: i32 = 5;

    const NEVER: Self = Self {
        time: f32::NEG_INFINITY,
        x: 0,
        y: 0,
    };

    fn pairs_with(&self, time: f32, x: i32, y: i32) -> bool {
        time - self.time < Self::WINDOW
            && (x - self.x).abs() < Self::SLOP
            && (y - self.y).abs() < Self::SLOP
    }
}

/// What the pointer and keyboard did this frame.
///
/// Press/release sets and the wheel reset in [`InputState::begin_frame`];
/// held buttons and keys persist until released.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Pointer x in screen pixels.
    pub mouse_x: i32,
    /// Pointer y in screen pixels.
    pub mouse_y: i32,
    /// Wheel notches this frame; positive scrolls up.
    pub wheel: i32,
    pressed: Buttons,
    released: Buttons,
    held: Buttons,
    keys_pressed: Vec<Key>,
    keys_held: Vec<Key>,
    typed: String,
    last_click: LastClick,
    double_clicked: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    /// No buttons, no keys, pointer at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mouse_x: 0,
            mouse_y: 0,
            wheel: 0,
            pressed: Buttons::default(),
            released: Buttons::default(),
            held: Buttons::default(),
            keys_pressed: Vec::new(),
            keys_held: Vec::new(),
            typed: String::new(),
            last_click: LastClick::NEVER,
            double_clicked: false,
        }
    }

    /// Clears per-frame edges. Call before feeding the frame's events.
    pub fn begin_frame(&mut self) {
        self.pressed = Buttons::default();
        self.released = Buttons::default();
        self.wheel = 0;
        self.keys_pressed.clear();
        self.typed.clear();
        self.double_clicked = false;
    }

    /// Moves the pointer.
    pub fn set_mouse_pos(&mut self, x: i32, y: i32) {
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Pointer position.
    #[must_use]
    pub const fn mouse_pos(&self) -> (i32, i32) {
        (self.mouse_x, self.mouse_y)
    }

    /// Records a press at `current_time` seconds.
    pub fn mouse_button_down(&mut self, button: MouseButton, current_time: f32) {
        self.pressed.insert(button);
        self.held.insert(button);
        if button != MouseButton::Left {
            return;
        }
        let (x, y) = self.mouse_pos();
        if self.last_click.pairs_with(current_time, x, y) {
            self.double_clicked = true;
        }
        self.last_click = LastClick {
            time: current_time,
            x,
            y,
        };
    }

    /// Records a release.
    pub fn mouse_button_up(&mut self, button: MouseButton) {
        self.released.insert(button);
        self.held.remove(button);
    }

    /// Adds wheel notches.
    pub fn scroll(&mut self, notches: i32) {
        self.wheel += notches;
    }

    /// Records a key press. Auto-repeat of a held key is ignored.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys_held.contains(&key) {
            self.keys_pressed.push(key);
            self.keys_held.push(key);
        }
    }

    /// Records text the keyboard produced this frame. Control characters
    /// are dropped.
    pub fn type_text(&mut self, text: &str) {
        self.typed.extend(text.chars().filter(|c| !c.is_control()));
    }

    /// Records a key release.
    pub fn key_up(&mut self, key: Key) {
        self.keys_held.retain(|&k| k != key);
    }

    /// Pressed this frame.
    #[must_use]
    pub const fn mouse_clicked(&self, button: MouseButton) -> bool {
        self.pressed.contains(button)
    }

    /// Released this frame.
    #[must_use]
    pub const fn mouse_released(&self, button: MouseButton) -> bool {
        self.released.contains(button)
    }

    /// Currently held.
    #[must_use]
    pub const fn mouse_down(&self, button: MouseButton) -> bool {
        self.held.contains(button)
    }

    /// The left press this frame completed a double click.
    #[must_use]
    pub const fn double_clicked(&self) -> bool {
        self.double_clicked
    }

    /// Pressed this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Currently held.
    #[must_use]
    pub fn key_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    /// Text typed this frame.
    #[must_use]
    pub fn typed_text(&self) -> &str {
        &self.typed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_click() {
        let mut input = InputState::new();

        input.mouse_button_down(MouseButton::Left, 0.0);
        assert!(input.mouse_clicked(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));

        input.begin_frame();
        assert!(!input.mouse_clicked(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));

        input.mouse_button_up(MouseButton::Left);
        assert!(input.mouse_released(MouseButton::Left));
        assert!(!input.mouse_down(MouseButton::Left));
    }

    #[test]
    fn test_double_click() {
        let mut input = InputState::new();

        input.mouse_button_down(MouseButton::Left, 0.0);
        assert!(!input.double_clicked());
        input.begin_frame();
        input.mouse_button_down(MouseButton::Left, 0.1);

        assert!(input.double_clicked());
    }

    #[test]
    fn test_distant_presses_do_not_pair() {
        let mut input = InputState::new();
        input.set_mouse_pos(10, 10);
        input.mouse_button_down(MouseButton::Left, 0.0);
        input.begin_frame();
        input.set_mouse_pos(40, 10);
        input.mouse_button_down(MouseButton::Left, 0.1);
        assert!(!input.double_clicked());

        input.begin_frame();
        input.mouse_button_down(MouseButton::Left, 0.9);
        assert!(!input.double_clicked());
    }

    #[test]
    fn test_key_pressed_once() {
        let mut input = InputState::new();
        input.key_down(Key::I);
        input.key_down(Key::I);
        assert!(input.key_pressed(Key::I));

        input.begin_frame();
        assert!(!input.key_pressed(Key::I));
        assert!(input.key_held(Key::I));

        input.key_up(Key::I);
        input.key_down(Key::I);
        assert!(input.key_pressed(Key::I));
    }

    #[test]
    fn test_typed_text_is_per_frame() {
        let mut input = InputState::new();
        input.type_text("Red\tWolves");
        assert_eq!(input.typed_text(), "RedWolves");

        input.begin_frame();
        assert_eq!(input.typed_text(), "");
    }
}
