//! Player stats panel content.

use std::fmt;

use tinker_ui::widget::Widget;
use tinker_ui::{CachedTextArea, Rect, RenderCache, Surface, TextArea, UiResources};

/// Shown when there is no player to describe.
pub const NO_PLAYER_TEXT: &str = "No player data available";

/// Player attributes as the interface displays them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    /// Current hit points.
    pub health: i32,
    /// Maximum hit points.
    pub max_health: i32,
    /// Attack bonus.
    pub attack: i32,
    /// Damage reduction.
    pub defense: i32,
    /// Armor class.
    pub armor_class: i32,
    /// Dodge chance, in percent.
    pub dodge: i32,
    /// Tiles per turn.
    pub movement_speed: i32,
    /// Attacks per turn.
    pub attack_speed: i32,
}

impl fmt::Display for PlayerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HP: {}/{}", self.health, self.max_health)?;
        writeln!(f, "Attack: {}", self.attack)?;
        writeln!(f, "Defense: {}", self.defense)?;
        writeln!(f, "AC: {}", self.armor_class)?;
        writeln!(f, "Dodge: {}%", self.dodge)?;
        writeln!(f, "Move: {}", self.movement_speed)?;
        write!(f, "Attack Speed: {}", self.attack_speed)
    }
}

/// What the player has equipped, by display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loadout {
    /// Melee weapon.
    pub melee: Option<String>,
    /// Ranged weapon.
    pub ranged: Option<String>,
    /// Worn armor.
    pub armor: Option<String>,
}

impl fmt::Display for Loadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = |item: Option<&str>| item.unwrap_or("None").to_owned();
        writeln!(f, "Melee: {}", slot(self.melee.as_deref()))?;
        writeln!(f, "Ranged: {}", slot(self.ranged.as_deref()))?;
        write!(f, "Armor: {}", slot(self.armor.as_deref()))
    }
}

/// Text area showing [`PlayerStats`].
#[derive(Debug)]
pub struct StatsDisplay {
    area: CachedTextArea,
}

impl StatsDisplay {
    /// Creates a display showing the no-player text.
    #[must_use]
    pub fn new(res: &UiResources) -> Self {
        Self {
            area: RenderCache::new(TextArea::new(res).with_text(NO_PLAYER_TEXT)),
        }
    }

    /// Wraps an existing text area, e.g. one built into a detail panel.
    #[must_use]
    pub fn from_area(area: CachedTextArea) -> Self {
        Self { area }
    }

    /// Rewrites the text from `stats`.
    ///
    /// Only marks the cache dirty when the text actually changed. Returns
    /// true in that case.
    pub fn refresh(&mut self, stats: Option<&PlayerStats>) -> bool {
        let text = stats.map_or_else(|| NO_PLAYER_TEXT.to_owned(), ToString::to_string);
        self.set_text(text)
    }

    /// Shows arbitrary text. Returns true if it differed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.area.text() == text {
            return false;
        }
        self.area.set_text(text);
        true
    }

    /// Displayed text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.area.text()
    }

    /// The backing text area.
    #[must_use]
    pub fn area(&self) -> &CachedTextArea {
        &self.area
    }

    /// Moves the display.
    pub fn set_rect(&mut self, rect: Rect) {
        self.area.set_rect(rect);
    }

    /// Draws through the cache.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        self.area.render_cached(surface);
    }

    /// Releases the offscreen buffer.
    pub fn dispose(&mut self) {
        self.area.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinker_ui::PixelBuffer;

    fn stats() -> PlayerStats {
        PlayerStats {
            health: 18,
            max_health: 25,
            attack: 4,
            defense: 2,
            armor_class: 12,
            dodge: 10,
            movement_speed: 5,
            attack_speed: 1,
        }
    }

    #[test]
    fn test_format() {
        let text = stats().to_string();
        assert!(text.starts_with("HP: 18/25\n"));
        assert!(text.ends_with("Attack Speed: 1"));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn test_loadout_format() {
        let loadout = Loadout {
            melee: Some("Iron Sword".to_owned()),
            armor: Some("Leather".to_owned()),
            ..Loadout::default()
        };
        assert_eq!(loadout.to_string(), "Melee: Iron Sword\nRanged: None\nArmor: Leather");
    }

    #[test]
    fn test_no_player() {
        let mut display = StatsDisplay::new(&UiResources::standard());
        assert_eq!(display.text(), NO_PLAYER_TEXT);
        assert!(!display.refresh(None));
    }

    #[test]
    fn test_refresh_only_dirties_on_change() {
        let mut display = StatsDisplay::new(&UiResources::standard());
        display.set_rect(Rect::new(0, 0, 288, 129));
        let mut screen = PixelBuffer::new(300, 140);

        assert!(display.refresh(Some(&stats())));
        display.render(&mut screen);
        assert_eq!(display.area().render_count(), 1);

        assert!(!display.refresh(Some(&stats())));
        assert!(!display.area().is_dirty());
        display.render(&mut screen);
        assert_eq!(display.area().render_count(), 1);

        let hurt = PlayerStats { health: 10, ..stats() };
        assert!(display.refresh(Some(&hurt)));
        display.render(&mut screen);
        assert_eq!(display.area().render_count(), 2);
    }
}
