//! Fighter model
//!
//! A fighter is a plain value: name, archetype, health, ring status and the
//! abilities it has learned. Duel combatants are clones of registered
//! templates, so mutating one never touches the template or the opponent.

use super::Archetype;

/// Arena slot of a duel combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Slot index into a two-fighter arena
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// The other slot
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::One => write!(f, "Player1"),
            Player::Two => write!(f, "Player2"),
        }
    }
}

/// A single combatant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fighter {
    /// Unique name within the fighter registry
    pub name: String,
    /// Archetype used for modifier lookups
    pub archetype: Archetype,
    /// Maximum hit points (always positive)
    pub max_hp: i32,
    /// Current hit points, kept within `0..=max_hp`
    pub hp: i32,
    /// Whether the fighter is in the ring (out-of-ring fighters take no damage)
    pub in_ring: bool,
    /// Learned ability names, in learn order (duplicates allowed)
    pub abilities: Vec<String>,
}

impl Fighter {
    /// Create a fighter at full health, in the ring, with nothing learned
    pub fn new(name: &str, archetype: Archetype, max_hp: i32) -> Self {
        Self {
            name: name.to_string(),
            archetype,
            max_hp,
            hp: max_hp,
            in_ring: true,
            abilities: Vec::new(),
        }
    }

    /// Check if fighter is knocked out
    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Check if fighter is tagged out
    pub fn is_out_of_ring(&self) -> bool {
        !self.in_ring
    }

    /// Take damage (hp floors at zero), returning the hp actually lost
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(amount).clamp(0, self.max_hp);
        before - self.hp
    }

    /// Heal (cannot exceed max_hp), returning the hp actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).clamp(0, self.max_hp);
        self.hp - before
    }

    /// Tag in (`true`) or out (`false`)
    pub fn set_in_ring(&mut self, in_ring: bool) {
        self.in_ring = in_ring;
    }

    /// Append abilities to the learned list, verbatim
    pub fn learn<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities.extend(names.into_iter().map(Into::into));
    }

    /// Whether the fighter has learned an ability by this name
    pub fn knows(&self, ability: &str) -> bool {
        self.abilities.iter().any(|a| a == ability)
    }
}
