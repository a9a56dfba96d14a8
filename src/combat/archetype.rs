//! Fighter archetypes and damage modifiers
//!
//! Handles damage calculation with:
//! - Outgoing multipliers keyed on the attacker's archetype
//! - Incoming multipliers keyed on the defender's archetype
//! - Round parity (grapplers hit harder on odd rounds)
//! - Grappler regeneration on even rounds

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Fighter;

/// Fighter categories that drive modifier lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Fast pressure fighter, bonus against grapplers
    Rushdown,
    /// Throw specialist, strong on odd rounds and regenerates on even ones
    Grappler,
    /// Slow and tanky, takes reduced damage
    Heavy,
    /// Slippery, small bonus out and small reduction in
    Evasive,
}

impl Archetype {
    /// Get all archetypes
    pub fn all() -> &'static [Archetype] {
        &[
            Archetype::Rushdown,
            Archetype::Grappler,
            Archetype::Heavy,
            Archetype::Evasive,
        ]
    }

    /// Display name, as used by the game file format
    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Rushdown => "Rushdown",
            Archetype::Grappler => "Grappler",
            Archetype::Heavy => "Heavy",
            Archetype::Evasive => "Evasive",
        }
    }
}

impl FromStr for Archetype {
    type Err = ();

    /// Archetype names are exact; "heavy" is not "Heavy".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Rushdown" => Ok(Archetype::Rushdown),
            "Grappler" => Ok(Archetype::Grappler),
            "Heavy" => Ok(Archetype::Heavy),
            "Evasive" => Ok(Archetype::Evasive),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Multiplier applied to damage dealt by `attacker`
pub fn outgoing_modifier(attacker: Archetype, defender: Archetype, round: u32) -> f64 {
    match attacker {
        Archetype::Rushdown => {
            if defender == Archetype::Grappler {
                1.20
            } else {
                1.15
            }
        }
        Archetype::Evasive => 1.07,
        Archetype::Grappler => {
            if round % 2 == 1 {
                1.07
            } else {
                1.0
            }
        }
        Archetype::Heavy => 1.0,
    }
}

/// Multiplier applied to damage received by `defender`
pub fn incoming_modifier(defender: Archetype, attacker: Archetype) -> f64 {
    match defender {
        Archetype::Heavy => {
            if attacker == Archetype::Evasive {
                0.70
            } else {
                0.80
            }
        }
        Archetype::Evasive => 0.93,
        Archetype::Rushdown | Archetype::Grappler => 1.0,
    }
}

/// Result of a damage calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageResult {
    /// Damage named by the script
    pub base_damage: i32,
    /// Attacker-side multiplier
    pub outgoing: f64,
    /// Defender-side multiplier
    pub incoming: f64,
    /// Damage after both multipliers, truncated toward zero
    pub final_damage: i32,
}

impl DamageResult {
    /// Calculate damage for an attacker/defender pairing in a given round
    pub fn new(base: i32, attacker: Archetype, defender: Archetype, round: u32) -> Self {
        let outgoing = outgoing_modifier(attacker, defender, round);
        let incoming = incoming_modifier(defender, attacker);
        // `as` truncates toward zero, which is the rounding rule we want
        let final_damage = (base as f64 * outgoing * incoming) as i32;

        Self {
            base_damage: base,
            outgoing,
            incoming,
            final_damage,
        }
    }
}

/// Final damage after archetype modifiers
pub fn final_damage(base: i32, attacker: Archetype, defender: Archetype, round: u32) -> i32 {
    DamageResult::new(base, attacker, defender, round).final_damage
}

/// Apply start-of-round regeneration, returning the hp actually restored.
///
/// Grapplers recover 5% of max hp (rounded down) on every even round after
/// round zero. Everyone else gets nothing.
pub fn passive_regen(fighter: &mut Fighter, round: u32) -> i32 {
    if fighter.archetype == Archetype::Grappler && round > 0 && round % 2 == 0 {
        let amount = (fighter.max_hp as f64 * 0.05) as i32;
        fighter.heal(amount)
    } else {
        0
    }
}
