//! Combat system module
//!
//! Implements the building blocks of a duel:
//! - Fighters and their archetypes
//! - Archetype damage modifiers and grappler regeneration
//! - Per-combatant scheduling of repeating and deferred effects

mod archetype;
mod effects;
mod fighter;

pub use archetype::{
    final_damage, incoming_modifier, outgoing_modifier, passive_regen, Archetype, DamageResult,
};
pub use effects::{EffectScheduler, ScheduledEffect};
pub use fighter::{Fighter, Player};
