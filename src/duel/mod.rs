//! Duel runner
//!
//! Drives two cloned fighters through rounds until one is knocked out or the
//! round cap is reached. Ability choices come from an [`AbilitySelector`];
//! everything that happens is reported as [`DuelEvent`]s.

mod engine;
mod report;
mod select;

pub use engine::{Duel, DuelError, Phase, MAX_ROUNDS};
pub use report::{DuelEvent, Outcome, RoundReport, StatusSnapshot, TurnResolution};
pub use select::{read_choice, AbilitySelector, LineSelector, ScriptedSelector};
