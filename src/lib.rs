//! ringside - turn-based scripted duel simulator
//!
//! Fighters and abilities are registered up front, usually from a JSON game
//! file. A [`Duel`] then plays two cloned fighters against each other, one
//! selected ability per fighter per round, until a knockout or the round cap.

pub mod combat;
pub mod config;
pub mod duel;
pub mod loader;
pub mod registry;
pub mod script;

pub use combat::{Archetype, Fighter, Player};
pub use config::{Config, LogFormat};
pub use duel::{AbilitySelector, Duel, DuelError, DuelEvent, Outcome, RoundReport};
pub use loader::{load_game, GameDefinition, LoadError, Roster};
pub use registry::{AbilityRegistry, FighterRegistry, NotFound, RegistrationError};
pub use script::{Instruction, ScriptBuilder};
