//! Ability scripting
//!
//! Abilities are scripts of explicit instructions:
//! - Damage, heal and tag in/out against the attacker or defender
//! - Conditionals over hp, archetype, name and ring status
//! - Repeating and deferred blocks queued on the caster's scheduler
//! - Show lines for duel output

mod builder;
mod check;
mod instruction;
mod interpreter;

pub use builder::ScriptBuilder;
pub use check::{check_script, ScriptError};
pub use instruction::{BoolExpr, CompareOp, Instruction, Operand, Selector, Value, ValueKind};
pub use interpreter::{run_scheduled, Interpreter, ScheduledBlock, Scheduler};
