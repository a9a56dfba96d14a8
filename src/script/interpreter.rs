//! Script interpreter
//!
//! Runs an ability script against a live attacker/defender pair. Effects are
//! applied in place as each instruction executes; there is no rollback.
//! `Repeat` and `DeferredOnce` do not run their bodies immediately, they bind
//! the current pair by [`Player`] id and queue the body on the acting
//! fighter's scheduler.

use std::sync::Arc;

use tracing::debug;

use super::{BoolExpr, Instruction, Operand, Selector, Value};
use crate::combat::{DamageResult, EffectScheduler, Fighter, Player};

/// A script body bound to the pair that was fighting when it was scheduled
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledBlock {
    pub attacker: Player,
    pub defender: Player,
    pub body: Arc<[Instruction]>,
}

/// Scheduler type carried by every combatant
pub type Scheduler = EffectScheduler<ScheduledBlock>;

/// Execution context for one script run
pub struct Interpreter<'a> {
    attacker: &'a mut Fighter,
    defender: &'a mut Fighter,
    attacker_id: Player,
    defender_id: Player,
    round: u32,
    scheduler: &'a mut Scheduler,
    output: Vec<String>,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter for `attacker` acting on `defender` in `round`.
    /// Scheduled bodies go on `scheduler`, which belongs to the attacker.
    pub fn new(
        (attacker_id, attacker): (Player, &'a mut Fighter),
        (defender_id, defender): (Player, &'a mut Fighter),
        round: u32,
        scheduler: &'a mut Scheduler,
    ) -> Self {
        Self {
            attacker,
            defender,
            attacker_id,
            defender_id,
            round,
            scheduler,
            output: Vec::new(),
        }
    }

    /// Execute each instruction in order
    pub fn execute(&mut self, script: &[Instruction]) {
        for instruction in script {
            self.step(instruction);
        }
    }

    /// Lines emitted by `Show` so far, in order
    pub fn into_output(self) -> Vec<String> {
        self.output
    }

    fn step(&mut self, instruction: &Instruction) {
        match instruction {
            Instruction::Damage { target, amount } => self.damage(*target, *amount),
            Instruction::Heal { target, amount } => {
                let healed = self.fighter_mut(*target).heal(*amount);
                debug!(target = %self.fighter(*target).name, healed, "heal");
            }
            Instruction::SetRingStatus { target, in_ring } => {
                let fighter = self.fighter_mut(*target);
                fighter.set_in_ring(*in_ring);
                debug!(target = %fighter.name, in_ring, "ring status set");
            }
            Instruction::Conditional {
                condition,
                then_block,
                else_block,
            } => {
                if self.evaluate(condition) {
                    self.execute(then_block);
                } else {
                    self.execute(else_block);
                }
            }
            Instruction::Repeat { rounds, body } => {
                let block = self.bind(body);
                self.scheduler.schedule_repeat(*rounds, block);
            }
            Instruction::DeferredOnce { rounds, body } => {
                let block = self.bind(body);
                self.scheduler.schedule_once(*rounds, block);
            }
            Instruction::Show { parts } => {
                let line: String = parts.iter().map(|p| self.value(p).to_string()).collect();
                self.output.push(line);
            }
        }
    }

    fn damage(&mut self, target: Selector, amount: i32) {
        let source = self.attacker.archetype;
        let round = self.round;
        let fighter = self.fighter_mut(target);

        if fighter.is_out_of_ring() {
            debug!(target = %fighter.name, "damage discarded, target is out of the ring");
            return;
        }

        let result = DamageResult::new(amount, source, fighter.archetype, round);
        let dealt = fighter.take_damage(result.final_damage);
        debug!(
            target = %fighter.name,
            base = result.base_damage,
            outgoing = result.outgoing,
            incoming = result.incoming,
            dealt,
            hp = fighter.hp,
            "damage"
        );
    }

    fn bind(&self, body: &[Instruction]) -> ScheduledBlock {
        ScheduledBlock {
            attacker: self.attacker_id,
            defender: self.defender_id,
            body: Arc::from(body),
        }
    }

    fn fighter(&self, selector: Selector) -> &Fighter {
        match selector {
            Selector::Attacker => &*self.attacker,
            Selector::Defender => &*self.defender,
        }
    }

    fn fighter_mut(&mut self, selector: Selector) -> &mut Fighter {
        match selector {
            Selector::Attacker => &mut *self.attacker,
            Selector::Defender => &mut *self.defender,
        }
    }

    /// Evaluate a condition against the current state of the pair
    pub fn evaluate(&self, expr: &BoolExpr) -> bool {
        match expr {
            BoolExpr::Const(b) => *b,
            BoolExpr::OutOfRing(selector) => self.fighter(*selector).is_out_of_ring(),
            BoolExpr::Compare { lhs, op, rhs } => self
                .value(lhs)
                .compare(&self.value(rhs))
                .is_some_and(|ordering| op.accepts(ordering)),
            BoolExpr::And(args) => args.iter().all(|arg| self.evaluate(arg)),
            BoolExpr::Or(args) => args.iter().any(|arg| self.evaluate(arg)),
            BoolExpr::Not(arg) => !self.evaluate(arg),
        }
    }

    /// Evaluate an operand
    pub fn value(&self, operand: &Operand) -> Value {
        match operand {
            Operand::Hp(selector) => Value::Int(self.fighter(*selector).hp as i64),
            Operand::Archetype(selector) => {
                Value::Text(self.fighter(*selector).archetype.to_string())
            }
            Operand::Name(selector) => Value::Text(self.fighter(*selector).name.clone()),
            Operand::OutOfRing(selector) => Value::Bool(self.fighter(*selector).is_out_of_ring()),
            Operand::Int(v) => Value::Int(*v),
            Operand::Text(s) => Value::Text(s.clone()),
            Operand::Bool(b) => Value::Bool(*b),
        }
    }
}

/// Run a fired scheduled block against its bound pair.
///
/// The body sees round 0 and a throwaway scheduler, so anything it tries to
/// schedule in turn never fires.
pub fn run_scheduled(
    block: &ScheduledBlock,
    attacker: &mut Fighter,
    defender: &mut Fighter,
) -> Vec<String> {
    let mut scratch = Scheduler::new();
    let mut interpreter = Interpreter::new(
        (block.attacker, attacker),
        (block.defender, defender),
        0,
        &mut scratch,
    );
    interpreter.execute(&block.body);
    let output = interpreter.into_output();
    if !scratch.is_empty() {
        debug!(dropped = scratch.len(), "nested schedule inside a fired block dropped");
    }
    output
}
