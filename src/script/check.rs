//! Registration-time script checks
//!
//! Scripts cannot fail while a duel runs, so anything that would make a
//! condition meaningless is rejected up front instead.

use thiserror::Error;

use super::{BoolExpr, Instruction, Operand, ValueKind};
use crate::combat::Archetype;

/// Problems found in a script before it is registered
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("cannot compare {lhs} with {rhs}")]
    KindMismatch { lhs: ValueKind, rhs: ValueKind },

    #[error("unknown archetype in comparison: {0}")]
    UnknownArchetype(String),
}

/// Check every condition in a script, including nested and scheduled blocks
pub fn check_script(script: &[Instruction]) -> Result<(), ScriptError> {
    for instruction in script {
        match instruction {
            Instruction::Conditional {
                condition,
                then_block,
                else_block,
            } => {
                check_condition(condition)?;
                check_script(then_block)?;
                check_script(else_block)?;
            }
            Instruction::Repeat { body, .. } | Instruction::DeferredOnce { body, .. } => {
                check_script(body)?;
            }
            Instruction::Damage { .. }
            | Instruction::Heal { .. }
            | Instruction::SetRingStatus { .. }
            | Instruction::Show { .. } => {}
        }
    }
    Ok(())
}

fn check_condition(expr: &BoolExpr) -> Result<(), ScriptError> {
    match expr {
        BoolExpr::Const(_) | BoolExpr::OutOfRing(_) => Ok(()),
        BoolExpr::Compare { lhs, rhs, .. } => check_comparison(lhs, rhs),
        BoolExpr::And(args) | BoolExpr::Or(args) => args.iter().try_for_each(check_condition),
        BoolExpr::Not(arg) => check_condition(arg),
    }
}

fn check_comparison(lhs: &Operand, rhs: &Operand) -> Result<(), ScriptError> {
    if lhs.kind() != rhs.kind() {
        return Err(ScriptError::KindMismatch {
            lhs: lhs.kind(),
            rhs: rhs.kind(),
        });
    }

    // An archetype compared against a literal that names no archetype is a typo
    match (lhs, rhs) {
        (Operand::Archetype(_), Operand::Text(name)) | (Operand::Text(name), Operand::Archetype(_))
            if name.parse::<Archetype>().is_err() =>
        {
            Err(ScriptError::UnknownArchetype(name.clone()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{CompareOp, ScriptBuilder, Selector};

    #[test]
    fn test_valid_script_passes() {
        let script = ScriptBuilder::new()
            .if_else(
                BoolExpr::and([
                    BoolExpr::compare(Operand::Hp(Selector::Defender), CompareOp::Gt, Operand::Int(50)),
                    BoolExpr::compare(
                        Operand::Archetype(Selector::Defender),
                        CompareOp::Eq,
                        Operand::from("Heavy"),
                    ),
                ]),
                |b| b.damage(Selector::Defender, 20),
                |b| b.damage(Selector::Defender, 35),
            )
            .build();

        assert_eq!(check_script(&script), Ok(()));
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let script = ScriptBuilder::new()
            .when(
                BoolExpr::compare(Operand::Hp(Selector::Defender), CompareOp::Eq, Operand::from("high")),
                |b| b.damage(Selector::Defender, 1),
            )
            .build();

        assert_eq!(
            check_script(&script),
            Err(ScriptError::KindMismatch {
                lhs: ValueKind::Int,
                rhs: ValueKind::Text
            })
        );
    }

    #[test]
    fn test_unknown_archetype_rejected_inside_scheduled_block() {
        let script = ScriptBuilder::new()
            .for_rounds(3, |b| {
                b.when(
                    BoolExpr::not(BoolExpr::compare(
                        Operand::from("Zoner"),
                        CompareOp::Eq,
                        Operand::Archetype(Selector::Attacker),
                    )),
                    |b| b.heal(Selector::Attacker, 5),
                )
            })
            .build();

        assert_eq!(
            check_script(&script),
            Err(ScriptError::UnknownArchetype("Zoner".to_string()))
        );
    }
}
