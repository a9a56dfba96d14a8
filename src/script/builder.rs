//! Fluent construction of ability scripts in Rust code

use super::{BoolExpr, Instruction, Operand, Selector};

/// Builds a `Vec<Instruction>` one step at a time
#[derive(Debug, Clone, Default)]
pub struct ScriptBuilder {
    instructions: Vec<Instruction>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn damage(mut self, target: Selector, amount: i32) -> Self {
        self.instructions.push(Instruction::damage(target, amount));
        self
    }

    pub fn heal(mut self, target: Selector, amount: i32) -> Self {
        self.instructions.push(Instruction::heal(target, amount));
        self
    }

    pub fn tag_out(mut self, target: Selector) -> Self {
        self.instructions.push(Instruction::tag_out(target));
        self
    }

    pub fn tag_in(mut self, target: Selector) -> Self {
        self.instructions.push(Instruction::tag_in(target));
        self
    }

    pub fn show(mut self, parts: impl IntoIterator<Item = Operand>) -> Self {
        self.instructions
            .push(Instruction::show(parts.into_iter().collect()));
        self
    }

    /// `if condition { then } else { otherwise }`
    pub fn if_else(
        mut self,
        condition: BoolExpr,
        then: impl FnOnce(ScriptBuilder) -> ScriptBuilder,
        otherwise: impl FnOnce(ScriptBuilder) -> ScriptBuilder,
    ) -> Self {
        self.instructions.push(Instruction::conditional(
            condition,
            then(ScriptBuilder::new()).build(),
            otherwise(ScriptBuilder::new()).build(),
        ));
        self
    }

    /// `if condition { then }`
    pub fn when(
        self,
        condition: BoolExpr,
        then: impl FnOnce(ScriptBuilder) -> ScriptBuilder,
    ) -> Self {
        self.if_else(condition, then, |b| b)
    }

    /// `if a { .. } else if b { .. } ... else { fallback }`, nesting each
    /// later arm inside the previous arm's else block.
    pub fn if_else_chain(
        mut self,
        arms: Vec<(BoolExpr, ScriptBuilder)>,
        fallback: ScriptBuilder,
    ) -> Self {
        let mut tail = fallback.build();
        for (condition, body) in arms.into_iter().rev() {
            tail = vec![Instruction::conditional(condition, body.build(), tail)];
        }
        self.instructions.extend(tail);
        self
    }

    /// Run the body on each of the next `rounds` rounds
    pub fn for_rounds(
        mut self,
        rounds: i32,
        body: impl FnOnce(ScriptBuilder) -> ScriptBuilder,
    ) -> Self {
        self.instructions
            .push(Instruction::repeat(rounds, body(ScriptBuilder::new()).build()));
        self
    }

    /// Run the body once, `rounds` rounds from now
    pub fn after_rounds(
        mut self,
        rounds: i32,
        body: impl FnOnce(ScriptBuilder) -> ScriptBuilder,
    ) -> Self {
        self.instructions.push(Instruction::deferred_once(
            rounds,
            body(ScriptBuilder::new()).build(),
        ));
        self
    }

    pub fn build(self) -> Vec<Instruction> {
        self.instructions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::CompareOp;

    #[test]
    fn test_builder_matches_manual_script() {
        let built = ScriptBuilder::new()
            .tag_out(Selector::Defender)
            .after_rounds(2, |b| b.tag_in(Selector::Defender))
            .build();

        assert_eq!(
            built,
            vec![
                Instruction::tag_out(Selector::Defender),
                Instruction::deferred_once(2, vec![Instruction::tag_in(Selector::Defender)]),
            ]
        );
    }

    #[test]
    fn test_if_else_chain_nests_in_else() {
        let low = BoolExpr::compare(Operand::Hp(Selector::Defender), CompareOp::Lt, Operand::Int(20));
        let mid = BoolExpr::compare(Operand::Hp(Selector::Defender), CompareOp::Lt, Operand::Int(50));

        let built = ScriptBuilder::new()
            .if_else_chain(
                vec![
                    (low.clone(), ScriptBuilder::new().damage(Selector::Defender, 40)),
                    (mid.clone(), ScriptBuilder::new().damage(Selector::Defender, 25)),
                ],
                ScriptBuilder::new().damage(Selector::Defender, 10),
            )
            .build();

        assert_eq!(
            built,
            vec![Instruction::conditional(
                low,
                vec![Instruction::damage(Selector::Defender, 40)],
                vec![Instruction::conditional(
                    mid,
                    vec![Instruction::damage(Selector::Defender, 25)],
                    vec![Instruction::damage(Selector::Defender, 10)],
                )],
            )]
        );
    }

    #[test]
    fn test_when_has_empty_else() {
        let built = ScriptBuilder::new()
            .when(BoolExpr::Const(true), |b| b.heal(Selector::Attacker, 5))
            .build();

        assert_eq!(
            built,
            vec![Instruction::conditional(
                BoolExpr::Const(true),
                vec![Instruction::heal(Selector::Attacker, 5)],
                vec![],
            )]
        );
    }
}
