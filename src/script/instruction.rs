//! Ability script instructions
//!
//! Scripts are plain data: a sequence of [`Instruction`]s, with
//! [`BoolExpr`] conditions built from [`Operand`] comparisons. Everything
//! here round-trips through serde so game files can declare scripts.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which side of the current turn an instruction targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    Attacker,
    Defender,
}

/// A single script step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instruction {
    /// Deal modified damage to the target, unless it is out of the ring
    Damage { target: Selector, amount: i32 },
    /// Restore hp to the target, in or out of the ring
    Heal { target: Selector, amount: i32 },
    /// Tag the target in (`true`) or out (`false`)
    SetRingStatus { target: Selector, in_ring: bool },
    /// Run exactly one of two blocks
    Conditional {
        condition: BoolExpr,
        #[serde(rename = "then", default)]
        then_block: Vec<Instruction>,
        #[serde(rename = "else", default)]
        else_block: Vec<Instruction>,
    },
    /// Run `body` on each of the next `rounds` rounds
    Repeat { rounds: i32, body: Vec<Instruction> },
    /// Run `body` once, `rounds` rounds from now
    DeferredOnce { rounds: i32, body: Vec<Instruction> },
    /// Emit a line of duel output
    Show { parts: Vec<Operand> },
}

impl Instruction {
    pub fn damage(target: Selector, amount: i32) -> Self {
        Instruction::Damage { target, amount }
    }

    pub fn heal(target: Selector, amount: i32) -> Self {
        Instruction::Heal { target, amount }
    }

    pub fn tag_out(target: Selector) -> Self {
        Instruction::SetRingStatus {
            target,
            in_ring: false,
        }
    }

    pub fn tag_in(target: Selector) -> Self {
        Instruction::SetRingStatus {
            target,
            in_ring: true,
        }
    }

    pub fn conditional(
        condition: BoolExpr,
        then_block: Vec<Instruction>,
        else_block: Vec<Instruction>,
    ) -> Self {
        Instruction::Conditional {
            condition,
            then_block,
            else_block,
        }
    }

    pub fn repeat(rounds: i32, body: Vec<Instruction>) -> Self {
        Instruction::Repeat { rounds, body }
    }

    pub fn deferred_once(rounds: i32, body: Vec<Instruction>) -> Self {
        Instruction::DeferredOnce { rounds, body }
    }

    pub fn show(parts: Vec<Operand>) -> Self {
        Instruction::Show { parts }
    }
}

/// A value source inside a condition or a `Show` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    /// Current hp of a combatant
    Hp(Selector),
    /// Archetype name of a combatant, e.g. `"Heavy"`
    Archetype(Selector),
    /// Name of a combatant
    Name(Selector),
    /// Whether a combatant is tagged out
    OutOfRing(Selector),
    Int(i64),
    Text(String),
    Bool(bool),
}

impl Operand {
    /// Kind of value this operand evaluates to
    pub fn kind(&self) -> ValueKind {
        match self {
            Operand::Hp(_) | Operand::Int(_) => ValueKind::Int,
            Operand::Archetype(_) | Operand::Name(_) | Operand::Text(_) => ValueKind::Text,
            Operand::OutOfRing(_) | Operand::Bool(_) => ValueKind::Bool,
        }
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Operand::Int(v)
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_string())
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl CompareOp {
    /// Whether an ordering satisfies this operator
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }
}

/// Boolean conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoolExpr {
    Const(bool),
    /// Whether a combatant is tagged out
    OutOfRing(Selector),
    Compare {
        lhs: Operand,
        op: CompareOp,
        rhs: Operand,
    },
    /// True when every argument is true; stops at the first false one
    And(Vec<BoolExpr>),
    /// True when any argument is true; stops at the first true one
    Or(Vec<BoolExpr>),
    Not(Box<BoolExpr>),
}

impl BoolExpr {
    pub fn compare(lhs: impl Into<Operand>, op: CompareOp, rhs: impl Into<Operand>) -> Self {
        BoolExpr::Compare {
            lhs: lhs.into(),
            op,
            rhs: rhs.into(),
        }
    }

    pub fn and(args: impl IntoIterator<Item = BoolExpr>) -> Self {
        BoolExpr::And(args.into_iter().collect())
    }

    pub fn or(args: impl IntoIterator<Item = BoolExpr>) -> Self {
        BoolExpr::Or(args.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(arg: BoolExpr) -> Self {
        BoolExpr::Not(Box::new(arg))
    }
}

/// The kinds of value an operand can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Text,
    Bool,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValueKind::Int => "int",
            ValueKind::Text => "text",
            ValueKind::Bool => "bool",
        };
        write!(f, "{}", s)
    }
}

/// An evaluated operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Text(String),
    Bool(bool),
}

impl Value {
    /// Order two values of the same kind; mixed kinds do not compare
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            // Printed as 1/0 in duel output
            Value::Bool(b) => write!(f, "{}", u8::from(*b)),
        }
    }
}
