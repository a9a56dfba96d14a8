//! Duel events and status snapshots
//!
//! Everything a duel reports to its caller: round banners, turn results,
//! post-turn fighter status and the final outcome. `Display` renders the
//! transcript form printed by the CLI.

use crate::combat::{Archetype, Fighter, Player};

const BANNER_RULE: &str =
    "~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~";
const STATUS_RULE: &str = "##########################";

/// How a duel ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Winner(String),
    Draw,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(name) => write!(f, "{} WINS!", name),
            Outcome::Draw => write!(f, "Draw!"),
        }
    }
}

/// Post-turn view of one fighter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub name: String,
    pub hp: i32,
    pub archetype: Archetype,
    pub in_ring: bool,
}

impl StatusSnapshot {
    pub fn of(fighter: &Fighter) -> Self {
        Self {
            name: fighter.name.clone(),
            hp: fighter.hp,
            archetype: fighter.archetype,
            in_ring: fighter.in_ring,
        }
    }

    /// Depends only on the current ring state
    pub fn ring_message(&self) -> &'static str {
        if self.in_ring {
            "fighter enters the ring"
        } else {
            "fighter exits the ring"
        }
    }
}

impl std::fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", STATUS_RULE)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "HP: {}", self.hp)?;
        writeln!(f, "Type: {}", self.archetype)?;
        writeln!(f, "{}", self.ring_message())?;
        write!(f, "{}", STATUS_RULE)
    }
}

/// What happened to a selected ability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResolution {
    /// The script ran
    Executed,
    /// Not learned or not registered; nothing happened
    NoEffect,
}

/// A single thing that happened during a duel
#[derive(Debug, Clone, PartialEq)]
pub enum DuelEvent {
    RoundStarted(u32),
    Regenerated {
        fighter: String,
        amount: i32,
    },
    /// Output line from a `Show` instruction
    Shown(String),
    /// The acting fighter was out of the ring and could not act
    TurnSkipped {
        player: Player,
        fighter: String,
    },
    TurnTaken {
        player: Player,
        fighter: String,
        ability: String,
        resolution: TurnResolution,
    },
    Status(StatusSnapshot),
    Finished(Outcome),
}

impl std::fmt::Display for DuelEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuelEvent::RoundStarted(round) => {
                write!(f, "\n{}\nRound {}\n{}\n", BANNER_RULE, round, BANNER_RULE)
            }
            DuelEvent::Regenerated { fighter, amount } => {
                write!(f, "{} regenerates {} HP", fighter, amount)
            }
            DuelEvent::Shown(line) => write!(f, "{}", line),
            DuelEvent::TurnSkipped { player, fighter } => write!(
                f,
                "\n{}({}) has not a fighter that can enter the ring so he can't cast an ability.",
                fighter, player
            ),
            // A no-effect turn reads the same; only the snapshots tell them apart
            DuelEvent::TurnTaken {
                player,
                fighter,
                ability,
                ..
            } => write!(f, "{}({}) uses {}", fighter, player, ability),
            DuelEvent::Status(snapshot) => write!(f, "\n{}", snapshot),
            DuelEvent::Finished(outcome) => write!(f, "\n{}", outcome),
        }
    }
}

/// Everything that happened during one call to `Duel::play_round`
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    pub round: u32,
    pub events: Vec<DuelEvent>,
    pub outcome: Option<Outcome>,
}

impl RoundReport {
    /// Status snapshots recorded this round, in order
    pub fn snapshots(&self) -> impl Iterator<Item = &StatusSnapshot> {
        self.events.iter().filter_map(|e| match e {
            DuelEvent::Status(s) => Some(s),
            _ => None,
        })
    }

    /// Resolutions of every turn taken this round, in order
    pub fn resolutions(&self) -> impl Iterator<Item = TurnResolution> + '_ {
        self.events.iter().filter_map(|e| match e {
            DuelEvent::TurnTaken { resolution, .. } => Some(*resolution),
            _ => None,
        })
    }
}
