//! Round-based duel state machine
//!
//! Each round runs in a fixed order:
//! 1. Grappler regeneration for both fighters
//! 2. Both schedulers advance, firing due effects
//! 3. Knockout check (Player1 first)
//! 4. Player1 acts, if in the ring
//! 5. Knockout check on Player2
//! 6. Player2 acts, if in the ring
//! 7. Knockout check on Player1
//! 8. Next round, or a draw once the round cap is passed

use thiserror::Error;
use tracing::{debug, info};

use super::report::{DuelEvent, Outcome, RoundReport, StatusSnapshot, TurnResolution};
use super::select::AbilitySelector;
use crate::combat::{passive_regen, Fighter, Player};
use crate::registry::{AbilityRegistry, FighterRegistry, NotFound};
use crate::script::{run_scheduled, Interpreter, ScheduledBlock, Scheduler};

/// Rounds played before a duel is called a draw
pub const MAX_ROUNDS: u32 = 100;

/// Errors that abort a duel before it starts
#[derive(Debug, Error)]
pub enum DuelError {
    #[error("invalid fighter selection: {0}")]
    FighterNotFound(#[from] NotFound),
}

/// Where the state machine currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Created, no round played yet
    Setup,
    RoundStart,
    Player1Turn,
    Player2Turn,
    RoundEnd,
    Finished(Outcome),
}

/// Collects events for a round report, echoing each to an observer
struct Recorder<'o> {
    events: Vec<DuelEvent>,
    observer: &'o mut dyn FnMut(&DuelEvent),
}

impl Recorder<'_> {
    fn push(&mut self, event: DuelEvent) {
        (self.observer)(&event);
        self.events.push(event);
    }
}

/// A single duel between two cloned fighters
#[derive(Debug)]
pub struct Duel<'r> {
    abilities: &'r AbilityRegistry,
    fighters: [Fighter; 2],
    schedulers: [Scheduler; 2],
    round: u32,
    max_rounds: u32,
    phase: Phase,
}

impl<'r> Duel<'r> {
    /// Set up a duel between two registered fighters.
    ///
    /// Combatants are copies of the registry templates. Fails if either name
    /// is unregistered; the registries are left untouched.
    pub fn new(
        fighters: &FighterRegistry,
        abilities: &'r AbilityRegistry,
        player_one: &str,
        player_two: &str,
    ) -> Result<Self, DuelError> {
        let one = fighters.lookup(player_one)?.clone();
        let two = fighters.lookup(player_two)?.clone();
        info!("Duel: {} vs {}", one.name, two.name);

        Ok(Self {
            abilities,
            fighters: [one, two],
            schedulers: [Scheduler::new(), Scheduler::new()],
            round: 1,
            max_rounds: MAX_ROUNDS,
            phase: Phase::Setup,
        })
    }

    /// Override the draw cutoff
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// The round about to be played
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn fighter(&self, player: Player) -> &Fighter {
        &self.fighters[player.index()]
    }

    pub fn scheduler(&self, player: Player) -> &Scheduler {
        &self.schedulers[player.index()]
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }

    /// Play one round
    pub fn play_round<S>(&mut self, selector: &mut S) -> RoundReport
    where
        S: AbilitySelector + ?Sized,
    {
        self.play_round_observed(selector, |_: &DuelEvent| {})
    }

    /// Play one round, passing each event to `observer` as it happens.
    ///
    /// Once the duel has finished this records nothing and mutates nothing.
    pub fn play_round_observed<S, F>(&mut self, selector: &mut S, mut observer: F) -> RoundReport
    where
        S: AbilitySelector + ?Sized,
        F: FnMut(&DuelEvent),
    {
        if let Phase::Finished(outcome) = &self.phase {
            return RoundReport {
                round: self.round,
                events: Vec::new(),
                outcome: Some(outcome.clone()),
            };
        }

        let round = self.round;
        let mut recorder = Recorder {
            events: Vec::new(),
            observer: &mut observer,
        };

        let outcome = self.resolve_round(selector, &mut recorder);
        match &outcome {
            Some(outcome) => {
                info!("Duel finished: {}", outcome);
                recorder.push(DuelEvent::Finished(outcome.clone()));
                self.phase = Phase::Finished(outcome.clone());
            }
            None => self.phase = Phase::RoundStart,
        }

        RoundReport {
            round,
            events: recorder.events,
            outcome,
        }
    }

    /// Play rounds until the duel ends
    pub fn run<S>(&mut self, selector: &mut S) -> Outcome
    where
        S: AbilitySelector + ?Sized,
    {
        self.run_observed(selector, |_: &DuelEvent| {})
    }

    /// Play rounds until the duel ends, passing each event to `observer`
    pub fn run_observed<S, F>(&mut self, selector: &mut S, mut observer: F) -> Outcome
    where
        S: AbilitySelector + ?Sized,
        F: FnMut(&DuelEvent),
    {
        loop {
            if let Some(outcome) = self.play_round_observed(selector, &mut observer).outcome {
                return outcome;
            }
        }
    }

    fn resolve_round<S>(&mut self, selector: &mut S, recorder: &mut Recorder<'_>) -> Option<Outcome>
    where
        S: AbilitySelector + ?Sized,
    {
        let round = self.round;
        self.phase = Phase::RoundStart;
        info!(round, "Round started");
        recorder.push(DuelEvent::RoundStarted(round));

        for player in [Player::One, Player::Two] {
            let fighter = &mut self.fighters[player.index()];
            let amount = passive_regen(fighter, round);
            if amount > 0 {
                recorder.push(DuelEvent::Regenerated {
                    fighter: fighter.name.clone(),
                    amount,
                });
            }
        }

        for player in [Player::One, Player::Two] {
            let due = self.schedulers[player.index()].advance(round);
            for block in &due {
                for line in fire(&mut self.fighters, block) {
                    recorder.push(DuelEvent::Shown(line));
                }
            }
        }

        if self.is_down(Player::One) {
            return Some(self.winner(Player::Two));
        }
        if self.is_down(Player::Two) {
            return Some(self.winner(Player::One));
        }

        self.phase = Phase::Player1Turn;
        self.take_turn(Player::One, selector, recorder);
        if self.is_down(Player::Two) {
            return Some(self.winner(Player::One));
        }

        self.phase = Phase::Player2Turn;
        self.take_turn(Player::Two, selector, recorder);
        if self.is_down(Player::One) {
            return Some(self.winner(Player::Two));
        }

        self.phase = Phase::RoundEnd;
        self.round += 1;
        (self.round > self.max_rounds).then_some(Outcome::Draw)
    }

    fn is_down(&self, player: Player) -> bool {
        self.fighters[player.index()].is_defeated()
    }

    fn winner(&self, player: Player) -> Outcome {
        Outcome::Winner(self.fighters[player.index()].name.clone())
    }

    fn take_turn<S>(&mut self, player: Player, selector: &mut S, recorder: &mut Recorder<'_>)
    where
        S: AbilitySelector + ?Sized,
    {
        let actor = &self.fighters[player.index()];
        if actor.is_out_of_ring() {
            debug!(fighter = %actor.name, "turn skipped, out of the ring");
            recorder.push(DuelEvent::TurnSkipped {
                player,
                fighter: actor.name.clone(),
            });
            return;
        }

        let choice = selector.select(player, actor);
        let abilities = self.abilities;
        let ability = abilities.get(&choice).filter(|_| actor.knows(&choice));
        let fighter = actor.name.clone();

        let (resolution, shown) = match ability {
            Some(ability) => {
                debug!(fighter = %fighter, ability = %ability.name, "ability used");
                let (attacker, defender) = pair_mut(&mut self.fighters, player);
                let mut interpreter = Interpreter::new(
                    (player, attacker),
                    (player.opponent(), defender),
                    self.round,
                    &mut self.schedulers[player.index()],
                );
                interpreter.execute(&ability.script);
                (TurnResolution::Executed, interpreter.into_output())
            }
            None => {
                debug!(fighter = %fighter, ability = %choice, "selection has no effect");
                (TurnResolution::NoEffect, Vec::new())
            }
        };

        recorder.push(DuelEvent::TurnTaken {
            player,
            fighter,
            ability: choice,
            resolution,
        });
        for line in shown {
            recorder.push(DuelEvent::Shown(line));
        }
        recorder.push(DuelEvent::Status(StatusSnapshot::of(
            &self.fighters[player.opponent().index()],
        )));
        recorder.push(DuelEvent::Status(StatusSnapshot::of(
            &self.fighters[player.index()],
        )));
    }
}

/// Borrow the acting fighter and its opponent out of the arena
fn pair_mut(fighters: &mut [Fighter; 2], attacker: Player) -> (&mut Fighter, &mut Fighter) {
    let [one, two] = fighters;
    match attacker {
        Player::One => (one, two),
        Player::Two => (two, one),
    }
}

/// Run a fired block against the pair it was bound to
fn fire(fighters: &mut [Fighter; 2], block: &ScheduledBlock) -> Vec<String> {
    let (attacker, defender) = pair_mut(fighters, block.attacker);
    run_scheduled(block, attacker, defender)
}
