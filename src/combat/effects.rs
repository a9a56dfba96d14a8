//! Deferred effect scheduler
//!
//! Each combatant owns one scheduler holding:
//! - Repeating effects that fire once per round for a fixed number of rounds
//! - One-shot effects that fire on an exact future round
//!
//! The scheduler does not run anything itself. `advance` hands back the
//! actions that are due, in firing order, and the caller executes them.

use tracing::debug;

/// A scheduled effect instance
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduledEffect<A> {
    /// Fires on every advance until `remaining_rounds` runs out
    Repeating { remaining_rounds: u32, action: A },
    /// Fires once, on the advance whose round equals `trigger_round`
    Once { trigger_round: u32, action: A },
}

impl<A> ScheduledEffect<A> {
    /// The bound action
    pub fn action(&self) -> &A {
        match self {
            ScheduledEffect::Repeating { action, .. } => action,
            ScheduledEffect::Once { action, .. } => action,
        }
    }
}

/// Per-combatant queue of repeating and deferred effects
#[derive(Debug, Clone)]
pub struct EffectScheduler<A> {
    repeating: Vec<(u32, A)>,
    once: Vec<(u32, A)>,
    round: u32,
}

impl<A> Default for EffectScheduler<A> {
    fn default() -> Self {
        Self {
            repeating: Vec::new(),
            once: Vec::new(),
            round: 0,
        }
    }
}

impl<A: Clone> EffectScheduler<A> {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Round of the most recent `advance` (0 before the first one)
    pub fn current_round(&self) -> u32 {
        self.round
    }

    /// Queue `action` to fire on each of the next `rounds` advances.
    /// Non-positive counts are ignored.
    pub fn schedule_repeat(&mut self, rounds: i32, action: A) {
        if rounds <= 0 {
            return;
        }
        debug!(rounds, "scheduled repeating effect");
        self.repeating.push((rounds as u32, action));
    }

    /// Queue `action` to fire once, `rounds` rounds after the current one.
    /// Non-positive delays are ignored.
    pub fn schedule_once(&mut self, rounds: i32, action: A) {
        if rounds <= 0 {
            return;
        }
        let trigger_round = self.round.saturating_add(rounds as u32);
        debug!(rounds, trigger_round, "scheduled one-shot effect");
        self.once.push((trigger_round, action));
    }

    /// Advance to `round`, returning every action due this round.
    ///
    /// Repeating actions come first (in scheduling order), then one-shot
    /// actions whose trigger round equals `round` exactly. One-shot actions
    /// for a round that is never advanced to are not caught up later.
    pub fn advance(&mut self, round: u32) -> Vec<A> {
        self.round = round;
        let mut due = Vec::new();

        for (remaining, action) in &mut self.repeating {
            due.push(action.clone());
            *remaining -= 1;
        }
        self.repeating.retain(|(remaining, _)| *remaining > 0);

        let mut i = 0;
        while i < self.once.len() {
            if self.once[i].0 == round {
                let (_, action) = self.once.remove(i);
                due.push(action);
            } else {
                i += 1;
            }
        }

        if !due.is_empty() {
            debug!(round, fired = due.len(), "scheduled effects fired");
        }
        due
    }

    /// Snapshot of every pending entry
    pub fn pending(&self) -> Vec<ScheduledEffect<A>> {
        let repeating = self
            .repeating
            .iter()
            .map(|(remaining_rounds, action)| ScheduledEffect::Repeating {
                remaining_rounds: *remaining_rounds,
                action: action.clone(),
            });
        let once = self
            .once
            .iter()
            .map(|(trigger_round, action)| ScheduledEffect::Once {
                trigger_round: *trigger_round,
                action: action.clone(),
            });
        repeating.chain(once).collect()
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.repeating.len() + self.once.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and forget the current round
    pub fn clear(&mut self) {
        self.repeating.clear();
        self.once.clear();
        self.round = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_fires_exact_count() {
        let mut scheduler = EffectScheduler::new();
        scheduler.advance(1);
        scheduler.schedule_repeat(3, "bleed");

        assert_eq!(scheduler.advance(2), vec!["bleed"]);
        assert_eq!(scheduler.advance(3), vec!["bleed"]);
        assert_eq!(scheduler.advance(4), vec!["bleed"]);
        assert!(scheduler.advance(5).is_empty());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_repeat_ignores_round_gaps() {
        let mut scheduler = EffectScheduler::new();
        scheduler.schedule_repeat(2, "bleed");

        // Repeating entries count advances, not round numbers
        assert_eq!(scheduler.advance(10), vec!["bleed"]);
        assert_eq!(scheduler.advance(40), vec!["bleed"]);
        assert!(scheduler.advance(41).is_empty());
    }

    #[test]
    fn test_once_fires_on_exact_round() {
        let mut scheduler = EffectScheduler::new();
        scheduler.advance(3);
        scheduler.schedule_once(2, "tag_in");

        assert_eq!(
            scheduler.pending(),
            vec![ScheduledEffect::Once {
                trigger_round: 5,
                action: "tag_in"
            }]
        );

        assert!(scheduler.advance(4).is_empty());
        assert_eq!(scheduler.advance(5), vec!["tag_in"]);
        assert!(scheduler.advance(6).is_empty());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_once_is_not_caught_up() {
        let mut scheduler = EffectScheduler::new();
        scheduler.advance(1);
        scheduler.schedule_once(1, "tag_in");

        // Round 2 is skipped entirely
        assert!(scheduler.advance(3).is_empty());
        assert!(scheduler.advance(4).is_empty());
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_non_positive_rounds_are_ignored() {
        let mut scheduler = EffectScheduler::new();
        scheduler.schedule_repeat(0, "a");
        scheduler.schedule_repeat(-2, "b");
        scheduler.schedule_once(0, "c");
        scheduler.schedule_once(-1, "d");

        assert!(scheduler.is_empty());
        assert!(scheduler.advance(1).is_empty());
    }

    #[test]
    fn test_repeating_fire_before_once() {
        let mut scheduler = EffectScheduler::new();
        scheduler.advance(1);
        scheduler.schedule_once(1, "once");
        scheduler.schedule_repeat(2, "first");
        scheduler.schedule_repeat(1, "second");

        assert_eq!(scheduler.advance(2), vec!["first", "second", "once"]);
        assert_eq!(scheduler.advance(3), vec!["first"]);
    }

    #[test]
    fn test_clear() {
        let mut scheduler = EffectScheduler::new();
        scheduler.advance(7);
        scheduler.schedule_repeat(2, "a");
        scheduler.schedule_once(2, "b");
        assert_eq!(scheduler.len(), 2);

        scheduler.clear();
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.current_round(), 0);
    }
}
