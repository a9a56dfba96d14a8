//! Ability selection
//!
//! The duel asks an [`AbilitySelector`] for a free-text ability name each
//! time a fighter in the ring acts. The answer is not validated here; names
//! the fighter never learned simply resolve to no effect.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use tracing::warn;

use crate::combat::{Fighter, Player};

/// Synchronous source of per-turn ability choices
pub trait AbilitySelector {
    fn select(&mut self, player: Player, fighter: &Fighter) -> String;
}

impl<F> AbilitySelector for F
where
    F: FnMut(Player, &Fighter) -> String,
{
    fn select(&mut self, player: Player, fighter: &Fighter) -> String {
        self(player, fighter)
    }
}

/// Pre-recorded choices, one queue per player.
///
/// A queue is only consumed when its player actually acts. An exhausted
/// queue answers with an empty name.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSelector {
    queues: [VecDeque<String>; 2],
}

impl ScriptedSelector {
    pub fn new<I, J, S, T>(player_one: I, player_two: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            queues: [
                player_one.into_iter().map(Into::into).collect(),
                player_two.into_iter().map(Into::into).collect(),
            ],
        }
    }

    /// Split alternating lines (Player1, Player2, Player1, ...) into queues
    pub fn alternating<I, S>(moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selector = Self::default();
        for (i, name) in moves.into_iter().enumerate() {
            selector.queues[i % 2].push_back(name.into());
        }
        selector
    }

    /// Choices not yet consumed by a player
    pub fn remaining(&self, player: Player) -> usize {
        self.queues[player.index()].len()
    }
}

impl AbilitySelector for ScriptedSelector {
    fn select(&mut self, player: Player, _fighter: &Fighter) -> String {
        self.queues[player.index()].pop_front().unwrap_or_default()
    }
}

/// Prints the learned-ability menu and reads one line per choice
pub struct LineSelector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, player: Player, fighter: &Fighter) -> std::io::Result<String> {
        writeln!(self.output, "\n{}({}) select ability:", fighter.name, player)?;
        writeln!(self.output, "------------------------")?;
        for ability in &fighter.abilities {
            writeln!(self.output, "{}", ability)?;
        }
        writeln!(self.output, "------------------------")?;
        self.output.flush()?;

        Ok(read_choice(&mut self.input)?.unwrap_or_default())
    }
}

/// Read the next answer from `input`, or `None` at end of input.
///
/// Leading whitespace (blank lines included) is skipped; the rest of the line
/// is kept as typed, minus its line ending.
pub fn read_choice<R: BufRead + ?Sized>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let choice = line.trim_start().trim_end_matches(['\n', '\r']);
        if !choice.is_empty() {
            return Ok(Some(choice.to_string()));
        }
    }
}

impl<R: BufRead, W: Write> AbilitySelector for LineSelector<R, W> {
    fn select(&mut self, player: Player, fighter: &Fighter) -> String {
        match self.prompt(player, fighter) {
            Ok(choice) => choice,
            Err(e) => {
                warn!("Failed to read ability selection for {}: {}", fighter.name, e);
                String::new()
            }
        }
    }
}
