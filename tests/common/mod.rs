//! Common test utilities - demo game loading and transcript capture

#![allow(dead_code)]

use std::path::PathBuf;

use ringside::duel::ScriptedSelector;
use ringside::{load_game, Duel, Outcome, Roster};

/// Path to a game file under demos/
pub fn demo_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(name)
}

/// Load and install a demo game file
pub fn load_demo(name: &str) -> Roster {
    load_game(&demo_path(name)).expect("Failed to load demo game")
}

/// Run a duel to completion, returning the outcome and the printed transcript
pub fn run_transcript(duel: &mut Duel<'_>, selector: &mut ScriptedSelector) -> (Outcome, String) {
    let mut transcript = String::new();
    let outcome = duel.run_observed(selector, |event: &ringside::DuelEvent| {
        transcript.push_str(&event.to_string());
        transcript.push('\n');
    });
    (outcome, transcript)
}
