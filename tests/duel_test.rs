//! End-to-end duels over the demo game files

mod common;

use std::io::Write;
use std::process::{Command, Stdio};

use common::{demo_path, load_demo, run_transcript};
use ringside::duel::{Phase, ScriptedSelector, TurnResolution};
use ringside::{Duel, DuelEvent, Outcome, Player};

#[test]
fn test_demo_rosters_install() {
    let main = load_demo("main.json");
    assert_eq!(main.fighters.names().collect::<Vec<_>>(), vec!["Jack-6", "Lee"]);
    assert_eq!(main.abilities.len(), 4);

    let example2 = load_demo("example2.json");
    assert_eq!(
        example2.fighters.lookup("Zangief").expect("Zangief registered").abilities,
        vec!["Power_Slam", "Meditate"]
    );
}

#[test]
fn test_combo_strike_against_regenerating_grappler() {
    let roster = load_demo("example2.json");
    let mut duel = Duel::new(&roster.fighters, &roster.abilities, "Ryu", "Zangief")
        .expect("Failed to start duel");
    let mut selector = ScriptedSelector::new(
        ["Combo_Strike", "Combo_Strike"],
        ["Power_Slam", "Power_Slam"],
    );

    // Round 1: 20 * 1.20 = 24 to Zangief, 25 * 1.07 = 26 to Ryu
    let report = duel.play_round(&mut selector);
    assert!(report
        .events
        .contains(&DuelEvent::Shown("Zangief has 96 hp".to_string())));
    assert_eq!(duel.fighter(Player::One).hp, 74);

    // Round 2: Zangief regenerates 6 first, the grappler bonus is gone
    let report = duel.play_round(&mut selector);
    assert!(report.events.contains(&DuelEvent::Regenerated {
        fighter: "Zangief".to_string(),
        amount: 6,
    }));
    assert_eq!(duel.fighter(Player::Two).hp, 78);
    assert_eq!(duel.fighter(Player::One).hp, 49);
}

#[test]
fn test_bleeding_bite_ticks_five_times() {
    let roster = load_demo("main.json");
    let mut duel = Duel::new(&roster.fighters, &roster.abilities, "Lee", "Jack-6")
        .expect("Failed to start duel");
    let mut selector = ScriptedSelector::new(["Bleeding_Bite"], Vec::<String>::new());

    duel.play_round(&mut selector);
    assert_eq!(duel.fighter(Player::Two).hp, 90);
    assert_eq!(duel.scheduler(Player::One).len(), 1);

    // Fires at the start of rounds 2 through 6, 8 * 1.15 * 0.8 = 7 each
    for _ in 2..=7 {
        duel.play_round(&mut selector);
    }
    assert_eq!(duel.fighter(Player::Two).hp, 55);
    assert!(duel.scheduler(Player::One).is_empty());
}

#[test]
fn test_head_smash_knockout() {
    let roster = load_demo("main.json");
    let mut duel = Duel::new(&roster.fighters, &roster.abilities, "Lee", "Jack-6")
        .expect("Failed to start duel");
    let mut selector = ScriptedSelector::new(["Head_Smash"; 5], ["Taunt"; 5]);

    let (outcome, transcript) = run_transcript(&mut duel, &mut selector);

    assert_eq!(outcome, Outcome::Winner("Lee".to_string()));
    assert_eq!(duel.round(), 5);
    assert_eq!(duel.phase(), &Phase::Finished(outcome));
    assert!(transcript.ends_with("\nLee WINS!\n"));
    // Jack-6 never gets a fifth turn
    assert_eq!(selector.remaining(Player::Two), 1);
}

#[test]
fn test_autographs_keep_defender_out_for_two_rounds() {
    let roster = load_demo("main.json");
    let mut duel = Duel::new(&roster.fighters, &roster.abilities, "Lee", "Jack-6")
        .expect("Failed to start duel");
    let mut selector = ScriptedSelector::new(
        ["Give_Autographs", "Catch_A_Break", "Catch_A_Break"],
        ["Head_Smash"],
    );

    let round1 = duel.play_round(&mut selector);
    let round2 = duel.play_round(&mut selector);
    let round3 = duel.play_round(&mut selector);

    for report in [&round1, &round2] {
        assert!(report.events.iter().any(|e| matches!(
            e,
            DuelEvent::TurnSkipped { player: Player::Two, .. }
        )));
    }
    assert_eq!(
        round3.resolutions().collect::<Vec<_>>(),
        vec![TurnResolution::Executed, TurnResolution::Executed]
    );

    // Status after Lee's first turn shows Jack-6 out of the ring
    let first = round1.snapshots().next().expect("status recorded");
    assert_eq!(first.name, "Jack-6");
    assert_eq!(first.ring_message(), "fighter exits the ring");
}

#[test]
fn test_cli_plays_scripted_duel() {
    let mut moves = tempfile::NamedTempFile::new().expect("Failed to create moves file");
    for _ in 0..5 {
        writeln!(moves, "Head_Smash\nTaunt").expect("Failed to write moves");
    }

    let output = Command::new(env!("CARGO_BIN_EXE_ringside"))
        .arg("--game")
        .arg(demo_path("main.json"))
        .args(["--p1", "Lee", "--p2", "Jack-6", "--moves"])
        .arg(moves.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to run ringside");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Round 5"));
    assert!(stdout.contains("Name: Jack-6"));
    // Unlearned selections look like any other turn
    assert!(stdout.contains("Jack-6(Player2) uses Taunt"));
    assert!(stdout.trim_end().ends_with("Lee WINS!"));
}

#[test]
fn test_cli_rejects_unknown_fighter() {
    let output = Command::new(env!("CARGO_BIN_EXE_ringside"))
        .arg("--game")
        .arg(demo_path("example2.json"))
        .args(["--p1", "Ryu", "--p2", "Ken"])
        .stdin(Stdio::null())
        .output()
        .expect("Failed to run ringside");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Invalid fighter selection!"));
}
