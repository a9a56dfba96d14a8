//! ringside - play a duel from a game file

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ringside::duel::{read_choice, LineSelector, ScriptedSelector};
use ringside::{load_game, AbilitySelector, Config, Duel, DuelEvent, FighterRegistry, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const MENU_RULE: &str = "------------------------";

/// Turn-based scripted duel simulator
#[derive(Parser, Debug)]
#[command(name = "ringside", version, about = "Play a scripted duel")]
struct Args {
    /// JSON game file with abilities, fighters and learn bindings
    #[arg(short, long)]
    game: PathBuf,

    /// TOML config file (defaults to ./ringside.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Player1's fighter (prompted on stdin if omitted)
    #[arg(long)]
    p1: Option<String>,

    /// Player2's fighter (prompted on stdin if omitted)
    #[arg(long)]
    p2: Option<String>,

    /// File of ability choices, one per line, alternating Player1/Player2
    #[arg(short, long)]
    moves: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    // Initialize tracing; the transcript owns stdout
    let json = config.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(io::stderr)))
        .init();

    let roster = load_game(&args.game)
        .with_context(|| format!("Failed to load game file {}", args.game.display()))?;

    if roster.fighters.is_empty() {
        println!("No fighters available!");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("-----------------------------FIGHTER THE GAME-------------------------------\n");
    let p1 = match args.p1 {
        Some(name) => name,
        None => prompt_fighter(&mut input, "Player1", &roster.fighters)?,
    };
    let p2 = match args.p2 {
        Some(name) => name,
        None => prompt_fighter(&mut input, "\nPlayer2", &roster.fighters)?,
    };

    let mut duel = match Duel::new(&roster.fighters, &roster.abilities, &p1, &p2) {
        Ok(duel) => duel.with_max_rounds(config.max_rounds),
        Err(e) => {
            tracing::debug!("{}", e);
            println!("Invalid fighter selection!");
            return Ok(());
        }
    };

    let mut selector: Box<dyn AbilitySelector> = match &args.moves {
        Some(path) => {
            let moves = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read moves file {}", path.display()))?;
            Box::new(ScriptedSelector::alternating(
                moves.lines().map(str::trim_start).filter(|l| !l.is_empty()),
            ))
        }
        None => Box::new(LineSelector::new(input, io::stdout())),
    };

    let banner = config.banner;
    duel.run_observed(selector.as_mut(), |event: &DuelEvent| {
        let decoration = matches!(event, DuelEvent::RoundStarted(_) | DuelEvent::Status(_));
        if banner || !decoration {
            println!("{}", event);
        }
    });

    Ok(())
}

/// Print the fighter menu and read one non-blank name
fn prompt_fighter(
    input: &mut impl BufRead,
    label: &str,
    fighters: &FighterRegistry,
) -> Result<String> {
    println!("{} select fighter:", label);
    println!("{}", MENU_RULE);
    for name in fighters.names() {
        println!("{}", name);
    }
    println!("{}", MENU_RULE);
    io::stdout().flush()?;

    match read_choice(input)? {
        Some(name) => Ok(name),
        None => bail!("Input closed before a fighter was selected"),
    }
}
