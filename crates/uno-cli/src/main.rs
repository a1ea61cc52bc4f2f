use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use uno_bot::ComputerAgent;
use uno_cli::config::GameConfig;
use uno_cli::console::{Console, ConsoleAgent, ConsoleSettings};
use uno_cli::logging::init_logging;
use uno_cli::session::{Ending, Session};
use uno_core::AppInfo;
use uno_core::game::agent::TurnAgent;
use uno_core::game::orchestrator::Orchestrator;
use uno_core::model::player::{Difficulty, Player};

const HUMAN_SEAT: usize = 0;

/// Four-seat UNO at the terminal: you against three computer players.
#[derive(Debug, Parser)]
#[command(name = "uno", author, version, about = "Play UNO against three computer opponents")]
struct Cli {
    /// Path to a YAML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the RNG seed (shuffles, starting seat, random difficulties, AI choices).
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Start with debug mode on (computer hands and deck are shown).
    #[arg(long)]
    debug: bool,

    /// Do not wait for Enter between turns.
    #[arg(long)]
    no_pause: bool,

    /// Do not clear the screen before drawing the board.
    #[arg(long)]
    no_clear: bool,

    /// Stop without a winner after this many turns.
    #[arg(long, value_name = "TURNS")]
    max_turns: Option<u64>,

    /// Let a computer play your seat. Implies --no-pause.
    #[arg(long)]
    autoplay: bool,

    /// Difficulty used for your seat under --autoplay.
    #[arg(long, value_name = "LEVEL", default_value = "hard")]
    autoplay_difficulty: Difficulty,

    /// Exit after validating the configuration (no game is played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(max_turns) = cli.max_turns {
        config.table.max_turns = Some(max_turns);
    }
    if cli.debug {
        config.table.debug = true;
    }
    if cli.no_pause || cli.autoplay {
        config.table.pause = false;
    }
    if cli.no_clear {
        config.table.clear_screen = false;
    }

    config.validate()?;

    if cli.validate_only {
        println!(
            "{} {} ({}): configuration valid for {} vs {}.",
            AppInfo::name(),
            AppInfo::version(),
            AppInfo::codename(),
            config.human.name,
            config
                .computers
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let players = config.lineup(&mut rng);
    let agent_kinds: Vec<Option<Difficulty>> = players.iter().map(Player::difficulty).collect();

    let console = Console::stdio(ConsoleSettings {
        debug: config.table.debug,
        pause: config.table.pause,
        clear_screen: config.table.clear_screen,
    })
    .into_shared();

    let agents: Vec<Box<dyn TurnAgent>> = agent_kinds
        .into_iter()
        .map(|difficulty| -> Box<dyn TurnAgent> {
            match difficulty {
                Some(difficulty) => Box::new(ComputerAgent::with_difficulty(difficulty)),
                None if cli.autoplay => {
                    Box::new(ComputerAgent::with_difficulty(cli.autoplay_difficulty))
                }
                None => Box::new(ConsoleAgent::new(console.clone())),
            }
        })
        .collect();

    let game = Orchestrator::new(players, rng).context("dealing a new game")?;
    let mut session = Session::new(game, agents, console)
        .with_max_turns(config.table.max_turns)
        .with_interactive_seat((!cli.autoplay).then_some(HUMAN_SEAT));

    let outcome = session.run()?;
    if let Ending::Won { seat, .. } = outcome.ending {
        tracing::info!(winner = seat, turns = outcome.turns, "session finished");
    }
    Ok(())
}
