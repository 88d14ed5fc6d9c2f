//! Wrestle - terminal front end
//!
//! Plays one encounter at a time against the saved roster and exposes the
//! roster maintenance operations as subcommands.

use battle_core::prelude::*;
use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use roster_core::{FileStorage, RosterConfig, RosterError, RosterStore, StorageError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wrestler_core::WrestlerId;

/// Wrestling RPG battles and roster management
#[derive(Parser, Debug)]
#[command(name = "wrestle")]
#[command(about = "Fight opponents and manage your wrestling roster")]
struct Args {
    /// Directory holding the saved roster, player and defeated encounters
    #[arg(long, default_value = "save")]
    data_dir: PathBuf,

    /// Battle tuning TOML (defaults when omitted or missing)
    #[arg(long)]
    battle_config: Option<PathBuf>,

    /// Roster TOML (defaults when omitted or missing)
    #[arg(long)]
    roster_config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fight a freshly generated opponent
    Fight {
        /// Encounter id reported as defeated on victory
        #[arg(long)]
        npc: Option<String>,
    },
    /// List the roster and its summary
    Roster,
    /// Restore HP to a roster wrestler
    Heal { id: String, amount: u32 },
    /// Raise a roster wrestler one level
    LevelUp { id: String },
    /// Remove a wrestler from the roster
    Release { id: String },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Roster config: {0}")]
    RosterConfig(#[from] roster_core::ConfigError),
    #[error("Battle config: {0}")]
    BattleConfig(#[from] battle_core::config::ConfigError),
    #[error(transparent)]
    Battle(#[from] BattleError),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("wrestle=info,battle_core=info,roster_core=info")
            }),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let roster_config = match &args.roster_config {
        Some(path) => RosterConfig::load_from_path(path)?,
        None => RosterConfig::default(),
    };
    let constants = match &args.battle_config {
        Some(path) => BattleConstants::load_from_path(path)?,
        None => BattleConstants::default(),
    };

    let storage = FileStorage::open(&args.data_dir)?;
    let mut store = RosterStore::open(storage, roster_config);

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    info!(seed, data_dir = ?args.data_dir, "wrestle starting");

    match args.command {
        Command::Fight { npc } => fight(&mut store, constants, npc, &mut rng),
        Command::Roster => {
            print_roster(&store);
            Ok(())
        }
        Command::Heal { id, amount } => {
            let id = WrestlerId::from(id);
            let restored = store.heal(&id, amount)?;
            println!("Restored {} HP.", restored);
            Ok(())
        }
        Command::LevelUp { id } => {
            let id = WrestlerId::from(id);
            let level = store.level_up(&id)?;
            println!("Now level {}!", level);
            Ok(())
        }
        Command::Release { id } => {
            let released = store.remove(&WrestlerId::from(id))?;
            println!("{} has left your roster.", released.name);
            Ok(())
        }
    }
}

fn fight(
    store: &mut RosterStore<FileStorage>,
    constants: BattleConstants,
    npc: Option<String>,
    rng: &mut ChaCha8Rng,
) -> Result<(), CliError> {
    let npc_id = npc.unwrap_or_else(|| format!("npc-{}", rng.gen::<u32>()));
    if store.is_defeated(&npc_id) {
        println!("{} has already been defeated.", npc_id);
        return Ok(());
    }

    let opponent = store.generate_opponent(rng);
    let mut slot = HandoffSlot::new();
    slot.stage(BattleHandoff::new(
        store.active_wrestler().clone(),
        opponent,
        npc_id,
    ));

    let mut session = BattleSession::from_slot(&mut slot, constants)?;
    session.start();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut shown = 0;

    loop {
        shown = print_log(&session, shown);

        match session.state() {
            BattleState::PlayerTurn => {
                print_status(&session);
                let Some(input) = prompt(&mut lines, "move> ")? else {
                    session.abort();
                    println!("Battle abandoned.");
                    return Ok(());
                };
                if input.eq_ignore_ascii_case("quit") {
                    session.abort();
                    println!("Battle abandoned.");
                    return Ok(());
                }
                let Some(key) = MoveKey::parse(&input) else {
                    println!("Unknown move '{}'.", input);
                    continue;
                };

                match session.select_move(key, store, Instant::now(), rng) {
                    MoveResult::Scheduled { .. } => {
                        shown = print_log(&session, shown);
                        println!("{} is thinking...", session.opponent().name);
                        wait_for_opponent(&mut session, rng);
                    }
                    MoveResult::Victory { .. } => {}
                    MoveResult::Ignored(reason) => println!("{}", describe(reason)),
                }
            }
            BattleState::Defeat => {
                let answer = prompt(&mut lines, "Retry? [y/N] ")?;
                let retry = matches!(answer.as_deref(), Some("y") | Some("Y") | Some("yes"));
                match session.retry() {
                    Some(next) if retry => {
                        session = next;
                        shown = 0;
                    }
                    _ => return Ok(()),
                }
            }
            BattleState::NotStarted
            | BattleState::OpponentTurn
            | BattleState::Victory
            | BattleState::Aborted => return Ok(()),
        }
    }
}

/// Block until the scheduled opponent turn has run
fn wait_for_opponent(session: &mut BattleSession, rng: &mut ChaCha8Rng) {
    while let AdvanceResult::NotYetDue { remaining } = session.advance(Instant::now(), rng) {
        std::thread::sleep(remaining);
    }
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>, text: &str) -> io::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    lines
        .next()
        .transpose()
        .map(|line| line.map(|l| l.trim().to_string()))
}

fn print_log(session: &BattleSession, shown: usize) -> usize {
    let log = session.log();
    for line in log.iter().skip(shown) {
        println!("  {}", line);
    }
    log.len()
}

fn print_status(session: &BattleSession) {
    let player = session.player();
    let opponent = session.opponent();
    println!(
        "{} (Lv {}) {}/{} HP  vs  {} (Lv {}) {}/{} HP",
        player.name,
        player.level,
        player.hp,
        player.max_hp,
        opponent.name,
        opponent.level,
        opponent.hp,
        opponent.max_hp
    );
    for (key, mv) in &player.moves {
        println!("  {:<10} {} [{}] ({})", key, mv.name, mv.damage_range, mv.move_type);
    }
}

fn print_roster(store: &RosterStore<FileStorage>) {
    let player = store.active_wrestler();
    println!(
        "Player: {} (Lv {}) {}/{} HP, {} XP",
        player.name, player.level, player.hp, player.max_hp, player.experience
    );

    if store.is_empty() {
        println!("Your roster is empty.");
    }
    for wrestler in store.roster() {
        println!(
            "  {}  {} (Lv {}) {}/{} HP  PWR {} SPD {} CHA {}",
            wrestler.id,
            wrestler.name,
            wrestler.level,
            wrestler.hp,
            wrestler.max_hp,
            wrestler.power,
            wrestler.speed,
            wrestler.charisma
        );
    }

    let summary = store.summary();
    println!(
        "{}/{} wrestlers, average level {}, highest level {}",
        summary.count,
        store.capacity(),
        summary.average_level,
        summary.highest_level
    );
}

fn describe(reason: IgnoredReason) -> String {
    match reason {
        IgnoredReason::NotStarted => "The battle has not started.".to_string(),
        IgnoredReason::NotPlayerTurn => "Wait for your turn!".to_string(),
        IgnoredReason::Inactive => "The battle is over.".to_string(),
        IgnoredReason::UnknownMove(key) => format!("Your wrestler doesn't know {}.", key),
    }
}
