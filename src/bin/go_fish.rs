use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use go_fish::config::{GameConfig, PolicyKind};
use go_fish::engine::Engine;
use go_fish::game::{GameEngine, Stage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Any seeded game finishes long before this.
const STEP_LIMIT: usize = 1_000_000;

/// Announcements echoed above the final ranking.
const LAST_PLAYS: usize = 5;

#[derive(Parser)]
#[command(name = "go-fish", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, global = true, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Command {
    /// Play one game, logging every announcement
    Play {
        #[command(flatten)]
        table: TableArgs,

        /// Load the game configuration from a JSON file; flags override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the final snapshot as JSON instead of the ranking
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Play many games and report wins per seat
    Simulate {
        #[command(flatten)]
        table: TableArgs,

        /// How many games to play
        #[arg(short, long, default_value_t = 1000)]
        games: usize,
    },
}

#[derive(clap::Args)]
struct TableArgs {
    /// Number of players (2-6)
    #[arg(short, long)]
    players: Option<usize>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Policy per seat, in seat order; repeat once per player
    #[arg(long = "policy", value_enum)]
    policies: Vec<PolicyArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Random,
    Cycling,
    Recall,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Random => PolicyKind::Random,
            PolicyArg::Cycling => PolicyKind::Cycling,
            PolicyArg::Recall => PolicyKind::Recall,
        }
    }
}

impl TableArgs {
    /// Layer the flags over `file`, or over the defaults when no file was given.
    fn resolve(&self, file: Option<GameConfig>) -> anyhow::Result<GameConfig> {
        let from_file = file.is_some();
        let mut config = file.unwrap_or_default();
        if let Some(players) = self.players {
            config.player_count = players;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if !self.policies.is_empty() {
            let policies: Vec<PolicyKind> =
                self.policies.iter().copied().map(PolicyKind::from).collect();
            if self.players.is_none() {
                if from_file && policies.len() != config.player_count {
                    anyhow::bail!(
                        "{} --policy flags given but the config seats {} players; \
                         pass --players to change the table size",
                        policies.len(),
                        config.player_count
                    );
                }
                config.player_count = policies.len();
            }
            config.policies = policies;
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> anyhow::Result<GameConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn play(config: GameConfig, json: bool) -> anyhow::Result<()> {
    let mut game = GameEngine::new(config)?;
    info!(seed = game.seed(), players = game.player_count(), "dealing");
    let mut shown = 0;
    while !game.is_over() {
        game.step()?;
        for announcement in game.announcements().since(shown) {
            info!(player = announcement.actor(), pool = game.pool_count(), "{announcement}");
        }
        shown = game.announcements().len();
    }

    if json {
        println!("{}", game.snapshot_json()?);
        return Ok(());
    }
    let state = game.snapshot();
    println!("Last plays:");
    for announcement in game.announcements().recent(LAST_PLAYS) {
        println!("  {announcement}");
    }
    println!("Ranking after {} announcements (seed {}):", state.announcements.len(), game.seed());
    if let Stage::Done { ranking } = &state.stage {
        for (place, &seat) in ranking.iter().enumerate() {
            println!("{:>2}. P{} with {} books", place + 1, seat, state.players[seat].books.len());
        }
    }
    Ok(())
}

fn simulate(config: GameConfig, games: usize) -> anyhow::Result<()> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, games, "simulating");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut wins = vec![0usize; config.player_count];
    let mut steps = 0;
    let started = Instant::now();
    for game_idx in 0..games {
        let mut game = GameEngine::new(config.clone().with_seed(rng.random()))?;
        steps += game.run_to_end(STEP_LIMIT)?;
        if let Some(winner) = game.winner() {
            debug!(game_idx, winner);
            wins[winner] += 1;
        }
    }
    let elapsed = started.elapsed();

    println!("{games} games, {steps} steps");
    for (seat, &won) in wins.iter().enumerate() {
        let pct = won as f32 / games.max(1) as f32 * 100.0;
        let policy = format!("{:?}", config.policy_for(seat));
        println!(" P{seat} {policy:>8} {won:>6} wins {pct:5.1}%");
    }
    println!(
        "{:.1} µs per game",
        elapsed.as_secs_f64() * 1e6 / games.max(1) as f64
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    match args.command {
        Command::Play { table, config, json } => {
            let file = config.as_deref().map(load_config).transpose()?;
            play(table.resolve(file)?, json)
        }
        Command::Simulate { table, games } => simulate(table.resolve(None)?, games),
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
