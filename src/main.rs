use anyhow::Result;
use clap::{Parser, ValueEnum};
use snake_arena::feed::{DemoFeed, JsonFileFeed};
use snake_arena::game::BoundaryPolicy;
use snake_arena::leaderboard::{
    DEFAULT_LIMIT, InMemoryLeaderboard, JsonFileLeaderboard, Leaderboard, PlayerIdentity,
    ScoreSubmitter,
};
use snake_arena::logging::init_logging;
use snake_arena::modes::{PlayMode, SpectateMode, print_leaderboard};
use snake_arena::settings::Settings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_arena")]
#[command(version, about = "Snake with leaderboards and spectating")]
struct Cli {
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// Boundary policy; also filters the leaderboard listing
    #[arg(long)]
    policy: Option<Policy>,

    /// Grid side length
    #[arg(long)]
    grid_size: Option<usize>,

    /// Username to submit scores under; anonymous games are not saved
    #[arg(long)]
    user: Option<String>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement and spectator turns
    #[arg(long)]
    seed: Option<u64>,

    /// JSON leaderboard file (default: in-memory demo board)
    #[arg(long)]
    leaderboard: Option<PathBuf>,

    /// JSON file of active player snapshots (default: demo players)
    #[arg(long)]
    feed: Option<PathBuf>,

    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Rows shown in leaderboard mode
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Play,
    /// Watch other players' games
    Spectate,
    /// Print the top scores
    Leaderboard,
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    /// Leaving the grid re-enters on the opposite edge
    Wrap,
    /// Leaving the grid ends the game
    Wall,
}

impl From<Policy> for BoundaryPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Wrap => BoundaryPolicy::Wrap,
            Policy::Wall => BoundaryPolicy::Wall,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_or_default(cli.config.as_deref())?;
    if let Some(policy) = cli.policy {
        settings.game.policy = policy.into();
    }
    if let Some(grid_size) = cli.grid_size {
        settings.game.grid_size = grid_size;
    }
    if let Some(path) = &cli.leaderboard {
        settings.leaderboard_path = Some(path.clone());
    }
    if let Some(path) = &cli.log_file {
        settings.log_file = path.clone();
    }
    settings.validate()?;

    // The TUI owns the terminal, so only the listing logs to stderr
    match cli.mode {
        Mode::Leaderboard => init_logging(None)?,
        Mode::Play | Mode::Spectate => init_logging(Some(&settings.log_file))?,
    }

    match settings.leaderboard_path.clone() {
        Some(path) => run(&cli, settings, JsonFileLeaderboard::new(path)).await,
        None => run(&cli, settings, InMemoryLeaderboard::with_demo_entries()).await,
    }
}

async fn run<L: Leaderboard>(cli: &Cli, settings: Settings, store: L) -> Result<()> {
    match cli.mode {
        Mode::Play => {
            let identity = cli
                .user
                .as_ref()
                .map(|name| PlayerIdentity::new(format!("local-{}", name), name.clone()));
            let submitter = ScoreSubmitter::new(store, identity);
            let mut play_mode = PlayMode::new(settings.game, settings.pacing, submitter, cli.seed);
            play_mode.run().await?;
        }
        Mode::Spectate => match &cli.feed {
            Some(path) => {
                let mut spectate_mode =
                    SpectateMode::new(JsonFileFeed::new(path), &settings, cli.seed);
                spectate_mode.run().await?;
            }
            None => {
                let mut spectate_mode = SpectateMode::new(DemoFeed::demo(), &settings, cli.seed);
                spectate_mode.run().await?;
            }
        },
        Mode::Leaderboard => {
            let policy = cli.policy.map(BoundaryPolicy::from);
            print_leaderboard(&store, policy, cli.limit, &mut std::io::stdout()).await?;
        }
    }

    Ok(())
}
