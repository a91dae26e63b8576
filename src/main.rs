#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::io::{self, BufRead};
#[cfg(feature = "std")]
use std::path::PathBuf;

#[cfg(feature = "std")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use memory_match::{
    best_score_text, init_logging, parse_input, Difficulty, FileScoreStore, ScoreStore, Session,
    SessionHandle, Settings, TerminalSurface,
};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(name = "memory-match", author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum Level {
    Easy,
    Hard,
}

#[cfg(feature = "std")]
impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play a game in the terminal.
    Play {
        #[arg(long, value_enum, default_value_t = Level::Easy)]
        difficulty: Level,
        #[arg(long, help = "Fix RNG seed for reproducible decks (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Best-score file (defaults to $MEMORY_MATCH_SCORES)")]
        scores: Option<PathBuf>,
    },
    /// Show the stored best scores.
    Best {
        #[arg(long)]
        scores: Option<PathBuf>,
    },
    /// Forget all stored best scores.
    Reset {
        #[arg(long)]
        scores: Option<PathBuf>,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let mut settings = Settings::from_env();

    match cli.command {
        Commands::Play {
            difficulty,
            seed,
            scores,
        } => {
            if let Some(path) = scores {
                settings.scores_path = path;
            }
            settings.difficulty = difficulty.into();
            settings.seed = seed;
            play(settings).await?;
        }
        Commands::Best { scores } => {
            let store = FileScoreStore::open(scores.unwrap_or(settings.scores_path));
            for difficulty in Difficulty::ALL {
                println!(
                    "{:<5} {}",
                    difficulty,
                    best_score_text(store.get(difficulty.key()))
                );
            }
        }
        Commands::Reset { scores } => {
            let mut store = FileScoreStore::open(scores.unwrap_or(settings.scores_path));
            store.clear()?;
            println!("Best scores cleared ({}).", store.path().display());
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn play(settings: Settings) -> anyhow::Result<()> {
    if let Some(s) = settings.seed {
        println!("Using fixed seed: {} (deck will be reproducible)", s);
    }
    let rng = match settings.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    };
    let store = FileScoreStore::open(&settings.scores_path);
    let surface = TerminalSurface::new(io::stdout());

    let Some((session, handle)) = Session::mount(surface, store, rng, settings.difficulty) else {
        return Ok(());
    };
    std::thread::spawn(move || read_commands(handle));

    let last = session.run().await?;
    println!(
        "\nBye! Left a {} game at {} moves.",
        last.difficulty, last.moves
    );
    Ok(())
}

/// Forward stdin lines to the session until it ends or input closes.
#[cfg(feature = "std")]
fn read_commands(handle: SessionHandle) {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let sent = match parse_input(&line) {
            Ok(event) => handle.send(event),
            Err(msg) => {
                eprintln!("{}", msg);
                Ok(())
            }
        };
        if sent.is_err() {
            return;
        }
    }
    let _ = handle.quit();
}

