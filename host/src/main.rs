use anyhow::{anyhow, Context, Result};
use arcade_core::{Session, SessionState};
use arcade_host::benchmark::{resolve_pilots, run_benchmark, write_report, BenchmarkConfig};
use arcade_host::config::HostConfig;
use arcade_host::pilots::{create_pilot, describe_pilots, pilot_ids};
use arcade_host::runner::{run_session, write_metrics};
use arcade_host::store::ScoreFile;
use arcade_host::util::{parse_seed, parse_seed_csv, seed_range, seed_to_hex};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "arcade-host")]
#[command(about = "Headless host for the arcade simulation core")]
struct Cli {
    /// Display refresh rate used to timestamp ticks (overrides ARCADE_FPS).
    #[arg(long, global = true)]
    fps: Option<u32>,

    /// JSON file whose fields override the default tuning.
    #[arg(long, global = true)]
    tuning: Option<PathBuf>,

    /// High-score file (overrides ARCADE_SCORES_PATH).
    #[arg(long, global = true)]
    scores: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available pilots.
    ListPilots,
    /// Fly one run with a pilot and optionally record the result.
    Play {
        #[arg(long, default_value = "hunter")]
        pilot: String,
        #[arg(long, default_value = "0x5eed0001")]
        seed: String,
        #[arg(long, default_value_t = 36_000)]
        max_frames: u32,
        /// Name to record if the run ends in game over.
        #[arg(long)]
        name: Option<String>,
        /// Write run metrics as JSON to this path.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run pilots across many seeds in parallel.
    Benchmark {
        /// Comma-separated pilot ids (default: all).
        #[arg(long)]
        pilots: Option<String>,
        /// Comma-separated seeds (decimal or 0x-hex).
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 8)]
        seed_count: u32,
        #[arg(long, default_value_t = 18_000)]
        max_frames: u32,
        #[arg(long)]
        jobs: Option<usize>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the stored high-score table.
    Scores,
    /// Record a name and score directly.
    Submit {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        score: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let Cli {
        fps,
        tuning,
        scores,
        command,
    } = Cli::parse();

    let mut host = HostConfig::from_env();
    if let Some(fps) = fps {
        host.fps = fps;
    }
    if let Some(path) = scores {
        host.scores_path = path;
    }
    let store = ScoreFile::new(host.scores_path.clone());

    match command {
        Commands::ListPilots => {
            for (id, description) in describe_pilots() {
                println!("{id:12} {description}");
            }
        }
        Commands::Play {
            pilot,
            seed,
            max_frames,
            name,
            output,
        } => {
            let Some(mut pilot_impl) = create_pilot(&pilot) else {
                let available = pilot_ids().join(", ");
                return Err(anyhow!("unknown pilot '{pilot}'. available: {available}"));
            };
            let seed = parse_seed(&seed)?;
            let tuning = host.tuning(tuning.as_deref())?;
            let mut session = Session::new(tuning, seed)
                .context("tuning rejected")?
                .with_high_scores(store.load());

            let metrics = run_session(&mut session, pilot_impl.as_mut(), seed, host.fps, max_frames)?;

            println!("pilot={}", metrics.pilot_id);
            println!("seed={}", seed_to_hex(seed));
            println!("fps={}", metrics.fps);
            println!("frames={}", metrics.frame_count);
            println!("clock_ms={:.0}", metrics.clock_ms);
            println!("score={}", metrics.final_score);
            println!("lives={}", metrics.final_lives);
            println!("game_over={}", metrics.game_over);
            println!("hostiles_unlocked={}", metrics.hostiles_unlocked);
            println!("shots={}", metrics.shots_fired);
            println!("asteroids_destroyed={}", metrics.asteroids_destroyed);
            println!("hostiles_destroyed={}", metrics.hostiles_destroyed);
            println!("power_ups={}", metrics.power_ups_collected);

            if let Some(name) = name {
                submit_from_session(&mut session, &store, &name)?;
            }
            if let Some(path) = output {
                write_metrics(&path, &metrics)?;
                println!("output={}", path.display());
            }
        }
        Commands::Benchmark {
            pilots,
            seeds,
            seed_start,
            seed_count,
            max_frames,
            jobs,
            output,
        } => {
            let pilots = resolve_pilots(pilots.as_deref())?;
            for pilot in &pilots {
                if create_pilot(pilot).is_none() {
                    let available = pilot_ids().join(", ");
                    return Err(anyhow!("unknown pilot '{pilot}'. available: {available}"));
                }
            }
            let seeds = resolve_seeds(seeds.as_deref(), seed_start.as_deref(), seed_count)?;
            let tuning = host.tuning(tuning.as_deref())?;

            let report = run_benchmark(BenchmarkConfig {
                pilots,
                seeds,
                max_frames,
                fps: host.fps,
                tuning,
                jobs,
            })?;

            println!("runs={}", report.run_count);
            println!(
                "jobs={}",
                report
                    .jobs
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "auto".to_string())
            );
            for (rank, entry) in report.rankings.iter().enumerate() {
                println!(
                    "rank={} pilot={} avg_score={:.1} max_score={} avg_frames={:.1} game_over_rate={:.2} unlock_rate={:.2}",
                    rank + 1,
                    entry.pilot_id,
                    entry.avg_score,
                    entry.max_score,
                    entry.avg_frames,
                    entry.game_over_rate,
                    entry.unlock_rate
                );
            }
            if let Some(path) = output {
                write_report(&path, &report)?;
                println!("output={}", path.display());
            }
        }
        Commands::Scores => {
            print_table(&store);
        }
        Commands::Submit { name, score } => {
            let rank = store.record(&name, score)?;
            print_rank(rank, store.path());
            print_table(&store);
        }
    }

    Ok(())
}

fn submit_from_session(session: &mut Session, store: &ScoreFile, name: &str) -> Result<()> {
    if !matches!(session.state(), SessionState::GameOver { .. }) {
        println!("submitted=false");
        return Ok(());
    }
    let rank = session.submit_name(name);
    if rank.is_some() {
        store.save(session.high_scores())?;
    }
    print_rank(rank, store.path());
    Ok(())
}

fn print_rank(rank: Option<usize>, path: &Path) {
    match rank {
        Some(rank) => {
            println!("rank={}", rank + 1);
            println!("scores={}", path.display());
        }
        None => println!("rank=none"),
    }
}

fn print_table(store: &ScoreFile) {
    let table = store.load();
    if table.is_empty() {
        println!("no high scores recorded in {}", store.path().display());
        return;
    }
    for (rank, entry) in table.entries().iter().enumerate() {
        println!("{}. {:16} {}", rank + 1, entry.name, entry.score);
    }
}

fn resolve_seeds(seeds: Option<&str>, seed_start: Option<&str>, seed_count: u32) -> Result<Vec<u32>> {
    if let Some(csv) = seeds {
        return parse_seed_csv(csv);
    }
    if seed_count == 0 {
        return Err(anyhow!("--seed-count must be >= 1"));
    }
    let start = match seed_start {
        Some(start) => parse_seed(start)?,
        None => 0x5EED_0001,
    };
    Ok(seed_range(start, seed_count))
}
