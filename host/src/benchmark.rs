use crate::pilots::pilot_ids;
use crate::runner::{run_pilot, RunMetrics};
use anyhow::{anyhow, Context, Result};
use arcade_core::Tuning;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub max_frames: u32,
    pub fps: u32,
    pub tuning: Tuning,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PilotAggregate {
    pub pilot_id: String,
    pub runs: usize,
    pub avg_score: f64,
    pub max_score: u32,
    pub avg_frames: f64,
    pub game_over_rate: f64,
    pub unlock_rate: f64,
    pub avg_asteroids_destroyed: f64,
    pub avg_hostiles_destroyed: f64,
    pub avg_power_ups_collected: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub fps: u32,
    pub max_frames: u32,
    pub jobs: Option<usize>,
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub run_count: usize,
    pub rankings: Vec<PilotAggregate>,
    pub runs: Vec<RunMetrics>,
}

pub fn resolve_pilots(input: Option<&str>) -> Result<Vec<String>> {
    match input {
        None => Ok(pilot_ids().iter().map(|id| (*id).to_string()).collect()),
        Some(raw) => {
            let mut pilots = Vec::new();
            for token in raw.split(',') {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                pilots.push(token.to_string());
            }
            if pilots.is_empty() {
                return Err(anyhow!("--pilots resolved to empty list"));
            }
            Ok(pilots)
        }
    }
}

pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }
    if config.pilots.is_empty() {
        return Err(anyhow!("benchmark requires at least one pilot"));
    }
    if let Some(jobs) = config.jobs {
        if jobs == 0 {
            return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
        }
    }

    let run_jobs: Vec<(String, u32)> = config
        .pilots
        .iter()
        .flat_map(|pilot| config.seeds.iter().map(move |seed| (pilot.clone(), *seed)))
        .collect();

    let run_one = |(pilot_id, seed): &(String, u32)| -> Result<RunMetrics> {
        run_pilot(pilot_id, *seed, &config.tuning, config.fps, config.max_frames)
            .with_context(|| format!("benchmark run failed for pilot={pilot_id} seed={seed:#x}"))
    };

    let run_results: Vec<Result<RunMetrics>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| run_jobs.par_iter().map(run_one).collect())
    } else {
        run_jobs.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(run_results.len());
    for result in run_results {
        runs.push(result?);
    }

    let mut rankings: Vec<PilotAggregate> = config
        .pilots
        .iter()
        .map(|pilot_id| aggregate(pilot_id, &runs))
        .collect();
    rankings.sort_by(|a, b| {
        b.avg_score
            .total_cmp(&a.avg_score)
            .then_with(|| b.avg_frames.total_cmp(&a.avg_frames))
            .then_with(|| a.pilot_id.cmp(&b.pilot_id))
    });

    let generated_unix_s = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);

    Ok(BenchmarkReport {
        generated_unix_s,
        fps: config.fps,
        max_frames: config.max_frames,
        jobs: config.jobs,
        pilots: config.pilots,
        seeds: config.seeds,
        run_count: runs.len(),
        rankings,
        runs,
    })
}

fn aggregate(pilot_id: &str, runs: &[RunMetrics]) -> PilotAggregate {
    let mine: Vec<&RunMetrics> = runs.iter().filter(|run| run.pilot_id == pilot_id).collect();

    PilotAggregate {
        pilot_id: pilot_id.to_string(),
        runs: mine.len(),
        avg_score: mean(&mine, |run| f64::from(run.final_score)),
        max_score: mine.iter().map(|run| run.final_score).max().unwrap_or(0),
        avg_frames: mean(&mine, |run| f64::from(run.frame_count)),
        game_over_rate: mean(&mine, |run| if run.game_over { 1.0 } else { 0.0 }),
        unlock_rate: mean(&mine, |run| if run.hostiles_unlocked { 1.0 } else { 0.0 }),
        avg_asteroids_destroyed: mean(&mine, |run| f64::from(run.asteroids_destroyed)),
        avg_hostiles_destroyed: mean(&mine, |run| f64::from(run.hostiles_destroyed)),
        avg_power_ups_collected: mean(&mine, |run| f64::from(run.power_ups_collected)),
    }
}

fn mean(runs: &[&RunMetrics], value: impl Fn(&RunMetrics) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(|run| value(*run)).sum::<f64>() / runs.len() as f64
}

pub fn write_report(path: &Path, report: &BenchmarkReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("failed encoding benchmark report")?;
    fs::write(path, json).with_context(|| format!("failed writing {}", path.display()))
}
