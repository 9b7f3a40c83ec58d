use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use arcade_core::{encode_input_byte, GameEvent, HazardKind, Session, Tuning};
use serde::{Deserialize, Serialize};

use crate::pilots::{create_pilot, Pilot};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub pilot_id: String,
    pub seed: u32,
    pub fps: u32,
    pub max_frames: u32,
    pub frame_count: u32,
    pub clock_ms: f64,
    pub final_score: u32,
    pub final_lives: u8,
    pub game_over: bool,
    pub hostiles_unlocked: bool,
    pub shots_fired: u32,
    pub asteroids_destroyed: u32,
    pub hostiles_destroyed: u32,
    pub ship_hits: u32,
    pub power_ups_collected: u32,
    pub action_frames: u32,
    pub turn_frames: u32,
    pub thrust_frames: u32,
    pub fire_frames: u32,
}

pub fn run_pilot(
    pilot_id: &str,
    seed: u32,
    tuning: &Tuning,
    fps: u32,
    max_frames: u32,
) -> Result<RunMetrics> {
    let mut pilot = create_pilot(pilot_id).ok_or_else(|| anyhow!("unknown pilot '{pilot_id}'"))?;
    let mut session = Session::new(tuning.clone(), seed).context("tuning rejected")?;
    run_session(&mut session, pilot.as_mut(), seed, fps, max_frames)
}

/// Starts `session` and feeds it one display refresh every `1000 / fps` ms
/// until game over or `max_frames` refreshes. The session is left in
/// `GameOver` when the run ended, so a caller can still submit a name.
pub fn run_session(
    session: &mut Session,
    pilot: &mut dyn Pilot,
    seed: u32,
    fps: u32,
    max_frames: u32,
) -> Result<RunMetrics> {
    if fps == 0 {
        return Err(anyhow!("fps must be > 0"));
    }
    if max_frames == 0 {
        return Err(anyhow!("max_frames must be > 0"));
    }
    if !session.start() {
        return Err(anyhow!(
            "session cannot start from {:?}",
            session.state()
        ));
    }
    session
        .validate()
        .map_err(|rule| anyhow!("initial invariant failure: {rule}"))?;

    pilot.reset(seed);
    let frame_ms = 1000.0 / f64::from(fps);

    let mut metrics = RunMetrics {
        pilot_id: pilot.id().to_string(),
        seed,
        fps,
        max_frames,
        frame_count: 0,
        clock_ms: 0.0,
        final_score: 0,
        final_lives: session.lives(),
        game_over: false,
        hostiles_unlocked: false,
        shots_fired: 0,
        asteroids_destroyed: 0,
        hostiles_destroyed: 0,
        ship_hits: 0,
        power_ups_collected: 0,
        action_frames: 0,
        turn_frames: 0,
        thrust_frames: 0,
        fire_frames: 0,
    };

    for frame in 0..max_frames {
        let input = pilot.next_input(&session.snapshot());
        let byte = encode_input_byte(input);
        if byte != 0 {
            metrics.action_frames += 1;
        }
        if input.left || input.right {
            metrics.turn_frames += 1;
        }
        if input.thrust {
            metrics.thrust_frames += 1;
        }
        if input.fire {
            metrics.fire_frames += 1;
        }

        let events = session
            .tick_checked(f64::from(frame) * frame_ms, input)
            .map_err(|rule| anyhow!("invariant failure at frame {frame}: {rule}"))?;
        metrics.frame_count = frame + 1;
        tally(&mut metrics, &events);

        if let Some(summary) = session.last_run() {
            metrics.game_over = true;
            metrics.final_score = summary.final_score;
            metrics.clock_ms = summary.clock_ms;
            metrics.final_lives = 0;
            break;
        }
        metrics.clock_ms = session.clock_ms();
        metrics.final_score = session.score();
        metrics.final_lives = session.lives();
    }

    tracing::debug!(
        pilot = %metrics.pilot_id,
        seed,
        frames = metrics.frame_count,
        score = metrics.final_score,
        "run finished"
    );
    Ok(metrics)
}

fn tally(metrics: &mut RunMetrics, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::ShotFired => metrics.shots_fired += 1,
            GameEvent::HazardDestroyed {
                kind: HazardKind::Asteroid,
                ..
            } => metrics.asteroids_destroyed += 1,
            GameEvent::HazardDestroyed {
                kind: HazardKind::Hostile,
                ..
            } => metrics.hostiles_destroyed += 1,
            GameEvent::ShipHit { .. } => metrics.ship_hits += 1,
            GameEvent::HostilesUnlocked => metrics.hostiles_unlocked = true,
            GameEvent::PowerUpCollected { .. } => metrics.power_ups_collected += 1,
            _ => {}
        }
    }
}

pub fn write_metrics(path: &Path, metrics: &RunMetrics) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(metrics).context("failed encoding run metrics")?;
    fs::write(path, json).with_context(|| format!("failed writing {}", path.display()))
}
