use arcade_core::{Session, SessionState, Tuning};
use arcade_host::pilots::create_pilot;
use arcade_host::runner::{run_pilot, run_session, write_metrics, RunMetrics};
use arcade_host::store::ScoreFile;
use tempfile::TempDir;

fn doomed_tuning() -> Tuning {
    Tuning {
        starting_lives: 1,
        asteroid_wave_min: 40,
        asteroid_wave_max: 40,
        asteroid_wave_floor: 40,
        asteroid_size_min: 200.0,
        asteroid_size_max: 230.0,
        asteroid_speed_min: 150.0,
        asteroid_speed_max: 175.0,
        ..Tuning::default()
    }
}

#[test]
fn idle_pilot_in_a_crowded_sky_ends_in_game_over() {
    let metrics = run_pilot("idle", 0xA11C_E001, &doomed_tuning(), 60, 60_000).unwrap();
    assert!(metrics.game_over);
    assert_eq!(metrics.final_lives, 0);
    assert_eq!(metrics.ship_hits, 1);
    assert_eq!(metrics.shots_fired, 0);
    assert_eq!(metrics.action_frames, 0);
    assert!(metrics.frame_count < 60_000);

    // The clock reported is the one on the final tick, not the one before it.
    let expected_clock = f64::from(metrics.frame_count - 1) * 1000.0 / 60.0;
    assert!(
        (metrics.clock_ms - expected_clock).abs() < 1e-3,
        "clock {} vs {expected_clock}",
        metrics.clock_ms
    );
}

#[test]
fn max_frames_bounds_a_run() {
    let metrics = run_pilot("turret", 7, &Tuning::default(), 60, 30).unwrap();
    assert_eq!(metrics.frame_count, 30);
    assert!(!metrics.game_over);
    assert_eq!(metrics.final_lives, 3);
    assert_eq!(metrics.fire_frames, 30);
    assert_eq!(metrics.turn_frames, 30);
    assert!((2..=3).contains(&metrics.shots_fired), "{}", metrics.shots_fired);
}

#[test]
fn runs_are_reproducible_per_seed() {
    let tuning = Tuning::default();
    let first = run_pilot("hunter", 0x5EED_0042, &tuning, 60, 1_200).unwrap();
    let second = run_pilot("hunter", 0x5EED_0042, &tuning, 60, 1_200).unwrap();
    assert_eq!(first, second);
}

#[test]
fn invalid_runs_are_rejected() {
    let tuning = Tuning::default();
    assert!(run_pilot("ghost", 1, &tuning, 60, 10).is_err());
    assert!(run_pilot("idle", 1, &tuning, 0, 10).is_err());
    assert!(run_pilot("idle", 1, &tuning, 60, 0).is_err());

    let bad = Tuning {
        starting_lives: 0,
        ..Tuning::default()
    };
    assert!(run_pilot("idle", 1, &bad, 60, 10).is_err());
}

#[test]
fn running_session_cannot_be_started_again() {
    let mut session = Session::new(Tuning::default(), 3).unwrap();
    assert!(session.start());
    let mut pilot = create_pilot("idle").unwrap();
    assert!(run_session(&mut session, pilot.as_mut(), 3, 60, 10).is_err());
}

#[test]
fn finished_session_accepts_a_name() {
    let dir = TempDir::new().unwrap();
    let store = ScoreFile::new(dir.path().join("scores.json"));
    let mut session = Session::new(doomed_tuning(), 0xBEEF)
        .unwrap()
        .with_high_scores(store.load());
    let mut pilot = create_pilot("idle").unwrap();

    let metrics = run_session(&mut session, pilot.as_mut(), 0xBEEF, 60, 60_000).unwrap();
    assert_eq!(
        session.state(),
        SessionState::GameOver {
            final_score: metrics.final_score
        }
    );

    assert_eq!(session.submit_name("Ace"), Some(0));
    store.save(session.high_scores()).unwrap();
    let stored = store.load();
    assert_eq!(stored.entries()[0].name, "Ace");
    assert_eq!(stored.entries()[0].score, metrics.final_score);
}

#[test]
fn metrics_are_written_as_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("runs").join("turret.json");
    let metrics = run_pilot("turret", 9, &Tuning::default(), 30, 20).unwrap();
    write_metrics(&path, &metrics).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let loaded: RunMetrics = serde_json::from_str(&raw).unwrap();
    assert_eq!(loaded.pilot_id, "turret");
    assert_eq!(loaded.fps, 30);
    assert_eq!(loaded.frame_count, metrics.frame_count);
    assert_eq!(loaded.shots_fired, metrics.shots_fired);
    assert!((loaded.clock_ms - metrics.clock_ms).abs() < 1e-6);
}
