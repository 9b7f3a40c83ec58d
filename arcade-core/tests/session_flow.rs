use arcade_core::constants::DEFAULT_PILOT_NAME;
use arcade_core::{
    FrameInput, GameEvent, GameMode, HighScoreEntry, HighScoreTable, Session, SessionState,
    Tuning,
};

const FRAME_MS: f64 = 16.0;

fn started(tuning: Tuning) -> Session {
    let mut session = Session::new(tuning, 0x5EED_0001).expect("tuning is valid");
    assert!(session.start());
    session
}

/// One life and a crowded sky, so an idle ship is hit quickly.
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

fn run_until_game_over(session: &mut Session) -> (f64, Vec<GameEvent>) {
    let mut now = 0.0;
    let mut events = Vec::new();
    for _ in 0..60_000 {
        events.extend(
            session
                .tick_checked(now, FrameInput::IDLE)
                .expect("invariants hold every tick"),
        );
        if matches!(session.state(), SessionState::GameOver { .. }) {
            return (now, events);
        }
        now += FRAME_MS;
    }
    panic!("session never reached game over");
}

#[test]
fn a_run_ends_in_game_over_and_records_the_pilot() {
    let mut session = started(doomed_tuning());
    let (ended_at, events) = run_until_game_over(&mut session);

    let SessionState::GameOver { final_score } = session.state() else {
        unreachable!();
    };
    assert!(events.contains(&GameEvent::ShipDestroyed));
    assert!(events.contains(&GameEvent::GameOver { final_score }));

    // The summary keeps the final tick's clock after the world is torn down.
    let summary = session.last_run().expect("finished run is summarized");
    assert_eq!(summary.final_score, final_score);
    assert!((summary.clock_ms - ended_at).abs() < 1e-6);
    assert_eq!(session.clock_ms(), 0.0);

    // Game over tears the world down and freezes the loop.
    let snapshot = session.snapshot();
    assert!(snapshot.asteroids.is_empty());
    assert!(snapshot.projectiles.is_empty());
    assert_eq!(snapshot.mode, GameMode::Playing);
    assert!(session.tick(1.0e9, FrameInput::IDLE).is_empty());

    assert_eq!(session.submit_name("   "), Some(0));
    assert_eq!(session.state(), SessionState::Menu);
    assert_eq!(
        session.high_scores().entries(),
        &[HighScoreEntry::new(DEFAULT_PILOT_NAME, final_score)]
    );
    assert_eq!(session.submit_name("again"), None);
}

#[test]
fn game_over_can_restart_without_submitting() {
    let mut session = started(doomed_tuning());
    run_until_game_over(&mut session);

    assert!(session.last_run().is_some());
    assert!(session.restart());
    assert!(session.last_run().is_none());
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.lives(), 1);
    assert_eq!(session.snapshot().asteroids.len(), 40);
    assert!(session.high_scores().is_empty());
}

#[test]
fn pause_freezes_time_and_resume_discards_the_gap() {
    let mut session = started(Tuning::default());
    session.tick(1_000.0, FrameInput::IDLE);
    session.tick(1_016.0, FrameInput::IDLE);
    assert_eq!(session.clock_ms(), 16.0);

    assert!(session.pause());
    assert_eq!(session.state(), SessionState::Paused);
    assert!(session.tick(90_000.0, FrameInput::IDLE).is_empty());
    assert_eq!(session.clock_ms(), 16.0);

    assert!(session.resume());
    session.tick(100_000.0, FrameInput::IDLE);
    assert_eq!(session.clock_ms(), 16.0);
    session.tick(100_016.0, FrameInput::IDLE);
    assert_eq!(session.clock_ms(), 32.0);
}

#[test]
fn fire_action_is_latched_for_one_tick() {
    let mut session = started(Tuning::default());
    session.tick(0.0, FrameInput::IDLE);

    assert!(session.fire());
    let events = session.tick(FRAME_MS, FrameInput::IDLE);
    assert!(events.contains(&GameEvent::ShotFired));
    let events = session.tick(FRAME_MS * 30.0, FrameInput::IDLE);
    assert!(!events.contains(&GameEvent::ShotFired));

    assert!(session.pause());
    assert!(!session.fire());
}

#[test]
fn return_to_menu_tears_everything_down() {
    let mut session = started(Tuning::default());
    let thrust_and_fire = FrameInput {
        thrust: true,
        fire: true,
        ..FrameInput::IDLE
    };
    let mut saw_projectiles = false;
    for tick in 0..120 {
        session.tick(f64::from(tick) * FRAME_MS, thrust_and_fire);
        saw_projectiles |= !session.snapshot().projectiles.is_empty();
    }
    assert!(saw_projectiles);

    assert!(session.return_to_menu());
    assert_eq!(session.state(), SessionState::Menu);
    let snapshot = session.snapshot();
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.lives, 3);
    assert_eq!(snapshot.clock_ms, 0.0);
    assert_eq!((snapshot.ship.x, snapshot.ship.y), (640.0, 360.0));
    assert_eq!((snapshot.ship.vx, snapshot.ship.vy), (0.0, 0.0));
    assert!(snapshot.asteroids.is_empty());
    assert!(snapshot.projectiles.is_empty());
    assert!(snapshot.power_up.is_none());
    assert!(!session.hostiles_unlocked());
    session.validate().expect("menu world is valid");
}

#[test]
fn restart_begins_a_fresh_run() {
    let mut session = started(Tuning::default());
    for tick in 0..300 {
        session.tick(f64::from(tick) * FRAME_MS, FrameInput::IDLE);
    }

    assert!(session.restart());
    let snapshot = session.snapshot();
    assert_eq!(snapshot.clock_ms, 0.0);
    assert!((10..=13).contains(&snapshot.asteroids.len()));
    assert!(snapshot.asteroids.iter().all(|entry| !entry.destroyed));
}

#[test]
fn long_scripted_session_keeps_invariants() {
    let mut session = started(Tuning::default());
    for tick in 0..10_000u32 {
        let input = arcade_core::decode_input_byte((tick / 11 % 16) as u8);
        session
            .tick_checked(f64::from(tick) * FRAME_MS, input)
            .unwrap_or_else(|rule| panic!("tick {tick}: {rule}"));
        if matches!(session.state(), SessionState::GameOver { .. }) {
            assert!(session.restart());
        }
    }
}

#[test]
fn stored_scores_feed_the_session() {
    let stored = HighScoreTable::from_json_lenient(
        r#"[{"name":"A","score":5000},{"name":"B","score":3000},{"name":"C","score":1000}]"#,
    );
    let session = Session::new(Tuning::default(), 7)
        .expect("tuning is valid")
        .with_high_scores(stored.clone());
    assert_eq!(session.high_scores(), &stored);
    assert_eq!(session.state(), SessionState::Menu);
}

#[test]
fn snapshots_serialize_for_presentation() {
    let mut session = started(Tuning::default());
    session.tick(0.0, FrameInput::IDLE);
    let value = serde_json::to_value(session.snapshot()).expect("snapshot serializes");

    assert_eq!(value["mode"]["mode"], "playing");
    assert_eq!(value["lives"], 3);
    assert!(value["asteroids"].as_array().is_some_and(|list| !list.is_empty()));
    assert!(value["ship"]["loadout"]["shielded"].is_boolean());
}
