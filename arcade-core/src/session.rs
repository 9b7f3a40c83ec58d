//! Session state machine: menu, running, paused and game over around one
//! owned [`Game`].
//!
//! Every transition resets the world before entering its target state, and
//! transitions that do not apply in the current state are ignored rather
//! than reported.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::FrameClock;
use crate::config::Tuning;
use crate::error::{ConfigError, RuleCode};
use crate::highscores::HighScoreTable;
use crate::input::FrameInput;
use crate::sim::{Game, GameEvent, GameMode, Loadout, WorldSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Menu,
    ViewingScores,
    Running,
    Paused,
    GameOver { final_score: u32 },
}

/// The world as it stood on the tick a run ended, captured before teardown.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub final_score: u32,
    pub clock_ms: f64,
    pub hostiles_unlocked: bool,
}

#[derive(Clone)]
pub struct Session {
    state: SessionState,
    game: Game,
    clock: FrameClock,
    fire_latch: bool,
    high_scores: HighScoreTable,
    last_run: Option<RunSummary>,
}

impl Session {
    pub fn new(tuning: Tuning, seed: u32) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let clock = FrameClock::new(tuning.max_delta_sec);
        Ok(Self {
            state: SessionState::Menu,
            game: Game::new(tuning, seed),
            clock,
            fire_latch: false,
            high_scores: HighScoreTable::default(),
            last_run: None,
        })
    }

    pub fn with_high_scores(mut self, high_scores: HighScoreTable) -> Self {
        self.high_scores = high_scores;
        self
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn tuning(&self) -> &Tuning {
        self.game.tuning()
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.game.score()
    }

    #[inline]
    pub fn lives(&self) -> u8 {
        self.game.lives()
    }

    #[inline]
    pub fn game_mode(&self) -> GameMode {
        self.game.mode()
    }

    #[inline]
    pub fn clock_ms(&self) -> f64 {
        self.game.clock_ms()
    }

    #[inline]
    pub fn loadout(&self) -> Loadout {
        self.game.loadout()
    }

    /// Score-threshold query for the presentation layer.
    #[inline]
    pub fn hostiles_unlocked(&self) -> bool {
        self.game.hostiles_unlocked()
    }

    #[inline]
    pub fn high_scores(&self) -> &HighScoreTable {
        &self.high_scores
    }

    /// Summary of the most recent finished run, until the next one starts.
    #[inline]
    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.game.world_snapshot()
    }

    pub fn validate(&self) -> Result<(), RuleCode> {
        self.game.validate_invariants()
    }

    /// Menu or score screen into a fresh run with its opening wave.
    pub fn start(&mut self) -> bool {
        match self.state {
            SessionState::Menu | SessionState::ViewingScores => {
                self.begin_run();
                true
            }
            other => self.ignore("start", other),
        }
    }

    /// Abandons the current run (or a finished one) for a fresh one.
    pub fn restart(&mut self) -> bool {
        match self.state {
            SessionState::Running | SessionState::Paused | SessionState::GameOver { .. } => {
                self.begin_run();
                true
            }
            other => self.ignore("restart", other),
        }
    }

    pub fn pause(&mut self) -> bool {
        match self.state {
            SessionState::Running => {
                self.state = SessionState::Paused;
                self.fire_latch = false;
                debug!(clock_ms = self.game.clock_ms(), "session paused");
                true
            }
            other => self.ignore("pause", other),
        }
    }

    /// The paused interval never reaches the simulation: the clock re-arms
    /// and the next tick is a zero step.
    pub fn resume(&mut self) -> bool {
        match self.state {
            SessionState::Paused => {
                self.clock.rearm();
                self.state = SessionState::Running;
                debug!(clock_ms = self.game.clock_ms(), "session resumed");
                true
            }
            other => self.ignore("resume", other),
        }
    }

    /// Leaves any state for the menu. A finished run's score is discarded.
    pub fn return_to_menu(&mut self) -> bool {
        match self.state {
            SessionState::Menu => self.ignore("return_to_menu", SessionState::Menu),
            _ => {
                self.tear_down();
                self.state = SessionState::Menu;
                debug!("returned to menu");
                true
            }
        }
    }

    pub fn view_scores(&mut self) -> bool {
        match self.state {
            SessionState::Menu => {
                self.state = SessionState::ViewingScores;
                true
            }
            other => self.ignore("view_scores", other),
        }
    }

    /// Queues one fire request for the next tick; the cooldown decides
    /// whether it produces a shot.
    pub fn fire(&mut self) -> bool {
        match self.state {
            SessionState::Running => {
                self.fire_latch = true;
                true
            }
            other => self.ignore("fire", other),
        }
    }

    /// Records the finished run under `name` and returns to the menu.
    /// Returns the rank the entry reached, if any.
    pub fn submit_name(&mut self, name: &str) -> Option<usize> {
        let SessionState::GameOver { final_score } = self.state else {
            self.ignore("submit_name", self.state);
            return None;
        };

        let rank = self.high_scores.insert(name, final_score);
        info!(final_score, ?rank, "high score submitted");
        self.tear_down();
        self.state = SessionState::Menu;
        rank
    }

    /// One display refresh at `now_ms`. Outside `Running` nothing advances
    /// and no events are produced.
    pub fn tick(&mut self, now_ms: f64, input: FrameInput) -> Vec<GameEvent> {
        if self.state != SessionState::Running {
            return Vec::new();
        }

        let frame = self.clock.advance(now_ms);
        let fire_requested = std::mem::take(&mut self.fire_latch);
        self.game.step(frame, input, fire_requested);
        let events = self.game.drain_events();

        if self.game.is_over() {
            let final_score = self.game.score();
            self.last_run = Some(RunSummary {
                final_score,
                clock_ms: self.game.clock_ms(),
                hostiles_unlocked: self.game.hostiles_unlocked(),
            });
            self.tear_down();
            self.state = SessionState::GameOver { final_score };
            info!(final_score, "session over");
        }

        events
    }

    /// [`Session::tick`] followed by the invariant checker.
    pub fn tick_checked(&mut self, now_ms: f64, input: FrameInput) -> Result<Vec<GameEvent>, RuleCode> {
        let events = self.tick(now_ms, input);
        self.game.validate_invariants()?;
        Ok(events)
    }

    fn begin_run(&mut self) {
        self.last_run = None;
        self.game.begin();
        self.clock.rearm();
        self.fire_latch = false;
        self.state = SessionState::Running;
        info!(lives = self.game.lives(), "run started");
    }

    fn tear_down(&mut self) {
        self.game.reset();
        self.clock.rearm();
        self.fire_latch = false;
    }

    fn ignore(&self, action: &'static str, state: SessionState) -> bool {
        debug!(action, ?state, "transition ignored");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Tuning::default(), 0xC0FF_EE00).expect("default tuning is valid")
    }

    #[test]
    fn invalid_tuning_is_rejected() {
        let mut tuning = Tuning::default();
        tuning.ship_friction = 0.0;
        assert!(Session::new(tuning, 1).is_err());
    }

    #[test]
    fn transitions_outside_their_source_state_are_ignored() {
        let mut session = session();
        assert!(!session.pause());
        assert!(!session.resume());
        assert!(!session.restart());
        assert!(!session.fire());
        assert!(!session.return_to_menu());
        assert_eq!(session.submit_name("nobody"), None);
        assert_eq!(session.state(), SessionState::Menu);

        assert!(session.start());
        assert!(!session.start());
        assert!(!session.view_scores());
        assert!(!session.resume());
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn ticks_outside_running_do_nothing() {
        let mut session = session();
        assert!(session.tick(0.0, FrameInput::IDLE).is_empty());
        assert_eq!(session.clock_ms(), 0.0);

        session.start();
        session.tick(0.0, FrameInput::IDLE);
        session.tick(16.0, FrameInput::IDLE);
        session.pause();
        assert!(session.tick(5_000.0, FrameInput::IDLE).is_empty());
        assert_eq!(session.clock_ms(), 16.0);
    }

    #[test]
    fn score_screen_round_trip() {
        let mut session = session();
        assert!(session.view_scores());
        assert_eq!(session.state(), SessionState::ViewingScores);
        assert!(session.return_to_menu());
        assert_eq!(session.state(), SessionState::Menu);
        assert!(session.view_scores());
        assert!(session.start());
        assert_eq!(session.state(), SessionState::Running);
    }
}
