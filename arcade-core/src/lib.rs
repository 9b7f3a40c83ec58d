pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod highscores;
pub mod input;
pub mod rng;
pub mod session;
pub mod sim;

pub use clock::{FrameClock, FrameStep};
pub use config::Tuning;
pub use error::{ConfigError, RuleCode};
pub use highscores::{HighScoreEntry, HighScoreTable};
pub use input::{decode_input_byte, encode_input_byte, FrameInput};
pub use session::{RunSummary, Session, SessionState};
pub use sim::{GameEvent, GameMode, HazardKind, Loadout, PowerUpKind, WorldSnapshot};
