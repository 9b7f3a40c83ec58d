use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCode {
    GlobalLivesRange,
    GlobalModeLivesConsistency,
    ShipNonFinite,
    ShipBounds,
    PlayerProjectileState,
    HostileBoltState,
    AsteroidState,
    AsteroidHealth,
    HostileState,
    HostileHealth,
    HostilesLocked,
    PowerUpSlot,
    PowerUpLoadout,
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlobalLivesRange => write!(f, "GLOBAL_LIVES_RANGE"),
            Self::GlobalModeLivesConsistency => write!(f, "GLOBAL_MODE_LIVES_CONSISTENCY"),
            Self::ShipNonFinite => write!(f, "SHIP_NON_FINITE"),
            Self::ShipBounds => write!(f, "SHIP_BOUNDS"),
            Self::PlayerProjectileState => write!(f, "PLAYER_PROJECTILE_STATE"),
            Self::HostileBoltState => write!(f, "HOSTILE_BOLT_STATE"),
            Self::AsteroidState => write!(f, "ASTEROID_STATE"),
            Self::AsteroidHealth => write!(f, "ASTEROID_HEALTH"),
            Self::HostileState => write!(f, "HOSTILE_STATE"),
            Self::HostileHealth => write!(f, "HOSTILE_HEALTH"),
            Self::HostilesLocked => write!(f, "HOSTILES_LOCKED"),
            Self::PowerUpSlot => write!(f, "POWERUP_SLOT"),
            Self::PowerUpLoadout => write!(f, "POWERUP_LOADOUT"),
        }
    }
}

impl std::error::Error for RuleCode {}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositive { field: &'static str, value: f64 },
    Negative { field: &'static str, value: f64 },
    TooLarge { field: &'static str, value: f64, limit: f64 },
    InvertedRange { field: &'static str, min: f64, max: f64 },
    FrictionOutOfRange { value: f32 },
    ZeroWave { field: &'static str },
    ZeroHealth { field: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be > 0, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must be >= 0, got {value}")
            }
            Self::TooLarge { field, value, limit } => {
                write!(f, "{field} must be <= {limit}, got {value}")
            }
            Self::InvertedRange { field, min, max } => {
                write!(f, "{field} range is inverted: min={min}, max={max}")
            }
            Self::FrictionOutOfRange { value } => {
                write!(f, "ship_friction must be in (0, 1], got {value}")
            }
            Self::ZeroWave { field } => write!(f, "{field} must spawn at least one entity"),
            Self::ZeroHealth { field } => write!(f, "{field} must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
