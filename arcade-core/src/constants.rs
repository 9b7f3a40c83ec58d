//! Gameplay defaults.
//!
//! Distances are pixels, speeds pixels per second, angles degrees (0 = up,
//! clockwise positive) and durations milliseconds unless the name says
//! otherwise. `Tuning::default()` is built from these values.

// Loop driver
pub const MAX_DELTA_SEC: f32 = 0.05;

// Viewport
pub const VIEWPORT_WIDTH: f32 = 1280.0;
pub const VIEWPORT_HEIGHT: f32 = 720.0;

// Starting state
pub const STARTING_LIVES: u8 = 3;

// Ship
pub const SHIP_ROTATION_SPEED_DEG: f32 = 180.0;
pub const SHIP_THRUST: f32 = 600.0;
pub const SHIP_SUPERCHARGED_THRUST: f32 = 750.0;
pub const SHIP_FRICTION: f32 = 0.98;
pub const SHIP_FRICTION_REFERENCE_FPS: f32 = 60.0;
pub const SHIP_HITBOX_SIZE: f32 = 48.0;
pub const SHIP_INVINCIBLE_MS: f64 = 1_200.0;
pub const SHIP_HIT_CUE_MS: f64 = 300.0;
pub const SHIP_DEATH_SEQUENCE_MS: f64 = 1_200.0;

// Player projectiles
pub const SHOT_COOLDOWN_MS: f64 = 200.0;
pub const PROJECTILE_SPEED: f32 = 800.0;
pub const PROJECTILE_LIFETIME_MS: f64 = 1_500.0;
pub const PROJECTILE_MUZZLE_OFFSET: f32 = 30.0;
pub const PROJECTILE_SIZE: f32 = 12.0;
pub const OFFSCREEN_PADDING: f32 = 10.0;

// Weapon damage doubles as the score awarded per destruction.
pub const BASE_WEAPON_DAMAGE: u32 = 100;
pub const UPGRADED_WEAPON_DAMAGE: u32 = 150;
pub const HOSTILE_KILL_BONUS: u32 = 300;

// Asteroids
pub const ASTEROID_WAVE_MIN: u32 = 8;
pub const ASTEROID_WAVE_MAX: u32 = 13;
pub const ASTEROID_WAVE_FLOOR: u32 = 10;
pub const ASTEROID_MIN_POPULATION: usize = 3;
pub const ASTEROID_SIZE_MIN: f32 = 140.0;
pub const ASTEROID_SIZE_MAX: f32 = 230.0;
pub const ASTEROID_SPEED_MIN: f32 = 50.0;
pub const ASTEROID_SPEED_MAX: f32 = 175.0;
pub const ASTEROID_SPIN_MAX_DEG: f32 = 30.0;
pub const ASTEROID_HITBOX_SCALE: f32 = 0.6;
pub const ASTEROID_LINGER_MS: f64 = 700.0;

// Health tiers by asteroid size: >= 210 takes three hits, >= 175 two.
pub const ASTEROID_TIER_HEAVY_SIZE: f32 = 210.0;
pub const ASTEROID_TIER_MEDIUM_SIZE: f32 = 175.0;

// Wrap margin as a fraction of entity size.
pub const WRAP_MARGIN_FACTOR: f32 = 0.7;

// Hostile craft
pub const HOSTILE_UNLOCK_SCORE: u32 = 2_500;
pub const HOSTILE_WAVE_SIZE: u32 = 3;
pub const HOSTILE_MIN_POPULATION: usize = 1;
pub const HOSTILE_SIZE: f32 = 75.0;
pub const HOSTILE_HEALTH: u8 = 1;
pub const HOSTILE_SPEED: f32 = 120.0;
pub const HOSTILE_SEPARATION: f32 = 80.0;
pub const HOSTILE_SEPARATION_GAIN: f32 = 0.1;
pub const HOSTILE_FIRE_INTERVAL_MS: f64 = 3_000.0;
pub const HOSTILE_HITBOX_SCALE: f32 = 0.6;
pub const HOSTILE_LINGER_MS: f64 = 1_400.0;

// Hostile bolts
pub const HOSTILE_BOLT_SPEED: f32 = 400.0;
pub const HOSTILE_BOLT_LIFETIME_MS: f64 = 2_000.0;
pub const HOSTILE_BOLT_SIZE: f32 = 12.0;

// Power-ups
pub const POWERUP_SPAWN_DELAY_MS: f64 = 3_000.0;
pub const POWERUP_EFFECT_MS: f64 = 5_000.0;
pub const POWERUP_ITEM_TIMEOUT_MS: f64 = 8_000.0;
pub const POWERUP_SIZE: f32 = 50.0;

// High scores
pub const HIGH_SCORE_SLOTS: usize = 3;
pub const DEFAULT_PILOT_NAME: &str = "Player";
