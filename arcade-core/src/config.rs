use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::geometry::Viewport;

/// Upper bound on any single wave.
pub const WAVE_SIZE_LIMIT: u32 = 256;

/// Every gameplay knob of a session. Missing fields in a tuning file fall
/// back to the defaults in [`crate::constants`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub viewport: Viewport,
    pub max_delta_sec: f32,
    pub starting_lives: u8,

    pub ship_rotation_speed_deg: f32,
    pub ship_thrust: f32,
    pub ship_supercharged_thrust: f32,
    pub ship_friction: f32,
    pub ship_hitbox_size: f32,
    pub ship_invincible_ms: f64,
    pub ship_hit_cue_ms: f64,
    pub ship_death_sequence_ms: f64,

    pub shot_cooldown_ms: f64,
    pub projectile_speed: f32,
    pub projectile_lifetime_ms: f64,
    pub projectile_muzzle_offset: f32,
    pub projectile_size: f32,
    pub base_weapon_damage: u32,
    pub upgraded_weapon_damage: u32,
    pub hostile_kill_bonus: u32,

    pub asteroid_wave_min: u32,
    pub asteroid_wave_max: u32,
    pub asteroid_wave_floor: u32,
    pub asteroid_min_population: usize,
    pub asteroid_size_min: f32,
    pub asteroid_size_max: f32,
    pub asteroid_speed_min: f32,
    pub asteroid_speed_max: f32,
    pub asteroid_spin_max_deg: f32,
    pub asteroid_linger_ms: f64,

    pub hostile_unlock_score: u32,
    pub hostile_wave_size: u32,
    pub hostile_min_population: usize,
    pub hostile_size: f32,
    pub hostile_health: u8,
    pub hostile_speed: f32,
    pub hostile_separation: f32,
    pub hostile_fire_interval_ms: f64,
    pub hostile_linger_ms: f64,
    pub hostile_bolt_speed: f32,
    pub hostile_bolt_lifetime_ms: f64,

    pub powerup_spawn_delay_ms: f64,
    pub powerup_effect_ms: f64,
    pub powerup_item_timeout_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport: Viewport {
                width: VIEWPORT_WIDTH,
                height: VIEWPORT_HEIGHT,
            },
            max_delta_sec: MAX_DELTA_SEC,
            starting_lives: STARTING_LIVES,

            ship_rotation_speed_deg: SHIP_ROTATION_SPEED_DEG,
            ship_thrust: SHIP_THRUST,
            ship_supercharged_thrust: SHIP_SUPERCHARGED_THRUST,
            ship_friction: SHIP_FRICTION,
            ship_hitbox_size: SHIP_HITBOX_SIZE,
            ship_invincible_ms: SHIP_INVINCIBLE_MS,
            ship_hit_cue_ms: SHIP_HIT_CUE_MS,
            ship_death_sequence_ms: SHIP_DEATH_SEQUENCE_MS,

            shot_cooldown_ms: SHOT_COOLDOWN_MS,
            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime_ms: PROJECTILE_LIFETIME_MS,
            projectile_muzzle_offset: PROJECTILE_MUZZLE_OFFSET,
            projectile_size: PROJECTILE_SIZE,
            base_weapon_damage: BASE_WEAPON_DAMAGE,
            upgraded_weapon_damage: UPGRADED_WEAPON_DAMAGE,
            hostile_kill_bonus: HOSTILE_KILL_BONUS,

            asteroid_wave_min: ASTEROID_WAVE_MIN,
            asteroid_wave_max: ASTEROID_WAVE_MAX,
            asteroid_wave_floor: ASTEROID_WAVE_FLOOR,
            asteroid_min_population: ASTEROID_MIN_POPULATION,
            asteroid_size_min: ASTEROID_SIZE_MIN,
            asteroid_size_max: ASTEROID_SIZE_MAX,
            asteroid_speed_min: ASTEROID_SPEED_MIN,
            asteroid_speed_max: ASTEROID_SPEED_MAX,
            asteroid_spin_max_deg: ASTEROID_SPIN_MAX_DEG,
            asteroid_linger_ms: ASTEROID_LINGER_MS,

            hostile_unlock_score: HOSTILE_UNLOCK_SCORE,
            hostile_wave_size: HOSTILE_WAVE_SIZE,
            hostile_min_population: HOSTILE_MIN_POPULATION,
            hostile_size: HOSTILE_SIZE,
            hostile_health: HOSTILE_HEALTH,
            hostile_speed: HOSTILE_SPEED,
            hostile_separation: HOSTILE_SEPARATION,
            hostile_fire_interval_ms: HOSTILE_FIRE_INTERVAL_MS,
            hostile_linger_ms: HOSTILE_LINGER_MS,
            hostile_bolt_speed: HOSTILE_BOLT_SPEED,
            hostile_bolt_lifetime_ms: HOSTILE_BOLT_LIFETIME_MS,

            powerup_spawn_delay_ms: POWERUP_SPAWN_DELAY_MS,
            powerup_effect_ms: POWERUP_EFFECT_MS,
            powerup_item_timeout_ms: POWERUP_ITEM_TIMEOUT_MS,
        }
    }
}

impl Tuning {
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("viewport.width", self.viewport.width as f64)?;
        positive("viewport.height", self.viewport.height as f64)?;
        positive("max_delta_sec", self.max_delta_sec as f64)?;
        if self.starting_lives == 0 {
            return Err(ConfigError::ZeroHealth {
                field: "starting_lives",
            });
        }
        at_most("starting_lives", self.starting_lives as f64, STARTING_LIVES as f64)?;

        non_negative("ship_rotation_speed_deg", self.ship_rotation_speed_deg as f64)?;
        positive("ship_thrust", self.ship_thrust as f64)?;
        positive("ship_supercharged_thrust", self.ship_supercharged_thrust as f64)?;
        positive("ship_hitbox_size", self.ship_hitbox_size as f64)?;
        if !(self.ship_friction > 0.0 && self.ship_friction <= 1.0) {
            return Err(ConfigError::FrictionOutOfRange {
                value: self.ship_friction,
            });
        }

        non_negative("ship_invincible_ms", self.ship_invincible_ms)?;
        non_negative("ship_hit_cue_ms", self.ship_hit_cue_ms)?;
        non_negative("ship_death_sequence_ms", self.ship_death_sequence_ms)?;

        non_negative("shot_cooldown_ms", self.shot_cooldown_ms)?;
        positive("projectile_speed", self.projectile_speed as f64)?;
        positive("projectile_lifetime_ms", self.projectile_lifetime_ms)?;
        positive("projectile_size", self.projectile_size as f64)?;
        non_negative("projectile_muzzle_offset", self.projectile_muzzle_offset as f64)?;

        ordered(
            "asteroid_wave",
            self.asteroid_wave_min as f64,
            self.asteroid_wave_max as f64,
        )?;
        at_most("asteroid_wave_max", self.asteroid_wave_max as f64, WAVE_SIZE_LIMIT as f64)?;
        at_most("asteroid_wave_floor", self.asteroid_wave_floor as f64, WAVE_SIZE_LIMIT as f64)?;
        if self.asteroid_wave_max == 0 && self.asteroid_wave_floor == 0 {
            return Err(ConfigError::ZeroWave {
                field: "asteroid_wave",
            });
        }
        positive("asteroid_size_min", self.asteroid_size_min as f64)?;
        ordered(
            "asteroid_size",
            self.asteroid_size_min as f64,
            self.asteroid_size_max as f64,
        )?;
        non_negative("asteroid_speed_min", self.asteroid_speed_min as f64)?;
        ordered(
            "asteroid_speed",
            self.asteroid_speed_min as f64,
            self.asteroid_speed_max as f64,
        )?;
        non_negative("asteroid_spin_max_deg", self.asteroid_spin_max_deg as f64)?;
        non_negative("asteroid_linger_ms", self.asteroid_linger_ms)?;

        if self.hostile_wave_size == 0 {
            return Err(ConfigError::ZeroWave {
                field: "hostile_wave_size",
            });
        }
        at_most("hostile_wave_size", self.hostile_wave_size as f64, WAVE_SIZE_LIMIT as f64)?;
        if self.hostile_health == 0 {
            return Err(ConfigError::ZeroHealth {
                field: "hostile_health",
            });
        }
        positive("hostile_size", self.hostile_size as f64)?;
        positive("hostile_fire_interval_ms", self.hostile_fire_interval_ms)?;
        positive("hostile_bolt_lifetime_ms", self.hostile_bolt_lifetime_ms)?;
        non_negative("hostile_speed", self.hostile_speed as f64)?;
        non_negative("hostile_separation", self.hostile_separation as f64)?;
        positive("hostile_bolt_speed", self.hostile_bolt_speed as f64)?;
        non_negative("hostile_linger_ms", self.hostile_linger_ms)?;

        non_negative("powerup_spawn_delay_ms", self.powerup_spawn_delay_ms)?;
        positive("powerup_effect_ms", self.powerup_effect_ms)?;
        positive("powerup_item_timeout_ms", self.powerup_item_timeout_ms)?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn at_most(field: &'static str, value: f64, limit: f64) -> Result<(), ConfigError> {
    if value <= limit {
        Ok(())
    } else {
        Err(ConfigError::TooLarge { field, value, limit })
    }
}

fn ordered(field: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}
