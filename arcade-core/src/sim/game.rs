use super::*;

use crate::clock::FrameStep;
use crate::config::Tuning;
use crate::constants::{OFFSCREEN_PADDING, POWERUP_SIZE};
use crate::error::RuleCode;
use crate::input::FrameInput;
use crate::rng::SeededRng;

mod collision;
mod hazards;
mod powerup;
mod projectiles;
mod ship;


const PROJECTILE_VEC_CAPACITY: usize = 32;
const ASTEROID_VEC_CAPACITY: usize = 48;
const HOSTILE_VEC_CAPACITY: usize = 8;
const HOSTILE_BOLT_VEC_CAPACITY: usize = 16;

/// The world of one run: ship, hazards, shots, power-up slot and score.
///
/// Time only moves through [`Game::step`]; every timed window is an expiry
/// stamp on `clock_ms` compared on the tick that observes it, so a reset
/// leaves nothing pending behind.
#[derive(Clone)]
pub(crate) struct Game {
    tuning: Tuning,
    mode: GameMode,
    score: u32,
    lives: u8,
    clock_ms: f64,
    frame_count: u32,
    ship: Ship,
    loadout: Loadout,
    projectiles: Vec<Projectile>,
    asteroids: Vec<Asteroid>,
    hostiles: Vec<Hostile>,
    hostile_bolts: Vec<HostileBolt>,
    power_up: PowerUpPhase,
    hostiles_unlocked: bool,
    rng: SeededRng,
    events: Vec<GameEvent>,
}

impl Game {
    pub(crate) fn new(tuning: Tuning, seed: u32) -> Self {
        let ship = Ship::spawn(tuning.viewport.center());
        let power_up = PowerUpPhase::Waiting {
            ready_at_ms: tuning.powerup_spawn_delay_ms,
        };
        let lives = tuning.starting_lives;

        Self {
            tuning,
            mode: GameMode::Playing,
            score: 0,
            lives,
            clock_ms: 0.0,
            frame_count: 0,
            ship,
            loadout: Loadout::BASE,
            projectiles: Vec::with_capacity(PROJECTILE_VEC_CAPACITY),
            asteroids: Vec::with_capacity(ASTEROID_VEC_CAPACITY),
            hostiles: Vec::with_capacity(HOSTILE_VEC_CAPACITY),
            hostile_bolts: Vec::with_capacity(HOSTILE_BOLT_VEC_CAPACITY),
            power_up,
            hostiles_unlocked: false,
            rng: SeededRng::new(seed),
            events: Vec::new(),
        }
    }

    /// Back to a fresh world. The RNG keeps its stream so consecutive runs
    /// in one session differ.
    pub(crate) fn reset(&mut self) {
        self.mode = GameMode::Playing;
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.clock_ms = 0.0;
        self.frame_count = 0;
        self.ship = Ship::spawn(self.tuning.viewport.center());
        self.loadout = Loadout::BASE;
        self.projectiles.clear();
        self.asteroids.clear();
        self.hostiles.clear();
        self.hostile_bolts.clear();
        self.power_up = PowerUpPhase::Waiting {
            ready_at_ms: self.tuning.powerup_spawn_delay_ms,
        };
        self.hostiles_unlocked = false;
        self.events.clear();
    }

    /// Reset and drop in the opening asteroid wave.
    pub(crate) fn begin(&mut self) {
        self.reset();
        self.spawn_asteroid_wave();
    }

    pub(crate) fn step(&mut self, frame: FrameStep, input: FrameInput, fire_requested: bool) {
        if self.is_over() {
            return;
        }

        self.clock_ms += frame.elapsed_ms;
        self.frame_count = self.frame_count.wrapping_add(1);
        let dt = frame.dt_sec;

        self.update_ship(input, fire_requested || input.fire, dt);
        self.update_projectiles(dt);
        self.resolve_projectile_asteroid_hits();
        self.resolve_projectile_hostile_hits();
        self.update_asteroids(dt);
        self.enforce_asteroid_population();
        self.update_power_up();
        self.check_hostile_unlock();
        if self.hostiles_unlocked {
            self.update_hostile_bolts(dt);
            self.update_hostiles(dt);
            self.enforce_hostile_population();
        }
        self.resolve_ship_contacts();
        self.finish_death_sequence();
    }

    pub(crate) fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub(crate) fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    #[inline]
    pub(crate) fn mode(&self) -> GameMode {
        self.mode
    }

    #[inline]
    pub(crate) fn is_over(&self) -> bool {
        matches!(self.mode, GameMode::Over)
    }

    #[inline]
    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub(crate) fn lives(&self) -> u8 {
        self.lives
    }

    #[inline]
    pub(crate) fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    #[inline]
    pub(crate) fn hostiles_unlocked(&self) -> bool {
        self.hostiles_unlocked
    }

    #[inline]
    pub(crate) fn loadout(&self) -> Loadout {
        self.loadout
    }

    pub(crate) fn validate_invariants(&self) -> Result<(), RuleCode> {
        let viewport = self.tuning.viewport;

        if self.lives > self.tuning.starting_lives {
            return Err(RuleCode::GlobalLivesRange);
        }

        let mode_lives_consistent = match self.mode {
            GameMode::Playing => self.lives > 0,
            GameMode::Dying { .. } | GameMode::Over => self.lives == 0,
        };
        if !mode_lives_consistent {
            return Err(RuleCode::GlobalModeLivesConsistency);
        }

        if !self.ship.pos.is_finite() || !self.ship.vel.is_finite() || !self.ship.heading.is_finite()
        {
            return Err(RuleCode::ShipNonFinite);
        }

        let ship_in_bounds = (0.0..=viewport.width).contains(&self.ship.pos.x)
            && (0.0..=viewport.height).contains(&self.ship.pos.y);
        if !ship_in_bounds {
            return Err(RuleCode::ShipBounds);
        }

        for projectile in &self.projectiles {
            let age = self.clock_ms - projectile.spawned_at_ms;
            let valid = projectile.pos.is_finite()
                && projectile.vel.is_finite()
                && (0.0..self.tuning.projectile_lifetime_ms).contains(&age)
                && !viewport.is_outside(projectile.pos, OFFSCREEN_PADDING);
            if !valid {
                return Err(RuleCode::PlayerProjectileState);
            }
        }

        for bolt in &self.hostile_bolts {
            let age = self.clock_ms - bolt.spawned_at_ms;
            let valid = bolt.pos.is_finite()
                && bolt.vel.is_finite()
                && (0.0..self.tuning.hostile_bolt_lifetime_ms).contains(&age);
            if !valid {
                return Err(RuleCode::HostileBoltState);
            }
        }

        for asteroid in &self.asteroids {
            if !asteroid.pos.is_finite() || !asteroid.vel.is_finite() || asteroid.size <= 0.0 {
                return Err(RuleCode::AsteroidState);
            }
            let health_consistent = match asteroid.destroyed_at_ms {
                None => (1..=3).contains(&asteroid.health),
                Some(_) => asteroid.health == 0,
            };
            if !health_consistent {
                return Err(RuleCode::AsteroidHealth);
            }
        }

        if !self.hostiles_unlocked && (!self.hostiles.is_empty() || !self.hostile_bolts.is_empty())
        {
            return Err(RuleCode::HostilesLocked);
        }

        for hostile in &self.hostiles {
            if !hostile.pos.is_finite() || !hostile.heading.is_finite() || hostile.size <= 0.0 {
                return Err(RuleCode::HostileState);
            }
            let health_consistent = match hostile.destroyed_at_ms {
                None => (1..=self.tuning.hostile_health).contains(&hostile.health),
                Some(_) => hostile.health == 0,
            };
            if !health_consistent {
                return Err(RuleCode::HostileHealth);
            }
        }

        match self.power_up {
            PowerUpPhase::Spawned(item) => {
                let in_view = item.pos.is_finite()
                    && (0.0..=viewport.width - POWERUP_SIZE).contains(&item.pos.x)
                    && (0.0..=viewport.height - POWERUP_SIZE).contains(&item.pos.y);
                if !in_view || item.spawned_at_ms > self.clock_ms {
                    return Err(RuleCode::PowerUpSlot);
                }
            }
            PowerUpPhase::Active {
                collected_at_ms, ..
            } => {
                if collected_at_ms > self.clock_ms {
                    return Err(RuleCode::PowerUpSlot);
                }
            }
            PowerUpPhase::Waiting { .. } | PowerUpPhase::Spawnable => {}
        }

        let expected_loadout = match self.power_up {
            PowerUpPhase::Active { kind, .. } => Loadout::with_effect(kind),
            _ => Loadout::BASE,
        };
        if self.loadout != expected_loadout {
            return Err(RuleCode::PowerUpLoadout);
        }

        Ok(())
    }

    pub(crate) fn world_snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            frame_count: self.frame_count,
            clock_ms: self.clock_ms,
            score: self.score,
            lives: self.lives,
            mode: self.mode,
            hostiles_unlocked: self.hostiles_unlocked,
            rng_state: self.rng.state(),
            ship: ShipSnapshot {
                x: self.ship.pos.x,
                y: self.ship.pos.y,
                vx: self.ship.vel.x,
                vy: self.ship.vel.y,
                heading: self.ship.heading,
                invincible: self.ship_is_invincible(),
                hit_cue: self.clock_ms < self.ship.hit_cue_until_ms,
                loadout: self.loadout,
            },
            projectiles: self
                .projectiles
                .iter()
                .map(|entry| ProjectileSnapshot {
                    x: entry.pos.x,
                    y: entry.pos.y,
                    vx: entry.vel.x,
                    vy: entry.vel.y,
                    age_ms: self.clock_ms - entry.spawned_at_ms,
                })
                .collect(),
            asteroids: self
                .asteroids
                .iter()
                .map(|entry| AsteroidSnapshot {
                    x: entry.pos.x,
                    y: entry.pos.y,
                    size: entry.size,
                    health: entry.health,
                    rotation: entry.rotation,
                    destroyed: !entry.is_intact(),
                })
                .collect(),
            hostiles: self
                .hostiles
                .iter()
                .map(|entry| HostileSnapshot {
                    x: entry.pos.x,
                    y: entry.pos.y,
                    size: entry.size,
                    health: entry.health,
                    heading: entry.heading,
                    destroyed: !entry.is_intact(),
                })
                .collect(),
            hostile_bolts: self
                .hostile_bolts
                .iter()
                .map(|entry| ProjectileSnapshot {
                    x: entry.pos.x,
                    y: entry.pos.y,
                    vx: entry.vel.x,
                    vy: entry.vel.y,
                    age_ms: self.clock_ms - entry.spawned_at_ms,
                })
                .collect(),
            power_up: match self.power_up {
                PowerUpPhase::Spawned(item) => Some(PowerUpSnapshot {
                    kind: item.kind,
                    x: item.pos.x,
                    y: item.pos.y,
                    size: POWERUP_SIZE,
                    age_ms: self.clock_ms - item.spawned_at_ms,
                }),
                _ => None,
            },
            active_effect: match self.power_up {
                PowerUpPhase::Active { kind, .. } => Some(kind),
                _ => None,
            },
        }
    }

    #[inline]
    pub(super) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
