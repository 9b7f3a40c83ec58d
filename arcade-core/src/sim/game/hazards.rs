use super::*;

use core::f32::consts::TAU;

use tracing::{debug, info};

use crate::constants::{HOSTILE_SEPARATION_GAIN, WRAP_MARGIN_FACTOR};

/// Closer than this the pursuit direction is meaningless.
const PURSUIT_DEADZONE: f32 = 0.1;
const PURSUIT_JITTER: f32 = 1.0;

impl Game {
    pub(super) fn spawn_asteroid_wave(&mut self) {
        let count = self
            .rng
            .next_range_u32(self.tuning.asteroid_wave_min, self.tuning.asteroid_wave_max)
            .max(self.tuning.asteroid_wave_floor);

        for _ in 0..count {
            let asteroid = self.spawn_asteroid();
            self.asteroids.push(asteroid);
        }

        debug!(count, clock_ms = self.clock_ms, "asteroid wave spawned");
        self.push_event(GameEvent::AsteroidWaveSpawned { count });
    }

    fn spawn_asteroid(&mut self) -> Asteroid {
        let size = self
            .rng
            .next_range(self.tuning.asteroid_size_min, self.tuning.asteroid_size_max);
        let pos = self.edge_spawn_position(size);
        let angle = self.rng.next_range(0.0, TAU);
        let speed = self
            .rng
            .next_range(self.tuning.asteroid_speed_min, self.tuning.asteroid_speed_max);
        let spin_max = self.tuning.asteroid_spin_max_deg;
        let spin = self.rng.next_range(-spin_max, spin_max);
        let rotation = self.rng.next_range(0.0, 360.0);

        Asteroid {
            pos,
            vel: Vec2::from_angle(angle) * speed,
            size,
            health: asteroid_health_for_size(size),
            rotation,
            spin,
            destroyed_at_ms: None,
        }
    }

    /// Top-left anchor just past one of the four edges.
    fn edge_spawn_position(&mut self, size: f32) -> Vec2 {
        let width = self.tuning.viewport.width;
        let height = self.tuning.viewport.height;

        match self.rng.next_int(4) {
            0 => Vec2::new(self.rng.next_range(0.0, width), -size),
            1 => Vec2::new(width + size, self.rng.next_range(0.0, height)),
            2 => Vec2::new(self.rng.next_range(0.0, width), height + size),
            _ => Vec2::new(-size, self.rng.next_range(0.0, height)),
        }
    }

    /// Destroyed asteroids keep drifting without a hitbox until their
    /// linger window ends.
    pub(super) fn update_asteroids(&mut self, dt: f32) {
        let now = self.clock_ms;
        let linger = self.tuning.asteroid_linger_ms;
        let viewport = self.tuning.viewport;

        for asteroid in &mut self.asteroids {
            asteroid.pos += asteroid.vel * dt;
            asteroid.rotation = (asteroid.rotation + asteroid.spin * dt).rem_euclid(360.0);
            asteroid.pos = viewport.wrap_with_margin(asteroid.pos, asteroid.size * WRAP_MARGIN_FACTOR);
        }

        self.asteroids.retain(|entry| {
            entry
                .destroyed_at_ms
                .map_or(true, |destroyed_at| now - destroyed_at < linger)
        });
    }

    pub(super) fn enforce_asteroid_population(&mut self) {
        let live = self.asteroids.iter().filter(|entry| entry.is_intact()).count();
        if live < self.tuning.asteroid_min_population {
            self.spawn_asteroid_wave();
        }
    }

    /// Unlocking is one-way for the rest of the run.
    pub(super) fn check_hostile_unlock(&mut self) {
        if self.hostiles_unlocked || self.score < self.tuning.hostile_unlock_score {
            return;
        }

        self.hostiles_unlocked = true;
        info!(score = self.score, "hostile craft unlocked");
        self.push_event(GameEvent::HostilesUnlocked);
    }

    pub(super) fn spawn_hostile_wave(&mut self) {
        let count = self.tuning.hostile_wave_size;
        let size = self.tuning.hostile_size;

        for _ in 0..count {
            let pos = self.edge_spawn_position(size);
            self.hostiles.push(Hostile {
                pos,
                size,
                health: self.tuning.hostile_health,
                heading: 0.0,
                last_shot_ms: None,
                destroyed_at_ms: None,
            });
        }

        debug!(count, clock_ms = self.clock_ms, "hostile wave spawned");
        self.push_event(GameEvent::HostileWaveSpawned { count });
    }

    /// Pursuit, then pairwise separation, then wrap and fire. Destroyed
    /// hostiles hold still until their linger window ends.
    pub(super) fn update_hostiles(&mut self, dt: f32) {
        let now = self.clock_ms;
        let ship_pos = self.ship.pos;
        let speed = self.tuning.hostile_speed;

        for index in 0..self.hostiles.len() {
            if !self.hostiles[index].is_intact() {
                continue;
            }
            let to_ship = ship_pos - self.hostiles[index].center();
            let distance = to_ship.length();
            if distance > PURSUIT_DEADZONE {
                let direction = to_ship * (1.0 / distance);
                let hostile = &mut self.hostiles[index];
                hostile.pos += direction * (speed * dt);
                hostile.heading = direction.heading();
            } else {
                let jitter = Vec2::new(
                    self.rng.next_range(-PURSUIT_JITTER, PURSUIT_JITTER),
                    self.rng.next_range(-PURSUIT_JITTER, PURSUIT_JITTER),
                );
                self.hostiles[index].pos += jitter;
            }
        }

        self.separate_hostiles();

        let viewport = self.tuning.viewport;
        let fire_interval = self.tuning.hostile_fire_interval_ms;
        let bolt_speed = self.tuning.hostile_bolt_speed;
        for hostile in self.hostiles.iter_mut().filter(|entry| entry.is_intact()) {
            hostile.pos = viewport.wrap_with_margin(hostile.pos, hostile.size * WRAP_MARGIN_FACTOR);

            if hostile
                .last_shot_ms
                .is_some_and(|last_shot| now - last_shot < fire_interval)
            {
                continue;
            }
            let origin = hostile.center();
            // Aimed once at launch; bolts never steer afterwards.
            let Some(direction) = (ship_pos - origin).normalized() else {
                continue;
            };
            self.hostile_bolts.push(HostileBolt {
                pos: origin,
                vel: direction * bolt_speed,
                spawned_at_ms: now,
            });
            hostile.last_shot_ms = Some(now);
        }

        let linger = self.tuning.hostile_linger_ms;
        self.hostiles.retain(|entry| {
            entry
                .destroyed_at_ms
                .map_or(true, |destroyed_at| now - destroyed_at < linger)
        });
    }

    fn separate_hostiles(&mut self) {
        let separation = self.tuning.hostile_separation;
        let count = self.hostiles.len();

        for i in 0..count {
            for j in (i + 1)..count {
                if !self.hostiles[i].is_intact() || !self.hostiles[j].is_intact() {
                    continue;
                }
                let offset = self.hostiles[i].pos - self.hostiles[j].pos;
                let distance = offset.length();
                if distance <= 0.0 || distance >= separation {
                    continue;
                }
                let push = offset * ((separation - distance) / distance * HOSTILE_SEPARATION_GAIN);
                self.hostiles[i].pos += push;
                self.hostiles[j].pos -= push;
            }
        }
    }

    pub(super) fn enforce_hostile_population(&mut self) {
        let live = self.hostiles.iter().filter(|entry| entry.is_intact()).count();
        if live < self.tuning.hostile_min_population {
            self.spawn_hostile_wave();
        }
    }
}
