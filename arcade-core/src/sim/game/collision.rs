use super::*;

use tracing::info;

impl Game {
    /// Each projectile strikes at most one asteroid and is spent by it.
    pub(super) fn resolve_projectile_asteroid_hits(&mut self) {
        let mut projectiles = std::mem::take(&mut self.projectiles);
        projectiles.retain(|projectile| !self.strike_asteroid(projectile));
        self.projectiles = projectiles;
    }

    pub(super) fn resolve_projectile_hostile_hits(&mut self) {
        let mut projectiles = std::mem::take(&mut self.projectiles);
        projectiles.retain(|projectile| !self.strike_hostile(projectile));
        self.projectiles = projectiles;
    }

    fn strike_asteroid(&mut self, projectile: &Projectile) -> bool {
        let rect = self.projectile_rect(projectile);
        let now = self.clock_ms;
        let Some(asteroid) = self
            .asteroids
            .iter_mut()
            .find(|entry| entry.is_intact() && entry.hitbox().intersects(&rect))
        else {
            return false;
        };

        asteroid.health = asteroid.health.saturating_sub(1);
        if asteroid.health == 0 {
            asteroid.destroyed_at_ms = Some(now);
            self.award(HazardKind::Asteroid, projectile.damage);
        }
        true
    }

    fn strike_hostile(&mut self, projectile: &Projectile) -> bool {
        let rect = self.projectile_rect(projectile);
        let now = self.clock_ms;
        let Some(hostile) = self
            .hostiles
            .iter_mut()
            .find(|entry| entry.is_intact() && entry.hitbox().intersects(&rect))
        else {
            return false;
        };

        hostile.health = hostile.health.saturating_sub(1);
        if hostile.health == 0 {
            hostile.destroyed_at_ms = Some(now);
            self.award(
                HazardKind::Hostile,
                projectile
                    .damage
                    .saturating_add(self.tuning.hostile_kill_bonus),
            );
        }
        true
    }

    fn award(&mut self, kind: HazardKind, points: u32) {
        self.score = self.score.saturating_add(points);
        self.push_event(GameEvent::HazardDestroyed { kind, points });
    }

    /// Ship against intact hazards and hostile bolts. A bolt that touches the
    /// ship is spent even while the ship cannot take damage. At most one
    /// life is lost per tick.
    pub(super) fn resolve_ship_contacts(&mut self) {
        if !matches!(self.mode, GameMode::Playing) {
            return;
        }

        let ship_rect = self.ship_hitbox();
        let mut contact = self
            .asteroids
            .iter()
            .any(|entry| entry.is_intact() && entry.hitbox().overlaps(&ship_rect))
            || self
                .hostiles
                .iter()
                .any(|entry| entry.is_intact() && entry.hitbox().overlaps(&ship_rect));

        let bolts_before = self.hostile_bolts.len();
        self.hostile_bolts
            .retain(|bolt| !bolt.rect().overlaps(&ship_rect));
        contact |= self.hostile_bolts.len() != bolts_before;

        if contact {
            self.damage_ship();
        }
    }

    #[inline]
    pub(super) fn ship_is_invincible(&self) -> bool {
        !matches!(self.mode, GameMode::Playing)
            || self.loadout.shielded
            || self.clock_ms < self.ship.invincible_until_ms
    }

    pub(super) fn damage_ship(&mut self) -> bool {
        if self.ship_is_invincible() {
            return false;
        }

        let now = self.clock_ms;
        self.lives = self.lives.saturating_sub(1);
        self.ship.hit_cue_until_ms = now + self.tuning.ship_hit_cue_ms;
        self.push_event(GameEvent::ShipHit {
            lives_left: self.lives,
        });

        if self.lives == 0 {
            self.mode = GameMode::Dying {
                ends_at_ms: now + self.tuning.ship_death_sequence_ms,
            };
            self.push_event(GameEvent::ShipDestroyed);
        } else {
            self.ship.invincible_until_ms = now + self.tuning.ship_invincible_ms;
        }
        true
    }

    pub(super) fn finish_death_sequence(&mut self) {
        let GameMode::Dying { ends_at_ms } = self.mode else {
            return;
        };
        if self.clock_ms < ends_at_ms {
            return;
        }

        self.mode = GameMode::Over;
        info!(score = self.score, frames = self.frame_count, "game over");
        self.push_event(GameEvent::GameOver {
            final_score: self.score,
        });
    }
}
