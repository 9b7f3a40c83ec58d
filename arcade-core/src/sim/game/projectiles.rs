use super::*;

impl Game {
    /// Honors a fire request when the cooldown since the last accepted shot
    /// has elapsed. The very first shot of a run is always accepted.
    pub(super) fn try_fire(&mut self) -> bool {
        if !matches!(self.mode, GameMode::Playing) {
            return false;
        }

        let now = self.clock_ms;
        if let Some(last) = self.ship.last_shot_ms {
            if now - last < self.tuning.shot_cooldown_ms {
                return false;
            }
        }

        let direction = Vec2::from_heading(self.ship.heading);
        let projectile = Projectile {
            pos: self.ship.pos + direction * self.tuning.projectile_muzzle_offset,
            vel: direction * self.tuning.projectile_speed,
            spawned_at_ms: now,
            damage: self.weapon_damage(),
        };
        self.projectiles.push(projectile);
        self.ship.last_shot_ms = Some(now);
        self.push_event(GameEvent::ShotFired);
        true
    }

    pub(super) fn update_projectiles(&mut self, dt: f32) {
        let now = self.clock_ms;
        let lifetime = self.tuning.projectile_lifetime_ms;
        let viewport = self.tuning.viewport;

        self.projectiles.retain_mut(|projectile| {
            projectile.pos += projectile.vel * dt;
            now - projectile.spawned_at_ms < lifetime
                && !viewport.is_outside(projectile.pos, OFFSCREEN_PADDING)
        });
    }

    pub(super) fn update_hostile_bolts(&mut self, dt: f32) {
        let now = self.clock_ms;
        let lifetime = self.tuning.hostile_bolt_lifetime_ms;
        let viewport = self.tuning.viewport;

        self.hostile_bolts.retain_mut(|bolt| {
            bolt.pos += bolt.vel * dt;
            now - bolt.spawned_at_ms < lifetime && !viewport.is_outside(bolt.pos, OFFSCREEN_PADDING)
        });
    }

    #[inline]
    pub(super) fn projectile_rect(&self, projectile: &Projectile) -> Rect {
        let side = self.tuning.projectile_size;
        Rect::centered(projectile.pos, side, side)
    }
}
