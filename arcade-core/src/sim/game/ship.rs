use super::*;

use crate::constants::SHIP_FRICTION_REFERENCE_FPS;

impl Ship {
    pub(super) fn spawn(center: Vec2) -> Self {
        Self {
            pos: center,
            vel: Vec2::ZERO,
            heading: 0.0,
            invincible_until_ms: 0.0,
            hit_cue_until_ms: 0.0,
            last_shot_ms: None,
        }
    }
}

impl Game {
    pub(super) fn update_ship(&mut self, input: FrameInput, fire: bool, dt: f32) {
        let controllable = matches!(self.mode, GameMode::Playing);

        if controllable {
            let turn = match (input.left, input.right) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            };
            self.ship.heading = (self.ship.heading
                + turn * self.tuning.ship_rotation_speed_deg * dt)
                .rem_euclid(360.0);

            if input.thrust {
                let thrust = self.current_thrust();
                self.ship.vel += Vec2::from_heading(self.ship.heading) * (thrust * dt);
            }
        }

        // Friction is expressed per reference frame and scaled to the step.
        let damping = self
            .tuning
            .ship_friction
            .powf(dt * SHIP_FRICTION_REFERENCE_FPS);
        self.ship.vel = self.ship.vel * damping;
        self.ship.pos = self
            .tuning
            .viewport
            .wrap(self.ship.pos + self.ship.vel * dt);

        if controllable && fire {
            self.try_fire();
        }
    }

    pub(super) fn current_thrust(&self) -> f32 {
        match self.loadout.engine {
            EngineState::Base => self.tuning.ship_thrust,
            EngineState::Supercharged => self.tuning.ship_supercharged_thrust,
        }
    }

    pub(super) fn weapon_damage(&self) -> u32 {
        match self.loadout.weapon {
            WeaponKind::Base => self.tuning.base_weapon_damage,
            WeaponKind::SpaceGun => self.tuning.upgraded_weapon_damage,
        }
    }

    #[inline]
    pub(super) fn ship_hitbox(&self) -> Rect {
        let side = self.tuning.ship_hitbox_size;
        Rect::centered(self.ship.pos, side, side)
    }
}
