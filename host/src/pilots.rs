//! Scripted pilots that stand in for a human at the controls.

use arcade_core::geometry::Vec2;
use arcade_core::sim::WorldSnapshot;
use arcade_core::FrameInput;

pub trait Pilot {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn reset(&mut self, seed: u32);
    fn next_input(&mut self, world: &WorldSnapshot) -> FrameInput;
}

pub fn pilot_ids() -> Vec<&'static str> {
    vec!["idle", "turret", "hunter"]
}

pub fn describe_pilots() -> Vec<(&'static str, &'static str)> {
    vec![
        ("idle", "Never touches the controls."),
        ("turret", "Spins in place and holds the trigger."),
        ("hunter", "Turns toward the nearest hazard, closes distance and fires when aligned."),
    ]
}

pub fn create_pilot(id: &str) -> Option<Box<dyn Pilot>> {
    match id {
        "idle" => Some(Box::new(IdlePilot)),
        "turret" => Some(Box::new(TurretPilot::default())),
        "hunter" => Some(Box::new(HunterPilot::default())),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct IdlePilot;

impl Pilot for IdlePilot {
    fn id(&self) -> &'static str {
        "idle"
    }

    fn description(&self) -> &'static str {
        "Never touches the controls."
    }

    fn reset(&mut self, _seed: u32) {}

    fn next_input(&mut self, _world: &WorldSnapshot) -> FrameInput {
        FrameInput::IDLE
    }
}

/// Turns clockwise, reversing direction every `sweep_frames` frames.
#[derive(Debug)]
pub struct TurretPilot {
    sweep_frames: u32,
    frames: u32,
    clockwise: bool,
}

impl Default for TurretPilot {
    fn default() -> Self {
        Self {
            sweep_frames: 240,
            frames: 0,
            clockwise: true,
        }
    }
}

impl Pilot for TurretPilot {
    fn id(&self) -> &'static str {
        "turret"
    }

    fn description(&self) -> &'static str {
        "Spins in place and holds the trigger."
    }

    fn reset(&mut self, seed: u32) {
        self.frames = 0;
        self.clockwise = seed & 1 == 0;
    }

    fn next_input(&mut self, _world: &WorldSnapshot) -> FrameInput {
        self.frames += 1;
        if self.frames % self.sweep_frames == 0 {
            self.clockwise = !self.clockwise;
        }
        FrameInput {
            left: !self.clockwise,
            right: self.clockwise,
            thrust: false,
            fire: true,
        }
    }
}

#[derive(Debug)]
pub struct HunterPilot {
    fire_tolerance_deg: f32,
    approach_distance: f32,
    max_cruise_speed: f32,
}

impl Default for HunterPilot {
    fn default() -> Self {
        Self {
            fire_tolerance_deg: 12.0,
            approach_distance: 380.0,
            max_cruise_speed: 140.0,
        }
    }
}

impl HunterPilot {
    fn nearest_target(world: &WorldSnapshot, ship: Vec2) -> Option<Vec2> {
        let asteroids = world
            .asteroids
            .iter()
            .filter(|entry| !entry.destroyed)
            .map(|entry| Vec2::new(entry.x + entry.size / 2.0, entry.y + entry.size / 2.0));
        let hostiles = world
            .hostiles
            .iter()
            .filter(|entry| !entry.destroyed)
            .map(|entry| Vec2::new(entry.x + entry.size / 2.0, entry.y + entry.size / 2.0));

        asteroids
            .chain(hostiles)
            .min_by(|a, b| (*a - ship).length().total_cmp(&(*b - ship).length()))
    }
}

impl Pilot for HunterPilot {
    fn id(&self) -> &'static str {
        "hunter"
    }

    fn description(&self) -> &'static str {
        "Turns toward the nearest hazard, closes distance and fires when aligned."
    }

    fn reset(&mut self, _seed: u32) {}

    fn next_input(&mut self, world: &WorldSnapshot) -> FrameInput {
        let ship = Vec2::new(world.ship.x, world.ship.y);
        let Some(target) = Self::nearest_target(world, ship) else {
            return FrameInput::IDLE;
        };

        let offset = target - ship;
        let error = heading_error(world.ship.heading, offset.heading());
        let speed = Vec2::new(world.ship.vx, world.ship.vy).length();
        let aligned = error.abs() <= self.fire_tolerance_deg;

        FrameInput {
            left: error < -self.fire_tolerance_deg / 2.0,
            right: error > self.fire_tolerance_deg / 2.0,
            thrust: aligned
                && offset.length() > self.approach_distance
                && speed < self.max_cruise_speed,
            fire: aligned,
        }
    }
}

/// Signed turn in degrees from `current` to `desired`, in `[-180, 180)`.
/// Positive means clockwise.
pub fn heading_error(current: f32, desired: f32) -> f32 {
    (desired - current + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_core::{Session, Tuning};

    fn world() -> WorldSnapshot {
        let mut session = Session::new(Tuning::default(), 11).unwrap();
        session.start();
        session.tick(0.0, FrameInput::IDLE);
        session.snapshot()
    }

    #[test]
    fn registry_matches_descriptions() {
        let described: Vec<_> = describe_pilots().into_iter().map(|(id, _)| id).collect();
        assert_eq!(described, pilot_ids());
        for (id, description) in describe_pilots() {
            let pilot = create_pilot(id).unwrap();
            assert_eq!(pilot.id(), id);
            assert_eq!(pilot.description(), description);
        }
        assert!(create_pilot("ghost").is_none());
    }

    #[test]
    fn heading_error_takes_the_short_way_round() {
        assert_eq!(heading_error(0.0, 90.0), 90.0);
        assert_eq!(heading_error(10.0, 350.0), -20.0);
        assert_eq!(heading_error(350.0, 10.0), 20.0);
        assert_eq!(heading_error(0.0, -90.0), -90.0);
    }

    #[test]
    fn hunter_turns_toward_a_hazard_to_its_right() {
        let mut world = world();
        world.hostiles.clear();
        world.asteroids.truncate(1);
        let target = &mut world.asteroids[0];
        target.destroyed = false;
        target.size = 100.0;
        target.x = world.ship.x + 200.0;
        target.y = world.ship.y - 50.0;

        let input = HunterPilot::default().next_input(&world);
        assert!(input.right);
        assert!(!input.left);
        assert!(!input.fire);
    }

    #[test]
    fn hunter_fires_when_aligned() {
        let mut world = world();
        world.hostiles.clear();
        world.asteroids.truncate(1);
        let target = &mut world.asteroids[0];
        target.destroyed = false;
        target.size = 100.0;
        target.x = world.ship.x - 50.0;
        target.y = world.ship.y - 250.0;

        let input = HunterPilot::default().next_input(&world);
        assert!(input.fire);
        assert!(!input.left && !input.right);
        assert!(!input.thrust);
    }

    #[test]
    fn hunter_idles_without_targets() {
        let mut world = world();
        world.asteroids.clear();
        world.hostiles.clear();
        assert!(HunterPilot::default().next_input(&world).is_idle());
    }

    #[test]
    fn turret_reverses_its_sweep() {
        let world = world();
        let mut turret = TurretPilot::default();
        turret.reset(0);
        let first = turret.next_input(&world);
        assert!(first.right && first.fire);
        for _ in 1..239 {
            turret.next_input(&world);
        }
        let flipped = turret.next_input(&world);
        assert!(flipped.left && !flipped.right);
    }
}
