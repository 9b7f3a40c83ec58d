use serde::{Deserialize, Serialize};

use crate::constants::{
    ASTEROID_HITBOX_SCALE, ASTEROID_TIER_HEAVY_SIZE, ASTEROID_TIER_MEDIUM_SIZE,
    HOSTILE_BOLT_SIZE, HOSTILE_HITBOX_SCALE, POWERUP_SIZE,
};
use crate::geometry::{Rect, Vec2};

mod game;

pub(crate) use game::Game;

/// Lifecycle of the world inside one run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GameMode {
    Playing,
    /// Last life lost; the wreck plays out until `ends_at_ms`.
    Dying { ends_at_ms: f64 },
    Over,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Asteroid,
    Hostile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    Engine,
    Shield,
    Weapon,
}

impl PowerUpKind {
    pub const ALL: [Self; 3] = [Self::Engine, Self::Shield, Self::Weapon];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    #[default]
    Base,
    Supercharged,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    #[default]
    Base,
    SpaceGun,
}

/// Equipment the power-up manager swaps in and out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub engine: EngineState,
    pub weapon: WeaponKind,
    pub shielded: bool,
}

impl Loadout {
    pub const BASE: Self = Self {
        engine: EngineState::Base,
        weapon: WeaponKind::Base,
        shielded: false,
    };

    pub fn with_effect(kind: PowerUpKind) -> Self {
        match kind {
            PowerUpKind::Engine => Self {
                engine: EngineState::Supercharged,
                ..Self::BASE
            },
            PowerUpKind::Shield => Self {
                shielded: true,
                ..Self::BASE
            },
            PowerUpKind::Weapon => Self {
                weapon: WeaponKind::SpaceGun,
                ..Self::BASE
            },
        }
    }
}

/// Things that happened during one tick, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    ShotFired,
    HazardDestroyed { kind: HazardKind, points: u32 },
    ShipHit { lives_left: u8 },
    ShipDestroyed,
    AsteroidWaveSpawned { count: u32 },
    HostileWaveSpawned { count: u32 },
    HostilesUnlocked,
    PowerUpSpawned { kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    PowerUpReverted { kind: PowerUpKind },
    GameOver { final_score: u32 },
}

#[derive(Clone, Copy, Debug)]
struct Ship {
    pos: Vec2,
    vel: Vec2,
    heading: f32,
    invincible_until_ms: f64,
    hit_cue_until_ms: f64,
    last_shot_ms: Option<f64>,
}

#[derive(Clone, Copy, Debug)]
struct Projectile {
    pos: Vec2,
    vel: Vec2,
    spawned_at_ms: f64,
    damage: u32,
}

#[derive(Clone, Copy, Debug)]
struct HostileBolt {
    pos: Vec2,
    vel: Vec2,
    spawned_at_ms: f64,
}

/// Hazards are anchored at their top-left corner like sprites.
#[derive(Clone, Copy, Debug)]
struct Asteroid {
    pos: Vec2,
    vel: Vec2,
    size: f32,
    health: u8,
    rotation: f32,
    spin: f32,
    destroyed_at_ms: Option<f64>,
}

#[derive(Clone, Copy, Debug)]
struct Hostile {
    pos: Vec2,
    size: f32,
    health: u8,
    heading: f32,
    /// `None` until the first bolt, which is fired on the first update.
    last_shot_ms: Option<f64>,
    destroyed_at_ms: Option<f64>,
}

#[derive(Clone, Copy, Debug)]
struct PowerUpItem {
    kind: PowerUpKind,
    pos: Vec2,
    spawned_at_ms: f64,
}

#[derive(Clone, Copy, Debug)]
enum PowerUpPhase {
    Waiting { ready_at_ms: f64 },
    Spawnable,
    Spawned(PowerUpItem),
    Active { kind: PowerUpKind, collected_at_ms: f64 },
}

impl Asteroid {
    #[inline]
    fn is_intact(&self) -> bool {
        self.destroyed_at_ms.is_none()
    }

    #[inline]
    fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.size * 0.5, self.size * 0.5)
    }

    #[inline]
    fn hitbox(&self) -> Rect {
        let side = self.size * ASTEROID_HITBOX_SCALE;
        Rect::centered(self.center(), side, side)
    }
}

impl Hostile {
    #[inline]
    fn is_intact(&self) -> bool {
        self.destroyed_at_ms.is_none()
    }

    #[inline]
    fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.size * 0.5, self.size * 0.5)
    }

    #[inline]
    fn hitbox(&self) -> Rect {
        let side = self.size * HOSTILE_HITBOX_SCALE;
        Rect::centered(self.center(), side, side)
    }
}

impl HostileBolt {
    #[inline]
    fn rect(&self) -> Rect {
        Rect::centered(self.pos, HOSTILE_BOLT_SIZE, HOSTILE_BOLT_SIZE)
    }
}

impl PowerUpItem {
    #[inline]
    fn rect(&self) -> Rect {
        Rect::from_origin(self.pos, POWERUP_SIZE, POWERUP_SIZE)
    }
}

fn asteroid_health_for_size(size: f32) -> u8 {
    if size >= ASTEROID_TIER_HEAVY_SIZE {
        3
    } else if size >= ASTEROID_TIER_MEDIUM_SIZE {
        2
    } else {
        1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipSnapshot {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub heading: f32,
    pub invincible: bool,
    pub hit_cue: bool,
    pub loadout: Loadout,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub age_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AsteroidSnapshot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub health: u8,
    pub rotation: f32,
    pub destroyed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostileSnapshot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub health: u8,
    pub heading: f32,
    pub destroyed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerUpSnapshot {
    pub kind: PowerUpKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub age_ms: f64,
}

/// Plain-data view of the world for a presentation-sync step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub frame_count: u32,
    pub clock_ms: f64,
    pub score: u32,
    pub lives: u8,
    pub mode: GameMode,
    pub hostiles_unlocked: bool,
    pub rng_state: u32,
    pub ship: ShipSnapshot,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub asteroids: Vec<AsteroidSnapshot>,
    pub hostiles: Vec<HostileSnapshot>,
    pub hostile_bolts: Vec<ProjectileSnapshot>,
    pub power_up: Option<PowerUpSnapshot>,
    pub active_effect: Option<PowerUpKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_tiers_follow_size_thresholds() {
        assert_eq!(asteroid_health_for_size(230.0), 3);
        assert_eq!(asteroid_health_for_size(220.0), 3);
        assert_eq!(asteroid_health_for_size(210.0), 3);
        assert_eq!(asteroid_health_for_size(209.9), 2);
        assert_eq!(asteroid_health_for_size(175.0), 2);
        assert_eq!(asteroid_health_for_size(174.9), 1);
        assert_eq!(asteroid_health_for_size(140.0), 1);
    }

    #[test]
    fn each_effect_changes_exactly_one_slot() {
        for kind in PowerUpKind::ALL {
            let loadout = Loadout::with_effect(kind);
            let changed = [
                loadout.engine != EngineState::Base,
                loadout.weapon != WeaponKind::Base,
                loadout.shielded,
            ];
            assert_eq!(changed.iter().filter(|c| **c).count(), 1, "{kind:?}");
        }
    }

    #[test]
    fn events_serialize_with_type_tags() {
        let json = serde_json::to_string(&GameEvent::HazardDestroyed {
            kind: HazardKind::Hostile,
            points: 400,
        })
        .expect("event serializes");
        assert_eq!(
            json,
            r#"{"type":"hazard_destroyed","kind":"hostile","points":400}"#
        );
    }
}
