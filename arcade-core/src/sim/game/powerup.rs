use super::*;

use tracing::debug;

impl Game {
    /// Advances the single power-up slot by at most one phase per tick.
    pub(super) fn update_power_up(&mut self) {
        let now = self.clock_ms;

        match self.power_up {
            PowerUpPhase::Waiting { ready_at_ms } => {
                if now >= ready_at_ms {
                    self.power_up = PowerUpPhase::Spawnable;
                }
            }
            PowerUpPhase::Spawnable => self.spawn_power_up(),
            PowerUpPhase::Spawned(item) => {
                let collectable = matches!(self.mode, GameMode::Playing)
                    && item.rect().overlaps(&self.ship_hitbox());
                if collectable {
                    self.collect_power_up(item.kind);
                } else if now - item.spawned_at_ms >= self.tuning.powerup_item_timeout_ms {
                    debug!(kind = ?item.kind, "power-up expired uncollected");
                    self.rearm_power_up();
                    self.push_event(GameEvent::PowerUpExpired { kind: item.kind });
                }
            }
            PowerUpPhase::Active {
                kind,
                collected_at_ms,
            } => {
                if now - collected_at_ms >= self.tuning.powerup_effect_ms {
                    self.loadout = Loadout::BASE;
                    debug!(?kind, "power-up effect reverted");
                    self.rearm_power_up();
                    self.push_event(GameEvent::PowerUpReverted { kind });
                }
            }
        }
    }

    fn spawn_power_up(&mut self) {
        let kind = PowerUpKind::ALL[self.rng.next_int(PowerUpKind::ALL.len() as u32) as usize];
        let max_x = (self.tuning.viewport.width - POWERUP_SIZE).max(0.0);
        let max_y = (self.tuning.viewport.height - POWERUP_SIZE).max(0.0);
        let pos = Vec2::new(self.rng.next_range(0.0, max_x), self.rng.next_range(0.0, max_y));

        self.power_up = PowerUpPhase::Spawned(PowerUpItem {
            kind,
            pos,
            spawned_at_ms: self.clock_ms,
        });
        debug!(?kind, x = pos.x, y = pos.y, "power-up spawned");
        self.push_event(GameEvent::PowerUpSpawned { kind });
    }

    fn collect_power_up(&mut self, kind: PowerUpKind) {
        self.loadout = Loadout::with_effect(kind);
        self.power_up = PowerUpPhase::Active {
            kind,
            collected_at_ms: self.clock_ms,
        };
        debug!(?kind, "power-up collected");
        self.push_event(GameEvent::PowerUpCollected { kind });
    }

    fn rearm_power_up(&mut self) {
        self.power_up = PowerUpPhase::Waiting {
            ready_at_ms: self.clock_ms + self.tuning.powerup_spawn_delay_ms,
        };
    }
}
