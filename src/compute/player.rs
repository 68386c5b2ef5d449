/// Player operations: movement with thrust, facing, skins and the
/// rate-limited gun.

use crate::config::{ArenaConfig, PlayerConfig, ProjectileConfig};
use crate::entities::{Direction, Facing, Lifecycle, Player, Projectile};

/// Highest thrust intensity.
pub const MAX_THRUST: u8 = 3;

impl Player {
    /// Step `speed` pixels in `direction`, clamped to the arena interior
    /// minus the boundary margin. A step the clamp swallows entirely is a
    /// no-op and leaves facing and thrust untouched.
    pub fn move_in(
        &mut self,
        direction: Direction,
        now: u64,
        arena: &ArenaConfig,
        cfg: &PlayerConfig,
    ) {
        let min = arena.boundary;
        let max_x = arena.width - self.size - arena.boundary;
        let max_y = arena.height - self.size - arena.boundary;

        match direction {
            Direction::Up => {
                let y = within(self.y - self.speed, min, max_y);
                if y == self.y {
                    return;
                }
                self.y = y;
                if now.saturating_sub(self.last_thrust_change) > cfg.flame_thrust_rate_ms {
                    self.thrust = Some(match self.thrust {
                        Some(level) => (level + 1).min(MAX_THRUST),
                        None => 0,
                    });
                    self.last_thrust_change = now;
                }
            }
            Direction::Down => {
                let y = within(self.y + self.speed, min, max_y);
                if y == self.y {
                    return;
                }
                self.y = y;
                self.thrust = None;
            }
            Direction::Left => {
                let x = within(self.x - self.speed, min, max_x);
                if x == self.x {
                    return;
                }
                self.x = x;
                self.facing = Facing::Left;
            }
            Direction::Right => {
                let x = within(self.x + self.speed, min, max_x);
                if x == self.x {
                    return;
                }
                self.x = x;
                self.facing = Facing::Right;
            }
        }
    }

    pub fn stop_moving(&mut self) {
        self.facing = Facing::Center;
    }

    /// Hide the flame until thrust is applied again.
    pub fn stop_thrust(&mut self) {
        self.thrust = None;
    }

    pub fn change_skin(&mut self, skin: u8, max_skin: u8) {
        self.skin = skin.min(max_skin);
    }

    /// Spawn a projectile unless the last shot is still inside the
    /// cooldown window.
    pub fn shoot(
        &mut self,
        now: u64,
        cfg: &PlayerConfig,
        projectile: &ProjectileConfig,
    ) -> Option<Projectile> {
        if let Some(last) = self.last_shot {
            if now.saturating_sub(last) < cfg.shoot_rate_ms {
                return None;
            }
        }
        self.last_shot = Some(now);

        Some(Projectile {
            x: self.x + self.size / 2.0 - projectile.size / 2.0,
            y: self.y - projectile.size / 2.0,
            speed: projectile.speed,
            direction: -1.0,
            size: projectile.size,
            hitbox: projectile.hitbox,
            skin: 0,
            owner: self.id,
            lifecycle: Lifecycle::Alive,
        })
    }

    /// Cycle the flame frame 0..=3 on ticks divisible by `rate`.
    pub fn animate_flame(&mut self, frame: u64, rate: u64) {
        if rate == 0 || frame % rate != 0 {
            return;
        }
        self.flame = (self.flame + 1) % 4;
    }
}

/// Like `f32::clamp`, but never panics on an inverted range.
fn within(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
