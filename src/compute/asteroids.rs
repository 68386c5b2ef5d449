/// Asteroid field: edge spawns, drift and rotation, lifespan expiry and
/// fragmentation of large asteroids.

use rand::Rng;

use crate::collision::Rect;
use crate::config::{ArenaConfig, AsteroidConfig};
use crate::entities::{Asteroid, AsteroidSize, Lifecycle, Side};

/// Horizontal speed of a large asteroid, pixels per tick.
const CROSSING_SPEED: f32 = 1.0;

/// A large asteroid just outside a random side edge, headed for the
/// center line.
pub fn spawn_large(
    cfg: &AsteroidConfig,
    arena: &ArenaConfig,
    now: u64,
    rng: &mut impl Rng,
) -> Asteroid {
    let size = cfg.large_size;
    let side = if rng.gen_bool(0.5) { Side::Left } else { Side::Right };
    let (x, vx) = match side {
        Side::Left => (-size, CROSSING_SPEED),
        Side::Right => (arena.width, -CROSSING_SPEED),
    };
    let y = rng.gen_range(0.0..(arena.height - size).max(1.0));
    let vy = drift(rng, cfg.max_vertical_drift);
    Asteroid::new(x, y, size, AsteroidSize::Large, (vx, vy), Some(side), now)
}

/// Small asteroids left behind by `parent`. Small asteroids leave nothing.
pub fn fragment(
    parent: &Asteroid,
    cfg: &AsteroidConfig,
    now: u64,
    rng: &mut impl Rng,
) -> Vec<Asteroid> {
    if parent.kind == AsteroidSize::Small {
        return Vec::new();
    }
    let size = cfg.small_size;
    let x = parent.x + parent.size / 2.0 - size / 2.0;
    let y = parent.y + parent.size / 2.0 - size / 2.0;
    (0..cfg.fragment_count)
        .map(|_| {
            let velocity = (
                drift(rng, cfg.max_fragment_drift),
                drift(rng, cfg.max_fragment_drift),
            );
            Asteroid::new(x, y, size, AsteroidSize::Small, velocity, None, now)
        })
        .collect()
}

/// Whether the asteroid's lifespan is over at `now`.
pub fn expired(asteroid: &Asteroid, now: u64, cfg: &AsteroidConfig) -> bool {
    now.saturating_sub(asteroid.born) >= cfg.lifespan_ms
}

/// One tick of drift and rotation. Marks the asteroid destroyed once its
/// lifespan is over or it leaves the arena vertically.
pub fn advance(asteroid: &mut Asteroid, now: u64, cfg: &AsteroidConfig, arena_height: f32) {
    if !asteroid.is_alive() {
        return;
    }
    if expired(asteroid, now, cfg) {
        asteroid.lifecycle = Lifecycle::Destroyed;
        return;
    }

    asteroid.x += asteroid.vx;
    asteroid.y += asteroid.vy;
    if asteroid.y < -asteroid.size || asteroid.y > arena_height + asteroid.size {
        asteroid.lifecycle = Lifecycle::Destroyed;
        return;
    }

    asteroid.rotation = (asteroid.rotation + 1) % 360;
    asteroid.rect = Rect::new(asteroid.x, asteroid.y, asteroid.size, asteroid.size)
        .rotated(asteroid.rotation as f32);
}

fn drift(rng: &mut impl Rng, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-max..=max)
}
