/// Enemy formations: when to spawn one, how each enemy descends, and the
/// four-frame death animation.

use crate::config::EnemyConfig;
use crate::entities::{Enemy, Lifecycle};

/// Death animation advances before removal.
pub const EXPLOSION_FRAMES: u8 = 4;

/// A new wave is due once the previous one is fully gone and the cooldown
/// has elapsed.
pub fn wave_due(enemies: &[Enemy], cfg: &EnemyConfig, last_wave: u64, now: u64) -> bool {
    cfg.spawning_enabled
        && enemies.is_empty()
        && now.saturating_sub(last_wave) >= cfg.spawn_cooldown_ms
}

/// One horizontal line of `wave_size` enemies, centered, at the top edge.
pub fn spawn_wave(cfg: &EnemyConfig, arena_width: f32, now: u64) -> Vec<Enemy> {
    let n = cfg.wave_size;
    let left = arena_width / 2.0 - cfg.spacing * n as f32 / 2.0;
    (0..n)
        .map(|i| {
            let x = left + cfg.spacing * i as f32;
            Enemy::new(x, 0.0, cfg.speed, cfg.size, cfg.skin, now)
        })
        .collect()
}

/// Milliseconds between two downward steps; a faster enemy steps sooner.
pub fn step_interval(enemy: &Enemy, cfg: &EnemyConfig) -> u64 {
    (cfg.move_cadence_ms as f32 / enemy.speed.max(f32::EPSILON)) as u64
}

/// Advance one enemy: alive ones step down on their cadence, dying ones
/// play the explosion and are marked destroyed on the final advance.
pub fn advance(enemy: &mut Enemy, now: u64, cfg: &EnemyConfig) {
    let elapsed = now.saturating_sub(enemy.cooldown);
    match enemy.lifecycle {
        Lifecycle::Alive => {
            if elapsed > step_interval(enemy, cfg) {
                enemy.y += cfg.step;
                enemy.cooldown = now;
            }
        }
        Lifecycle::Dying => {
            if elapsed > cfg.explosion_frame_ms {
                enemy.cooldown = now;
                if enemy.explosion + 1 >= EXPLOSION_FRAMES {
                    enemy.lifecycle = Lifecycle::Destroyed;
                } else {
                    enemy.explosion += 1;
                }
            }
        }
        Lifecycle::Destroyed => {}
    }
}

/// Start the death animation. Only an alive enemy can be killed.
pub fn kill(enemy: &mut Enemy, now: u64) {
    if enemy.lifecycle != Lifecycle::Alive {
        return;
    }
    enemy.lifecycle = Lifecycle::Dying;
    enemy.explosion = 0;
    enemy.cooldown = now;
    log::debug!("enemy down at ({:.0}, {:.0})", enemy.x, enemy.y);
}
