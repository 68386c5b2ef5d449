/// Decorative parallax starfield. Stars never interact with anything.

use rand::Rng;

use crate::config::{ArenaConfig, StarConfig};
use crate::entities::Star;

pub fn spawn(cfg: &StarConfig, arena: &ArenaConfig, rng: &mut impl Rng) -> Vec<Star> {
    (0..cfg.count)
        .map(|_| {
            let x = rng.gen_range(0.0..arena.width);
            let y = rng.gen_range(0.0..arena.height);
            let factor = rng.gen::<f32>() + 0.5;
            Star::new(x, y, cfg.size, cfg.speed, factor)
        })
        .collect()
}

/// Scroll every star down, wrapping to the top once it leaves the bottom.
pub fn update(stars: &mut [Star], arena_height: f32) {
    for star in stars {
        star.y += star.speed;
        if star.y > arena_height {
            star.y = 0.0;
        }
    }
}
