/// Read-only draw pass.
///
/// Turns a `World` into a list of `DrawCommand`s in painter's order. The
/// renderer behind the `Renderer` trait knows nothing about gameplay; it
/// only places sprite cells, fills and text.

use crate::collision::Rect;
use crate::compute::World;
use crate::entities::{Asteroid, Enemy, Facing, Lifecycle, Player, Projectile};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Atlas {
    Ships,
    Projectiles,
    Misc,
}

/// One 8×8 texel cell of an atlas. `nudge` shifts the source window
/// sideways by whole texels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteRegion {
    pub atlas: Atlas,
    pub col: u16,
    pub row: u16,
    pub nudge: i8,
}

impl SpriteRegion {
    pub const CELL: i32 = 8;

    pub fn new(atlas: Atlas, col: u16, row: u16) -> Self {
        Self {
            atlas,
            col,
            row,
            nudge: 0,
        }
    }

    /// Top-left texel of the region.
    pub fn texel_origin(&self) -> (i32, i32) {
        (
            self.col as i32 * Self::CELL + self.nudge as i32,
            self.row as i32 * Self::CELL,
        )
    }
}

// Atlas layout.
const ENEMY_FIRST_COL: u16 = 4;
const ENEMY_SKINS_PER_ROW: u16 = 6;
const FLAME_FIRST_COL: u16 = 5;
const EXPLOSION_FIRST_COL: u16 = 8;
const EXPLOSION_ROW: u16 = 6;
const ASTEROID_CELL: (u16, u16) = (1, 3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    Background,
    Star,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Draw `region` scaled into `rect`, rotated by `rotation` degrees.
    Sprite {
        region: SpriteRegion,
        rect: Rect,
        rotation: u16,
    },
    Fill {
        rect: Rect,
        fill: Fill,
    },
    /// Hitbox outline.
    Outline {
        rect: Rect,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
    },
}

pub trait Renderer {
    fn draw(&mut self, command: &DrawCommand) -> std::io::Result<()>;
    fn present(&mut self) -> std::io::Result<()>;
}

/// Score label position, arena-local.
pub const LABEL_POS: (f32, f32) = (8.0, 8.0);

/// Everything visible this frame: background, stars, projectiles, enemies,
/// active players, asteroids, hitboxes, then the score label.
pub fn frame(world: &World, label: &str) -> Vec<DrawCommand> {
    let arena = &world.config.arena;
    let mut commands = vec![DrawCommand::Fill {
        rect: Rect::new(0.0, 0.0, arena.width, arena.height),
        fill: Fill::Background,
    }];

    commands.extend(world.stars.iter().map(|star| DrawCommand::Fill {
        rect: Rect::new(star.x, star.y, star.size, star.size),
        fill: Fill::Star,
    }));
    commands.extend(world.projectiles.iter().map(projectile_sprite));
    commands.extend(world.enemies.iter().map(enemy_sprite));
    for player in world.active_players() {
        commands.extend(player_sprites(player));
    }
    commands.extend(world.asteroids.iter().map(asteroid_sprite));

    if world.show_hitboxes {
        let outlines = world.hitboxes.iter().map(|rect| DrawCommand::Outline { rect: *rect });
        commands.extend(outlines);
    }

    commands.push(DrawCommand::Text {
        x: LABEL_POS.0,
        y: LABEL_POS.1,
        text: label.to_string(),
    });
    commands
}

/// Run the draw pass through `renderer` and present it.
pub fn render<R: Renderer>(world: &World, label: &str, renderer: &mut R) -> std::io::Result<()> {
    for command in frame(world, label) {
        renderer.draw(&command)?;
    }
    renderer.present()
}

// ── Sprites ──────────────────────────────────────────────────────────────────

fn projectile_sprite(projectile: &Projectile) -> DrawCommand {
    DrawCommand::Sprite {
        region: SpriteRegion::new(Atlas::Projectiles, projectile.skin as u16, 0),
        rect: Rect::new(projectile.x, projectile.y, projectile.size, projectile.size),
        rotation: 0,
    }
}

fn enemy_sprite(enemy: &Enemy) -> DrawCommand {
    let skin = enemy.skin as u16;
    let region = if enemy.lifecycle == Lifecycle::Dying && enemy.explosion > 0 {
        SpriteRegion::new(
            Atlas::Misc,
            EXPLOSION_FIRST_COL + enemy.explosion as u16,
            EXPLOSION_ROW,
        )
    } else {
        SpriteRegion::new(
            Atlas::Ships,
            ENEMY_FIRST_COL + skin % ENEMY_SKINS_PER_ROW,
            skin / ENEMY_SKINS_PER_ROW,
        )
    };
    DrawCommand::Sprite {
        region,
        rect: Rect::new(enemy.x, enemy.y, enemy.size, enemy.size),
        rotation: 0,
    }
}

/// Flame first (when thrust is on), hull on top.
pub fn player_sprites(player: &Player) -> Vec<DrawCommand> {
    let mut sprites = Vec::with_capacity(2);

    if let Some(level) = player.thrust {
        let nudge = match player.facing {
            Facing::Left => 1,
            Facing::Center => 0,
            Facing::Right => -1,
        };
        let region = SpriteRegion {
            nudge,
            ..SpriteRegion::new(Atlas::Misc, FLAME_FIRST_COL + player.flame as u16, level as u16)
        };
        sprites.push(DrawCommand::Sprite {
            region,
            rect: Rect::new(
                player.x - 3.0,
                player.y + player.size - 6.0,
                player.size,
                player.size,
            ),
            rotation: 0,
        });
    }

    sprites.push(DrawCommand::Sprite {
        region: SpriteRegion::new(Atlas::Ships, player.facing as u16, player.skin as u16),
        rect: Rect::new(player.x, player.y, player.size, player.size),
        rotation: 0,
    });
    sprites
}

fn asteroid_sprite(asteroid: &Asteroid) -> DrawCommand {
    DrawCommand::Sprite {
        region: SpriteRegion::new(Atlas::Misc, ASTEROID_CELL.0, ASTEROID_CELL.1),
        rect: Rect::new(asteroid.x, asteroid.y, asteroid.size, asteroid.size),
        rotation: asteroid.rotation,
    }
}
