use star_shooter::collision::Rect;
use star_shooter::compute::World;
use star_shooter::config::Config;
use star_shooter::draw::*;
use star_shooter::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn quiet_world() -> World {
    let mut config = Config::default();
    config.enemies.spawning_enabled = false;
    config.asteroids.spawning_enabled = false;
    config.stars.count = 3;
    World::new(config, 0, &mut StdRng::seed_from_u64(42))
}

/// Keeps every command it is handed.
#[derive(Default)]
struct Recorder {
    drawn: Vec<DrawCommand>,
    presented: usize,
}

impl Renderer for Recorder {
    fn draw(&mut self, command: &DrawCommand) -> std::io::Result<()> {
        self.drawn.push(command.clone());
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.presented += 1;
        Ok(())
    }
}

fn sprite_atlas(command: &DrawCommand) -> Option<Atlas> {
    match command {
        DrawCommand::Sprite { region, .. } => Some(region.atlas),
        _ => None,
    }
}

// ── Frame order ───────────────────────────────────────────────────────────────

#[test]
fn frame_is_painted_back_to_front() {
    let mut world = quiet_world();
    world.enemies.push(Enemy::new(100.0, 100.0, 1.0, 60.0, 11, 0));
    world.asteroids.push(Asteroid::new(
        300.0,
        100.0,
        48.0,
        AsteroidSize::Large,
        (0.0, 0.0),
        None,
        0,
    ));
    world.shoot(PlayerId::One, 0);

    let commands = frame(&world, "SCORE: 0");

    assert!(matches!(
        commands[0],
        DrawCommand::Fill {
            fill: Fill::Background,
            ..
        }
    ));
    assert!(commands[1..4]
        .iter()
        .all(|c| matches!(c, DrawCommand::Fill { fill: Fill::Star, .. })));

    let atlases: Vec<Atlas> = commands.iter().filter_map(sprite_atlas).collect();
    assert_eq!(
        atlases,
        vec![
            Atlas::Projectiles,
            Atlas::Ships, // enemy
            Atlas::Misc,  // flame
            Atlas::Ships, // hull
            Atlas::Misc,  // asteroid
        ]
    );

    assert_eq!(
        commands.last(),
        Some(&DrawCommand::Text {
            x: LABEL_POS.0,
            y: LABEL_POS.1,
            text: "SCORE: 0".to_string(),
        })
    );
}

#[test]
fn parked_player_two_is_not_drawn() {
    let mut world = quiet_world();
    let hulls = |world: &World| {
        frame(world, "")
            .iter()
            .filter(|c| {
                matches!(c, DrawCommand::Sprite { region, .. }
                    if region.atlas == Atlas::Ships && region.col < 3)
            })
            .count()
    };
    assert_eq!(hulls(&world), 1);

    world.activate_player_two();
    assert_eq!(hulls(&world), 2);
}

#[test]
fn render_draws_everything_then_presents_once() {
    let world = quiet_world();
    let mut recorder = Recorder::default();
    render(&world, "SCORE: 7", &mut recorder).unwrap();
    assert_eq!(recorder.drawn, frame(&world, "SCORE: 7"));
    assert_eq!(recorder.presented, 1);
}

// ── Sprites ───────────────────────────────────────────────────────────────────

#[test]
fn flame_follows_thrust_and_facing() {
    let mut player = Player::new(PlayerId::One, 100.0, 200.0, 50.0, 5.0);
    player.thrust = Some(2);
    player.flame = 1;
    player.facing = Facing::Left;
    player.skin = 3;

    let sprites = player_sprites(&player);
    assert_eq!(sprites.len(), 2);
    match &sprites[0] {
        DrawCommand::Sprite { region, rect, .. } => {
            assert_eq!(region.atlas, Atlas::Misc);
            assert_eq!((region.col, region.row), (6, 2));
            assert_eq!(region.nudge, 1);
            assert_eq!(*rect, Rect::new(97.0, 244.0, 50.0, 50.0));
        }
        other => panic!("expected flame sprite, got {:?}", other),
    }
    match &sprites[1] {
        DrawCommand::Sprite { region, .. } => {
            assert_eq!(region.atlas, Atlas::Ships);
            assert_eq!((region.col, region.row), (0, 3));
        }
        other => panic!("expected hull sprite, got {:?}", other),
    }

    player.stop_thrust();
    assert_eq!(player_sprites(&player).len(), 1);
}

#[test]
fn dying_enemy_shows_explosion_frame() {
    let mut world = quiet_world();
    let mut enemy = Enemy::new(100.0, 100.0, 1.0, 60.0, 11, 0);
    enemy.lifecycle = Lifecycle::Dying;
    enemy.explosion = 2;
    world.enemies.push(enemy);

    let region = frame(&world, "")
        .iter()
        .find_map(|c| match c {
            DrawCommand::Sprite { region, rect, .. } if rect.x == 100.0 => Some(*region),
            _ => None,
        })
        .unwrap();
    assert_eq!(region, SpriteRegion::new(Atlas::Misc, 10, 6));
}

#[test]
fn enemy_skin_maps_into_ship_block() {
    let region = SpriteRegion::new(Atlas::Ships, 4 + 11 % 6, 11 / 6);
    assert_eq!((region.col, region.row), (9, 1));
    assert_eq!(region.texel_origin(), (72, 8));

    let nudged = SpriteRegion {
        nudge: -1,
        ..SpriteRegion::new(Atlas::Misc, 5, 0)
    };
    assert_eq!(nudged.texel_origin(), (39, 0));
}

// ── Hitboxes ─────────────────────────────────────────────────────────────────

#[test]
fn outlines_only_when_hitboxes_shown() {
    let mut world = quiet_world();
    world.hitboxes = vec![Rect::new(0.0, 0.0, 10.0, 10.0)];

    let outlines = |world: &World| {
        frame(world, "")
            .iter()
            .filter(|c| matches!(c, DrawCommand::Outline { .. }))
            .count()
    };
    assert_eq!(outlines(&world), 0);

    world.show_hitboxes = true;
    assert_eq!(outlines(&world), 1);
}
