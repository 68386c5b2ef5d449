use star_shooter::collision::*;
use star_shooter::compute::player::MAX_THRUST;
use star_shooter::config::{ArenaConfig, PlayerConfig, ProjectileConfig};
use star_shooter::entities::*;

fn ship_at(x: f32, y: f32) -> Player {
    Player::new(PlayerId::One, x, y, 50.0, 5.0)
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn movement_stays_inside_boundary() {
    let arena = ArenaConfig::default();
    let cfg = PlayerConfig::default();
    let mut player = ship_at(245.0, 300.0);

    for direction in [Direction::Left, Direction::Right, Direction::Up, Direction::Down] {
        for step in 0..200 {
            player.move_in(direction, step * 16, &arena, &cfg);
            assert!(player.x >= 30.0 && player.x <= 460.0); // 540 - 50 - 30
            assert!(player.y >= 30.0 && player.y <= 640.0); // 720 - 50 - 30
        }
    }
    assert_eq!(player.x, 460.0);
    assert_eq!(player.y, 640.0);
}

#[test]
fn clamped_move_is_a_no_op() {
    let arena = ArenaConfig::default();
    let cfg = PlayerConfig::default();
    let mut player = ship_at(32.0, 300.0);

    player.move_in(Direction::Left, 0, &arena, &cfg);
    assert_eq!(player.x, 30.0);
    assert_eq!(player.facing, Facing::Left);

    player.stop_moving();
    player.move_in(Direction::Left, 16, &arena, &cfg);
    assert_eq!(player.x, 30.0);
    assert_eq!(player.facing, Facing::Center);
}

#[test]
fn sideways_move_sets_facing() {
    let arena = ArenaConfig::default();
    let cfg = PlayerConfig::default();
    let mut player = ship_at(245.0, 300.0);

    player.move_in(Direction::Right, 0, &arena, &cfg);
    assert_eq!(player.x, 250.0);
    assert_eq!(player.facing, Facing::Right);
    player.move_in(Direction::Left, 16, &arena, &cfg);
    assert_eq!(player.facing, Facing::Left);
    player.stop_moving();
    assert_eq!(player.facing, Facing::Center);
}

// ── Thrust ────────────────────────────────────────────────────────────────────

#[test]
fn thrust_rises_at_most_once_per_rate() {
    let arena = ArenaConfig::default();
    let cfg = PlayerConfig::default();
    let mut player = ship_at(245.0, 400.0);
    assert_eq!(player.thrust, Some(0));

    player.move_in(Direction::Up, 50, &arena, &cfg);
    assert_eq!(player.thrust, Some(0));
    assert_eq!(player.y, 395.0);

    player.move_in(Direction::Up, 101, &arena, &cfg);
    assert_eq!(player.thrust, Some(1));
    player.move_in(Direction::Up, 150, &arena, &cfg);
    assert_eq!(player.thrust, Some(1));
    player.move_in(Direction::Up, 202, &arena, &cfg);
    player.move_in(Direction::Up, 303, &arena, &cfg);
    player.move_in(Direction::Up, 404, &arena, &cfg);
    assert_eq!(player.thrust, Some(MAX_THRUST));
}

#[test]
fn moving_down_or_releasing_up_hides_flame() {
    let arena = ArenaConfig::default();
    let cfg = PlayerConfig::default();
    let mut player = ship_at(245.0, 400.0);

    player.move_in(Direction::Down, 0, &arena, &cfg);
    assert_eq!(player.thrust, None);

    player.move_in(Direction::Up, 500, &arena, &cfg);
    assert_eq!(player.thrust, Some(0));

    player.stop_thrust();
    assert_eq!(player.thrust, None);
}

// ── Skins and flame ───────────────────────────────────────────────────────────

#[test]
fn skin_is_clamped() {
    let mut player = ship_at(0.0, 0.0);
    player.change_skin(3, 4);
    assert_eq!(player.skin, 3);
    player.change_skin(9, 4);
    assert_eq!(player.skin, 4);
}

#[test]
fn flame_cycles_through_four_frames() {
    let mut player = ship_at(0.0, 0.0);
    let frames: Vec<u8> = (1..=75)
        .filter_map(|frame| {
            player.animate_flame(frame, 15);
            (frame % 15 == 0).then_some(player.flame)
        })
        .collect();
    assert_eq!(frames, vec![1, 2, 3, 0, 1]);
}

// ── Shooting ──────────────────────────────────────────────────────────────────

#[test]
fn fire_rate_gates_projectiles() {
    let cfg = PlayerConfig::default();
    let projectile = ProjectileConfig::default();
    let mut player = ship_at(245.0, 470.0);

    let fired: Vec<bool> = [0, 499, 500, 999, 1_000]
        .iter()
        .map(|&now| player.shoot(now, &cfg, &projectile).is_some())
        .collect();
    assert_eq!(fired, vec![true, false, true, false, true]);
    assert_eq!(player.last_shot, Some(1_000));
}

#[test]
fn projectile_starts_above_ship_center() {
    let mut player = ship_at(245.0, 470.0);
    let shot = player
        .shoot(0, &PlayerConfig::default(), &ProjectileConfig::default())
        .unwrap();
    let (cx, _) = shot.bounds().center();
    assert_eq!(cx, 270.0);
    assert_eq!(shot.direction, -1.0);
    assert_eq!(shot.bounds().w, 2.0);
}

// ── Collision ─────────────────────────────────────────────────────────────────

#[test]
fn collision_is_symmetric_and_strict() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(5.0, 5.0, 10.0, 10.0);
    let touching = Rect::new(10.0, 0.0, 10.0, 10.0);

    assert!(collides(&a, &b));
    assert!(collides(&b, &a));
    assert!(!collides(&a, &touching));
    assert!(!collides(&touching, &a));
}

#[test]
fn entities_collide_through_bounds() {
    let player = ship_at(100.0, 100.0);
    let enemy = Enemy::new(140.0, 140.0, 1.0, 60.0, 11, 0);
    let far = Enemy::new(300.0, 300.0, 1.0, 60.0, 11, 0);
    assert!(collides(&player, &enemy));
    assert!(!collides(&player, &far));
}

#[test]
fn rotated_bounds_grow_and_keep_center() {
    let square = Rect::new(0.0, 0.0, 48.0, 48.0);
    let turned = square.rotated(45.0);
    let diagonal = 48.0 * std::f32::consts::SQRT_2;

    assert!((turned.w - diagonal).abs() < 1e-3);
    assert!((turned.h - diagonal).abs() < 1e-3);
    let (cx, cy) = turned.center();
    assert!((cx - 24.0).abs() < 1e-3 && (cy - 24.0).abs() < 1e-3);

    let upright = square.rotated(0.0);
    assert!((upright.w - 48.0).abs() < 1e-3);
}

#[test]
fn collider_records_only_when_asked() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(50.0, 50.0, 10.0, 10.0);

    let mut quiet = Collider::new(false);
    assert!(!quiet.check(&a, &b));
    assert!(quiet.tested().is_empty());

    let mut recording = Collider::new(true);
    let mut same = a;
    let mut hit = false;
    recording.check_then(&a, &mut same, |_| hit = true);
    assert!(hit);
    assert_eq!(recording.into_tested(), vec![a, a]);
}

// ── Stars ─────────────────────────────────────────────────────────────────────

#[test]
fn star_speed_and_size_follow_factor() {
    let slow = Star::new(0.0, 0.0, 2.0, 2.0, 0.5);
    let fast = Star::new(0.0, 0.0, 2.0, 2.0, 1.5);
    assert_eq!(slow.size, 1.0);
    assert_eq!(slow.speed, 0.5);
    assert_eq!(fast.size, 3.0);
    assert_eq!(fast.speed, 2.5);
}
