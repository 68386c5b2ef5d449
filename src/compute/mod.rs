/// Game logic for one session.
///
/// `World` owns every entity collection and advances them one tick at a
/// time. All randomness comes through an injected `Rng` and all time through
/// a plain millisecond timestamp, so a seeded RNG plus a scripted clock gives
/// a fully reproducible run.

use rand::Rng;

use crate::collision::{Collider, Rect};
use crate::config::Config;
use crate::entities::{
    Asteroid, AsteroidSize, Direction, Enemy, Lifecycle, Player, PlayerId, Projectile, Star,
};

pub mod asteroids;
pub mod player;
pub mod stars;
pub mod waves;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossCause {
    EnemyReachedBottom,
    EnemyHitPlayer(PlayerId),
    AsteroidHitPlayer(PlayerId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Loss(LossCause),
    Quit,
}

#[derive(Clone, Debug)]
pub struct World {
    pub config: Config,
    pub stars: Vec<Star>,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub asteroids: Vec<Asteroid>,
    pub players: [Player; 2],
    pub frame: u64,
    pub last_wave: u64,
    pub last_asteroid: u64,
    pub show_hitboxes: bool,
    /// Boxes tested during the last tick, filled only when `show_hitboxes`.
    pub hitboxes: Vec<Rect>,
}

// ── Constructors ─────────────────────────────────────────────────────────────

impl World {
    /// Fresh session at time `now`: a full starfield, player one centered
    /// near the bottom, player two parked beside it and inactive.
    pub fn new(config: Config, now: u64, rng: &mut impl Rng) -> Self {
        let arena = &config.arena;
        let size = config.player.size;
        let speed = config.player.speed;
        let y = arena.height - size * 5.0;
        let one = Player::new(PlayerId::One, arena.width / 2.0 - size / 2.0, y, size, speed);
        let two = Player::new(PlayerId::Two, arena.width / 2.0 + size, y, size, speed);

        let stars = stars::spawn(&config.stars, arena, rng);
        let show_hitboxes = config.session.show_hitboxes;

        Self {
            stars,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            asteroids: Vec::new(),
            players: [one, two],
            frame: 0,
            last_wave: now,
            last_asteroid: now,
            show_hitboxes,
            hitboxes: Vec::new(),
            config,
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.active)
    }
}

// ── Player commands ──────────────────────────────────────────────────────────

impl World {
    pub fn move_player(&mut self, id: PlayerId, direction: Direction, now: u64) {
        let (arena, cfg) = (&self.config.arena, &self.config.player);
        let player = &mut self.players[id.index()];
        if player.active {
            player.move_in(direction, now, arena, cfg);
        }
    }

    pub fn stop_moving(&mut self, id: PlayerId) {
        self.player_mut(id).stop_moving();
    }

    pub fn stop_thrust(&mut self, id: PlayerId) {
        self.player_mut(id).stop_thrust();
    }

    pub fn change_skin(&mut self, id: PlayerId, skin: u8) {
        let max = self.config.player.skins.saturating_sub(1);
        self.player_mut(id).change_skin(skin, max);
    }

    /// Fire if the player is active and off cooldown. Returns whether a
    /// projectile was spawned.
    pub fn shoot(&mut self, id: PlayerId, now: u64) -> bool {
        let (player_cfg, projectile_cfg) = (&self.config.player, &self.config.projectile);
        let player = &mut self.players[id.index()];
        if !player.active {
            return false;
        }
        match player.shoot(now, player_cfg, projectile_cfg) {
            Some(projectile) => {
                self.projectiles.push(projectile);
                true
            }
            None => false,
        }
    }

    /// Bring player two into the session. Returns false if already active.
    pub fn activate_player_two(&mut self) -> bool {
        let two = self.player_mut(PlayerId::Two);
        if two.active {
            return false;
        }
        two.active = true;
        log::info!("player two joined");
        true
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

impl World {
    /// Advance the simulation by one tick.
    ///
    /// Order: spawners, stars, projectiles (with their hits on enemies and
    /// asteroids), enemies, players, asteroids, then the sweep. The first
    /// loss detected this tick is reported; the rest of the tick still runs.
    pub fn tick(&mut self, now: u64, rng: &mut impl Rng) -> TickOutcome {
        self.frame += 1;
        self.run_spawners(now, rng);

        stars::update(&mut self.stars, self.config.arena.height);

        let mut collider = Collider::new(self.show_hitboxes);
        let fragments = self.update_projectiles(now, &mut collider, rng);
        let enemy_loss = self.update_enemies(now, &mut collider);
        self.update_players();
        let asteroid_loss = self.update_asteroids(now, &mut collider);

        self.asteroids.extend(fragments);
        self.sweep();
        self.hitboxes = collider.into_tested();

        match enemy_loss.or(asteroid_loss) {
            Some(cause) => {
                log::info!("loss on frame {}: {:?}", self.frame, cause);
                TickOutcome::Loss(cause)
            }
            None => TickOutcome::Running,
        }
    }

    fn run_spawners(&mut self, now: u64, rng: &mut impl Rng) {
        let enemy_cfg = &self.config.enemies;
        if waves::wave_due(&self.enemies, enemy_cfg, self.last_wave, now) {
            let wave = waves::spawn_wave(enemy_cfg, self.config.arena.width, now);
            log::debug!("spawning wave of {} at {}ms", wave.len(), now);
            self.enemies.extend(wave);
            self.last_wave = now;
        }

        let asteroid_cfg = &self.config.asteroids;
        if asteroid_cfg.spawning_enabled
            && now.saturating_sub(self.last_asteroid) >= asteroid_cfg.spawn_interval_ms
        {
            let asteroid = asteroids::spawn_large(asteroid_cfg, &self.config.arena, now, rng);
            log::trace!("asteroid from {:?} at y={:.0}", asteroid.origin, asteroid.y);
            self.asteroids.push(asteroid);
            self.last_asteroid = now;
        }
    }

    /// Move projectiles and resolve their hits. Returns the fragments of
    /// large asteroids destroyed this tick.
    fn update_projectiles(
        &mut self,
        now: u64,
        collider: &mut Collider,
        rng: &mut impl Rng,
    ) -> Vec<Asteroid> {
        let arena_height = self.config.arena.height;
        let asteroid_cfg = &self.config.asteroids;
        let mut fragments = Vec::new();

        for projectile in self.projectiles.iter_mut() {
            if projectile.lifecycle != Lifecycle::Alive {
                continue;
            }
            projectile.y += projectile.speed * projectile.direction;
            if projectile.y + projectile.size < 0.0 || projectile.y > arena_height {
                projectile.lifecycle = Lifecycle::Destroyed;
                continue;
            }
            if !self.players[projectile.owner.index()].active {
                continue;
            }

            for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
                if collider.check_then(&*projectile, enemy, |e| {
                    waves::kill(e, now);
                }) {
                    projectile.lifecycle = Lifecycle::Destroyed;
                    break;
                }
            }
            if projectile.lifecycle != Lifecycle::Alive {
                continue;
            }

            // Asteroids whose lifespan ran out this tick are gone already.
            let live = self
                .asteroids
                .iter_mut()
                .filter(|a| a.is_alive() && !asteroids::expired(a, now, asteroid_cfg));
            for asteroid in live {
                if collider.check_then(&*projectile, asteroid, |a| {
                    a.lifecycle = Lifecycle::Destroyed
                }) {
                    projectile.lifecycle = Lifecycle::Destroyed;
                    if asteroid.kind == AsteroidSize::Large {
                        let pieces = asteroids::fragment(asteroid, asteroid_cfg, now, rng);
                        log::debug!("asteroid split into {}", pieces.len());
                        fragments.extend(pieces);
                    }
                    break;
                }
            }
        }

        fragments
    }

    fn update_enemies(&mut self, now: u64, collider: &mut Collider) -> Option<LossCause> {
        let arena_height = self.config.arena.height;
        let mut loss = None;

        for enemy in self.enemies.iter_mut() {
            waves::advance(enemy, now, &self.config.enemies);
            if !enemy.is_alive() {
                continue;
            }
            if enemy.y > arena_height {
                loss.get_or_insert(LossCause::EnemyReachedBottom);
            }
            for player in self.players.iter().filter(|p| p.active) {
                if collider.check(player, &*enemy) {
                    loss.get_or_insert(LossCause::EnemyHitPlayer(player.id));
                }
            }
        }

        loss
    }

    fn update_players(&mut self) {
        let rate = self.config.player.flame_update_rate;
        let frame = self.frame;
        for player in self.players.iter_mut().filter(|p| p.active) {
            player.animate_flame(frame, rate);
        }
    }

    fn update_asteroids(&mut self, now: u64, collider: &mut Collider) -> Option<LossCause> {
        let arena_height = self.config.arena.height;
        let mut loss = None;

        for asteroid in self.asteroids.iter_mut() {
            asteroids::advance(asteroid, now, &self.config.asteroids, arena_height);
            if !asteroid.is_alive() {
                continue;
            }
            for player in self.players.iter().filter(|p| p.active) {
                if collider.check(player, &*asteroid) {
                    loss.get_or_insert(LossCause::AsteroidHitPlayer(player.id));
                }
            }
        }

        loss
    }

    /// Drop everything marked destroyed this tick.
    fn sweep(&mut self) {
        self.projectiles.retain(|p| p.lifecycle != Lifecycle::Destroyed);
        self.enemies.retain(|e| e.lifecycle != Lifecycle::Destroyed);
        self.asteroids.retain(|a| a.lifecycle != Lifecycle::Destroyed);
    }
}
