/// All game entity types. Pure data plus constructors; behaviour lives in
/// `compute`.

use crate::collision::{HasBounds, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    /// Hit, playing the death animation. Only enemies use this.
    Dying,
    /// Marked this frame; removed by the sweep at the end of the tick.
    Destroyed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Horizontal facing. The discriminant is the hull sprite column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left = 0,
    Center = 1,
    Right = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsteroidSize {
    Large,
    Small,
}

// ── Starfield ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Pixels per tick.
    pub speed: f32,
}

impl Star {
    /// `factor` is the per-star random speed factor in `[0.5, 1.5)`.
    pub fn new(x: f32, y: f32, base_size: f32, base_speed: f32, factor: f32) -> Self {
        Self {
            x,
            y,
            size: base_size * factor,
            speed: (factor - 0.25) * base_speed,
        }
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// -1.0 travels up, 1.0 travels down.
    pub direction: f32,
    /// Sprite edge length.
    pub size: f32,
    pub hitbox: f32,
    pub skin: u8,
    pub owner: PlayerId,
    pub lifecycle: Lifecycle,
}

impl HasBounds for Projectile {
    fn bounds(&self) -> Rect {
        Rect::centered(
            self.x + self.size / 2.0,
            self.y + self.size / 2.0,
            self.hitbox * 2.0,
        )
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub size: f32,
    /// Sprite index 0..36 into the enemy block of the ships atlas.
    pub skin: u8,
    pub lifecycle: Lifecycle,
    /// Death animation frame, 0..=3.
    pub explosion: u8,
    /// Time of the last step or animation advance.
    pub cooldown: u64,
}

impl Enemy {
    pub fn new(x: f32, y: f32, speed: f32, size: f32, skin: u8, now: u64) -> Self {
        Self {
            x,
            y,
            speed,
            size,
            skin,
            lifecycle: Lifecycle::Alive,
            explosion: 0,
            cooldown: now,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lifecycle == Lifecycle::Alive
    }
}

impl HasBounds for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

// ── Asteroids ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Asteroid {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub kind: AsteroidSize,
    pub born: u64,
    pub vx: f32,
    pub vy: f32,
    /// Degrees, 0..360.
    pub rotation: u16,
    /// Edge a large asteroid entered from; fragments have none.
    pub origin: Option<Side>,
    pub lifecycle: Lifecycle,
    /// Rotated bounding box, refreshed every tick.
    pub rect: Rect,
}

impl Asteroid {
    pub fn new(
        x: f32,
        y: f32,
        size: f32,
        kind: AsteroidSize,
        velocity: (f32, f32),
        origin: Option<Side>,
        born: u64,
    ) -> Self {
        Self {
            x,
            y,
            size,
            kind,
            born,
            vx: velocity.0,
            vy: velocity.1,
            rotation: 0,
            origin,
            lifecycle: Lifecycle::Alive,
            rect: Rect::new(x, y, size, size),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lifecycle == Lifecycle::Alive
    }
}

impl HasBounds for Asteroid {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

// ── Players ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub facing: Facing,
    /// `None` hides the flame; otherwise intensity 0..=3.
    pub thrust: Option<u8>,
    pub last_thrust_change: u64,
    pub skin: u8,
    pub last_shot: Option<u64>,
    /// Flame animation frame, 0..=3.
    pub flame: u8,
    /// Inactive players are not updated, drawn or collided.
    pub active: bool,
}

impl Player {
    pub fn new(id: PlayerId, x: f32, y: f32, size: f32, speed: f32) -> Self {
        Self {
            id,
            x,
            y,
            size,
            speed,
            facing: Facing::Center,
            thrust: Some(0),
            last_thrust_change: 0,
            skin: 0,
            last_shot: None,
            flame: 0,
            active: id == PlayerId::One,
        }
    }
}

impl HasBounds for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}
