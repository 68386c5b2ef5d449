/// The single collision primitive: axis-aligned rectangle overlap.
///
/// Every collidable entity exposes its box through `HasBounds`. Rotating
/// asteroids keep a precomputed rotated box, so the check never needs to
/// know which kind of entity it is looking at.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `side` centered on (`cx`, `cy`).
    pub fn centered(cx: f32, cy: f32, side: f32) -> Self {
        Self::new(cx - side / 2.0, cy - side / 2.0, side, side)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Axis-aligned box around this rectangle rotated `degrees` about its center.
    pub fn rotated(&self, degrees: f32) -> Rect {
        let theta = degrees.to_radians();
        let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
        let w = self.w * cos + self.h * sin;
        let h = self.w * sin + self.h * cos;
        let (cx, cy) = self.center();
        Rect::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }
}

pub trait HasBounds {
    fn bounds(&self) -> Rect;
}

impl HasBounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

pub fn collides<A: HasBounds + ?Sized, B: HasBounds + ?Sized>(a: &A, b: &B) -> bool {
    a.bounds().intersects(&b.bounds())
}

/// Runs collision checks for one frame, optionally recording every box it
/// looked at so the draw pass can outline them.
#[derive(Debug, Default)]
pub struct Collider {
    record: bool,
    tested: Vec<Rect>,
}

impl Collider {
    pub fn new(record: bool) -> Self {
        Self {
            record,
            tested: Vec::new(),
        }
    }

    pub fn check<A: HasBounds + ?Sized, B: HasBounds + ?Sized>(&mut self, a: &A, b: &B) -> bool {
        let (ra, rb) = (a.bounds(), b.bounds());
        if self.record {
            self.tested.push(ra);
            self.tested.push(rb);
        }
        ra.intersects(&rb)
    }

    /// `check`, then hand `b` to `on_hit` when the two overlap.
    pub fn check_then<A, B, F>(&mut self, a: &A, b: &mut B, on_hit: F) -> bool
    where
        A: HasBounds + ?Sized,
        B: HasBounds + ?Sized,
        F: FnOnce(&mut B),
    {
        let hit = self.check(a, b);
        if hit {
            on_hit(b);
        }
        hit
    }

    pub fn tested(&self) -> &[Rect] {
        &self.tested
    }

    pub fn into_tested(self) -> Vec<Rect> {
        self.tested
    }
}
