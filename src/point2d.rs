use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub, Mul, Div};

/// Projected screen-space coordinate.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

/// Integer canvas pixel, the unit every rasterizer emits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Pixel {
        Pixel { x: self.x + dx, y: self.y + dy }
    }

    pub fn distance(self, other: Pixel) -> f64 {
        let dx = (other.x - self.x) as f64;
        let dy = (other.y - self.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Pixel {
    fn from((x, y): (i32, i32)) -> Self {
        Pixel { x, y }
    }
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Snap to the nearest pixel, halves rounding up.
    pub fn to_pixel(self) -> Pixel {
        Pixel { x: round_half_up(self.x), y: round_half_up(self.y) }
    }
}

impl From<Pixel> for Point2D {
    fn from(p: Pixel) -> Self {
        Point2D { x: p.x as f64, y: p.y as f64 }
    }
}

impl Add for Point2D {
    type Output = Point2D;
    fn add(self, other: Point2D) -> Point2D {
        Point2D { x: self.x + other.x, y: self.y + other.y }
    }
}

impl Sub for Point2D {
    type Output = Point2D;
    fn sub(self, other: Point2D) -> Point2D {
        Point2D { x: self.x - other.x, y: self.y - other.y }
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;
    fn mul(self, scalar: f64) -> Point2D {
        Point2D { x: self.x * scalar, y: self.y * scalar }
    }
}

impl Div<f64> for Point2D {
    type Output = Point2D;
    fn div(self, scalar: f64) -> Point2D {
        Point2D { x: self.x / scalar, y: self.y / scalar }
    }
}

// f64::round goes away from zero on .5, which would make -2.5 and 2.5 land
// on mirror-asymmetric pixels.
#[inline(always)]
pub fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}
