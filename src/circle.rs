//! Circle rasterizers.
//!
//! Each drawer takes a center and a point on the rim; the radius is their
//! Euclidean distance. Output pixels are absolute canvas coordinates.

use std::f64::consts::TAU;

use crate::error::{RasterError, Result};
use crate::point2d::{Pixel, round_half_up};

/// Reference angular step (radians) of the parametric drawer.
pub const PARAMETRIC_CIRCLE_STEP: f64 = 0.01;
/// Smallest accepted angular step, about six million samples per turn.
pub const MIN_PARAMETRIC_CIRCLE_STEP: f64 = 1e-6;
/// Rotation applied per iteration by the symmetric drawer, in radians.
pub const SYMMETRIC_CIRCLE_STEP: f64 = 1.0;
pub const SYMMETRIC_CIRCLE_ITERATIONS: usize = 360;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleAlgorithm {
    Normal,
    Parametric,
    Bresenham,
    Symmetric,
}

impl CircleAlgorithm {
    pub fn rasterize(self, center: Pixel, edge: Pixel) -> Vec<Pixel> {
        match self {
            CircleAlgorithm::Normal => draw_normal_circle(center, edge),
            CircleAlgorithm::Parametric => {
                sample_parametric(center, center.distance(edge), PARAMETRIC_CIRCLE_STEP)
            }
            CircleAlgorithm::Bresenham => draw_bresenham_circle(center, edge),
            CircleAlgorithm::Symmetric => draw_symmetric_circle(center, edge),
        }
    }
}

/// `y = ±sqrt(r² - x²)` for every integer `x` across the diameter.
///
/// Sampling is dense near the poles and sparse near the equator.
pub fn draw_normal_circle(center: Pixel, edge: Pixel) -> Vec<Pixel> {
    let radius = center.distance(edge);
    if radius == 0.0 {
        return vec![center];
    }
    let reach = radius.floor() as i32;
    let mut points = Vec::with_capacity((2 * reach as usize + 1) * 2);
    for x in -reach..=reach {
        let y = round_half_up((radius * radius - (x * x) as f64).sqrt());
        points.push(center.offset(x, y));
        points.push(center.offset(x, -y));
    }
    points
}

/// `(r cos θ, r sin θ)` for `θ` in `[0, 2π)` at the given step.
pub fn draw_parametric_circle(center: Pixel, edge: Pixel, step: f64) -> Result<Vec<Pixel>> {
    if !(step >= MIN_PARAMETRIC_CIRCLE_STEP && step.is_finite()) {
        return Err(RasterError::parameter(
            "step",
            format!("{step} is below the minimum angle {MIN_PARAMETRIC_CIRCLE_STEP}"),
        ));
    }
    Ok(sample_parametric(center, center.distance(edge), step))
}

fn sample_parametric(center: Pixel, radius: f64, step: f64) -> Vec<Pixel> {
    if radius == 0.0 {
        return vec![center];
    }
    let samples = (TAU / step).ceil() as usize;
    (0..samples)
        .map(|i| i as f64 * step)
        .take_while(|theta| *theta < TAU)
        .map(|theta| {
            center.offset(
                round_half_up(radius * theta.cos()),
                round_half_up(radius * theta.sin()),
            )
        })
        .collect()
}

/// Midpoint circle with integer decision variable, radius rounded to the
/// nearest pixel. Emits the eight symmetric points of every step, starting
/// with the axis points.
pub fn draw_bresenham_circle(center: Pixel, edge: Pixel) -> Vec<Pixel> {
    let radius = round_half_up(center.distance(edge));
    if radius == 0 {
        return vec![center];
    }

    let mut x = 0;
    let mut y = radius;
    let mut h = 1 - radius;
    let mut delta_e = 3;
    let mut delta_se = -2 * radius + 5;

    let mut points = Vec::with_capacity(8 * (radius as usize + 1));
    push_octants(&mut points, center, x, y);
    while y > x {
        if h < 0 {
            h += delta_e;
            delta_e += 2;
            delta_se += 2;
        } else {
            h += delta_se;
            delta_e += 2;
            delta_se += 4;
            y -= 1;
        }
        x += 1;
        push_octants(&mut points, center, x, y);
    }
    points
}

fn push_octants(points: &mut Vec<Pixel>, c: Pixel, x: i32, y: i32) {
    points.extend_from_slice(&[
        c.offset(x, y),
        c.offset(x, -y),
        c.offset(-x, y),
        c.offset(-x, -y),
        c.offset(y, x),
        c.offset(y, -x),
        c.offset(-y, x),
        c.offset(-y, -x),
    ]);
}

/// Rotates `(r, 0)` by one radian at a time with a 2x2 rotation matrix.
///
/// The rotated point is fed back each iteration, so float error accumulates
/// and the trace is not guaranteed to close exactly.
pub fn draw_symmetric_circle(center: Pixel, edge: Pixel) -> Vec<Pixel> {
    let radius = center.distance(edge);
    if radius == 0.0 {
        return vec![center];
    }
    let (sin, cos) = SYMMETRIC_CIRCLE_STEP.sin_cos();
    let mut x = radius;
    let mut y = 0.0;
    let mut points = Vec::with_capacity(SYMMETRIC_CIRCLE_ITERATIONS);
    for _ in 0..SYMMETRIC_CIRCLE_ITERATIONS {
        points.push(center.offset(round_half_up(x), round_half_up(y)));
        let rotated_x = x * cos - y * sin;
        y = x * sin + y * cos;
        x = rotated_x;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rounded_distance(c: Pixel, p: Pixel) -> i32 {
        round_half_up(c.distance(p))
    }

    #[test]
    fn bresenham_radius_five_stays_on_rim() {
        let center = Pixel::new(10, -3);
        let points = draw_bresenham_circle(center, Pixel::new(13, 1));
        assert!(points.contains(&Pixel::new(10, 2)));
        assert!(points.contains(&Pixel::new(5, -3)));
        for p in &points {
            assert_eq!(rounded_distance(center, *p), 5, "{p:?}");
        }
    }

    #[test]
    fn bresenham_first_octant_matches_midpoint_reference() {
        // r = 10 first octant from the classic midpoint walk.
        let expected = [(0, 10), (1, 10), (2, 10), (3, 10), (4, 9), (5, 9), (6, 8), (7, 7)];
        let points = draw_bresenham_circle(Pixel::new(0, 0), Pixel::new(10, 0));
        let firsts: Vec<(i32, i32)> = points.chunks(8).map(|c| (c[0].x, c[0].y)).collect();
        assert_eq!(firsts, expected);
    }

    #[test]
    fn zero_radius_is_single_pixel() {
        let c = Pixel::new(4, 4);
        for algorithm in [
            CircleAlgorithm::Normal,
            CircleAlgorithm::Parametric,
            CircleAlgorithm::Bresenham,
            CircleAlgorithm::Symmetric,
        ] {
            assert_eq!(algorithm.rasterize(c, c), vec![c], "{algorithm:?}");
        }
    }

    #[test]
    fn normal_circle_pairs_upper_and_lower() {
        let center = Pixel::new(0, 0);
        let points = draw_normal_circle(center, Pixel::new(0, 4));
        assert_eq!(points.len(), 18);
        assert_eq!(points[0], Pixel::new(-4, 0));
        assert!(points.contains(&Pixel::new(0, 4)));
        assert!(points.contains(&Pixel::new(0, -4)));
        assert!(points.contains(&Pixel::new(2, 3)));
    }

    #[test]
    fn parametric_sample_count_follows_step() {
        let c = Pixel::new(0, 0);
        let points = draw_parametric_circle(c, Pixel::new(20, 0), PARAMETRIC_CIRCLE_STEP).unwrap();
        assert_eq!(points.len(), 629);
        assert_eq!(points[0], Pixel::new(20, 0));
        let coarse = draw_parametric_circle(c, Pixel::new(20, 0), 1.0).unwrap();
        assert_eq!(coarse.len(), 7);
        assert!(draw_parametric_circle(c, Pixel::new(1, 0), 0.0).is_err());
        assert!(draw_parametric_circle(c, Pixel::new(1, 0), 1e-13).is_err());
        assert!(draw_parametric_circle(c, Pixel::new(1, 0), MIN_PARAMETRIC_CIRCLE_STEP).is_ok());
    }

    #[test]
    fn symmetric_circle_runs_full_iteration_count() {
        let c = Pixel::new(50, 50);
        let points = draw_symmetric_circle(c, Pixel::new(80, 50));
        assert_eq!(points.len(), SYMMETRIC_CIRCLE_ITERATIONS);
        assert_eq!(points[0], Pixel::new(80, 50));
        for p in &points {
            assert!((c.distance(*p) - 30.0).abs() < 1.5, "{p:?}");
        }
    }
}
