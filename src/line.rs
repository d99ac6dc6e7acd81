//! Line rasterizers.
//!
//! Every drawer takes two integer endpoints and returns the covered pixels,
//! both endpoints included.

use crate::error::{RasterError, Result};
use crate::point2d::{Pixel, round_half_up};

/// Reference sampling step of the fixed-step parametric drawer.
pub const PARAMETRIC_LINE_STEP: f64 = 0.001;
/// Smallest accepted `t` step; caps a segment at a million samples.
pub const MIN_PARAMETRIC_LINE_STEP: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAlgorithm {
    Linear,
    Bresenham,
    Parametric,
}

impl LineAlgorithm {
    pub fn rasterize(self, a: Pixel, b: Pixel) -> Vec<Pixel> {
        match self {
            LineAlgorithm::Linear => draw_linear_line(a, b),
            LineAlgorithm::Bresenham => draw_bresenham_line(a, b),
            LineAlgorithm::Parametric => draw_parametric_line(a, b),
        }
    }
}

/// Slope-based line: step the dominant axis, round the other one.
///
/// Output always runs in increasing order of the dominant axis.
pub fn draw_linear_line(a: Pixel, b: Pixel) -> Vec<Pixel> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    if dx == 0 && dy == 0 {
        return vec![a];
    }
    if dx == 0 {
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        return (y0..=y1).map(|y| Pixel::new(a.x, y)).collect();
    }
    if dy == 0 {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        return (x0..=x1).map(|x| Pixel::new(x, a.y)).collect();
    }

    if dx.abs() >= dy.abs() {
        let (p0, p1) = if a.x > b.x { (b, a) } else { (a, b) };
        let slope = (p1.y - p0.y) as f64 / (p1.x - p0.x) as f64;
        (p0.x..=p1.x)
            .map(|x| Pixel::new(x, round_half_up(p0.y as f64 + slope * (x - p0.x) as f64)))
            .collect()
    } else {
        let (p0, p1) = if a.y > b.y { (b, a) } else { (a, b) };
        let inv_slope = (p1.x - p0.x) as f64 / (p1.y - p0.y) as f64;
        (p0.y..=p1.y)
            .map(|y| Pixel::new(round_half_up(p0.x as f64 + inv_slope * (y - p0.y) as f64), y))
            .collect()
    }
}

/// Bresenham for `|dy| < |dx|`; expects `a.x <= b.x`.
pub fn draw_low_line(a: Pixel, b: Pixel) -> Vec<Pixel> {
    let dx = b.x - a.x;
    let mut dy = b.y - a.y;
    let mut yi = 1;
    if dy < 0 {
        yi = -1;
        dy = -dy;
    }

    let mut decision = 2 * dy - dx;
    let step_east = 2 * dy;
    let step_north_east = 2 * (dy - dx);

    let mut points = Vec::with_capacity(dx as usize + 1);
    let mut y = a.y;
    for x in a.x..=b.x {
        points.push(Pixel::new(x, y));
        if decision > 0 {
            y += yi;
            decision += step_north_east;
        } else {
            decision += step_east;
        }
    }
    points
}

/// Bresenham for `|dy| >= |dx|`; expects `a.y <= b.y`.
pub fn draw_high_line(a: Pixel, b: Pixel) -> Vec<Pixel> {
    let mut dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut xi = 1;
    if dx < 0 {
        xi = -1;
        dx = -dx;
    }

    let mut decision = 2 * dx - dy;
    let step_north = 2 * dx;
    let step_north_east = 2 * (dx - dy);

    let mut points = Vec::with_capacity(dy as usize + 1);
    let mut x = a.x;
    for y in a.y..=b.y {
        points.push(Pixel::new(x, y));
        if decision > 0 {
            x += xi;
            decision += step_north_east;
        } else {
            decision += step_north;
        }
    }
    points
}

/// Integer Bresenham line. Endpoints are put in canonical order first, so
/// `(a, b)` and `(b, a)` yield the same pixels.
pub fn draw_bresenham_line(a: Pixel, b: Pixel) -> Vec<Pixel> {
    if (b.y - a.y).abs() < (b.x - a.x).abs() {
        if a.x > b.x { draw_low_line(b, a) } else { draw_low_line(a, b) }
    } else if a.y > b.y {
        draw_high_line(b, a)
    } else {
        draw_high_line(a, b)
    }
}

/// Parametric line sampled once per pixel along the dominant axis.
pub fn draw_parametric_line(a: Pixel, b: Pixel) -> Vec<Pixel> {
    let steps = (b.x - a.x).abs().max((b.y - a.y).abs());
    if steps == 0 {
        return vec![a];
    }
    sample_parametric(a, b, steps as usize, 1.0 / steps as f64)
}

/// Parametric line with a caller-chosen `t` step in
/// `[MIN_PARAMETRIC_LINE_STEP, 1]`.
///
/// Short segments produce repeated pixels; long ones may skip pixels when the
/// step is coarse.
pub fn draw_parametric_line_with_step(a: Pixel, b: Pixel, step: f64) -> Result<Vec<Pixel>> {
    if !(MIN_PARAMETRIC_LINE_STEP..=1.0).contains(&step) {
        return Err(RasterError::parameter(
            "step",
            format!("{step} is not in [{MIN_PARAMETRIC_LINE_STEP}, 1]"),
        ));
    }
    if a == b {
        return Ok(vec![a]);
    }
    let samples = (1.0 / step).ceil() as usize;
    Ok(sample_parametric(a, b, samples, step))
}

fn sample_parametric(a: Pixel, b: Pixel, samples: usize, step: f64) -> Vec<Pixel> {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    (0..=samples)
        .map(|i| {
            let t = (i as f64 * step).min(1.0);
            Pixel::new(
                round_half_up(a.x as f64 + t * dx),
                round_half_up(a.y as f64 + t * dy),
            )
        })
        .collect()
}
