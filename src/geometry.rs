use crate::point2d::{Pixel, Point2D, round_half_up};
use crate::point3d::Point3D;
use crate::rectangle::Rect;

/// Added to edge denominators so horizontal edges never divide by zero.
pub const RAY_CAST_EPSILON: f64 = 0.00001;

/// Even-odd test with a horizontal ray toward +x. Only `x`/`y` of the
/// vertices are used.
#[inline(always)]
pub fn point_in_polygon(x: f64, y: f64, vertices: &[Point3D]) -> bool {
    let mut inside = false;
    let mut j = match vertices.len() {
        0 => return false,
        n => n - 1,
    };
    for (i, vi) in vertices.iter().enumerate() {
        let vj = vertices[j];
        if (vi.y > y) != (vj.y > y)
            && x < (vj.x - vi.x) * (y - vi.y) / (vj.y - vi.y + RAY_CAST_EPSILON) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Flat mean of the vertex depths, used as the depth of every pixel in the
/// face.
pub fn mean_depth(vertices: &[Point3D]) -> f64 {
    if vertices.is_empty() {
        return f64::NAN;
    }
    vertices.iter().map(|v| v.z).sum::<f64>() / vertices.len() as f64
}

/// Integer box covering the x/y extent (floor of the minimum, ceil of the
/// maximum). `None` if there are no vertices or any coordinate is not finite.
pub fn bounding_box(vertices: &[Point3D]) -> Option<Rect> {
    let first = vertices.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for v in vertices {
        if !v.is_finite() {
            return None;
        }
        min_x = min_x.min(v.x);
        min_y = min_y.min(v.y);
        max_x = max_x.max(v.x);
        max_y = max_y.max(v.y);
    }
    Some(Rect::new(min_x.floor() as i32, min_y.floor() as i32, max_x.ceil() as i32, max_y.ceil() as i32))
}

/// Centered, y-up scene coordinates to canvas pixel (y grows downward).
#[inline(always)]
pub fn to_canvas(x: f64, y: f64, width: u32, height: u32) -> Pixel {
    Pixel {
        x: round_half_up(x + width as f64 / 2.0),
        y: round_half_up(-y + height as f64 / 2.0),
    }
}

/// Liang-Barsky clip of the segment `a`-`b` to the box `[min, max]`.
/// `None` when the segment misses the box. Endpoints already inside come
/// back untouched.
pub fn clip_segment(a: Point2D, b: Point2D, min: Point2D, max: Point2D) -> Option<(Point2D, Point2D)> {
    let d = b - a;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let edges = [(-d.x, a.x - min.x), (d.x, max.x - a.x), (-d.y, a.y - min.y), (d.y, max.y - a.y)];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    let start = if t0 == 0.0 { a } else { a + d * t0 };
    let end = if t1 == 1.0 { b } else { a + d * t1 };
    (start.is_finite() && end.is_finite()).then_some((start, end))
}
