//! Parametric surfaces: bilinear patches and rotational sweeps.
//!
//! Both can be drawn as depth-tested point clouds or turned into an
//! [`Object3D`] for the polygon compositor.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::camera::orthographic;
use crate::color::Rgb;
use crate::error::{RasterError, Result};
use crate::mesh::{Object3D, Wrap, grid_mesh};
use crate::point2d::{Point2D, round_half_up};
use crate::point3d::Point3D;
use crate::screen::ScreenSpace;
use crate::transform::Rotation;

/// Side of the square splat each surface sample is drawn with.
pub const SPLAT_SIZE: i32 = 2;

/// Bilinear patch through four corners; `pUV` sits at `(u, v)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BilinearPatch {
    pub p00: Point3D,
    pub p01: Point3D,
    pub p10: Point3D,
    pub p11: Point3D,
}

impl Default for BilinearPatch {
    fn default() -> Self {
        Self {
            p00: Point3D::new(0.0, 0.0, 0.0),
            p01: Point3D::new(0.0, 40.0, 80.0),
            p10: Point3D::new(20.0, 0.0, 0.0),
            p11: Point3D::new(20.0, 40.0, 80.0),
        }
    }
}

fn check_resolution(resolution: usize) -> Result<()> {
    if resolution == 0 {
        return Err(RasterError::parameter("resolution", "must be at least 1"));
    }
    Ok(())
}

impl BilinearPatch {
    pub fn interpolate(&self, u: f64, v: f64) -> Point3D {
        self.p00 * ((1.0 - u) * (1.0 - v))
            + self.p01 * ((1.0 - u) * v)
            + self.p10 * (u * (1.0 - v))
            + self.p11 * (u * v)
    }

    /// `(resolution + 1)²` samples on a uniform `(u, v)` lattice, row-major in `u`.
    pub fn samples(&self, resolution: usize) -> Result<Vec<Point3D>> {
        check_resolution(resolution)?;
        let n = resolution as f64;
        Ok((0..=resolution)
            .flat_map(|i| (0..=resolution).map(move |j| (i as f64 / n, j as f64 / n)))
            .map(|(u, v)| self.interpolate(u, v))
            .collect())
    }

    pub fn render_points(&self, resolution: usize, rotation: Rotation, color: Rgb, screen: &mut ScreenSpace) -> Result<usize> {
        let points = self.samples(resolution)?;
        Ok(render_point_cloud(&points, rotation, color, screen))
    }

    /// Quad mesh over the same lattice as [`BilinearPatch::samples`].
    pub fn to_object(&self, resolution: usize, color: Rgb) -> Result<Object3D> {
        check_resolution(resolution)?;
        let n = resolution as f64;
        Ok(grid_mesh(resolution + 1, resolution + 1, Wrap::NONE, color, |i, j| {
            self.interpolate(i as f64 / n, j as f64 / n)
        }))
    }
}

fn check_segments(segments: usize) -> Result<()> {
    if segments < 3 {
        return Err(RasterError::parameter("segments", format!("{segments} is below 3")));
    }
    Ok(())
}

fn revolve(p: Point2D, theta: f64) -> Point3D {
    let (sin, cos) = theta.sin_cos();
    Point3D::new(p.x * cos, p.y, p.x * sin)
}

/// Revolve a profile curve around the Y axis. The profile's `x` is the
/// distance from the axis; one copy is emitted per segment angle.
pub fn sweep_profile(profile: &[Point2D], segments: usize) -> Result<Vec<Point3D>> {
    check_segments(segments)?;
    Ok((0..segments)
        .flat_map(|i| {
            let theta = i as f64 * TAU / segments as f64;
            profile.iter().map(move |&p| revolve(p, theta))
        })
        .collect())
}

/// Closed surface of revolution: one grid row per segment, wrapping around.
pub fn sweep_object(profile: &[Point2D], segments: usize, color: Rgb) -> Result<Object3D> {
    check_segments(segments)?;
    if profile.len() < 2 {
        return Err(RasterError::InvalidGeometry(format!(
            "a sweep profile needs two points, got {}",
            profile.len()
        )));
    }
    let wrap = Wrap { rows: true, cols: false };
    Ok(grid_mesh(segments, profile.len(), wrap, color, |seg, k| {
        revolve(profile[k], seg as f64 * TAU / segments as f64)
    }))
}

/// Sweep samples are viewed with the z angle pinned to zero. Each splat is
/// centered on its sample rather than hanging off its top-left corner.
pub fn render_sweep_points(points: &[Point3D], angle_x: f64, angle_y: f64, color: Rgb, screen: &mut ScreenSpace) -> usize {
    splat_points(points, Rotation::new(angle_x, angle_y, 0.0), color, -1, screen)
}

/// Rotate, project orthographically and splat each point, depth testing
/// every pixel of the splat. Returns how many samples won at least one pixel.
pub fn render_point_cloud(points: &[Point3D], rotation: Rotation, color: Rgb, screen: &mut ScreenSpace) -> usize {
    splat_points(points, rotation, color, 0, screen)
}

fn splat_points(points: &[Point3D], rotation: Rotation, color: Rgb, anchor: i32, screen: &mut ScreenSpace) -> usize {
    let (half_w, half_h) = (screen.width as f64 / 2.0, screen.height as f64 / 2.0);
    let mut visible = 0;
    for &p in points {
        let rotated = rotation.apply(p);
        let projected = orthographic(rotated);
        let sx = round_half_up(half_w + projected.x) + anchor;
        let sy = round_half_up(half_h - projected.y) + anchor;
        let mut won = false;
        for dy in 0..SPLAT_SIZE {
            for dx in 0..SPLAT_SIZE {
                won |= screen.depth_test_and_set(sx + dx, sy + dy, rotated.z, color);
            }
        }
        visible += won as usize;
    }
    debug!(points = points.len(), visible, "point cloud pass complete");
    visible
}
