use serde::{Deserialize, Serialize};

use crate::point2d::Point2D;
use crate::point3d::Point3D;

pub const DEFAULT_FOCAL_LENGTH: f64 = 500.0;

/// Pinhole camera sitting at `z = -focal_length`, looking down +z, with the
/// image centered on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub focal_length: f64,
    pub width: f64,
    pub height: f64,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self { focal_length: DEFAULT_FOCAL_LENGTH, width: width as f64, height: height as f64 }
    }

    pub fn with_focal_length(mut self, focal_length: f64) -> Self {
        self.focal_length = focal_length;
        self
    }

    pub fn project(&self, p: Point3D) -> Point2D {
        perspective(p, self.focal_length, self.width, self.height)
    }
}

/// Drop z.
pub fn orthographic(p: Point3D) -> Point2D {
    Point2D { x: p.x, y: p.y }
}

/// Perspective divide by `focal_length + z`, recentered on the canvas.
///
/// A point on the camera plane (`z == -focal_length`) projects to a
/// non-finite coordinate; callers clip with [`Point2D::is_finite`].
pub fn perspective(p: Point3D, focal_length: f64, canvas_width: f64, canvas_height: f64) -> Point2D {
    let scale = focal_length / (focal_length + p.z);
    Point2D {
        x: p.x * scale + canvas_width / 2.0,
        y: p.y * scale + canvas_height / 2.0,
    }
}
