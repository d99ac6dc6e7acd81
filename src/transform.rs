use serde::{Deserialize, Serialize};

use crate::point3d::Point3D;

pub type Matrix4 = [[f64; 4]; 4];

pub const IDENTITY: Matrix4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Euler angles in radians, applied X then Y then Z.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

fn transform_vector(ihat: Point3D, jhat: Point3D, khat: Point3D, v: Point3D) -> Point3D {
    ihat * v.x + jhat * v.y + khat * v.z
}

/// Images of the unit axes under a right-handed rotation of `radians` about `axis`.
fn basis_vectors(radians: f64, axis: Axis) -> (Point3D, Point3D, Point3D) {
    let (sin, cos) = radians.sin_cos();
    match axis {
        Axis::X => (
            Point3D::new(1.0, 0.0, 0.0),
            Point3D::new(0.0, cos, sin),
            Point3D::new(0.0, -sin, cos),
        ),
        Axis::Y => (
            Point3D::new(cos, 0.0, -sin),
            Point3D::new(0.0, 1.0, 0.0),
            Point3D::new(sin, 0.0, cos),
        ),
        Axis::Z => (
            Point3D::new(cos, sin, 0.0),
            Point3D::new(-sin, cos, 0.0),
            Point3D::new(0.0, 0.0, 1.0),
        ),
    }
}

pub fn scale(p: Point3D, sx: f64, sy: f64, sz: f64) -> Point3D {
    Point3D { x: p.x * sx, y: p.y * sy, z: p.z * sz }
}

pub fn translate(p: Point3D, tx: f64, ty: f64, tz: f64) -> Point3D {
    Point3D { x: p.x + tx, y: p.y + ty, z: p.z + tz }
}

pub fn rotate_radians(p: Point3D, radians: f64, axis: Axis) -> Point3D {
    let (ihat, jhat, khat) = basis_vectors(radians, axis);
    transform_vector(ihat, jhat, khat, p)
}

/// Rotate about `axis` through the origin; the angle is in degrees.
pub fn rotate(p: Point3D, degrees: f64, axis: Axis) -> Point3D {
    rotate_radians(p, degrees.to_radians(), axis)
}

/// Apply the upper-left 3x3 block of `m` (row-major) as a linear map. The
/// translation column and the homogeneous row are ignored.
pub fn shear(p: Point3D, m: &Matrix4) -> Point3D {
    Point3D {
        x: m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z,
        y: m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z,
        z: m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z,
    }
}

impl Rotation {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn apply(&self, p: Point3D) -> Point3D {
        rotate_xyz(p, self.x, self.y, self.z)
    }
}

/// Rotate about X, then the result about Y, then that about Z (radians).
pub fn rotate_xyz(p: Point3D, angle_x: f64, angle_y: f64, angle_z: f64) -> Point3D {
    let p = rotate_radians(p, angle_x, Axis::X);
    let p = rotate_radians(p, angle_y, Axis::Y);
    rotate_radians(p, angle_z, Axis::Z)
}

/// Fixed-order model transform: scale, translate, rotate, shear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformPipeline {
    pub scale: Point3D,
    pub translate: Point3D,
    /// Angle in degrees and the axis to turn about.
    pub rotation: Option<(f64, Axis)>,
    pub shear: Matrix4,
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self {
            scale: Point3D::new(1.0, 1.0, 1.0),
            translate: Point3D::ZERO,
            rotation: None,
            shear: IDENTITY,
        }
    }
}

impl TransformPipeline {
    pub fn uniform_scale(mut self, s: f64) -> Self {
        self.scale = Point3D::new(s, s, s);
        self
    }

    pub fn apply(&self, p: Point3D) -> Point3D {
        let p = scale(p, self.scale.x, self.scale.y, self.scale.z);
        let p = translate(p, self.translate.x, self.translate.y, self.translate.z);
        let p = match self.rotation {
            Some((degrees, axis)) => rotate(p, degrees, axis),
            None => p,
        };
        shear(p, &self.shear)
    }
}
