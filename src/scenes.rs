//! Built-in demo geometry.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::color::Rgb;
use crate::mesh::{Object3D, Wrap, cube, grid_mesh};
use crate::point3d::Point3D;

/// The five objects of the z-buffer demo.
pub fn zbuffer_objects() -> Vec<Object3D> {
    vec![
        // z = x² + y over x in [10, 30], y in [20, 40], step 5
        grid_mesh(5, 5, Wrap::NONE, Rgb::BLUE, |i, j| {
            let x = 10.0 + 5.0 * i as f64;
            let y = 20.0 + 5.0 * j as f64;
            Point3D::new(x, y, x * x + y)
        }),
        // z = 3x - 2y + 5 over x in [50, 100], y in [30, 80], step 10
        grid_mesh(6, 6, Wrap::NONE, Rgb::RED, |i, j| {
            let x = 50.0 + 10.0 * i as f64;
            let y = 30.0 + 10.0 * j as f64;
            Point3D::new(x, y, 3.0 * x - 2.0 * y + 5.0)
        }),
        // cone opening along z, four vertices per ring
        grid_mesh(6, 4, Wrap::COLS, Rgb::YELLOW, |ring, k| {
            let t = 10.0 * ring as f64;
            let a = k as f64 * FRAC_PI_2;
            Point3D::new(30.0 + a.cos() * t, 50.0 + a.sin() * t, 10.0 + t)
        }),
        // coarse 8x8 sphere of radius 30
        grid_mesh(8, 8, Wrap::BOTH, Rgb::GREEN, |seg, ring| {
            let a = seg as f64 * TAU / 8.0;
            let b = ring as f64 * TAU / 8.0;
            Point3D::new(
                100.0 + 30.0 * a.cos() * b.cos(),
                50.0 + 30.0 * a.cos() * b.sin(),
                20.0 + 30.0 * a.sin(),
            )
        }),
        cube(20.0, Rgb::WHITE),
    ]
}

/// Wireframe house: a 100-unit box with a gabled roof, as edge pairs.
pub fn house_edges() -> Vec<(Point3D, Point3D)> {
    const EDGES: [([f64; 3], [f64; 3]); 15] = [
        ([0.0, 0.0, 0.0], [100.0, 0.0, 0.0]),
        ([0.0, 0.0, 0.0], [0.0, 100.0, 0.0]),
        ([0.0, 0.0, 0.0], [0.0, 0.0, 100.0]),
        ([100.0, 0.0, 0.0], [100.0, 0.0, 100.0]),
        ([100.0, 0.0, 0.0], [100.0, 100.0, 0.0]),
        ([100.0, 100.0, 0.0], [50.0, 150.0, 0.0]),
        ([100.0, 100.0, 0.0], [100.0, 100.0, 100.0]),
        ([0.0, 100.0, 0.0], [0.0, 100.0, 100.0]),
        ([0.0, 100.0, 0.0], [50.0, 150.0, 0.0]),
        ([50.0, 150.0, 0.0], [50.0, 150.0, 100.0]),
        ([0.0, 0.0, 100.0], [0.0, 100.0, 100.0]),
        ([0.0, 0.0, 100.0], [100.0, 0.0, 100.0]),
        ([100.0, 0.0, 100.0], [100.0, 100.0, 100.0]),
        ([100.0, 100.0, 100.0], [50.0, 150.0, 100.0]),
        ([50.0, 150.0, 100.0], [0.0, 100.0, 100.0]),
    ];
    EDGES.iter().map(|&(a, b)| (Point3D::from(a), Point3D::from(b))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_objects_are_valid() {
        let objects = zbuffer_objects();
        assert_eq!(objects.len(), 5);
        let face_counts: Vec<usize> = objects.iter().map(|o| o.faces.len()).collect();
        assert_eq!(face_counts, vec![16, 25, 20, 64, 6]);
        for o in &objects {
            o.validate().unwrap();
        }
    }

    #[test]
    fn house_has_fifteen_edges() {
        let edges = house_edges();
        assert_eq!(edges.len(), 15);
        assert!(edges.iter().any(|(_, b)| *b == Point3D::new(50.0, 150.0, 100.0)));
    }
}
