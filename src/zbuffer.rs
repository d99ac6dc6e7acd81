//! Z-buffer scene compositor.
//!
//! One call to [`render_scene`] is one frame: rotate every face, order them
//! far-to-near, then scan each face's bounding box and keep a pixel only if
//! it is nearer than what the depth buffer already holds.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::color::Rgb;
use crate::error::Result;
use crate::geometry::{bounding_box, mean_depth, point_in_polygon, to_canvas};
use crate::mesh::Object3D;
use crate::point3d::Point3D;
use crate::screen::ScreenSpace;
use crate::transform::Rotation;

/// A face after rotation, carrying its owner's color.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point3D>,
    pub color: Rgb,
}

impl Polygon {
    pub fn mean_depth(&self) -> f64 {
        mean_depth(&self.vertices)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub faces_drawn: usize,
    pub faces_skipped: usize,
    pub pixels_written: usize,
}

/// Rotate every face of every object, preserving scene order.
///
/// Fails on the first face that names a missing vertex or repeats one.
pub fn transform_faces(objects: &[Object3D], rotation: Rotation) -> Result<Vec<Polygon>> {
    let per_object: Vec<Vec<Polygon>> = objects
        .par_iter()
        .map(|object| {
            object
                .faces
                .iter()
                .map(|face| {
                    let points = object.face_points(face)?;
                    Ok(Polygon {
                        vertices: points.into_iter().map(|p| rotation.apply(p)).collect(),
                        color: object.color,
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(per_object.into_iter().flatten().collect())
}

/// Stable sort by mean depth, farthest first.
pub fn painter_sort(polygons: &mut [Polygon]) {
    polygons.sort_by(|a, b| b.mean_depth().total_cmp(&a.mean_depth()));
}

/// Rasterize a single transformed polygon with a per-pixel depth test.
/// Returns the number of pixels written, or `None` if the face was skipped.
pub fn rasterize_polygon(polygon: &Polygon, screen: &mut ScreenSpace) -> Option<usize> {
    if polygon.vertices.len() < 3 {
        return None;
    }
    let depth = polygon.mean_depth();
    if !depth.is_finite() {
        return None;
    }
    let bbox = bounding_box(&polygon.vertices)?;

    let mut written = 0;
    for y in bbox.min_y..=bbox.max_y {
        for x in bbox.min_x..=bbox.max_x {
            if !point_in_polygon(x as f64, y as f64, &polygon.vertices) {
                continue;
            }
            let canvas = to_canvas(x as f64, y as f64, screen.width, screen.height);
            if screen.depth_test_and_set(canvas.x, canvas.y, depth, polygon.color) {
                written += 1;
            }
        }
    }
    Some(written)
}

/// Render `objects` under `rotation` into `screen`. The caller owns clearing
/// the target between frames.
pub fn render_scene(objects: &[Object3D], rotation: Rotation, screen: &mut ScreenSpace) -> Result<RenderStats> {
    let mut polygons = transform_faces(objects, rotation)?;
    painter_sort(&mut polygons);

    let mut stats = RenderStats::default();
    for (i, polygon) in polygons.iter().enumerate() {
        match rasterize_polygon(polygon, screen) {
            Some(written) => {
                stats.faces_drawn += 1;
                stats.pixels_written += written;
            }
            None => {
                trace!(face = i, vertices = polygon.vertices.len(), "skipping degenerate face");
                stats.faces_skipped += 1;
            }
        }
    }

    debug!(
        faces = polygons.len(),
        drawn = stats.faces_drawn,
        skipped = stats.faces_skipped,
        pixels = stats.pixels_written,
        "z-buffer pass complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RasterError;

    fn quad(z: f64, half: f64, color: Rgb) -> Object3D {
        Object3D::new(
            vec![
                Point3D::new(-half, -half, z),
                Point3D::new(half, -half, z),
                Point3D::new(half, half, z),
                Point3D::new(-half, half, z),
            ],
            vec![vec![0, 1, 2, 3]],
            color,
        )
        .unwrap()
    }

    #[test]
    fn nearer_face_wins_in_either_order() {
        let near = quad(1.0, 5.0, Rgb::RED);
        let far = quad(10.0, 8.0, Rgb::BLUE);
        for scene in [vec![near.clone(), far.clone()], vec![far, near]] {
            let mut screen = ScreenSpace::new(40, 40);
            render_scene(&scene, Rotation::default(), &mut screen).unwrap();
            assert_eq!(screen.get_pixel(20, 20), Some(Rgb::RED));
            assert_eq!(screen.get_depth(20, 20), 1.0);
            assert_eq!(screen.get_pixel(20 + 7, 20), Some(Rgb::BLUE));
            assert_eq!(screen.get_pixel(0, 0), Some(Rgb::BLACK));
        }
    }

    #[test]
    fn painter_sort_orders_far_to_near() {
        let mut polys = vec![
            Polygon { vertices: vec![Point3D::new(0.0, 0.0, 1.0)], color: Rgb::RED },
            Polygon { vertices: vec![Point3D::new(0.0, 0.0, 9.0)], color: Rgb::GREEN },
            Polygon { vertices: vec![Point3D::new(0.0, 0.0, 4.0)], color: Rgb::BLUE },
        ];
        painter_sort(&mut polys);
        let order: Vec<Rgb> = polys.iter().map(|p| p.color).collect();
        assert_eq!(order, vec![Rgb::GREEN, Rgb::BLUE, Rgb::RED]);
    }

    #[test]
    fn rotation_is_applied_before_rasterizing() {
        // A quad lying in the x/z plane is edge-on until turned about X.
        let flat = Object3D::new(
            vec![
                Point3D::new(-5.0, 0.0, -5.0),
                Point3D::new(5.0, 0.0, -5.0),
                Point3D::new(5.0, 0.0, 5.0),
                Point3D::new(-5.0, 0.0, 5.0),
            ],
            vec![vec![0, 1, 2, 3]],
            Rgb::YELLOW,
        )
        .unwrap();
        let mut screen = ScreenSpace::new(30, 30);
        let edge_on = render_scene(std::slice::from_ref(&flat), Rotation::default(), &mut screen).unwrap();
        assert_eq!(edge_on.pixels_written, 0);

        let turned = Rotation::new(std::f64::consts::FRAC_PI_2, 0.0, 0.0);
        let stats = render_scene(&[flat], turned, &mut screen).unwrap();
        assert!(stats.pixels_written > 50);
        assert_eq!(screen.get_pixel(15, 15), Some(Rgb::YELLOW));
    }

    #[test]
    fn degenerate_faces_are_skipped() {
        let obj = Object3D::new(
            vec![Point3D::new(0.0, 0.0, 0.0), Point3D::new(3.0, 3.0, 0.0)],
            vec![vec![0, 1], vec![]],
            Rgb::WHITE,
        )
        .unwrap();
        let mut screen = ScreenSpace::new(10, 10);
        let stats = render_scene(&[obj], Rotation::default(), &mut screen).unwrap();
        assert_eq!(stats, RenderStats { faces_drawn: 0, faces_skipped: 2, pixels_written: 0 });
    }

    #[test]
    fn invalid_indices_fail_loudly() {
        let mut obj = quad(0.0, 1.0, Rgb::RED);
        obj.faces.push(vec![0, 1, 7]);
        let mut screen = ScreenSpace::new(10, 10);
        let err = render_scene(&[obj], Rotation::default(), &mut screen).unwrap_err();
        assert_eq!(err, RasterError::IndexOutOfRange { what: "vertex", index: 7, len: 4 });
    }
}
