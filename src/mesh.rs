//! Polygon meshes and the helpers that generate them.

use crate::color::Rgb;
use crate::error::{RasterError, Result};
use crate::point3d::Point3D;

/// Ordered vertex indices; the order traces the polygon boundary.
pub type Face = Vec<usize>;

#[derive(Debug, Clone, PartialEq)]
pub struct Object3D {
    pub vertices: Vec<Point3D>,
    pub faces: Vec<Face>,
    pub color: Rgb,
}

/// Which grid directions close up on themselves (ring- or tube-like meshes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wrap {
    pub rows: bool,
    pub cols: bool,
}

impl Wrap {
    pub const NONE: Wrap = Wrap { rows: false, cols: false };
    pub const COLS: Wrap = Wrap { rows: false, cols: true };
    pub const BOTH: Wrap = Wrap { rows: true, cols: true };
}

impl Object3D {
    pub fn new(vertices: Vec<Point3D>, faces: Vec<Face>, color: Rgb) -> Result<Self> {
        let object = Object3D { vertices, faces, color };
        object.validate()?;
        Ok(object)
    }

    /// Every face index must address a vertex, and no face may repeat one.
    pub fn validate(&self) -> Result<()> {
        for face in &self.faces {
            check_face(face, self.vertices.len())?;
        }
        Ok(())
    }

    /// Vertex positions of `face`, in boundary order.
    pub fn face_points(&self, face: &[usize]) -> Result<Vec<Point3D>> {
        check_face(face, self.vertices.len())?;
        Ok(face.iter().map(|&i| self.vertices[i]).collect())
    }
}

fn check_face(face: &[usize], vertex_count: usize) -> Result<()> {
    for (n, &idx) in face.iter().enumerate() {
        if idx >= vertex_count {
            return Err(RasterError::out_of_range("vertex", idx as i64, vertex_count));
        }
        if face[..n].contains(&idx) {
            return Err(RasterError::InvalidGeometry(format!("face {face:?} lists vertex {idx} twice")));
        }
    }
    Ok(())
}

/// Row-major `rows x cols` vertex grid from `f(row, col)`, stitched into quad
/// faces `[i, i+1, i+1+cols, i+cols]`. A wrapped direction also connects its
/// last line back to the first; wrapping needs at least three lines.
pub fn grid_mesh<F>(rows: usize, cols: usize, wrap: Wrap, color: Rgb, f: F) -> Object3D
where
    F: Fn(usize, usize) -> Point3D,
{
    let vertices: Vec<Point3D> = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r, c)))
        .map(|(r, c)| f(r, c))
        .collect();

    let quads = |count: usize, wraps: bool| {
        if wraps && count >= 3 { count } else { count.saturating_sub(1) }
    };
    let row_quads = quads(rows, wrap.rows);
    let col_quads = quads(cols, wrap.cols);

    let mut faces = Vec::with_capacity(row_quads * col_quads);
    for r in 0..row_quads {
        let r_next = (r + 1) % rows;
        for c in 0..col_quads {
            let c_next = (c + 1) % cols;
            faces.push(vec![
                r * cols + c,
                r * cols + c_next,
                r_next * cols + c_next,
                r_next * cols + c,
            ]);
        }
    }

    Object3D { vertices, faces, color }
}

/// Axis-aligned cube centered on the origin.
pub fn cube(half_size: f64, color: Rgb) -> Object3D {
    let s = half_size;
    let vertices = vec![
        Point3D::new(-s, -s, -s),
        Point3D::new(s, -s, -s),
        Point3D::new(s, s, -s),
        Point3D::new(-s, s, -s),
        Point3D::new(-s, -s, s),
        Point3D::new(s, -s, s),
        Point3D::new(s, s, s),
        Point3D::new(-s, s, s),
    ];
    let faces = vec![
        vec![0, 1, 2, 3], // front
        vec![4, 5, 6, 7], // back
        vec![0, 1, 5, 4], // bottom
        vec![2, 3, 7, 6], // top
        vec![0, 3, 7, 4], // left
        vec![1, 2, 6, 5], // right
    ];
    Object3D { vertices, faces, color }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_grid_faces_match_index_arithmetic() {
        let mesh = grid_mesh(3, 4, Wrap::NONE, Rgb::RED, |r, c| Point3D::new(c as f64, r as f64, 0.0));
        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(mesh.faces.len(), 6);
        assert_eq!(mesh.faces[0], vec![0, 1, 5, 4]);
        assert_eq!(mesh.faces[5], vec![6, 7, 11, 10]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn wrapped_grid_closes_both_ways() {
        let mesh = grid_mesh(4, 3, Wrap::BOTH, Rgb::GREEN, |_, _| Point3D::ZERO);
        assert_eq!(mesh.faces.len(), 12);
        assert_eq!(mesh.faces[2], vec![2, 0, 3, 5]);
        assert_eq!(mesh.faces[11], vec![11, 9, 0, 2]);
        assert!(mesh.validate().is_ok());

        let thin = grid_mesh(2, 2, Wrap::BOTH, Rgb::GREEN, |_, _| Point3D::ZERO);
        assert_eq!(thin.faces, vec![vec![0, 1, 3, 2]]);
    }

    #[test]
    fn bad_faces_are_rejected() {
        let verts = vec![Point3D::ZERO; 3];
        let err = Object3D::new(verts.clone(), vec![vec![0, 1, 3]], Rgb::WHITE).unwrap_err();
        assert_eq!(err, RasterError::IndexOutOfRange { what: "vertex", index: 3, len: 3 });
        let err = Object3D::new(verts, vec![vec![0, 1, 0]], Rgb::WHITE).unwrap_err();
        assert!(matches!(err, RasterError::InvalidGeometry(_)));
    }

    #[test]
    fn cube_is_valid() {
        let c = cube(20.0, Rgb::WHITE);
        assert!(c.validate().is_ok());
        let front = c.face_points(&c.faces[0]).unwrap();
        assert!(front.iter().all(|p| p.z == -20.0));
    }
}
