//! Phong illumination over implicit surfaces.
//!
//! Surfaces are evaluated straight in screen space: canvas pixel `(i, j)`
//! is read as scene point `(i - W/2, H/2 - j)` with no camera transform.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Rgb;
use crate::error::{RasterError, Result};
use crate::point3d::{Point3D, dot3, normalize};
use crate::screen::ScreenSpace;

/// Point light with separate ambient, diffuse and specular intensities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Point3D,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
}

/// Reflection coefficients and the specular exponent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
}

fn check_unit(name: &'static str, v: f64) -> Result<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(RasterError::parameter(name, format!("{v} is outside [0, 1]")))
    }
}

impl Light {
    pub fn validate(&self) -> Result<()> {
        if !self.position.is_finite() {
            return Err(RasterError::parameter("light.position", "must be finite"));
        }
        check_unit("light.ambient", self.ambient)?;
        check_unit("light.diffuse", self.diffuse)?;
        check_unit("light.specular", self.specular)
    }
}

impl Default for Light {
    fn default() -> Self {
        Self { position: Point3D::new(100.0, 0.0, 100.0), ambient: 0.2, diffuse: 0.7, specular: 1.0 }
    }
}

impl Material {
    pub fn validate(&self) -> Result<()> {
        check_unit("material.ambient", self.ambient)?;
        check_unit("material.diffuse", self.diffuse)?;
        check_unit("material.specular", self.specular)?;
        if !(self.shininess >= 1.0 && self.shininess.is_finite()) {
            return Err(RasterError::parameter("material.shininess", format!("{} is below 1", self.shininess)));
        }
        Ok(())
    }
}

/// Phong intensity in `[0, 1]` at `point` with unit `normal`.
///
/// When the point coincides with the light or the observer there is no
/// direction to work with and only the ambient term is returned.
pub fn illuminate(point: Point3D, normal: Point3D, material: &Material, light: &Light, observer: Point3D) -> f64 {
    let ambient = light.ambient * material.ambient;

    let to_light = light.position - point;
    let to_observer = observer - point;
    if to_light.length() == 0.0 || to_observer.length() == 0.0 {
        return ambient.clamp(0.0, 1.0);
    }
    let l = normalize(to_light);
    let v = normalize(to_observer);

    let n_dot_l = dot3(normal, l);
    let r = normalize(normal * (2.0 * n_dot_l) - l);

    let diffuse = light.diffuse * material.diffuse * n_dot_l.max(0.0);
    let specular = light.specular * material.specular * dot3(r, v).max(0.0).powf(material.shininess);

    let intensity = ambient + diffuse + specular;
    if intensity.is_nan() { ambient.clamp(0.0, 1.0) } else { intensity.clamp(0.0, 1.0) }
}

/// Implicit surfaces that can be sampled per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Surface {
    /// Front hemisphere facing +z.
    Sphere { center: Point3D, radius: f64 },
    /// Square of side `size` in the plane `z = center.z`.
    Plane { center: Point3D, size: f64, normal: Point3D },
}

impl Surface {
    /// Surface point and unit normal over scene position `(x, y)`, if any.
    pub fn sample(&self, x: f64, y: f64) -> Option<(Point3D, Point3D)> {
        match *self {
            Surface::Sphere { center, radius } => {
                let dx = x - center.x;
                let dy = y - center.y;
                let d2 = dx * dx + dy * dy;
                if d2 > radius * radius {
                    return None;
                }
                let point = Point3D::new(x, y, center.z + (radius * radius - d2).sqrt());
                Some((point, normalize(point - center)))
            }
            Surface::Plane { center, size, normal } => {
                let half = size / 2.0;
                if (x - center.x).abs() > half || (y - center.y).abs() > half {
                    return None;
                }
                Some((Point3D::new(x, y, center.z), normalize(normal)))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LitSurface {
    pub surface: Surface,
    pub material: Material,
}

/// Shade every surface into `screen` as gray levels, resolving overlap with
/// the depth buffer. Depth is the distance along z from the observer, so the
/// surface closer to the observer wins. Returns pixels written.
pub fn render_lit_scene(surfaces: &[LitSurface], light: &Light, observer: Point3D, screen: &mut ScreenSpace) -> Result<usize> {
    light.validate()?;
    for lit in surfaces {
        lit.material.validate()?;
    }

    let (w, h) = (screen.width as i32, screen.height as i32);
    let (half_w, half_h) = (screen.width as f64 / 2.0, screen.height as f64 / 2.0);
    let mut written = 0;
    for lit in surfaces {
        for i in 0..w {
            for j in 0..h {
                let x = i as f64 - half_w;
                let y = half_h - j as f64;
                let Some((point, normal)) = lit.surface.sample(x, y) else { continue };
                let intensity = illuminate(point, normal, &lit.material, light, observer);
                let brightness = (intensity * 255.0).floor() as u8;
                if screen.depth_test_and_set(i, j, observer.z - point.z, Rgb::gray(brightness)) {
                    written += 1;
                }
            }
        }
    }
    debug!(surfaces = surfaces.len(), pixels = written, "lighting pass complete");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material() -> Material {
        Material { ambient: 0.2, diffuse: 0.3, specular: 0.8, shininess: 10.0 }
    }

    #[test]
    fn light_overhead_gives_full_diffuse_and_specular() {
        let light = Light { position: Point3D::new(0.0, 0.0, 100.0), ambient: 0.5, diffuse: 0.5, specular: 0.5 };
        let m = Material { ambient: 0.2, diffuse: 0.6, specular: 0.4, shininess: 3.0 };
        let up = Point3D::new(0.0, 0.0, 1.0);
        let i = illuminate(Point3D::ZERO, up, &m, &light, Point3D::new(0.0, 0.0, 50.0));
        assert!((i - (0.1 + 0.3 + 0.2)).abs() < 1e-12);
    }

    #[test]
    fn light_behind_surface_leaves_ambient() {
        let light = Light { position: Point3D::new(0.0, 0.0, -100.0), ..Light::default() };
        let up = Point3D::new(0.0, 0.0, 1.0);
        let i = illuminate(Point3D::ZERO, up, &material(), &light, Point3D::new(0.0, 0.0, 100.0));
        assert!((i - 0.2 * 0.2).abs() < 1e-12);
    }

    #[test]
    fn coincident_light_falls_back_to_ambient() {
        let light = Light::default();
        let up = Point3D::new(0.0, 0.0, 1.0);
        let at_light = illuminate(light.position, up, &material(), &light, Point3D::new(0.0, 0.0, 100.0));
        assert_eq!(at_light, light.ambient * 0.2);
        let at_eye = illuminate(Point3D::ZERO, up, &material(), &light, Point3D::ZERO);
        assert_eq!(at_eye, light.ambient * 0.2);
    }

    #[test]
    fn intensity_is_clamped() {
        let light = Light { ambient: 1.0, diffuse: 1.0, specular: 1.0, ..Light::default() };
        let m = Material { ambient: 1.0, diffuse: 1.0, specular: 1.0, shininess: 1.0 };
        let i = illuminate(Point3D::ZERO, Point3D::new(0.0, 0.0, 1.0), &m, &light, Point3D::new(0.0, 0.0, 10.0));
        assert_eq!(i, 1.0);
    }

    #[test]
    fn sphere_normal_points_out_of_center() {
        let s = Surface::Sphere { center: Point3D::new(10.0, 0.0, 0.0), radius: 5.0 };
        let (p, n) = s.sample(10.0, 0.0).unwrap();
        assert_eq!(p, Point3D::new(10.0, 0.0, 5.0));
        assert_eq!(n, Point3D::new(0.0, 0.0, 1.0));
        assert!(s.sample(16.0, 0.0).is_none());
    }

    #[test]
    fn plane_respects_extent() {
        let p = Surface::Plane { center: Point3D::new(0.0, 0.0, -50.0), size: 100.0, normal: Point3D::new(0.0, 0.0, 2.0) };
        assert_eq!(p.sample(50.0, -50.0), Some((Point3D::new(50.0, -50.0, -50.0), Point3D::new(0.0, 0.0, 1.0))));
        assert!(p.sample(50.5, 0.0).is_none());
    }

    #[test]
    fn sphere_in_front_of_plane_wins() {
        let surfaces = [
            LitSurface { surface: Surface::Sphere { center: Point3D::ZERO, radius: 10.0 }, material: material() },
            LitSurface {
                surface: Surface::Plane { center: Point3D::new(0.0, 0.0, -50.0), size: 40.0, normal: Point3D::new(0.0, 0.0, 1.0) },
                material: material(),
            },
        ];
        let mut screen = ScreenSpace::new(60, 60);
        let observer = Point3D::new(0.0, 0.0, 100.0);
        let written = render_lit_scene(&surfaces, &Light::default(), observer, &mut screen).unwrap();
        assert!(written > 0);
        assert_eq!(screen.get_depth(30, 30), 90.0);
        assert_eq!(screen.get_depth(30 + 15, 30), 150.0);
        assert_eq!(screen.get_depth(2, 2), f64::INFINITY);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let bad = LitSurface {
            surface: Surface::Sphere { center: Point3D::ZERO, radius: 1.0 },
            material: Material { shininess: 0.5, ..material() },
        };
        let mut screen = ScreenSpace::new(4, 4);
        assert!(render_lit_scene(&[bad], &Light::default(), Point3D::ZERO, &mut screen).is_err());
        let hot = Light { diffuse: 1.5, ..Light::default() };
        assert!(hot.validate().is_err());
    }
}
