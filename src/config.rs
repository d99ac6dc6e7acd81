//! Demo configuration (`raster-lab.toml`).
//!
//! Every section is optional; a missing file section falls back to the
//! values the demos were designed around.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::camera::{Camera, DEFAULT_FOCAL_LENGTH};
use crate::circle::{MIN_PARAMETRIC_CIRCLE_STEP, PARAMETRIC_CIRCLE_STEP};
use crate::color::Rgb;
use crate::lighting::{Light, LitSurface, Material, Surface};
use crate::line::MIN_PARAMETRIC_LINE_STEP;
use crate::point2d::Point2D;
use crate::point3d::Point3D;
use crate::surface::BilinearPatch;
use crate::transform::{Rotation, TransformPipeline};

/// Largest accepted canvas side, in pixels.
pub const MAX_CANVAS_SIDE: u32 = 16_384;

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    pub canvas: CanvasConfig,
    pub rotation: Rotation,
    pub camera: CameraConfig,
    pub rasterizer: RasterizerConfig,
    pub transform: TransformPipeline,
    pub lighting: LightingConfig,
    pub bilinear: BilinearConfig,
    pub sweep: SweepConfig,
    /// Seed for the random segments of the line demo.
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: 800, height: 800, background: Rgb::BLACK }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub focal_length: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { focal_length: DEFAULT_FOCAL_LENGTH }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RasterizerConfig {
    /// Fixed `t` step for the parametric line; `None` samples once per pixel.
    pub parametric_line_step: Option<f64>,
    pub parametric_circle_step: f64,
    /// Brush size used when plotting rasterizer output.
    pub line_width: u32,
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self { parametric_line_step: None, parametric_circle_step: PARAMETRIC_CIRCLE_STEP, line_width: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LightingConfig {
    pub light: Light,
    pub observer: Point3D,
    pub sphere: LitSurface,
    pub plane: LitSurface,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light: Light::default(),
            observer: Point3D::new(0.0, 0.0, 100.0),
            sphere: LitSurface {
                surface: Surface::Sphere { center: Point3D::ZERO, radius: 50.0 },
                material: Material { ambient: 0.2, diffuse: 0.3, specular: 0.8, shininess: 10.0 },
            },
            plane: LitSurface {
                surface: Surface::Plane {
                    center: Point3D::new(0.0, 0.0, -50.0),
                    size: 100.0,
                    normal: Point3D::new(0.0, 0.0, 1.0),
                },
                material: Material { ambient: 0.3, diffuse: 0.7, specular: 0.4, shininess: 10.0 },
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BilinearConfig {
    pub patch: BilinearPatch,
    pub resolution: usize,
    pub color: Rgb,
}

impl Default for BilinearConfig {
    fn default() -> Self {
        Self { patch: BilinearPatch::default(), resolution: 10, color: Rgb::BLUE }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SweepConfig {
    pub profile: Vec<Point2D>,
    pub segments: usize,
    pub color: Rgb,
}

impl Default for SweepConfig {
    fn default() -> Self {
        // vase-like profile: distance from the Y axis against height
        let profile = [(40.0, -80.0), (60.0, -40.0), (45.0, 0.0), (30.0, 40.0), (50.0, 80.0)]
            .map(|(x, y)| Point2D::new(x, y))
            .to_vec();
        Self { profile, segments: 20, color: Rgb::BLUE }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: DemoConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn validate(&self) -> Result<()> {
        let (w, h) = (self.canvas.width, self.canvas.height);
        if w == 0 || h == 0 || w > MAX_CANVAS_SIDE || h > MAX_CANVAS_SIDE {
            anyhow::bail!("canvas must be between 1x1 and {MAX_CANVAS_SIDE}x{MAX_CANVAS_SIDE}, got {w}x{h}");
        }
        if let Some(step) = self.rasterizer.parametric_line_step {
            if !(MIN_PARAMETRIC_LINE_STEP..=1.0).contains(&step) {
                anyhow::bail!("rasterizer.parametric_line_step must be in [{MIN_PARAMETRIC_LINE_STEP}, 1], got {step}");
            }
        }
        let circle_step = self.rasterizer.parametric_circle_step;
        if !(circle_step >= MIN_PARAMETRIC_CIRCLE_STEP && circle_step.is_finite()) {
            anyhow::bail!("rasterizer.parametric_circle_step must be at least {MIN_PARAMETRIC_CIRCLE_STEP}, got {circle_step}");
        }
        if !(self.camera.focal_length > 0.0) {
            anyhow::bail!("camera.focal_length must be positive, got {}", self.camera.focal_length);
        }
        self.lighting.light.validate()?;
        self.lighting.sphere.material.validate()?;
        self.lighting.plane.material.validate()?;
        Ok(())
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.canvas.width, self.canvas.height).with_focal_length(self.camera.focal_length)
    }
}
