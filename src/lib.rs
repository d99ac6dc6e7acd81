//! Raster graphics building blocks: line and circle rasterizers, binary
//! fills, 3D transforms and projection, a painter-ordered z-buffer and Phong
//! shading over implicit surfaces.

pub mod camera;
pub mod circle;
pub mod color;
pub mod config;
pub mod error;
pub mod fill;
pub mod geometry;
pub mod lighting;
pub mod line;
pub mod mesh;
pub mod point2d;
pub mod point3d;
pub mod rectangle;
pub mod scenes;
pub mod screen;
pub mod surface;
pub mod transform;
pub mod wireframe;
pub mod zbuffer;

pub use crate::camera::Camera;
pub use crate::circle::CircleAlgorithm;
pub use crate::color::{Color, Hsl, Rgb};
pub use crate::error::{RasterError, Result};
pub use crate::fill::{Connectivity, PixelGrid};
pub use crate::line::LineAlgorithm;
pub use crate::mesh::Object3D;
pub use crate::point2d::{Pixel, Point2D};
pub use crate::point3d::Point3D;
pub use crate::rectangle::Rect;
pub use crate::screen::ScreenSpace;
pub use crate::transform::{Axis, Rotation, TransformPipeline};
