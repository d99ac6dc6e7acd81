use tracing::warn;

use crate::camera::Camera;
use crate::color::Rgb;
use crate::geometry::clip_segment;
use crate::line::LineAlgorithm;
use crate::point2d::Point2D;
use crate::point3d::Point3D;
use crate::screen::ScreenSpace;
use crate::transform::TransformPipeline;

/// Slack around the canvas, in pixels, kept when clipping projected edges.
pub const CLIP_MARGIN: f64 = 1.0;

/// Transform each edge, project it in perspective, clip it to the canvas and
/// rasterize it with `algorithm`. Edges touching the camera plane or lying
/// wholly off-canvas are dropped. Returns the number of pixels plotted.
pub fn render_wireframe(
    edges: &[(Point3D, Point3D)],
    pipeline: &TransformPipeline,
    camera: &Camera,
    algorithm: LineAlgorithm,
    color: Rgb,
    screen: &mut ScreenSpace,
) -> usize {
    let min = Point2D::new(-CLIP_MARGIN, -CLIP_MARGIN);
    let max = Point2D::new(screen.width as f64 + CLIP_MARGIN, screen.height as f64 + CLIP_MARGIN);

    let mut plotted = 0;
    for (n, (a, b)) in edges.iter().enumerate() {
        let pa = camera.project(pipeline.apply(*a));
        let pb = camera.project(pipeline.apply(*b));
        if !pa.is_finite() || !pb.is_finite() {
            warn!(edge = n, "edge projects through the camera plane, skipping");
            continue;
        }
        let Some((pa, pb)) = clip_segment(pa, pb, min, max) else {
            warn!(edge = n, "edge falls outside the canvas, skipping");
            continue;
        };
        let pixels = algorithm.rasterize(pa.to_pixel(), pb.to_pixel());
        plotted += screen.plot_points(&pixels, color, 1);
    }
    plotted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::house_edges;

    #[test]
    fn house_draws_inside_canvas() {
        let mut screen = ScreenSpace::new(400, 400);
        let camera = Camera::new(400, 400);
        let plotted = render_wireframe(
            &house_edges(),
            &TransformPipeline::default(),
            &camera,
            LineAlgorithm::Bresenham,
            Rgb::WHITE,
            &mut screen,
        );
        assert!(plotted > 0);
        // front-bottom edge runs from the canvas center to (300, 200)
        assert_eq!(screen.get_pixel(200, 200), Some(Rgb::WHITE));
        assert_eq!(screen.get_pixel(250, 200), Some(Rgb::WHITE));
        assert_eq!(screen.get_pixel(300, 200), Some(Rgb::WHITE));
    }

    #[test]
    fn edges_grazing_the_camera_plane_are_clipped() {
        let edges = [(Point3D::new(-10.0, 0.0, -499.999999), Point3D::new(10.0, 0.0, 0.0))];
        for algorithm in [LineAlgorithm::Linear, LineAlgorithm::Bresenham, LineAlgorithm::Parametric] {
            let mut screen = ScreenSpace::new(50, 50);
            let plotted = render_wireframe(
                &edges,
                &TransformPipeline::default(),
                &Camera::new(50, 50),
                algorithm,
                Rgb::WHITE,
                &mut screen,
            );
            // the near end lands far off to the left; what is left runs along y = 25 up to x = 35
            assert_eq!(plotted, 36);
            assert_eq!(screen.get_pixel(0, 25), Some(Rgb::WHITE));
            assert_eq!(screen.get_pixel(35, 25), Some(Rgb::WHITE));
            assert_eq!(screen.get_pixel(36, 25), Some(Rgb::BLACK));
        }
    }

    #[test]
    fn house_pushed_against_the_camera_stays_bounded() {
        let pipeline = TransformPipeline { translate: Point3D::new(-50.0, 0.0, -499.9999), ..TransformPipeline::default() };
        let mut screen = ScreenSpace::new(100, 100);
        let plotted = render_wireframe(
            &house_edges(),
            &pipeline,
            &Camera::new(100, 100),
            LineAlgorithm::Linear,
            Rgb::WHITE,
            &mut screen,
        );
        assert!(screen.count_not(Rgb::BLACK) <= 100 * 100);
        assert!(plotted <= house_edges().len() * 104);
    }

    #[test]
    fn off_canvas_edges_are_skipped() {
        let edges = [(Point3D::new(1000.0, 1000.0, 0.0), Point3D::new(2000.0, 1000.0, 0.0))];
        let mut screen = ScreenSpace::new(50, 50);
        let plotted = render_wireframe(
            &edges,
            &TransformPipeline::default(),
            &Camera::new(50, 50),
            LineAlgorithm::Bresenham,
            Rgb::WHITE,
            &mut screen,
        );
        assert_eq!(plotted, 0);
    }

    #[test]
    fn camera_plane_edges_are_skipped() {
        let edges = [(Point3D::new(0.0, 0.0, -500.0), Point3D::new(10.0, 0.0, 0.0))];
        let mut screen = ScreenSpace::new(50, 50);
        let plotted = render_wireframe(
            &edges,
            &TransformPipeline::default(),
            &Camera::new(50, 50),
            LineAlgorithm::Linear,
            Rgb::WHITE,
            &mut screen,
        );
        assert_eq!(plotted, 0);
        assert_eq!(screen.count_not(Rgb::BLACK), 0);
    }
}
