use bytemuck::cast_slice;

use crate::color::Rgb;
use crate::point2d::Pixel;

/// Render target for one pass: an RGBA color surface and a depth buffer of
/// the same size. Depth starts at +inf and only ever decreases until the
/// next `clear`.
pub struct ScreenSpace {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<[u8; 4]>,
    pub depth: Vec<f64>,
}

impl ScreenSpace {
    pub fn new(width: u32, height: u32) -> Self {
        let size_calc = width as usize * height as usize;
        Self {
            width,
            height,
            rgba: vec![Rgb::BLACK.to_rgba(); size_calc],
            depth: vec![f64::INFINITY; size_calc],
        }
    }
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.rgba[i] = color.to_rgba();
        }
    }
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        let i = self.index(x, y)?;
        let [r, g, b, _] = self.rgba[i];
        Some(Rgb::new(r, g, b))
    }
    pub fn set_depth(&mut self, x: i32, y: i32, value: f64) {
        if let Some(i) = self.index(x, y) {
            self.depth[i] = value;
        }
    }
    /// +inf for untouched or off-canvas pixels.
    pub fn get_depth(&self, x: i32, y: i32) -> f64 {
        self.index(x, y).map_or(f64::INFINITY, |i| self.depth[i])
    }
    /// Write `color` if `depth` is strictly nearer than what the pixel holds.
    /// Off-canvas pixels and NaN depths never pass.
    pub fn depth_test_and_set(&mut self, x: i32, y: i32, depth: f64, color: Rgb) -> bool {
        let Some(i) = self.index(x, y) else { return false };
        if depth < self.depth[i] {
            self.depth[i] = depth;
            self.rgba[i] = color.to_rgba();
            true
        } else {
            false
        }
    }
    /// Stamp a `size` x `size` square at each point, clipped to the canvas.
    /// Returns how many points landed at least partly on screen.
    pub fn plot_points(&mut self, points: &[Pixel], color: Rgb, size: u32) -> usize {
        let size = size.max(1) as i32;
        let mut plotted = 0;
        for p in points {
            let mut hit = false;
            for dy in 0..size {
                for dx in 0..size {
                    if self.index(p.x + dx, p.y + dy).is_some() {
                        self.set_pixel(p.x + dx, p.y + dy, color);
                        hit = true;
                    }
                }
            }
            plotted += hit as usize;
        }
        plotted
    }
    pub fn clear(&mut self, color: Rgb) {
        self.rgba.fill(color.to_rgba());
        self.depth.fill(f64::INFINITY);
    }
    /// Tightly packed RGBA8 rows, ready to hand to a blitter.
    pub fn as_bytes(&self) -> &[u8] {
        cast_slice(&self.rgba)
    }
    pub fn count_not(&self, background: Rgb) -> usize {
        let bg = background.to_rgba();
        self.rgba.iter().filter(|px| **px != bg).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearer_depth_wins() {
        let mut s = ScreenSpace::new(4, 4);
        assert!(s.depth_test_and_set(1, 1, 5.0, Rgb::RED));
        assert!(!s.depth_test_and_set(1, 1, 5.0, Rgb::BLUE));
        assert!(!s.depth_test_and_set(1, 1, 9.0, Rgb::BLUE));
        assert!(s.depth_test_and_set(1, 1, -2.0, Rgb::GREEN));
        assert_eq!(s.get_pixel(1, 1), Some(Rgb::GREEN));
        assert_eq!(s.get_depth(1, 1), -2.0);
        assert!(!s.depth_test_and_set(1, 2, f64::NAN, Rgb::RED));
        assert!(!s.depth_test_and_set(-1, 2, 0.0, Rgb::RED));
    }

    #[test]
    fn wide_canvas_indexes_past_u16_range() {
        let mut s = ScreenSpace::new(70_000, 2);
        assert_eq!(s.rgba.len(), 140_000);
        s.set_pixel(69_999, 1, Rgb::RED);
        assert_eq!(s.get_pixel(69_999, 1), Some(Rgb::RED));
        assert_eq!(s.get_pixel(70_000, 1), None);
    }

    #[test]
    fn plot_points_clips_brush() {
        let mut s = ScreenSpace::new(3, 3);
        let n = s.plot_points(&[Pixel::new(2, 2), Pixel::new(-1, -1), Pixel::new(9, 9)], Rgb::WHITE, 2);
        assert_eq!(n, 2);
        assert_eq!(s.count_not(Rgb::BLACK), 2);
        assert_eq!(s.get_pixel(0, 0), Some(Rgb::WHITE));
    }

    #[test]
    fn clear_resets_color_and_depth() {
        let mut s = ScreenSpace::new(2, 1);
        s.depth_test_and_set(0, 0, 1.0, Rgb::RED);
        s.clear(Rgb::new(1, 2, 3));
        assert_eq!(s.as_bytes(), &[1, 2, 3, 255, 1, 2, 3, 255]);
        assert_eq!(s.get_depth(0, 0), f64::INFINITY);
        s.set_depth(1, 0, 3.0);
        s.set_depth(5, 5, 3.0);
        assert_eq!(s.get_depth(1, 0), 3.0);
        assert!(!s.depth_test_and_set(1, 0, 4.0, Rgb::RED));
    }
}
