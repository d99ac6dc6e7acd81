/// Inclusive integer box `[min_x, max_x] x [min_y, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

// helper methods
impl Rect {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Same box with the corners swapped into min <= max order.
    pub fn normalized(&self) -> Rect {
        Rect {
            min_x: self.min_x.min(self.max_x),
            min_y: self.min_y.min(self.max_y),
            max_x: self.min_x.max(self.max_x),
            max_y: self.min_y.max(self.max_y),
        }
    }
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x + 1).max(0) as u32
    }
    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y + 1).max(0) as u32
    }
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}
