//! Binary pixel grids and the fills that operate on them.
//!
//! Fills never touch their input: each returns a fresh grid.

use crate::error::{RasterError, Result};
use crate::rectangle::Rect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Four,
    Eight,
}

const NEIGHBORS_4: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const NEIGHBORS_8: [(i64, i64); 8] = [
    (0, -1), (0, 1), (-1, 0), (1, 0),
    (-1, -1), (1, -1), (-1, 1), (1, 1),
];

impl Connectivity {
    fn offsets(self) -> &'static [(i64, i64)] {
        match self {
            Connectivity::Four => &NEIGHBORS_4,
            Connectivity::Eight => &NEIGHBORS_8,
        }
    }
}

impl TryFrom<u8> for Connectivity {
    type Error = RasterError;
    fn try_from(n: u8) -> Result<Self> {
        match n {
            4 => Ok(Connectivity::Four),
            8 => Ok(Connectivity::Eight),
            _ => Err(RasterError::parameter("connectivity", format!("{n} is neither 4 nor 8"))),
        }
    }
}

impl PixelGrid {
    /// All-empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![false; width * height] }
    }

    /// Build from rows of `0`/`1`; rows must share one length.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(RasterError::InvalidGeometry(format!(
                    "row {y} has {} cells, expected {width}",
                    row.len()
                )));
            }
            for &v in row {
                match v {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    _ => return Err(RasterError::parameter("cell", format!("{v} in row {y} is not 0 or 1"))),
                }
            }
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    pub fn set(&mut self, x: usize, y: usize, filled: bool) -> Result<()> {
        let i = self.index(x as i64, y as i64)?;
        self.cells[i] = filled;
        Ok(())
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width.max(1))
            .take(self.height)
            .map(|row| row.iter().map(|&c| c as u8).collect())
            .collect()
    }

    fn index(&self, x: i64, y: i64) -> Result<usize> {
        if x < 0 || x as usize >= self.width {
            return Err(RasterError::out_of_range("column", x, self.width));
        }
        if y < 0 || y as usize >= self.height {
            return Err(RasterError::out_of_range("row", y, self.height));
        }
        Ok(y as usize * self.width + x as usize)
    }
}

/// Flip every cell inside the inclusive `bbox`. Applying it twice restores
/// the original grid.
pub fn invert_bounding_box(grid: &PixelGrid, bbox: Rect) -> Result<PixelGrid> {
    let bbox = bbox.normalized();
    grid.index(bbox.min_x as i64, bbox.min_y as i64)?;
    grid.index(bbox.max_x as i64, bbox.max_y as i64)?;

    let mut out = grid.clone();
    for y in bbox.min_y as usize..=bbox.max_y as usize {
        let row = y * out.width;
        for cell in &mut out.cells[row + bbox.min_x as usize..=row + bbox.max_x as usize] {
            *cell = !*cell;
        }
    }
    Ok(out)
}

/// Iterative flood fill from `(seed_x, seed_y)`.
///
/// The fill value doubles as the visited marker, so seeding inside an
/// already filled region leaves the grid unchanged.
pub fn flood_fill(grid: &PixelGrid, seed_x: usize, seed_y: usize, connectivity: Connectivity) -> Result<PixelGrid> {
    grid.index(seed_x as i64, seed_y as i64)?;

    let mut out = grid.clone();
    let mut stack: Vec<(i64, i64)> = vec![(seed_x as i64, seed_y as i64)];
    let (w, h) = (out.width as i64, out.height as i64);

    while let Some((x, y)) = stack.pop() {
        if x < 0 || y < 0 || x >= w || y >= h {
            continue;
        }
        let i = (y * w + x) as usize;
        if out.cells[i] {
            continue;
        }
        out.cells[i] = true;
        for (dx, dy) in connectivity.offsets() {
            stack.push((x + dx, y + dy));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> PixelGrid {
        PixelGrid::from_rows(&[
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 1, 0, 1, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0],
        ])
        .unwrap()
    }

    #[test]
    fn flood_fill_empty_grid_fills_everything() {
        let grid = PixelGrid::new(5, 5);
        let filled = flood_fill(&grid, 2, 2, Connectivity::Four).unwrap();
        assert_eq!(filled.filled_count(), 25);
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn flood_fill_stays_inside_boundary() {
        let filled = flood_fill(&ring(), 2, 2, Connectivity::Four).unwrap();
        assert_eq!(filled.filled_count(), 9);
        let outside = flood_fill(&ring(), 0, 0, Connectivity::Four).unwrap();
        assert_eq!(outside.filled_count(), 24);
        assert_eq!(outside.get(2, 2), Some(false));
    }

    #[test]
    fn eight_connectivity_leaks_through_diagonals() {
        let grid = PixelGrid::from_rows(&[
            vec![0, 1, 0],
            vec![1, 0, 1],
            vec![0, 1, 0],
        ])
        .unwrap();
        let four = flood_fill(&grid, 1, 1, Connectivity::Four).unwrap();
        assert_eq!(four.filled_count(), 5);
        let eight = flood_fill(&grid, 1, 1, Connectivity::Eight).unwrap();
        assert_eq!(eight.filled_count(), 9);
    }

    #[test]
    fn flood_fill_on_filled_seed_is_noop() {
        let grid = ring();
        assert_eq!(flood_fill(&grid, 1, 1, Connectivity::Eight).unwrap(), grid);
    }

    #[test]
    fn invert_box_twice_is_identity() {
        let grid = ring();
        let bbox = Rect::new(3, 3, 1, 0);
        let once = invert_bounding_box(&grid, bbox).unwrap();
        assert_eq!(once.to_rows()[0], vec![0, 1, 1, 1, 0]);
        assert_eq!(once.to_rows()[2], vec![0, 0, 1, 0, 0]);
        assert_eq!(once.to_rows()[4], vec![0, 0, 0, 0, 0]);
        assert_eq!(invert_bounding_box(&once, bbox).unwrap(), grid);
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        let grid = PixelGrid::new(3, 3);
        assert!(matches!(
            invert_bounding_box(&grid, Rect::new(0, 0, 3, 1)),
            Err(RasterError::IndexOutOfRange { what: "column", index: 3, len: 3 })
        ));
        assert!(flood_fill(&grid, 0, 7, Connectivity::Four).is_err());
        assert!(Connectivity::try_from(6).is_err());
        assert!(PixelGrid::from_rows(&[vec![0, 2]]).is_err());
        assert!(PixelGrid::from_rows(&[vec![0, 1], vec![1]]).is_err());
    }
}
