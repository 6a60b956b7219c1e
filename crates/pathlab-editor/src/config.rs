//! Session configuration.

use pathlab_core::Point;

/// Board dimensions and pixel geometry, fixed for the life of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Side length of the square board.
    pub rows: i32,
    /// Side length of one cell in pixel units.
    pub cell_size: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: 25,
            cell_size: 26,
        }
    }
}

impl SessionConfig {
    /// Set the board size (builder).
    pub const fn with_rows(mut self, rows: i32) -> Self {
        self.rows = rows;
        self
    }

    /// Set the cell size in pixels (builder).
    pub const fn with_cell_size(mut self, cell_size: i32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Side length of the board in pixels.
    pub const fn extent(&self) -> i32 {
        self.rows * self.cell_size
    }

    /// Map pixel coordinates to a cell: `x` picks the row, `y` the column.
    ///
    /// Returns `None` outside the board or when the cell size is not
    /// positive.
    pub fn cell_at_pixel(&self, x: i32, y: i32) -> Option<Point> {
        if self.cell_size <= 0 || x < 0 || y < 0 {
            return None;
        }
        let p = Point::new(x / self.cell_size, y / self.cell_size);
        (p.x < self.rows && p.y < self.rows).then_some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_650px_board() {
        let c = SessionConfig::default();
        assert_eq!(c.rows, 25);
        assert_eq!(c.extent(), 650);
    }

    #[test]
    fn pixel_mapping_x_is_row() {
        let c = SessionConfig::default();
        assert_eq!(c.cell_at_pixel(0, 0), Some(Point::new(0, 0)));
        assert_eq!(c.cell_at_pixel(27, 3), Some(Point::new(1, 0)));
        assert_eq!(c.cell_at_pixel(3, 53), Some(Point::new(0, 2)));
        assert_eq!(c.cell_at_pixel(649, 649), Some(Point::new(24, 24)));
    }

    #[test]
    fn pixel_mapping_rejects_outside() {
        let c = SessionConfig::default();
        assert_eq!(c.cell_at_pixel(650, 10), None);
        assert_eq!(c.cell_at_pixel(10, 700), None);
        assert_eq!(c.cell_at_pixel(-1, 0), None);
        assert_eq!(c.with_cell_size(0).cell_at_pixel(1, 1), None);
    }
}
