//! The [`Grid`] type, a square board of [`Cell`]s.
//!
//! Adjacency is never stored: [`Grid::neighbors`] reads the current roles on
//! every call, so wall edits are visible to the next query immediately.

use crate::cell::{Cell, Role};
use crate::error::{Error, Result};
use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// An N×N board of cells stored row-major.
///
/// Deserialization checks that the document holds exactly `size²` cells laid
/// out row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridData"))]
pub struct Grid {
    cells: Vec<Cell>,
    size: i32,
}

/// Unchecked wire form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridData {
    cells: Vec<Cell>,
    size: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<GridData> for Grid {
    type Error = Error;

    fn try_from(data: GridData) -> Result<Self> {
        let GridData { cells, size } = data;
        let well_formed = size >= 0
            && cells.len() == (size as usize) * (size as usize)
            && cells
                .iter()
                .zip(Range::new(0, 0, size, size).iter())
                .all(|(c, p)| c.pos() == p);
        if !well_formed {
            return Err(Error::MalformedGrid {
                size,
                cells: cells.len(),
            });
        }
        Ok(Self { cells, size })
    }
}

impl Grid {
    /// Create an `n`×`n` grid of empty cells. Negative sizes yield an empty
    /// grid.
    pub fn new(n: i32) -> Self {
        let size = n.max(0);
        let cells = Range::new(0, 0, size, size)
            .iter()
            .map(|p| Cell::new(p.x, p.y))
            .collect();
        Self { cells, size }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// The bounding range `[0, n)²`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.size, self.size)
    }

    /// Whether `p` is on the board.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.x as usize * self.size as usize + p.y as usize)
    }

    /// The cell at `p`, or `None` if off the board.
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.index(p).and_then(|i| self.cells.get(i))
    }

    /// The role at `p`, or `None` if off the board.
    #[inline]
    pub fn role(&self, p: Point) -> Option<Role> {
        self.cell(p).map(|c| c.role)
    }

    /// Whether `p` is on the board and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.cell(p).is_some_and(|c| !c.is_wall())
    }

    /// Assign `role` to the cell at `p`.
    ///
    /// Only the bounds are checked; keeping a single start and end is up to
    /// the caller.
    pub fn set_role(&mut self, p: Point, role: Role) -> Result<()> {
        let size = self.size;
        let cell = self
            .index(p)
            .and_then(|i| self.cells.get_mut(i))
            .ok_or(Error::OutOfBounds { pos: p, size })?;
        cell.role = role;
        Ok(())
    }

    /// Reset every cell holding `role` to [`Role::Empty`]. Returns how many
    /// cells changed.
    pub fn clear_role(&mut self, role: Role) -> usize {
        let mut n = 0;
        for c in self.cells.iter_mut().filter(|c| c.role == role) {
            c.role = Role::Empty;
            n += 1;
        }
        n
    }

    /// Positions holding `role`, row-major.
    pub fn positions_of(&self, role: Role) -> impl Iterator<Item = Point> + '_ {
        self.cells
            .iter()
            .filter(move |c| c.role == role)
            .map(Cell::pos)
    }

    /// Open orthogonal neighbours of `p` in the order down, up, right, left.
    ///
    /// Off-board points and walls are skipped. Whether `p` itself is a wall
    /// does not matter.
    pub fn neighbors(&self, p: Point) -> Neighbors {
        let mut out = Neighbors::default();
        for n in p.neighbors_4() {
            if self.is_passable(n) {
                out.push(n);
            }
        }
        out
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Neighbors
// ---------------------------------------------------------------------------

/// Up to four neighbour positions, returned by [`Grid::neighbors`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Neighbors {
    buf: [Point; 4],
    len: usize,
    next: usize,
}

impl Neighbors {
    #[inline]
    fn push(&mut self, p: Point) {
        self.buf[self.len] = p;
        self.len += 1;
    }

    /// Remaining neighbours as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.buf[self.next..self.len]
    }
}

impl Iterator for Neighbors {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        if self.next >= self.len {
            return None;
        }
        let p = self.buf[self.next];
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Neighbors {}
