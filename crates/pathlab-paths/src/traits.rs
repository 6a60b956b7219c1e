use pathlab_core::{Grid, Point};

use crate::distance::manhattan;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    ///
    /// The order of appended points decides tie-breaking in searches, so it
    /// must be stable for identical inputs.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> i32;
}

// ---------------------------------------------------------------------------
// Borrowed pathers
// ---------------------------------------------------------------------------

impl<P: Pather + ?Sized> Pather for &P {
    #[inline]
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        (**self).neighbors(p, buf)
    }
}

impl<P: WeightedPather + ?Sized> WeightedPather for &P {
    #[inline]
    fn cost(&self, from: Point, to: Point) -> i32 {
        (**self).cost(from, to)
    }
}

impl<P: AstarPather + ?Sized> AstarPather for &P {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> i32 {
        (**self).estimate(from, to)
    }
}

// ---------------------------------------------------------------------------
// Grid: 4-way, unit cost, Manhattan estimate
// ---------------------------------------------------------------------------

impl Pather for Grid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(Grid::neighbors(self, p));
    }
}

impl WeightedPather for Grid {
    #[inline]
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for Grid {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathlab_core::Role;

    #[test]
    fn grid_pather_matches_grid_neighbors() {
        let mut g = Grid::new(4);
        g.set_role(Point::new(2, 1), Role::Wall).unwrap();
        let mut buf = Vec::new();
        Pather::neighbors(&g, Point::new(1, 1), &mut buf);
        let direct: Vec<_> = g.neighbors(Point::new(1, 1)).collect();
        assert_eq!(buf, direct);
        assert_eq!(g.cost(Point::new(1, 1), Point::new(1, 2)), 1);
        assert_eq!(g.estimate(Point::new(0, 0), Point::new(3, 2)), 5);
    }

    #[test]
    fn borrowed_pather_delegates() {
        let g = Grid::new(3);
        let r = &g;
        let mut buf = Vec::new();
        Pather::neighbors(&r, Point::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(1, 0), Point::new(0, 1)]);
        assert_eq!(AstarPather::estimate(&r, Point::new(0, 0), Point::new(2, 2)), 4);
    }
}
