//! Events yielded by incremental searches: [`SearchEvent`], [`SearchOutcome`],
//! [`Path`].

use pathlab_core::Point;

/// A shortest path from start to end, both endpoints included.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Point>,
    cost: i32,
}

impl Path {
    pub(crate) fn new(cells: Vec<Point>, cost: i32) -> Self {
        Self { cells, cost }
    }

    /// Points from start to end inclusive.
    #[inline]
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// Total cost, the g-score of the end point.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Number of points on the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of steps between consecutive points.
    #[inline]
    pub fn edges(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// First point.
    pub fn start(&self) -> Option<Point> {
        self.cells.first().copied()
    }

    /// Last point.
    pub fn end(&self) -> Option<Point> {
        self.cells.last().copied()
    }

    /// Points strictly between the endpoints.
    pub fn interior(&self) -> &[Point] {
        match self.cells.len() {
            0..=2 => &[],
            n => &self.cells[1..n - 1],
        }
    }

    pub fn into_cells(self) -> Vec<Point> {
        self.cells
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The end point was reached.
    Found(Path),
    /// The frontier emptied first.
    NotFound,
    /// The caller-supplied step limit ran out after `steps` expansions.
    Exhausted { steps: usize },
    /// The cancel token was triggered.
    Cancelled,
}

impl SearchOutcome {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// One step of an incremental search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// `pos` was popped from the frontier and its neighbours relaxed.
    ///
    /// `opened` lists the points pushed onto the frontier by this step, in
    /// push order.
    Expand {
        pos: Point,
        g: i32,
        f: i32,
        opened: Vec<Point>,
    },
    /// The search ended. Always the last event.
    Done(SearchOutcome),
}

impl SearchEvent {
    /// The outcome carried by a [`SearchEvent::Done`].
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        match self {
            Self::Done(o) => Some(o),
            Self::Expand { .. } => None,
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }
}
