//! The [`Cell`] type and its [`Role`].

use crate::geom::Point;

/// What a cell currently represents on the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Empty,
    Start,
    End,
    Wall,
    /// Part of the most recently found shortest path.
    Path,
}

impl Role {
    /// Whether the cell blocks movement.
    #[inline]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Role::Wall)
    }

    /// Short human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Role::Empty => "empty",
            Role::Start => "start",
            Role::End => "end",
            Role::Wall => "wall",
            Role::Path => "path",
        }
    }
}

/// A single grid square: a fixed position plus a mutable role.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    row: i32,
    col: i32,
    pub role: Role,
}

impl Cell {
    /// An empty cell at (row, col).
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self {
            row,
            col,
            role: Role::Empty,
        }
    }

    #[inline]
    pub const fn row(&self) -> i32 {
        self.row
    }

    #[inline]
    pub const fn col(&self) -> i32 {
        self.col
    }

    /// Position as a [`Point`] (`x` = row, `y` = col).
    #[inline]
    pub const fn pos(&self) -> Point {
        Point::new(self.row, self.col)
    }

    /// Set the role (builder).
    #[inline]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    #[inline]
    pub const fn is_wall(&self) -> bool {
        self.role.is_blocking()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_empty() {
        let c = Cell::new(2, 5);
        assert_eq!(c.role, Role::Empty);
        assert_eq!(c.pos(), Point::new(2, 5));
        assert!(!c.is_wall());
    }

    #[test]
    fn only_walls_block() {
        assert!(Role::Wall.is_blocking());
        for r in [Role::Empty, Role::Start, Role::End, Role::Path] {
            assert!(!r.is_blocking(), "{} should not block", r.label());
        }
        assert!(Cell::new(0, 0).with_role(Role::Wall).is_wall());
    }
}
