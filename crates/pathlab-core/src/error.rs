//! The [`Error`] type shared by the grid, the search and the editor.

use std::fmt;

use crate::geom::Point;

/// Which endpoint a search was missing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Missing {
    Start,
    End,
    Both,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
            Self::Both => f.write_str("start and end"),
        }
    }
}

/// Errors reported by pathlab operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A position outside `[0, size)` on either axis.
    OutOfBounds { pos: Point, size: i32 },
    /// A search was requested before both endpoints were placed.
    PreconditionNotMet { missing: Missing },
    /// The frontier emptied before reaching the end cell.
    NotFound,
    /// Serialized grid data that does not describe a `size`×`size` board.
    MalformedGrid { size: i32, cells: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, size } => {
                write!(f, "cell {pos} is outside the {size}x{size} grid")
            }
            Self::PreconditionNotMet { missing } => {
                write!(f, "cannot search: {missing} not placed")
            }
            Self::NotFound => f.write_str("no path between start and end"),
            Self::MalformedGrid { size, cells } => {
                write!(f, "{cells} cells do not form a {size}x{size} grid")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = Error::OutOfBounds {
            pos: Point::new(5, -1),
            size: 5,
        };
        assert_eq!(e.to_string(), "cell (5, -1) is outside the 5x5 grid");
        let e = Error::PreconditionNotMet {
            missing: Missing::Both,
        };
        assert_eq!(e.to_string(), "cannot search: start and end not placed");
        assert_eq!(Error::NotFound.to_string(), "no path between start and end");
        let e = Error::MalformedGrid { size: 3, cells: 8 };
        assert_eq!(e.to_string(), "8 cells do not form a 3x3 grid");
    }
}
