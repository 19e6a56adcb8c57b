//! Error types for grid edits, layout parsing and stepping.

use std::fmt;

use pathstep_core::Point;

/// Why a grid edit was rejected. A rejected edit never mutates the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// The coordinate does not resolve to a cell.
    OutOfBounds(Point),
    /// The cell is the start or end cell and cannot take this edit.
    Endpoint(Point),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "cell {p} is outside the grid"),
            Self::Endpoint(p) => write!(f, "cell {p} is already a start or end point"),
        }
    }
}

impl std::error::Error for EditError {}

/// A step could not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Start or end (or both) is unset; nothing was changed.
    MissingEndpoints,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoints => f.write_str("Set start and end points first!"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Errors that can occur when parsing an ASCII grid layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The layout has no rows.
    Empty,
    /// A row's width differs from the number of rows.
    NotSquare { row: usize, width: usize, expected: usize },
    /// A character outside `.`, `#`, `S`, `E` was found.
    InvalidChar { ch: char, pos: Point },
    /// More than one `S`.
    DuplicateStart(Point),
    /// More than one `E`.
    DuplicateEnd(Point),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("layout: no rows"),
            Self::NotSquare {
                row,
                width,
                expected,
            } => write!(f, "layout: row {row} has width {width}, expected {expected}"),
            Self::InvalidChar { ch, pos } => {
                write!(f, "layout contains invalid char \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateStart(p) => write!(f, "layout: second start point at {p}"),
            Self::DuplicateEnd(p) => write!(f, "layout: second end point at {p}"),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_endpoints_message_is_user_facing() {
        assert_eq!(
            SearchError::MissingEndpoints.to_string(),
            "Set start and end points first!"
        );
    }

    #[test]
    fn edit_error_mentions_cell() {
        let e = EditError::OutOfBounds(Point::new(-1, 4));
        assert!(e.to_string().contains("(-1, 4)"));
    }

    #[test]
    fn parse_error_display() {
        let e = ParseError::InvalidChar {
            ch: '?',
            pos: Point::new(2, 0),
        };
        assert_eq!(
            e.to_string(),
            "layout contains invalid char \u{201c}?\u{201d} at (2, 0)"
        );
    }
}
