//! The [`Grid`] model: an N×N array of [`Cell`]s with endpoint/obstacle
//! flags and per-cell search metadata.
//!
//! Cells are stored row-major in a single `Vec`. Everything else that needs
//! to refer to a cell (the frontier, predecessor links, the start/end
//! markers) holds its row-major index, never a copy.

use std::fmt;
use std::str::FromStr;

use pathstep_core::{Point, Range};
use rand::{Rng, RngExt};

use crate::error::{EditError, ParseError};
use crate::traits::{Pather, WeightedPather};

/// Sentinel distance meaning "not reached yet".
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One grid square.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Point,
    pub(crate) obstacle: bool,
    pub(crate) start: bool,
    pub(crate) end: bool,
    pub(crate) visited: bool,
    pub(crate) on_path: bool,
    pub(crate) distance: i32,
    pub(crate) predecessor: Option<usize>,
}

impl Cell {
    fn new(pos: Point) -> Self {
        Self {
            pos,
            obstacle: false,
            start: false,
            end: false,
            visited: false,
            on_path: false,
            distance: UNREACHABLE,
            predecessor: None,
        }
    }

    /// The cell's coordinate. Fixed for the cell's lifetime.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn is_obstacle(&self) -> bool {
        self.obstacle
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.end
    }

    /// Whether the cell has been settled by the current search.
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Whether the cell lies on the reconstructed shortest path.
    #[inline]
    pub fn is_on_path(&self) -> bool {
        self.on_path
    }

    /// Tentative distance from the start, or `None` while unreached.
    #[inline]
    pub fn distance(&self) -> Option<i32> {
        (self.distance != UNREACHABLE).then_some(self.distance)
    }

    /// Which colour class the cell falls in. See [`CellKind`].
    pub fn kind(&self) -> CellKind {
        if self.start {
            CellKind::Start
        } else if self.end {
            CellKind::End
        } else if self.on_path {
            CellKind::Path
        } else if self.obstacle {
            CellKind::Obstacle
        } else if self.visited {
            CellKind::Visited
        } else {
            CellKind::Empty
        }
    }

    #[inline]
    fn is_endpoint(&self) -> bool {
        self.start || self.end
    }

    fn clear_search(&mut self) {
        self.visited = false;
        self.on_path = false;
        self.distance = UNREACHABLE;
        self.predecessor = None;
    }
}

/// The single flag a renderer should show for a cell, resolved by priority
/// start > end > path > obstacle > visited > empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Start,
    End,
    Path,
    Obstacle,
    Visited,
    Empty,
}

impl CellKind {
    /// Glyph used by the text layout format.
    pub const fn glyph(self) -> char {
        match self {
            Self::Start => 'S',
            Self::End => 'E',
            Self::Path => '*',
            Self::Obstacle => '#',
            Self::Visited => 'o',
            Self::Empty => '.',
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A square grid of [`Cell`]s.
///
/// The shape is fixed at construction; only cell contents change. At most
/// one cell is the start, at most one is the end, and neither is ever an
/// obstacle.
#[derive(Debug, Clone)]
pub struct Grid {
    rng: Range,
    cells: Vec<Cell>,
    start: Option<usize>,
    end: Option<usize>,
}

impl Grid {
    /// Create an `n`×`n` grid of fresh cells. Sizes below 1 give a 1×1 grid.
    pub fn new(n: i32) -> Self {
        let rng = Range::square(n.max(1));
        Self {
            rng,
            cells: rng.iter().map(Cell::new).collect(),
            start: None,
            end: None,
        }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> i32 {
        self.rng.width()
    }

    /// The rectangle covered by the grid.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.rng.contains(p)
    }

    /// Row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.rng.index_of(p)
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        self.cells[idx].pos
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    #[inline]
    pub(crate) fn cell_at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// The cell at `p`, or `None` if out of bounds.
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Render class of the cell at `p`.
    pub fn kind(&self, p: Point) -> Option<CellKind> {
        self.cell(p).map(Cell::kind)
    }

    /// Current start cell.
    pub fn start(&self) -> Option<Point> {
        self.start.map(|i| self.point(i))
    }

    /// Current end cell.
    pub fn end(&self) -> Option<Point> {
        self.end.map(|i| self.point(i))
    }

    #[inline]
    pub(crate) fn start_idx(&self) -> Option<usize> {
        self.start
    }

    #[inline]
    pub(crate) fn end_idx(&self) -> Option<usize> {
        self.end
    }

    /// Tentative distance of the cell at `p`.
    pub fn distance(&self, p: Point) -> Option<i32> {
        self.cell(p).and_then(Cell::distance)
    }

    /// The cell from which `p`'s current best distance was reached.
    pub fn predecessor(&self, p: Point) -> Option<Point> {
        self.cell(p)
            .and_then(|c| c.predecessor)
            .map(|i| self.point(i))
    }

    /// Number of settled cells.
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|c| c.visited).count()
    }

    /// Number of cells flagged as lying on the shortest path.
    pub fn path_len(&self) -> usize {
        self.cells.iter().filter(|c| c.on_path).count()
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|c| c.obstacle).count()
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Make `p` the start cell, moving the flag if a start already exists.
    ///
    /// Rejected if `p` is the end cell. An obstacle at `p` is cleared.
    pub fn set_start(&mut self, p: Point) -> Result<(), EditError> {
        let i = self.idx(p).ok_or(EditError::OutOfBounds(p))?;
        if self.cells[i].end {
            return Err(EditError::Endpoint(p));
        }
        if let Some(old) = self.start.take() {
            self.cells[old].start = false;
        }
        let c = &mut self.cells[i];
        c.start = true;
        c.obstacle = false;
        self.start = Some(i);
        Ok(())
    }

    /// Make `p` the end cell, moving the flag if an end already exists.
    ///
    /// Rejected if `p` is the start cell. An obstacle at `p` is cleared.
    pub fn set_end(&mut self, p: Point) -> Result<(), EditError> {
        let i = self.idx(p).ok_or(EditError::OutOfBounds(p))?;
        if self.cells[i].start {
            return Err(EditError::Endpoint(p));
        }
        if let Some(old) = self.end.take() {
            self.cells[old].end = false;
        }
        let c = &mut self.cells[i];
        c.end = true;
        c.obstacle = false;
        self.end = Some(i);
        Ok(())
    }

    fn editable(&self, p: Point) -> Result<usize, EditError> {
        let i = self.idx(p).ok_or(EditError::OutOfBounds(p))?;
        if self.cells[i].is_endpoint() {
            return Err(EditError::Endpoint(p));
        }
        Ok(i)
    }

    /// Flip the obstacle flag at `p` and return the new value.
    pub fn toggle_obstacle(&mut self, p: Point) -> Result<bool, EditError> {
        let i = self.editable(p)?;
        let c = &mut self.cells[i];
        c.obstacle = !c.obstacle;
        Ok(c.obstacle)
    }

    /// Set the obstacle flag at `p` to `value`.
    pub fn set_obstacle(&mut self, p: Point, value: bool) -> Result<(), EditError> {
        let i = self.editable(p)?;
        self.cells[i].obstacle = value;
        Ok(())
    }

    /// Remove every obstacle.
    pub fn clear_obstacles(&mut self) {
        for c in &mut self.cells {
            c.obstacle = false;
        }
    }

    /// Re-roll the obstacle layout: every non-endpoint cell becomes an
    /// obstacle with probability `density` (clamped to 0..=1). Returns the
    /// resulting number of obstacles.
    pub fn scatter_obstacles<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) -> usize {
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        let mut placed = 0;
        for c in self.cells.iter_mut().filter(|c| !c.is_endpoint()) {
            c.obstacle = rng.random_bool(density);
            if c.obstacle {
                placed += 1;
            }
        }
        placed
    }

    /// Reset visited/path/distance/predecessor on every cell, keeping the
    /// layout.
    pub fn clear_search(&mut self) {
        for c in &mut self.cells {
            c.clear_search();
        }
    }

    /// Walk predecessor links back from `end`, flagging each cell as on the
    /// path. Returns the path ordered from start to `end`.
    pub(crate) fn mark_path(&mut self, end: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(end);
        // Predecessors form a tree, but cap the walk at the cell count anyway.
        while let Some(i) = cur {
            if path.len() >= self.cells.len() {
                break;
            }
            let c = &mut self.cells[i];
            c.on_path = true;
            path.push(c.pos);
            cur = c.predecessor;
        }
        path.reverse();
        path
    }
}

impl Pather for Grid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.cardinal() {
            if let Some(i) = self.idx(n) {
                if !self.cells[i].obstacle {
                    buf.push(n);
                }
            }
        }
    }
}

impl WeightedPather for Grid {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

// ---------------------------------------------------------------------------
// Text layout
// ---------------------------------------------------------------------------

impl FromStr for Grid {
    type Err = ParseError;

    /// Parse a square layout: `.` empty, `#` obstacle, `S` start, `E` end.
    /// Blank lines and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(ParseError::Empty);
        }
        let n = rows.len();
        for (row, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != n {
                return Err(ParseError::NotSquare {
                    row,
                    width,
                    expected: n,
                });
            }
        }

        let mut grid = Grid::new(n as i32);
        for (y, line) in rows.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let i = y * n + x;
                match ch {
                    '.' => {}
                    '#' => grid.cells[i].obstacle = true,
                    'S' => {
                        if grid.start.is_some() {
                            return Err(ParseError::DuplicateStart(pos));
                        }
                        grid.cells[i].start = true;
                        grid.start = Some(i);
                    }
                    'E' => {
                        if grid.end.is_some() {
                            return Err(ParseError::DuplicateEnd(pos));
                        }
                        grid.cells[i].end = true;
                        grid.end = Some(i);
                    }
                    _ => return Err(ParseError::InvalidChar { ch, pos }),
                }
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    /// One line per row using [`CellKind::glyph`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.size() as usize;
        for row in self.cells.chunks(w) {
            for c in row {
                write!(f, "{}", c.kind().glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
