//! The resumable search: one node settled per [`StepSearch::step`] call.
//!
//! ```text
//! Uninitialized --step--> Active --step*--> Done(Found | NoPath)
//!       ^                                        |
//!       +------------------ reset ---------------+
//! ```
//!
//! The first successful `step` only seeds the search (start at distance 0,
//! frontier = {start}); expansions begin with the second call.

use std::fmt;

use log::{debug, trace};
use pathstep_core::Point;

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::grid::Grid;
use crate::traits::{Pather, WeightedPather};

/// How a finished search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The end cell was settled and the path marked.
    Found,
    /// The frontier ran dry before reaching the end cell.
    NoPath,
}

/// Where the search is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Uninitialized,
    Active,
    Done(Outcome),
}

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepStatus {
    /// Search state was seeded; nothing expanded yet.
    Started { start: Point, end: Point },
    /// `pos` was settled at `distance` and its neighbours relaxed.
    Visited { pos: Point, distance: i32 },
    /// The end cell was settled at `distance`; the path has `cells` cells.
    Found { distance: i32, cells: usize },
    /// The frontier is exhausted and the end was never reached.
    NoPath,
    /// The search had already finished; nothing changed.
    Finished(Outcome),
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { .. } => f.write_str("Algorithm started. Press Next Step or Auto Run."),
            Self::Visited { pos, .. } => write!(f, "Visited cell ({}, {}).", pos.y, pos.x),
            Self::Found { distance, .. } => {
                write!(f, "Shortest path found! Distance {distance}.")
            }
            Self::Finished(Outcome::Found) => f.write_str("Shortest path found!"),
            Self::NoPath | Self::Finished(Outcome::NoPath) => f.write_str("No path found!"),
        }
    }
}

/// Result of one [`StepSearch::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Whether another call can still make progress.
    pub more_work: bool,
    pub status: StepStatus,
}

impl Step {
    fn more(status: StepStatus) -> Self {
        Self {
            more_work: true,
            status,
        }
    }

    fn last(status: StepStatus) -> Self {
        Self {
            more_work: false,
            status,
        }
    }

    /// Text suitable for showing to the user as-is.
    pub fn message(&self) -> String {
        self.status.to_string()
    }
}

/// Single-source shortest-path search that advances one settle at a time.
///
/// The engine holds only the frontier and lifecycle; all per-cell metadata
/// lives in the [`Grid`] passed to each call.
#[derive(Debug, Default, Clone)]
pub struct StepSearch {
    phase: Phase,
    frontier: Frontier,
    start: usize,
    end: usize,
    cells: usize,
    settled: usize,
    path: Vec<Point>,
    // scratch buffer for neighbor queries
    nbuf: Vec<Point>,
}

impl StepSearch {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The outcome, once the search is done.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Done(o) => Some(o),
            _ => None,
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done(_))
    }

    /// The shortest path from start to end, once found. Empty otherwise.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Cells settled so far in this search.
    pub fn settled(&self) -> usize {
        self.settled
    }

    /// Frontier entries still queued (stale duplicates included).
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Drop all search state and return to `Uninitialized`.
    ///
    /// Cell metadata in the grid is left alone; it is cleared by the next
    /// initialising step, or explicitly with [`Grid::clear_search`].
    pub fn reset(&mut self) {
        self.phase = Phase::Uninitialized;
        self.frontier.clear();
        self.settled = 0;
        self.path.clear();
    }

    /// Perform one unit of work on `grid`.
    ///
    /// Fails with [`SearchError::MissingEndpoints`] without touching
    /// anything if the grid lacks a start or end. A search whose endpoints
    /// or grid shape changed underneath it starts over.
    pub fn step(&mut self, grid: &mut Grid) -> Result<Step, SearchError> {
        let (Some(start), Some(end)) = (grid.start_idx(), grid.end_idx()) else {
            return Err(SearchError::MissingEndpoints);
        };

        if self.phase != Phase::Uninitialized
            && (start != self.start || end != self.end || grid.len() != self.cells)
        {
            debug!("search: endpoints or grid changed, restarting");
            self.reset();
        }

        match self.phase {
            Phase::Uninitialized => Ok(self.init(grid, start, end)),
            Phase::Done(outcome) => Ok(Step::last(StepStatus::Finished(outcome))),
            Phase::Active => Ok(self.expand(grid)),
        }
    }

    fn init(&mut self, grid: &mut Grid, start: usize, end: usize) -> Step {
        grid.clear_search();
        grid.cell_mut(start).distance = 0;

        self.frontier.clear();
        self.frontier.push(start, 0);
        self.start = start;
        self.end = end;
        self.cells = grid.len();
        self.settled = 0;
        self.path.clear();
        self.phase = Phase::Active;

        let (sp, ep) = (grid.point(start), grid.point(end));
        debug!("search: started from {sp} towards {ep}");
        Step::more(StepStatus::Started { start: sp, end: ep })
    }

    fn expand(&mut self, grid: &mut Grid) -> Step {
        let Some((ci, _)) = self.frontier.pop_min(|i| grid.cell_at(i).visited) else {
            self.phase = Phase::Done(Outcome::NoPath);
            debug!("search: no path after settling {} cells", self.settled);
            return Step::last(StepStatus::NoPath);
        };

        let current = grid.cell_mut(ci);
        current.visited = true;
        let current_g = current.distance;
        self.settled += 1;
        let cp = grid.point(ci);
        trace!("search: settled {cp} at {current_g}");

        if ci == self.end {
            self.path = grid.mark_path(ci);
            self.phase = Phase::Done(Outcome::Found);
            debug!(
                "search: reached {cp} at distance {current_g} after settling {} cells",
                self.settled
            );
            return Step::last(StepStatus::Found {
                distance: current_g,
                cells: self.path.len(),
            });
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        grid.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = grid.idx(np) else {
                continue;
            };
            if grid.cell_at(ni).visited {
                continue;
            }
            let tentative = current_g.saturating_add(grid.cost(cp, np));
            let n = grid.cell_mut(ni);
            if tentative < n.distance {
                n.distance = tentative;
                n.predecessor = Some(ci);
                self.frontier.push(ni, tentative);
            }
        }

        self.nbuf = nbuf;
        Step::more(StepStatus::Visited {
            pos: cp,
            distance: current_g,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn grid(layout: &str) -> Grid {
        layout.parse().unwrap()
    }

    /// Step until done, returning every step result.
    fn run(search: &mut StepSearch, g: &mut Grid) -> Vec<Step> {
        let mut steps = Vec::new();
        loop {
            let s = search.step(g).unwrap();
            steps.push(s);
            if !s.more_work {
                return steps;
            }
            assert!(steps.len() <= g.len() + 2, "search failed to terminate");
        }
    }

    fn found_distance(steps: &[Step]) -> Option<i32> {
        match steps.last().map(|s| s.status) {
            Some(StepStatus::Found { distance, .. }) => Some(distance),
            _ => None,
        }
    }

    #[test]
    fn missing_endpoints_changes_nothing() {
        let mut g = Grid::new(3);
        let mut s = StepSearch::new();
        assert_eq!(s.step(&mut g), Err(SearchError::MissingEndpoints));

        g.set_start(Point::new(0, 0)).unwrap();
        assert_eq!(s.step(&mut g), Err(SearchError::MissingEndpoints));
        assert_eq!(s.phase(), Phase::Uninitialized);
        assert!(g.cells().iter().all(|c| c.distance().is_none()));

        let mut only_end = Grid::new(3);
        only_end.set_end(Point::new(1, 1)).unwrap();
        assert_eq!(s.step(&mut only_end), Err(SearchError::MissingEndpoints));
    }

    #[test]
    fn first_step_only_seeds() {
        let mut g = grid("S..\n...\n..E");
        let mut s = StepSearch::new();
        let step = s.step(&mut g).unwrap();
        assert!(step.more_work);
        assert_eq!(
            step.status,
            StepStatus::Started {
                start: Point::new(0, 0),
                end: Point::new(2, 2)
            }
        );
        assert_eq!(s.phase(), Phase::Active);
        assert_eq!(g.visited_count(), 0);
        assert_eq!(g.distance(Point::new(0, 0)), Some(0));
        assert_eq!(s.frontier_len(), 1);

        let step = s.step(&mut g).unwrap();
        assert_eq!(
            step.status,
            StepStatus::Visited {
                pos: Point::new(0, 0),
                distance: 0
            }
        );
        assert_eq!(step.message(), "Visited cell (0, 0).");
        assert_eq!(g.visited_count(), 1);
    }

    #[test]
    fn three_by_three_open() {
        let mut g = grid("S..\n...\n..E");
        let mut s = StepSearch::new();
        let steps = run(&mut s, &mut g);

        assert_eq!(found_distance(&steps), Some(4));
        assert_eq!(s.outcome(), Some(Outcome::Found));
        assert_eq!(g.path_len(), 5);

        let path = s.path();
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.last(), Some(&Point::new(2, 2)));
        // Monotone: every move goes east or south.
        for w in path.windows(2) {
            let d = w[1] - w[0];
            assert!(d == Point::EAST || d == Point::SOUTH, "bad move {d}");
        }
        for p in path {
            assert!(g.cell(*p).unwrap().is_on_path());
        }
    }

    #[test]
    fn column_gap_scenario_distance() {
        // Start (0,0) and end (2,0) in (row, col) terms, column 1 blocked
        // except (2,1): shortest route goes down, across and back up.
        let mut g = Grid::new(3);
        g.set_start(Point::from_row_col(0, 0)).unwrap();
        g.set_end(Point::from_row_col(0, 2)).unwrap();
        g.set_obstacle(Point::from_row_col(0, 1), true).unwrap();
        g.set_obstacle(Point::from_row_col(1, 1), true).unwrap();

        let mut s = StepSearch::new();
        let steps = run(&mut s, &mut g);
        let via = Point::from_row_col(2, 1);
        assert!(s.path().contains(&via));
        assert_eq!(found_distance(&steps), Some(6));
        assert_eq!(g.path_len(), 7);
        assert!(g.cell(via).unwrap().is_on_path());
    }

    #[test]
    fn column_gap_forces_bottom_route() {
        // (0,1) and (1,1) blocked: the only way to (2,2) is through (2,1).
        let mut g = Grid::new(3);
        g.set_start(Point::from_row_col(0, 0)).unwrap();
        g.set_end(Point::from_row_col(2, 2)).unwrap();
        g.set_obstacle(Point::from_row_col(0, 1), true).unwrap();
        g.set_obstacle(Point::from_row_col(1, 1), true).unwrap();

        let mut s = StepSearch::new();
        let steps = run(&mut s, &mut g);
        assert_eq!(found_distance(&steps), Some(4));
        assert!(s.path().contains(&Point::from_row_col(2, 1)));
    }

    #[test]
    fn walled_off_end_reports_no_path() {
        let mut g = grid(
            "S....
             .....
             ...##
             ...#.
             ...#E",
        );
        let mut s = StepSearch::new();
        let steps = run(&mut s, &mut g);

        let last = steps.last().unwrap();
        assert!(!last.more_work);
        assert_eq!(last.status, StepStatus::NoPath);
        assert_eq!(last.message(), "No path found!");
        assert_eq!(s.outcome(), Some(Outcome::NoPath));
        assert_eq!(g.path_len(), 0);
        assert!(s.path().is_empty());
        // Everything reachable got settled.
        assert_eq!(g.visited_count(), 25 - 4 - 2);
    }

    #[test]
    fn done_is_terminal() {
        let mut g = grid("SE\n..");
        let mut s = StepSearch::new();
        run(&mut s, &mut g);
        let snapshot = g.to_string();
        let settled = s.settled();

        for _ in 0..3 {
            let step = s.step(&mut g).unwrap();
            assert!(!step.more_work);
            assert_eq!(step.status, StepStatus::Finished(Outcome::Found));
            assert_eq!(step.message(), "Shortest path found!");
        }
        assert_eq!(g.to_string(), snapshot);
        assert_eq!(s.settled(), settled);
    }

    #[test]
    fn done_still_checks_endpoints() {
        let mut g = grid("SE\n..");
        let mut s = StepSearch::new();
        run(&mut s, &mut g);
        let mut bare = Grid::new(2);
        assert_eq!(s.step(&mut bare), Err(SearchError::MissingEndpoints));
        assert!(s.is_done());
    }

    #[test]
    fn settled_distances_never_decrease_and_never_change() {
        let mut g = grid(
            "S.....#.
             .##.#...
             ...#..#.
             .#...#..
             .#.#....
             ...#.##.
             .#.....#
             ...#...E",
        );
        let mut s = StepSearch::new();
        s.step(&mut g).unwrap();

        let mut last = 0;
        let mut settled: Vec<(Point, i32)> = Vec::new();
        loop {
            let step = s.step(&mut g).unwrap();
            if let StepStatus::Visited { pos, distance } = step.status {
                assert!(distance >= last, "settled {pos} at {distance} after {last}");
                last = distance;
                settled.push((pos, distance));
            }
            for (p, d) in &settled {
                assert_eq!(g.distance(*p), Some(*d));
            }
            if !step.more_work {
                break;
            }
        }
        assert_eq!(s.outcome(), Some(Outcome::Found));
    }

    #[test]
    fn visited_cells_have_predecessors() {
        let mut g = grid("S...\n.##.\n....\n#..E");
        let mut s = StepSearch::new();
        for _ in 0..6 {
            s.step(&mut g).unwrap();
        }
        let start = g.start().unwrap();
        for c in g.cells().iter().filter(|c| c.is_visited()) {
            assert!(c.distance().is_some());
            if c.pos() != start {
                assert!(g.predecessor(c.pos()).is_some());
            }
        }
    }

    #[test]
    fn open_grids_match_manhattan() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..20 {
            let n = rng.random_range(2..9);
            let mut g = Grid::new(n);
            let a = Point::new(rng.random_range(0..n), rng.random_range(0..n));
            let mut b = Point::new(rng.random_range(0..n), rng.random_range(0..n));
            if b == a {
                b = Point::new((a.x + 1) % n, a.y);
            }
            g.set_start(a).unwrap();
            g.set_end(b).unwrap();

            let mut s = StepSearch::new();
            let steps = run(&mut s, &mut g);
            assert_eq!(found_distance(&steps), Some(manhattan(a, b)));
            assert_eq!(g.path_len(), manhattan(a, b) as usize + 1);
        }
    }

    #[test]
    fn restarts_when_endpoints_move() {
        let mut g = grid("S..\n...\n..E");
        let mut s = StepSearch::new();
        s.step(&mut g).unwrap();
        s.step(&mut g).unwrap();
        assert_eq!(g.visited_count(), 1);

        g.set_end(Point::new(1, 0)).unwrap();
        let step = s.step(&mut g).unwrap();
        assert!(matches!(step.status, StepStatus::Started { .. }));
        assert_eq!(g.visited_count(), 0);
        let steps = run(&mut s, &mut g);
        assert_eq!(found_distance(&steps), Some(1));
    }

    #[test]
    fn reset_returns_to_uninitialized() {
        let mut g = grid("S.\n.E");
        let mut s = StepSearch::new();
        run(&mut s, &mut g);
        s.reset();
        assert_eq!(s.phase(), Phase::Uninitialized);
        assert!(s.path().is_empty());
        assert_eq!(s.settled(), 0);
        assert_eq!(s.frontier_len(), 0);
    }
}
