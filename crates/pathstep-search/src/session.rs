//! [`Session`]: one grid plus one search, the surface a front-end drives.

use log::{debug, trace};
use pathstep_core::Point;
use rand::Rng;

use crate::config::GridConfig;
use crate::error::{EditError, SearchError};
use crate::grid::Grid;
use crate::search::{Phase, Step, StepSearch};

/// Owns the grid and the search running on it.
///
/// Any accepted edit, reset or resize discards the current search so that
/// the flags a renderer sees always belong to the layout on screen.
#[derive(Debug, Clone)]
pub struct Session {
    config: GridConfig,
    grid: Grid,
    search: StepSearch,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl Session {
    /// Create a session with a fresh grid of the configured initial size.
    pub fn new(config: GridConfig) -> Self {
        Self {
            grid: Grid::new(config.initial_size()),
            config,
            search: StepSearch::new(),
        }
    }

    /// Wrap an existing grid (e.g. one parsed from a text layout). Its size
    /// is kept even if it falls outside `config`'s bounds.
    pub fn with_grid(config: GridConfig, grid: Grid) -> Self {
        Self {
            config,
            grid,
            search: StepSearch::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn search(&self) -> &StepSearch {
        &self.search
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.search.phase()
    }

    #[inline]
    pub fn size(&self) -> i32 {
        self.grid.size()
    }

    /// Replace the grid with a fresh `n`×`n` one, `n` clamped to the
    /// configured bounds. Returns the size actually used.
    pub fn resize(&mut self, n: i32) -> i32 {
        let n = self.config.clamp(n);
        debug!("session: resize to {n}x{n}");
        self.grid = Grid::new(n);
        self.search.reset();
        n
    }

    /// Replace the grid with a fresh one of the same size: endpoints,
    /// obstacles and search state are all dropped.
    pub fn reset(&mut self) {
        let n = self.grid.size();
        debug!("session: reset {n}x{n}");
        self.grid = Grid::new(n);
        self.search.reset();
    }

    /// Drop search state but keep the layout.
    pub fn clear_search(&mut self) {
        self.search.reset();
        self.grid.clear_search();
    }

    fn edited<T>(&mut self, r: Result<T, EditError>) -> Result<T, EditError> {
        match &r {
            Ok(_) => {
                if self.search.phase() != Phase::Uninitialized {
                    self.clear_search();
                }
            }
            Err(e) => trace!("session: edit rejected: {e}"),
        }
        r
    }

    pub fn set_start(&mut self, p: Point) -> Result<(), EditError> {
        let r = self.grid.set_start(p);
        self.edited(r)
    }

    pub fn set_end(&mut self, p: Point) -> Result<(), EditError> {
        let r = self.grid.set_end(p);
        self.edited(r)
    }

    /// Flip the obstacle at `p`, returning its new state.
    pub fn toggle_obstacle(&mut self, p: Point) -> Result<bool, EditError> {
        let r = self.grid.toggle_obstacle(p);
        self.edited(r)
    }

    pub fn set_obstacle(&mut self, p: Point, value: bool) -> Result<(), EditError> {
        let r = self.grid.set_obstacle(p, value);
        self.edited(r)
    }

    pub fn clear_obstacles(&mut self) {
        self.grid.clear_obstacles();
        self.clear_search();
    }

    /// Randomise the obstacle layout. See [`Grid::scatter_obstacles`].
    pub fn scatter_obstacles<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) -> usize {
        let n = self.grid.scatter_obstacles(rng, density);
        self.clear_search();
        n
    }

    /// Advance the search by one unit of work.
    pub fn step(&mut self) -> Result<Step, SearchError> {
        self.search.step(&mut self.grid)
    }

    /// Step until the search reports no more work, returning the final step.
    pub fn run_to_end(&mut self) -> Result<Step, SearchError> {
        loop {
            let step = self.step()?;
            if !step.more_work {
                return Ok(step);
            }
        }
    }
}
