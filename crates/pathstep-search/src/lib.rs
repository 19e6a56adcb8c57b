//! Grid model and stepwise shortest-path search for the *pathstep*
//! visualizer.
//!
//! A [`Grid`] holds the layout (start, end, obstacles) and the per-cell
//! metadata a search writes (distance, predecessor, visited, on-path).
//! [`StepSearch`] runs uniform-cost search over it one settled cell per
//! [`step`](StepSearch::step), so a front-end can animate or single-step it.
//! [`Session`] ties one grid to one search and is what a front-end drives.
//!
//! ```
//! use pathstep_search::{Grid, Session, GridConfig, StepStatus};
//!
//! let grid: Grid = "S..\n.#.\n..E".parse().unwrap();
//! let mut session = Session::with_grid(GridConfig::default(), grid);
//! let last = session.run_to_end().unwrap();
//! assert_eq!(last.status, StepStatus::Found { distance: 4, cells: 5 });
//! ```
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | edge cost (always 1 on a [`Grid`]) |

mod config;
mod distance;
mod error;
mod frontier;
mod grid;
mod search;
mod session;
mod traits;

pub use config::{GRID_SIZE_DEFAULT, GRID_SIZE_MAX, GRID_SIZE_MIN, GridConfig};
pub use distance::manhattan;
pub use error::{EditError, ParseError, SearchError};
pub use frontier::Frontier;
pub use grid::{Cell, CellKind, Grid, UNREACHABLE};
pub use search::{Outcome, Phase, Step, StepSearch, StepStatus};
pub use session::Session;
pub use traits::{Pather, WeightedPather};
