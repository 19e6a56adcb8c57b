//! Terminal front-end for the *pathstep* grid search visualizer.
//!
//! [`Visualizer`] is the interaction model: it consumes [`Msg`]s, edits a
//! [`Session`](pathstep_search::Session) and renders a [`Frame`].
//! [`run`] drives it against any [`Driver`]; [`CrosstermDriver`] is the
//! terminal one.
//!
//! [`Msg`]: pathstep_core::Msg

pub mod app;
pub mod config;
pub mod driver;
pub mod frame;
pub mod visualizer;

pub use app::{Driver, run};
pub use config::{Config, ConfigError, USAGE};
pub use driver::CrosstermDriver;
pub use frame::{Frame, FrameCell};
pub use visualizer::{Action, Mode, Visualizer};
