//! **pathstep-core**: shared types for the step-through grid search
//! visualizer.
//!
//! This crate provides the foundational types used across the *pathstep*
//! workspace: geometry primitives, input messages, and colours. It has no
//! knowledge of searching or of any particular back-end.

pub mod geom;
pub mod messages;
pub mod style;

pub use geom::{Point, Range};
pub use messages::*;
pub use style::{AttrMask, Color, Style};
