//! Core types shared across the neorain crates.
//!
//! Holds the color themes used by every renderer and the tick-scheduling
//! port that the rain session and the interactive effects arm their
//! callbacks through.

mod scheduler;
mod theme;

pub use scheduler::{ManualScheduler, TickHandle, TickScheduler};
pub use theme::ColorTheme;
