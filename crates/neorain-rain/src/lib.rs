//! Digital-rain simulation core.
//!
//! This crate owns the animated part of the screensaver: a frame pacer
//! that throttles an unbounded callback stream down to a fixed rate, and
//! a field of falling-glyph columns that mutates an abstract drawing
//! surface once per accepted tick. Everything is presentation-agnostic;
//! the binary supplies a terminal-backed [`Surface`] and the scheduling
//! callbacks.

mod chars;
mod columns;
mod pacer;
mod session;
mod surface;

pub use chars::RAIN_CHARS;
pub use columns::{Column, ColumnField};
pub use pacer::FramePacer;
pub use session::RainSession;
pub use surface::Surface;
