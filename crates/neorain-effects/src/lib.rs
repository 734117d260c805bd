//! Secondary embellishments around the rain effect.
//!
//! None of these touch the rain surface: crackles and the banner glitch
//! are read by the renderer each frame, and the pointer sway derives a
//! banner transform from mouse movement. All three are low-frequency
//! producers that must never get in the way of the rain loop's ticks.

mod crackle;
mod glitch;
mod sway;

pub use crackle::{Crackle, CrackleField};
pub use glitch::GlitchTimer;
pub use sway::PointerSway;
