//! Periodic glitch offset for the banner.

use rand::{
    SeedableRng,
    distr::{Distribution, Uniform},
    rngs::StdRng,
};

/// Milliseconds between glitch firings.
const PERIOD_MS: f64 = 5000.0;
/// How long a fired glitch stays visible.
const HOLD_MS: f64 = 50.0;

/// Fires a short horizontal jitter on a fixed period.
///
/// Every five seconds the banner snaps sideways by a random handful of
/// units for 50 ms, then snaps back. Outside the hold window the offset
/// is zero.
#[derive(Debug)]
pub struct GlitchTimer {
    rng: StdRng,
    amplitude: Uniform<f32>,
    last_fire: Option<f64>,
    offset: f32,
}

impl GlitchTimer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            amplitude: Uniform::new(-5.0f32, 5.0).expect("valid range"),
            last_fire: None,
            offset: 0.0,
        }
    }

    /// Current horizontal offset in surface units at `now_ms`.
    ///
    /// The first call anchors the period without firing.
    pub fn offset(&mut self, now_ms: f64) -> f32 {
        match self.last_fire {
            None => {
                self.last_fire = Some(now_ms);
                0.0
            }
            Some(fired) if now_ms - fired >= PERIOD_MS => {
                self.last_fire = Some(now_ms);
                self.offset = self.amplitude.sample(&mut self.rng);
                self.offset
            }
            Some(fired) if now_ms - fired <= HOLD_MS => self.offset,
            _ => 0.0,
        }
    }
}
