//! Frame pacing for the rain loop.

/// Gates an unbounded-rate callback stream down to a fixed frame rate.
///
/// The host event loop calls back as often as it likes;
/// [`FramePacer::should_render`] answers whether enough time has passed
/// for one more frame. On a hit, `last_tick` is moved to the timestamp
/// minus the remainder of the elapsed interval rather than snapped to
/// the timestamp itself, so the long-run frame rate stays at target even
/// when the callbacks arrive with jitter.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval_ms: f64,
    last_tick: Option<f64>,
}

impl FramePacer {
    /// Default target rate for the rain loop.
    pub const DEFAULT_FPS: f64 = 30.0;

    /// Pacer targeting `target_fps` frames per second.
    pub fn new(target_fps: f64) -> Self {
        Self::from_interval(1000.0 / target_fps.max(1.0))
    }

    /// Pacer with an explicit frame interval in milliseconds.
    pub fn from_interval(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_tick: None,
        }
    }

    /// The frame interval in milliseconds.
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Decide whether a frame should render at `now_ms`.
    ///
    /// The first call always renders and anchors the phase. A timestamp
    /// that runs backwards is clamped: it neither renders nor disturbs
    /// the stored phase, and a long suspend gap is bounded by the modulo
    /// correction, so nothing accumulates.
    pub fn should_render(&mut self, now_ms: f64) -> bool {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now_ms);
            return true;
        };
        let elapsed = (now_ms - last).max(0.0);
        if elapsed > self.interval_ms {
            self.last_tick = Some(now_ms - elapsed % self.interval_ms);
            true
        } else {
            false
        }
    }

    /// Forget the recorded phase; the next call renders immediately.
    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FPS)
    }
}
