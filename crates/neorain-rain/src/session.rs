//! Rain session lifecycle.
//!
//! Ties the pacer, the column field and the scheduling port together:
//! one running session keeps exactly one tick in flight, renders at most
//! one frame per callback, and cancels its pending tick on stop so
//! nothing fires after teardown.

use neorain_core::{TickHandle, TickScheduler};

use crate::columns::ColumnField;
use crate::pacer::FramePacer;
use crate::surface::Surface;

/// One running rain effect.
#[derive(Debug)]
pub struct RainSession {
    pacer: FramePacer,
    field: ColumnField,
    pending: Option<TickHandle>,
    started: bool,
}

impl RainSession {
    pub fn new(pacer: FramePacer, field: ColumnField) -> Self {
        Self {
            pacer,
            field,
            pending: None,
            started: false,
        }
    }

    /// Handle of the tick currently in flight, if any.
    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }

    /// The column field, for inspection.
    pub fn field(&self) -> &ColumnField {
        &self.field
    }

    /// Reset the columns for the given surface size and arm the first
    /// tick. Calling `start` on a running session re-resets but keeps
    /// the single in-flight tick.
    pub fn start(&mut self, width: f32, height: f32, scheduler: &mut dyn TickScheduler) {
        self.field.reset(width, height);
        self.pacer.reset();
        self.started = true;
        if self.pending.is_none() {
            self.pending = Some(scheduler.schedule());
        }
    }

    /// Surface dimensions changed: all column state is rebuilt.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        if self.started {
            self.field.reset(width, height);
        }
    }

    /// One scheduling callback fired. Renders at most one frame as
    /// decided by the pacer, then re-arms the next tick.
    pub fn on_tick(
        &mut self,
        now_ms: f64,
        surface: &mut dyn Surface,
        reduced: bool,
        scheduler: &mut dyn TickScheduler,
    ) {
        self.pending = None;
        if !self.started {
            // Stale callback racing a stop(); drop it without re-arming.
            return;
        }
        if self.pacer.should_render(now_ms) {
            self.field.step(surface, reduced);
        }
        self.pending = Some(scheduler.schedule());
    }

    /// Cancel the in-flight tick. Idempotent.
    pub fn stop(&mut self, scheduler: &mut dyn TickScheduler) {
        self.started = false;
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use neorain_core::ManualScheduler;

    use super::*;

    #[derive(Debug, Default)]
    struct CountingSurface {
        fades: usize,
        glyphs: usize,
    }

    impl Surface for CountingSurface {
        fn width(&self) -> f32 {
            800.0
        }

        fn height(&self) -> f32 {
            600.0
        }

        fn fade(&mut self, _opacity: f32) {
            self.fades += 1;
        }

        fn draw_glyph(&mut self, _x: f32, _y: f32, _glyph: char, _emphasis: bool) {
            self.glyphs += 1;
        }
    }

    fn session() -> RainSession {
        RainSession::new(FramePacer::from_interval(33.0), ColumnField::new(16.0, 7))
    }

    #[test]
    fn test_start_resets_and_arms_one_tick() {
        let mut scheduler = ManualScheduler::new();
        let mut session = session();
        session.start(800.0, 600.0, &mut scheduler);
        assert_eq!(session.field().len(), 50);
        assert_eq!(scheduler.armed().len(), 1);
        assert_eq!(session.pending(), scheduler.armed().first().copied());
    }

    #[test]
    fn test_tick_renders_and_rearms() {
        let mut scheduler = ManualScheduler::new();
        let mut surface = CountingSurface::default();
        let mut session = session();
        session.start(800.0, 600.0, &mut scheduler);

        let fired = scheduler.fire_all();
        assert_eq!(fired.len(), 1);
        session.on_tick(0.0, &mut surface, false, &mut scheduler);
        assert_eq!(surface.fades, 1);
        assert_eq!(surface.glyphs, 50);
        // Re-armed with a fresh handle.
        assert_eq!(scheduler.armed().len(), 1);
        assert_ne!(session.pending(), Some(fired[0]));
    }

    #[test]
    fn test_pacer_gates_frames() {
        let mut scheduler = ManualScheduler::new();
        let mut surface = CountingSurface::default();
        let mut session = session();
        session.start(800.0, 600.0, &mut scheduler);

        scheduler.fire_all();
        session.on_tick(0.0, &mut surface, false, &mut scheduler);
        scheduler.fire_all();
        session.on_tick(10.0, &mut surface, false, &mut scheduler);
        assert_eq!(surface.fades, 1);
        scheduler.fire_all();
        session.on_tick(40.0, &mut surface, false, &mut scheduler);
        assert_eq!(surface.fades, 2);
        // Skipped ticks still re-arm.
        assert_eq!(scheduler.armed().len(), 1);
    }

    #[test]
    fn test_resize_rebuilds_columns() {
        let mut scheduler = ManualScheduler::new();
        let mut session = session();
        session.start(800.0, 600.0, &mut scheduler);
        session.on_resize(320.0, 240.0);
        assert_eq!(session.field().len(), 20);
    }

    #[test]
    fn test_stop_cancels_and_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        let mut session = session();
        session.start(800.0, 600.0, &mut scheduler);
        let armed = session.pending().expect("armed");

        session.stop(&mut scheduler);
        assert!(scheduler.armed().is_empty());
        assert_eq!(scheduler.cancelled(), &[armed]);
        assert_eq!(session.pending(), None);

        session.stop(&mut scheduler);
        assert_eq!(scheduler.cancelled().len(), 1);
    }

    #[test]
    fn test_stale_tick_after_stop_does_not_rearm() {
        let mut scheduler = ManualScheduler::new();
        let mut surface = CountingSurface::default();
        let mut session = session();
        session.start(800.0, 600.0, &mut scheduler);
        session.stop(&mut scheduler);

        session.on_tick(0.0, &mut surface, false, &mut scheduler);
        assert_eq!(surface.fades, 0);
        assert!(scheduler.armed().is_empty());
    }
}
