//! Pointer-reactive banner transform.

use neorain_core::{TickHandle, TickScheduler};

/// Units of banner travel across the full surface extent.
const TRAVEL: f32 = 20.0;
/// Degrees of rotation per unit of horizontal offset.
const ROTATION_PER_UNIT: f32 = 0.1;

/// Tracks the pointer and derives the banner transform from it.
///
/// Pointer events can arrive far faster than frames. Only the latest
/// position matters, so at most one position-update callback is kept in
/// flight; later events just overwrite the stored position and ride the
/// already-armed update.
#[derive(Debug, Default)]
pub struct PointerSway {
    pointer: Option<(f32, f32)>,
    pending: Option<TickHandle>,
    offset: (f32, f32),
    rotation: f32,
}

impl PointerSway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of the armed position update, if any.
    pub fn pending(&self) -> Option<TickHandle> {
        self.pending
    }

    /// Banner offset in surface units, centered on zero.
    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }

    /// Banner rotation in degrees.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Record a pointer position; arms an update only if none is armed.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, scheduler: &mut dyn TickScheduler) {
        self.pointer = Some((x, y));
        if self.pending.is_none() {
            self.pending = Some(scheduler.schedule());
        }
    }

    /// The armed update fired: recompute the transform against the
    /// current surface extent.
    pub fn on_update(&mut self, width: f32, height: f32) {
        self.pending = None;
        let Some((x, y)) = self.pointer else {
            return;
        };
        let dx = (x / width.max(1.0) - 0.5) * TRAVEL;
        let dy = (y / height.max(1.0) - 0.5) * TRAVEL;
        self.offset = (dx, dy);
        self.rotation = dx * ROTATION_PER_UNIT;
    }

    /// Cancel any armed update. Idempotent.
    pub fn stop(&mut self, scheduler: &mut dyn TickScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use neorain_core::ManualScheduler;

    use super::*;

    #[test]
    fn test_single_pending_update() {
        let mut scheduler = ManualScheduler::new();
        let mut sway = PointerSway::new();
        sway.on_pointer_move(10.0, 10.0, &mut scheduler);
        sway.on_pointer_move(20.0, 20.0, &mut scheduler);
        sway.on_pointer_move(30.0, 30.0, &mut scheduler);
        assert_eq!(scheduler.armed().len(), 1);
    }

    #[test]
    fn test_update_uses_latest_position() {
        let mut scheduler = ManualScheduler::new();
        let mut sway = PointerSway::new();
        sway.on_pointer_move(0.0, 0.0, &mut scheduler);
        sway.on_pointer_move(800.0, 600.0, &mut scheduler);
        scheduler.fire_all();
        sway.on_update(800.0, 600.0);
        // Pointer at the bottom-right corner: half the travel each way.
        assert_eq!(sway.offset(), (10.0, 10.0));
        assert!((sway.rotation() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_centered_pointer_is_neutral() {
        let mut scheduler = ManualScheduler::new();
        let mut sway = PointerSway::new();
        sway.on_pointer_move(400.0, 300.0, &mut scheduler);
        scheduler.fire_all();
        sway.on_update(800.0, 600.0);
        assert_eq!(sway.offset(), (0.0, 0.0));
        assert_eq!(sway.rotation(), 0.0);
    }

    #[test]
    fn test_rearms_after_update() {
        let mut scheduler = ManualScheduler::new();
        let mut sway = PointerSway::new();
        sway.on_pointer_move(10.0, 10.0, &mut scheduler);
        scheduler.fire_all();
        sway.on_update(800.0, 600.0);
        assert_eq!(sway.pending(), None);
        sway.on_pointer_move(20.0, 20.0, &mut scheduler);
        assert_eq!(scheduler.armed().len(), 1);
    }

    #[test]
    fn test_stop_cancels_pending() {
        let mut scheduler = ManualScheduler::new();
        let mut sway = PointerSway::new();
        sway.on_pointer_move(10.0, 10.0, &mut scheduler);
        sway.stop(&mut scheduler);
        assert!(scheduler.armed().is_empty());
        sway.stop(&mut scheduler);
        assert_eq!(scheduler.cancelled().len(), 1);
    }

    #[test]
    fn test_update_without_pointer_is_noop() {
        let mut sway = PointerSway::new();
        sway.on_update(800.0, 600.0);
        assert_eq!(sway.offset(), (0.0, 0.0));
    }
}
