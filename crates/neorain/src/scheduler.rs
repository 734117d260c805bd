//! Event-loop-backed tick scheduling.

use neorain_core::{TickHandle, TickScheduler};

/// Scheduler that treats each pass of the terminal event loop as the
/// next available frame slot: handles armed during one pass all fire at
/// the start of the next.
#[derive(Debug, Default)]
pub struct EventLoopScheduler {
    next_id: u64,
    armed: Vec<TickHandle>,
}

impl EventLoopScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every handle due this pass, in arming order.
    pub fn take_due(&mut self) -> Vec<TickHandle> {
        std::mem::take(&mut self.armed)
    }
}

impl TickScheduler for EventLoopScheduler {
    fn schedule(&mut self) -> TickHandle {
        let handle = TickHandle::from_raw(self.next_id);
        self.next_id += 1;
        self.armed.push(handle);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.armed.retain(|h| *h != handle);
    }
}
