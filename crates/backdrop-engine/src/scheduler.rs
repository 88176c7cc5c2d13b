//! Frame-callback registrations.
//!
//! Models the host's "run once before the next repaint" primitive: a
//! registration is requested, and is either fired by the next frame or
//! cancelled. A fired or cancelled handle is dead and never fires again.

use std::collections::BTreeSet;

/// Handle for one pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: BTreeSet<FrameHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for the next frame.
    pub fn request(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(handle);
        handle
    }

    /// Cancel a registration. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        self.pending.remove(&handle)
    }

    /// Consume a registration as the frame arrives. Returns whether the
    /// callback is still live and should run.
    pub fn take(&mut self, handle: FrameHandle) -> bool {
        self.pending.remove(&handle)
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    /// Number of live registrations.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_handle_never_fires() {
        let mut scheduler = FrameScheduler::new();
        let handle = scheduler.request();
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.take(handle));
        assert!(!scheduler.cancel(handle));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_take_is_one_shot() {
        let mut scheduler = FrameScheduler::new();
        let handle = scheduler.request();
        assert!(scheduler.is_pending(handle));
        assert!(scheduler.take(handle));
        assert!(!scheduler.take(handle));
    }

    #[test]
    fn test_handles_are_unique() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.request();
        let b = scheduler.request();
        assert_ne!(a, b);
        assert_eq!(scheduler.pending(), 2);
    }
}
