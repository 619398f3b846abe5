//! Frame scheduling
//!
//! The driver asks for "one more frame" through [`FrameScheduler`]; whoever
//! owns the driver decides when that frame actually runs. At most one frame
//! is ever pending.

/// Something that can run the driver's next frame
pub trait FrameScheduler {
    /// Ask for the next frame. Repeated calls before it runs are merged.
    fn request_frame(&mut self);
}

/// Scheduler driven by hand: tests and the native run poll `take_request`
#[derive(Debug, Default)]
pub struct ManualScheduler {
    requested: bool,
    total_requests: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request, if any
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Frames requested since creation (merged requests count once)
    pub fn total_requests(&self) -> u64 {
        self.total_requests
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        if !self.requested {
            self.requested = true;
            self.total_requests += 1;
        }
    }
}

/// requestAnimationFrame-backed scheduler
///
/// Requests are recorded in a shared flag; the page's frame pump checks it
/// after each driver call and registers the callback.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct AnimationFrameScheduler {
    requested: std::rc::Rc<std::cell::Cell<bool>>,
}

#[cfg(target_arch = "wasm32")]
impl AnimationFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request, if any
    pub fn take_request(&self) -> bool {
        self.requested.replace(false)
    }
}

#[cfg(target_arch = "wasm32")]
impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) {
        self.requested.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_merge() {
        let mut scheduler = ManualScheduler::new();
        assert!(!scheduler.take_request());

        scheduler.request_frame();
        scheduler.request_frame();
        assert!(scheduler.is_requested());
        assert_eq!(scheduler.total_requests(), 1);

        assert!(scheduler.take_request());
        assert!(!scheduler.take_request());

        scheduler.request_frame();
        assert_eq!(scheduler.total_requests(), 2);
    }
}
