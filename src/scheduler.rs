// The two host signals a running field depends on: frame callbacks and
// viewport resizes. web.rs implements them on top of `window`; the manual
// versions here are driven by hand.

use crate::error::EngineError;

pub trait FrameScheduler {
    type Handle;

    // Ask the host for exactly one more frame callback
    fn request_frame(&mut self) -> Result<Self::Handle, EngineError>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

pub trait ResizeSource {
    fn viewport(&self) -> (u32, u32);

    fn subscribe(&mut self) -> Result<(), EngineError>;

    // Must be safe to call when not subscribed
    fn unsubscribe(&mut self);
}

#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u32,
    pending: Vec<u32>,
    pub requested: usize,
    pub cancelled: usize,
    pub refuse: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        ManualScheduler::default()
    }

    pub fn pending(&self) -> &[u32] {
        &self.pending
    }

    // Hands out the oldest pending request, as if the display had refreshed
    pub fn fire(&mut self) -> Option<u32> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> Result<u32, EngineError> {
        if self.refuse {
            return Err(EngineError::FrameRequest("refused".to_owned()));
        }
        self.next_id += 1;
        self.requested += 1;
        self.pending.push(self.next_id);
        Ok(self.next_id)
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.pending.retain(|&id| id != handle);
        self.cancelled += 1;
    }
}

#[derive(Debug, Default)]
pub struct ManualResize {
    pub viewport: (u32, u32),
    pub subscribed: bool,
    pub subscriptions: usize,
}

impl ManualResize {
    pub fn new(width: u32, height: u32) -> Self {
        ManualResize {
            viewport: (width, height),
            ..ManualResize::default()
        }
    }
}

impl ResizeSource for ManualResize {
    fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    fn subscribe(&mut self) -> Result<(), EngineError> {
        self.subscribed = true;
        self.subscriptions += 1;
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_frames_never_fire() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.request_frame().unwrap();
        let second = scheduler.request_frame().unwrap();
        scheduler.cancel_frame(first);
        assert_eq!(scheduler.fire(), Some(second));
        assert_eq!(scheduler.fire(), None);
    }

    #[test]
    fn refusing_scheduler_reports_error() {
        let mut scheduler = ManualScheduler {
            refuse: true,
            ..ManualScheduler::default()
        };
        assert!(scheduler.request_frame().is_err());
        assert!(scheduler.pending().is_empty());
    }
}
