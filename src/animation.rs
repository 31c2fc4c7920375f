// Drives an Engine from host frame callbacks and resize events.
//
// Uninitialized -> Running -> Disposed, never backwards. Only one frame is
// ever pending; each callback ticks once and then asks for the next frame.

use crate::engine::Engine;
use crate::error::EngineError;
use crate::scheduler::{FrameScheduler, ResizeSource};
use crate::surface::Surface;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Uninitialized,
    Running,
    Disposed,
}

pub struct Animation<S: Surface, F: FrameScheduler, R: ResizeSource> {
    engine: Engine<S>,
    scheduler: F,
    resize: R,
    pending: Option<F::Handle>,
    state: State,
}

impl<S: Surface, F: FrameScheduler, R: ResizeSource> Animation<S, F, R> {
    pub fn new(engine: Engine<S>, scheduler: F, resize: R) -> Self {
        Animation {
            engine,
            scheduler,
            resize,
            pending: None,
            state: State::Uninitialized,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn resize_source(&self) -> &R {
        &self.resize
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn start(&mut self, now_ms: f64) -> Result<(), EngineError> {
        self.start_with(&mut rand::thread_rng(), now_ms)
    }

    // Sizes the surface to the viewport, fills the field, draws the first
    // frame right away and asks for the next one. Does nothing unless the
    // animation is still Uninitialized.
    pub fn start_with<G: Rng + ?Sized>(&mut self, rng: &mut G, now_ms: f64) -> Result<(), EngineError> {
        if self.state != State::Uninitialized {
            return Ok(());
        }

        let (width, height) = self.resize.viewport();
        self.engine.resize(width, height);
        self.engine.initialize_with(rng);

        if let Err(err) = self.resize.subscribe() {
            self.state = State::Disposed;
            return Err(err);
        }
        self.engine.tick(now_ms);
        match self.scheduler.request_frame() {
            Ok(handle) => self.pending = Some(handle),
            Err(err) => {
                self.resize.unsubscribe();
                self.state = State::Disposed;
                return Err(err);
            }
        }

        self.state = State::Running;
        Ok(())
    }

    // A failed request leaves the animation Running with nothing pending, so
    // the loop stops but dispose still unsubscribes
    pub fn on_frame(&mut self, now_ms: f64) -> Result<(), EngineError> {
        if self.state != State::Running {
            return Ok(());
        }
        self.pending = None;
        self.engine.tick(now_ms);
        let handle = self.scheduler.request_frame()?;
        self.pending = Some(handle);
        Ok(())
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        if self.state == State::Running {
            self.engine.resize(width, height);
        }
    }

    pub fn dispose(&mut self) {
        if self.state == State::Disposed {
            return;
        }
        self.resize.unsubscribe();
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.state = State::Disposed;
    }
}

impl<S: Surface, F: FrameScheduler, R: ResizeSource> Drop for Animation<S, F, R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::scheduler::{ManualResize, ManualScheduler};
    use crate::surface::{DrawCall, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type TestAnimation = Animation<RecordingSurface, ManualScheduler, ManualResize>;

    fn animation(scheduler: ManualScheduler) -> TestAnimation {
        let engine = Engine::new(RecordingSurface::new(0, 0), FieldConfig::default());
        Animation::new(engine, scheduler, ManualResize::new(800, 600))
    }

    fn started() -> TestAnimation {
        let mut animation = animation(ManualScheduler::new());
        animation.start_with(&mut StdRng::seed_from_u64(1), 0.0).unwrap();
        animation
    }

    fn backgrounds(animation: &TestAnimation) -> usize {
        animation
            .engine()
            .surface()
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Background { .. }))
            .count()
    }

    // Fires the pending frame the way a display refresh would
    fn refresh(animation: &mut TestAnimation, now_ms: f64) {
        assert!(animation.scheduler.fire().is_some());
        animation.on_frame(now_ms).unwrap();
    }

    #[test]
    fn start_sizes_surface_and_fills_field() {
        let animation = started();
        assert_eq!(animation.state(), State::Running);
        assert_eq!(animation.engine().surface().size(), (800, 600));
        assert_eq!(animation.engine().particles().len(), 150);
        assert!(animation.resize_source().subscribed);
        assert_eq!(animation.scheduler().pending().len(), 1);
        // the first frame is painted during start, not on the first refresh
        assert_eq!(backgrounds(&animation), 1);
        assert_eq!(animation.engine().surface().discs().count(), 150);
    }

    #[test]
    fn each_frame_ticks_once_and_requests_the_next() {
        let mut animation = started();
        for frame in 0..3 {
            refresh(&mut animation, frame as f64 * 16.0);
            assert_eq!(animation.scheduler().pending().len(), 1);
        }
        assert_eq!(backgrounds(&animation), 4);
        assert_eq!(animation.scheduler().requested, 4);
    }

    #[test]
    fn resize_between_frames_updates_surface() {
        let mut animation = started();
        refresh(&mut animation, 0.0);
        animation.on_resize(1024, 768);
        assert_eq!(animation.engine().surface().size(), (1024, 768));
        assert_eq!(animation.engine().particles().len(), 150);
    }

    #[test]
    fn dispose_before_first_frame() {
        let mut animation = started();
        animation.dispose();
        assert_eq!(animation.state(), State::Disposed);
        assert!(animation.scheduler().pending().is_empty());
        assert!(!animation.resize_source().subscribed);
        assert!(!animation.has_pending_frame());
    }

    #[test]
    fn dispose_after_many_frames_is_idempotent() {
        let mut animation = started();
        for frame in 0..10 {
            refresh(&mut animation, frame as f64);
        }
        animation.dispose();
        animation.dispose();
        assert!(animation.scheduler().pending().is_empty());
        assert!(!animation.resize_source().subscribed);
        assert_eq!(animation.scheduler().cancelled, 1);
    }

    #[test]
    fn dispose_without_start() {
        let mut animation = animation(ManualScheduler::new());
        animation.dispose();
        assert_eq!(animation.state(), State::Disposed);
        assert_eq!(animation.scheduler().cancelled, 0);
        // a disposed animation cannot be started again
        animation.start_with(&mut StdRng::seed_from_u64(1), 0.0).unwrap();
        assert_eq!(animation.state(), State::Disposed);
        assert!(animation.engine().surface().calls.is_empty());
        assert_eq!(animation.resize_source().subscriptions, 0);
    }

    #[test]
    fn stale_signals_after_dispose_are_ignored() {
        let mut animation = started();
        animation.dispose();
        let drawn = animation.engine().surface().calls.len();
        animation.on_frame(0.0).unwrap();
        animation.on_resize(10, 10);
        assert_eq!(animation.engine().surface().calls.len(), drawn);
        assert_eq!(animation.engine().surface().size(), (800, 600));
        assert!(animation.scheduler().pending().is_empty());
    }

    #[test]
    fn frames_before_start_do_nothing() {
        let mut animation = animation(ManualScheduler::new());
        animation.on_frame(0.0).unwrap();
        assert_eq!(animation.state(), State::Uninitialized);
        assert_eq!(animation.scheduler().requested, 0);
    }

    #[test]
    fn second_start_is_a_no_op() {
        let mut animation = started();
        let before = animation.engine().particles().to_vec();
        animation.start_with(&mut StdRng::seed_from_u64(2), 0.0).unwrap();
        assert_eq!(animation.engine().particles(), &before[..]);
        assert_eq!(animation.resize_source().subscriptions, 1);
        assert_eq!(animation.scheduler().pending().len(), 1);
    }

    #[test]
    fn refused_first_frame_aborts_start() {
        let mut scheduler = ManualScheduler::new();
        scheduler.refuse = true;
        let mut animation = animation(scheduler);
        assert!(animation.start_with(&mut StdRng::seed_from_u64(1), 0.0).is_err());
        assert_eq!(animation.state(), State::Disposed);
        assert!(!animation.resize_source().subscribed);
    }

    #[test]
    fn refused_later_frame_stops_loop_but_dispose_still_cleans_up() {
        let mut animation = started();
        animation.scheduler.fire();
        animation.scheduler.refuse = true;
        assert!(animation.on_frame(0.0).is_err());
        assert!(!animation.has_pending_frame());
        animation.dispose();
        assert!(!animation.resize_source().subscribed);
        assert_eq!(animation.scheduler().cancelled, 0);
    }
}
