//! Simulation trait and the animator that drives one simulation

use crate::input::PointerEvent;
use crate::scheduler::{FrameScheduler, FrameTime};
use crate::viewport::BreakpointChange;
use hanami_core::Viewport;

/// A decorative simulation ticked by its own [`FrameScheduler`]
///
/// Within a frame `update` always runs to completion before `draw`.
/// Event hooks run between frames, never during one.
pub trait Simulation {
    /// Advance global state (wind, camera) and then every entity
    fn update(&mut self, frame: &FrameTime);

    /// Issue the draw calls for the current state
    fn draw(&mut self);

    /// The viewport changed; `change` is set when the breakpoint flipped
    fn resize(&mut self, viewport: Viewport, change: Option<BreakpointChange>);

    /// Pointer or touch movement
    fn pointer(&mut self, event: &PointerEvent);

    /// Reallocate the pool at `count` entities
    fn set_pool_size(&mut self, count: usize);

    /// Current number of pooled entities
    fn pool_size(&self) -> usize;

    /// Human-readable name for this simulation
    fn name(&self) -> &str;
}

/// Pairs a simulation with the scheduler that owns its frame loop
pub struct Animator<S: Simulation> {
    scheduler: FrameScheduler,
    simulation: S,
}

impl<S: Simulation> Animator<S> {
    /// Wrap a simulation; nothing runs until [`Animator::start`]
    pub fn new(simulation: S) -> Self {
        Self {
            scheduler: FrameScheduler::new(),
            simulation,
        }
    }

    pub fn start(&mut self, now: f64) {
        self.scheduler.start(now);
        tracing::debug!(simulation = self.simulation.name(), now, "animation started");
    }

    /// Cancel upcoming frames. Idempotent.
    pub fn pause(&mut self) {
        if self.scheduler.pause() {
            tracing::debug!(simulation = self.simulation.name(), "animation paused");
        }
    }

    /// Resume with `now` as the new time baseline. Idempotent.
    pub fn resume(&mut self, now: f64) {
        if self.scheduler.resume(now) {
            tracing::debug!(simulation = self.simulation.name(), now, "animation resumed");
        }
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Run update-then-draw if a frame is scheduled. Returns whether it ran.
    pub fn frame(&mut self, now: f64) -> bool {
        let Some(frame) = self.scheduler.tick(now) else {
            return false;
        };
        self.simulation.update(&frame);
        self.simulation.draw();
        true
    }

    pub fn set_pool_size(&mut self, count: usize) {
        self.simulation.set_pool_size(count);
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn simulation(&self) -> &S {
        &self.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.simulation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        log: Vec<&'static str>,
        deltas: Vec<f64>,
        pool: usize,
    }

    impl Simulation for Probe {
        fn update(&mut self, frame: &FrameTime) {
            self.log.push("update");
            self.deltas.push(frame.delta);
        }
        fn draw(&mut self) {
            self.log.push("draw");
        }
        fn resize(&mut self, _viewport: Viewport, _change: Option<BreakpointChange>) {}
        fn pointer(&mut self, _event: &PointerEvent) {}
        fn set_pool_size(&mut self, count: usize) {
            self.pool = count;
        }
        fn pool_size(&self) -> usize {
            self.pool
        }
        fn name(&self) -> &str {
            "probe"
        }
    }

    #[test]
    fn test_update_runs_before_draw() {
        let mut animator = Animator::new(Probe::default());
        animator.start(0.0);
        assert!(animator.frame(16.0));
        assert!(animator.frame(32.0));
        assert_eq!(animator.simulation().log, ["update", "draw", "update", "draw"]);
    }

    #[test]
    fn test_paused_animator_skips_frames() {
        let mut animator = Animator::new(Probe::default());
        assert!(!animator.frame(16.0));
        animator.start(16.0);
        animator.pause();
        animator.pause();
        assert!(!animator.frame(32.0));
        assert!(animator.simulation().log.is_empty());
    }

    #[test]
    fn test_resume_delta_excludes_hidden_time() {
        let mut animator = Animator::new(Probe::default());
        animator.start(0.0);
        animator.frame(16.0);
        animator.pause();
        animator.resume(60_000.0);
        animator.frame(60_010.0);
        assert_eq!(animator.simulation().deltas, [16.0, 10.0]);
    }

    #[test]
    fn test_set_pool_size_forwards() {
        let mut animator = Animator::new(Probe::default());
        animator.set_pool_size(7);
        assert_eq!(animator.simulation().pool_size(), 7);
    }
}
