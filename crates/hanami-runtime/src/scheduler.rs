//! Per-simulation frame scheduler with visibility-driven pause/resume

/// Longest frame delta handed to a simulation, in milliseconds
pub const MAX_FRAME_DELTA_MS: f64 = 250.0;

/// Whether the scheduler will run the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running,
    Paused,
}

/// Timing information for one scheduled frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Host timestamp of this frame in milliseconds
    pub now: f64,
    /// Milliseconds since the previous frame (or since the resume point)
    pub delta: f64,
    /// Simulation time in seconds: the sum of every delta so far
    pub elapsed: f64,
    /// Frames run since the scheduler was created
    pub frame: u64,
}

/// Drives a continuous per-frame callback and owns the Running/Paused state
///
/// The host calls [`FrameScheduler::tick`] once per display refresh. While
/// paused the tick is cancelled. Resuming re-baselines the previous
/// timestamp, so time spent paused never reaches the simulation.
pub struct FrameScheduler {
    state: SchedulerState,
    /// Timestamp the next delta is measured from
    previous: f64,
    elapsed: f64,
    frame: u64,
    max_delta: f64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self {
            state: SchedulerState::Paused,
            previous: 0.0,
            elapsed: 0.0,
            frame: 0,
            max_delta: MAX_FRAME_DELTA_MS,
        }
    }
}

impl FrameScheduler {
    /// Create a scheduler that has not started yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler with a custom delta clamp in milliseconds
    pub fn with_max_delta(max_delta: f64) -> Self {
        Self {
            max_delta,
            ..Self::default()
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Simulation seconds accumulated so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Begin continuous scheduling with `now` as the time baseline
    pub fn start(&mut self, now: f64) {
        self.resume(now);
    }

    /// Cancel the next scheduled frame. Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        if self.state == SchedulerState::Paused {
            return false;
        }
        self.state = SchedulerState::Paused;
        true
    }

    /// Resume scheduling and reset the previous timestamp to `now`.
    /// Returns false (and keeps the existing baseline) if already running.
    pub fn resume(&mut self, now: f64) -> bool {
        if self.state == SchedulerState::Running {
            return false;
        }
        self.state = SchedulerState::Running;
        self.previous = now;
        true
    }

    /// Run one frame at host time `now`. Returns `None` while paused.
    pub fn tick(&mut self, now: f64) -> Option<FrameTime> {
        if self.state == SchedulerState::Paused {
            return None;
        }

        // Non-monotonic host clocks yield a zero delta rather than rewinding
        let delta = (now - self.previous).clamp(0.0, self.max_delta);
        self.previous = now;
        self.elapsed += delta / 1000.0;
        self.frame += 1;

        Some(FrameTime {
            now,
            delta,
            elapsed: self.elapsed,
            frame: self.frame,
        })
    }
}
