//! Hanami Runtime - Frame loop infrastructure
//!
//! Provides the building blocks shared by both simulations:
//! - `FrameScheduler` - Running/Paused frame driver with resume re-baselining
//! - `ViewportAdapter` / `Breakpoint` - mobile/desktop classification
//! - `PointerEvent` / `PointerTracker` - normalized pointer and touch input
//! - `HostEvent` / `EventBus` - host events applied ahead of the next frame
//! - `Simulation` / `Animator` - update-then-draw driving of one simulation

mod event;
mod event_bus;
mod input;
mod scheduler;
mod system;
mod viewport;

pub use event::HostEvent;
pub use event_bus::EventBus;
pub use input::{PointerEvent, PointerSource, PointerTracker};
pub use scheduler::{FrameScheduler, FrameTime, SchedulerState, MAX_FRAME_DELTA_MS};
pub use system::{Animator, Simulation};
pub use viewport::{Breakpoint, BreakpointChange, ViewportAdapter};
