//! Events delivered by the host page

use crate::input::PointerEvent;
use hanami_core::Viewport;

/// An event raised by the host outside the frame callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The viewport was resized
    Resize(Viewport),
    /// Pointer or touch movement
    Pointer(PointerEvent),
    /// Page visibility flipped; `at` is the host timestamp in milliseconds
    Visibility { hidden: bool, at: f64 },
    /// The page is being unloaded
    Unload,
}
