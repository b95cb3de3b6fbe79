//! Viewport breakpoint classification and change notification

use hanami_core::{Viewport, MOBILE_BREAKPOINT_PX};

/// Viewport-width classification that governs pool sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Mobile,
    Desktop,
}

impl Breakpoint {
    /// Classify a width in CSS pixels against the standard 768 px threshold
    pub fn classify(width: f32) -> Self {
        Self::classify_with(width, MOBILE_BREAKPOINT_PX)
    }

    pub fn classify_with(width: f32, threshold: f32) -> Self {
        if width < threshold {
            Breakpoint::Mobile
        } else {
            Breakpoint::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Breakpoint::Mobile
    }

    /// Pick the value that belongs to this breakpoint
    pub fn pick<T>(self, mobile: T, desktop: T) -> T {
        match self {
            Breakpoint::Mobile => mobile,
            Breakpoint::Desktop => desktop,
        }
    }
}

/// A breakpoint transition observed across a resize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointChange {
    pub from: Breakpoint,
    pub to: Breakpoint,
}

type Listener = Box<dyn FnMut(BreakpointChange)>;

/// Tracks the current viewport and notifies listeners when its breakpoint flips
pub struct ViewportAdapter {
    viewport: Viewport,
    breakpoint: Breakpoint,
    threshold: f32,
    listeners: Vec<Listener>,
}

impl ViewportAdapter {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_threshold(viewport, MOBILE_BREAKPOINT_PX)
    }

    pub fn with_threshold(viewport: Viewport, threshold: f32) -> Self {
        Self {
            viewport,
            breakpoint: Breakpoint::classify_with(viewport.width, threshold),
            threshold,
            listeners: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// Register a callback fired only when a resize changes the breakpoint
    pub fn on_breakpoint_change(&mut self, listener: impl FnMut(BreakpointChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Record a new viewport. Listeners run, and the change is returned,
    /// only if the classification differs from the previous one.
    pub fn resize(&mut self, viewport: Viewport) -> Option<BreakpointChange> {
        self.viewport = viewport;
        let next = Breakpoint::classify_with(viewport.width, self.threshold);
        if next == self.breakpoint {
            return None;
        }

        let change = BreakpointChange {
            from: self.breakpoint,
            to: next,
        };
        self.breakpoint = next;
        for listener in &mut self.listeners {
            listener(change);
        }
        Some(change)
    }
}
