//! Queue of host events applied ahead of the next frame

use crate::event::HostEvent;

/// A simple event queue that host handlers push to and the stage drains
/// before each frame
pub struct EventBus {
    events: Vec<HostEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: HostEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus in arrival order
    pub fn drain(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerEvent;
    use hanami_core::Viewport;

    #[test]
    fn test_push_and_drain_in_order() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());

        bus.push(HostEvent::Pointer(PointerEvent::mouse(1.0, 2.0)));
        bus.push(HostEvent::Resize(Viewport::new(375.0, 667.0)));

        assert_eq!(bus.len(), 2);
        let events = bus.drain();
        assert!(matches!(events[0], HostEvent::Pointer(_)));
        assert!(matches!(events[1], HostEvent::Resize(_)));
        assert!(bus.is_empty());
    }

    #[test]
    fn test_drain_clears() {
        let mut bus = EventBus::new();
        bus.push(HostEvent::Unload);

        let _ = bus.drain();
        assert!(bus.drain().is_empty());
    }
}
