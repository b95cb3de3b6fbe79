//! Pointer input normalization

use hanami_core::Viewport;

/// Where a pointer sample came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    /// First active touch point of a touch-move
    Touch,
}

/// A pointer position in viewport CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub source: PointerSource,
}

impl PointerEvent {
    pub fn mouse(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            source: PointerSource::Mouse,
        }
    }

    pub fn touch(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            source: PointerSource::Touch,
        }
    }

    /// Map to normalized device coordinates: x right and y up, both in [-1, 1]
    pub fn to_ndc(&self, viewport: &Viewport) -> (f32, f32) {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return (0.0, 0.0);
        }
        (
            (self.x / viewport.width) * 2.0 - 1.0,
            -(self.y / viewport.height) * 2.0 + 1.0,
        )
    }
}

/// Tracks the last pointer position to turn samples into displacements
#[derive(Debug, Default, Clone)]
pub struct PointerTracker {
    last: Option<(f32, f32)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Horizontal travel since the previous sample. The very first sample
    /// only establishes the baseline.
    pub fn horizontal_delta(&mut self, event: &PointerEvent) -> f32 {
        let dx = match self.last {
            Some((x, _)) => event.x - x,
            None => 0.0,
        };
        self.last = Some((event.x, event.y));
        dx
    }

    pub fn last_position(&self) -> Option<(f32, f32)> {
        self.last
    }
}
