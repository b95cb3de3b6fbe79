//! Interpolation helpers for smoothing and index gradients

use hanami_core::{Color, Hsl};

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Move `current` toward `target` by `factor` of the remaining gap
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Color at `t` in [0, 1] along a two-stop HSL gradient
pub fn hsl_gradient(start: Hsl, end: Hsl, t: f32) -> Color {
    Color::from_hsl(
        lerp_f32(start.h, end.h, t),
        lerp_f32(start.s, end.s, t),
        lerp_f32(start.l, end.l, t),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_f32_endpoints() {
        assert!((lerp_f32(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn approach_closes_fraction_of_gap() {
        assert!((approach(0.0, 1.0, 0.02) - 0.02).abs() < 1e-6);
        assert!((approach(0.5, 0.5, 0.3) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn gradient_endpoints_match_stops() {
        let start = Hsl::new(0.0, 1.0, 0.5);
        let end = Hsl::new(1.0 / 3.0, 1.0, 0.5);
        let a = hsl_gradient(start, end, 0.0);
        let b = hsl_gradient(start, end, 1.0);
        assert!((a.r - 1.0).abs() < 1e-4);
        assert!((b.g - 1.0).abs() < 1e-4);
    }
}
