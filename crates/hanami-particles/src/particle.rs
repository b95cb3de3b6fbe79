//! Ambient particle types: CPU simulation state and GPU vertex data

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use hanami_core::Color;

/// CPU-side particle state (not sent to GPU)
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Assigned from the index gradient at allocation, never changed
    pub color: Color,
}

/// GPU vertex data for one point sprite.
/// 24 bytes: position followed by RGB color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ParticleVertex {
    pub fn from_particle(p: &Particle) -> Self {
        Self {
            position: p.position.to_array(),
            color: p.color.rgb(),
        }
    }
}

/// Negate `value` if it lies outside `[-bound, bound]`, landing on the
/// opposite edge. This mirrors through the origin; it is not a toroidal wrap.
pub fn reflect_axis(value: f32, bound: f32) -> f32 {
    if value.abs() > bound {
        -value.clamp(-bound, bound)
    } else {
        value
    }
}

/// Apply [`reflect_axis`] to each component against its own bound
pub fn reflect_into_bounds(position: Vec3, bounds: Vec3) -> Vec3 {
    Vec3::new(
        reflect_axis(position.x, bounds.x),
        reflect_axis(position.y, bounds.y),
        reflect_axis(position.z, bounds.z),
    )
}
