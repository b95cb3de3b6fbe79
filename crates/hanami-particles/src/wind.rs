//! Smoothed stochastic wind applied to petals

use crate::curves::approach;
use crate::rand::ParticleRng;

/// Scalar wind whose current value eases toward a target that jumps on gusts
#[derive(Debug, Clone)]
pub struct WindModel {
    current: f32,
    target: f32,
    /// Gust targets fall within `[-speed, speed]`
    speed: f32,
    gust_probability: f32,
    smoothing: f32,
}

impl WindModel {
    pub fn new(speed: f32, gust_probability: f32, smoothing: f32) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            speed,
            gust_probability,
            smoothing,
        }
    }

    /// Advance one frame: maybe start a gust, then ease toward the target
    pub fn update(&mut self, rng: &mut ParticleRng) {
        if rng.chance(self.gust_probability) {
            self.target = rng.centered(self.speed * 2.0);
        }
        self.current = approach(self.current, self.target, self.smoothing);
    }

    /// Add an external force to the target
    pub fn nudge(&mut self, delta: f32) {
        self.target += delta;
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Change the gust range for future gusts
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}
