//! Hanami Particles - decorative petal and particle simulations
//!
//! Provides the two animation layers and the context that hosts them:
//! - `PetalSimulation` - 2D falling petals with smoothed stochastic wind
//! - `AmbientParticleField` - 3D point field with a parallax camera
//! - `Canvas2d` / `SceneRenderer` - host surfaces, plus recording versions
//! - `Stage` - boot checks, event routing and per-frame driving

pub mod curves;
pub mod field;
pub mod particle;
pub mod petal;
pub mod rand;
pub mod stage;
pub mod surface;
pub mod wind;

pub use field::{AmbientParticleField, CameraRig};
pub use particle::{Particle, ParticleVertex};
pub use petal::{Petal, PetalBounds, PetalSimulation};
pub use stage::{BootEnvironment, BootOutcome, BootReport, FrameReport, SkipReason, Stage};
pub use surface::{
    Canvas2d, CameraView, DrawCommand, GradientStop, Paint, PointMaterial, RecordingCanvas,
    RecordingScene, SceneFrame, SceneRenderer,
};
pub use wind::WindModel;
