//! Rendering surfaces supplied by the host
//!
//! `Canvas2d` mirrors the subset of a 2D canvas context the petals need and
//! `SceneRenderer` stands in for a GPU scene/camera/renderer triple. The
//! recording implementations keep what was drawn in memory, for headless
//! runs and tests.

use crate::particle::ParticleVertex;
use glam::{Mat4, Vec3};
use hanami_core::Color;

/// One stop of a gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

/// Fill style for 2D paths
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Radial gradient centered on the current origin, from radius 0 to `radius`
    Radial {
        radius: f32,
        inner: GradientStop,
        outer: GradientStop,
    },
}

/// A 2D drawing surface with canvas-context semantics
pub trait Canvas2d {
    /// Clear the whole surface; called at the start of every frame
    fn clear(&mut self, width: f32, height: f32);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn set_global_alpha(&mut self, alpha: f32);
    fn set_fill(&mut self, paint: &Paint);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn bezier_curve_to(&mut self, cp1: (f32, f32), cp2: (f32, f32), end: (f32, f32));
    /// Fill the current path with the current paint
    fn fill(&mut self);
}

/// A recorded 2D canvas call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32),
    GlobalAlpha(f32),
    SetFill(Paint),
    BeginPath,
    MoveTo(f32, f32),
    BezierCurveTo((f32, f32), (f32, f32), (f32, f32)),
    Fill,
}

/// In-memory canvas that keeps the commands of the latest frame
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    frames: usize,
    total_fills: usize,
    size: (f32, f32),
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued since the last clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of cleared (started) frames
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Fill calls across every frame
    pub fn total_fills(&self) -> usize {
        self.total_fills
    }

    pub fn size(&self) -> (f32, f32) {
        self.size
    }
}

impl Canvas2d for RecordingCanvas {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.clear();
        self.frames += 1;
        self.size = (width, height);
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate(x, y));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate(radians));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_fill(&mut self, paint: &Paint) {
        self.commands.push(DrawCommand::SetFill(*paint));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn bezier_curve_to(&mut self, cp1: (f32, f32), cp2: (f32, f32), end: (f32, f32)) {
        self.commands.push(DrawCommand::BezierCurveTo(cp1, cp2, end));
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
        self.total_fills += 1;
    }
}

/// How particles are shaded as point sprites
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMaterial {
    pub size: f32,
    pub opacity: f32,
    pub additive: bool,
    pub depth_write: bool,
}

/// Camera placement for one rendered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
    pub target: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
}

/// Everything a scene renderer needs to draw the particle field once
pub struct SceneFrame<'a> {
    pub vertices: &'a [ParticleVertex],
    /// Group transform (slow rotation about y)
    pub model: Mat4,
    pub camera: CameraView,
    pub material: PointMaterial,
}

/// A GPU-backed scene renderer bound to its own surface
pub trait SceneRenderer {
    /// Resize the render target; `pixel_ratio` is already capped
    fn set_size(&mut self, width: u32, height: u32, pixel_ratio: f32);
    fn render(&mut self, frame: &SceneFrame<'_>);
}

/// In-memory renderer that keeps the last submitted frame
#[derive(Debug, Default)]
pub struct RecordingScene {
    size: (u32, u32),
    pixel_ratio: f32,
    renders: usize,
    resizes: usize,
    vertices: Vec<ParticleVertex>,
    camera: Option<CameraView>,
    model: Mat4,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Number of render calls
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Number of render-target resizes
    pub fn resizes(&self) -> usize {
        self.resizes
    }

    /// Vertices of the last rendered frame
    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }

    pub fn camera(&self) -> Option<&CameraView> {
        self.camera.as_ref()
    }

    pub fn model(&self) -> Mat4 {
        self.model
    }
}

impl SceneRenderer for RecordingScene {
    fn set_size(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.size = (width, height);
        self.pixel_ratio = pixel_ratio;
        self.resizes += 1;
    }

    fn render(&mut self, frame: &SceneFrame<'_>) {
        self.vertices.clear();
        self.vertices.extend_from_slice(frame.vertices);
        self.camera = Some(frame.camera);
        self.model = frame.model;
        self.renders += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_canvas_keeps_latest_frame() {
        let mut canvas = RecordingCanvas::new();
        canvas.clear(100.0, 50.0);
        canvas.begin_path();
        canvas.fill();
        canvas.clear(100.0, 50.0);
        canvas.fill();

        assert_eq!(canvas.frames(), 2);
        assert_eq!(canvas.total_fills(), 2);
        assert_eq!(canvas.commands(), &[DrawCommand::Fill]);
        assert_eq!(canvas.size(), (100.0, 50.0));
    }

    #[test]
    fn recording_scene_tracks_resizes() {
        let mut scene = RecordingScene::new();
        scene.set_size(800, 600, 2.0);
        assert_eq!(scene.size(), (800, 600));
        assert_eq!(scene.pixel_ratio(), 2.0);
        assert_eq!(scene.resizes(), 1);
        assert_eq!(scene.renders(), 0);
        assert!(scene.camera().is_none());
    }
}
