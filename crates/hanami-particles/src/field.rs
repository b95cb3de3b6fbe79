//! Ambient 3D particle field with a pointer-driven parallax camera

use crate::curves::hsl_gradient;
use crate::particle::{reflect_into_bounds, Particle, ParticleVertex};
use crate::rand::ParticleRng;
use crate::surface::{CameraView, PointMaterial, SceneFrame, SceneRenderer};
use glam::{Mat4, Vec2, Vec3};
use hanami_core::{FieldConfig, Viewport};
use hanami_runtime::{
    Breakpoint, BreakpointChange, FrameTime, PointerEvent, PointerSource, Simulation,
};

/// Perspective camera whose offset eases toward the pointer and which is
/// re-aimed at the scene origin every frame
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Smoothed pointer position in normalized device coordinates
    offset: Vec2,
    target: Vec2,
    smoothing: f32,
    influence: f32,
    distance: f32,
    fov_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl CameraRig {
    pub fn from_config(config: &FieldConfig, aspect: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            target: Vec2::ZERO,
            smoothing: config.camera_smoothing,
            influence: config.mouse_influence,
            distance: config.camera_distance,
            fov_degrees: config.camera_fov_degrees,
            aspect,
            near: config.camera_near,
            far: config.camera_far,
        }
    }

    pub fn set_pointer_target(&mut self, ndc: Vec2) {
        self.target = ndc;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Ease the offset toward the pointer target by one frame
    pub fn update(&mut self) {
        self.offset += (self.target - self.offset) * self.smoothing;
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.offset.x * self.influence,
            self.offset.y * self.influence,
            self.distance,
        )
    }

    /// View and projection looking at the origin from the current position
    pub fn view(&self) -> CameraView {
        let position = self.position();
        CameraView {
            position,
            target: Vec3::ZERO,
            view: Mat4::look_at_rh(position, Vec3::ZERO, Vec3::Y),
            projection: Mat4::perspective_rh_gl(
                self.fov_degrees.to_radians(),
                self.aspect,
                self.near,
                self.far,
            ),
        }
    }
}

/// The particle layer: a fixed particle buffer rendered as additive points
pub struct AmbientParticleField<R: SceneRenderer> {
    config: FieldConfig,
    particles: Vec<Particle>,
    /// Packed copy of `particles` handed to the renderer
    vertices: Vec<ParticleVertex>,
    camera: CameraRig,
    /// Group rotation about the vertical axis, radians
    rotation: f32,
    viewport: Viewport,
    rng: ParticleRng,
    renderer: R,
}

impl<R: SceneRenderer> AmbientParticleField<R> {
    /// Build the field with the buffer size of `breakpoint` and size the
    /// render target to the viewport
    pub fn new(
        config: FieldConfig,
        viewport: Viewport,
        breakpoint: Breakpoint,
        renderer: R,
        seed: u32,
    ) -> Self {
        let count = config.count_for(breakpoint.is_mobile());
        let camera = CameraRig::from_config(&config, viewport.aspect());
        let mut field = Self {
            config,
            particles: Vec::new(),
            vertices: Vec::new(),
            camera,
            rotation: 0.0,
            viewport,
            rng: ParticleRng::new(seed),
            renderer,
        };
        field.apply_render_size();
        field.init(count);
        field
    }

    /// Allocate `count` particles with random positions and velocities and
    /// index-banded gradient colors
    pub fn init(&mut self, count: usize) {
        let bounds = self.bounds();
        let speed = self.config.move_speed;

        self.particles.clear();
        self.particles.reserve_exact(count);
        for i in 0..count {
            let t = i as f32 / count as f32;
            self.particles.push(Particle {
                position: Vec3::new(
                    self.rng.centered(bounds.x * 2.0),
                    self.rng.centered(bounds.y * 2.0),
                    self.rng.centered(bounds.z * 2.0),
                ),
                velocity: Vec3::new(
                    self.rng.centered(speed),
                    self.rng.centered(speed),
                    self.rng.centered(speed * 0.5),
                ),
                color: hsl_gradient(self.config.gradient_start, self.config.gradient_end, t),
            });
        }

        self.vertices.clear();
        self.vertices
            .extend(self.particles.iter().map(ParticleVertex::from_particle));
        tracing::info!(count, "particle buffer initialized");
    }

    pub fn bounds(&self) -> Vec3 {
        Vec3::from_array(self.config.bounds)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn material(&self) -> PointMaterial {
        PointMaterial {
            size: self.config.particle_size,
            opacity: self.config.opacity,
            additive: self.config.additive_blending,
            depth_write: false,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn apply_render_size(&mut self) {
        let ratio = self.viewport.capped_pixel_ratio(self.config.max_pixel_ratio);
        self.renderer.set_size(
            self.viewport.width.max(0.0) as u32,
            self.viewport.height.max(0.0) as u32,
            ratio,
        );
    }
}

impl<R: SceneRenderer> Simulation for AmbientParticleField<R> {
    fn update(&mut self, frame: &FrameTime) {
        self.camera.update();

        let bounds = self.bounds();
        let amplitude = self.config.jitter_amplitude;
        let t = frame.elapsed as f32 * self.config.jitter_frequency;
        for (i, particle) in self.particles.iter_mut().enumerate() {
            let phase = t + i as f32;
            let jitter = Vec3::new(phase.sin() * amplitude, phase.cos() * amplitude, 0.0);
            particle.position = reflect_into_bounds(particle.position + particle.velocity + jitter, bounds);
        }

        self.rotation += self.config.rotation_speed;

        for (vertex, particle) in self.vertices.iter_mut().zip(&self.particles) {
            *vertex = ParticleVertex::from_particle(particle);
        }
    }

    fn draw(&mut self) {
        let frame = SceneFrame {
            vertices: &self.vertices,
            model: Mat4::from_rotation_y(self.rotation),
            camera: self.camera.view(),
            material: self.material(),
        };
        self.renderer.render(&frame);
    }

    fn resize(&mut self, viewport: Viewport, _change: Option<BreakpointChange>) {
        // Only the projection and render target follow the viewport; the
        // particle buffer keeps its boot-time size
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
        self.apply_render_size();
    }

    fn pointer(&mut self, event: &PointerEvent) {
        if event.source == PointerSource::Mouse {
            let (x, y) = event.to_ndc(&self.viewport);
            self.camera.set_pointer_target(Vec2::new(x, y));
        }
    }

    fn set_pool_size(&mut self, count: usize) {
        self.init(count);
    }

    fn pool_size(&self) -> usize {
        self.particles.len()
    }

    fn name(&self) -> &str {
        "particles"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingScene;

    fn frame(n: u64) -> FrameTime {
        FrameTime {
            now: n as f64 * 16.0,
            delta: 16.0,
            elapsed: n as f64 * 0.016,
            frame: n,
        }
    }

    fn field_at(viewport: Viewport, seed: u32) -> AmbientParticleField<RecordingScene> {
        AmbientParticleField::new(
            FieldConfig::default(),
            viewport,
            Breakpoint::classify(viewport.width),
            RecordingScene::new(),
            seed,
        )
    }

    fn in_bounds(p: Vec3, bounds: Vec3) -> bool {
        p.x.abs() <= bounds.x && p.y.abs() <= bounds.y && p.z.abs() <= bounds.z
    }

    #[test]
    fn buffer_size_follows_breakpoint() {
        assert_eq!(field_at(Viewport::new(375.0, 667.0), 1).pool_size(), 50);
        assert_eq!(field_at(Viewport::new(1920.0, 1080.0), 1).pool_size(), 100);
    }

    #[test]
    fn initial_particles_fill_the_box() {
        let field = field_at(Viewport::new(1024.0, 768.0), 5);
        let bounds = field.bounds();
        for p in field.particles() {
            assert!(in_bounds(p.position, bounds));
            assert!(p.velocity.x.abs() <= 0.1 && p.velocity.y.abs() <= 0.1);
            assert!(p.velocity.z.abs() <= 0.05);
        }
    }

    #[test]
    fn colors_band_by_index_not_seed() {
        let a = field_at(Viewport::new(1024.0, 768.0), 1);
        let b = field_at(Viewport::new(1024.0, 768.0), 2);
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.color, pb.color);
        }
        let first = a.particles()[0].color;
        let expected = FieldConfig::default().gradient_start.to_color();
        assert!((first.r - expected.r).abs() < 1e-6);
        assert!((first.g - expected.g).abs() < 1e-6);
        assert_ne!(a.particles()[0].color, a.particles()[99].color);
    }

    #[test]
    fn crossing_a_bound_reflects_in_same_update() {
        let mut field = field_at(Viewport::new(1024.0, 768.0), 8);
        field.particles[0].position = Vec3::new(399.95, 0.0, 0.0);
        field.particles[0].velocity = Vec3::new(0.2, 0.0, 0.0);
        field.update(&frame(1));
        let p = field.particles()[0].position;
        assert!(p.x < 0.0);
        assert!(p.x >= -400.0);
    }

    #[test]
    fn z_reflection_uses_its_own_bound() {
        let mut field = field_at(Viewport::new(1024.0, 768.0), 8);
        field.particles[3].position = Vec3::new(0.0, 0.0, -199.99);
        field.particles[3].velocity = Vec3::new(0.0, 0.0, -0.05);
        field.update(&frame(1));
        let z = field.particles()[3].position.z;
        assert!(z > 0.0 && z <= 200.0);
    }

    #[test]
    fn particles_stay_within_bounds() {
        let mut field = field_at(Viewport::new(1920.0, 1080.0), 13);
        let bounds = field.bounds();
        for n in 1..5_000 {
            field.update(&frame(n));
            assert!(field.particles().iter().all(|p| in_bounds(p.position, bounds)));
        }
    }

    #[test]
    fn camera_eases_toward_pointer_and_aims_at_origin() {
        let mut field = field_at(Viewport::new(800.0, 600.0), 2);
        field.pointer(&PointerEvent::mouse(800.0, 0.0));
        field.update(&frame(1));

        let position = field.camera().position();
        assert!((position.x - 2.5).abs() < 1e-4);
        assert!((position.y - 2.5).abs() < 1e-4);
        assert!((position.z - 400.0).abs() < 1e-4);

        let view = field.camera().view();
        let origin = view.view.transform_point3(Vec3::ZERO);
        assert!(origin.x.abs() < 1e-3 && origin.y.abs() < 1e-3);
        assert!((origin.z + position.length()).abs() < 1e-2);

        for n in 2..400 {
            field.update(&frame(n));
        }
        let settled = field.camera().offset();
        assert!((settled.x - 1.0).abs() < 1e-3 && (settled.y - 1.0).abs() < 1e-3);
        assert!(settled.x <= 1.0);
    }

    #[test]
    fn touch_does_not_move_camera() {
        let mut field = field_at(Viewport::new(800.0, 600.0), 2);
        field.pointer(&PointerEvent::touch(800.0, 0.0));
        field.update(&frame(1));
        assert_eq!(field.camera().offset(), Vec2::ZERO);
    }

    #[test]
    fn resize_updates_target_but_keeps_buffer() {
        let viewport = Viewport::new(1920.0, 1080.0).with_pixel_ratio(3.0);
        let mut field = field_at(viewport, 4);
        assert_eq!(field.renderer().pixel_ratio(), 2.0);
        let before: Vec<Vec3> = field.particles().iter().map(|p| p.position).collect();

        field.resize(
            Viewport::new(375.0, 667.0),
            Some(BreakpointChange {
                from: Breakpoint::Desktop,
                to: Breakpoint::Mobile,
            }),
        );

        assert_eq!(field.pool_size(), 100);
        let after: Vec<Vec3> = field.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        assert_eq!(field.renderer().size(), (375, 667));
        assert_eq!(field.renderer().resizes(), 2);
        assert!((field.camera().aspect() - 375.0 / 667.0).abs() < 1e-6);
    }

    #[test]
    fn draw_submits_every_vertex_with_group_rotation() {
        let mut field = field_at(Viewport::new(1024.0, 768.0), 6);
        for n in 1..=10 {
            field.update(&frame(n));
        }
        field.draw();

        let scene = field.renderer();
        assert_eq!(scene.renders(), 1);
        assert_eq!(scene.vertices().len(), 100);
        assert_eq!(scene.vertices()[7], ParticleVertex::from_particle(&field.particles()[7]));
        assert!((field.rotation() - 0.005).abs() < 1e-6);
        let expected = Mat4::from_rotation_y(field.rotation());
        assert!(scene.model().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn set_pool_size_reallocates() {
        let mut field = field_at(Viewport::new(1024.0, 768.0), 6);
        field.set_pool_size(12);
        assert_eq!(field.pool_size(), 12);
        assert_eq!(field.vertices().len(), 12);
    }
}
