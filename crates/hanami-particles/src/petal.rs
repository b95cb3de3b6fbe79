//! Falling-petal simulation over a fixed, reset-in-place pool

use crate::rand::ParticleRng;
use crate::surface::{Canvas2d, GradientStop, Paint};
use crate::wind::WindModel;
use glam::Vec2;
use hanami_core::{Color, PetalConfig, Viewport};
use hanami_runtime::{Breakpoint, BreakpointChange, FrameTime, PointerEvent, PointerTracker, Simulation};
use std::f32::consts::TAU;

/// Drawable area the petals fall through, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetalBounds {
    pub width: f32,
    pub height: f32,
}

impl From<Viewport> for PetalBounds {
    fn from(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
        }
    }
}

/// One petal. Size, color and opacity are chosen on reset and never change
/// during updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Petal {
    pub position: Vec2,
    pub size: f32,
    pub fall_speed: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub swing_amplitude: f32,
    pub swing_speed: f32,
    pub swing_phase: f32,
    /// Swing offset of the previous update; `None` right after a reset
    pub last_swing_offset: Option<f32>,
    pub color: Color,
    pub opacity: f32,
}

/// Create a petal at the top edge with freshly randomized attributes
pub fn spawn_petal(rng: &mut ParticleRng, config: &PetalConfig, bounds: PetalBounds) -> Petal {
    let color = config.colors[rng.index(config.colors.len())];
    Petal {
        position: Vec2::new(rng.range(0.0, bounds.width), -config.vertical_margin),
        size: rng.range(config.min_size, config.max_size),
        fall_speed: rng.range(config.min_speed, config.max_speed),
        rotation: rng.range(0.0, TAU),
        rotation_speed: rng.centered(config.rotation_speed),
        swing_amplitude: rng.range(config.min_swing_amplitude, config.max_swing_amplitude),
        swing_speed: rng.range(config.min_swing_speed, config.max_swing_speed),
        swing_phase: rng.range(0.0, TAU),
        last_swing_offset: None,
        color,
        opacity: rng.range(config.min_opacity, config.max_opacity),
    }
}

/// Re-enter a petal from the top edge, reassigning every randomized field
pub fn reset_petal(
    petal: &mut Petal,
    rng: &mut ParticleRng,
    config: &PetalConfig,
    bounds: PetalBounds,
) {
    *petal = spawn_petal(rng, config, bounds);
}

/// Advance one petal by a frame
///
/// `sim_time` is simulation time in seconds and `wind` the current wind.
pub fn update_petal(
    petal: &mut Petal,
    sim_time: f32,
    wind: f32,
    rng: &mut ParticleRng,
    config: &PetalConfig,
    bounds: PetalBounds,
) {
    petal.position.y += petal.fall_speed;

    // Only the change in swing moves the petal, so it drifts instead of
    // snapping along an absolute sine
    let swing = (sim_time * petal.swing_speed + petal.swing_phase).sin() * petal.swing_amplitude;
    if let Some(last) = petal.last_swing_offset {
        petal.position.x += (swing - last) * config.swing_damping;
    }
    petal.last_swing_offset = Some(swing);

    petal.position.x += wind;
    petal.rotation += petal.rotation_speed;

    if petal.position.y > bounds.height + config.vertical_margin {
        reset_petal(petal, rng, config, bounds);
        return;
    }

    let margin = config.horizontal_margin;
    if petal.position.x < -margin || petal.position.x > bounds.width + margin {
        petal.position.x = rng.range(0.0, bounds.width);
    }
}

/// Draw a petal: two Bézier lobes in its color, then a soft white highlight
pub fn draw_petal(petal: &Petal, canvas: &mut impl Canvas2d, highlight_alpha: f32) {
    let half = petal.size / 2.0;

    canvas.save();
    canvas.translate(petal.position.x, petal.position.y);
    canvas.rotate(petal.rotation);
    canvas.set_global_alpha(petal.opacity);

    canvas.set_fill(&Paint::Solid(petal.color));
    canvas.begin_path();
    canvas.move_to(0.0, -half);
    canvas.bezier_curve_to((half, -half), (half, 0.0), (0.0, half));
    canvas.bezier_curve_to((-half, 0.0), (-half, -half), (0.0, -half));
    canvas.fill();

    canvas.set_fill(&Paint::Radial {
        radius: half,
        inner: GradientStop {
            offset: 0.0,
            color: Color::WHITE.with_alpha(highlight_alpha),
        },
        outer: GradientStop {
            offset: 1.0,
            color: Color::WHITE.with_alpha(0.0),
        },
    });
    canvas.fill();

    canvas.restore();
}

/// The petal layer: a wind model plus a fixed pool of petals on a 2D canvas
pub struct PetalSimulation<C: Canvas2d> {
    config: PetalConfig,
    petals: Vec<Petal>,
    wind: WindModel,
    bounds: PetalBounds,
    pointer: PointerTracker,
    rng: ParticleRng,
    canvas: C,
}

impl<C: Canvas2d> PetalSimulation<C> {
    /// Build the simulation with the pool size of `breakpoint`
    pub fn new(
        config: PetalConfig,
        viewport: Viewport,
        breakpoint: Breakpoint,
        canvas: C,
        seed: u32,
    ) -> Self {
        let wind = WindModel::new(config.wind_speed, config.gust_probability, config.wind_smoothing);
        let count = config.count_for(breakpoint.is_mobile());
        let mut sim = Self {
            config,
            petals: Vec::new(),
            wind,
            bounds: viewport.into(),
            pointer: PointerTracker::new(),
            rng: ParticleRng::new(seed),
            canvas,
        };
        sim.init(count);
        sim
    }

    /// Replace the pool with `pool_size` new petals spread over the full
    /// height, so the first frames do not show a single synchronized wave
    pub fn init(&mut self, pool_size: usize) {
        self.petals.clear();
        self.petals.reserve_exact(pool_size);
        for _ in 0..pool_size {
            let mut petal = spawn_petal(&mut self.rng, &self.config, self.bounds);
            petal.position.y = self.rng.range(0.0, self.bounds.height);
            self.petals.push(petal);
        }
        tracing::info!(count = pool_size, "petal pool initialized");
    }

    /// Change the gust range used by the wind model
    pub fn set_wind_speed(&mut self, speed: f32) {
        self.config.wind_speed = speed;
        self.wind.set_speed(speed);
    }

    pub fn petals(&self) -> &[Petal] {
        &self.petals
    }

    pub fn wind(&self) -> &WindModel {
        &self.wind
    }

    pub fn wind_mut(&mut self) -> &mut WindModel {
        &mut self.wind
    }

    pub fn bounds(&self) -> PetalBounds {
        self.bounds
    }

    pub fn config(&self) -> &PetalConfig {
        &self.config
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }
}

impl<C: Canvas2d> Simulation for PetalSimulation<C> {
    fn update(&mut self, frame: &FrameTime) {
        self.wind.update(&mut self.rng);
        let wind = self.wind.current();
        let sim_time = frame.elapsed as f32;
        for petal in &mut self.petals {
            update_petal(petal, sim_time, wind, &mut self.rng, &self.config, self.bounds);
        }
    }

    fn draw(&mut self) {
        self.canvas.clear(self.bounds.width, self.bounds.height);
        for petal in &self.petals {
            draw_petal(petal, &mut self.canvas, self.config.highlight_alpha);
        }
    }

    fn resize(&mut self, viewport: Viewport, change: Option<BreakpointChange>) {
        self.bounds = viewport.into();
        if let Some(change) = change {
            self.init(self.config.count_for(change.to.is_mobile()));
        }
    }

    fn pointer(&mut self, event: &PointerEvent) {
        let dx = self.pointer.horizontal_delta(event);
        if dx != 0.0 {
            self.wind.nudge(dx * self.config.pointer_wind_scale);
        }
    }

    fn set_pool_size(&mut self, count: usize) {
        self.init(count);
    }

    fn pool_size(&self) -> usize {
        self.petals.len()
    }

    fn name(&self) -> &str {
        "petals"
    }
}
