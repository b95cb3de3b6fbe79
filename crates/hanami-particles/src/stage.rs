//! The simulation context owned by host glue
//!
//! A `Stage` is built once at page boot. It decides which subsystems run,
//! routes host events to them and drives both animators every frame.

use crate::field::AmbientParticleField;
use crate::petal::PetalSimulation;
use crate::surface::{Canvas2d, SceneRenderer};
use hanami_core::{HanamiConfig, Viewport};
use hanami_runtime::{Animator, EventBus, HostEvent, Simulation, ViewportAdapter};

/// What the host page offers at boot
pub struct BootEnvironment<C, R> {
    pub viewport: Viewport,
    /// The user prefers reduced motion; read once, never re-checked
    pub reduced_motion: bool,
    /// 2D surface for the petals, if the page has one
    pub canvas: Option<C>,
    /// 3D renderer for the particle field, if the capability is present
    pub scene: Option<R>,
    /// Host timestamp of boot in milliseconds
    pub now: f64,
    /// Seed used when the configuration does not pin one
    pub seed: u32,
}

/// Why a subsystem did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ReducedMotion,
    MissingSurface,
    MissingCapability,
}

/// Boot result of one subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootOutcome {
    Started,
    Skipped(SkipReason),
}

impl BootOutcome {
    pub fn started(self) -> bool {
        self == BootOutcome::Started
    }
}

/// Boot results of both subsystems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootReport {
    pub petals: BootOutcome,
    pub particles: BootOutcome,
}

/// Which animators ran during a frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub petals: bool,
    pub particles: bool,
}

/// Seed offset so the two simulations do not draw identical sequences
const FIELD_SEED_OFFSET: u32 = 0x9E37_79B9;

/// Explicit simulation context holding both animators
pub struct Stage<C: Canvas2d, R: SceneRenderer> {
    petals: Option<Animator<PetalSimulation<C>>>,
    field: Option<Animator<AmbientParticleField<R>>>,
    viewport: ViewportAdapter,
    events: EventBus,
    report: BootReport,
    shut_down: bool,
}

impl<C: Canvas2d, R: SceneRenderer> Stage<C, R> {
    /// Start every subsystem the environment supports. Missing surfaces and
    /// reduced motion skip the affected subsystem silently.
    pub fn boot(config: &HanamiConfig, env: BootEnvironment<C, R>) -> Self {
        let mut viewport = ViewportAdapter::with_threshold(env.viewport, config.breakpoint_px);
        viewport.on_breakpoint_change(|change| {
            tracing::debug!(from = ?change.from, to = ?change.to, "breakpoint changed");
        });
        let breakpoint = viewport.breakpoint();
        let seed = config.seed.unwrap_or(env.seed);

        let (petals, petal_outcome) = if env.reduced_motion {
            (None, BootOutcome::Skipped(SkipReason::ReducedMotion))
        } else if let Some(canvas) = env.canvas {
            let sim = PetalSimulation::new(config.petals.clone(), env.viewport, breakpoint, canvas, seed);
            let mut animator = Animator::new(sim);
            animator.start(env.now);
            (Some(animator), BootOutcome::Started)
        } else {
            (None, BootOutcome::Skipped(SkipReason::MissingSurface))
        };

        let (field, field_outcome) = if env.reduced_motion {
            (None, BootOutcome::Skipped(SkipReason::ReducedMotion))
        } else if let Some(scene) = env.scene {
            let sim = AmbientParticleField::new(
                config.field.clone(),
                env.viewport,
                breakpoint,
                scene,
                seed.wrapping_add(FIELD_SEED_OFFSET),
            );
            let mut animator = Animator::new(sim);
            animator.start(env.now);
            (Some(animator), BootOutcome::Started)
        } else {
            (None, BootOutcome::Skipped(SkipReason::MissingCapability))
        };

        let report = BootReport {
            petals: petal_outcome,
            particles: field_outcome,
        };
        log_outcome("petals", report.petals);
        log_outcome("particles", report.particles);

        Self {
            petals,
            field,
            viewport,
            events: EventBus::new(),
            report,
            shut_down: false,
        }
    }

    pub fn report(&self) -> BootReport {
        self.report
    }

    /// Queue an event; it is applied at the start of the next frame
    pub fn push_event(&mut self, event: HostEvent) {
        self.events.push(event);
    }

    /// Apply an event immediately
    pub fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Resize(viewport) => {
                let change = self.viewport.resize(viewport);
                if let Some(petals) = &mut self.petals {
                    petals.simulation_mut().resize(viewport, change);
                }
                if let Some(field) = &mut self.field {
                    field.simulation_mut().resize(viewport, change);
                }
            }
            HostEvent::Pointer(pointer) => {
                if let Some(petals) = &mut self.petals {
                    petals.simulation_mut().pointer(&pointer);
                }
                if let Some(field) = &mut self.field {
                    field.simulation_mut().pointer(&pointer);
                }
            }
            HostEvent::Visibility { hidden: true, .. } => self.pause(),
            HostEvent::Visibility { hidden: false, at } => self.resume(at),
            HostEvent::Unload => self.shutdown(),
        }
    }

    /// Apply queued events, then run one frame of each running animator
    pub fn frame(&mut self, now: f64) -> FrameReport {
        for event in self.events.drain() {
            self.handle_event(event);
        }

        FrameReport {
            petals: self.petals.as_mut().is_some_and(|a| a.frame(now)),
            particles: self.field.as_mut().is_some_and(|a| a.frame(now)),
        }
    }

    /// Cancel upcoming frames of both animators
    pub fn pause(&mut self) {
        if let Some(petals) = &mut self.petals {
            petals.pause();
        }
        if let Some(field) = &mut self.field {
            field.pause();
        }
    }

    /// Resume both animators with `now` as the new time baseline
    pub fn resume(&mut self, now: f64) {
        if self.shut_down {
            return;
        }
        if let Some(petals) = &mut self.petals {
            petals.resume(now);
        }
        if let Some(field) = &mut self.field {
            field.resume(now);
        }
    }

    /// Whether any animator expects another frame
    pub fn is_running(&self) -> bool {
        self.petals.as_ref().is_some_and(|a| a.is_running())
            || self.field.as_ref().is_some_and(|a| a.is_running())
    }

    /// Stop for good, as on page unload
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.pause();
        self.shut_down = true;
        tracing::info!("stage shut down");
    }

    pub fn set_petal_count(&mut self, count: usize) {
        if let Some(petals) = &mut self.petals {
            petals.set_pool_size(count);
        }
    }

    pub fn set_particle_count(&mut self, count: usize) {
        if let Some(field) = &mut self.field {
            field.set_pool_size(count);
        }
    }

    pub fn set_wind_speed(&mut self, speed: f32) {
        if let Some(petals) = &mut self.petals {
            petals.simulation_mut().set_wind_speed(speed);
        }
    }

    pub fn viewport(&self) -> &ViewportAdapter {
        &self.viewport
    }

    pub fn petals(&self) -> Option<&Animator<PetalSimulation<C>>> {
        self.petals.as_ref()
    }

    pub fn petals_mut(&mut self) -> Option<&mut Animator<PetalSimulation<C>>> {
        self.petals.as_mut()
    }

    pub fn field(&self) -> Option<&Animator<AmbientParticleField<R>>> {
        self.field.as_ref()
    }

    pub fn field_mut(&mut self) -> Option<&mut Animator<AmbientParticleField<R>>> {
        self.field.as_mut()
    }
}

fn log_outcome(subsystem: &str, outcome: BootOutcome) {
    match outcome {
        BootOutcome::Started => tracing::info!(subsystem, "animation initialized"),
        BootOutcome::Skipped(SkipReason::ReducedMotion) => {
            tracing::info!(subsystem, "animation disabled due to reduced motion preference")
        }
        BootOutcome::Skipped(reason) => {
            tracing::warn!(subsystem, ?reason, "animation disabled, host support missing")
        }
    }
}
