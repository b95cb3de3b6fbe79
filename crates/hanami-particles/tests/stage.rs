//! End-to-end scenarios driving a `Stage` the way host glue does

use hanami_core::{HanamiConfig, Viewport};
use hanami_particles::{
    BootEnvironment, BootOutcome, Canvas2d, Paint, RecordingCanvas, RecordingScene, SceneFrame,
    SceneRenderer, SkipReason, Stage,
};
use hanami_runtime::{HostEvent, PointerEvent, Simulation};
use std::cell::Cell;
use std::rc::Rc;

/// Canvas that only counts calls, shared with the test through `Rc`
#[derive(Clone, Default)]
struct CountingCanvas {
    calls: Rc<Cell<usize>>,
}

impl CountingCanvas {
    fn bump(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl Canvas2d for CountingCanvas {
    fn clear(&mut self, _width: f32, _height: f32) {
        self.bump();
    }
    fn save(&mut self) {
        self.bump();
    }
    fn restore(&mut self) {
        self.bump();
    }
    fn translate(&mut self, _x: f32, _y: f32) {
        self.bump();
    }
    fn rotate(&mut self, _radians: f32) {
        self.bump();
    }
    fn set_global_alpha(&mut self, _alpha: f32) {
        self.bump();
    }
    fn set_fill(&mut self, _paint: &Paint) {
        self.bump();
    }
    fn begin_path(&mut self) {
        self.bump();
    }
    fn move_to(&mut self, _x: f32, _y: f32) {
        self.bump();
    }
    fn bezier_curve_to(&mut self, _cp1: (f32, f32), _cp2: (f32, f32), _end: (f32, f32)) {
        self.bump();
    }
    fn fill(&mut self) {
        self.bump();
    }
}

/// Renderer that only counts calls
#[derive(Clone, Default)]
struct CountingScene {
    calls: Rc<Cell<usize>>,
}

impl SceneRenderer for CountingScene {
    fn set_size(&mut self, _width: u32, _height: u32, _pixel_ratio: f32) {
        self.calls.set(self.calls.get() + 1);
    }
    fn render(&mut self, _frame: &SceneFrame<'_>) {
        self.calls.set(self.calls.get() + 1);
    }
}

fn calm_config() -> HanamiConfig {
    let mut config = HanamiConfig::default();
    config.seed = Some(2024);
    config.petals.gust_probability = 0.0;
    config
}

fn boot(
    config: &HanamiConfig,
    viewport: Viewport,
    reduced_motion: bool,
) -> Stage<RecordingCanvas, RecordingScene> {
    Stage::boot(
        config,
        BootEnvironment {
            viewport,
            reduced_motion,
            canvas: Some(RecordingCanvas::new()),
            scene: Some(RecordingScene::new()),
            now: 0.0,
            seed: 1,
        },
    )
}

#[test]
fn desktop_boot_sizes_both_pools_and_eases_wind() {
    let mut stage = boot(&calm_config(), Viewport::new(1024.0, 768.0), false);
    assert!(stage.report().petals.started());
    assert!(stage.report().particles.started());
    assert_eq!(stage.petals().unwrap().simulation().pool_size(), 30);
    assert_eq!(stage.field().unwrap().simulation().pool_size(), 100);

    stage
        .petals_mut()
        .unwrap()
        .simulation_mut()
        .wind_mut()
        .set_target(1.0);

    stage.frame(16.0);
    let wind = stage.petals().unwrap().simulation().wind().current();
    assert!((wind - 0.02).abs() < 1e-6);

    stage.frame(32.0);
    let wind = stage.petals().unwrap().simulation().wind().current();
    assert!((wind - 0.0396).abs() < 1e-6);

    let mut previous = wind;
    for n in 3..400 {
        stage.frame(n as f64 * 16.0);
        let wind = stage.petals().unwrap().simulation().wind().current();
        assert!(wind > previous && wind <= 1.0);
        previous = wind;
    }
}

#[test]
fn mobile_boot_uses_small_pools() {
    let stage = boot(&calm_config(), Viewport::new(375.0, 667.0), false);
    assert_eq!(stage.petals().unwrap().simulation().pool_size(), 15);
    assert_eq!(stage.field().unwrap().simulation().pool_size(), 50);
}

#[test]
fn reduced_motion_creates_nothing_and_draws_nothing() {
    let canvas = CountingCanvas::default();
    let scene = CountingScene::default();
    let canvas_calls = canvas.calls.clone();
    let scene_calls = scene.calls.clone();

    let mut stage = Stage::boot(
        &HanamiConfig::default(),
        BootEnvironment {
            viewport: Viewport::new(1920.0, 1080.0),
            reduced_motion: true,
            canvas: Some(canvas),
            scene: Some(scene),
            now: 0.0,
            seed: 9,
        },
    );

    assert_eq!(stage.report().petals, BootOutcome::Skipped(SkipReason::ReducedMotion));
    assert_eq!(stage.report().particles, BootOutcome::Skipped(SkipReason::ReducedMotion));
    assert!(stage.petals().is_none() && stage.field().is_none());

    for n in 1..120 {
        stage.push_event(HostEvent::Pointer(PointerEvent::mouse(n as f32 * 10.0, 200.0)));
        if n % 30 == 0 {
            stage.push_event(HostEvent::Resize(Viewport::new(375.0, 667.0)));
        }
        let report = stage.frame(n as f64 * 16.0);
        assert!(!report.petals && !report.particles);
    }
    stage.set_petal_count(40);
    stage.resume(5000.0);
    stage.frame(5016.0);

    assert!(!stage.is_running());
    assert_eq!(canvas_calls.get(), 0);
    assert_eq!(scene_calls.get(), 0);
}

#[test]
fn missing_surfaces_skip_only_their_subsystem() {
    let no_scene: Stage<RecordingCanvas, RecordingScene> = Stage::boot(
        &HanamiConfig::default(),
        BootEnvironment {
            viewport: Viewport::new(1024.0, 768.0),
            reduced_motion: false,
            canvas: Some(RecordingCanvas::new()),
            scene: None,
            now: 0.0,
            seed: 3,
        },
    );
    assert!(no_scene.report().petals.started());
    assert_eq!(
        no_scene.report().particles,
        BootOutcome::Skipped(SkipReason::MissingCapability)
    );

    let mut no_canvas: Stage<RecordingCanvas, RecordingScene> = Stage::boot(
        &HanamiConfig::default(),
        BootEnvironment {
            viewport: Viewport::new(1024.0, 768.0),
            reduced_motion: false,
            canvas: None,
            scene: Some(RecordingScene::new()),
            now: 0.0,
            seed: 3,
        },
    );
    assert_eq!(
        no_canvas.report().petals,
        BootOutcome::Skipped(SkipReason::MissingSurface)
    );
    let report = no_canvas.frame(16.0);
    assert!(!report.petals && report.particles);
    assert_eq!(no_canvas.field().unwrap().simulation().renderer().renders(), 1);
}

#[test]
fn hidden_page_skips_frames_and_resume_ignores_hidden_time() {
    let mut stage = boot(&calm_config(), Viewport::new(1024.0, 768.0), false);
    stage.frame(16.0);
    stage.frame(32.0);

    stage.push_event(HostEvent::Visibility {
        hidden: true,
        at: 40.0,
    });
    let report = stage.frame(48.0);
    assert!(!report.petals && !report.particles);
    assert_eq!(stage.petals().unwrap().simulation().canvas().frames(), 2);

    stage.push_event(HostEvent::Visibility {
        hidden: false,
        at: 60_000.0,
    });
    let report = stage.frame(60_016.0);
    assert!(report.petals && report.particles);

    let scheduler = stage.petals().unwrap().scheduler();
    assert!((scheduler.elapsed() - 0.048).abs() < 1e-9);
    let scheduler = stage.field().unwrap().scheduler();
    assert!((scheduler.elapsed() - 0.048).abs() < 1e-9);
}

#[test]
fn pause_then_resume_measures_from_resume_timestamp() {
    let mut stage = boot(&calm_config(), Viewport::new(1024.0, 768.0), false);
    stage.frame(16.0);
    stage.pause();
    stage.pause();
    stage.resume(10_000.0);
    stage.resume(20_000.0);
    stage.frame(10_010.0);
    let elapsed = stage.petals().unwrap().scheduler().elapsed();
    assert!((elapsed - 0.026).abs() < 1e-9);
}

#[test]
fn breakpoint_resize_rebuilds_petals_only() {
    let mut stage = boot(&calm_config(), Viewport::new(1920.0, 1080.0), false);
    stage.push_event(HostEvent::Resize(Viewport::new(1600.0, 900.0)));
    stage.frame(16.0);
    assert_eq!(stage.petals().unwrap().simulation().pool_size(), 30);

    stage.push_event(HostEvent::Resize(Viewport::new(375.0, 667.0)));
    stage.frame(32.0);
    assert_eq!(stage.petals().unwrap().simulation().pool_size(), 15);
    assert_eq!(stage.field().unwrap().simulation().pool_size(), 100);
    assert_eq!(stage.field().unwrap().simulation().renderer().size(), (375, 667));
    assert_eq!(stage.petals().unwrap().simulation().canvas().size(), (375.0, 667.0));
}

#[test]
fn pointer_events_reach_both_simulations() {
    let mut stage = boot(&calm_config(), Viewport::new(800.0, 600.0), false);
    stage.handle_event(HostEvent::Pointer(PointerEvent::mouse(400.0, 300.0)));
    stage.handle_event(HostEvent::Pointer(PointerEvent::mouse(800.0, 0.0)));

    let target = stage.petals().unwrap().simulation().wind().target();
    assert!((target - 4.0).abs() < 1e-5);

    stage.frame(16.0);
    let offset = stage.field().unwrap().simulation().camera().offset();
    assert!((offset.x - 0.05).abs() < 1e-6 && (offset.y - 0.05).abs() < 1e-6);
}

#[test]
fn unload_stops_for_good() {
    let mut stage = boot(&calm_config(), Viewport::new(1024.0, 768.0), false);
    stage.frame(16.0);
    stage.handle_event(HostEvent::Unload);
    assert!(!stage.is_running());

    stage.handle_event(HostEvent::Visibility {
        hidden: false,
        at: 100.0,
    });
    let report = stage.frame(116.0);
    assert!(!report.petals && !report.particles);
}

#[test]
fn outward_setters_apply_to_running_simulations() {
    let mut stage = boot(&calm_config(), Viewport::new(1024.0, 768.0), false);
    stage.set_petal_count(8);
    stage.set_particle_count(20);
    stage.set_wind_speed(1.25);

    let petals = stage.petals().unwrap().simulation();
    assert_eq!(petals.pool_size(), 8);
    assert_eq!(petals.wind().speed(), 1.25);
    assert_eq!(stage.field().unwrap().simulation().pool_size(), 20);

    stage.frame(16.0);
    assert_eq!(
        stage.field().unwrap().simulation().renderer().vertices().len(),
        20
    );
}
