//! Run command - drives a headless stage over recording surfaces

use anyhow::{bail, Context, Result};
use hanami_core::{HanamiConfig, Viewport};
use hanami_particles::{
    BootEnvironment, BootOutcome, DrawCommand, RecordingCanvas, RecordingScene, Stage,
};
use hanami_runtime::{HostEvent, PointerEvent, Simulation};
use instant::Instant;
use serde::Serialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub struct RunArgs {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
    pub frames: u64,
    pub fps: f64,
    pub config: Option<String>,
    pub seed: Option<u32>,
    pub reduced_motion: bool,
    pub no_canvas: bool,
    pub no_webgl: bool,
    pub pointer_sweep: bool,
    pub hide_at: Option<u64>,
    pub show_at: Option<u64>,
    pub realtime: bool,
    pub format: String,
}

#[derive(Serialize)]
struct RunSummary {
    viewport: [f32; 2],
    frames: u64,
    petals: SubsystemSummary<PetalSummary>,
    particles: SubsystemSummary<FieldSummary>,
    wall_time_ms: f64,
}

#[derive(Serialize)]
struct SubsystemSummary<T> {
    boot: String,
    frames_run: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<T>,
}

#[derive(Serialize)]
struct PetalSummary {
    count: usize,
    wind: f32,
    wind_target: f32,
    fills_last_frame: usize,
    total_fills: usize,
}

#[derive(Serialize)]
struct FieldSummary {
    count: usize,
    renders: usize,
    rotation: f32,
    camera: [f32; 3],
    max_extent: [f32; 3],
}

pub fn run(args: RunArgs) -> Result<()> {
    if args.fps <= 0.0 {
        bail!("--fps must be positive, got {}", args.fps);
    }
    if args.format != "text" && args.format != "json" {
        bail!("Unknown format '{}', expected text or json", args.format);
    }

    let mut config = match &args.config {
        Some(path) => HanamiConfig::load(path)
            .with_context(|| format!("Failed to load configuration: {path}"))?,
        None => HanamiConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let viewport = Viewport::new(args.width, args.height).with_pixel_ratio(args.dpr);
    let started = Instant::now();

    let mut stage: Stage<RecordingCanvas, RecordingScene> = Stage::boot(
        &config,
        BootEnvironment {
            viewport,
            reduced_motion: args.reduced_motion,
            canvas: (!args.no_canvas).then(RecordingCanvas::new),
            scene: (!args.no_webgl).then(RecordingScene::new),
            now: 0.0,
            seed: host_seed(),
        },
    );

    let frame_ms = 1000.0 / args.fps;
    let mut petal_frames = 0;
    let mut field_frames = 0;

    for n in 1..=args.frames {
        let now = if args.realtime {
            started.elapsed().as_secs_f64() * 1000.0
        } else {
            n as f64 * frame_ms
        };

        if args.hide_at == Some(n) {
            stage.push_event(HostEvent::Visibility { hidden: true, at: now });
        }
        if args.show_at == Some(n) {
            stage.push_event(HostEvent::Visibility { hidden: false, at: now });
        }
        if args.pointer_sweep {
            let x = ((n as f32 * 0.05).sin() * 0.5 + 0.5) * viewport.width;
            stage.push_event(HostEvent::Pointer(PointerEvent::mouse(x, viewport.height / 2.0)));
        }

        let report = stage.frame(now);
        petal_frames += report.petals as u64;
        field_frames += report.particles as u64;

        if args.realtime {
            std::thread::sleep(Duration::from_secs_f64(frame_ms / 1000.0));
        }
    }

    tracing::debug!(petal_frames, field_frames, "frame loop finished");
    let summary = summarize(&stage, &args, petal_frames, field_frames, started);
    stage.handle_event(HostEvent::Unload);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_text(&summary);
    }
    Ok(())
}

fn summarize(
    stage: &Stage<RecordingCanvas, RecordingScene>,
    args: &RunArgs,
    petal_frames: u64,
    field_frames: u64,
    started: Instant,
) -> RunSummary {
    let report = stage.report();

    let petals = stage.petals().map(|animator| {
        let sim = animator.simulation();
        PetalSummary {
            count: sim.pool_size(),
            wind: sim.wind().current(),
            wind_target: sim.wind().target(),
            fills_last_frame: sim
                .canvas()
                .commands()
                .iter()
                .filter(|c| matches!(c, DrawCommand::Fill))
                .count(),
            total_fills: sim.canvas().total_fills(),
        }
    });

    let particles = stage.field().map(|animator| {
        let sim = animator.simulation();
        let mut max_extent = [0.0f32; 3];
        for p in sim.particles() {
            for (extent, value) in max_extent.iter_mut().zip(p.position.to_array()) {
                *extent = extent.max(value.abs());
            }
        }
        FieldSummary {
            count: sim.pool_size(),
            renders: sim.renderer().renders(),
            rotation: sim.rotation(),
            camera: sim.camera().position().to_array(),
            max_extent,
        }
    });

    RunSummary {
        viewport: [args.width, args.height],
        frames: args.frames,
        petals: SubsystemSummary {
            boot: describe(report.petals),
            frames_run: petal_frames,
            state: petals,
        },
        particles: SubsystemSummary {
            boot: describe(report.particles),
            frames_run: field_frames,
            state: particles,
        },
        wall_time_ms: started.elapsed().as_secs_f64() * 1000.0,
    }
}

fn describe(outcome: BootOutcome) -> String {
    match outcome {
        BootOutcome::Started => "started".to_string(),
        BootOutcome::Skipped(reason) => format!("skipped ({reason:?})"),
    }
}

fn print_text(summary: &RunSummary) {
    println!(
        "Ran {} frame(s) at {}x{} in {:.1} ms",
        summary.frames, summary.viewport[0], summary.viewport[1], summary.wall_time_ms
    );

    println!();
    println!("Petals: {}", summary.petals.boot);
    if let Some(state) = &summary.petals.state {
        println!("  Frames run:   {}", summary.petals.frames_run);
        println!("  Pool size:    {}", state.count);
        println!("  Wind:         {:.4} (target {:.4})", state.wind, state.wind_target);
        println!("  Fills (last): {}", state.fills_last_frame);
        println!("  Fills (all):  {}", state.total_fills);
    }

    println!();
    println!("Particles: {}", summary.particles.boot);
    if let Some(state) = &summary.particles.state {
        println!("  Frames run:   {}", summary.particles.frames_run);
        println!("  Buffer size:  {}", state.count);
        println!("  Renders:      {}", state.renders);
        println!("  Rotation:     {:.4} rad", state.rotation);
        println!(
            "  Camera:       ({:.2}, {:.2}, {:.2})",
            state.camera[0], state.camera[1], state.camera[2]
        );
        println!(
            "  Max extent:   ({:.1}, {:.1}, {:.1})",
            state.max_extent[0], state.max_extent[1], state.max_extent[2]
        );
    }
}

/// Seed from the wall clock when the configuration does not pin one
fn host_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(0x5EED)
}
