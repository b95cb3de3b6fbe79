//! Hanami CLI - headless driver for the Hanami animation layer

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, config, run};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hanami")]
#[command(about = "Headless runner for the falling-petal and particle-field animations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive both simulations headlessly and print a summary
    Run {
        /// Viewport width in CSS pixels
        #[arg(long, default_value = "1024")]
        width: f32,

        /// Viewport height in CSS pixels
        #[arg(long, default_value = "768")]
        height: f32,

        /// Device pixel ratio
        #[arg(long, default_value = "1.0")]
        dpr: f32,

        /// Number of frames to run
        #[arg(long, default_value = "600")]
        frames: u64,

        /// Simulated display refresh rate
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Path to a TOML configuration file
        #[arg(long)]
        config: Option<String>,

        /// Fixed RNG seed (overrides the configuration)
        #[arg(long)]
        seed: Option<u32>,

        /// Boot as if the user prefers reduced motion
        #[arg(long)]
        reduced_motion: bool,

        /// Boot without a 2D canvas
        #[arg(long)]
        no_canvas: bool,

        /// Boot without 3D rendering support
        #[arg(long)]
        no_webgl: bool,

        /// Sweep a synthetic mouse pointer across the viewport
        #[arg(long)]
        pointer_sweep: bool,

        /// Frame at which the page becomes hidden
        #[arg(long)]
        hide_at: Option<u64>,

        /// Frame at which the page becomes visible again
        #[arg(long)]
        show_at: Option<u64>,

        /// Pace frames in real time instead of synthetic timestamps
        #[arg(long)]
        realtime: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the default configuration as TOML
    Config,

    /// Validate a configuration file
    Check {
        /// Path to the TOML configuration file
        config: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            width,
            height,
            dpr,
            frames,
            fps,
            config,
            seed,
            reduced_motion,
            no_canvas,
            no_webgl,
            pointer_sweep,
            hide_at,
            show_at,
            realtime,
            format,
        } => run::run(run::RunArgs {
            width,
            height,
            dpr,
            frames,
            fps,
            config,
            seed,
            reduced_motion,
            no_canvas,
            no_webgl,
            pointer_sweep,
            hide_at,
            show_at,
            realtime,
            format,
        }),
        Commands::Config => config::run(),
        Commands::Check { config } => check::run(&config),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
