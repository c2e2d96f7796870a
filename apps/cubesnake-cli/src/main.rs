mod session;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use cubesnake_common::Coordinate;
use cubesnake_input::parse_script;
use cubesnake_kernel::{GameConfig, GameEvent};
use cubesnake_render::DebugTextRenderer;
use cubesnake_tools::GameInspector;
use tracing_subscriber::EnvFilter;

use session::Session;

#[derive(Parser)]
#[command(name = "cubesnake", about = "Snake on a ring of grid faces")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Level file: YAML, or JSON for a .json extension
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override cells per face side
    #[arg(long, global = true)]
    grid_size: Option<i32>,

    /// Override the number of faces in the ring
    #[arg(long, global = true)]
    faces: Option<usize>,

    /// Override the target placement seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the effective configuration as YAML
    Config,
    /// Play a scripted game headlessly
    Play {
        /// Frame script: u d l r turn, s start, p pause, c resume, . idle
        #[arg(short, long, default_value = "s")]
        script: String,
        /// Frames simulated after each script symbol
        #[arg(short, long, default_value = "4")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.0625")]
        dt: f32,
        /// Frames to keep running once the script is done
        #[arg(long, default_value = "0")]
        tail: u32,
        /// Print every game event as a JSON line
        #[arg(long)]
        events: bool,
        /// Draw the board after every script symbol
        #[arg(long)]
        board: bool,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(size) = cli.grid_size {
        config.grid_size = size;
        let fits = |v: i32| (0..size).contains(&v);
        if !(fits(config.start.x) && fits(config.start.y)) {
            config.start = Coordinate::new(size / 2, size / 2);
        }
    }
    if let Some(faces) = cli.faces {
        config.face_count = faces;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn report(events: &[GameEvent], as_json: bool) -> anyhow::Result<()> {
    for event in events {
        if as_json {
            println!("{}", serde_json::to_string(event)?);
        }
        if let GameEvent::GameOver { reason } = event {
            println!("{reason}");
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Info => {
            println!("cubesnake v{}", env!("CARGO_PKG_VERSION"));
            println!("grid: {}", cubesnake_grid::crate_info());
            println!("kernel: {}", cubesnake_kernel::crate_info());
            println!("render: {}", cubesnake_render::crate_info());
            println!("tools: {}", cubesnake_tools::crate_info());
            println!(
                "board: {} faces of {}x{} ({} cells)",
                config.face_count,
                config.grid_size,
                config.grid_size,
                config.face_count * (config.grid_size as usize).pow(2)
            );
        }
        Commands::Config => {
            print!("{}", config.to_yaml_string()?);
        }
        Commands::Play {
            script,
            frames,
            dt,
            tail,
            events,
            board,
        } => {
            if frames == 0 {
                bail!("--frames must be at least 1");
            }
            if !(dt.is_finite() && dt > 0.0) {
                bail!("--dt must be a positive number of seconds, got {dt}");
            }
            let actions = parse_script(&script)?;
            let renderer = DebugTextRenderer::new();
            let mut session = Session::new(config)?;
            tracing::info!(symbols = actions.len(), frames, dt, "playing script");

            for action in actions {
                session.apply(action);
                for _ in 0..frames {
                    report(&session.frame(dt)?, events)?;
                }
                if board {
                    print!("{}", session.render(&renderer));
                }
            }
            for _ in 0..tail {
                report(&session.frame(dt)?, events)?;
            }

            tracing::debug!(objects = session.scene().object_count(), "scene at exit");
            print!("{}", session.render(&renderer));
            println!("{}", GameInspector::summary(session.game()));
        }
    }

    Ok(())
}
