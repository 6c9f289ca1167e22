// src/main.rs - Demo driver: smooth a set of waypoints and print the trajectory
use clap::Parser;
use smoothpath_rs::config::{self, Config};
use smoothpath_rs::output::{self, OutputFormat};
use smoothpath_rs::{Path, TrajectoryPipeline};

const SAMPLE_WAYPOINTS: [[f64; 2]; 5] = [[1.0, 2.0], [2.0, 7.0], [4.0, 7.0], [6.0, 9.0], [10.0, 11.0]];

#[derive(Parser, Debug)]
#[command(name = "smoothpath", version, about = "Turn sparse waypoints into a smooth controller trajectory")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Total time allowed for the path, in seconds
    #[arg(long)]
    total_time: Option<f64>,

    /// Controller period, in seconds
    #[arg(long)]
    time_step: Option<f64>,

    /// Drop waypoints that do not change direction before planning
    #[arg(long)]
    reduce: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            config::load_config(path).map_err(|e| {
                tracing::error!("Failed to load config from '{}': {}", path, e);
                Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
            })?
        }
        None => Config::default(),
    };
    if let Some(total_time) = args.total_time {
        config.planner.total_time = total_time;
    }
    if let Some(time_step) = args.time_step {
        config.planner.time_step = time_step;
    }
    if args.reduce {
        config.planner.reduce_waypoints = true;
    }
    config.validate()?;

    let waypoints = match &config.waypoints {
        Some(points) => points.to_path()?,
        None => {
            tracing::info!("No waypoints configured, using the built-in sample");
            Path::from_rows(&SAMPLE_WAYPOINTS, 2)?
        }
    };

    tracing::info!(
        "Smoothing {} waypoints ({}D) over {}s at {}s per tick",
        waypoints.len(),
        waypoints.dimension(),
        config.planner.total_time,
        config.planner.time_step
    );

    let pipeline = TrajectoryPipeline::new(config.pipeline_config())?;
    let trajectory = match pipeline.run(&waypoints, config.planner.total_time, config.planner.time_step) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Trajectory generation failed: {}", e);
            return Err(Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>);
        }
    };

    tracing::info!(
        "Generated {} points with injections {:?}",
        trajectory.point_count(),
        trajectory.plan.stages
    );
    println!("{}", output::render(&trajectory, args.format)?);

    Ok(())
}
