//! Cat eyes: cartoon pupils that follow your face through the webcam.

use anyhow::{Context, Result};
use cat_eyes::{app::CatEyesApp, config::Config};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use (overrides the config file)
    #[arg(long)]
    cam: Option<i32>,

    /// Haar cascade XML for face detection (overrides the config file)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_level));

    info!("Cat Eyes - face tracking");

    // Load configuration if provided
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            match Config::from_file(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    warn!("Failed to load config file: {}. Using defaults.", e);
                    Config::default()
                }
            }
        }
        None => Config::default(),
    };

    if let Some(cam) = args.cam {
        config.camera.device_index = cam;
    }
    if let Some(model) = args.model {
        config.detector.model_path = model;
    }

    if args.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Create and run application
    let app = CatEyesApp::new(&config).context("Startup failed")?;
    app.run()?;

    Ok(())
}
