//! TiltView - shows the frame matching the device's tilt
//!
//! Usage:
//!
//! ```text
//! tiltview [--config <path>] [--source iio|simulated] [--interval-ms N] [--assets DIR]
//! ```
//!
//! A missing config file falls back to defaults (simulated source,
//! placeholder frames). Command line flags override the file.

use clap::Parser;
use std::path::Path;
use std::sync::atomic::Ordering;
use tiltview::config::{AppConfig, SourceKind};
use tiltview::display::ConsolePresenter;
use tiltview::error::{Error, Result};
use tiltview::{TiltApp, create_source};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "tiltview.toml")]
    config: String,

    /// Motion source (overrides [sensor] source)
    #[arg(short, long, value_enum)]
    source: Option<SourceKind>,

    /// Sampling interval in milliseconds (overrides [sensor] interval_ms)
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Directory holding frame_00 .. frame_71 (overrides [assets] directory)
    #[arg(short, long)]
    assets: Option<String>,
}

/// Load the config file, or defaults if it does not exist
fn load_config(path: &str) -> Result<(AppConfig, bool)> {
    if Path::new(path).exists() {
        Ok((AppConfig::from_file(path)?, true))
    } else {
        Ok((AppConfig::default(), false))
    }
}

/// Apply command line overrides on top of the loaded config
fn apply_overrides(mut config: AppConfig, args: &Args) -> Result<AppConfig> {
    if let Some(source) = args.source {
        config.sensor.source = source;
    }
    if let Some(interval_ms) = args.interval_ms {
        if interval_ms == 0 {
            return Err(Error::InvalidParameter(
                "interval-ms must be greater than zero".to_string(),
            ));
        }
        config.sensor.interval_ms = interval_ms;
    }
    if let Some(dir) = &args.assets {
        config.assets.directory = Some(dir.clone());
    }
    Ok(config)
}

/// Log filter for startup; "info" when the config could not be loaded
fn startup_level(loaded: &Result<(AppConfig, bool)>) -> &str {
    match loaded {
        Ok((config, _)) => config.logging.level.as_str(),
        Err(_) => "info",
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = load_config(&args.config).and_then(|(config, from_file)| {
        apply_overrides(config, &args).map(|config| (config, from_file))
    });

    // Initialize logger before anything can fail, so startup errors are logged
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(startup_level(&loaded)),
    )
    .init();

    log::info!("TiltView v{} starting...", env!("CARGO_PKG_VERSION"));

    let (config, from_file) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Startup failed ({}): {}", args.config, e);
            return Err(e);
        }
    };
    if from_file {
        log::info!("Using config: {}", args.config);
    } else {
        log::info!("Config {} not found, using defaults", args.config);
    }
    log::info!(
        "Source: {:?}, interval {} ms",
        config.sensor.source,
        config.sensor.interval_ms
    );

    let source = create_source(&config.sensor)?;
    let mut app = TiltApp::new(config, source, ConsolePresenter::stdout())?;

    // Set up shutdown signal handler
    let shutdown = app.shutdown_flag();
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        shutdown.store(true, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    app.run()?;

    log::info!("TiltView shutdown complete");
    Ok(())
}
