//! camview — camera viewer.
//!
//! ```text
//! camview cpu   libcamerasrc → videoconvert/videoscale → appsink → window
//! camview gpu   libcamerasrc → glupload → glcolorconvert → glcolorscale → glimagesink
//! ```
//!
//! Press `q` or `Esc` in the terminal to quit. `RUST_LOG=debug` for more
//! detail, `GST_DEBUG=3` for GStreamer's own logging.

use std::process::ExitCode;

use anyhow::{Context, Result};
use camview_core::{AcceleratedStrategy, Mode, RunOutcome, Viewer, ViewerConfig};
use camview_gst::{GstBackend, GstRuntime};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod keys;

use cli::Cli;
use keys::TerminalKeys;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return ExitCode::from(cli::report_parse_error(&err)),
    };

    // stdout carries the FPS line; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(outcome) => {
            info!("camview exited cleanly ({:?})", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(cli::FAILURE_STATUS)
        }
    }
}

fn run(cli: &Cli) -> Result<RunOutcome> {
    let mode: Mode = cli.mode.parse()?;

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    if cli.spawn {
        if mode == Mode::Accelerated {
            config.accelerated_strategy = AcceleratedStrategy::Spawn;
        } else {
            warn!("--spawn only applies to gpu mode; ignoring");
        }
    }

    let viewer = Viewer::new(mode, config)?;
    info!("camview v{} ({})", env!("CARGO_PKG_VERSION"), viewer.mode().label());

    // Declared first so GStreamer is torn down after every pipeline.
    let _runtime = GstRuntime::init()?;
    let mut backend = GstBackend::new(TerminalKeys::new()?);

    let outcome = viewer.run(&mut backend, std::io::stdout().lock())?;
    Ok(outcome)
}
