//! # Saorsa Pan/Zoom Replay
//!
//! Command-line harness for the pan/zoom core. Reads a recorded gesture
//! script (a JSON array of steps), feeds it through a
//! [`PanZoomController`](panzoom_core::PanZoomController) and reports the
//! transform after every step.
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `ReplayConfig` - Controller configuration resolved from file, flags and environment
//! - `script` - Script steps, the replay driver and per-step records

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod script;

use std::path::{Path, PathBuf};

use clap::Parser;
use panzoom_core::{PanZoomConfig, PanZoomError};
use thiserror::Error;

pub use script::{replay, ReplayRecord, ReplayStep, TracingDriver};

/// Errors raised while preparing or running a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The controller configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(#[from] PanZoomError),

    /// The gesture script is malformed.
    #[error("Invalid script: {0}")]
    Script(#[source] serde_json::Error),
}

/// Command-line arguments for panzoom-replay.
#[derive(Debug, Clone, Parser)]
#[command(name = "panzoom-replay")]
#[command(about = "Replay a recorded gesture script through the pan/zoom controller")]
#[command(version)]
pub struct CliArgs {
    /// Gesture script (JSON array of steps)
    pub script: PathBuf,

    /// Controller configuration file (JSON); flags below override it
    #[arg(long, env = "PANZOOM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Smallest scale gestures may reach
    #[arg(long, env = "PANZOOM_MIN_SCALE")]
    pub min_scale: Option<f64>,

    /// Largest scale gestures may reach
    #[arg(long, env = "PANZOOM_MAX_SCALE")]
    pub max_scale: Option<f64>,

    /// Scale of the initial view
    #[arg(long, env = "PANZOOM_INITIAL_ZOOM")]
    pub initial_zoom: Option<f64>,

    /// Canvas design width in pixels
    #[arg(long, env = "PANZOOM_CANVAS_WIDTH")]
    pub canvas_width: Option<f64>,

    /// Canvas design height in pixels
    #[arg(long, env = "PANZOOM_CANVAS_HEIGHT")]
    pub canvas_height: Option<f64>,

    /// Pretty-print each output record
    #[arg(long)]
    pub pretty: bool,
}

/// Resolved replay configuration.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Script to replay.
    pub script: PathBuf,
    /// Validated controller configuration.
    pub controller: PanZoomConfig,
    /// Pretty-print output records.
    pub pretty: bool,
}

impl ReplayConfig {
    /// Resolve the configuration: defaults, then the config file, then flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if the
    /// result fails validation.
    pub fn from_args(args: CliArgs) -> Result<Self, ReplayError> {
        let mut controller = match &args.config {
            Some(path) => PanZoomConfig::from_json(&read_file(path)?)?,
            None => PanZoomConfig::default(),
        };

        if let Some(v) = args.min_scale {
            controller.min_scale = v;
        }
        if let Some(v) = args.max_scale {
            controller.max_scale = v;
        }
        if let Some(v) = args.initial_zoom {
            controller.initial_zoom = v;
        }
        if let Some(v) = args.canvas_width {
            controller.canvas_width = v;
        }
        if let Some(v) = args.canvas_height {
            controller.canvas_height = v;
        }
        controller.validate()?;

        Ok(Self {
            script: args.script,
            controller,
            pretty: args.pretty,
        })
    }

    /// Read and parse the script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid script.
    pub fn load_script(&self) -> Result<Vec<ReplayStep>, ReplayError> {
        script::parse_script(&read_file(&self.script)?)
    }
}

fn read_file(path: &Path) -> Result<String, ReplayError> {
    std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })
}
