//! # Saorsa Pan/Zoom Replay
//!
//! Replays a gesture script and prints one JSON record per step to stdout.
//! Logs go to stderr.

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use panzoom_replay::{replay, CliArgs, ReplayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with optional JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,panzoom_core=debug,panzoom_replay=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // Use JSON format in production (RUST_LOG_FORMAT=json)
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ReplayConfig::from_args(CliArgs::parse())?;
    tracing::info!(
        script = %config.script.display(),
        min_scale = config.controller.min_scale,
        max_scale = config.controller.max_scale,
        initial_zoom = config.controller.initial_zoom,
        "Starting replay"
    );

    let steps = config.load_script()?;
    let records = replay(config.controller.clone(), &steps)?;

    let mut out = std::io::stdout().lock();
    for record in &records {
        let line = if config.pretty {
            serde_json::to_string_pretty(record)
        } else {
            serde_json::to_string(record)
        }
        .context("failed to serialize record")?;
        writeln!(out, "{line}")?;
    }

    let committed = records.iter().filter(|r| r.committed).count();
    tracing::info!(steps = records.len(), committed, "Replay finished");
    Ok(())
}
