use std::error::Error;
use std::fs::File;
use std::io;

use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::layer;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, registry};

pub const LOG_FILE: &str = "stakepool-registry-cli.log";

/// Installs the global subscriber: pretty stderr output filtered by `RUST_LOG`, plus bunyan
/// JSON records in [`LOG_FILE`].
pub fn setup_logger() -> Result<(), Box<dyn Error>> {
    LogTracer::init()?;

    // stdout carries lookup results
    let stderr_layer = layer()
        .pretty()
        .with_writer(io::stderr)
        .with_filter(EnvFilter::from_default_env());

    let file = File::create(LOG_FILE)?;
    let formatting_layer = BunyanFormattingLayer::new("stakepool-registry-cli".into(), file);

    set_global_default(
        registry()
            .with(stderr_layer)
            .with(formatting_layer)
            .with(JsonStorageLayer),
    )?;
    Ok(())
}
