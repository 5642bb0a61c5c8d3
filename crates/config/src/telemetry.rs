use std::{fs::OpenOptions, net::SocketAddr, path::PathBuf, sync::Arc};

use clap::Parser;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use thiserror::Error;
use tracing::{Level, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::{Targets, filter_fn},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Telemetry-related configuration options
#[derive(Debug, Clone, Parser)]
pub struct TelemetryOpts {
    /// Whether to use ANSI colors in the logs. Disable if you're piping logs
    /// to a file or a log collection service.
    #[clap(long = "telemetry.use-ansi", env = "MAST_TELEMETRY_USE_ANSI", default_value_t = true)]
    pub use_ansi: bool,
    /// The port to listen for Prometheus metrics. Default is `9090`.
    #[clap(long = "metrics.port", env = "MAST_METRICS_PORT", default_value_t = 9090)]
    pub metrics_port: u16,
    /// Disable metrics collection. Default is `false`.
    #[clap(long = "metrics.disable", env = "MAST_DISABLE_METRICS", default_value_t = false)]
    pub disable_metrics: bool,
    /// Path of a file receiving rollup state snapshots as JSON lines.
    /// Snapshot logging is disabled when unset.
    #[clap(long = "telemetry.snapshot-log", env = "MAST_SNAPSHOT_LOG")]
    pub snapshot_log: Option<PathBuf>,
}

/// An error that occurs while setting up the telemetry stack.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The snapshot log file could not be opened.
    #[error("failed to open snapshot log file: {0}")]
    SnapshotLog(#[from] std::io::Error),
    /// The Prometheus exporter could not be installed.
    #[error(transparent)]
    Metrics(#[from] BuildError),
}

impl TelemetryOpts {
    /// Setup the telemetry stack for the node.
    ///
    /// 1. Human-readable tracing to stdout, filtered by `RUST_LOG`
    /// 2. Optionally, rollup state snapshots as JSON lines to a file
    /// 3. Metrics collection with Prometheus (if enabled)
    pub fn setup(&self, instance_name: &str) -> Result<(), TelemetryError> {
        // Snapshot events have their own sink and stay out of stdout.
        let stdout = tracing_subscriber::fmt::layer()
            .with_ansi(self.use_ansi)
            .with_filter(filter_fn(|meta| meta.target() != "snapshot"))
            .with_filter(EnvFilter::from_default_env());

        let registry = tracing_subscriber::registry().with(stdout);

        if let Some(path) = &self.snapshot_log {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let snapshot = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .with_filter(Targets::new().with_target("snapshot", Level::INFO));
            registry.with(snapshot).init();
        } else {
            registry.init();
        }

        if !self.disable_metrics {
            let prometheus_address = SocketAddr::from(([0, 0, 0, 0], self.metrics_port));

            PrometheusBuilder::new()
                .with_http_listener(prometheus_address)
                .add_global_label("instance", instance_name)
                .install()?;

            info!("Metrics enabled on {prometheus_address}");
        }

        Ok(())
    }
}
