#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

//! Configuration surface for nodes embedding the mast driver.

use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Color, Style},
    },
};

mod chain;
pub use chain::{L1Opts, L2Opts, RollupConfigLoadError, RollupOpts};

mod driver;
pub use driver::DriverOpts;

mod telemetry;
pub use telemetry::{TelemetryError, TelemetryOpts};

/// CLI options for a mast rollup node.
#[derive(Debug, Clone, Parser)]
#[command(author, version, styles = cli_styles(), about)]
pub struct Opts {
    /// A unique name for this node instance, used in metrics and logs
    #[clap(long, env = "MAST_INSTANCE_NAME", default_value = "mast")]
    pub instance_name: String,
    /// L1-related configuration options
    #[clap(flatten)]
    pub l1: L1Opts,
    /// L2-related configuration options
    #[clap(flatten)]
    pub l2: L2Opts,
    /// Rollup chain configuration options
    #[clap(flatten)]
    pub rollup: RollupOpts,
    /// Driver-related configuration options
    #[clap(flatten)]
    pub driver: DriverOpts,
    /// Telemetry-related configuration options
    #[clap(flatten)]
    pub telemetry: TelemetryOpts,
}

/// Styles for the CLI.
const fn cli_styles() -> Styles {
    Styles::styled()
        .usage(Style::new().bold().underline().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
        .header(Style::new().bold().underline().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .invalid(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red))))
        .error(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red))))
        .valid(Style::new().bold().underline().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}
