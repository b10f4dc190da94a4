//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout only carries the table report.

use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;

/// Error returned when a global subscriber is already installed.
pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Filter directives for a `-v` count. Dependencies stay at warn until -vv.
pub fn default_directives(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,dynoprune=info",
        1 => "warn,dynoprune=debug",
        _ => "debug,dynoprune=trace",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the `-v` level.
pub fn init_logging(verbose: u8, format: LogFormat) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.with_target(false).try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
}
