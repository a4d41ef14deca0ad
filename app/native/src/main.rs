#![allow(clippy::multiple_crate_versions)]

//! Widgetbox command-line entry point.

use tracing_subscriber::EnvFilter;
use widgetbox_lib::constants::{APP_NAME, LOG_ENV_VAR};

fn main() {
    init_tracing();

    if let Err(err) = widgetbox_lib::cli::run() {
        eprintln!("{APP_NAME}: {err}");
        std::process::exit(1);
    }
}

/// Installs a stderr subscriber filtered by `WIDGETBOX_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
