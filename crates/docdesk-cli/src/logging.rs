//! Logging setup
//!
//! stdout carries the message channel in `serve` mode, so log lines go to
//! stderr or to the configured log file, never stdout.

use std::fs::OpenOptions;

use docdesk_core::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Initialise the global subscriber; `RUST_LOG` overrides the configured level
pub fn init(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    let Some(log_path) = config.log_file.as_ref() else {
        let _ = builder.with_writer(std::io::stderr).try_init();
        return;
    };

    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(log_file) => {
            let _ = builder.with_ansi(false).with_writer(log_file).try_init();
            debug!("Logging to {:?}", log_path);
        }
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
}

fn default_directives(level: &str) -> String {
    format!("docdesk_core={},docdesk_cli={}", level, level)
}
