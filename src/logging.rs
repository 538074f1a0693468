//! Diagnostic logging setup.
//!
//! While the terminal UI is running it owns stdout and stderr, so logs go to a
//! file in the data directory. Headless runs log to stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "BRAINLINK_LOG";
const DEFAULT_DIRECTIVE: &str = "brainlink=info";

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
	File(PathBuf),
	Stderr,
}

fn env_filter() -> EnvFilter {
	EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Fails if the log file cannot be opened or a
/// subscriber is already installed.
pub fn initialize(target: LogTarget) -> Result<()> {
	let builder = tracing_subscriber::fmt()
		.with_env_filter(env_filter())
		.with_target(false)
		.with_ansi(false);

	match target {
		LogTarget::File(path) => {
			if let Some(parent) = path.parent() {
				fs::create_dir_all(parent)
					.with_context(|| format!("failed to create log directory {}", parent.display()))?;
			}
			let file = OpenOptions::new()
				.create(true)
				.append(true)
				.open(&path)
				.with_context(|| format!("failed to open log file {}", path.display()))?;
			builder
				.with_writer(Mutex::new(file))
				.try_init()
				.map_err(|err| anyhow::anyhow!(err))?;
		}
		LogTarget::Stderr => {
			builder
				.with_writer(std::io::stderr)
				.try_init()
				.map_err(|err| anyhow::anyhow!(err))?;
		}
	}
	Ok(())
}
