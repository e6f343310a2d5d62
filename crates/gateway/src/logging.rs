// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Logging initialization for the FightClub gateway
//!
//! Log output always goes to a daily rolling file; console output is opt-in.
//!
//! # Configuration
//!
//! - `RUST_LOG`: filter directives (default: `info`), e.g.
//!   `RUST_LOG=fightclub_settlement=debug,actix_web=warn`
//! - `LOG_DIR`: root directory for log files (default: `{workspace_root}/logs`).
//!   Files land in `{LOG_DIR}/gateway/`.
//! - `LOG_TO_CONSOLE`: `true`, `1` or `yes` also writes colored output to stderr
//!
//! Files are named `gateway.{YYYY-MM-DD}.log` and rotate at UTC midnight.
//! Each line carries an RFC 3339 UTC timestamp, thread id, level, target and
//! message.

use std::{
	env,
	path::{Path, PathBuf},
	sync::OnceLock,
};

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::{
	non_blocking,
	rolling::{self, Rotation},
};
use tracing_subscriber::{
	EnvFilter, fmt, layer::SubscriberExt, registry::Registry, util::SubscriberInitExt,
};

use crate::config::{DEFAULT_LOG_LEVEL, DEFAULT_LOG_TO_CONSOLE, LOG_COMPONENT_NAME};

// Flushes buffered lines on exit
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

/// Walk up from `start` to the directory whose Cargo.toml declares `[workspace]`
fn find_workspace_root(start: &Path) -> Option<PathBuf> {
	start
		.ancestors()
		.find(|dir| {
			std::fs::read_to_string(dir.join("Cargo.toml"))
				.map(|content| content.contains("[workspace]"))
				.unwrap_or(false)
		})
		.map(Path::to_path_buf)
}

fn log_root() -> PathBuf {
	if let Ok(dir) = env::var("LOG_DIR") {
		return PathBuf::from(dir);
	}

	let start = env::var("CARGO_MANIFEST_DIR")
		.map(PathBuf::from)
		.or_else(|_| env::current_dir())
		.unwrap_or_else(|_| PathBuf::from("."));
	find_workspace_root(&start).unwrap_or(start).join("logs")
}

fn console_enabled(value: Option<&str>) -> bool {
	match value {
		Some(v) => matches!(v, "true" | "1" | "yes"),
		None => DEFAULT_LOG_TO_CONSOLE,
	}
}

fn file_writer(log_dir: &Path) -> Result<non_blocking::NonBlocking> {
	let appender = rolling::RollingFileAppender::builder()
		.rotation(Rotation::DAILY)
		.filename_prefix(LOG_COMPONENT_NAME)
		.filename_suffix("log")
		.build(log_dir)
		.with_context(|| {
			format!(
				"Failed to create rolling file appender in {}",
				log_dir.display()
			)
		})?;

	let (writer, guard) = non_blocking(appender);
	LOG_GUARD.set(guard).ok();
	Ok(writer)
}

/// Install the global subscriber
///
/// Fails if the log directory cannot be created or a subscriber is already
/// installed.
pub fn init_logging() -> Result<()> {
	dotenv::dotenv().ok();

	let log_level = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
	let log_dir = log_root().join(LOG_COMPONENT_NAME);
	std::fs::create_dir_all(&log_dir)
		.with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

	let writer = file_writer(&log_dir)?;
	let log_to_console = console_enabled(env::var("LOG_TO_CONSOLE").ok().as_deref());
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

	let file_layer = fmt::layer()
		.with_writer(writer)
		.with_timer(fmt::time::UtcTime::rfc_3339())
		.with_thread_ids(true)
		.with_target(true)
		.with_ansi(false);

	let console_layer = log_to_console.then(|| {
		fmt::layer()
			.with_writer(std::io::stderr)
			.with_timer(fmt::time::UtcTime::rfc_3339())
			.with_thread_ids(true)
			.with_target(true)
			.with_ansi(true)
	});

	Registry::default()
		.with(filter)
		.with(file_layer)
		.with(console_layer)
		.try_init()
		.context("Failed to install tracing subscriber")?;

	info!(target: "server", "Log level: {}", log_level);
	info!(target: "server", "Log directory: {}", log_dir.display());
	if log_to_console {
		info!(target: "server", "Console output: enabled");
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_console_flag_parsing() {
		assert!(console_enabled(Some("true")));
		assert!(console_enabled(Some("1")));
		assert!(console_enabled(Some("yes")));
		assert!(!console_enabled(Some("TRUE ")));
		assert!(!console_enabled(Some("no")));
		assert_eq!(console_enabled(None), DEFAULT_LOG_TO_CONSOLE);
	}

	#[test]
	fn test_workspace_root_is_found() {
		let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
		let root = find_workspace_root(&manifest).unwrap();
		assert!(manifest.starts_with(&root));
		assert_ne!(root, manifest);
	}
}
