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

use std::{env, net::SocketAddr, time::Duration};

use anyhow::{Context, Result};
use fightclub_matching::MatchingConfig;

// Logging configuration constants
/// Default log level (can be overridden by RUST_LOG environment variable)
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log directory component name
pub const LOG_COMPONENT_NAME: &str = "gateway";

/// Default console output enabled (can be overridden by LOG_TO_CONSOLE environment variable)
pub const DEFAULT_LOG_TO_CONSOLE: bool = false;

// Server configuration constants
/// Default HTTP server bind address (can be overridden by GATEWAY_BIND_ADDR environment variable)
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Default maximum HTTP request body size in bytes (can be overridden by GATEWAY_MAX_BODY_BYTES)
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024;

// Oracle configuration constants
/// Default catalog fetch timeout in milliseconds (can be overridden by GATEWAY_ORACLE_TIMEOUT_MS)
pub const DEFAULT_ORACLE_TIMEOUT_MS: u64 = 5_000;

/// Default largest catalog document accepted, in bytes (can be overridden by GATEWAY_ORACLE_MAX_RESPONSE_BYTES)
pub const DEFAULT_ORACLE_MAX_RESPONSE_BYTES: usize = 64 * 1024;

/// Default capacity of the oracle callback queue (can be overridden by GATEWAY_CALLBACK_QUEUE_CAPACITY)
pub const DEFAULT_CALLBACK_QUEUE_CAPACITY: usize = 1_024;

#[derive(Debug, Clone)]
pub struct GatewayRuntimeConfig {
	pub bind_addr: SocketAddr,
	pub workers: usize,
	pub max_body_bytes: usize,
	pub oracle_timeout: Duration,
	pub oracle_max_response_bytes: usize,
	pub callback_queue_capacity: usize,
	/// Engine settings, read from `FIGHTCLUB_*` variables
	pub engine: MatchingConfig,
}

impl GatewayRuntimeConfig {
	pub fn from_env() -> Result<Self> {
		dotenv::dotenv().ok();

		let bind_addr_str =
			env::var("GATEWAY_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
		let bind_addr = bind_addr_str
			.parse()
			.with_context(|| format!("Invalid bind address: {}", bind_addr_str))?;

		let workers = env::var("GATEWAY_WORKERS")
			.ok()
			.and_then(|w| w.parse().ok())
			.unwrap_or_else(num_cpus::get);

		let max_body_bytes = env_or("GATEWAY_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES);

		let oracle_timeout = Duration::from_millis(env_or(
			"GATEWAY_ORACLE_TIMEOUT_MS",
			DEFAULT_ORACLE_TIMEOUT_MS,
		));

		let oracle_max_response_bytes = env_or(
			"GATEWAY_ORACLE_MAX_RESPONSE_BYTES",
			DEFAULT_ORACLE_MAX_RESPONSE_BYTES,
		);

		let callback_queue_capacity = env_or(
			"GATEWAY_CALLBACK_QUEUE_CAPACITY",
			DEFAULT_CALLBACK_QUEUE_CAPACITY,
		)
		.max(1);

		let engine = MatchingConfig::from_env().context("Invalid FIGHTCLUB_* configuration")?;

		Ok(Self {
			bind_addr,
			workers,
			max_body_bytes,
			oracle_timeout,
			oracle_max_response_bytes,
			callback_queue_capacity,
			engine,
		})
	}
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
	env::var(key)
		.ok()
		.and_then(|v| v.parse().ok())
		.unwrap_or(default)
}
