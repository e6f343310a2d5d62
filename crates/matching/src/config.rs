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

use fightclub_settlement::SettlementConfig;
use serde::{Deserialize, Serialize};

/// Matching engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
	/// Seed for a reproducible battle RNG; entropy-seeded when unset
	pub rng_seed: Option<u64>,
	/// Log per-battle details at debug level
	pub verbose_logging: bool,
	/// Leave roster entries without a live record out of matchmaking
	///
	/// Off by default: a stale pick then fails with `OpponentNotFound`.
	pub skip_stale_roster_entries: bool,
	/// Store keys, catalog and oracle settings
	pub settlement: SettlementConfig,
}

impl MatchingConfig {
	/// Load configuration from environment variables
	///
	/// Top-level keys follow the prefix with a single underscore, nested
	/// settlement keys use a double underscore, e.g.
	/// `FIGHTCLUB_SKIP_STALE_ROSTER_ENTRIES` and
	/// `FIGHTCLUB_SETTLEMENT__CATALOG_URL`.
	pub fn from_env() -> Result<Self, config::ConfigError> {
		Self::load(None, environment())
	}

	/// Load configuration from file, overridden by environment variables
	pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
		Self::load(Some(path), environment())
	}

	fn load(
		path: Option<&str>,
		env: config::Environment,
	) -> Result<Self, config::ConfigError> {
		let mut builder = config::Config::builder();
		if let Some(path) = path {
			builder = builder.add_source(config::File::with_name(path));
		}
		let cfg = builder.add_source(env).build()?;

		cfg.try_deserialize()
	}
}

fn environment() -> config::Environment {
	config::Environment::with_prefix("FIGHTCLUB")
		.prefix_separator("_")
		.separator("__")
}
