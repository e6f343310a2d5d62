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

use serde::{Deserialize, Serialize};

use crate::journal::DEFAULT_SETTLED_RETENTION;
use crate::oracle::{MINIMUM_RESPONSE_GAS, OracleId};
use crate::player::StoreKeys;

/// Catalog the purchase flow fetches item prices from unless overridden
pub const DEFAULT_CATALOG_URL: &str = "https://git.frostfs.info/Web3N3/among-us/data.json";

/// Store key holding the serialized roster
pub const DEFAULT_ROSTER_KEY: &str = "playersList";

/// Store key holding the catalog URL
pub const DEFAULT_CATALOG_URL_KEY: &str = "storeURL";

/// Identity the trusted oracle asserts on callback
pub const DEFAULT_ORACLE_ID: &str = "oracle";

/// Settlement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
	/// Catalog URL written to the store on first bootstrap
	pub catalog_url: String,
	/// Store key for the roster
	pub roster_key: String,
	/// Store key for the catalog URL
	pub catalog_url_key: String,
	/// Only callbacks asserting this identity are accepted
	pub oracle_id: String,
	/// Fee budget attached to every catalog fetch
	pub purchase_gas_budget: u64,
	/// Fail replayed or unknown purchase callbacks instead of applying them
	pub reject_replayed_callbacks: bool,
	/// Settled purchases kept in the journal for status lookups
	pub settled_purchase_retention: usize,
}

impl Default for SettlementConfig {
	fn default() -> Self {
		Self {
			catalog_url: DEFAULT_CATALOG_URL.to_string(),
			roster_key: DEFAULT_ROSTER_KEY.to_string(),
			catalog_url_key: DEFAULT_CATALOG_URL_KEY.to_string(),
			oracle_id: DEFAULT_ORACLE_ID.to_string(),
			purchase_gas_budget: 2 * MINIMUM_RESPONSE_GAS,
			reject_replayed_callbacks: false,
			settled_purchase_retention: DEFAULT_SETTLED_RETENTION,
		}
	}
}

impl SettlementConfig {
	/// Load configuration from `SETTLEMENT_`-prefixed environment variables
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

	pub fn store_keys(&self) -> StoreKeys {
		StoreKeys {
			roster: self.roster_key.clone(),
			catalog_url: self.catalog_url_key.clone(),
		}
	}

	pub fn trusted_oracle(&self) -> OracleId {
		OracleId::new(self.oracle_id.clone())
	}
}

fn environment() -> config::Environment {
	config::Environment::with_prefix("SETTLEMENT").prefix_separator("_")
}
