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

use fightclub_sdk::types::Player;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::info;

use crate::config::{DEFAULT_CATALOG_URL_KEY, DEFAULT_ROSTER_KEY};
use crate::store::{Store, StoreError};

/// Error types for player record operations
#[derive(Debug, Error)]
pub enum PlayerError {
	#[error("Player already exists: {0}")]
	AlreadyExists(String),
	#[error("Player not found: {0}")]
	NotFound(String),
	#[error("Invalid player name: {0:?}")]
	InvalidName(String),
	#[error("Not enough points: requested {requested}, available {available}")]
	InsufficientPoints { requested: u64, available: u32 },
	#[error("Catalog URL is not configured")]
	CatalogUnset,
	#[error("Store error: {0}")]
	Store(#[from] StoreError),
}

/// Sentinel keys that live next to player records in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKeys {
	pub roster: String,
	pub catalog_url: String,
}

impl Default for StoreKeys {
	fn default() -> Self {
		Self {
			roster: DEFAULT_ROSTER_KEY.to_string(),
			catalog_url: DEFAULT_CATALOG_URL_KEY.to_string(),
		}
	}
}

/// Player records and the matchmaking roster
///
/// The roster is an append log of names, not a set. Names are never pruned
/// when a record is deleted, so readers must treat a roster entry without a
/// live record as stale.
pub struct PlayerStore {
	store: Box<dyn Store>,
	keys: StoreKeys,
}

impl PlayerStore {
	pub fn new(store: Box<dyn Store>, keys: StoreKeys) -> Self {
		Self { store, keys }
	}

	/// Write the catalog URL unless one is already stored
	///
	/// Returns `true` when the URL was written.
	pub fn bootstrap(&mut self, catalog_url: &str) -> Result<bool, PlayerError> {
		if self.store.get(&self.keys.catalog_url)?.is_some() {
			return Ok(false);
		}
		self.set_catalog_url(catalog_url)?;
		info!("Catalog URL initialized: {}", catalog_url);
		Ok(true)
	}

	pub fn catalog_url(&self) -> Result<String, PlayerError> {
		self.read(&self.keys.catalog_url)?
			.ok_or(PlayerError::CatalogUnset)
	}

	pub fn set_catalog_url(&mut self, url: &str) -> Result<(), PlayerError> {
		self.write(&self.keys.catalog_url.clone(), &url.to_string())
	}

	/// Register a player with default attributes and add it to the roster
	pub fn create(&mut self, name: &str) -> Result<Player, PlayerError> {
		if name.is_empty() || name == self.keys.roster || name == self.keys.catalog_url {
			return Err(PlayerError::InvalidName(name.to_string()));
		}
		if self.store.get(name)?.is_some() {
			return Err(PlayerError::AlreadyExists(name.to_string()));
		}

		let player = Player::new(name);
		self.put(&player)?;
		self.append_to_roster(name)?;

		info!("New player created: {}", name);
		Ok(player)
	}

	pub fn get(&self, name: &str) -> Result<Player, PlayerError> {
		self.try_get(name)?
			.ok_or_else(|| PlayerError::NotFound(name.to_string()))
	}

	pub fn try_get(&self, name: &str) -> Result<Option<Player>, PlayerError> {
		self.read(name)
	}

	/// Overwrite the record keyed by `player.name`
	pub fn put(&mut self, player: &Player) -> Result<(), PlayerError> {
		self.write(&player.name, player)
	}

	/// Remove a record; the roster keeps the name
	pub fn delete(&mut self, name: &str) -> Result<(), PlayerError> {
		self.store.delete(name)?;
		Ok(())
	}

	/// Append a name to the roster, duplicates included
	pub fn append_to_roster(&mut self, name: &str) -> Result<(), PlayerError> {
		let mut roster = self.all_names()?;
		roster.push(name.to_string());
		self.write(&self.keys.roster.clone(), &roster)
	}

	/// Full roster in append order, empty if never written
	pub fn all_names(&self) -> Result<Vec<String>, PlayerError> {
		Ok(self.read(&self.keys.roster)?.unwrap_or_default())
	}

	pub fn balance(&self, name: &str) -> Result<u64, PlayerError> {
		Ok(self.get(name)?.balance)
	}

	pub fn items(&self, name: &str) -> Result<Vec<u64>, PlayerError> {
		Ok(self.get(name)?.items)
	}

	/// Move unallocated points into attributes
	pub fn distribute_points(
		&mut self,
		name: &str,
		speed: u32,
		stamina: u32,
		strength: u32,
	) -> Result<Player, PlayerError> {
		let mut player = self.get(name)?;

		let requested = u64::from(speed) + u64::from(stamina) + u64::from(strength);
		if requested > u64::from(player.points) {
			return Err(PlayerError::InsufficientPoints {
				requested,
				available: player.points,
			});
		}

		// Each increment is bounded by `points`, which is itself a u32
		player.speed = player.speed.saturating_add(speed);
		player.stamina = player.stamina.saturating_add(stamina);
		player.strength = player.strength.saturating_add(strength);
		player.points -= requested as u32;
		self.put(&player)?;

		info!("Points distributed to {}", name);
		Ok(player)
	}

	fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PlayerError> {
		match self.store.get(key)? {
			Some(bytes) => {
				let value = serde_json::from_slice(&bytes).map_err(StoreError::from)?;
				Ok(Some(value))
			}
			None => Ok(None),
		}
	}

	fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), PlayerError> {
		let bytes = serde_json::to_vec(value).map_err(StoreError::from)?;
		self.store.put(key, bytes)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::MemoryStore;

	fn create_test_store() -> PlayerStore {
		PlayerStore::new(Box::new(MemoryStore::new()), StoreKeys::default())
	}

	#[test]
	fn test_create_player_defaults() {
		let mut players = create_test_store();
		let player = players.create("alice").unwrap();

		assert_eq!(player.balance, 20);
		assert_eq!(player.points, 5);
		assert_eq!(player.attributes(), [0, 0, 0]);
		assert!(player.items.is_empty());
		assert_eq!(players.get("alice").unwrap(), player);
		assert_eq!(players.all_names().unwrap(), vec!["alice".to_string()]);
	}

	#[test]
	fn test_duplicate_registration_rejected() {
		let mut players = create_test_store();
		players.create("alice").unwrap();
		players.distribute_points("alice", 2, 0, 0).unwrap();

		let result = players.create("alice");
		assert!(matches!(result, Err(PlayerError::AlreadyExists(_))));

		// First record untouched, roster not appended
		assert_eq!(players.get("alice").unwrap().speed, 2);
		assert_eq!(players.all_names().unwrap().len(), 1);
	}

	#[test]
	fn test_sentinel_names_rejected() {
		let mut players = create_test_store();
		assert!(matches!(
			players.create("playersList"),
			Err(PlayerError::InvalidName(_))
		));
		assert!(matches!(
			players.create("storeURL"),
			Err(PlayerError::InvalidName(_))
		));
		assert!(matches!(players.create(""), Err(PlayerError::InvalidName(_))));
	}

	#[test]
	fn test_get_missing_player() {
		let players = create_test_store();
		assert!(matches!(players.get("ghost"), Err(PlayerError::NotFound(_))));
		assert!(players.all_names().unwrap().is_empty());
	}

	#[test]
	fn test_distribute_points_conserves_total() {
		let mut players = create_test_store();
		players.create("alice").unwrap();

		let player = players.distribute_points("alice", 1, 2, 1).unwrap();
		assert_eq!(player.speed, 1);
		assert_eq!(player.stamina, 2);
		assert_eq!(player.strength, 1);
		assert_eq!(player.points, 1);
		assert_eq!(player.speed + player.stamina + player.strength + player.points, 5);
	}

	#[test]
	fn test_distribute_points_over_budget() {
		let mut players = create_test_store();
		players.create("alice").unwrap();

		let result = players.distribute_points("alice", 3, 3, 0);
		assert!(matches!(
			result,
			Err(PlayerError::InsufficientPoints {
				requested: 6,
				available: 5
			})
		));

		// Huge requests must not wrap around
		let result = players.distribute_points("alice", u32::MAX, u32::MAX, 2);
		assert!(matches!(result, Err(PlayerError::InsufficientPoints { .. })));
		assert_eq!(players.get("alice").unwrap().points, 5);
	}

	#[test]
	fn test_delete_keeps_roster_entry() {
		let mut players = create_test_store();
		players.create("alice").unwrap();
		players.create("bob").unwrap();
		players.delete("bob").unwrap();

		assert!(players.try_get("bob").unwrap().is_none());
		assert_eq!(players.all_names().unwrap(), vec!["alice", "bob"]);
	}

	#[test]
	fn test_bootstrap_only_once() {
		let mut players = create_test_store();
		assert!(matches!(players.catalog_url(), Err(PlayerError::CatalogUnset)));

		assert!(players.bootstrap("https://catalog/a.json").unwrap());
		assert!(!players.bootstrap("https://catalog/b.json").unwrap());
		assert_eq!(players.catalog_url().unwrap(), "https://catalog/a.json");
	}
}
