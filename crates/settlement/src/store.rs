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

use std::collections::HashMap;

use thiserror::Error;

/// Error types for store operations
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("Store backend error: {0}")]
	Backend(String),
	#[error("Codec error: {0}")]
	Codec(#[from] serde_json::Error),
}

/// Persistent key-value store backing all player state
///
/// Writes are last-write-wins overwrites. There are no transactions:
/// callers must finish every check before their first `put` or `delete`.
pub trait Store: Send {
	/// Read the value stored under `key`, if any
	fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

	/// Overwrite the value stored under `key`
	fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

	/// Remove `key`; removing an absent key is not an error
	fn delete(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store used for tests and single-process deployments
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self {
			entries: HashMap::new(),
		}
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl Store for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
		Ok(self.entries.get(key).cloned())
	}

	fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
		self.entries.insert(key.to_string(), value);
		Ok(())
	}

	fn delete(&mut self, key: &str) -> Result<(), StoreError> {
		self.entries.remove(key);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_put_get_delete() {
		let mut store = MemoryStore::new();
		assert!(store.get("alice").unwrap().is_none());

		store.put("alice", b"one".to_vec()).unwrap();
		store.put("alice", b"two".to_vec()).unwrap();
		assert_eq!(store.get("alice").unwrap(), Some(b"two".to_vec()));
		assert_eq!(store.len(), 1);

		store.delete("alice").unwrap();
		assert!(!store.contains_key("alice"));
		// Deleting again is a no-op
		store.delete("alice").unwrap();
		assert!(store.is_empty());
	}
}
