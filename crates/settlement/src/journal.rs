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

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use fightclub_sdk::types::PurchaseStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchase issued to the oracle and what became of it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRecord {
	pub request_id: Uuid,
	pub player: String,
	pub item_id: u64,
	pub status: PurchaseStatus,
	pub requested_at: DateTime<Utc>,
	pub completed_at: Option<DateTime<Utc>>,
}

/// Settled records kept for status lookups unless configured otherwise
pub const DEFAULT_SETTLED_RETENTION: usize = 1024;

/// In-memory log of purchase requests keyed by request id
///
/// Tracks the `Requested -> Fulfilled | Failed` lifecycle so replayed or
/// unexpected callbacks can be spotted. The journal is not persisted: after
/// a restart every outstanding request looks unknown.
///
/// Pending requests are kept until their callback arrives. Settled ones are
/// evicted oldest first once more than `retention` have accumulated, after
/// which their ids look unknown too.
#[derive(Debug)]
pub struct PurchaseJournal {
	records: HashMap<Uuid, PurchaseRecord>,
	settled: VecDeque<Uuid>,
	retention: usize,
}

impl Default for PurchaseJournal {
	fn default() -> Self {
		Self::new()
	}
}

impl PurchaseJournal {
	pub fn new() -> Self {
		Self::with_retention(DEFAULT_SETTLED_RETENTION)
	}

	pub fn with_retention(retention: usize) -> Self {
		Self {
			records: HashMap::new(),
			settled: VecDeque::new(),
			retention,
		}
	}

	/// Record a freshly issued request
	pub fn record_requested(&mut self, request_id: Uuid, player: &str, item_id: u64) {
		self.records.insert(
			request_id,
			PurchaseRecord {
				request_id,
				player: player.to_string(),
				item_id,
				status: PurchaseStatus::Requested,
				requested_at: Utc::now(),
				completed_at: None,
			},
		);
	}

	/// Whether `request_id` is still waiting for its callback
	pub fn is_pending(&self, request_id: &Uuid) -> bool {
		self.status(request_id) == Some(PurchaseStatus::Requested)
	}

	pub fn status(&self, request_id: &Uuid) -> Option<PurchaseStatus> {
		self.records.get(request_id).map(|r| r.status)
	}

	pub fn get(&self, request_id: &Uuid) -> Option<&PurchaseRecord> {
		self.records.get(request_id)
	}

	/// Move a pending request to its final state
	///
	/// Returns false and leaves the journal untouched when the id is unknown
	/// or already settled; the first outcome recorded is final.
	pub fn complete(&mut self, request_id: &Uuid, status: PurchaseStatus) -> bool {
		let Some(record) = self.records.get_mut(request_id) else {
			return false;
		};
		if record.status != PurchaseStatus::Requested {
			return false;
		}

		record.status = status;
		record.completed_at = Some(Utc::now());
		self.settled.push_back(*request_id);
		self.evict_settled();
		true
	}

	fn evict_settled(&mut self) {
		while self.settled.len() > self.retention {
			if let Some(oldest) = self.settled.pop_front() {
				self.records.remove(&oldest);
			}
		}
	}

	/// Requests still waiting for a callback
	pub fn pending(&self) -> impl Iterator<Item = &PurchaseRecord> {
		self.records
			.values()
			.filter(|r| r.status == PurchaseStatus::Requested)
	}

	pub fn pending_count(&self) -> usize {
		self.pending().count()
	}

	/// Number of requests tracked, pending and settled
	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}
