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

//! Two-phase catalog purchase
//!
//! `buy_item` validates the request and hands a catalog fetch to the
//! oracle; nothing is mutated. `on_purchase_callback` runs later as a
//! separate transaction, re-reads the player and applies the debit. The
//! player name travels through the oracle as opaque user data.

use fightclub_sdk::types::PurchaseStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::{CatalogError, item_filter, parse_catalog_entry};
use crate::config::SettlementConfig;
use crate::journal::PurchaseJournal;
use crate::oracle::{
	OracleError, OracleId, OracleRequest, OracleResponse, PURCHASE_CALLBACK, PurchaseOracle,
	ResponseCode,
};
use crate::player::{PlayerError, PlayerStore};

/// Error types for purchase operations
#[derive(Debug, Error)]
pub enum PurchaseError {
	#[error("Item {item_id} has already been purchased by {player}")]
	AlreadyOwned { player: String, item_id: u64 },
	#[error("Callback not sent by the oracle (caller: {0})")]
	Unauthorized(OracleId),
	#[error("Request failed for {url} with code {code}")]
	RequestFailed { url: String, code: ResponseCode },
	#[error("Insufficient balance: {player} has {balance}, price is {price}")]
	InsufficientBalance {
		player: String,
		balance: u64,
		price: u64,
	},
	#[error("Callback for request {0} was already handled or never issued")]
	DuplicateCallback(Uuid),
	#[error("Catalog error: {0}")]
	Catalog(#[from] CatalogError),
	#[error("Oracle error: {0}")]
	Oracle(#[from] OracleError),
	#[error("Player error: {0}")]
	Player(#[from] PlayerError),
}

/// A completed purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReceipt {
	pub request_id: Uuid,
	pub player: String,
	pub item_id: u64,
	pub price: u64,
	/// Balance after the debit
	pub balance: u64,
}

/// Purchase protocol driver
pub struct PurchaseFlow {
	oracle: Box<dyn PurchaseOracle>,
	gas_budget: u64,
	reject_replayed_callbacks: bool,
	journal: PurchaseJournal,
}

impl PurchaseFlow {
	pub fn new(oracle: Box<dyn PurchaseOracle>, config: &SettlementConfig) -> Self {
		Self {
			oracle,
			gas_budget: config.purchase_gas_budget,
			reject_replayed_callbacks: config.reject_replayed_callbacks,
			journal: PurchaseJournal::with_retention(config.settled_purchase_retention),
		}
	}

	/// Identity a callback must assert to be accepted
	pub fn trusted_oracle(&self) -> OracleId {
		self.oracle.id()
	}

	pub fn journal(&self) -> &PurchaseJournal {
		&self.journal
	}

	/// Ask the oracle for the price of `item_id` on behalf of `name`
	///
	/// Returns the request id the callback will carry.
	pub fn buy_item(
		&mut self,
		players: &PlayerStore,
		name: &str,
		item_id: u64,
	) -> Result<Uuid, PurchaseError> {
		let player = players.get(name)?;
		if player.owns(item_id) {
			return Err(PurchaseError::AlreadyOwned {
				player: name.to_string(),
				item_id,
			});
		}

		let url = players.catalog_url()?;
		let request_id = Uuid::new_v4();
		self.oracle.request(OracleRequest {
			request_id,
			url,
			filter: item_filter(item_id),
			callback: PURCHASE_CALLBACK.to_string(),
			user_data: name.to_string(),
			gas_budget: self.gas_budget,
		})?;
		self.journal.record_requested(request_id, name, item_id);

		info!(
			"Purchase requested: {} item {} (request {})",
			name, item_id, request_id
		);
		Ok(request_id)
	}

	/// Complete a purchase with the oracle's answer
	///
	/// Nothing is written unless every check passes.
	pub fn on_purchase_callback(
		&mut self,
		players: &mut PlayerStore,
		caller: &OracleId,
		response: OracleResponse,
	) -> Result<PurchaseReceipt, PurchaseError> {
		let trusted = self.oracle.id();
		if *caller != trusted {
			warn!("Rejected purchase callback from {}", caller);
			return Err(PurchaseError::Unauthorized(caller.clone()));
		}

		let request_id = response.request_id;
		if !self.journal.is_pending(&request_id) {
			// No replay guard upstream; the callback is applied again unless
			// explicitly configured otherwise
			warn!(
				"Purchase callback for request {} is a replay or was never issued",
				request_id
			);
			if self.reject_replayed_callbacks {
				return Err(PurchaseError::DuplicateCallback(request_id));
			}
		}

		let result = Self::apply_callback(players, response);
		let status = if result.is_ok() {
			PurchaseStatus::Fulfilled
		} else {
			PurchaseStatus::Failed
		};
		if !self.journal.complete(&request_id, status) {
			if let Some(settled) = self.journal.status(&request_id) {
				warn!(
					"Request {} already settled as {:?}, ignoring {:?}",
					request_id, settled, status
				);
			}
		}
		result
	}

	fn apply_callback(
		players: &mut PlayerStore,
		response: OracleResponse,
	) -> Result<PurchaseReceipt, PurchaseError> {
		if !response.code.is_success() {
			return Err(PurchaseError::RequestFailed {
				url: response.url,
				code: response.code,
			});
		}
		info!(
			"Result for {} is: {}",
			response.url,
			String::from_utf8_lossy(&response.result)
		);

		let entry = parse_catalog_entry(&response.result)?;
		let name = response.user_data;

		let mut player = players.get(&name)?;
		if player.balance < entry.price {
			return Err(PurchaseError::InsufficientBalance {
				player: name,
				balance: player.balance,
				price: entry.price,
			});
		}
		player.balance -= entry.price;
		player.items.push(entry.id);
		players.put(&player)?;

		info!("Item purchased successfully by {}", name);
		Ok(PurchaseReceipt {
			request_id: response.request_id,
			player: name,
			item_id: entry.id,
			price: entry.price,
			balance: player.balance,
		})
	}
}
