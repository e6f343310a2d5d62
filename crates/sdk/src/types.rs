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
use uuid::Uuid;

/// Balance granted to a freshly registered player
pub const DEFAULT_BALANCE: u64 = 20;

/// Unallocated skill points granted to a freshly registered player
pub const DEFAULT_POINTS: u32 = 5;

/// Persistent player record
///
/// The `name` is the storage key and never changes after registration.
/// `items` holds catalog item ids in purchase order and never contains
/// the same id twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
	/// Unique player name
	pub name: String,
	/// Speed attribute points
	pub speed: u32,
	/// Stamina attribute points
	pub stamina: u32,
	/// Strength attribute points
	pub strength: u32,
	/// Skill points not yet distributed
	pub points: u32,
	/// Currency balance
	pub balance: u64,
	/// Purchased catalog item ids
	pub items: Vec<u64>,
}

impl Player {
	/// Create a player with the registration defaults
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			speed: 0,
			stamina: 0,
			strength: 0,
			points: DEFAULT_POINTS,
			balance: DEFAULT_BALANCE,
			items: Vec::new(),
		}
	}

	/// Whether the player already owns `item_id`
	pub fn owns(&self, item_id: u64) -> bool {
		self.items.contains(&item_id)
	}

	/// Attributes in battle comparison order: speed, stamina, strength
	pub fn attributes(&self) -> [u32; 3] {
		[self.speed, self.stamina, self.strength]
	}
}

/// Side of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleRole {
	/// The player who initiated the battle
	Player1,
	/// The matched opponent
	Player2,
}

impl BattleRole {
	pub fn label(&self) -> &'static str {
		match self {
			BattleRole::Player1 => "player1",
			BattleRole::Player2 => "player2",
		}
	}
}

/// Outcome reported to the caller of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleResult {
	Player1,
	Player2,
	/// No opponent could be found; balances are untouched
	Draw,
}

impl BattleResult {
	pub fn label(&self) -> &'static str {
		match self {
			BattleResult::Player1 => "player1",
			BattleResult::Player2 => "player2",
			BattleResult::Draw => "draw",
		}
	}
}

impl From<BattleRole> for BattleResult {
	fn from(role: BattleRole) -> Self {
		match role {
			BattleRole::Player1 => BattleResult::Player1,
			BattleRole::Player2 => BattleResult::Player2,
		}
	}
}

/// Lifecycle of a purchase request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
	/// Catalog fetch issued, callback not yet received
	Requested,
	/// Callback received and the item was credited
	Fulfilled,
	/// Callback received but the purchase was rejected
	Failed,
}

/// Request to register a new player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPlayerRequest {
	pub name: String,
}

/// Request to spend skill points
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistributePointsRequest {
	#[serde(default)]
	pub speed: u32,
	#[serde(default)]
	pub stamina: u32,
	#[serde(default)]
	pub strength: u32,
}

/// Request to buy a catalog item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyItemRequest {
	pub item_id: u64,
}

/// Response from initiating a purchase
///
/// The purchase completes asynchronously once the catalog oracle calls back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyItemResponse {
	pub request_id: Uuid,
	pub status: PurchaseStatus,
}

/// Request to enter a wagered battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleRequest {
	pub bet: u64,
}

/// Result of a wagered battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleResponse {
	/// Winner role, or draw when no opponent was available
	pub result: BattleResult,
	/// Matched opponent name
	pub opponent: Option<String>,
	/// Initiating player's win chance in percent
	pub chance: Option<u8>,
}

/// Player balance view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
	pub name: String,
	pub balance: u64,
}

/// Player inventory view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse {
	pub name: String,
	pub items: Vec<u64>,
}
