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

//! FightClub Settlement
//!
//! This crate owns every mutation of persistent player state:
//! - Store contract and an in-memory backing store
//! - Player records and the matchmaking roster
//! - Wager settlement between a battle's winner and loser
//! - The two-phase catalog purchase protocol (request, then oracle callback)

pub mod catalog;
pub mod config;
pub mod journal;
pub mod oracle;
pub mod player;
pub mod purchase;
pub mod store;
pub mod wager;

pub use catalog::{CatalogEntry, CatalogError, item_filter, parse_catalog_entry};
pub use config::SettlementConfig;
pub use journal::{PurchaseJournal, PurchaseRecord};
pub use oracle::{
	MemoryOracle, OracleError, OracleId, OracleRequest, OracleResponse, PurchaseOracle,
	ResponseCode,
};
pub use player::{PlayerError, PlayerStore, StoreKeys};
pub use purchase::{PurchaseError, PurchaseFlow, PurchaseReceipt};
pub use store::{MemoryStore, Store, StoreError};
pub use wager::{SettlementError, SettlementReceipt, settle};
