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

mod error;

pub use error::{EngineError, ErrorKind};

use fightclub_sdk::types::Player;
use fightclub_settlement::{
	MemoryStore, OracleId, OracleResponse, PlayerStore, PurchaseFlow, PurchaseOracle,
	PurchaseReceipt, Store,
};
use tracing::info;
use uuid::Uuid;

use crate::{
	battle::BattleEngine,
	config::MatchingConfig,
	matcher::MatchEngine,
	rng::{RandomProvider, StdRandom},
	types::MatchOutcome,
};

/// Game economy engine
///
/// Every public operation is a single transaction against the player
/// store: it either completes or fails before writing anything. The engine
/// takes `&mut self` for writes, so callers sharing it across tasks wrap it
/// in a mutex and each call runs to completion under the lock.
pub struct FightClub {
	players: PlayerStore,
	rng: Box<dyn RandomProvider>,
	matcher: MatchEngine,
	battles: BattleEngine,
	purchases: PurchaseFlow,
}

impl FightClub {
	/// Create an engine over `store`, seeding the catalog URL on first use
	pub fn new(
		store: Box<dyn Store>,
		rng: Box<dyn RandomProvider>,
		oracle: Box<dyn PurchaseOracle>,
		config: &MatchingConfig,
	) -> Result<Self, EngineError> {
		let mut players = PlayerStore::new(store, config.settlement.store_keys());
		players.bootstrap(&config.settlement.catalog_url)?;

		let purchases = PurchaseFlow::new(oracle, &config.settlement);
		info!("FightClub engine ready (oracle: {})", purchases.trusted_oracle());

		Ok(Self {
			players,
			rng,
			matcher: MatchEngine::new(config.skip_stale_roster_entries),
			battles: BattleEngine::new(config.verbose_logging),
			purchases,
		})
	}

	/// Engine over an in-memory store, seeded from `config.rng_seed` when set
	pub fn with_memory_store(
		oracle: Box<dyn PurchaseOracle>,
		config: &MatchingConfig,
	) -> Result<Self, EngineError> {
		let rng: Box<dyn RandomProvider> = match config.rng_seed {
			Some(seed) => Box::new(StdRandom::seeded(seed)),
			None => Box::new(StdRandom::from_entropy()),
		};
		Self::new(Box::new(MemoryStore::new()), rng, oracle, config)
	}

	pub fn players(&self) -> &PlayerStore {
		&self.players
	}

	pub fn purchases(&self) -> &PurchaseFlow {
		&self.purchases
	}

	/// Identity the purchase callback must come from
	pub fn trusted_oracle(&self) -> OracleId {
		self.purchases.trusted_oracle()
	}

	pub fn register_player(&mut self, name: &str) -> Result<Player, EngineError> {
		Ok(self.players.create(name)?)
	}

	pub fn balance(&self, name: &str) -> Result<u64, EngineError> {
		Ok(self.players.balance(name)?)
	}

	pub fn items(&self, name: &str) -> Result<Vec<u64>, EngineError> {
		Ok(self.players.items(name)?)
	}

	pub fn distribute_points(
		&mut self,
		name: &str,
		speed: u32,
		stamina: u32,
		strength: u32,
	) -> Result<Player, EngineError> {
		Ok(self
			.players
			.distribute_points(name, speed, stamina, strength)?)
	}

	/// Start a purchase; the item is granted when the oracle calls back
	pub fn buy_item(&mut self, name: &str, item_id: u64) -> Result<Uuid, EngineError> {
		Ok(self.purchases.buy_item(&self.players, name, item_id)?)
	}

	pub fn on_purchase_callback(
		&mut self,
		caller: &OracleId,
		response: OracleResponse,
	) -> Result<PurchaseReceipt, EngineError> {
		Ok(self
			.purchases
			.on_purchase_callback(&mut self.players, caller, response)?)
	}

	/// Find an opponent for `name` and fight for `bet`
	///
	/// Returns a draw without touching the store when nobody is available.
	pub fn find_match(&mut self, name: &str, bet: u64) -> Result<MatchOutcome, EngineError> {
		let opponent = self
			.matcher
			.find_opponent(&self.players, self.rng.as_mut(), name)?;
		let Some(opponent) = opponent else {
			return Ok(MatchOutcome::draw());
		};

		let report = self
			.battles
			.battle(&mut self.players, self.rng.as_mut(), name, &opponent, bet)?;
		Ok(MatchOutcome::fought(report))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rng::ScriptedRandom;
	use fightclub_sdk::types::BattleResult;
	use fightclub_settlement::{MemoryOracle, ResponseCode, SettlementConfig};

	fn create_test_engine(rolls: Vec<usize>) -> (FightClub, MemoryOracle) {
		let config = MatchingConfig::default();
		let oracle = MemoryOracle::new(config.settlement.trusted_oracle());
		let engine = FightClub::new(
			Box::new(MemoryStore::new()),
			Box::new(ScriptedRandom::new(rolls)),
			Box::new(oracle.clone()),
			&config,
		)
		.unwrap();
		(engine, oracle)
	}

	#[test]
	fn test_catalog_url_bootstrapped() {
		let (engine, _) = create_test_engine(vec![0]);
		assert_eq!(
			engine.players().catalog_url().unwrap(),
			SettlementConfig::default().catalog_url
		);
	}

	#[test]
	fn test_lonely_player_draws() {
		let (mut engine, _) = create_test_engine(vec![0]);
		engine.register_player("alice").unwrap();

		let outcome = engine.find_match("alice", 5).unwrap();
		assert!(outcome.is_draw());
		assert_eq!(engine.balance("alice").unwrap(), 20);
	}

	#[test]
	fn test_match_and_settle() {
		// First draw picks the opponent, second is the battle roll
		let (mut engine, _) = create_test_engine(vec![0, 99]);
		engine.register_player("alice").unwrap();
		engine.register_player("bob").unwrap();

		let outcome = engine.find_match("alice", 5).unwrap();
		assert_eq!(outcome.result, BattleResult::Player2);
		assert_eq!(engine.balance("bob").unwrap(), 25);
		assert_eq!(
			engine.balance("alice").unwrap_err().kind(),
			ErrorKind::NotFound
		);
	}

	#[test]
	fn test_purchase_round_trip() {
		let (mut engine, oracle) = create_test_engine(vec![0]);
		engine.register_player("alice").unwrap();

		let request_id = engine.buy_item("alice", 3).unwrap();
		let request = oracle.take_requests().pop().unwrap();
		assert_eq!(request.request_id, request_id);

		let response = request.respond(ResponseCode::Success, br#"[{"id":3,"price":7}]"#.to_vec());
		let oracle_id = engine.trusted_oracle();
		let receipt = engine.on_purchase_callback(&oracle_id, response).unwrap();
		assert_eq!(receipt.balance, 13);
		assert_eq!(engine.items("alice").unwrap(), vec![3]);
	}
}
