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

use fightclub_sdk::types::{BattleResponse, BattleResult, BattleRole};
use fightclub_settlement::SettlementReceipt;
use serde::{Deserialize, Serialize};

/// A fought battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleReport {
	pub player: String,
	pub opponent: String,
	/// Initiating player's win chance in percent, within [5, 95]
	pub chance: u8,
	/// The draw in [0, 100) that decided the battle
	pub roll: u8,
	pub winner: BattleRole,
	pub settlement: SettlementReceipt,
}

/// Result of a match request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
	pub result: BattleResult,
	/// Present unless the match ended in a draw
	pub battle: Option<BattleReport>,
}

impl MatchOutcome {
	/// No opponent was available; nothing changed
	pub fn draw() -> Self {
		Self {
			result: BattleResult::Draw,
			battle: None,
		}
	}

	pub fn fought(battle: BattleReport) -> Self {
		Self {
			result: battle.winner.into(),
			battle: Some(battle),
		}
	}

	pub fn is_draw(&self) -> bool {
		self.result == BattleResult::Draw
	}
}

impl From<MatchOutcome> for BattleResponse {
	fn from(outcome: MatchOutcome) -> Self {
		Self {
			result: outcome.result,
			opponent: outcome.battle.as_ref().map(|b| b.opponent.clone()),
			chance: outcome.battle.as_ref().map(|b| b.chance),
		}
	}
}
