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

use fightclub_sdk::types::BattleRole;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::player::{PlayerError, PlayerStore};

/// Error types for wager settlement
#[derive(Debug, Error)]
pub enum SettlementError {
	#[error("Insufficient funds: {name} has {balance}, bet is {bet}")]
	InsufficientFunds { name: String, balance: u64, bet: u64 },
	#[error("Balance overflow for {0}")]
	BalanceOverflow(String),
	#[error("Player error: {0}")]
	Player(#[from] PlayerError),
}

/// Outcome of a settled wager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReceipt {
	/// Name re-admitted to the roster
	pub winner: String,
	/// Name whose record was removed
	pub loser: String,
	pub bet: u64,
	/// Winner balance as persisted
	pub winner_balance: u64,
	/// Loser balance after the debit; never persisted
	pub loser_balance: u64,
}

/// Transfer `bet` from the loser to the winner of a battle
///
/// Both pre-battle records are removed, then the winner is written back and
/// re-appended to the roster. The loser is evicted for good: its record is
/// gone and its old roster entries go stale.
///
/// Balances were checked by the battle before calling this; they are read
/// again here but not re-validated against the earlier snapshot.
pub fn settle(
	players: &mut PlayerStore,
	winner: BattleRole,
	player1: &str,
	player2: &str,
	bet: u64,
) -> Result<SettlementReceipt, SettlementError> {
	let (winner_name, loser_name) = match winner {
		BattleRole::Player1 => (player1, player2),
		BattleRole::Player2 => (player2, player1),
	};

	let mut winner_data = players.get(winner_name)?;
	let player1_data = players.get(player1)?;
	let player2_data = players.get(player2)?;
	let loser_data = match winner {
		BattleRole::Player1 => player2_data,
		BattleRole::Player2 => player1_data,
	};

	let loser_balance =
		loser_data
			.balance
			.checked_sub(bet)
			.ok_or_else(|| SettlementError::InsufficientFunds {
				name: loser_name.to_string(),
				balance: loser_data.balance,
				bet,
			})?;
	winner_data.balance = winner_data
		.balance
		.checked_add(bet)
		.ok_or_else(|| SettlementError::BalanceOverflow(winner_name.to_string()))?;

	players.delete(player1)?;
	players.delete(player2)?;
	players.put(&winner_data)?;
	players.append_to_roster(winner_name)?;

	info!(
		"Winnings distributed successfully: {} +{}, {} evicted",
		winner_name, bet, loser_name
	);

	Ok(SettlementReceipt {
		winner: winner_name.to_string(),
		loser: loser_name.to_string(),
		bet,
		winner_balance: winner_data.balance,
		loser_balance,
	})
}
