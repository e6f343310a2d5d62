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

use fightclub_sdk::types::{BattleRole, Player};
use fightclub_settlement::{PlayerError, PlayerStore, SettlementError, settle};
use thiserror::Error;
use tracing::{debug, info};

use crate::rng::RandomProvider;
use crate::types::BattleReport;

/// Win chance of evenly matched players
pub const BASE_CHANCE: i64 = 50;
/// Lower bound of the win chance
pub const MIN_CHANCE: i64 = 5;
/// Upper bound of the win chance
pub const MAX_CHANCE: i64 = 95;
/// Chance gained per attribute point of advantage
pub const ATTRIBUTE_WEIGHT: i64 = 5;

/// Error types for battles
#[derive(Debug, Error)]
pub enum BattleError {
	#[error("Opponent not found: {0}")]
	OpponentNotFound(String),
	#[error("Insufficient balance for the battle: {name} has {balance}, bet is {bet}")]
	InsufficientFunds { name: String, balance: u64, bet: u64 },
	#[error("Player error: {0}")]
	Player(#[from] PlayerError),
	#[error("Settlement error: {0}")]
	Settlement(#[from] SettlementError),
}

/// Chance in percent that `player` beats `opponent`
///
/// Attributes are compared in order (speed, stamina, strength). Each
/// differing pair moves the chance by 5 per point and the running value is
/// clamped to [5, 95] immediately, so an early saturation limits what later
/// attributes can do.
pub fn win_chance(player: &Player, opponent: &Player) -> u8 {
	let chance = player
		.attributes()
		.into_iter()
		.zip(opponent.attributes())
		.fold(BASE_CHANCE, |chance, (mine, theirs)| {
			if mine == theirs {
				return chance;
			}
			let delta = (i64::from(mine) - i64::from(theirs)) * ATTRIBUTE_WEIGHT;
			(chance + delta).clamp(MIN_CHANCE, MAX_CHANCE)
		});

	chance as u8
}

/// Draw the winner given player 1's chance
///
/// The roll is uniform in [0, 100) and player 1 wins when it is at most
/// `chance`, boundary included. Returns the winner and the roll.
pub fn resolve(rng: &mut dyn RandomProvider, chance: u8) -> (BattleRole, u8) {
	let roll = rng.uniform(100) as u8;
	let winner = if roll <= chance {
		BattleRole::Player1
	} else {
		BattleRole::Player2
	};
	(winner, roll)
}

/// Runs a wagered battle between two roster players
#[derive(Debug, Clone, Default)]
pub struct BattleEngine {
	verbose_logging: bool,
}

impl BattleEngine {
	pub fn new(verbose_logging: bool) -> Self {
		Self { verbose_logging }
	}

	/// Fight `player_name` against `opponent_name` for `bet` and settle
	///
	/// Both balances must cover the bet. Nothing is written before every
	/// check has passed.
	pub fn battle(
		&self,
		players: &mut PlayerStore,
		rng: &mut dyn RandomProvider,
		player_name: &str,
		opponent_name: &str,
		bet: u64,
	) -> Result<BattleReport, BattleError> {
		let opponent = match players.try_get(opponent_name)? {
			Some(opponent) if !opponent.name.is_empty() => opponent,
			_ => return Err(BattleError::OpponentNotFound(opponent_name.to_string())),
		};
		let player = players.get(player_name)?;

		for participant in [&player, &opponent] {
			if participant.balance < bet {
				return Err(BattleError::InsufficientFunds {
					name: participant.name.clone(),
					balance: participant.balance,
					bet,
				});
			}
		}

		if self.verbose_logging {
			debug!(
				"Attributes {} {:?} vs {} {:?}",
				player_name,
				player.attributes(),
				opponent_name,
				opponent.attributes()
			);
		}

		let chance = win_chance(&player, &opponent);
		let (winner, roll) = resolve(rng, chance);

		info!("Battle started: {} vs {}", player_name, opponent_name);
		info!("Chances of {}: {}%", player_name, chance);
		info!("Winner: {} (roll {})", winner.label(), roll);

		let settlement = settle(players, winner, player_name, opponent_name, bet)?;

		Ok(BattleReport {
			player: player_name.to_string(),
			opponent: opponent_name.to_string(),
			chance,
			roll,
			winner,
			settlement,
		})
	}
}
