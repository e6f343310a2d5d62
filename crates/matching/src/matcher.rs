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

use fightclub_settlement::{PlayerError, PlayerStore};
use thiserror::Error;
use tracing::info;

use crate::rng::RandomProvider;

/// Error types for matchmaking
#[derive(Debug, Error)]
pub enum MatchError {
	#[error("Not enough players for an opponent")]
	NoPlayers,
	#[error("No available opponents for {0}")]
	NoOpponents(String),
	#[error("Opponent not found: {0}")]
	OpponentNotFound(String),
	#[error("Player error: {0}")]
	Player(#[from] PlayerError),
}

/// Opponent selection over the roster
///
/// Selection runs in two tiers. The first draws uniformly over every
/// roster entry other than the player, so a name appended several times
/// is proportionally more likely. If that finds nobody, the second tier
/// draws over the distinct other names and reports "no match" instead of
/// failing when there are none.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
	skip_stale: bool,
}

impl MatchEngine {
	/// `skip_stale` leaves out roster names whose record was deleted
	pub fn new(skip_stale: bool) -> Self {
		Self { skip_stale }
	}

	/// Pick an opponent for `name`, or `None` when the roster has nobody
	///
	/// The pick must resolve to a live record; a stale roster entry fails
	/// with `OpponentNotFound`.
	pub fn find_opponent(
		&self,
		players: &PlayerStore,
		rng: &mut dyn RandomProvider,
		name: &str,
	) -> Result<Option<String>, MatchError> {
		let opponent = match self.find_real_opponent(players, rng, name) {
			Ok(opponent) => Some(opponent),
			Err(e @ (MatchError::NoPlayers | MatchError::NoOpponents(_))) => {
				info!(
					"No real opponents found for {} ({}). Searching for a random opponent.",
					name, e
				);
				self.find_random_opponent(players, rng, name)?
			}
			Err(e) => return Err(e),
		};

		let Some(opponent) = opponent else {
			info!(
				"No random opponents found for {}. Waiting for more players.",
				name
			);
			return Ok(None);
		};

		if players.try_get(&opponent)?.is_none() {
			return Err(MatchError::OpponentNotFound(opponent));
		}
		Ok(Some(opponent))
	}

	/// Draw among all roster entries except `name`
	pub fn find_real_opponent(
		&self,
		players: &PlayerStore,
		rng: &mut dyn RandomProvider,
		name: &str,
	) -> Result<String, MatchError> {
		let roster = players.all_names()?;
		if roster.len() < 2 {
			return Err(MatchError::NoPlayers);
		}

		let mut opponents = Vec::with_capacity(roster.len());
		for candidate in roster {
			if self.is_candidate(players, &candidate, name)? {
				opponents.push(candidate);
			}
		}
		if opponents.is_empty() {
			return Err(MatchError::NoOpponents(name.to_string()));
		}

		let index = rng.uniform(opponents.len());
		Ok(opponents.swap_remove(index))
	}

	/// Draw among the distinct roster names other than `name`
	pub fn find_random_opponent(
		&self,
		players: &PlayerStore,
		rng: &mut dyn RandomProvider,
		name: &str,
	) -> Result<Option<String>, MatchError> {
		let roster = players.all_names()?;
		if roster.len() < 2 {
			return Ok(None);
		}

		let mut candidates: Vec<String> = Vec::new();
		for candidate in roster {
			if !candidates.contains(&candidate) && self.is_candidate(players, &candidate, name)? {
				candidates.push(candidate);
			}
		}
		if candidates.is_empty() {
			return Ok(None);
		}

		let index = rng.uniform(candidates.len());
		Ok(Some(candidates.swap_remove(index)))
	}

	fn is_candidate(
		&self,
		players: &PlayerStore,
		candidate: &str,
		name: &str,
	) -> Result<bool, MatchError> {
		if candidate == name {
			return Ok(false);
		}
		if self.skip_stale && players.try_get(candidate)?.is_none() {
			return Ok(false);
		}
		Ok(true)
	}
}
