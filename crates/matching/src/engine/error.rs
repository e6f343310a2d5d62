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

use fightclub_settlement::{PlayerError, PurchaseError, SettlementError};
use thiserror::Error;

use crate::battle::BattleError;
use crate::matcher::MatchError;

/// Error types for engine operations
#[derive(Debug, Error)]
pub enum EngineError {
	#[error(transparent)]
	Player(#[from] PlayerError),
	#[error(transparent)]
	Match(#[from] MatchError),
	#[error(transparent)]
	Battle(#[from] BattleError),
	#[error(transparent)]
	Purchase(#[from] PurchaseError),
}

/// Caller-facing failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	AlreadyExists,
	NotFound,
	InvalidName,
	AlreadyOwned,
	InsufficientBalance,
	InsufficientFunds,
	InsufficientPoints,
	NoPlayers,
	NoOpponents,
	OpponentNotFound,
	Unauthorized,
	RequestFailed,
	DuplicateCallback,
	InvalidPayload,
	Internal,
}

impl EngineError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			EngineError::Player(e) => player_kind(e),
			EngineError::Match(e) => match e {
				MatchError::NoPlayers => ErrorKind::NoPlayers,
				MatchError::NoOpponents(_) => ErrorKind::NoOpponents,
				MatchError::OpponentNotFound(_) => ErrorKind::OpponentNotFound,
				MatchError::Player(e) => player_kind(e),
			},
			EngineError::Battle(e) => match e {
				BattleError::OpponentNotFound(_) => ErrorKind::OpponentNotFound,
				BattleError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
				BattleError::Player(e) => player_kind(e),
				BattleError::Settlement(e) => match e {
					SettlementError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
					SettlementError::BalanceOverflow(_) => ErrorKind::Internal,
					SettlementError::Player(e) => player_kind(e),
				},
			},
			EngineError::Purchase(e) => match e {
				PurchaseError::AlreadyOwned { .. } => ErrorKind::AlreadyOwned,
				PurchaseError::Unauthorized(_) => ErrorKind::Unauthorized,
				PurchaseError::RequestFailed { .. } => ErrorKind::RequestFailed,
				PurchaseError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
				PurchaseError::DuplicateCallback(_) => ErrorKind::DuplicateCallback,
				PurchaseError::Catalog(_) => ErrorKind::InvalidPayload,
				PurchaseError::Oracle(_) => ErrorKind::RequestFailed,
				PurchaseError::Player(e) => player_kind(e),
			},
		}
	}
}

fn player_kind(error: &PlayerError) -> ErrorKind {
	match error {
		PlayerError::AlreadyExists(_) => ErrorKind::AlreadyExists,
		PlayerError::NotFound(_) => ErrorKind::NotFound,
		PlayerError::InvalidName(_) => ErrorKind::InvalidName,
		PlayerError::InsufficientPoints { .. } => ErrorKind::InsufficientPoints,
		PlayerError::CatalogUnset | PlayerError::Store(_) => ErrorKind::Internal,
	}
}
