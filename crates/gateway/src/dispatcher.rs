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

use std::sync::Arc;

use fightclub_matching::{EngineError, FightClub};
use fightclub_settlement::{OracleId, OracleResponse, PurchaseReceipt};
use tokio::{
	sync::{Mutex, mpsc},
	task::JoinHandle,
};
use tracing::{info, warn};

/// Drains oracle responses and completes the matching purchases
///
/// Responses are applied one at a time under the engine lock, in arrival
/// order, with the oracle's identity as the caller.
pub struct CallbackDispatcher {
	engine: Arc<Mutex<FightClub>>,
	oracle_id: OracleId,
	responses: mpsc::Receiver<OracleResponse>,
}

impl CallbackDispatcher {
	pub fn new(
		engine: Arc<Mutex<FightClub>>,
		oracle_id: OracleId,
		responses: mpsc::Receiver<OracleResponse>,
	) -> Self {
		Self {
			engine,
			oracle_id,
			responses,
		}
	}

	/// Run until every sender of the queue is gone
	pub fn start(mut self) -> JoinHandle<()> {
		tokio::spawn(async move {
			info!(
				target: "server::dispatcher",
				"Callback dispatcher started for oracle {}",
				self.oracle_id
			);
			while let Some(response) = self.responses.recv().await {
				// Failures are final for the purchase; the player retries
				let _ = self.dispatch(response).await;
			}
			info!(target: "server::dispatcher", "Callback dispatcher stopped");
		})
	}

	/// Apply a single response
	pub async fn dispatch(
		&self,
		response: OracleResponse,
	) -> Result<PurchaseReceipt, EngineError> {
		let request_id = response.request_id;
		let mut engine = self.engine.lock().await;
		match engine.on_purchase_callback(&self.oracle_id, response) {
			Ok(receipt) => {
				info!(
					target: "server::dispatcher",
					"Purchase {} completed: {} bought item {} for {}",
					request_id, receipt.player, receipt.item_id, receipt.price
				);
				Ok(receipt)
			}
			Err(e) => {
				warn!(
					target: "server::dispatcher",
					"Purchase {} failed: {}",
					request_id, e
				);
				Err(e)
			}
		}
	}
}
