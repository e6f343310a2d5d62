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

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use fightclub_matching::FightClub;
use tokio::{runtime::Handle, sync::Mutex, sync::mpsc};
use tracing::info;

use crate::{
	config::GatewayRuntimeConfig, dispatcher::CallbackDispatcher, oracle::HttpOracle,
	routes::configure_routes,
};

/// Gateway server state
#[derive(Clone)]
pub struct GatewayState {
	pub engine: Arc<Mutex<FightClub>>,
}

/// Gateway server
pub struct GatewayServer {
	state: GatewayState,
	config: GatewayRuntimeConfig,
}

impl GatewayServer {
	/// Build the engine and start the callback dispatcher
	///
	/// Must be called from within a tokio runtime; oracle fetches are
	/// spawned onto it.
	pub fn new(config: GatewayRuntimeConfig) -> Result<Self> {
		let oracle_id = config.engine.settlement.trusted_oracle();
		let (responses_tx, responses_rx) = mpsc::channel(config.callback_queue_capacity);

		let oracle = HttpOracle::new(
			oracle_id.clone(),
			config.oracle_timeout,
			config.oracle_max_response_bytes,
			responses_tx,
			Handle::current(),
		)
		.context("Failed to create catalog oracle")?;

		let engine = FightClub::with_memory_store(Box::new(oracle), &config.engine)
			.context("Failed to create engine")?;
		let engine = Arc::new(Mutex::new(engine));

		CallbackDispatcher::new(engine.clone(), oracle_id, responses_rx).start();

		Ok(Self {
			state: GatewayState { engine },
			config,
		})
	}

	/// Serve HTTP until shutdown
	pub async fn serve(self) -> Result<()> {
		let state = web::Data::new(self.state);
		let max_body_bytes = self.config.max_body_bytes;
		let addr = self.config.bind_addr;

		info!(
			target: "server",
			"Gateway listening on {} with {} workers",
			addr, self.config.workers
		);

		HttpServer::new(move || {
			App::new()
				.app_data(state.clone())
				.app_data(web::JsonConfig::default().limit(max_body_bytes))
				.configure(configure_routes)
		})
		.workers(self.config.workers)
		.bind(addr)
		.with_context(|| format!("Failed to bind {}", addr))?
		.run()
		.await
		.context("HTTP server error")?;

		Ok(())
	}
}
