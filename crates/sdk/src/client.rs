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

use crate::types::{
	BalanceResponse, BattleRequest, BattleResponse, BuyItemRequest, BuyItemResponse,
	DistributePointsRequest, ItemsResponse, Player, RegisterPlayerRequest,
};
use reqwest::{Client as ReqwestClient, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Network error: {0}")]
	Network(String),
	#[error("Serialization error: {0}")]
	Serialization(String),
	#[error("Server error: {0}")]
	Server(String),
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
	#[error("Invalid URL: {0}")]
	InvalidUrl(String),
}

/// Client for interacting with the FightClub gateway
///
/// This is an async client interface using reqwest for HTTP communication.
pub struct Client {
	base_url: Url,
	client: ReqwestClient,
}

impl Client {
	/// Create a new client with the given base URL
	pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
		Self::with_config(base_url, Duration::from_secs(30))
	}

	/// Create a new client with custom configuration
	pub fn with_config(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

		let base_url = base_url.into();
		let base_url = Url::parse(&base_url)
			.map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
		if base_url.cannot_be_a_base() {
			return Err(ClientError::InvalidUrl(format!("{} cannot be a base", base_url)));
		}

		Ok(Self { base_url, client })
	}

	/// Register a new player with default attributes
	pub async fn register_player(&self, name: &str) -> Result<Player, ClientError> {
		let url = self.endpoint(&["api", "v1", "players"])?;
		let request = RegisterPlayerRequest {
			name: name.to_string(),
		};

		let response = self
			.client
			.post(url)
			.json(&request)
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		Self::decode(response).await
	}

	/// Get a player's balance
	pub async fn balance(&self, name: &str) -> Result<BalanceResponse, ClientError> {
		let url = self.endpoint(&["api", "v1", "players", name, "balance"])?;

		let response = self
			.client
			.get(url)
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		Self::decode(response).await
	}

	/// Get a player's purchased items
	pub async fn items(&self, name: &str) -> Result<ItemsResponse, ClientError> {
		let url = self.endpoint(&["api", "v1", "players", name, "items"])?;

		let response = self
			.client
			.get(url)
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		Self::decode(response).await
	}

	/// Spend skill points on attributes
	pub async fn distribute_points(
		&self,
		name: &str,
		request: DistributePointsRequest,
	) -> Result<Player, ClientError> {
		let url = self.endpoint(&["api", "v1", "players", name, "points"])?;

		let response = self
			.client
			.post(url)
			.json(&request)
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		Self::decode(response).await
	}

	/// Initiate an item purchase
	///
	/// The gateway only issues the catalog fetch here. The item shows up in
	/// `items` once the oracle has called back.
	pub async fn buy_item(&self, name: &str, item_id: u64) -> Result<BuyItemResponse, ClientError> {
		let url = self.endpoint(&["api", "v1", "players", name, "items"])?;

		let response = self
			.client
			.post(url)
			.json(&BuyItemRequest { item_id })
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		Self::decode(response).await
	}

	/// Find an opponent and fight a wagered battle
	pub async fn find_match(&self, name: &str, bet: u64) -> Result<BattleResponse, ClientError> {
		let url = self.endpoint(&["api", "v1", "players", name, "battles"])?;

		let response = self
			.client
			.post(url)
			.json(&BattleRequest { bet })
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		Self::decode(response).await
	}

	/// Check gateway health
	pub async fn health_check(&self) -> Result<bool, ClientError> {
		let url = self.endpoint(&["health"])?;

		let response = self
			.client
			.get(url)
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		Ok(response.status().is_success())
	}

	/// Append path segments to the base URL, percent-encoding each one
	fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
		let mut url = self.base_url.clone();
		url.path_segments_mut()
			.map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
			.pop_if_empty()
			.extend(segments);
		Ok(url)
	}

	async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
		if !response.status().is_success() {
			let status = response.status();
			let error_text = response
				.text()
				.await
				.unwrap_or_else(|_| format!("HTTP {}", status));
			return Err(ClientError::Server(format!("{}: {}", status, error_text)));
		}

		response
			.json()
			.await
			.map_err(|e| ClientError::Serialization(format!("Failed to parse response: {}", e)))
	}
}

/// Synchronous client wrapper (for compatibility)
///
/// This wraps the async client and runs it in a tokio runtime.
/// For new code, prefer using the async Client directly.
pub struct SyncClient {
	client: Client,
	runtime: tokio::runtime::Runtime,
}

impl SyncClient {
	/// Create a new synchronous client
	pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
		let runtime = tokio::runtime::Runtime::new()
			.map_err(|e| anyhow::anyhow!("Failed to create tokio runtime: {}", e))?;
		Ok(Self {
			client: Client::new(base_url)?,
			runtime,
		})
	}

	/// Register a new player (synchronous)
	pub fn register_player(&self, name: &str) -> Result<Player, ClientError> {
		self.runtime.block_on(self.client.register_player(name))
	}

	/// Get a player's balance (synchronous)
	pub fn balance(&self, name: &str) -> Result<BalanceResponse, ClientError> {
		self.runtime.block_on(self.client.balance(name))
	}

	/// Get a player's items (synchronous)
	pub fn items(&self, name: &str) -> Result<ItemsResponse, ClientError> {
		self.runtime.block_on(self.client.items(name))
	}

	/// Spend skill points (synchronous)
	pub fn distribute_points(
		&self,
		name: &str,
		request: DistributePointsRequest,
	) -> Result<Player, ClientError> {
		self.runtime
			.block_on(self.client.distribute_points(name, request))
	}

	/// Initiate a purchase (synchronous)
	pub fn buy_item(&self, name: &str, item_id: u64) -> Result<BuyItemResponse, ClientError> {
		self.runtime.block_on(self.client.buy_item(name, item_id))
	}

	/// Fight a wagered battle (synchronous)
	pub fn find_match(&self, name: &str, bet: u64) -> Result<BattleResponse, ClientError> {
		self.runtime.block_on(self.client.find_match(name, bet))
	}
}
