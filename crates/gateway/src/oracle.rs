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

use std::time::Duration;

use fightclub_settlement::{
	OracleError, OracleId, OracleRequest, OracleResponse, PurchaseOracle, ResponseCode,
	catalog::select, oracle::MINIMUM_RESPONSE_GAS,
};
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use serde_json::Value;
use tokio::{runtime::Handle, sync::mpsc};
use tracing::{debug, warn};

/// Catalog oracle backed by real HTTP fetches
///
/// Each request is fetched on a spawned task. The filtered result is pushed
/// onto the callback queue, where the dispatcher hands it back to the engine.
pub struct HttpOracle {
	id: OracleId,
	client: Client,
	responses: mpsc::Sender<OracleResponse>,
	runtime: Handle,
	max_response_bytes: usize,
}

impl HttpOracle {
	pub fn new(
		id: OracleId,
		timeout: Duration,
		max_response_bytes: usize,
		responses: mpsc::Sender<OracleResponse>,
		runtime: Handle,
	) -> Result<Self, OracleError> {
		let client = Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| OracleError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

		Ok(Self {
			id,
			client,
			responses,
			runtime,
			max_response_bytes,
		})
	}
}

impl PurchaseOracle for HttpOracle {
	fn id(&self) -> OracleId {
		self.id.clone()
	}

	fn request(&mut self, request: OracleRequest) -> Result<(), OracleError> {
		if request.gas_budget < MINIMUM_RESPONSE_GAS {
			return Err(OracleError::Rejected(format!(
				"gas budget {} below minimum {}",
				request.gas_budget, MINIMUM_RESPONSE_GAS
			)));
		}
		if self.responses.is_closed() {
			return Err(OracleError::Unavailable("callback queue closed".to_string()));
		}

		let client = self.client.clone();
		let responses = self.responses.clone();
		let max_response_bytes = self.max_response_bytes;
		self.runtime.spawn(async move {
			let response = fetch(&client, &request, max_response_bytes).await;
			debug!(
				target: "server::oracle",
				"Fetched {} for request {}: {}",
				response.url, response.request_id, response.code
			);
			if responses.send(response).await.is_err() {
				warn!(
					target: "server::oracle",
					"Callback queue closed; dropping response for request {}",
					request.request_id
				);
			}
		});

		Ok(())
	}
}

/// Fetch `request.url`, apply its filter and build the oracle response
///
/// Failures never escape: they become a non-success response code with an
/// empty result, the way the callback expects them.
pub async fn fetch(
	client: &Client,
	request: &OracleRequest,
	max_response_bytes: usize,
) -> OracleResponse {
	let document = match fetch_document(client, &request.url, max_response_bytes).await {
		Ok(document) => document,
		Err(code) => return request.respond(code, Vec::new()),
	};

	let filtered = select(&document, &request.filter)
		.map_err(|e| e.to_string())
		.and_then(|value| serde_json::to_vec(&value).map_err(|e| e.to_string()));
	match filtered {
		Ok(result) => request.respond(ResponseCode::Success, result),
		Err(e) => {
			warn!(target: "server::oracle", "Filter {} failed: {}", request.filter, e);
			request.respond(ResponseCode::Error, Vec::new())
		}
	}
}

async fn fetch_document(
	client: &Client,
	url: &str,
	max_response_bytes: usize,
) -> Result<Value, ResponseCode> {
	if !(url.starts_with("https://") || url.starts_with("http://")) {
		return Err(ResponseCode::ProtocolNotSupported);
	}

	let response = client.get(url).send().await.map_err(|e| {
		warn!(target: "server::oracle", "Fetch of {} failed: {}", url, e);
		if e.is_timeout() {
			ResponseCode::Timeout
		} else {
			ResponseCode::Error
		}
	})?;

	let status = response.status();
	if !status.is_success() {
		return Err(status_code(status));
	}
	if let Some(content_type) = response.headers().get(CONTENT_TYPE)
		&& !accepted_content_type(content_type.to_str().unwrap_or_default())
	{
		return Err(ResponseCode::ContentTypeNotSupported);
	}
	if response
		.content_length()
		.is_some_and(|len| len > max_response_bytes as u64)
	{
		return Err(ResponseCode::ResponseTooLarge);
	}

	let body = response.bytes().await.map_err(|e| {
		if e.is_timeout() {
			ResponseCode::Timeout
		} else {
			ResponseCode::Error
		}
	})?;
	if body.len() > max_response_bytes {
		return Err(ResponseCode::ResponseTooLarge);
	}

	serde_json::from_slice(&body).map_err(|_| ResponseCode::Error)
}

fn status_code(status: StatusCode) -> ResponseCode {
	match status {
		StatusCode::NOT_FOUND => ResponseCode::NotFound,
		StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => ResponseCode::Forbidden,
		StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ResponseCode::Timeout,
		StatusCode::PAYLOAD_TOO_LARGE => ResponseCode::ResponseTooLarge,
		StatusCode::UNSUPPORTED_MEDIA_TYPE => ResponseCode::ContentTypeNotSupported,
		_ => ResponseCode::Error,
	}
}

// Raw files are often served as text/plain
fn accepted_content_type(content_type: &str) -> bool {
	let mime = content_type.split(';').next().unwrap_or_default().trim();
	mime.ends_with("json") || mime.starts_with("text/")
}

#[cfg(test)]
mod tests {
	use super::*;
	use fightclub_settlement::item_filter;
	use uuid::Uuid;

	fn create_request(url: &str, gas_budget: u64) -> OracleRequest {
		OracleRequest {
			request_id: Uuid::new_v4(),
			url: url.to_string(),
			filter: item_filter(0),
			callback: "cbBuyItem".to_string(),
			user_data: "alice".to_string(),
			gas_budget,
		}
	}

	fn create_oracle(responses: mpsc::Sender<OracleResponse>) -> HttpOracle {
		HttpOracle::new(
			OracleId::new("oracle"),
			Duration::from_millis(500),
			1024,
			responses,
			Handle::current(),
		)
		.unwrap()
	}

	#[test]
	fn test_status_mapping() {
		assert_eq!(status_code(StatusCode::NOT_FOUND), ResponseCode::NotFound);
		assert_eq!(status_code(StatusCode::FORBIDDEN), ResponseCode::Forbidden);
		assert_eq!(status_code(StatusCode::GATEWAY_TIMEOUT), ResponseCode::Timeout);
		assert_eq!(status_code(StatusCode::BAD_GATEWAY), ResponseCode::Error);
	}

	#[test]
	fn test_content_types() {
		assert!(accepted_content_type("application/json"));
		assert!(accepted_content_type("application/json; charset=utf-8"));
		assert!(accepted_content_type("text/plain; charset=utf-8"));
		assert!(!accepted_content_type("image/png"));
	}

	#[tokio::test]
	async fn test_unsupported_scheme() {
		let client = Client::new();
		let request = create_request("ftp://example.invalid/data.json", MINIMUM_RESPONSE_GAS);
		let response = fetch(&client, &request, 1024).await;
		assert_eq!(response.code, ResponseCode::ProtocolNotSupported);
		assert!(response.result.is_empty());
		assert_eq!(response.user_data, "alice");
	}

	#[tokio::test]
	async fn test_rejects_low_gas_budget() {
		let (tx, _rx) = mpsc::channel(1);
		let mut oracle = create_oracle(tx);
		let request = create_request("https://example.invalid", MINIMUM_RESPONSE_GAS - 1);
		assert!(matches!(oracle.request(request), Err(OracleError::Rejected(_))));
	}

	#[tokio::test]
	async fn test_closed_queue_is_unavailable() {
		let (tx, rx) = mpsc::channel(1);
		drop(rx);
		let mut oracle = create_oracle(tx);
		let request = create_request("https://example.invalid", MINIMUM_RESPONSE_GAS);
		assert!(matches!(
			oracle.request(request),
			Err(OracleError::Unavailable(_))
		));
	}

	#[tokio::test]
	async fn test_failed_fetch_is_delivered() {
		let (tx, mut rx) = mpsc::channel(1);
		let mut oracle = create_oracle(tx);
		let request = create_request("ftp://example.invalid", MINIMUM_RESPONSE_GAS);
		let request_id = request.request_id;
		oracle.request(request).unwrap();

		let response = rx.recv().await.unwrap();
		assert_eq!(response.request_id, request_id);
		assert_eq!(response.code, ResponseCode::ProtocolNotSupported);
	}
}
