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

//! Asynchronous catalog oracle contract
//!
//! An oracle accepts a fetch request and later delivers exactly one
//! [`OracleResponse`] for it, asserting its own [`OracleId`] so the
//! callback handler can authenticate the caller.

use std::{
	fmt,
	sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Smallest fee budget an oracle accepts for a single response
pub const MINIMUM_RESPONSE_GAS: u64 = 10_000_000;

/// Callback the purchase flow registers with every catalog fetch
pub const PURCHASE_CALLBACK: &str = "cbBuyItem";

/// Error types for oracle requests
#[derive(Debug, Error)]
pub enum OracleError {
	#[error("Oracle rejected request: {0}")]
	Rejected(String),
	#[error("Oracle unavailable: {0}")]
	Unavailable(String),
}

/// Identity asserted by a callback's caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OracleId(String);

impl OracleId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for OracleId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Status reported with an oracle response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCode {
	Success,
	ProtocolNotSupported,
	ConsensusUnreachable,
	NotFound,
	Timeout,
	Forbidden,
	ResponseTooLarge,
	InsufficientFunds,
	ContentTypeNotSupported,
	Error,
}

impl ResponseCode {
	pub fn as_u8(&self) -> u8 {
		match self {
			ResponseCode::Success => 0x00,
			ResponseCode::ProtocolNotSupported => 0x10,
			ResponseCode::ConsensusUnreachable => 0x12,
			ResponseCode::NotFound => 0x14,
			ResponseCode::Timeout => 0x16,
			ResponseCode::Forbidden => 0x18,
			ResponseCode::ResponseTooLarge => 0x1a,
			ResponseCode::InsufficientFunds => 0x1c,
			ResponseCode::ContentTypeNotSupported => 0x1f,
			ResponseCode::Error => 0xff,
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, ResponseCode::Success)
	}
}

impl fmt::Display for ResponseCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?} ({:#04x})", self, self.as_u8())
	}
}

/// A fetch the oracle should perform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleRequest {
	/// Correlates the eventual response with this request
	pub request_id: Uuid,
	pub url: String,
	pub filter: String,
	/// Callback the response is addressed to
	pub callback: String,
	/// Opaque data returned verbatim in the response
	pub user_data: String,
	pub gas_budget: u64,
}

impl OracleRequest {
	/// Build the response an oracle delivers for this request
	pub fn respond(&self, code: ResponseCode, result: Vec<u8>) -> OracleResponse {
		OracleResponse {
			request_id: self.request_id,
			url: self.url.clone(),
			user_data: self.user_data.clone(),
			code,
			result,
		}
	}
}

/// A delivered fetch result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleResponse {
	pub request_id: Uuid,
	pub url: String,
	pub user_data: String,
	pub code: ResponseCode,
	pub result: Vec<u8>,
}

/// Asynchronous fetch service used by the purchase flow
pub trait PurchaseOracle: Send {
	/// Identity this oracle asserts when calling back
	fn id(&self) -> OracleId;

	/// Queue a fetch; the response is delivered later, out of band
	fn request(&mut self, request: OracleRequest) -> Result<(), OracleError>;
}

/// Oracle that only records requests
///
/// Clones share the same request log, so a test can keep one handle while
/// the engine owns another and deliver responses by hand.
#[derive(Debug, Clone)]
pub struct MemoryOracle {
	id: OracleId,
	requests: Arc<Mutex<Vec<OracleRequest>>>,
}

impl MemoryOracle {
	pub fn new(id: OracleId) -> Self {
		Self {
			id,
			requests: Arc::new(Mutex::new(Vec::new())),
		}
	}

	/// Remove and return every request recorded so far
	pub fn take_requests(&self) -> Vec<OracleRequest> {
		let mut requests = self.requests.lock().unwrap_or_else(|e| e.into_inner());
		requests.drain(..).collect()
	}

	pub fn pending(&self) -> usize {
		self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
	}
}

impl PurchaseOracle for MemoryOracle {
	fn id(&self) -> OracleId {
		self.id.clone()
	}

	fn request(&mut self, request: OracleRequest) -> Result<(), OracleError> {
		let mut requests = self
			.requests
			.lock()
			.map_err(|e| OracleError::Unavailable(e.to_string()))?;
		requests.push(request);
		Ok(())
	}
}
