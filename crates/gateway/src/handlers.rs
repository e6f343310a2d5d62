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

use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use fightclub_matching::{EngineError, ErrorKind};
use fightclub_sdk::types::{
	BalanceResponse, BattleRequest, BattleResponse, BuyItemRequest, BuyItemResponse,
	DistributePointsRequest, ItemsResponse, PurchaseStatus, RegisterPlayerRequest,
};
use thiserror::Error;

use crate::server::GatewayState;

/// Error types for gateway operations
#[derive(Debug, Error)]
pub enum GatewayError {
	#[error(transparent)]
	Engine(#[from] EngineError),
}

impl GatewayError {
	fn kind(&self) -> ErrorKind {
		match self {
			GatewayError::Engine(e) => e.kind(),
		}
	}
}

fn status_for(kind: ErrorKind) -> StatusCode {
	match kind {
		ErrorKind::NotFound => StatusCode::NOT_FOUND,
		ErrorKind::AlreadyExists | ErrorKind::AlreadyOwned | ErrorKind::DuplicateCallback => {
			StatusCode::CONFLICT
		}
		ErrorKind::InvalidName => StatusCode::BAD_REQUEST,
		ErrorKind::InsufficientBalance
		| ErrorKind::InsufficientFunds
		| ErrorKind::InsufficientPoints => StatusCode::UNPROCESSABLE_ENTITY,
		ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
		ErrorKind::RequestFailed | ErrorKind::InvalidPayload => StatusCode::BAD_GATEWAY,
		ErrorKind::NoPlayers | ErrorKind::NoOpponents | ErrorKind::OpponentNotFound => {
			StatusCode::SERVICE_UNAVAILABLE
		}
		ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
	}
}

impl actix_web::ResponseError for GatewayError {
	fn status_code(&self) -> StatusCode {
		status_for(self.kind())
	}

	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code()).json(serde_json::json!({
			"error": self.to_string(),
			"kind": format!("{:?}", self.kind()),
		}))
	}
}

/// Health check endpoint
pub async fn health() -> impl Responder {
	HttpResponse::Ok().json(serde_json::json!({
		"status": "ok",
		"service": "fightclub-gateway"
	}))
}

pub async fn register_player(
	state: web::Data<GatewayState>,
	request: web::Json<RegisterPlayerRequest>,
) -> Result<HttpResponse, GatewayError> {
	let player = state.engine.lock().await.register_player(&request.name)?;
	Ok(HttpResponse::Created().json(player))
}

pub async fn balance(
	state: web::Data<GatewayState>,
	path: web::Path<String>,
) -> Result<HttpResponse, GatewayError> {
	let name = path.into_inner();
	let balance = state.engine.lock().await.balance(&name)?;
	Ok(HttpResponse::Ok().json(BalanceResponse { name, balance }))
}

pub async fn items(
	state: web::Data<GatewayState>,
	path: web::Path<String>,
) -> Result<HttpResponse, GatewayError> {
	let name = path.into_inner();
	let items = state.engine.lock().await.items(&name)?;
	Ok(HttpResponse::Ok().json(ItemsResponse { name, items }))
}

pub async fn distribute_points(
	state: web::Data<GatewayState>,
	path: web::Path<String>,
	request: web::Json<DistributePointsRequest>,
) -> Result<HttpResponse, GatewayError> {
	let player = state.engine.lock().await.distribute_points(
		&path,
		request.speed,
		request.stamina,
		request.strength,
	)?;
	Ok(HttpResponse::Ok().json(player))
}

/// Start a purchase
///
/// Answers 202 once the catalog fetch is queued. The item shows up in the
/// inventory after the oracle's response has been applied.
pub async fn buy_item(
	state: web::Data<GatewayState>,
	path: web::Path<String>,
	request: web::Json<BuyItemRequest>,
) -> Result<HttpResponse, GatewayError> {
	let request_id = state.engine.lock().await.buy_item(&path, request.item_id)?;
	Ok(HttpResponse::Accepted().json(BuyItemResponse {
		request_id,
		status: PurchaseStatus::Requested,
	}))
}

pub async fn find_match(
	state: web::Data<GatewayState>,
	path: web::Path<String>,
	request: web::Json<BattleRequest>,
) -> Result<HttpResponse, GatewayError> {
	let outcome = state.engine.lock().await.find_match(&path, request.bet)?;
	Ok(HttpResponse::Ok().json(BattleResponse::from(outcome)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::{App, test};
	use fightclub_matching::{FightClub, MatchingConfig};
	use fightclub_sdk::types::{BattleResult, Player};
	use fightclub_settlement::MemoryOracle;
	use std::sync::Arc;
	use tokio::sync::Mutex;

	use crate::routes::configure_routes;

	fn create_state() -> (GatewayState, MemoryOracle) {
		let config = MatchingConfig {
			rng_seed: Some(7),
			..MatchingConfig::default()
		};
		let oracle = MemoryOracle::new(config.settlement.trusted_oracle());
		let engine = FightClub::with_memory_store(Box::new(oracle.clone()), &config).unwrap();
		let state = GatewayState {
			engine: Arc::new(Mutex::new(engine)),
		};
		(state, oracle)
	}

	#[::core::prelude::v1::test]
	fn test_status_mapping() {
		assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
		assert_eq!(status_for(ErrorKind::AlreadyOwned), StatusCode::CONFLICT);
		assert_eq!(
			status_for(ErrorKind::InsufficientPoints),
			StatusCode::UNPROCESSABLE_ENTITY
		);
		assert_eq!(status_for(ErrorKind::Unauthorized), StatusCode::FORBIDDEN);
		assert_eq!(status_for(ErrorKind::RequestFailed), StatusCode::BAD_GATEWAY);
		assert_eq!(
			status_for(ErrorKind::NoOpponents),
			StatusCode::SERVICE_UNAVAILABLE
		);
	}

	#[actix_web::test]
	async fn test_register_and_query() {
		let (state, _) = create_state();
		let app = test::init_service(
			App::new()
				.app_data(web::Data::new(state))
				.configure(configure_routes),
		)
		.await;

		let req = test::TestRequest::post()
			.uri("/api/v1/players")
			.set_json(RegisterPlayerRequest {
				name: "alice".to_string(),
			})
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::CREATED);
		let player: Player = test::read_body_json(resp).await;
		assert_eq!(player.balance, 20);

		let req = test::TestRequest::post()
			.uri("/api/v1/players")
			.set_json(RegisterPlayerRequest {
				name: "alice".to_string(),
			})
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::CONFLICT);

		let req = test::TestRequest::get()
			.uri("/api/v1/players/alice/balance")
			.to_request();
		let balance: BalanceResponse = test::call_and_read_body_json(&app, req).await;
		assert_eq!(balance.balance, 20);

		let req = test::TestRequest::get()
			.uri("/api/v1/players/ghost/items")
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	}

	#[actix_web::test]
	async fn test_points_and_battle() {
		let (state, _) = create_state();
		let app = test::init_service(
			App::new()
				.app_data(web::Data::new(state))
				.configure(configure_routes),
		)
		.await;

		for name in ["alice", "bob"] {
			let req = test::TestRequest::post()
				.uri("/api/v1/players")
				.set_json(RegisterPlayerRequest {
					name: name.to_string(),
				})
				.to_request();
			test::call_service(&app, req).await;
		}

		let req = test::TestRequest::post()
			.uri("/api/v1/players/alice/points")
			.set_json(DistributePointsRequest {
				speed: 6,
				..Default::default()
			})
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

		let req = test::TestRequest::post()
			.uri("/api/v1/players/alice/battles")
			.set_json(BattleRequest { bet: 5 })
			.to_request();
		let battle: BattleResponse = test::call_and_read_body_json(&app, req).await;
		assert_ne!(battle.result, BattleResult::Draw);
		assert_eq!(battle.opponent.as_deref(), Some("bob"));
		assert_eq!(battle.chance, Some(50));
	}

	#[actix_web::test]
	async fn test_buy_item_is_accepted() {
		let (state, oracle) = create_state();
		let app = test::init_service(
			App::new()
				.app_data(web::Data::new(state))
				.configure(configure_routes),
		)
		.await;

		let req = test::TestRequest::post()
			.uri("/api/v1/players")
			.set_json(RegisterPlayerRequest {
				name: "alice".to_string(),
			})
			.to_request();
		test::call_service(&app, req).await;

		let req = test::TestRequest::post()
			.uri("/api/v1/players/alice/items")
			.set_json(BuyItemRequest { item_id: 1 })
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::ACCEPTED);
		let body: BuyItemResponse = test::read_body_json(resp).await;
		assert_eq!(body.status, PurchaseStatus::Requested);
		assert_eq!(oracle.take_requests()[0].request_id, body.request_id);
	}
}
