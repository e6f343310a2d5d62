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

//! End-to-end tests: the SDK client against a live gateway

use std::sync::Arc;

use actix_web::{App, HttpServer, dev::ServerHandle, web};
use fightclub_gateway::{
	GatewayState, dispatcher::CallbackDispatcher, routes::configure_routes,
};
use fightclub_matching::{FightClub, MatchingConfig};
use fightclub_sdk::{
	client::{Client, ClientError, SyncClient},
	types::{BattleResult, DistributePointsRequest, PurchaseStatus},
};
use fightclub_settlement::{MemoryOracle, ResponseCode};
use tokio::sync::{Mutex, mpsc};

struct TestGateway {
	base_url: String,
	handle: ServerHandle,
	engine: Arc<Mutex<FightClub>>,
	oracle: MemoryOracle,
}

/// Serve the gateway routes on an ephemeral local port
fn spawn_gateway() -> TestGateway {
	let config = MatchingConfig {
		rng_seed: Some(11),
		..MatchingConfig::default()
	};
	let oracle = MemoryOracle::new(config.settlement.trusted_oracle());
	let engine = FightClub::with_memory_store(Box::new(oracle.clone()), &config).unwrap();
	let engine = Arc::new(Mutex::new(engine));

	let state = web::Data::new(GatewayState {
		engine: engine.clone(),
	});
	let server = HttpServer::new(move || {
		App::new()
			.app_data(state.clone())
			.configure(configure_routes)
	})
	.workers(1)
	.disable_signals()
	.bind(("127.0.0.1", 0))
	.unwrap();

	let addr = server.addrs()[0];
	let server = server.run();
	let handle = server.handle();
	actix_rt::spawn(server);

	TestGateway {
		base_url: format!("http://{}", addr),
		handle,
		engine,
		oracle,
	}
}

#[actix_web::test]
async fn test_names_with_reserved_characters() {
	let gateway = spawn_gateway();
	let client = Client::new(&gateway.base_url).unwrap();

	for name in ["a?b/c", "joe smith", "#1"] {
		let player = client.register_player(name).await.unwrap();
		assert_eq!(player.name, name);

		let balance = client.balance(name).await.unwrap();
		assert_eq!(balance.name, name);
		assert_eq!(balance.balance, 20);

		let items = client.items(name).await.unwrap();
		assert_eq!(items.name, name);
		assert!(items.items.is_empty());
	}

	let player = client
		.distribute_points(
			"a?b/c",
			DistributePointsRequest {
				speed: 3,
				strength: 2,
				..Default::default()
			},
		)
		.await
		.unwrap();
	assert_eq!(player.name, "a?b/c");
	assert_eq!(player.speed, 3);
	assert_eq!(player.strength, 2);
	assert_eq!(player.points, 0);

	// Only the addressed player spent points
	let other = client
		.distribute_points("joe smith", DistributePointsRequest::default())
		.await
		.unwrap();
	assert_eq!(other.points, 5);

	gateway.handle.stop(true).await;
}

#[actix_web::test]
async fn test_battle_and_purchase_round_trip() {
	let gateway = spawn_gateway();
	let client = Client::new(&gateway.base_url).unwrap();
	assert!(client.health_check().await.unwrap());

	client.register_player("a?b").await.unwrap();
	client.register_player("joe smith").await.unwrap();

	let battle = client.find_match("a?b", 5).await.unwrap();
	assert_ne!(battle.result, BattleResult::Draw);
	assert_eq!(battle.opponent.as_deref(), Some("joe smith"));
	let total = client.balance("a?b").await.unwrap().balance
		+ client.balance("joe smith").await.unwrap().balance;
	assert_eq!(total, 40);

	let before = client.balance("a?b").await.unwrap().balance;
	let accepted = client.buy_item("a?b", 2).await.unwrap();
	assert_eq!(accepted.status, PurchaseStatus::Requested);

	let request = gateway.oracle.take_requests().remove(0);
	assert_eq!(request.request_id, accepted.request_id);
	assert_eq!(request.user_data, "a?b");

	let oracle_id = gateway.engine.lock().await.trusted_oracle();
	let (_tx, rx) = mpsc::channel(1);
	let dispatcher = CallbackDispatcher::new(gateway.engine.clone(), oracle_id, rx);
	let response = request.respond(ResponseCode::Success, br#"[{"id":2,"price":3}]"#.to_vec());
	dispatcher.dispatch(response).await.unwrap();

	let items = client.items("a?b").await.unwrap();
	assert_eq!(items.items, vec![2]);
	assert_eq!(client.balance("a?b").await.unwrap().balance, before - 3);

	gateway.handle.stop(true).await;
}

#[actix_web::test]
async fn test_engine_errors_reach_the_client() {
	let gateway = spawn_gateway();
	let client = Client::new(&gateway.base_url).unwrap();

	client.register_player("alice").await.unwrap();

	match client.register_player("alice").await {
		Err(ClientError::Server(message)) => assert!(message.starts_with("409")),
		other => panic!("expected conflict, got {:?}", other),
	}
	match client.balance("ghost").await {
		Err(ClientError::Server(message)) => assert!(message.starts_with("404")),
		other => panic!("expected not found, got {:?}", other),
	}
	// Looks like a query string, but is sent as part of the name
	match client.items("alice?x=1").await {
		Err(ClientError::Server(message)) => assert!(message.starts_with("404")),
		other => panic!("expected not found, got {:?}", other),
	}

	gateway.handle.stop(true).await;
}

#[actix_web::test]
async fn test_sync_client_against_gateway() {
	let gateway = spawn_gateway();
	let base_url = gateway.base_url.clone();

	let balance = tokio::task::spawn_blocking(move || {
		let client = SyncClient::new(base_url).unwrap();
		client.register_player("x/y").unwrap();
		client.balance("x/y").unwrap()
	})
	.await
	.unwrap();
	assert_eq!(balance.name, "x/y");
	assert_eq!(balance.balance, 20);

	gateway.handle.stop(true).await;
}
