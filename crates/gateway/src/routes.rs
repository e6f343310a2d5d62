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

use actix_web::web;

use crate::handlers;

/// Configure API routes for the gateway
///
/// - `/api/v1/players` registration and per-player operations
/// - `/health` health check
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
	cfg.service(
		web::scope("/api/v1/players")
			.route("", web::post().to(handlers::register_player))
			.route("/{name}/balance", web::get().to(handlers::balance))
			.route("/{name}/items", web::get().to(handlers::items))
			.route("/{name}/items", web::post().to(handlers::buy_item))
			.route("/{name}/points", web::post().to(handlers::distribute_points))
			.route("/{name}/battles", web::post().to(handlers::find_match)),
	)
	.route("/health", web::get().to(handlers::health));
}
