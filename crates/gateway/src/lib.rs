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

//! FightClub Gateway Service
//!
//! HTTP front end for the FightClub engine. Players register, spend points,
//! buy catalog items and enter wagered battles. Item prices come from an
//! external catalog fetched out of band; the response is fed back to the
//! engine by the callback dispatcher.

pub mod config;
pub mod dispatcher;
pub mod handlers;
pub mod logging;
pub mod oracle;
pub mod routes;
pub mod server;

pub use server::{GatewayServer, GatewayState};
