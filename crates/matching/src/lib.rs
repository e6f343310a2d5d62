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

//! FightClub Matching Engine
//!
//! This crate provides the game core: matchmaking against the roster,
//! probabilistic 1v1 battles with wagering, and the `FightClub` facade
//! exposing every public operation as one atomic call.
//!
//! Architecture:
//! - Single-threaded, run-to-completion: each public call finishes before
//!   the next one starts
//! - All persistent state lives in the settlement crate's `PlayerStore`
//! - Randomness and the catalog oracle are injected collaborators

pub mod battle;
pub mod config;
pub mod engine;
pub mod matcher;
pub mod rng;
pub mod types;

pub use battle::{BattleEngine, BattleError, resolve, win_chance};
pub use config::MatchingConfig;
pub use engine::{EngineError, ErrorKind, FightClub};
pub use matcher::{MatchEngine, MatchError};
pub use rng::{RandomProvider, ScriptedRandom, StdRandom};
pub use types::*;
