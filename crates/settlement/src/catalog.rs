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

//! Catalog addressing and payload decoding
//!
//! Catalog entries are addressed with a small JSON-path subset
//! (`$.store.item[3]`). The oracle answers with the list of matches, so a
//! successful lookup arrives as a one-element JSON array.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error types for catalog lookups
#[derive(Debug, Error)]
pub enum CatalogError {
	#[error("Malformed catalog payload: {0}")]
	Malformed(String),
	#[error("Invalid filter expression: {0}")]
	InvalidFilter(String),
}

/// Priced catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
	pub id: u64,
	pub price: u64,
}

/// Filter expression addressing catalog entry `item_id`
pub fn item_filter(item_id: u64) -> String {
	format!("$.store.item[{}]", item_id)
}

/// Decode an oracle payload of the form `[{"id": .., "price": ..}]`
///
/// The surrounding bracket characters are stripped and the remainder is
/// decoded as a single object.
pub fn parse_catalog_entry(payload: &[u8]) -> Result<CatalogEntry, CatalogError> {
	if payload.len() < 2 {
		return Err(CatalogError::Malformed(format!(
			"payload too short ({} bytes)",
			payload.len()
		)));
	}
	let inner = &payload[1..payload.len() - 1];

	serde_json::from_slice(inner).map_err(|e| CatalogError::Malformed(e.to_string()))
}

#[derive(Debug, PartialEq)]
enum Segment<'a> {
	Field(&'a str),
	Index(usize),
}

fn parse_filter(filter: &str) -> Result<Vec<Segment<'_>>, CatalogError> {
	let invalid = |reason: &str| CatalogError::InvalidFilter(format!("{}: {}", reason, filter));

	let mut rest = filter
		.strip_prefix('$')
		.ok_or_else(|| invalid("missing root"))?;
	let mut segments = Vec::new();

	while !rest.is_empty() {
		if let Some(tail) = rest.strip_prefix('.') {
			let end = tail.find(['.', '[']).unwrap_or(tail.len());
			if end == 0 {
				return Err(invalid("empty field name"));
			}
			segments.push(Segment::Field(&tail[..end]));
			rest = &tail[end..];
		} else if let Some(tail) = rest.strip_prefix('[') {
			let end = tail.find(']').ok_or_else(|| invalid("unclosed index"))?;
			let index = tail[..end]
				.parse()
				.map_err(|_| invalid("index is not a non-negative integer"))?;
			segments.push(Segment::Index(index));
			rest = &tail[end + 1..];
		} else {
			return Err(invalid("unexpected character"));
		}
	}

	Ok(segments)
}

/// Evaluate `filter` against `document`
///
/// Returns the array of matches: one element when the path resolves,
/// empty otherwise.
pub fn select(document: &Value, filter: &str) -> Result<Value, CatalogError> {
	let mut current = document;
	for segment in parse_filter(filter)? {
		let next = match segment {
			Segment::Field(name) => current.get(name),
			Segment::Index(index) => current.get(index),
		};
		match next {
			Some(value) => current = value,
			None => return Ok(Value::Array(Vec::new())),
		}
	}

	Ok(Value::Array(vec![current.clone()]))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_item_filter() {
		assert_eq!(item_filter(0), "$.store.item[0]");
		assert_eq!(item_filter(12), "$.store.item[12]");
	}

	#[test]
	fn test_parse_wrapped_entry() {
		let entry = parse_catalog_entry(br#"[{"id":3,"price":7,"name":"sword"}]"#).unwrap();
		assert_eq!(entry, CatalogEntry { id: 3, price: 7 });
	}

	#[test]
	fn test_parse_rejects_bad_payloads() {
		assert!(parse_catalog_entry(b"").is_err());
		assert!(parse_catalog_entry(b"[]").is_err());
		assert!(parse_catalog_entry(br#"[{"id":3}]"#).is_err());
		assert!(parse_catalog_entry(br#"[{"id":3,"price":-1}]"#).is_err());
	}

	#[test]
	fn test_select_resolves_entry() {
		let document = json!({
			"store": {
				"item": [
					{"id": 0, "price": 5},
					{"id": 1, "price": 9}
				]
			}
		});

		let selected = select(&document, &item_filter(1)).unwrap();
		assert_eq!(selected, json!([{"id": 1, "price": 9}]));

		let payload = serde_json::to_vec(&selected).unwrap();
		assert_eq!(
			parse_catalog_entry(&payload).unwrap(),
			CatalogEntry { id: 1, price: 9 }
		);
	}

	#[test]
	fn test_select_missing_path() {
		let document = json!({"store": {"item": []}});
		assert_eq!(select(&document, "$.store.item[4]").unwrap(), json!([]));
		assert_eq!(select(&document, "$.shop").unwrap(), json!([]));
	}

	#[test]
	fn test_invalid_filters() {
		let document = json!({});
		assert!(select(&document, "store.item[0]").is_err());
		assert!(select(&document, "$.store..item").is_err());
		assert!(select(&document, "$.store.item[x]").is_err());
		assert!(select(&document, "$.store.item[1").is_err());
	}
}
