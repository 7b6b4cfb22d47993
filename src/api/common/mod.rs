//
//  workflow-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared pieces used by every resource module:
//!
//! - [`ResourceId`] - identifiers the platform returns as integers or strings
//! - [`find_last_named`] - the by-name scan over a listing response
//! - [`encode_component`] / [`encode_query`] - query-string formatting
//!
//! # Notes
//!
//! - Listing endpoints wrap their entries in a `data` array
//! - The `filter` query parameter is only a hint; matches are re-checked by
//!   exact name equality on the client

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a platform entity.
///
/// The API mostly returns integer ids but accepts and sometimes returns
/// strings, so both forms deserialize.
///
/// # Example
///
/// ```rust
/// use workflow_api::api::common::ResourceId;
///
/// let id: ResourceId = serde_json::from_str("42").unwrap();
/// assert_eq!(id.to_string(), "42");
/// assert_eq!(ResourceId::from("abc").to_string(), "abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Str(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Int(id) => write!(f, "{}", id),
            ResourceId::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Int(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Str(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId::Str(id)
    }
}

/// Scans the `data` array of a listing response for entries named `name`.
///
/// Every entry is visited and the **last** exact match wins. Deployed
/// workflows rely on this when duplicate names exist, so it must not become
/// first-match. Returns `None` when the response has no `data` array, nothing
/// matches, or the match does not deserialize into `T`.
pub fn find_last_named<T: DeserializeOwned>(listing: &Value, name: &str) -> Option<T> {
    let entries = listing.get("data")?.as_array()?;

    let mut found = None;
    for entry in entries {
        if entry.get("name").and_then(Value::as_str) == Some(name) {
            found = Some(entry);
        }
    }

    found.and_then(|entry| serde_json::from_value(entry.clone()).ok())
}

/// Percent-encodes a single query value (`application/x-www-form-urlencoded`,
/// spaces become `+`).
pub fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Joins `name=value` pairs with `&`, encoding each value but not the names.
///
/// An empty iterator yields an empty string.
///
/// # Example
///
/// ```rust
/// use workflow_api::api::common::encode_query;
///
/// let query = encode_query([("pmql", "data.status = \"open\""), ("per_page", "10")]);
/// assert_eq!(query, "pmql=data.status+%3D+%22open%22&per_page=10");
/// ```
pub fn encode_query<I, K, V>(parameters: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    parameters
        .into_iter()
        .map(|(name, value)| format!("{}={}", name.as_ref(), encode_component(value.as_ref())))
        .collect::<Vec<_>>()
        .join("&")
}
