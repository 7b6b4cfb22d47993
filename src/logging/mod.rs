//
//  workflow-api
//  logging/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Collection Log Sink
//!
//! Workflow scripts record what they did as records in a dedicated
//! collection, so operators can query runs from the platform UI. This module
//! holds the log record types; [`logger`] holds the writer.
//!
//! ## Levels
//!
//! | Level | Rank |
//! |-------|------|
//! | `error` | 1 |
//! | `warning` | 2 |
//! | `debug` | 3 |
//! | `info` | 4 |
//!
//! A threshold lets an entry through when the entry's rank is less than or
//! equal to the threshold's rank. The default threshold `error` only lets
//! errors through; `info` lets everything through.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use workflow_api::logging::{LogEntry, LogLevel};
//!
//! let entry = LogEntry::new("Imported grade changes")
//!     .with_function("importGrades", json!({"term": "2026FA"}))
//!     .with_counts(120, 120);
//!
//! assert!(LogLevel::Error.passes(LogLevel::Warning));
//! assert!(!LogLevel::Info.passes(LogLevel::Warning));
//! ```

pub mod logger;

pub use logger::{SharedLogger, WorkflowLogger};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Error,
    Warning,
    Debug,
    Info,
}

/// Returned when a string names no known log level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown log level: {0}")]
pub struct UnknownLogLevel(pub String);

impl LogLevel {
    /// All levels, most urgent first.
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Debug,
        LogLevel::Info,
    ];

    /// Numeric rank; lower is more urgent.
    pub fn rank(self) -> u8 {
        match self {
            LogLevel::Error => 1,
            LogLevel::Warning => 2,
            LogLevel::Debug => 3,
            LogLevel::Info => 4,
        }
    }

    /// Whether an entry at `self` is written under threshold `threshold`.
    pub fn passes(self, threshold: LogLevel) -> bool {
        self.rank() <= threshold.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
        }
    }

    /// Parses a configured threshold, falling back to `error` for anything
    /// unrecognized.
    pub fn from_setting(value: &str) -> Self {
        value.parse().unwrap_or_else(|err: UnknownLogLevel| {
            tracing::warn!("{}; using error", err);
            LogLevel::Error
        })
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warning" => Ok(LogLevel::Warning),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            _ => Err(UnknownLogLevel(s.to_string())),
        }
    }
}

/// Run statistics attached to a log entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStats {
    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub total_count: u64,

    /// Elapsed time in seconds
    #[serde(default)]
    pub elapsed: f64,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub error_message: String,
}

/// One record written to the log collection.
///
/// `date`, `log_level`, `request_id` and `process_name` are always
/// overwritten by [`WorkflowLogger::log`]; whatever the caller put there is
/// discarded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub request_id: String,

    #[serde(default)]
    pub process_name: String,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub function_name: String,

    #[serde(default)]
    pub function_arguments: Value,

    #[serde(default)]
    pub api_data_model: Value,

    #[serde(default)]
    pub log: LogStats,
}

impl LogEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_function(mut self, name: impl Into<String>, arguments: Value) -> Self {
        self.function_name = name.into();
        self.function_arguments = arguments;
        self
    }

    pub fn with_data_model(mut self, model: Value) -> Self {
        self.api_data_model = model;
        self
    }

    pub fn with_counts(mut self, count: u64, total_count: u64) -> Self {
        self.log.count = count;
        self.log.total_count = total_count;
        self
    }

    pub fn with_elapsed(mut self, seconds: f64) -> Self {
        self.log.elapsed = seconds;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.log.version = version.into();
        self
    }

    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.log.error_message = message.into();
        self
    }
}

/// Request metadata of the workflow run the logger serves.
///
/// Passed to the logger when it is created and stamped onto every entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestContext {
    pub request_id: Option<String>,
    pub process_name: Option<String>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>, process_name: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            process_name: Some(process_name.into()),
        }
    }

    /// Reads `_request.id` and `_request.name` from a workflow data document.
    ///
    /// Numeric ids are rendered as strings; anything missing stays `None`.
    pub fn from_data(data: &Value) -> Self {
        let request = &data["_request"];
        Self {
            request_id: scalar_to_string(&request["id"]),
            process_name: scalar_to_string(&request["name"]),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
