//
//  workflow-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Workflow API Library
//!
//! Authenticated access to a workflow platform's REST resources, plus a log
//! sink that stores leveled entries as records of a collection.
//!
//! ## Overview
//!
//! Workflow scripts repeatedly need the same few things: read and write
//! collection records, look up groups and users, and leave an audit trail.
//! This library does the authentication, serialization and error
//! normalization once, so scripts only deal with payloads and booleans.
//!
//! ## Module Structure
//!
//! - [`api`]: resource clients (`/collections`, `/groups`, `/users`)
//! - [`auth`]: bearer token handling
//! - [`config`]: TOML file and environment configuration
//! - [`logging`]: leveled log entries written to a collection
//! - [`cli`]: command-line interface definitions for `wfapi`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use serde_json::json;
//! use workflow_api::api::CollectionResource;
//! use workflow_api::logging::{LogEntry, RequestContext, SharedLogger};
//! use workflow_api::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load()?;
//!
//! let mut collection = CollectionResource::from_config(&config)?;
//! if !collection.add_record_by_name("Grade changes", &json!({"data": {"grade": "A"}})).await {
//!     eprintln!("{}", collection.response());
//! }
//!
//! let loggers = SharedLogger::new();
//! let logger = loggers
//!     .get_or_create(&config, &RequestContext::new("915", "Grade Change"))
//!     .await?;
//! logger.info(LogEntry::new("grade recorded")).await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Channels
//!
//! | Situation | Result | `is_error()` |
//! |-----------|--------|--------------|
//! | Request succeeded | `true` | `false` |
//! | Transport or protocol failure | `false` | `true` |
//! | By-name lookup found nothing | `false` | `false` |

/// Command-line interface definitions.
pub mod cli;

/// Resource clients for the workflow-platform REST API.
///
/// Every resource wraps one [`api::ResourceClient`], which attaches the
/// bearer token, serializes payloads, and stores the outcome of the most
/// recent request.
pub mod api;

/// Bearer token handling.
pub mod auth;

/// Configuration loading (TOML file, then environment overrides).
pub mod config;

/// Collection-backed, leveled log sink.
pub mod logging;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name, used for the binary and the config directory.
pub const APP_NAME: &str = "wfapi";

/// Application version, taken from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `8-15`: Resource-related issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error, including any failed API request.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// A collection or group name did not resolve to an id.
    pub const NOT_FOUND: i32 = 8;
}
