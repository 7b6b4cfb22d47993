//
//  workflow-api
//  logging/logger.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Collection-backed logger.
//!
//! [`WorkflowLogger`] resolves the log collection once, when it is created,
//! and keeps that id for its whole life. If the collection cannot be
//! resolved, every write that passes the level gate returns `false` without
//! touching the network.
//!
//! [`SharedLogger`] is the process-wide holder: create one, hand it to the
//! code that logs, and call [`SharedLogger::get_or_create`] wherever a logger
//! is needed. Initialization runs at most once even under concurrent calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use workflow_api::logging::{LogEntry, LogLevel, RequestContext, SharedLogger};
//! use workflow_api::Config;
//!
//! static LOGGER: SharedLogger = SharedLogger::new();
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let context = RequestContext::new("915", "Grade Change");
//! let logger = LOGGER.get_or_create(&config, &context).await?;
//!
//! if logger.is_logging_level(LogLevel::Debug) {
//!     logger.debug(LogEntry::new("loaded 120 rows")).await;
//! }
//! logger.error(LogEntry::new("registrar API timed out")).await;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use serde_json::Value;
use tokio::sync::{Mutex, OnceCell};

use super::{LogEntry, LogLevel, RequestContext};
use crate::api::{CollectionResource, ResourceId};
use crate::config::Config;

/// Timestamp format stamped on entries, e.g. `2026-10-19T14:03:27+0200`.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Writes leveled log entries as records of one collection.
#[derive(Debug)]
pub struct WorkflowLogger {
    collection: Mutex<CollectionResource>,
    collection_name: String,
    collection_id: Option<ResourceId>,
    context: RequestContext,
    threshold: LogLevel,
}

impl WorkflowLogger {
    /// Resolves `collection_name` through `collection` and builds the logger.
    ///
    /// A failed or empty lookup is not an error: the logger is still created
    /// and its writes report `false`.
    pub async fn connect(
        mut collection: CollectionResource,
        collection_name: &str,
        context: RequestContext,
        threshold: LogLevel,
    ) -> Self {
        let collection_id = collection
            .get_by_name(collection_name)
            .await
            .and_then(|found| found.id);

        match &collection_id {
            Some(id) => tracing::debug!("Logging to collection {:?} ({})", collection_name, id),
            None => tracing::warn!(
                "Log collection {:?} could not be resolved; log entries will be dropped",
                collection_name
            ),
        }

        Self {
            collection: Mutex::new(collection),
            collection_name: collection_name.to_string(),
            collection_id,
            context,
            threshold,
        }
    }

    /// Builds a logger from configuration: `logging.collection` names the
    /// collection and `logging.level` sets the threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection client cannot be built.
    pub async fn from_config(config: &Config, context: RequestContext) -> Result<Self> {
        let collection = CollectionResource::from_config(config)?;
        Ok(Self::connect(
            collection,
            &config.logging.collection,
            context,
            config.logging.level,
        )
        .await)
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// The id resolved at creation time, if any.
    pub fn collection_id(&self) -> Option<&ResourceId> {
        self.collection_id.as_ref()
    }

    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Whether an entry at `level` would be written.
    ///
    /// Check this before building an expensive entry.
    pub fn is_logging_level(&self, level: LogLevel) -> bool {
        level.passes(self.threshold)
    }

    /// Writes `entry` at `level`.
    ///
    /// Returns `true` when the entry was written or was skipped by the level
    /// gate, and `false` when the collection is unresolved or the write failed.
    /// The date, level, request id and process name are overwritten.
    pub async fn log(&self, level: LogLevel, mut entry: LogEntry) -> bool {
        if !self.is_logging_level(level) {
            tracing::trace!("Skipping {} entry below threshold {}", level, self.threshold);
            return true;
        }

        let Some(collection_id) = &self.collection_id else {
            return false;
        };

        entry.log_level = level;
        entry.date = Local::now().format(DATE_FORMAT).to_string();
        entry.request_id = self.context.request_id.clone().unwrap_or_default();
        entry.process_name = self.context.process_name.clone().unwrap_or_default();

        let mut collection = self.collection.lock().await;
        collection.add_record_by_id(collection_id, &entry).await
    }

    pub async fn error(&self, entry: LogEntry) -> bool {
        self.log(LogLevel::Error, entry).await
    }

    pub async fn warning(&self, entry: LogEntry) -> bool {
        self.log(LogLevel::Warning, entry).await
    }

    pub async fn debug(&self, entry: LogEntry) -> bool {
        self.log(LogLevel::Debug, entry).await
    }

    pub async fn info(&self, entry: LogEntry) -> bool {
        self.log(LogLevel::Info, entry).await
    }

    /// The collection's last stored response: the written record, an error
    /// envelope, or the resolution listing if nothing was written yet.
    pub async fn last_response(&self) -> Value {
        self.collection.lock().await.response()
    }
}

/// Lazily created, process-wide [`WorkflowLogger`].
///
/// Usable in a `static` or passed around behind an `Arc`.
#[derive(Debug, Default)]
pub struct SharedLogger {
    cell: OnceCell<Arc<WorkflowLogger>>,
}

impl SharedLogger {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    /// Returns the logger, creating it from `config` and `context` on first use.
    ///
    /// Concurrent first calls wait for the one initialization in progress.
    /// A failed initialization leaves the holder empty, so a later call
    /// retries it.
    pub async fn get_or_create(
        &self,
        config: &Config,
        context: &RequestContext,
    ) -> Result<Arc<WorkflowLogger>> {
        let logger = self
            .cell
            .get_or_try_init(|| async {
                WorkflowLogger::from_config(config, context.clone())
                    .await
                    .map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(logger))
    }

    /// Returns the logger if it has been created.
    pub fn get(&self) -> Option<Arc<WorkflowLogger>> {
        self.cell.get().cloned()
    }
}
