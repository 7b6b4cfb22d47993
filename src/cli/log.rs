//
//  workflow-api
//  cli/log.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Log command
//!
//! Writes one entry through [`WorkflowLogger`], so the level gate and the
//! stamped fields behave exactly as they do for scripts.
//!
//! ```bash
//! LOG_LEVEL=debug wfapi log warning "Term code missing" \
//!     --function sync_grades --arguments '{"term": null}' --request-id 881
//! ```

use anyhow::Result;
use clap::Args;
use console::style;
use serde_json::Value;

use super::{read_payload, report, GlobalOptions};
use crate::logging::{LogEntry, LogLevel, RequestContext, WorkflowLogger};

/// Write an entry to the log collection
#[derive(Args, Debug)]
pub struct LogCommand {
    /// Entry level (error, warning, debug, info)
    pub level: LogLevel,

    /// Entry message
    pub message: String,

    /// Name of the function the entry is about
    #[arg(long)]
    pub function: Option<String>,

    /// Function arguments as JSON (- for stdin)
    #[arg(long)]
    pub arguments: Option<String>,

    /// Request id stamped on the entry
    #[arg(long)]
    pub request_id: Option<String>,

    /// Process name stamped on the entry
    #[arg(long)]
    pub process_name: Option<String>,
}

impl LogCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.config()?;
        let context = RequestContext {
            request_id: self.request_id.clone(),
            process_name: self.process_name.clone(),
        };

        let mut entry = LogEntry::new(&self.message);
        if let Some(function) = &self.function {
            let arguments = match &self.arguments {
                Some(arguments) => read_payload(arguments)?,
                None => Value::Null,
            };
            entry = entry.with_function(function, arguments);
        }

        let logger = WorkflowLogger::from_config(&config, context).await?;
        if !logger.is_logging_level(self.level) {
            eprintln!(
                "{} {} is below the {} threshold; nothing written",
                style("!").yellow(),
                self.level,
                logger.threshold()
            );
            return Ok(());
        }

        let written = logger.log(self.level, entry).await;
        let response = logger.last_response().await;
        let is_error = !response["error"].is_null();
        report(
            written,
            is_error,
            &response,
            &format!("log collection {:?}", logger.collection_name()),
        )
    }
}
