//
//  workflow-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod collection;
mod group;
mod log;
mod user;

pub use collection::CollectionCommand;
pub use group::GroupCommand;
pub use log::LogCommand;
pub use user::UserCommand;

use std::io::Read;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;

/// Workflow API CLI - Work with workflow-platform resources from the command line
#[derive(Parser, Debug)]
#[command(
    name = "wfapi",
    version,
    about = "Work with workflow-platform collections, groups and users",
    long_about = "wfapi calls the workflow platform's REST API with the same credentials \
                  and error handling workflow scripts use.\n\n\
                  Settings come from the config file and the API_HOST, API_TOKEN and \
                  LOG_LEVEL environment variables.",
    propagate_version = true,
    after_help = "Use 'wfapi <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// API base URI (overrides API_HOST)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// API bearer token (overrides API_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Verify TLS certificates
    #[arg(long, global = true)]
    pub verify_tls: bool,
}

impl GlobalOptions {
    /// Loads configuration and applies command-line overrides.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load()?;
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.api.host = Some(host.clone());
        }
        if let Some(token) = &self.token {
            config.api.token = Some(token.clone());
        }
        if self.verify_tls {
            config.api.verify_tls = true;
        }
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage collections and their records
    #[command(visible_alias = "coll")]
    Collection(CollectionCommand),

    /// Look up groups and their users
    Group(GroupCommand),

    /// Look up users
    User(UserCommand),

    /// Write an entry to the log collection
    Log(LogCommand),

    /// Print version information
    Version,
}

/// Selects a resource by id or by name.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TargetArgs {
    /// Resource id
    #[arg(long)]
    pub id: Option<String>,

    /// Resource name (resolved with an extra lookup request)
    #[arg(long)]
    pub name: Option<String>,
}

/// A resolved [`TargetArgs`] selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Id(String),
    Name(String),
}

impl TargetArgs {
    pub fn target(&self) -> Target {
        match (&self.id, &self.name) {
            (Some(id), _) => Target::Id(id.clone()),
            (None, Some(name)) => Target::Name(name.clone()),
            // clap's group guarantees one of the two
            (None, None) => Target::Id(String::new()),
        }
    }
}

/// Failures that map to distinct exit codes.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Request failed ({code}): {message}")]
    Request { code: i64, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Prints the response and turns the boolean result into a command result.
///
/// A failed call with an error envelope is a request failure; a failed call
/// without one is a by-name miss for `target`.
pub(crate) fn report(
    succeeded: bool,
    is_error: bool,
    response: &Value,
    target: &str,
) -> Result<()> {
    if succeeded {
        if !response.is_null() {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        return Ok(());
    }

    if is_error {
        let error = &response["error"];
        return Err(CommandError::Request {
            code: error["code"].as_i64().unwrap_or(0),
            message: error["message"].as_str().unwrap_or_default().to_string(),
        }
        .into());
    }

    Err(CommandError::NotFound(target.to_string()).into())
}

/// Reads a JSON payload argument; `-` reads from stdin.
pub(crate) fn read_payload(input: &str) -> Result<Value> {
    let content = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        input.to_string()
    };

    serde_json::from_str(&content)
        .map_err(|e| CommandError::InvalidInput(format!("payload is not valid JSON: {}", e)).into())
}

/// Parses a `key=value` pair.
pub(crate) fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("Invalid parameter format: {}. Expected key=value", s))
}
