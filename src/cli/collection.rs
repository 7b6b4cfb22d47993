//
//  workflow-api
//  cli/collection.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Collection commands
//!
//! ## Examples
//!
//! ```bash
//! # Look a collection up by name
//! wfapi collection get --name "Grade changes"
//!
//! # List records with a PMQL filter
//! wfapi collection records --id 8 -p 'pmql=data.status = "open"' -p per_page=50
//!
//! # Add a record read from stdin
//! echo '{"data": {"grade": "A"}}' | wfapi collection add --name "Grade changes" --data -
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{parse_key_val, read_payload, report, GlobalOptions, Target, TargetArgs};
use crate::api::CollectionResource;

/// Manage collections and their records
#[derive(Args, Debug)]
pub struct CollectionCommand {
    #[command(subcommand)]
    pub command: CollectionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CollectionSubcommand {
    /// Create a collection from a JSON definition
    Create {
        /// Collection definition as JSON (- for stdin)
        #[arg(long)]
        data: String,
    },

    /// Show a collection
    Get(TargetArgs),

    /// List the records of a collection
    Records {
        #[command(flatten)]
        target: TargetArgs,

        /// Query parameter as key=value (repeatable)
        #[arg(long = "param", short = 'p', value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// Add a record to a collection
    Add {
        #[command(flatten)]
        target: TargetArgs,

        /// Record as JSON (- for stdin)
        #[arg(long)]
        data: String,
    },

    /// Replace a record of a collection
    Update {
        #[command(flatten)]
        target: TargetArgs,

        /// Record id
        record_id: String,

        /// Record as JSON (- for stdin)
        #[arg(long)]
        data: String,
    },

    /// Delete a record from a collection
    Delete {
        #[command(flatten)]
        target: TargetArgs,

        /// Record id
        record_id: String,
    },
}

impl CollectionCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.config()?;
        let mut collection = CollectionResource::from_config(&config)?;

        let (succeeded, target) = match &self.command {
            CollectionSubcommand::Create { data } => {
                let payload = read_payload(data)?;
                (collection.create(&payload).await, String::new())
            }
            CollectionSubcommand::Get(target) => match target.target() {
                Target::Id(id) => (collection.get_by_id(&id).await, id),
                Target::Name(name) => {
                    let found = collection.get_by_name(&name).await;
                    if let Some(found) = &found {
                        println!("{}", serde_json::to_string_pretty(found)?);
                        return Ok(());
                    }
                    (false, name)
                }
            },
            CollectionSubcommand::Records { target, params } => match target.target() {
                Target::Id(id) => (
                    collection.get_records(&id, params.iter().cloned()).await,
                    id,
                ),
                Target::Name(name) => (
                    collection
                        .get_records_by_name(&name, params.iter().cloned())
                        .await,
                    name,
                ),
            },
            CollectionSubcommand::Add { target, data } => {
                let payload = read_payload(data)?;
                match target.target() {
                    Target::Id(id) => (collection.add_record_by_id(&id, &payload).await, id),
                    Target::Name(name) => (
                        collection.add_record_by_name(&name, &payload).await,
                        name,
                    ),
                }
            }
            CollectionSubcommand::Update {
                target,
                record_id,
                data,
            } => {
                let payload = read_payload(data)?;
                match target.target() {
                    Target::Id(id) => (
                        collection.update_record(&id, record_id, &payload).await,
                        id,
                    ),
                    Target::Name(name) => (
                        collection
                            .update_record_by_name(&name, record_id, &payload)
                            .await,
                        name,
                    ),
                }
            }
            CollectionSubcommand::Delete { target, record_id } => match target.target() {
                Target::Id(id) => (collection.delete_record_by_id(&id, record_id).await, id),
                Target::Name(name) => (
                    collection.delete_record_by_name(&name, record_id).await,
                    name,
                ),
            },
        };

        report(
            succeeded,
            collection.is_error(),
            &collection.response(),
            &format!("collection {:?}", target),
        )
    }
}
