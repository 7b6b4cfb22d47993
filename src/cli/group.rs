//
//  workflow-api
//  cli/group.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{report, GlobalOptions, Target, TargetArgs};
use crate::api::GroupResource;

/// Look up groups and their users
#[derive(Args, Debug)]
pub struct GroupCommand {
    #[command(subcommand)]
    pub command: GroupSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GroupSubcommand {
    /// Show a group
    Get(TargetArgs),

    /// List the users of a group
    Users {
        #[command(flatten)]
        target: TargetArgs,

        /// Raw query string appended to the request (e.g. "status=ACTIVE")
        #[arg(long, short)]
        query: Option<String>,
    },
}

impl GroupCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.config()?;
        let mut groups = GroupResource::from_config(&config)?;

        let (succeeded, target) = match &self.command {
            GroupSubcommand::Get(target) => match target.target() {
                Target::Id(id) => (groups.get_by_id(&id).await, id),
                Target::Name(name) => {
                    if let Some(group) = groups.get_by_name(&name).await {
                        println!("{}", serde_json::to_string_pretty(&group)?);
                        return Ok(());
                    }
                    (false, name)
                }
            },
            GroupSubcommand::Users { target, query } => match target.target() {
                Target::Id(id) => (groups.get_users(&id, query.as_deref()).await, id),
                Target::Name(name) => (
                    groups.get_users_by_name(&name, query.as_deref()).await,
                    name,
                ),
            },
        };

        report(
            succeeded,
            groups.is_error(),
            &groups.response(),
            &format!("group {:?}", target),
        )
    }
}
