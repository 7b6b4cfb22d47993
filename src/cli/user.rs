//
//  workflow-api
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{report, GlobalOptions};
use crate::api::UserResource;

/// Look up users
#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    /// Show a user as a flat workflow record
    Get {
        /// User id
        id: String,

        /// Print the platform's full user document instead
        #[arg(long)]
        raw: bool,
    },
}

impl UserCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.config()?;
        let mut users = UserResource::from_config(&config)?;

        match &self.command {
            UserSubcommand::Get { id, raw: true } => {
                let succeeded = users.get_by_id(id).await;
                report(
                    succeeded,
                    users.is_error(),
                    &users.response(),
                    &format!("user {}", id),
                )
            }
            UserSubcommand::Get { id, raw: false } => match users.workflow_user(id).await {
                Some(user) => {
                    println!("{}", serde_json::to_string_pretty(&user.to_document())?);
                    Ok(())
                }
                None => report(
                    false,
                    users.is_error(),
                    &users.response(),
                    &format!("user {}", id),
                ),
            },
        }
    }
}
