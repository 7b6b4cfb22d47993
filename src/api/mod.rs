//
//  workflow-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Authenticated access to the workflow platform's REST resources.
//!
//! ## Architecture
//!
//! - [`client`]: [`ResourceClient`], the generic accessor every resource wraps
//! - [`collections`]: collection and record operations on `/collections`
//! - [`groups`]: group lookup and membership on `/groups`
//! - [`users`]: user lookup on `/users`
//! - [`common`]: ids, by-name scanning, query encoding
//!
//! ## Error Handling
//!
//! Request methods never return `Err`. They return `true` on success and
//! store either the decoded body or an `{"error": {"code", "message"}}`
//! envelope, available through `response()` and `is_error()`.
//!
//! ```rust,no_run
//! use workflow_api::api::GroupResource;
//! use workflow_api::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut groups = GroupResource::from_config(&Config::load()?)?;
//! if !groups.get_users_by_name("Advisors", Some("per_page=100")).await {
//!     eprintln!("{}", groups.response()["error"]["message"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;

pub mod collections;

pub mod groups;

pub mod users;

pub mod common;

pub use client::{Outcome, ResourceClient, TransportError};
pub use collections::{Collection, CollectionResource};
pub use common::ResourceId;
pub use groups::{Group, GroupResource};
pub use users::{UserResource, WorkflowUser};
