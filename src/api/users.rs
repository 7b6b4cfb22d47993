//
//  workflow-api
//  api/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User lookup.
//!
//! Scripts that assign or notify users usually need a flat user record
//! rather than the platform's full user document. [`UserResource::workflow_user`]
//! fetches `/users/{id}` and reshapes it into [`WorkflowUser`].

use std::fmt::Display;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::ResourceClient;
use super::common::ResourceId;
use crate::config::Config;

/// Endpoint the user resource is bound to.
pub const USERS_ENDPOINT: &str = "/users";

/// A platform user as returned by `/users/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformUser {
    pub id: ResourceId,

    pub username: String,

    #[serde(default)]
    pub firstname: Option<String>,

    #[serde(default)]
    pub lastname: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

/// Flat user record handed to workflow scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowUser {
    pub id: ResourceId,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: String,
}

impl From<PlatformUser> for WorkflowUser {
    fn from(user: PlatformUser) -> Self {
        Self {
            id: user.id,
            user_name: user.username,
            first_name: user.firstname.unwrap_or_default(),
            last_name: user.lastname.unwrap_or_default(),
            email: user.email.unwrap_or_default(),
            status: user.status.unwrap_or_default(),
        }
    }
}

impl WorkflowUser {
    /// Wraps the record as `{"user": {...}}`, the shape scripts expect.
    pub fn to_document(&self) -> Value {
        serde_json::json!({ "user": self })
    }
}

/// Typed operations on the `/users` endpoint.
#[derive(Debug)]
pub struct UserResource {
    client: ResourceClient,
}

impl UserResource {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ResourceClient::from_config(
            config,
            USERS_ENDPOINT,
        )?))
    }

    pub fn is_error(&self) -> bool {
        self.client.is_error()
    }

    pub fn response(&self) -> Value {
        self.client.response()
    }

    /// Fetches a user by id.
    pub async fn get_by_id(&mut self, id: impl Display) -> bool {
        self.client.get(&format!("/{}", id)).await
    }

    /// Fetches a user and reshapes it into a [`WorkflowUser`].
    ///
    /// Returns `None` when the request failed or the reply is not a user.
    pub async fn workflow_user(&mut self, id: impl Display) -> Option<WorkflowUser> {
        if !self.get_by_id(id).await {
            return None;
        }

        self.client
            .payload()
            .and_then(|user| serde_json::from_value::<PlatformUser>(user.clone()).ok())
            .map(WorkflowUser::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    #[tokio::test]
    async fn test_workflow_user_reshapes_fields() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/42")
            .with_body(
                json!({
                    "id": 42,
                    "username": "alovelace",
                    "firstname": "Ada",
                    "lastname": "Lovelace",
                    "email": "ada@example.edu",
                    "status": "ACTIVE",
                    "timezone": "Europe/London"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let mut users = UserResource::new(ResourceClient::new(server.url(), "users").unwrap());
        let user = users.workflow_user(42).await.unwrap();

        assert_eq!(
            user.to_document(),
            json!({"user": {
                "id": 42,
                "userName": "alovelace",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.edu",
                "status": "ACTIVE"
            }})
        );
    }

    #[tokio::test]
    async fn test_workflow_user_missing() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/users/7")
            .with_status(404)
            .with_body(r#"{"message": "User not found"}"#)
            .create_async()
            .await;

        let mut users = UserResource::new(ResourceClient::new(server.url(), "users").unwrap());
        assert!(users.workflow_user(7).await.is_none());
        assert!(users.is_error());
    }
}
