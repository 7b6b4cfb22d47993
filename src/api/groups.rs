//
//  workflow-api
//  api/groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Group resource.
//!
//! Groups collect platform users for task assignment. This module wraps a
//! [`ResourceClient`] bound to `/groups`.
//!
//! Unlike the collection by-name operations, [`GroupResource::get_users_by_name`]
//! does not stop when the name fails to resolve. It still requests
//! `/groups//users`, which the platform rejects, so the failure shows up as an
//! error envelope rather than a bare `false`.

use std::fmt::Display;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::client::{Outcome, ResourceClient};
use super::common::{encode_component, find_last_named, ResourceId};
use crate::config::Config;

/// Endpoint the group resource is bound to.
pub const GROUPS_ENDPOINT: &str = "/groups";

/// A group as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: Option<ResourceId>,

    pub name: String,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Typed operations on the `/groups` endpoint.
#[derive(Debug)]
pub struct GroupResource {
    client: ResourceClient,
}

impl GroupResource {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// Builds a group resource from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ResourceClient::from_config(
            config,
            GROUPS_ENDPOINT,
        )?))
    }

    pub fn is_error(&self) -> bool {
        self.client.is_error()
    }

    pub fn response(&self) -> Value {
        self.client.response()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.client.outcome()
    }

    /// Looks a group up by exact name; the last matching entry wins.
    pub async fn get_by_name(&mut self, name: &str) -> Option<Group> {
        self.client
            .get(&format!("?filter={}", encode_component(name)))
            .await;
        self.client
            .payload()
            .and_then(|listing| find_last_named(listing, name))
    }

    /// Fetches a group by id.
    pub async fn get_by_id(&mut self, id: impl Display) -> bool {
        self.client.get(&format!("/{}", id)).await
    }

    /// Lists the users of group `id`.
    ///
    /// `query` is appended verbatim after `?` and must already be encoded.
    pub async fn get_users(&mut self, id: impl Display, query: Option<&str>) -> bool {
        self.client
            .get(&format!("/{}/users?{}", id, query.unwrap_or_default()))
            .await
    }

    /// Lists the users of the group named `name`.
    pub async fn get_users_by_name(&mut self, name: &str, query: Option<&str>) -> bool {
        let id = self
            .get_by_name(name)
            .await
            .and_then(|group| group.id)
            .map(|id| id.to_string())
            .unwrap_or_default();
        self.get_users(id, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    use crate::auth::BearerToken;

    fn resource_for(server: &Server) -> GroupResource {
        GroupResource::new(
            ResourceClient::new(server.url(), "groups")
                .unwrap()
                .with_auth(BearerToken::new("test-token")),
        )
    }

    #[tokio::test]
    async fn test_get_by_name_last_match_wins() {
        let mut server = Server::new_async().await;
        let listing = server
            .mock("GET", "/groups")
            .match_query(Matcher::UrlEncoded(
                "filter".into(),
                "Registrar staff".into(),
            ))
            .with_body(
                json!({"data": [
                    {"id": 3, "name": "Registrar staff"},
                    {"id": 8, "name": "Registrar staff"},
                ]})
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let mut groups = resource_for(&server);
        let group = groups.get_by_name("Registrar staff").await.unwrap();
        assert_eq!(group.id, Some(ResourceId::Int(8)));
        listing.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/groups/3")
            .match_header("accept", "application/json")
            .with_body(r#"{"id": 3, "name": "Registrar staff", "status": "ACTIVE"}"#)
            .create_async()
            .await;

        let mut groups = resource_for(&server);
        assert!(groups.get_by_id(3).await);
        assert_eq!(groups.response()["status"], "ACTIVE");
    }

    #[tokio::test]
    async fn test_get_users_appends_query() {
        let mut server = Server::new_async().await;
        let users = server
            .mock("GET", "/groups/3/users")
            .match_query(Matcher::UrlEncoded("filter".into(), "ada".into()))
            .with_body(r#"{"data": [{"id": 1, "username": "ada"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let mut groups = resource_for(&server);
        assert!(groups.get_users(3, Some("filter=ada")).await);
        assert_eq!(groups.response()["data"][0]["username"], "ada");
        users.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_users_without_query() {
        let mut server = Server::new_async().await;
        let users = server
            .mock("GET", "/groups/3/users")
            .match_query(Matcher::Any)
            .with_body(r#"{"data": [{"id": 1, "username": "ada"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let mut groups = resource_for(&server);
        assert!(groups.get_users(3, None).await);
        assert!(!groups.is_error());
        users.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_users_by_name_resolves_then_lists() {
        let mut server = Server::new_async().await;
        let listing = server
            .mock("GET", "/groups")
            .match_query(Matcher::UrlEncoded("filter".into(), "Advisors".into()))
            .with_body(r#"{"data": [{"id": 12, "name": "Advisors"}]}"#)
            .expect(1)
            .create_async()
            .await;
        let users = server
            .mock("GET", "/groups/12/users")
            .match_query(Matcher::Any)
            .with_body(r#"{"data": []}"#)
            .expect(1)
            .create_async()
            .await;

        let mut groups = resource_for(&server);
        assert!(groups.get_users_by_name("Advisors", None).await);
        listing.assert_async().await;
        users.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_users_by_name_unresolved_still_requests() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/groups")
            .match_query(Matcher::Any)
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;
        let users = server
            .mock("GET", "/groups//users")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"message": "Not found"}"#)
            .expect(1)
            .create_async()
            .await;

        let mut groups = resource_for(&server);
        assert!(!groups.get_users_by_name("Ghosts", None).await);
        assert!(groups.is_error());
        users.assert_async().await;
    }
}
