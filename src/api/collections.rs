//
//  workflow-api
//  api/collections.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Collection resource.
//!
//! Collections are named, table-like stores of arbitrary JSON records. This
//! module wraps a [`ResourceClient`] bound to `/collections` and exposes
//! collection and record operations, each record operation in a "by id" and
//! a "by name" variant.
//!
//! # Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | create | `POST /collections` |
//! | get by name | `GET /collections?filter={name}` |
//! | get by id | `GET /collections/{id}` |
//! | list records | `GET /collections/{id}/records?{query}` |
//! | add record | `POST /collections/{id}/records` |
//! | update record | `PUT /collections/{id}/records/{recordId}` |
//! | delete record | `DELETE /collections/{id}/records/{recordId}` |
//!
//! # By-name operations
//!
//! Each `*_by_name` operation first lists collections filtered by name and
//! picks the last exact match. If nothing matches it returns `false` without
//! issuing the real request and without touching the error envelope of the
//! listing call, so `is_error()` tells a missed name apart from a failed
//! lookup. Nothing is cached; every by-name call costs one extra round trip.
//!
//! # Example
//!
//! ```rust,no_run
//! use serde_json::json;
//! use workflow_api::api::CollectionResource;
//! use workflow_api::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut collection = CollectionResource::from_config(&Config::load()?)?;
//!
//! let found = collection
//!     .get_records_by_name("Grade changes", [("pmql", "data.status = \"open\"")])
//!     .await;
//! if found {
//!     println!("{}", collection.response());
//! } else if collection.is_error() {
//!     eprintln!("lookup failed: {}", collection.response());
//! } else {
//!     eprintln!("no such collection");
//! }
//!
//! collection.add_record_by_id(8, &json!({"data": {"status": "open"}})).await;
//! # Ok(())
//! # }
//! ```

use std::fmt::Display;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::client::{Outcome, ResourceClient};
use super::common::{encode_component, encode_query, find_last_named, ResourceId};
use crate::config::Config;

/// Endpoint the collection resource is bound to.
pub const COLLECTIONS_ENDPOINT: &str = "/collections";

/// A collection as returned by the listing and lookup endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub id: Option<ResourceId>,

    pub name: String,

    /// Every other field the platform returned (description, schema, ...)
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Typed operations on the `/collections` endpoint.
#[derive(Debug)]
pub struct CollectionResource {
    client: ResourceClient,
}

impl CollectionResource {
    /// Wraps an existing client, rebinding nothing: the client should already
    /// target [`COLLECTIONS_ENDPOINT`].
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// Builds a collection resource from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ResourceClient::from_config(
            config,
            COLLECTIONS_ENDPOINT,
        )?))
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &ResourceClient {
        &self.client
    }

    /// Whether the last request left an error envelope.
    pub fn is_error(&self) -> bool {
        self.client.is_error()
    }

    /// Returns the last stored response.
    pub fn response(&self) -> Value {
        self.client.response()
    }

    /// Returns the tagged outcome of the last request.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.client.outcome()
    }

    /// Creates a collection.
    pub async fn create<B: Serialize + ?Sized>(&mut self, payload: &B) -> bool {
        self.client.post(payload, "").await
    }

    /// Looks a collection up by exact name.
    ///
    /// The listing is requested with a `filter` hint, then scanned so that the
    /// last entry named exactly `name` wins. Returns `None` when the lookup
    /// failed or nothing matched; check [`is_error`](Self::is_error) to tell
    /// those apart.
    pub async fn get_by_name(&mut self, name: &str) -> Option<Collection> {
        self.client
            .get(&format!("?filter={}", encode_component(name)))
            .await;
        self.client
            .payload()
            .and_then(|listing| find_last_named(listing, name))
    }

    /// Fetches a collection by id; the record is available via
    /// [`response`](Self::response).
    pub async fn get_by_id(&mut self, id: impl Display) -> bool {
        self.client.get(&format!("/{}", id)).await
    }

    /// Lists the records of collection `id`.
    ///
    /// Each parameter value is URL-encoded and the pairs are joined with `&`.
    pub async fn get_records<I, K, V>(&mut self, id: impl Display, parameters: I) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let query = encode_query(parameters);
        self.client.get(&format!("/{}/records?{}", id, query)).await
    }

    /// Lists the records of the collection named `name`.
    ///
    /// Returns `false` without a second request when the name does not resolve.
    pub async fn get_records_by_name<I, K, V>(&mut self, name: &str, parameters: I) -> bool
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        match self.resolve_id(name).await {
            Some(id) => self.get_records(id, parameters).await,
            None => false,
        }
    }

    /// Adds a record to collection `id`.
    pub async fn add_record_by_id<B: Serialize + ?Sized>(
        &mut self,
        id: impl Display,
        payload: &B,
    ) -> bool {
        self.client.post(payload, &format!("/{}/records", id)).await
    }

    /// Adds a record to the collection named `name`.
    pub async fn add_record_by_name<B: Serialize + ?Sized>(
        &mut self,
        name: &str,
        payload: &B,
    ) -> bool {
        match self.resolve_id(name).await {
            Some(id) => self.add_record_by_id(id, payload).await,
            None => false,
        }
    }

    /// Deletes record `record_id` from collection `id`.
    pub async fn delete_record_by_id(&mut self, id: impl Display, record_id: impl Display) -> bool {
        self.client
            .delete(&format!("/{}/records/{}", id, record_id))
            .await
    }

    /// Deletes record `record_id` from the collection named `name`.
    pub async fn delete_record_by_name(&mut self, name: &str, record_id: impl Display) -> bool {
        match self.resolve_id(name).await {
            Some(id) => self.delete_record_by_id(id, record_id).await,
            None => false,
        }
    }

    /// Replaces record `record_id` of collection `id` with `payload`.
    pub async fn update_record<B: Serialize + ?Sized>(
        &mut self,
        id: impl Display,
        record_id: impl Display,
        payload: &B,
    ) -> bool {
        self.client
            .put(payload, &format!("/{}/records/{}", id, record_id))
            .await
    }

    /// Replaces record `record_id` of the collection named `name`.
    pub async fn update_record_by_name<B: Serialize + ?Sized>(
        &mut self,
        name: &str,
        record_id: impl Display,
        payload: &B,
    ) -> bool {
        match self.resolve_id(name).await {
            Some(id) => self.update_record(id, record_id, payload).await,
            None => false,
        }
    }

    async fn resolve_id(&mut self, name: &str) -> Option<ResourceId> {
        let id = self.get_by_name(name).await.and_then(|c| c.id);
        if id.is_none() {
            tracing::debug!("Collection {:?} did not resolve to an id", name);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Mock, Server};
    use serde_json::json;

    use crate::auth::BearerToken;

    fn resource_for(server: &Server) -> CollectionResource {
        CollectionResource::new(
            ResourceClient::new(server.url(), "collections")
                .unwrap()
                .with_auth(BearerToken::new("test-token")),
        )
    }

    async fn mock_listing(server: &mut Server, name: &str, body: Value, hits: usize) -> Mock {
        server
            .mock("GET", "/collections")
            .match_query(Matcher::UrlEncoded("filter".into(), name.into()))
            .match_header("authorization", "Bearer test-token")
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(hits)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_create_success_and_failure() {
        let mut server = Server::new_async().await;
        let ok = server
            .mock("POST", "/collections")
            .match_body(Matcher::Json(json!({"name": "Grades"})))
            .with_status(201)
            .with_body(r#"{"id": 11, "name": "Grades"}"#)
            .create_async()
            .await;

        let mut collection = resource_for(&server);
        assert!(collection.create(&json!({"name": "Grades"})).await);
        assert!(!collection.is_error());
        ok.assert_async().await;

        let _mock = server
            .mock("POST", "/collections")
            .match_body(Matcher::Json(json!({"name": ""})))
            .with_status(422)
            .with_body(r#"{"message": "The name field is required."}"#)
            .create_async()
            .await;

        assert!(!collection.create(&json!({"name": ""})).await);
        assert_eq!(
            collection.response(),
            json!({"error": {"code": 422, "message": "The name field is required."}})
        );
    }

    #[tokio::test]
    async fn test_get_by_name_returns_last_duplicate() {
        let mut server = Server::new_async().await;
        let listing = mock_listing(
            &mut server,
            "Grades",
            json!({"data": [
                {"id": 4, "name": "Grades", "description": "first"},
                {"id": 5, "name": "Grades 2024"},
                {"id": 9, "name": "Grades", "description": "second"},
            ]}),
            1,
        )
        .await;

        let mut collection = resource_for(&server);
        let found = collection.get_by_name("Grades").await.unwrap();
        assert_eq!(found.id, Some(ResourceId::Int(9)));
        assert_eq!(found.attributes["description"], "second");
        listing.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_by_name_missing_is_not_an_error() {
        let mut server = Server::new_async().await;
        let _mock_listing = mock_listing(
            &mut server,
            "missing",
            json!({"data": [{"id": 1, "name": "missing records"}]}),
            1,
        )
        .await;

        let mut collection = resource_for(&server);
        assert!(collection.get_by_name("missing").await.is_none());
        assert!(!collection.is_error());
    }

    #[tokio::test]
    async fn test_get_by_name_encodes_filter() {
        let mut server = Server::new_async().await;
        let listing = server
            .mock("GET", "/collections")
            .match_query(Matcher::Regex(
                "^filter=Logging\\+-\\+Ellucian\\+Workflow$".into(),
            ))
            .with_body(r#"{"data": [{"id": 2, "name": "Logging - Ellucian Workflow"}]}"#)
            .create_async()
            .await;

        let mut collection = resource_for(&server);
        let found = collection.get_by_name("Logging - Ellucian Workflow").await;
        assert_eq!(found.and_then(|c| c.id), Some(ResourceId::Int(2)));
        listing.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/collections/8")
            .with_body(r#"{"id": 8, "name": "Grades", "columns": []}"#)
            .create_async()
            .await;

        let mut collection = resource_for(&server);
        assert!(collection.get_by_id(8).await);
        assert_eq!(collection.response()["name"], "Grades");
    }

    #[tokio::test]
    async fn test_get_records_encodes_parameters() {
        let mut server = Server::new_async().await;
        let records = server
            .mock("GET", "/collections/8/records")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("pmql".into(), "data.PROCESS_ID = 19".into()),
                Matcher::UrlEncoded("per_page".into(), "50".into()),
            ]))
            .with_body(r#"{"data": [{"id": 1, "data": {}}], "meta": {"total": 1}}"#)
            .expect(1)
            .create_async()
            .await;

        let mut collection = resource_for(&server);
        assert!(
            collection
                .get_records(8, [("pmql", "data.PROCESS_ID = 19"), ("per_page", "50")])
                .await
        );
        assert_eq!(collection.response()["meta"]["total"], 1);
        records.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_records_by_name_missing_skips_records_request() {
        let mut server = Server::new_async().await;
        let listing = mock_listing(&mut server, "missing", json!({"data": []}), 1).await;
        let records = server
            .mock("GET", Matcher::Regex("^/collections/.+/records".into()))
            .expect(0)
            .create_async()
            .await;

        let mut collection = resource_for(&server);
        let no_parameters: [(&str, &str); 0] = [];
        assert!(
            !collection
                .get_records_by_name("missing", no_parameters)
                .await
        );
        assert!(!collection.is_error());

        listing.assert_async().await;
        records.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_records_by_name_lookup_failure_keeps_envelope() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/collections")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"message": "Unauthenticated."}"#)
            .create_async()
            .await;

        let mut collection = resource_for(&server);
        assert!(
            !collection
                .get_records_by_name("Grades", [("page", "1")])
                .await
        );
        assert!(collection.is_error());
        assert_eq!(collection.response()["error"]["code"], 401);
    }

    #[tokio::test]
    async fn test_add_record_by_name_issues_two_calls() {
        let mut server = Server::new_async().await;
        let listing = mock_listing(
            &mut server,
            "Grades",
            json!({"data": [{"id": 6, "name": "Grades"}]}),
            1,
        )
        .await;
        let add = server
            .mock("POST", "/collections/6/records")
            .match_body(Matcher::Json(json!({"data": {"grade": "A"}})))
            .with_status(201)
            .with_body(r#"{"id": 101, "data": {"grade": "A"}}"#)
            .expect(1)
            .create_async()
            .await;

        let mut collection = resource_for(&server);
        assert!(
            collection
                .add_record_by_name("Grades", &json!({"data": {"grade": "A"}}))
                .await
        );
        assert_eq!(collection.response()["id"], 101);

        listing.assert_async().await;
        add.assert_async().await;
    }

    #[tokio::test]
    async fn test_add_record_by_name_missing_returns_false() {
        let mut server = Server::new_async().await;
        let _mock_listing = mock_listing(&mut server, "Nope", json!({"data": []}), 1).await;
        let add = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let mut collection = resource_for(&server);
        assert!(!collection.add_record_by_name("Nope", &json!({})).await);
        add.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_record_by_name() {
        let mut server = Server::new_async().await;
        let _mock_listing = mock_listing(
            &mut server,
            "Grades",
            json!({"data": [{"id": "g-1", "name": "Grades"}]}),
            1,
        )
        .await;
        let delete = server
            .mock("DELETE", "/collections/g-1/records/77")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        let mut collection = resource_for(&server);
        assert!(collection.delete_record_by_name("Grades", 77).await);
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_record_by_id_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/collections/6/records/1")
            .with_status(404)
            .with_body(r#"{"message": "Record not found"}"#)
            .create_async()
            .await;

        let mut collection = resource_for(&server);
        assert!(!collection.delete_record_by_id(6, 1).await);
        assert_eq!(
            collection.response()["error"]["message"],
            "Record not found"
        );
    }

    #[tokio::test]
    async fn test_update_record_and_by_name() {
        let mut server = Server::new_async().await;
        let update = server
            .mock("PUT", "/collections/6/records/12")
            .match_body(Matcher::Json(json!({"data": {"grade": "B"}})))
            .with_body(r#"{"id": 12, "data": {"grade": "B"}}"#)
            .expect(2)
            .create_async()
            .await;
        let _mock_listing = mock_listing(
            &mut server,
            "Grades",
            json!({"data": [{"id": 6, "name": "Grades"}]}),
            1,
        )
        .await;

        let mut collection = resource_for(&server);
        let payload = json!({"data": {"grade": "B"}});
        assert!(collection.update_record(6, 12, &payload).await);
        assert!(
            collection
                .update_record_by_name("Grades", 12, &payload)
                .await
        );
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_record_by_name_without_id_returns_false() {
        let mut server = Server::new_async().await;
        let _mock_listing = mock_listing(
            &mut server,
            "Grades",
            json!({"data": [{"name": "Grades"}]}),
            1,
        )
        .await;

        let mut collection = resource_for(&server);
        assert!(!collection.update_record_by_name("Grades", 1, &json!({})).await);
        assert!(!collection.is_error());
    }
}
