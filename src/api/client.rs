//
//  workflow-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Generic Resource Client
//!
//! This module provides [`ResourceClient`], the authenticated accessor every
//! workflow-platform resource is built on. It owns the endpoint configuration,
//! issues GET/POST/PUT/DELETE requests, and folds every outcome (success or
//! failure) into a single stored response.
//!
//! ## Features
//!
//! - Endpoint normalization (always starts with `/`)
//! - `Accept: application/json` and bearer authorization on every request
//! - JSON serialization of request payloads
//! - Transport and protocol failures captured as an error envelope, never raised
//! - Boolean success result at the public surface, tagged [`Outcome`] underneath

use anyhow::Result;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::auth::BearerToken;
use crate::config::Config;

/// Extracts a readable message from an API error body.
///
/// The platform replies with one of several shapes:
/// ```json
/// {"error": {"message": "Human readable message"}}
/// {"errors": [{"message": "Human readable message"}]}
/// {"error": {"detail": "Human readable message"}}
/// {"message": "Human readable message"}
/// ```
///
/// If none of them match, the message falls back to the status and raw body.
///
/// # Parameters
///
/// * `status` - The HTTP status code
/// * `body` - The raw error response body
pub fn format_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(message) = json
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }

        if let Some(message) = json
            .get("errors")
            .and_then(|e| e.as_array())
            .and_then(|arr| arr.first())
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }

        if let Some(detail) = json
            .get("error")
            .and_then(|e| e.get("detail"))
            .and_then(|m| m.as_str())
        {
            return detail.to_string();
        }

        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    format!("API error ({}): {}", status, body)
}

/// A failure raised while issuing a request, normalized to `{code, message}`.
///
/// `code` is the HTTP status for non-2xx replies and `0` when no status was
/// received (connection refused, TLS failure, timeout) or when the payload
/// could not be encoded or the reply could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("request failed ({code}): {message}")]
pub struct TransportError {
    /// HTTP status code, or `0` when none applies
    pub code: u16,
    /// Human readable failure description
    pub message: String,
}

impl TransportError {
    /// Creates a transport error from a code and message.
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Renders the error as the `{"error": {"code", "message"}}` envelope.
    pub fn to_envelope(&self) -> Value {
        json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        })
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let code = err.status().map(|s| s.as_u16()).unwrap_or(0);
        Self::new(code, err.to_string())
    }
}

/// The tagged result of the most recent request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The decoded JSON body (`null` for an empty body)
    Success(Value),
    /// The request failed before a usable body was obtained
    TransportError(TransportError),
}

impl Outcome {
    /// Returns the stored response as the platform would hand it back:
    /// the payload on success, the error envelope on failure.
    pub fn to_value(&self) -> Value {
        match self {
            Outcome::Success(payload) => payload.clone(),
            Outcome::TransportError(err) => err.to_envelope(),
        }
    }

    /// Whether the stored response carries a non-null `error` key.
    ///
    /// A successful reply whose body itself contains `error` counts as an error.
    pub fn is_error(&self) -> bool {
        match self {
            Outcome::Success(payload) => payload.get("error").is_some_and(|e| !e.is_null()),
            Outcome::TransportError(_) => true,
        }
    }
}

/// Authenticated accessor for one workflow-platform endpoint family.
///
/// Every call overwrites the stored response, so an instance always reflects
/// its most recent request. All request methods take `&mut self`; share an
/// instance across tasks only behind a lock.
///
/// # Example
///
/// ```rust,no_run
/// use workflow_api::api::ResourceClient;
/// use workflow_api::auth::BearerToken;
///
/// # async fn example() -> anyhow::Result<()> {
/// let mut client = ResourceClient::new("https://workflow.example.com/api/1.0", "collections")?
///     .with_auth(BearerToken::new("your-token"));
///
/// if client.get("/8").await {
///     println!("{}", client.response());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ResourceClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URI of the API (e.g., "https://workflow.example.com/api/1.0")
    base_uri: String,
    /// Endpoint path, always starting with `/`
    endpoint: String,
    /// Optional bearer credential
    auth: Option<BearerToken>,
    /// Outcome of the most recent request
    response: Option<Outcome>,
}

impl ResourceClient {
    /// Creates a client for `base_uri` + `endpoint` with certificate
    /// verification disabled.
    ///
    /// The endpoint gets a leading `/` if it lacks one, and a trailing `/` on
    /// the base URI is dropped so the two join cleanly.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client could not be created.
    pub fn new(base_uri: impl Into<String>, endpoint: &str) -> Result<Self> {
        Self::build(base_uri.into(), endpoint, false)
    }

    /// Creates a client from loaded configuration.
    ///
    /// Uses `api.host` as the base URI, `api.token` as the bearer credential
    /// and `api.verify_tls` to decide certificate verification.
    ///
    /// # Errors
    ///
    /// Returns an error if no host is configured or the HTTP client could not
    /// be created.
    pub fn from_config(config: &Config, endpoint: &str) -> Result<Self> {
        let host = config.api_host()?;
        let mut client = Self::build(host.to_string(), endpoint, config.api.verify_tls)?;

        match config.api.token.as_deref() {
            Some(token) => client.auth = Some(BearerToken::new(token)),
            None => tracing::warn!("No API token configured; requests will be unauthenticated"),
        }

        Ok(client)
    }

    fn build(base_uri: String, endpoint: &str, verify_tls: bool) -> Result<Self> {
        if !verify_tls {
            tracing::warn!("TLS certificate verification is disabled for {}", base_uri);
        }

        let http = Client::builder()
            .user_agent(format!("wfapi/{}", crate::VERSION))
            .danger_accept_invalid_certs(!verify_tls)
            .build()?;

        Ok(Self {
            http,
            base_uri: base_uri.trim_end_matches('/').to_string(),
            endpoint: normalize_endpoint(endpoint),
            auth: None,
            response: None,
        })
    }

    /// Sets the bearer credential sent with every request.
    pub fn with_auth(mut self, auth: BearerToken) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Returns the base URI.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the normalized endpoint path.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the URL a request with `fragment` appended would target.
    pub fn url(&self, fragment: &str) -> String {
        format!("{}{}{}", self.base_uri, self.endpoint, fragment)
    }

    /// POSTs `payload` as JSON to the endpoint plus `subpath`.
    ///
    /// Returns `true` iff the stored response carries no `error` key.
    pub async fn post<B: Serialize + ?Sized>(
        &mut self,
        payload: &B,
        subpath: &str,
    ) -> bool {
        let url = self.url(subpath);
        self.send(Method::POST, url, Some(encode_payload(payload))).await
    }

    /// GETs the endpoint with `fragment` appended verbatim.
    ///
    /// No `?` or `&` joining is done here; callers pre-format query strings.
    pub async fn get(&mut self, fragment: &str) -> bool {
        let url = self.url(fragment);
        self.send(Method::GET, url, None).await
    }

    /// PUTs `payload` as JSON to the endpoint plus `subpath`.
    pub async fn put<B: Serialize + ?Sized>(
        &mut self,
        payload: &B,
        subpath: &str,
    ) -> bool {
        let url = self.url(subpath);
        self.send(Method::PUT, url, Some(encode_payload(payload))).await
    }

    /// DELETEs the endpoint with `fragment` appended verbatim.
    pub async fn delete(&mut self, fragment: &str) -> bool {
        let url = self.url(fragment);
        self.send(Method::DELETE, url, None).await
    }

    /// Whether the last stored response contains an `error` key.
    ///
    /// `false` before any request has been made.
    pub fn is_error(&self) -> bool {
        self.response.as_ref().is_some_and(Outcome::is_error)
    }

    /// Returns the last stored response verbatim (`null` before any request).
    pub fn response(&self) -> Value {
        self.response
            .as_ref()
            .map(Outcome::to_value)
            .unwrap_or(Value::Null)
    }

    /// Returns the tagged outcome of the last request, if any.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.response.as_ref()
    }

    /// Returns the decoded body of the last request when it succeeded.
    pub fn payload(&self) -> Option<&Value> {
        match &self.response {
            Some(Outcome::Success(payload)) => Some(payload),
            _ => None,
        }
    }

    async fn send(
        &mut self,
        method: Method,
        url: String,
        body: Option<Result<Value, TransportError>>,
    ) -> bool {
        let outcome = match body.transpose() {
            Ok(body) => self.execute(method, &url, body).await,
            Err(err) => Outcome::TransportError(err),
        };

        if let Outcome::TransportError(err) = &outcome {
            tracing::warn!("Request to {} failed: {}", url, err);
        }

        self.response = Some(outcome);
        !self.is_error()
    }

    async fn execute(&self, method: Method, url: &str, body: Option<Value>) -> Outcome {
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");

        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }

        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return Outcome::TransportError(err.into()),
        };
        let status = response.status();

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return Outcome::TransportError(err.into()),
        };

        if !status.is_success() {
            return Outcome::TransportError(TransportError::new(
                status.as_u16(),
                format_api_error(status, &text),
            ));
        }

        decode_body(&text)
    }
}

fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with('/') {
        endpoint.to_string()
    } else {
        format!("/{}", endpoint)
    }
}

fn encode_payload<B: Serialize + ?Sized>(payload: &B) -> Result<Value, TransportError> {
    serde_json::to_value(payload)
        .map_err(|e| TransportError::new(0, format!("Failed to encode payload: {}", e)))
}

fn decode_body(text: &str) -> Outcome {
    if text.trim().is_empty() {
        return Outcome::Success(Value::Null);
    }

    match serde_json::from_str(text) {
        Ok(payload) => Outcome::Success(payload),
        Err(e) => Outcome::TransportError(TransportError::new(
            0,
            format!("Failed to decode response: {}", e),
        )),
    }
}
