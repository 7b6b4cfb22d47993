//
//  workflow-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! The workflow platform authenticates every API call with a bearer token
//! issued to the script or service account running the workflow. This module
//! wraps that token and applies it to outgoing requests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use workflow_api::auth::BearerToken;
//! use reqwest::Client;
//!
//! let token = BearerToken::new("eyJ0eXAiOiJKV1Qi...");
//! let request = token.apply_to_request(Client::new().get("https://wf.example.com/api/1.0/users"));
//! ```

use std::fmt;

use reqwest::RequestBuilder;

/// A bearer token for the workflow-platform API.
///
/// The `Debug` implementation redacts the token so it never ends up in
/// logs or panic messages.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    /// Wraps a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Adds `Authorization: Bearer <token>` to the request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.token.chars().take(4).collect();
        write!(f, "BearerToken({}****)", visible)
    }
}
