//! Stateless HTTP request builder and response parser for the accounts API.
//!
//! # Design
//! `AccountClient` holds only the base URL and the optional token, and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. `AccountService` glues the two halves
//! together over a `Transport`; tests can drive either half directly.

use tracing::warn;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, AUTH_HEADER, CONTENT_TYPE_JSON};
use crate::types::{Account, CreateAccount};

/// Request builder and response parser for the `/accounts` collection.
#[derive(Clone)]
pub struct AccountClient {
    base_url: String,
    auth_token: Option<String>,
}

impl std::fmt::Debug for AccountClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountClient")
            .field("base_url", &self.base_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AccountClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// Attach `token` to every request. An empty token is ignored.
    pub fn with_auth_token(mut self, token: Option<&str>) -> Self {
        self.auth_token = token.filter(|t| !t.is_empty()).map(str::to_string);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_accounts(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.collection_path(), None)
    }

    pub fn build_get_account(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(self.request(HttpMethod::Get, self.item_path(id)?, None))
    }

    /// Same wire request as `build_get_account`; only the parsing differs.
    pub fn build_account_exists(&self, id: &str) -> Result<HttpRequest, ApiError> {
        self.build_get_account(id)
    }

    pub fn build_create_account(&self, input: &CreateAccount) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, self.collection_path(), Some(body)))
    }

    pub fn build_delete_account(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(self.request(HttpMethod::Delete, self.item_path(id)?, None))
    }

    pub fn parse_list_accounts(&self, response: HttpResponse) -> Result<Vec<Account>, ApiError> {
        check_status(&response, &[200])?;
        serde_json::from_slice(&response.body).map_err(|e| {
            warn!(body = %response.body_text(), error = %e, "failed to parse account list");
            ApiError::Decode(e.to_string())
        })
    }

    pub fn parse_get_account(&self, response: HttpResponse) -> Result<Account, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn parse_account_exists(&self, response: HttpResponse) -> Result<bool, ApiError> {
        match response.status {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(ApiError::UnknownStatus(status)),
        }
    }

    pub fn parse_create_account(&self, response: HttpResponse) -> Result<Account, ApiError> {
        check_status(&response, &[200, 201])?;
        decode(&response)
    }

    /// `true` when the account was removed, `false` when it did not exist.
    pub fn parse_delete_account(&self, response: HttpResponse) -> Result<bool, ApiError> {
        match response.status {
            200 | 204 => Ok(true),
            404 => Ok(false),
            403 => Err(ApiError::Unauthorized),
            status => Err(ApiError::UnknownStatus(status)),
        }
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let mut headers = vec![("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string())];
        if let Some(token) = &self.auth_token {
            headers.push((AUTH_HEADER.to_string(), token.clone()));
        }
        HttpRequest {
            method,
            path,
            headers,
            body,
        }
    }

    fn collection_path(&self) -> String {
        format!("{}/accounts", self.base_url)
    }

    fn item_path(&self, id: &str) -> Result<String, ApiError> {
        if id.is_empty() {
            return Err(ApiError::EmptyId);
        }
        Ok(format!("{}/accounts/{id}", self.base_url))
    }
}

/// Reject statuses outside `accepted` before any attempt to decode the body.
fn check_status(response: &HttpResponse, accepted: &[u16]) -> Result<(), ApiError> {
    if accepted.contains(&response.status) {
        return Ok(());
    }
    Err(ApiError::BadStatus {
        status: response.status,
        body: response.body_text(),
    })
}

fn decode<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}
