//! Blocking accounts client: one network round trip per call.
//!
//! # Design
//! `AccountService` composes the pure `AccountClient` with a `Transport`.
//! It holds only immutable state, so a single value can be shared across
//! threads (wrap it in an `Arc`). Nothing is cached and nothing is retried:
//! every call is an independent request whose failure goes straight back to
//! the caller.

use tracing::debug;

use crate::client::AccountClient;
use crate::config::ServiceConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Account, CreateAccount};

#[derive(Debug)]
pub struct AccountService<T: Transport = UreqTransport> {
    client: AccountClient,
    transport: T,
}

impl AccountService<UreqTransport> {
    /// Validate `config` and build the shared transport.
    ///
    /// An unreadable or empty CA file fails here with `ApiError::Config`,
    /// before any request is attempted.
    pub fn connect(config: &ServiceConfig) -> Result<Self, ApiError> {
        let transport = UreqTransport::new(config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> AccountService<T> {
    pub fn with_transport(config: &ServiceConfig, transport: T) -> Self {
        let client = AccountClient::new(&config.base_url).with_auth_token(config.auth_token.as_deref());
        Self { client, transport }
    }

    pub fn client(&self) -> &AccountClient {
        &self.client
    }

    pub fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        let response = self.round_trip(self.client.build_list_accounts())?;
        self.client.parse_list_accounts(response)
    }

    pub fn get_account(&self, id: &str) -> Result<Account, ApiError> {
        let response = self.round_trip(self.client.build_get_account(id)?)?;
        self.client.parse_get_account(response)
    }

    pub fn account_exists(&self, id: &str) -> Result<bool, ApiError> {
        let response = self.round_trip(self.client.build_account_exists(id)?)?;
        self.client.parse_account_exists(response)
    }

    pub fn create_account(&self, input: &CreateAccount) -> Result<Account, ApiError> {
        let response = self.round_trip(self.client.build_create_account(input)?)?;
        self.client.parse_create_account(response)
    }

    /// `Ok(false)` means the account was already gone.
    pub fn delete_account(&self, id: &str) -> Result<bool, ApiError> {
        let response = self.round_trip(self.client.build_delete_account(id)?)?;
        self.client.parse_delete_account(response)
    }

    fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method.as_str();
        let path = request.path.clone();
        match self.transport.execute(request) {
            Ok(response) => {
                debug!(method, %path, status = response.status, "accounts request");
                Ok(response)
            }
            Err(e) => {
                debug!(method, %path, error = %e, "accounts request failed");
                Err(e)
            }
        }
    }
}
