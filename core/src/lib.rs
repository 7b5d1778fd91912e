//! Blocking client for the player accounts service.
//!
//! # Overview
//! Lists, fetches, checks, creates and deletes records in the remote
//! `/accounts` collection over HTTP(S), optionally trusting only a pinned CA
//! and sending a `gameon-jwt` token with every request.
//!
//! # Design
//! - `AccountClient` is pure: `build_*` produces an `HttpRequest`, `parse_*`
//!   consumes an `HttpResponse`, so status mapping is testable without I/O.
//! - `Transport` executes requests; `UreqTransport` builds one agent up front
//!   and shares it across calls.
//! - `AccountService` pairs the two and is the type most callers want.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::AccountClient;
pub use config::ServiceConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::AccountService;
pub use transport::{Transport, UreqTransport, MAX_RESPONSE_BYTES, REQUEST_TIMEOUT};
pub use types::{Account, CreateAccount, Credentials, Location};
