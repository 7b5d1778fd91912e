//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the seam between the pure request/response layer and I/O.
//! `UreqTransport` builds one ureq `Agent` at construction time and reuses it
//! for every call; the agent is read-only after that, so a single transport
//! can be shared by any number of threads. Status codes are never turned into
//! errors here: interpretation belongs to `AccountClient::parse_*`.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use ureq::tls::{Certificate, PemItem, RootCerts, TlsConfig};
use ureq::{Agent, RequestBuilder};

use crate::config::ServiceConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Upper bound on one full request/response exchange.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Largest response body read into memory, replacing ureq's 10 MB default.
pub const MAX_RESPONSE_BYTES: u64 = 256 * 1024 * 1024;

/// Performs one HTTP round trip.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a shared ureq agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    body_limit: u64,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport")
            .field("body_limit", &self.body_limit)
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    /// Build the agent, loading trust roots from `config.ca_cert_path` if set.
    ///
    /// With a CA file configured, only the certificates in that file are
    /// trusted; the platform roots are not consulted.
    pub fn new(config: &ServiceConfig) -> Result<Self, ApiError> {
        let mut builder = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT));

        if let Some(path) = &config.ca_cert_path {
            let roots = load_ca_certificates(path)?;
            debug!(path = %path.display(), count = roots.len(), "pinned CA certificates");
            builder = builder.tls_config(
                TlsConfig::builder()
                    .root_certs(RootCerts::Specific(Arc::new(roots)))
                    .build(),
            );
        }

        Ok(Self {
            agent: builder.build().new_agent(),
            body_limit: MAX_RESPONSE_BYTES,
        })
    }

    /// Cap response bodies at `limit` bytes; larger bodies fail with
    /// `ApiError::Transport`.
    pub fn with_body_limit(mut self, limit: u64) -> Self {
        self.body_limit = limit;
        self
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;

        let result = match method {
            HttpMethod::Get => with_headers(self.agent.get(path.as_str()), &headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(path.as_str()), &headers).call(),
            HttpMethod::Post => {
                let builder = with_headers(self.agent.post(path.as_str()), &headers);
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        // Raw bytes: UTF-8 and JSON validity are judged per status by the parsers.
        let body = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .read_to_vec()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Parse every certificate in the PEM file at `path`.
fn load_ca_certificates(path: &Path) -> Result<Vec<Certificate<'static>>, ApiError> {
    let pem = std::fs::read(path)
        .map_err(|e| ApiError::Config(format!("reading CA certificate {}: {e}", path.display())))?;

    let mut roots = Vec::new();
    for item in ureq::tls::parse_pem(&pem) {
        let item = item
            .map_err(|e| ApiError::Config(format!("parsing CA certificate {}: {e}", path.display())))?;
        if let PemItem::Certificate(cert) = item {
            roots.push(cert.to_owned());
        }
    }

    if roots.is_empty() {
        return Err(ApiError::Config(format!(
            "no certificates found in {}",
            path.display()
        )));
    }
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_ca_file_is_a_config_error() {
        let config = ServiceConfig::new(
            "https://localhost:1",
            "/nonexistent/account-core/ca.pem",
            "",
        );
        let err = UreqTransport::new(&config).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn no_ca_file_builds_default_transport() {
        let config = ServiceConfig::new("http://localhost:1", "", "");
        let transport = UreqTransport::new(&config).unwrap();
        assert_eq!(transport.body_limit, MAX_RESPONSE_BYTES);
        assert_eq!(transport.with_body_limit(64).body_limit, 64);
    }
}
