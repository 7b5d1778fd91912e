//! Immutable connection settings for the accounts service.

use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Where the service lives and how to authenticate against it.
///
/// Bound once at client construction and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    /// PEM file whose certificates replace the default trust roots.
    pub ca_cert_path: Option<PathBuf>,
    /// Sent verbatim in the `gameon-jwt` header.
    pub auth_token: Option<String>,
}

impl ServiceConfig {
    /// Empty `ca_cert_path` or `auth_token` means "not set".
    pub fn new(base_url: impl Into<String>, ca_cert_path: &str, auth_token: &str) -> Self {
        Self {
            base_url: base_url.into(),
            ca_cert_path: non_empty(ca_cert_path).map(PathBuf::from),
            auth_token: non_empty(auth_token).map(str::to_string),
        }
    }

    pub fn from_env() -> Self {
        let base_url = env::var("ACCOUNTS_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let ca_cert_path = env::var("ACCOUNTS_CA_CERT").unwrap_or_default();
        let auth_token = env::var("ACCOUNTS_TOKEN").unwrap_or_default();
        Self::new(base_url, &ca_cert_path, &auth_token)
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("base_url", &self.base_url)
            .field("ca_cert_path", &self.ca_cert_path)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_disable_optional_settings() {
        let config = ServiceConfig::new("https://example.test", "", "");
        assert_eq!(config.base_url, "https://example.test");
        assert!(config.ca_cert_path.is_none());
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn non_empty_strings_are_kept_verbatim() {
        let config = ServiceConfig::new("https://example.test", "/etc/ca.pem", "tok en");
        assert_eq!(config.ca_cert_path, Some(PathBuf::from("/etc/ca.pem")));
        assert_eq!(config.auth_token.as_deref(), Some("tok en"));
    }

    // The only test in this crate touching ACCOUNTS_*; all cases run in sequence.
    #[test]
    fn from_env_reads_accounts_variables() {
        env::remove_var("ACCOUNTS_URL");
        env::remove_var("ACCOUNTS_CA_CERT");
        env::remove_var("ACCOUNTS_TOKEN");
        let config = ServiceConfig::from_env();
        assert_eq!(config, ServiceConfig::new(DEFAULT_BASE_URL, "", ""));

        env::set_var("ACCOUNTS_URL", "https://accounts.example");
        env::set_var("ACCOUNTS_CA_CERT", "/etc/accounts/ca.pem");
        env::set_var("ACCOUNTS_TOKEN", "jwt");
        let config = ServiceConfig::from_env();
        assert_eq!(config.base_url, "https://accounts.example");
        assert_eq!(config.ca_cert_path, Some(PathBuf::from("/etc/accounts/ca.pem")));
        assert_eq!(config.auth_token.as_deref(), Some("jwt"));

        env::set_var("ACCOUNTS_CA_CERT", "");
        env::set_var("ACCOUNTS_TOKEN", "");
        let config = ServiceConfig::from_env();
        assert!(config.ca_cert_path.is_none());
        assert!(config.auth_token.is_none());

        env::remove_var("ACCOUNTS_URL");
        env::remove_var("ACCOUNTS_CA_CERT");
        env::remove_var("ACCOUNTS_TOKEN");
    }

    #[test]
    fn debug_redacts_token() {
        let config = ServiceConfig::new("https://example.test", "", "very-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
