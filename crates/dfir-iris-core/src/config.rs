//! Transport configuration resolved from the environment
//!
//! Read once at process start. Missing required values are a [`Error::Config`].

use crate::error::{Error, Result};
use std::fmt;

/// Base URL of the DFIR-IRIS instance, e.g. `https://iris.example.org`
pub const ENV_URL: &str = "DFIR_IRIS_URL";
/// API key sent as a bearer token
pub const ENV_API_KEY: &str = "DFIR_IRIS_API_KEY";
/// Disables TLS certificate verification when set to a truthy value
pub const ENV_TLS_SKIP_VERIFY: &str = "DFIR_IRIS_TLS_SKIP_VERIFY";

/// Immutable connection settings for [`crate::IrisClient`]
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute base URL without trailing slash
    pub base_url: String,
    /// Opaque bearer credential
    pub api_key: String,
    /// Whether server certificates are validated.
    ///
    /// Security relevant: `false` accepts any certificate and is meant only
    /// for lab or self-signed deployments.
    pub verify_tls: bool,
}

impl Config {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            api_key: api_key.into(),
            verify_tls: true,
        }
    }

    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    /// Load from the process environment
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = required(&lookup, ENV_URL)?;
        let api_key = required(&lookup, ENV_API_KEY)?;
        let skip_verify = lookup(ENV_TLS_SKIP_VERIFY)
            .map(|raw| is_truthy(&raw))
            .unwrap_or(false);

        Ok(Self::new(base_url, api_key).with_verify_tls(!skip_verify))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(Error::config(format!(
            "{} environment variable is required",
            key
        ))),
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

// Any non-empty value enables the flag unless it is an explicit "off" spelling.
fn is_truthy(raw: &str) -> bool {
    let value = raw.trim().to_ascii_lowercase();
    !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
}
