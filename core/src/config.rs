//! Client configuration: where the API lives and how requests authenticate.

use std::fmt;

use crate::error::ConfigError;

/// Production base URL of the v2 API.
pub const DEFAULT_BASE_URL: &str = "https://api.ouraring.com/v2";

pub const ACCESS_TOKEN_VAR: &str = "OURA_ACCESS_TOKEN";
pub const BASE_URL_VAR: &str = "OURA_API_URL";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    access_token: Option<String>,
}

impl ClientConfig {
    /// Configuration for a personal access token against production.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: Some(access_token.into()),
        }
    }

    /// Configuration for a transport that authenticates requests itself.
    pub fn unauthenticated() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Reads `OURA_ACCESS_TOKEN` and, if set, `OURA_API_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(ACCESS_TOKEN_VAR)
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingVar(ACCESS_TOKEN_VAR))?;
        let config = Self::new(token.trim());
        match lookup(BASE_URL_VAR) {
            Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                Err(ConfigError::InvalidVar {
                    name: BASE_URL_VAR,
                    reason: format!("`{url}` is not an http(s) URL"),
                })
            }
            Some(url) => Ok(config.with_base_url(&url)),
            None => Ok(config),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_to_production() {
        let config = ClientConfig::new("token");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.access_token(), Some("token"));
        assert_eq!(ClientConfig::unauthenticated().access_token(), None);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("t").with_base_url("http://localhost:3000/v2/");
        assert_eq!(config.base_url(), "http://localhost:3000/v2");
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", ClientConfig::new("secret-token"));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn env_requires_token() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(ACCESS_TOKEN_VAR));

        let err = ClientConfig::from_lookup(lookup(&[(ACCESS_TOKEN_VAR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(ACCESS_TOKEN_VAR));
    }

    #[test]
    fn env_overrides_base_url() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ACCESS_TOKEN_VAR, "abc"),
            (BASE_URL_VAR, "http://127.0.0.1:3000/v2/"),
        ]))
        .unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:3000/v2");
        assert_eq!(config.access_token(), Some("abc"));
    }

    #[test]
    fn env_rejects_non_http_base_url() {
        let err = ClientConfig::from_lookup(lookup(&[(ACCESS_TOKEN_VAR, "abc"), (BASE_URL_VAR, "ftp://x")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: BASE_URL_VAR, .. }));
    }
}
