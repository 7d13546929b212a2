use crate::constants::{env, network};
use crate::errors::ToolError;
use std::fmt;
use url::Url;

/// Bearer token for the Qiita API. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// `Ok(None)` for a blank token. A token that cannot travel in an
    /// `Authorization` header is an error, not a missing credential.
    pub fn new(token: impl Into<String>) -> Result<Option<Self>, ToolError> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if !trimmed.chars().all(|c| c.is_ascii_graphic()) {
            return Err(ToolError::invalid_params(format!(
                "{} contains characters not allowed in an HTTP header",
                env::API_TOKEN
            ))
            .with_hint("Copy the access token again without spaces or line breaks."));
        }
        Ok(Some(Self(trimmed.to_string())))
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub credential: Option<Credential>,
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub fn new(base_url: &str, credential: Option<Credential>) -> Result<Self, ToolError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            credential,
            timeout_ms: network::TIMEOUT_API_REQUEST_MS,
        })
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Reads the process environment once. A missing token is not an error
    /// here; every API call reports it instead. A token that is set but
    /// unusable fails immediately.
    pub fn from_env() -> Result<Self, ToolError> {
        let base_url = read_env(env::API_BASE_URL)
            .unwrap_or_else(|| network::QIITA_API_BASE_URL.to_string());
        let credential = match read_env(env::API_TOKEN) {
            Some(raw) => Credential::new(raw)?,
            None => None,
        };
        let mut config = Self::new(&base_url, credential)?;
        if let Some(raw) = read_env(env::API_TIMEOUT_MS) {
            let timeout_ms = raw
                .parse::<u64>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or_else(|| {
                    ToolError::invalid_params(format!(
                        "{} must be a positive integer (got '{}')",
                        env::API_TIMEOUT_MS,
                        raw
                    ))
                })?;
            config = config.with_timeout_ms(timeout_ms);
        }
        Ok(config)
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_base_url(raw: &str) -> Result<Url, ToolError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|err| ToolError::invalid_params(format!("Invalid API base URL '{}': {}", raw, err)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ToolError::invalid_params(format!(
            "API base URL must use http or https (got '{}')",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(ToolError::invalid_params(format!(
            "API base URL cannot carry path segments: {}",
            raw
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_no_credential() {
        assert!(Credential::new("   ").expect("blank is not an error").is_none());
        let credential = Credential::new(" abc ")
            .expect("valid token")
            .expect("credential");
        assert_eq!(credential.bearer(), "Bearer abc");
    }

    #[test]
    fn token_with_inner_space_is_rejected() {
        let err = Credential::new("abc def").expect_err("must reject");
        assert!(err.message.contains("QIITA_API_TOKEN"));
        assert!(err.message.contains("not allowed in an HTTP header"));
        assert!(Credential::new("tok\u{e9}n").is_err());
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("secret-token")
            .expect("valid token")
            .expect("credential");
        let rendered = format!("{:?}", credential);
        assert!(!rendered.contains("secret-token"));
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let config = ClientConfig::new("https://qiita.com/api/v2/", None).expect("config");
        assert_eq!(config.base_url.as_str(), "https://qiita.com/api/v2");
        assert_eq!(config.timeout_ms, network::TIMEOUT_API_REQUEST_MS);
    }

    #[test]
    fn base_url_rejects_other_schemes() {
        let err = ClientConfig::new("ftp://qiita.com/api/v2", None).expect_err("must reject");
        assert!(err.message.contains("http or https"));
    }
}
