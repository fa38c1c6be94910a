use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const BASE_URL_ENV: &str = "REGISTRY_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Where the institution endpoints live. An empty base means same origin,
/// which is what the browser build uses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub base_url: String,
}

impl ClientConfig {
    pub fn same_origin() -> Self {
        Self::default()
    }

    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !trimmed.is_empty()
            && !trimmed.starts_with("http://")
            && !trimmed.starts_with("https://")
        {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Reads `REGISTRY_BASE_URL`, falling back to the local backend.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(&base)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::institution_path;

    #[test]
    fn same_origin_keeps_paths_relative() {
        let config = ClientConfig::same_origin();
        assert_eq!(config.url(&institution_path(3)), "/api/medical-institutions/3");
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ClientConfig::new("https://registry.example/").expect("valid");
        assert_eq!(
            config.url("/api/medical-institutions"),
            "https://registry.example/api/medical-institutions"
        );
    }

    #[test]
    fn rejects_non_http_base() {
        assert_eq!(
            ClientConfig::new("ftp://registry.example"),
            Err(ConfigError::InvalidBaseUrl("ftp://registry.example".into()))
        );
    }

    #[test]
    fn deserializes_with_default_base() {
        let config: ClientConfig = serde_json::from_str("{}").expect("decode");
        assert_eq!(config, ClientConfig::same_origin());
    }
}
