//! Error types for talking to the registry backend

/// Failure of a single request against the institution endpoints.
///
/// The view operations treat every variant the same way (log, swallow,
/// leave the view as it was); the variants exist so a terminal front end
/// can report something useful.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("{method} {url} returned status {status}")]
    Status {
        method: String,
        url: String,
        status: u16,
    },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("not found: {0}")]
    NotFound(String),
}

/// Invalid client configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base url '{0}': expected an http:// or https:// prefix")]
    InvalidBaseUrl(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Maps a response status onto the error taxonomy. Any 2xx is success.
pub fn check_status(method: &str, url: &str, status: u16) -> Result<()> {
    match status {
        200..=299 => Ok(()),
        404 => Err(ApiError::NotFound(url.to_string())),
        _ => Err(ApiError::Status {
            method: method.to_string(),
            url: url.to_string(),
            status,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_2xx_is_success() {
        for status in [200, 201, 204, 299] {
            assert!(check_status("POST", "/x", status).is_ok(), "{status}");
        }
    }

    #[test]
    fn not_found_is_distinguished() {
        let err = check_status("GET", "/api/medical-institutions/9", 404).unwrap_err();
        assert_eq!(err, ApiError::NotFound("/api/medical-institutions/9".into()));
    }

    #[test]
    fn other_statuses_carry_method_and_url() {
        let err = check_status("PUT", "/api/medical-institutions/42", 500).unwrap_err();
        assert_eq!(
            err.to_string(),
            "PUT /api/medical-institutions/42 returned status 500"
        );
    }
}
