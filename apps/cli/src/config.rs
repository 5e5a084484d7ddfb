use crate::errors::AppError;

/// Application configuration loaded from environment variables.
///
/// The Reve API key is optional at load time: the offline `render` command
/// needs no credentials, and the networked commands demand the key only when
/// they build the client.
#[derive(Debug, Clone)]
pub struct Config {
    pub reve_api_key: Option<String>,
    /// Base URL override for integration tests and staging; `None` = production.
    pub reve_api_base_url: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self {
            reve_api_key: std::env::var("REVE_API_KEY").ok(),
            reve_api_base_url: std::env::var("REVE_API_BASE_URL").ok(),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// The API key, or the configuration error networked commands surface.
    pub fn require_api_key(&self) -> Result<&str, AppError> {
        self.reve_api_key.as_deref().ok_or_else(|| {
            AppError::Config("REVE_API_KEY environment variable is not set".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_api_key_present() {
        let config = Config {
            reve_api_key: Some("key-123".to_string()),
            reve_api_base_url: None,
            rust_log: "info".to_string(),
        };
        assert_eq!(config.require_api_key().expect("key is set"), "key-123");
    }

    #[test]
    fn test_require_api_key_missing_is_config_error() {
        let config = Config {
            reve_api_key: None,
            reve_api_base_url: None,
            rust_log: "info".to_string(),
        };
        let err = config.require_api_key().expect_err("key is missing");
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("REVE_API_KEY"));
    }
}
