//! Server configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

/// Default `tracing` filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "afteraction=info,tower_http=info";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST backend that `/api/*` is forwarded to
    /// Example: http://localhost:8080
    pub api_upstream_url: Option<String>,

    /// `tracing-subscriber` filter directive
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("API_UPSTREAM_URL").ok(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn from_vars(api_upstream_url: Option<String>, log_filter: Option<String>) -> Self {
        Self {
            api_upstream_url: api_upstream_url
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            log_filter: log_filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Check if an upstream API is configured
    pub fn has_upstream(&self) -> bool {
        self.api_upstream_url.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_with_upstream() {
        let config = Config::from_vars(Some("http://api.internal:8080/".to_string()), None);

        assert!(config.has_upstream());
        assert_eq!(
            config.api_upstream_url.as_deref(),
            Some("http://api.internal:8080")
        );
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_config_blank_upstream_is_none() {
        let config = Config::from_vars(Some("   ".to_string()), Some("".to_string()));

        assert!(!config.has_upstream());
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_config_custom_log_filter() {
        let config = Config::from_vars(None, Some("debug".to_string()));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_config_from_env_returns_config() {
        // Actual values depend on environment, so we don't assert specific values
        let config = Config::from_env();
        let _ = config.has_upstream();
        assert!(!config.log_filter.is_empty());
    }
}
