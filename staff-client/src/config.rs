//! Client configuration

/// Client configuration for connecting to the staff server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
        }
    }

    /// `STAFF_API_URL` / `STAFF_API_TIMEOUT`, falling back to the defaults
    pub fn from_env() -> Self {
        let mut config = match std::env::var("STAFF_API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        };
        if let Some(timeout) = std::env::var("STAFF_API_TIMEOUT")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config.timeout = timeout;
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_with_timeout() {
        let config = ClientConfig::new("http://staff:9000").with_timeout(5);
        assert_eq!(config.base_url, "http://staff:9000");
        assert_eq!(config.timeout, 5);
    }
}
