//! Frontend configuration

use docuchat_http::ClientConfig;
use docuchat_http::config::DEFAULT_BASE_URL;

/// Application configuration
pub struct AppConfig;

impl AppConfig {
    /// Backend address, fixed at build time through `DOCUCHAT_API_BASE_URL`
    pub const API_BASE_URL: &'static str = match option_env!("DOCUCHAT_API_BASE_URL") {
        Some(url) => url,
        None => DEFAULT_BASE_URL,
    };

    /// localStorage key holding the bearer token
    pub const TOKEN_STORAGE_KEY: &'static str = "token";

    /// How long success notices stay on screen
    pub const NOTICE_TIMEOUT_MS: u32 = 4_000;

    pub fn client_config() -> ClientConfig {
        ClientConfig::new(Self::API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_uses_api_base_url() {
        let config = AppConfig::client_config();
        assert_eq!(config.base_url, AppConfig::API_BASE_URL);
        assert!(config.include_credentials);
        assert!(config.normalized_base_url().is_ok());
    }
}
