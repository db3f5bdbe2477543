// ============================
// riskweb-backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::net::SocketAddr;

/// Application settings, read once at process start and immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Log level filter
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Token signing secret
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    /// Token signing algorithm (HMAC family)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Access token lifetime in minutes
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: i64,
    /// Expected audience for federated logins (the registered client id).
    /// Federated login answers a server-misconfiguration error when unset.
    #[serde(default)]
    pub google_client_id: Option<String>,
    /// Comma-separated CORS origin allow-list
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_secret_key() -> String {
    // dev fallback, override in any real deployment
    "change_me".to_string()
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_access_token_minutes() -> i64 {
    60
}

fn default_allowed_origins() -> String {
    "http://localhost:5173,http://127.0.0.1:5173".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            log_level: default_log_level(),
            secret_key: default_secret_key(),
            algorithm: default_algorithm(),
            access_token_minutes: default_access_token_minutes(),
            google_client_id: None,
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` (if present), overridden by
    /// `RISKWEB_`-prefixed environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load settings from an explicit TOML path plus the environment.
    pub fn load_from(path: &str) -> Result<Self> {
        let settings = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("RISKWEB_"))
            .extract()?;
        Ok(settings)
    }

    /// The configured origin allow-list, split and trimmed.
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.algorithm, "HS256");
        assert_eq!(settings.access_token_minutes, 60);
        assert!(settings.google_client_id.is_none());
        assert_eq!(settings.origins().len(), 2);
    }

    #[test]
    fn origins_split_and_trim() {
        let settings = Settings {
            allowed_origins: "http://a.example, https://b.example ,".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            settings.origins(),
            vec!["http://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("RISKWEB_SECRET_KEY", "test-secret");
            jail.set_env("RISKWEB_ACCESS_TOKEN_MINUTES", "5");
            jail.set_env("RISKWEB_GOOGLE_CLIENT_ID", "client-123.apps.example");
            let settings = Settings::load().expect("load");
            assert_eq!(settings.secret_key, "test-secret");
            assert_eq!(settings.access_token_minutes, 5);
            assert_eq!(
                settings.google_client_id.as_deref(),
                Some("client-123.apps.example")
            );
            Ok(())
        });
    }
}
