//! Runtime configuration loaded from environment variables.
//!
//! Every setting has a logged default so the server starts with no
//! environment at all. Malformed values abort startup.

use anyhow::{anyhow, Result};
use std::{env, fmt::Display, net::IpAddr, path::PathBuf, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
    pub allowed_origin: String,
    /// Prebuilt frontend bundle served for non-API paths
    pub static_dir: Option<PathBuf>,
    /// Hostname the app is served under; sync stays off on localhost
    pub public_host: String,
    pub google_client_id: Option<String>,
    pub google_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: try_load(&lookup, "DAILYLIFE_HOST", "127.0.0.1")?,
            port: try_load(&lookup, "DAILYLIFE_PORT", "3000")?,
            data_dir: try_load(&lookup, "DAILYLIFE_DATA_DIR", "./data")?,
            allowed_origin: try_load(&lookup, "DAILYLIFE_ALLOWED_ORIGIN", "http://localhost:8080")?,
            static_dir: optional(&lookup, "DAILYLIFE_STATIC_DIR").map(PathBuf::from),
            public_host: try_load(&lookup, "DAILYLIFE_PUBLIC_HOST", "localhost")?,
            google_client_id: optional(&lookup, "GOOGLE_CLIENT_ID"),
            google_api_key: optional(&lookup, "GOOGLE_API_KEY"),
            openai_api_key: optional(&lookup, "OPENAI_API_KEY"),
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow!("Invalid value for {key}: {e}")
    })
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.public_host, "localhost");
        assert!(config.static_dir.is_none());
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DAILYLIFE_PORT", "8181"),
            ("DAILYLIFE_DATA_DIR", "/tmp/dailylife"),
            ("OPENAI_API_KEY", "sk-test"),
            ("GOOGLE_API_KEY", "   "),
        ]))
        .unwrap();
        assert_eq!(config.port, 8181);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/dailylife"));
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert!(config.google_api_key.is_none());
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("DAILYLIFE_PORT", "not-a-port")]));
        assert!(result.is_err());
    }
}
