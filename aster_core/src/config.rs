use std::env;

use crate::error::ConfigError;

pub const DEFAULT_SERVER_DOMAIN: &str = "0.0.0.0:3000";
pub const DEFAULT_ASTER_SPOT_URL: &str = "https://sapi.asterdex.com";
pub const DEFAULT_ASTER_FUTURES_URL: &str = "https://fapi.asterdex.com";
pub const DEFAULT_MORALIS_URL: &str = "https://deep-index.moralis.io/api/v2.2";
pub const DEFAULT_MORALIS_CHAIN: &str = "bsc";
pub const DEFAULT_SLED_URL: &str = "balance_snapshots.db";

/// Process-wide settings, read once at start-up.
#[derive(Clone)]
pub struct Config {
    pub server_domain: String,
    pub agent_wallet: String,
    pub moralis_api_key: String,
    pub moralis_url: String,
    pub moralis_chain: String,
    pub cron_secret: String,
    pub aster_api_key: String,
    pub aster_api_secret: String,
    pub aster_spot_url: String,
    pub aster_futures_url: String,
    pub sled_url: String,
    pub snapshot_cron: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server_domain: or_default("SERVER_DOMAIN", DEFAULT_SERVER_DOMAIN),
            agent_wallet: required("AGENT_WALLET")?,
            moralis_api_key: required("MORALIS_API_KEY")?,
            moralis_url: trim_base(or_default("MORALIS_URL", DEFAULT_MORALIS_URL)),
            moralis_chain: or_default("MORALIS_CHAIN", DEFAULT_MORALIS_CHAIN),
            cron_secret: required("CRON_SECRET")?,
            aster_api_key: get("MASTER_DEX_API_KEY").unwrap_or_default(),
            aster_api_secret: get("MASTER_DEX_API_SECRET").unwrap_or_default(),
            aster_spot_url: trim_base(or_default("ASTER_SPOT_URL", DEFAULT_ASTER_SPOT_URL)),
            aster_futures_url: trim_base(or_default(
                "ASTER_FUTURES_URL",
                DEFAULT_ASTER_FUTURES_URL,
            )),
            sled_url: or_default("SLED_URL", DEFAULT_SLED_URL),
            snapshot_cron: get("SNAPSHOT_CRON"),
        })
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
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
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup(&[
            ("AGENT_WALLET", "0xwallet"),
            ("MORALIS_API_KEY", "moralis"),
            ("CRON_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.server_domain, DEFAULT_SERVER_DOMAIN);
        assert_eq!(config.aster_spot_url, DEFAULT_ASTER_SPOT_URL);
        assert_eq!(config.aster_futures_url, DEFAULT_ASTER_FUTURES_URL);
        assert_eq!(config.moralis_chain, "bsc");
        assert_eq!(config.aster_api_key, "");
        assert!(config.snapshot_cron.is_none());
    }

    #[test]
    fn test_missing_required_variable() {
        let result = Config::from_lookup(lookup(&[
            ("AGENT_WALLET", "0xwallet"),
            ("MORALIS_API_KEY", "moralis"),
        ]));

        match result {
            Err(ConfigError::Missing(key)) => assert_eq!(key, "CRON_SECRET"),
            Ok(_) => panic!("expected missing CRON_SECRET"),
        }
    }

    #[test]
    fn test_blank_value_is_unset_and_base_is_trimmed() {
        let config = Config::from_lookup(lookup(&[
            ("AGENT_WALLET", "0xwallet"),
            ("MORALIS_API_KEY", "moralis"),
            ("CRON_SECRET", "secret"),
            ("SNAPSHOT_CRON", "  "),
            ("ASTER_SPOT_URL", "http://localhost:9000/"),
        ]))
        .unwrap();

        assert!(config.snapshot_cron.is_none());
        assert_eq!(config.aster_spot_url, "http://localhost:9000");
    }
}
