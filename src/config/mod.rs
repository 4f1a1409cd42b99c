mod basic;
mod client;

pub use basic::BasicConfig;
pub use client::ClientConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Settings used by the HTTP client and `itembox-cli` (see `client` table in config.toml).
    #[serde(default)]
    pub client: ClientConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "ITEMBOX_";

impl Config {
    /// Builds a Figment that merges defaults, `config.toml` if present, and `ITEMBOX_*` env vars.
    ///
    /// Nested keys use `__` in env var names, e.g. `ITEMBOX_BASIC__LISTEN_PORT=6000`.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
