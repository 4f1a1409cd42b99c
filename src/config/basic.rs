use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `5000`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Database URL for SQLite. The file is created on first start.
    /// TOML: `basic.database_url`. Default: `sqlite://database.db`.
    #[serde(default)]
    pub database_url: String,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default)]
    pub loglevel: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            database_url: "sqlite://database.db".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

fn default_listen_port() -> u16 {
    5000
}
