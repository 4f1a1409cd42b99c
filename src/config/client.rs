use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the items API.
    /// TOML: `client.api_url`. Default: `http://localhost:5000`.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

fn default_api_url() -> Url {
    Url::parse("http://localhost:5000").expect("valid default api url")
}
