use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::application::EmptyCompletionPolicy;
use crate::connector::adapter::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_PORT: u16 = 5000;

/// Everything the backend needs, passed in explicitly at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Provider credential. `None` is allowed; requests then fail at the gateway.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub empty_completion: EmptyCompletionPolicy,
    /// Serve with the offline echo gateway instead of the provider.
    pub mock_completions: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            empty_completion: EmptyCompletionPolicy::Accept,
            mock_completions: false,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// First four characters of the key, for startup logs.
    pub fn api_key_prefix(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .map(|k| k.chars().take(4).collect())
    }
}
