use std::{env, net::SocketAddr};
use url::Url;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL of the REST backend.
    pub api_base: Url,
    /// `HRMS_API_URL` was unset and `api_base` points back at this server.
    pub api_base_defaulted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("HRMS_API_URL is not a valid URL: {0}")]
    InvalidApiUrl(#[from] url::ParseError),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::var("PORT").ok(), env::var("HRMS_API_URL").ok())
    }

    /// Without `HRMS_API_URL` the backend is assumed to share this server's origin.
    pub fn from_vars(port: Option<String>, api_url: Option<String>) -> Result<Self, ConfigError> {
        let port = port
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let (api_base, api_base_defaulted) =
            match api_url.filter(|value| !value.trim().is_empty()) {
                Some(value) => (Url::parse(value.trim())?, false),
                None => (Url::parse(&format!("http://127.0.0.1:{port}/"))?, true),
            };
        Ok(Self {
            port,
            api_base,
            api_base_defaulted,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
