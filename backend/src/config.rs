//! Server configuration resolved from CLI flags and environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration for `serve`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory holding `snapshot.json` and `images/`; in-memory when absent
    pub data_dir: Option<PathBuf>,
    /// Origin used to build image URLs; defaults to `http://localhost:<port>`
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: None,
            public_url: None,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn public_url(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_defaults_to_localhost_port() {
        let config = ServerConfig { port: 8080, ..Default::default() };
        assert_eq!(config.public_url(), "http://localhost:8080");
    }

    #[test]
    fn test_public_url_override_is_trimmed() {
        let config = ServerConfig {
            public_url: Some("https://kiosk.example/".into()),
            ..Default::default()
        };
        assert_eq!(config.public_url(), "https://kiosk.example");
        assert_eq!(config.addr().port(), DEFAULT_PORT);
    }
}
