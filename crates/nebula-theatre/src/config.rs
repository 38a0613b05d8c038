//! Server configuration.

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8001;
/// Default listening host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Where the HTTP service listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind; also reported by the health endpoints.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
