use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Upstream places key. Only the proxy needs it; clients talk to the proxy.
    pub google_places_api_key: Option<String>,
    pub upstream_base_url: String,
    pub proxy_base_url: String,
    pub request_timeout_secs: u64,
    pub static_dir: Option<PathBuf>,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,
    pub state_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "google_places_api_key",
                &self.google_places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("upstream_base_url", &self.upstream_base_url)
            .field("proxy_base_url", &self.proxy_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("static_dir", &self.static_dir)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("state_path", &self.state_path)
            .finish()
    }
}
