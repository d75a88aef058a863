use std::env;

// Runtime constants and environment lookups.

pub const DEFAULT_HTTP_PORT: u16 = 3000;
pub const DEFAULT_CLUSTER_HOST: &str = "127.0.0.1";
pub const DEFAULT_CLUSTER_PORT: u16 = 6379;

// Diagnostics filter when RUST_LOG is unset; the cluster client is chatty at info.
pub const DEFAULT_LOG_FILTER: &str = "info,redis=warn";

// Output shape for tracing diagnostics on stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(raw) if raw.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

pub fn log_format() -> LogFormat {
    LogFormat::from_value(env::var("LOG_FORMAT").ok().as_deref())
}

pub fn http_port() -> u16 {
    env::var("PROBE_HTTP_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_HTTP_PORT)
}

// Cluster endpoint under test, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeConfig {
    pub endpoint: String,
    pub port: u16,
}

impl ProbeConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("ELASTICACHE_ENDPOINT").ok(),
            env::var("ELASTICACHE_PORT").ok(),
        )
    }

    pub fn from_values(endpoint: Option<String>, port: Option<String>) -> Self {
        let endpoint = endpoint
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CLUSTER_HOST.to_string());

        let port = match port.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_CLUSTER_PORT,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = raw, "invalid ELASTICACHE_PORT, using default");
                DEFAULT_CLUSTER_PORT
            }),
        };

        Self { endpoint, port }
    }

    pub fn cluster_url(&self) -> String {
        format!("redis://{}:{}", self.endpoint, self.port)
    }
}
