use placeholdr_core::{DEFAULT_HIT_BUCKETS_MS, DEFAULT_LIMIT};
use serde::{Deserialize, Serialize};

/// Default port for the placeholdr server
pub const DEFAULT_PORT: u16 = placeholdr_server::DEFAULT_PORT;

/// Default host for the placeholdr server
pub const DEFAULT_HOST: &str = placeholdr_server::DEFAULT_HOST;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawPlaceholdrConfig {
    #[serde(default)]
    pub server: RawServerConfig,

    #[serde(default)]
    pub stats: RawStatsConfig,
}

/// Server config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawServerConfig {
    /// Host to bind to
    pub host: Option<String>,

    /// Port for the placeholdr server
    pub port: Option<u16>,
}

/// Stats config as stored in TOML
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawStatsConfig {
    /// Items returned by list endpoints without an explicit `limit`
    pub default_limit: Option<usize>,

    /// Hit bucket thresholds in milliseconds
    pub hit_buckets_ms: Option<Vec<u64>>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PlaceholdrConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub stats: StatsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port for the placeholdr server
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsConfig {
    /// Items returned by list endpoints without an explicit `limit`
    pub default_limit: usize,

    /// Hit bucket thresholds in milliseconds
    pub hit_buckets_ms: Vec<u64>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            hit_buckets_ms: DEFAULT_HIT_BUCKETS_MS.to_vec(),
        }
    }
}
