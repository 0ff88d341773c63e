use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub source: SourceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with the built frontend (`trunk build` output)
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "dist".into()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Where the order list comes from.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Spreadsheet export, header row with the feed field names
    Csv { path: String },
    /// Any payload shape the feed decoder accepts
    Json { path: String },
    /// Remote feed (e.g. a published spreadsheet script), fetched once at start-up
    Upstream {
        url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000
static_dir = "dist"

[source]
kind = "csv"
path = "data/orders.csv"
"#;

/// Environment variable with an explicit config file path
const CONFIG_ENV: &str = "ORDER_FEED_CONFIG";

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Path in `ORDER_FEED_CONFIG`
/// 2. Next to the executable (for production)
/// 3. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        tracing::info!("Loading config from {}: {}", CONFIG_ENV, explicit);
        let contents = std::fs::read_to_string(&explicit)?;
        return parse_config(&contents);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if let SourceConfig::Upstream { url, .. } = &config.source {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("source.url must be an http(s) URL, got '{}'", url);
        }
    }
    Ok(config)
}

/// Resolve a configured file path.
/// Relative paths are taken relative to the executable directory.
pub fn resolve_path(path_str: &str) -> PathBuf {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved = exe_dir.join(path);
            if resolved.exists() {
                return resolved;
            }
        }
    }

    // Fallback: relative to current directory
    PathBuf::from(path_str)
}
