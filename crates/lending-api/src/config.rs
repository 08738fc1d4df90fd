//! Server configuration.
//!
//! Sources, highest priority first: `LENDING__*` environment variables, an
//! optional `<prefix>.toml` file, then built-in defaults.

use std::path::PathBuf;

use serde::Deserialize;

use lending_graph::GraphConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Directory served as the router fallback, if set.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub neo4j: GraphConfig,
}

impl ApiConfig {
    /// Load from `<file_prefix>.toml` (if present) and the environment.
    pub fn load(file_prefix: &str) -> anyhow::Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("LENDING")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}
