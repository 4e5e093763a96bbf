// rest_api/src/config.rs

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

fn default_jwt_ttl_secs() -> u64 {
    8 * 60 * 60
}

/// Storage section of the server config.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub engine: String, // "memory" | "sled"
    pub data_directory: String,
}

/// Represents the configuration for the REST API server itself.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    #[serde(default = "default_jwt_ttl_secs")]
    pub jwt_ttl_secs: u64,
    pub roles_file: String,
    pub storage: StorageSettings,
}

// Wrapper struct to match the 'server:' key in the YAML config.
#[derive(Debug, Deserialize)]
struct ServerConfigWrapper {
    server: ServerConfig,
}

/// Loads the server configuration from `server_config.yaml`, then applies
/// the `HOSPITAL_REST_PORT` and `HOSPITAL_JWT_SECRET` environment overrides.
pub fn load_server_config(config_file_path: Option<PathBuf>) -> Result<ServerConfig> {
    let default_config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("server_config.yaml");
    let path_to_use = config_file_path.unwrap_or(default_config_path);

    let config_content = fs::read_to_string(&path_to_use).with_context(|| {
        format!(
            "Failed to read server config file: {}",
            path_to_use.display()
        )
    })?;

    let wrapper: ServerConfigWrapper = serde_yaml2::from_str(&config_content).map_err(|e| {
        anyhow::anyhow!(
            "Failed to parse server config file {}: {}",
            path_to_use.display(),
            e
        )
    })?;
    let mut config = wrapper.server;

    if let Ok(port) = env::var("HOSPITAL_REST_PORT") {
        config.port = port
            .parse()
            .with_context(|| format!("Invalid HOSPITAL_REST_PORT value: {}", port))?;
    }
    if let Ok(secret) = env::var("HOSPITAL_JWT_SECRET") {
        config.jwt_secret = secret;
    }

    Ok(config)
}
