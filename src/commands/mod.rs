pub mod config;
pub mod freeze;
pub mod list;
pub mod pull;
pub mod push;

use heleus::api::client::PerseusClient;
use heleus::config::settings::{Config, ConfigError};

/// Load the persisted configuration, falling back to the built-in
/// defaults when no config file exists yet.
fn load_config() -> Result<Config, ConfigError> {
    match Config::from_file() {
        Err(ConfigError::NotFound) => Ok(Config::default()),
        other => other,
    }
}

/// Probe the server and hand back a connected client, or report the
/// unreachable server and return `None`.
async fn connect(config: &Config) -> Option<PerseusClient> {
    let client = PerseusClient::new(config);
    if client.check_status().await {
        Some(client)
    } else {
        eprintln!(
            "Error: Cannot connect to Perseus server at {}",
            config.server_url()
        );
        None
    }
}
