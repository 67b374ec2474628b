use heleus::config::settings::{Config, ConfigError};

pub async fn run_server(host: String, port: u16) -> i32 {
    let config = Config { host, port };

    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        return 1;
    }

    match config.save_to_file() {
        Ok(()) => {
            println!("Server configuration updated: {}", config.server_url());
            0
        }
        Err(ConfigError::FileWrite(e)) => {
            eprintln!("Failed to write configuration file: {}", e);
            1
        }
        Err(e) => {
            eprintln!("Failed to save configuration: {}", e);
            1
        }
    }
}

pub async fn run_show() -> i32 {
    match Config::from_file() {
        Ok(config) => {
            println!("\nCurrent configuration:");
            println!("Server: {}", config.server_url());
            0
        }
        Err(ConfigError::NotFound) => {
            let defaults = Config::default();
            println!("\nNo configuration file found, using defaults:");
            println!("Server: {}", defaults.server_url());
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}
