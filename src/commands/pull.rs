use std::path::Path;

use heleus::api::models::PullTarget;

pub async fn run(app_name: Option<String>, version: Option<String>) -> i32 {
    let config = match super::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    let client = match super::connect(&config).await {
        Some(client) => client,
        None => return 1,
    };

    let target = PullTarget::from_args(app_name, version);

    match client.pull(&target, Path::new(".")).await {
        Ok(msg) => {
            println!("{}", msg);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
