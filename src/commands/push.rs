use std::path::PathBuf;

use heleus::api::client::validate_apk;

pub async fn run(apk_path: PathBuf) -> i32 {
    let config = match super::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        }
    };

    // Reject bad paths before any network traffic.
    if let Err(e) = validate_apk(&apk_path) {
        eprintln!("Error: {}", e);
        return 1;
    }

    let client = match super::connect(&config).await {
        Some(client) => client,
        None => return 1,
    };

    match client.push(&apk_path).await {
        Ok(msg) => {
            println!("{}", msg.text());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
