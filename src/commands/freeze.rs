pub async fn run(version: String) -> i32 {
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

    match client.freeze(&version).await {
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
