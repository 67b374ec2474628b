pub async fn run_versions() -> i32 {
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

    match client.list_versions().await {
        Ok(versions) => {
            if versions.is_empty() {
                println!("No frozen versions");
            } else {
                for version in versions {
                    println!("{}", version);
                }
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

pub async fn run_apps(all: bool) -> i32 {
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

    match client.list_apps(all).await {
        Ok(apps) => {
            if apps.is_empty() {
                println!("No apps in the repository");
                return 0;
            }
            for app in apps {
                if all && !app.versions.is_empty() {
                    println!("{}: {}", app.name, app.versions.join(", "));
                } else {
                    match app.latest_version {
                        Some(version) => println!("{} (latest: {})", app.name, version),
                        None => println!("{}", app.name),
                    }
                }
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
