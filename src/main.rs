use clap::{Parser, Subcommand};
use std::path::PathBuf;
mod commands;

#[derive(Parser)]
#[command(name = "heleus")]
#[command(
    about = "Heleus - APK version management tool",
    long_about = r#"
        Heleus is a command-line client for the Perseus APK version-management server.
        It supports:
        • Pushing and pulling APK artifacts
        • Freezing current app versions under an immutable label
    "#
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the Perseus server connection
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Push an APK to the repository
    Push {
        /// Path to the APK file
        apk_path: PathBuf,
    },
    /// Pull APK(s) from the repository
    Pull {
        /// Name of the app to pull (all apps when omitted)
        app_name: Option<String>,
        /// Version to pull (defaults to latest)
        #[arg(requires = "app_name")]
        version: Option<String>,
        /// Pull this version of every app
        #[arg(
            long = "version",
            value_name = "VERSION",
            conflicts_with_all = ["app_name", "version"]
        )]
        bundle_version: Option<String>,
    },
    /// Freeze the current app versions under a label
    Freeze {
        /// Version name to freeze
        version: String,
    },
    /// List frozen versions
    Versions,
    /// List apps known to the server
    Apps {
        /// Include every stored version per app
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set the server host and port
    Server {
        /// Server hostname or IP
        host: String,
        /// Server port
        #[arg(value_parser = clap::value_parser!(u16).range(1..))]
        port: u16,
    },
    /// Show the current configuration
    Show,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Server { host, port } => commands::config::run_server(host, port).await,
            ConfigCommands::Show => commands::config::run_show().await,
        },
        Commands::Push { apk_path } => commands::push::run(apk_path).await,
        Commands::Pull {
            app_name,
            version,
            bundle_version,
        } => commands::pull::run(app_name, version.or(bundle_version)).await,
        Commands::Freeze { version } => commands::freeze::run(version).await,
        Commands::Versions => commands::list::run_versions().await,
        Commands::Apps { all } => commands::list::run_apps(all).await,
    };

    std::process::exit(code);
}
