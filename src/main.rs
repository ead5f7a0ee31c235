//! backend-config
//!
//! Loads a backend config file, extracts the server settings and prints them
//! as JSON. With `--watch`, keeps running and prints the settings again every
//! time the file changes.
//!
//! ```text
//! config file ──▶ loader ──▶ ConfigTree ──▶ options ──▶ ServerSettings ──▶ stdout
//!                    ▲                                        │
//!                    └──────────── watcher (--watch) ◀────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use backend_config::config::{load_settings, ConfigFormat, ConfigWatcher};
use backend_config::observability::logging;
use backend_config::ServerSettings;

#[derive(Parser)]
#[command(name = "backend-config")]
#[command(about = "Extract server settings from a backend config file", long_about = None)]
struct Cli {
    /// Config file (.toml or .json).
    file: PathBuf,

    /// Override format detection by file extension.
    #[arg(short, long, value_enum)]
    format: Option<ConfigFormat>,

    /// Keep running and print settings on every change.
    #[arg(short, long)]
    watch: bool,

    /// Pretty-print JSON output.
    #[arg(short, long)]
    pretty: bool,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let settings = load_settings(&cli.file, cli.format)?;
    tracing::info!(
        path = ?cli.file,
        listen_port = ?settings.base.listen_port,
        cors = settings.cors.is_some(),
        https = settings.https.is_some(),
        "Configuration loaded"
    );
    print_settings(&settings, cli.pretty)?;

    if !cli.watch {
        return Ok(());
    }

    let (watcher, mut updates) = ConfigWatcher::new(&cli.file, cli.format, settings);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            Some(settings) = updates.recv() => print_settings(&settings, cli.pretty)?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received Ctrl+C, stopping watcher");
                break;
            }
        }
    }

    Ok(())
}

fn print_settings(settings: &ServerSettings, pretty: bool) -> Result<(), serde_json::Error> {
    let json = if pretty {
        serde_json::to_string_pretty(settings)?
    } else {
        serde_json::to_string(settings)?
    };
    println!("{}", json);
    Ok(())
}
