use tracing::{info, warn};

use quickchat::{Config, JsonFilePersistence, MessageSession};

fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = quickchat::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        quickchat::logging::init_console_only(&config.logging.level);
    }

    let config = match config.validate() {
        Ok(()) => config,
        Err(e) => {
            warn!("{e}; falling back to defaults");
            Config::default()
        }
    };

    info!("QuickChat - message composer");

    let port = JsonFilePersistence::new(&config.storage.path);
    let session = MessageSession::open(
        &port,
        config.storage.reload_policy(),
        config.messaging.default_sender.clone(),
    );

    let report = session.report();
    info!(
        sent = report.counts.sent,
        stored = report.counts.stored,
        disregarded = report.counts.disregarded,
        "message store loaded"
    );
    if let Some(longest) = &report.longest_sent {
        info!("Longest sent message: {}", longest.summary_line());
    }
    for message in session.recent_sent() {
        info!("{message}");
    }

    if let Err(e) = session.save(&port) {
        warn!("failed to save messages: {e}");
    }
}
