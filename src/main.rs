mod actions;
mod api;
mod config;
mod console;
mod tui;

use actions::Actions;
use anyhow::Result;
use api::AdminClient;
use config::Config;
use console::state::ConsoleState;
use console::surface::ConsoleSurface;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = std::fs::File::create("foxfeed-admin.log")?;
    tracing_subscriber::fmt()
        .with_env_filter("foxfeed_admin=debug")
        .with_writer(log_file)
        .init();

    let config_path = Path::new("config.toml");
    let config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        tracing::warn!("config.toml not found, starting with an empty roster");
        Config::default()
    };

    println!();
    println!("  Foxfeed Admin Console v0.1.0");
    println!("  ============================");
    println!();
    println!("  Server: {}", config.server.base_url);
    println!(
        "  Roster: {} accounts, {} posts, {} scheduled",
        config.accounts.len(),
        config.posts.len(),
        config.queue.len(),
    );
    println!();

    // --- Wire up the console ---
    let state = Arc::new(Mutex::new(ConsoleState::new(&config)));
    let transport = Arc::new(AdminClient::new(&config.server.base_url));
    let surface = Arc::new(ConsoleSurface::new(state.clone()));
    let actions = Actions::new(surface, transport);

    // --- Run the TUI (blocks until quit) ---
    tui::run_tui(state, actions).await?;

    tracing::debug!("shutting down");
    Ok(())
}
