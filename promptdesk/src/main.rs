use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use promptdesk::config::{DeskConfig, default_config_path};
use promptdesk::store::{
    FileBackend, KeyValueBackend, MemoryBackend, PromptPersistence, PromptStore,
};
use promptdesk::telemetry::init_tracing;
use promptdesk::{CommandClipboard, ConsoleNotifier, ConsoleView, Controller, session};
use tokio::io::BufReader;
use tracing::{debug, info};

/// Manage a local collection of prompts from the terminal.
#[derive(Debug, Parser)]
#[command(name = "promptdesk", version, about)]
struct Cli {
    /// Path to a JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the prompt collection.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Storage key (file stem) of the prompt collection.
    #[arg(long)]
    storage_key: Option<String>,

    /// Keep prompts in memory only; nothing is written to disk.
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = DeskConfig::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(key) = cli.storage_key {
        config.storage_key = key;
    }
    config.validate().context("invalid configuration")?;

    init_tracing(&config.log_filter)?;
    let config_file = cli.config.or_else(default_config_path);
    debug!(config_file = ?config_file, ?config, "configuration resolved");

    let backend: Box<dyn KeyValueBackend> = if cli.ephemeral {
        info!("keeping prompts in memory only");
        Box::new(MemoryBackend::new())
    } else {
        let files = FileBackend::new(&config.data_dir);
        info!(root = %files.root().display(), "storing prompts on disk");
        Box::new(files)
    };
    let persistence = PromptPersistence::new(backend, config.storage_key.trim());
    let store = PromptStore::open(persistence);

    let clipboard = CommandClipboard::from_command(&config.clipboard_command)?;
    info!(
        prompts = store.len(),
        clipboard = clipboard.program(),
        "promptdesk ready"
    );

    let mut controller = Controller::new(
        store,
        Arc::new(ConsoleView),
        Arc::new(ConsoleNotifier),
        Arc::new(clipboard),
    );

    println!("promptdesk: type `help` for commands");
    controller.start();
    session::run(&mut controller, BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}
