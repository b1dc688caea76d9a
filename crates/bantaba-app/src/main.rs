use std::sync::Arc;

use anyhow::Context;
use bantaba_config::Config;
use bantaba_core::VerificationSession;
use bantaba_dictionary::WordLists;
use bantaba_remote::RemoteMirror;
use bantaba_store::{FileKv, LocalStore};
use clap::Parser;

use self::cli::Cli;

pub mod cli;
pub mod commands;
pub mod logging;


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    logging::init(&config);

    tracing::debug!("Using dataset dir {}", config.dataset.dir.display());
    tracing::debug!("Using storage dir {}", config.storage.data_dir.display());

    let session = build_session(&config)?;
    commands::run(&session, cli.command, &mut std::io::stdout()).await
}

/// Config file or environment, then command-line overrides
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::new(),
    };

    if let Some(dir) = &cli.dataset_dir {
        config.dataset.dir = dir.clone();
    }
    if let Some(dir) = &cli.storage_dir {
        config.storage.data_dir = dir.clone();
    }
    if cli.backend {
        config.remote.enabled = true;
    }

    Ok(config)
}

pub fn build_session(config: &Config) -> anyhow::Result<VerificationSession> {
    let word_lists = Arc::new(WordLists::from_dir(config.dataset.dir.clone()));
    let store = Arc::new(LocalStore::new(Arc::new(FileKv::new(
        config.storage.data_dir.clone(),
    ))));
    let mirror =
        Arc::new(RemoteMirror::new(&config.remote).context("Failed to build the backend client")?);

    if mirror.is_enabled() {
        tracing::info!("Mirroring to {}", config.remote.base_url);
    }

    Ok(VerificationSession::new(word_lists, store, mirror))
}
