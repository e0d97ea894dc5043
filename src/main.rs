use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use webnotes::{App, Cli, Config, FileAdapter, NoteStore, Result};

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    let adapter = FileAdapter::new(config.data_dir.clone());
    let mut store = NoteStore::from_config(adapter, &config);
    let loaded = store.load().await;
    info!(
        "Loaded {} notes from key {} in {}",
        loaded,
        store.key(),
        store.adapter().root().display()
    );

    let mut app = App::new(store, config);
    app.run(cli.command).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    info!("Application starting up");
    let outcome = run(cli).await;
    info!("Application shutting down");

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_recoverable() => {
            eprintln!("{}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
