use std::process::ExitCode;

use clap::Parser;
use log::{error, info, LevelFilter};

use noteboard::{App, Cli, Config, FileStore, NoteboardError, Result};

pub fn initialize_logger(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(store_path) = cli.store {
        config.store_path = store_path;
    }

    let store = FileStore::open(&config.store_path)?;
    let mut app = App::new(store, config, cli.verbose)?;
    app.run(cli.command)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    info!("Application starting up");

    match run(cli) {
        Ok(()) => {
            info!("Application shutting down");
            ExitCode::SUCCESS
        }
        Err(NoteboardError::InvalidCredentials) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
