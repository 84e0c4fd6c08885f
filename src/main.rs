use anyhow::Context;
use clap::Parser;
use fleet_manager::utils::{logger, validation::Validate};
use fleet_manager::{CliConfig, LocalStorage, Session, Settings, Terminal};
use std::io;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    let verbose = config.verbose;
    let ignored = config.ignored.clone();

    let settings = match Settings::from_cli(config).and_then(|s| s.validate().map(|()| s)) {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(verbose, None);
            tracing::error!("Configuration rejected: {}", e);
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(settings.verbose, settings.log_level.as_deref());
    tracing::debug!("Settings: {:?}", settings);
    if !ignored.is_empty() {
        tracing::debug!("Ignoring extra arguments: {:?}", ignored);
    }

    let stdin = io::stdin();
    let terminal = Terminal::new(stdin.lock(), io::stdout(), io::stderr());
    let mut session = Session::new(LocalStorage::current_dir(), terminal)
        .with_database_path(settings.database_path.as_str());

    // A failed save is reported inside the session and still exits 0.
    session
        .start(settings.import_path.as_deref())
        .context("terminal I/O failed")?;

    Ok(())
}
