use clap::Parser;
use copyfile::commands::run::run;
use copyfile::config::Cli;
use copyfile::{Config, CopyError};
use std::io::IsTerminal;
use std::path::MAIN_SEPARATOR;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let is_config = e
                .downcast_ref::<CopyError>()
                .is_some_and(CopyError::is_config_error);
            if is_config {
                tracing::error!(
                    "{} (pass -c <PATH> or a positional path to choose another file)",
                    e
                );
            } else {
                tracing::error!("{}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::from_cli(cli)?;

    tracing::info!("copy-file v{}", copyfile::VERSION);
    tracing::info!("Current file path separator is [{}]", MAIN_SEPARATOR);
    if let Some(home) = home_dir() {
        tracing::info!("Current user home directory path is [{}]", home);
    }
    tracing::info!(
        "Current work directory path is [{}]",
        config.base_dir.display()
    );
    tracing::info!(
        "Current configuration file path is [{}]",
        config.config_path.display()
    );

    run(&config)?;

    if let Some(delay) = config.countdown() {
        copyfile::ui::countdown(&mut std::io::stdout(), delay.as_secs(), Duration::from_secs(1))?;
    }

    Ok(())
}

fn home_dir() -> Option<String> {
    ["HOME", "USERPROFILE"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
}
