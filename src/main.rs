// src/main.rs
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::ExitCode;

use vhost_inspector::{config::InspectorConfig, report, Inspector};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Usage: {0} <vhost_directory_path>")]
    Usage(String),
}

fn parse_args() -> Result<PathBuf, CliError> {
    // Paths need not be UTF-8; only the program name is converted for display.
    let mut args = std::env::args_os();
    let program = args
        .next()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    match (args.next(), args.next()) {
        (Some(dir), None) => Ok(PathBuf::from(dir)),
        _ => Err(CliError::Usage(program)),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing; stdout carries the report, so logs go to stderr.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vhost_inspector=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let dir = match parse_args() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(dir).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(dir: PathBuf) -> Result<()> {
    let config = InspectorConfig::default();
    let inspector = Inspector::from_config(&config).context("Failed to set up inspector")?;

    let records = inspector.run(&dir).await?;

    let stdout = std::io::stdout();
    report::write_report(&mut stdout.lock(), &records).context("Failed to write report")?;

    Ok(())
}
