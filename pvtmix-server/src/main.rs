use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::Parser;
use pvtmix_server::{Settings, serve, telemetry};
use tracing::error;

#[derive(Parser)]
#[command(name = "pvtmix-server")]
#[command(about = "Serve multiphase mixture properties over HTTP", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (defaults to ./pvtmix.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host name or address to listen on
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings.with_overrides(cli.host, cli.port),
        Err(err) => {
            eprintln!("Error: {}", report(&err));
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = telemetry::init(&settings.log_filter) {
        eprintln!("Error: {}", report(&err));
        return ExitCode::FAILURE;
    }

    if let Err(err) = serve(&settings).await {
        error!(error = %report(&err), "server failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Formats an error followed by its chain of sources.
fn report(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
