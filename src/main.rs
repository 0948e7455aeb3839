#![warn(clippy::all, clippy::pedantic)]

use clap::Parser;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use sidefetch::app::dispatch::dispatch;
use sidefetch::cli::Cli;
use sidefetch::ui::style as ui;

#[tokio::main]
async fn main() -> ExitCode {
    // Install default crypto provider for Rustls TLS.
    // Without it rustls cannot pick a process-level CryptoProvider when more
    // than one backend is compiled in.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only rendered markup.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: Failed to install log subscriber: {e}");
    }

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", ui::error(format!("{e:#}")));
            ExitCode::FAILURE
        }
    }
}
