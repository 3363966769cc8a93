use anyhow::Result;
use clap::{arg, command, Parser};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::broadcast;
use transformer_aggregator::application::app::App;
use transformer_aggregator::service;

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "Transformer aggregation service with REST API"
)]
struct TxfProgram {
    /// Listen port REST API
    #[arg(short, long, default_value_t = 3000)]
    listen_port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = TxfProgram::parse();

    // Create a shutdown channel
    let (shutdown_sender, _) = broadcast::channel(1);

    let app = Arc::new(App::new());

    // Start the API server
    let server_handle = tokio::spawn(service::api::start_server(
        shutdown_sender.clone(),
        app,
        args.listen_port,
    ));

    // Wait for shutdown signal
    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::warn!("Received Ctrl+C, shutting down...");
        }
    }

    let _ = shutdown_sender.send(());

    // Wait for the server to complete
    let _ = tokio::join!(server_handle);

    tracing::info!("Shutdown complete");
    Ok(())
}
