use std::time::Duration;

use clap::Parser;
use termination_handler::Handler;
use termination_handler::HandlerConfig;
use termination_kubeapi::KubeApi;
use time::ext::NumericalStdDuration as _;
use tokio::signal;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    tracing::info!("Starting termination-handler-agent");

    let config = cli.handler_config()?;
    let kubeapi = KubeApi::new()
        .await
        .inspect_err(|err| tracing::error!(%err, "Error getting configuration"))?;

    let handler = Handler::new(config, kubeapi)
        .inspect_err(|err| tracing::error!(%err, "Error constructing termination handler"))?;

    handler
        .run(shutdown_signal())
        .await
        .inspect_err(|err| tracing::error!(%err, "Error running termination handler"))?;

    tracing::info!("Termination handler finished");
    Ok(())
}

/// Resolves on the first SIGINT or SIGTERM
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(%err, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => tracing::info!("Received SIGINT"),
        () = terminate => tracing::info!("Received SIGTERM"),
    }
}

fn seconds(secs: u64) -> Duration {
    secs.std_seconds()
}
