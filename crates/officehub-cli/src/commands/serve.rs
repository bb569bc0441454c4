//! Start the OfficeHub server.

use clap::Args;

use officehub_core::config::AppConfig;
use officehub_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip the scheduled jobs
    #[arg(long)]
    pub no_worker: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.no_worker {
        config.worker.enabled = false;
    }

    println!("Starting OfficeHub server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);

    officehub_api::run_server(config).await
}
