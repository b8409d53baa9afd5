//! CodeSentry mock server entry point

use clap::Parser;
use tokio::signal;
use tracing::Level;
use tracing_subscriber::fmt;

use codesentry_mock::{DEFAULT_HOST, DEFAULT_PORT, bind, create_router};

/// Mock server CLI arguments
#[derive(Parser, Debug)]
#[command(name = "codesentry-mock")]
#[command(about = "Serve canned security analyses without any provider")]
struct Args {
    /// Interface to bind
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    fmt().with_max_level(log_level).init();

    let listener = bind(&args.host, args.port).await?;
    tracing::info!("Mock server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router())
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
            }
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
