//! `daypick-server` binary entrypoint.
//!
//! Starts the axum server using configuration from environment variables.

use daypick_server::{serve, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Respect `RUST_LOG` if set; otherwise default to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    serve(config).await
}
