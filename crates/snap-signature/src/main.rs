use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use snap_signature::{AppState, FileKeyProvider, SignatureEngine, run};
use snap_signature::keys::DEFAULT_PRIVATE_KEY_PATH;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,
    #[clap(long, env = "PORT", default_value = "9999")]
    port: u16,
    /// Default PEM key for RSA requests that carry no `privateKey`.
    #[clap(long, env = "PRIVATE_KEY_PATH", default_value = DEFAULT_PRIVATE_KEY_PATH)]
    private_key_path: String,
    /// Used when `RUST_LOG` is unset.
    #[clap(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let keys = Arc::new(FileKeyProvider::new(&args.private_key_path));
    let state = AppState {
        engine: SignatureEngine::with_system_clock(keys),
    };

    run(args.host, args.port, state).await
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}
