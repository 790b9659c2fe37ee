//! Binary entrypoint for the COT tool server.
use cot_api::{run, ServerConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    run(ServerConfig::from_env()).await
}

/// `RUST_LOG` wins over the default filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cot_api=info,cot_check=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
