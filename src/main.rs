//! tollgate binary: serves the user API on `TOLLGATE_ADDR`.
//!
//! Run with:
//!   RUST_LOG=info cargo run
//!
//! Try:
//!   curl -H 'Authorization: Bearer token' http://localhost:8080/api/v1/users/42
//!   curl -i http://localhost:8080/api/v1/users/42

use tollgate::{ApiServer, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), tollgate::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    ApiServer::new(config).run().await.inspect_err(|e| {
        tracing::error!("server stopped: {e}");
    })
}
