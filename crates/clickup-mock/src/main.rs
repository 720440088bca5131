//! Serve the demo fixtures on a local port.
//!
//! Point the CLI at it with
//! `CLICKUP_API_URL=http://127.0.0.1:<port> CLICKUP_API_TOKEN=pk_demo CLICKUP_TEAM_ID=9001`.

use clickup_mock::{Fixtures, MockApi};
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_PORT: u16 = 17474;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let listener = TcpListener::bind(("127.0.0.1", port)).await?;
    clickup_mock::serve(listener, MockApi::new(Fixtures::demo())).await
}
