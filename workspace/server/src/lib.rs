use axum_server::Handle;
use secrecy::SecretString;
use std::{net::SocketAddr, path::PathBuf, str::FromStr, sync::Arc};

pub mod adapter;
pub mod config;
mod error;
mod server;
pub mod transport;

pub type Result<T> = std::result::Result<T, error::Error>;

pub use adapter::{Adapter, AdapterResponse};
pub use config::ServerConfig;
pub use error::Error;
pub use server::{Server, ServerInfo, ServerState, State};

/// Create an adapter that fetches from the configured upstream.
pub fn build_adapter(
    config: &ServerConfig,
    bearer_token: SecretString,
) -> Result<Adapter> {
    let client = config.upstream.client(bearer_token)?;
    Ok(Adapter::new(Box::new(client)))
}

/// Start a server using the given bind address and configuration.
pub async fn start(
    bind: String,
    config: Option<PathBuf>,
    bearer_token: SecretString,
) -> Result<()> {
    let name = env!("CARGO_PKG_NAME").to_string();
    let version = env!("CARGO_PKG_VERSION").to_string();
    let config = ServerConfig::load_or_default(config)?;
    let adapter = build_adapter(&config, bearer_token)?;
    let handle = Handle::new();
    let state = Arc::new(State {
        config,
        info: ServerInfo { name, version },
        adapter,
    });
    let addr = SocketAddr::from_str(&bind)?;
    let server = Server::new();
    server.start(addr, state, handle).await?;
    Ok(())
}
