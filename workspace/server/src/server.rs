use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_server::{tls_rustls::RustlsConfig, Handle};
use serde::Serialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

use crate::{
    adapter::Adapter, config::TlsConfig, transport, Result, ServerConfig,
};

/// Server state.
pub struct State {
    /// The server configuration.
    pub config: ServerConfig,
    /// Server information.
    pub info: ServerInfo,
    /// Adapter for invocations.
    pub adapter: Adapter,
}

/// State shared by the request handlers.
pub type ServerState = Arc<State>;

/// Server information.
#[derive(Serialize)]
pub struct ServerInfo {
    /// Name of the crate.
    pub name: String,
    /// Version of the crate.
    pub version: String,
}

#[derive(Default)]
pub struct Server;

impl Server {
    /// Create a new server.
    pub fn new() -> Self {
        Self
    }

    /// Start the server.
    pub async fn start(
        &self,
        addr: SocketAddr,
        state: ServerState,
        handle: Handle,
    ) -> Result<()> {
        let origins = Server::read_origins(&state)?;
        let limit = state.config.body_limit;
        let tls = state.config.tls.as_ref().cloned();

        if let Some(tls) = tls {
            self.run_tls(addr, state, handle, origins, limit, tls).await
        } else {
            self.run(addr, state, handle, origins, limit).await
        }
    }

    /// Start the server running on HTTPS.
    async fn run_tls(
        &self,
        addr: SocketAddr,
        state: ServerState,
        handle: Handle,
        origins: Vec<HeaderValue>,
        limit: usize,
        tls: TlsConfig,
    ) -> Result<()> {
        let tls = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
        let app = Server::router(state, origins, limit)?;
        tracing::info!("listening on {}", addr);
        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(app.into_make_service())
            .await?;
        Ok(())
    }

    /// Start the server running on HTTP.
    async fn run(
        &self,
        addr: SocketAddr,
        state: ServerState,
        handle: Handle,
        origins: Vec<HeaderValue>,
        limit: usize,
    ) -> Result<()> {
        let app = Server::router(state, origins, limit)?;
        tracing::info!("listening on {}", addr);
        axum_server::bind(addr)
            .handle(handle)
            .serve(app.into_make_service())
            .await?;
        Ok(())
    }

    fn read_origins(state: &ServerState) -> Result<Vec<HeaderValue>> {
        let mut origins = Vec::new();
        if let Some(cors) = &state.config.cors {
            for url in cors.origins.iter() {
                origins.push(HeaderValue::from_str(
                    url.as_str().trim_end_matches('/'),
                )?);
            }
        }
        Ok(origins)
    }

    fn router(
        state: ServerState,
        origins: Vec<HeaderValue>,
        limit: usize,
    ) -> Result<Router> {
        let cors = CorsLayer::new()
            .allow_methods(vec![Method::GET, Method::POST])
            .allow_headers(vec![CONTENT_TYPE])
            .allow_origin(origins);

        let app = Router::new()
            .route("/", post(transport::http))
            .route("/api", get(api))
            .layer(RequestBodyLimitLayer::new(limit))
            .layer(cors)
            .layer(Extension(state));

        Ok(app)
    }
}

/// Serve the API identity page.
pub(crate) async fn api(
    Extension(state): Extension<ServerState>,
) -> impl IntoResponse {
    Json(json!(&state.info))
}
