//! Shims translating invocation environments to the adapter.
use axum::{body::Bytes, extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    adapter::{Adapter, AdapterResponse, DEFAULT_JOB_RUN_ID},
    server::ServerState,
    Error, Result,
};

/// Event carrying the input as a JSON string, used by
/// API gateway proxies and queue triggers.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyEvent {
    /// Input encoded as JSON.
    #[serde(default)]
    pub body: Option<String>,
}

/// Response for a proxy event.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    /// Status code for the invocation.
    pub status_code: u16,
    /// Adapter response encoded as JSON.
    pub body: String,
    /// Whether the body is base64 encoded.
    pub is_base64_encoded: bool,
}

/// Invoke the adapter for an encoded input, input that
/// does not parse is reported as an errored response.
async fn invoke_encoded(adapter: &Adapter, input: &[u8]) -> AdapterResponse {
    match serde_json::from_slice::<Value>(input) {
        Ok(input) => adapter.invoke(&input).await,
        Err(e) => {
            let e = Error::from(e);
            tracing::error!("{}", e);
            AdapterResponse::errored(String::from(DEFAULT_JOB_RUN_ID), &e)
        }
    }
}

/// HTTP function shim, the request body is the input.
pub(crate) async fn http(
    Extension(state): Extension<ServerState>,
    body: Bytes,
) -> (StatusCode, Json<AdapterResponse>) {
    let response = invoke_encoded(&state.adapter, &body).await;
    let status = StatusCode::from_u16(response.status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response))
}

/// Lambda event shim, the event is the input and the
/// status code is only carried in the response.
pub async fn lambda(adapter: &Adapter, event: Value) -> AdapterResponse {
    adapter.invoke(&event).await
}

/// Proxy event shim, the input is parsed from the event body.
pub async fn proxy(
    adapter: &Adapter,
    event: ProxyEvent,
) -> Result<ProxyResponse> {
    let body = event.body.unwrap_or_default();
    let response = invoke_encoded(adapter, body.as_bytes()).await;
    Ok(ProxyResponse {
        status_code: response.status_code,
        body: serde_json::to_string(&response)?,
        is_base64_encoded: false,
    })
}
