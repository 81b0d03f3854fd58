use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    response::sse::{Event, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Serve the SEO tools over HTTP: `GET /sse` announces the message endpoint,
/// `POST /message` carries the JSON-RPC traffic. CORS is wide open so
/// browser-hosted MCP clients can connect.
pub async fn run_sse(options: super::cli::SseOptions, global: crate::Global) -> Result<()> {
    let addr = options.addr();

    let router = Router::new()
        .route("/sse", get(announce_endpoint))
        .route("/message", post(handle_message))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(Arc::new(global.clone()));

    if global.verbose {
        eprintln!("Serving SEO tools over SSE at http://{addr}");
        eprintln!("  events:   GET  http://{addr}/sse");
        eprintln!("  messages: POST http://{addr}/message");
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| f!("Failed to bind to {addr}"))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| eyre!("SSE server error: {e}"))
}

/// MCP SSE handshake: tell the client where to POST its JSON-RPC messages.
async fn announce_endpoint(
    State(_global): State<Arc<crate::Global>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let endpoint =
        stream::once(async { Ok(Event::default().event("endpoint").data("/message")) });
    Sse::new(endpoint)
}

async fn handle_message(
    State(global): State<Arc<crate::Global>>,
    Json(request): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let response = super::handle_value(request, &global).await;
    Json(serde_json::to_value(response).unwrap_or(serde_json::Value::Null))
}
