use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router as AxumRouter,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::channel::channel_impl::RequestChannelImpl;
use crate::common::config::ConsoleConfig;
use crate::rest::{
    cluster::{get_modules, get_servers},
    commands::post_command,
    dump::{post_dump_cpu, post_dump_memory},
    inspect::{get_config, get_handler, get_proxy},
    stats::{get_connections, get_logins, get_status},
};
use crate::server::router::Router;

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<Router<RequestChannelImpl>>,
}

/// Operator-facing HTTP surface. Every route builds a console request and
/// hands it to the router-role dispatcher.
pub async fn rest_server_start(
    console_config: &ConsoleConfig,
    router: Arc<Router<RequestChannelImpl>>,
) -> anyhow::Result<()> {
    info!("Starting console REST server...");
    let state = AppState { router };

    let app = AxumRouter::new()
        .route("/healthz", get(health))
        .route("/command", post(post_command))
        .route("/servers", get(get_servers))
        .route("/modules", get(get_modules))
        .route("/connections", get(get_connections))
        .route("/logins", get(get_logins))
        .route("/status/{node}", get(get_status))
        .route("/config/{node}", get(get_config))
        .route("/proxy/{node}", get(get_proxy))
        .route("/handler/{node}", get(get_handler))
        .route("/dump/cpu", post(post_dump_cpu))
        .route("/dump/memory", post(post_dump_memory))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind((
        console_config.rest_host.as_str(),
        console_config.rest_port,
    ))
    .await?;
    info!(
        "Console REST server listening on {}:{}",
        console_config.rest_host, console_config.rest_port
    );
    axum::serve(listener, app).await.map_err(|e| {
        error!("Failed to serve console REST: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
