use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::common::message::{Command, ConsoleRequest, RoutingContext};
use crate::rest::commands::{api_response, ApiResult};
use crate::server::rest_server::AppState;

#[derive(Debug, Deserialize)]
pub struct ScopeQuery {
    /// Node id, or "all" (the default) for every connector-role node.
    pub node: Option<String>,
}

fn scope(query: &ScopeQuery) -> RoutingContext {
    match query.node.as_deref() {
        None => RoutingContext::All,
        Some(node) => RoutingContext::from(node.to_string()),
    }
}

pub async fn get_connections(
    State(st): State<AppState>,
    Query(query): Query<ScopeQuery>,
) -> ApiResult {
    let request = ConsoleRequest::new(Command::Connections, scope(&query));
    api_response(st.router.dispatch(&request).await)
}

pub async fn get_logins(State(st): State<AppState>, Query(query): Query<ScopeQuery>) -> ApiResult {
    let request = ConsoleRequest::new(Command::Logins, scope(&query));
    api_response(st.router.dispatch(&request).await)
}

pub async fn get_status(State(st): State<AppState>, Path(node): Path<String>) -> ApiResult {
    let request = ConsoleRequest::new(Command::Status, RoutingContext::from(node));
    api_response(st.router.dispatch(&request).await)
}
