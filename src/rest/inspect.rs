use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::Value;

use crate::common::message::{Command, ConsoleRequest, RoutingContext};
use crate::rest::commands::{api_response, ApiResult};
use crate::server::rest_server::AppState;

#[derive(Debug, Deserialize)]
pub struct ConfigQuery {
    /// Settings key, e.g. `schedule` for the `scheduleConfig` entry.
    /// `master` answers from the console entry point itself.
    pub key: Option<String>,
}

pub async fn get_config(
    State(st): State<AppState>,
    Path(node): Path<String>,
    Query(query): Query<ConfigQuery>,
) -> ApiResult {
    let mut request = ConsoleRequest::new(Command::Config, RoutingContext::from(node));
    request.param = query.key.map(Value::String);
    api_response(st.router.dispatch(&request).await)
}

pub async fn get_proxy(State(st): State<AppState>, Path(node): Path<String>) -> ApiResult {
    let request = ConsoleRequest::new(Command::Proxy, RoutingContext::from(node));
    api_response(st.router.dispatch(&request).await)
}

pub async fn get_handler(State(st): State<AppState>, Path(node): Path<String>) -> ApiResult {
    let request = ConsoleRequest::new(Command::Handler, RoutingContext::from(node));
    api_response(st.router.dispatch(&request).await)
}
