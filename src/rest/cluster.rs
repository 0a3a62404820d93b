use axum::extract::State;

use crate::common::message::{Command, ConsoleRequest, RoutingContext};
use crate::rest::commands::{api_response, ApiResult};
use crate::server::rest_server::AppState;

pub async fn get_servers(State(st): State<AppState>) -> ApiResult {
    let request = ConsoleRequest::new(Command::Servers, RoutingContext::All);
    api_response(st.router.dispatch(&request).await)
}

pub async fn get_modules(State(st): State<AppState>) -> ApiResult {
    let request = ConsoleRequest::new(Command::Modules, RoutingContext::All);
    api_response(st.router.dispatch(&request).await)
}
