use std::str::FromStr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::common::error::ConsoleError;
use crate::common::message::{Command, ConsoleRequest, RoutingContext};
use crate::server::rest_server::AppState;

pub type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn api_response(result: Result<Value, ConsoleError>) -> ApiResult {
    match result {
        Ok(value) => Ok(Json(value)),
        Err(e) => {
            let status = match e {
                ConsoleError::Parameter(_) | ConsoleError::UnknownCommand(_) => {
                    StatusCode::BAD_REQUEST
                }
                ConsoleError::Routing(_) => StatusCode::NOT_FOUND,
                ConsoleError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ConsoleError::Remote(_) => StatusCode::BAD_GATEWAY,
            };
            Err((status, Json(json!({ "error": e.to_string() }))))
        }
    }
}

/// The raw console message endpoint: `{comd, context, param?}` with both
/// verb and context as free strings, exactly what an operator tool sends.
pub async fn post_command(State(st): State<AppState>, Json(body): Json<Value>) -> ApiResult {
    let request = parse_command(&body).map_err(|e| {
        let status = match e {
            ConsoleError::UnknownCommand(_) => {
                tracing::warn!(error = %e, "operator sent unknown command");
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": e.to_string() })))
    })?;
    api_response(st.router.dispatch(&request).await)
}

pub fn parse_command(body: &Value) -> Result<ConsoleRequest, ConsoleError> {
    let comd = body.get("comd").and_then(Value::as_str).unwrap_or_default();
    let context = body
        .get("context")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if comd.is_empty() || context.is_empty() {
        return Err(ConsoleError::parameter("lack of comd or context param"));
    }
    let mut request = ConsoleRequest::new(Command::from_str(comd)?, RoutingContext::parse(context)?);
    request.param = body.get("param").cloned();
    Ok(request)
}
