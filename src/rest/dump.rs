use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::common::message::{Command, ConsoleRequest, RoutingContext};
use crate::rest::commands::{api_response, ApiResult};
use crate::server::rest_server::AppState;

#[derive(Debug, Deserialize)]
pub struct CpuDumpBody {
    pub node: String,
    pub filepath: String,
    /// Sample count; forwarded as-is so the executor owns validation.
    pub times: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct MemoryDumpBody {
    pub node: String,
    pub filepath: String,
}

pub async fn post_dump_cpu(State(st): State<AppState>, Json(body): Json<CpuDumpBody>) -> ApiResult {
    let param = json!({
        "filepath": body.filepath,
        "times": body.times,
    });
    let request = ConsoleRequest::with_param(
        Command::DumpCpu,
        RoutingContext::from(body.node),
        param,
    );
    api_response(st.router.dispatch(&request).await)
}

pub async fn post_dump_memory(
    State(st): State<AppState>,
    Json(body): Json<MemoryDumpBody>,
) -> ApiResult {
    let param = json!({ "filepath": body.filepath });
    let request = ConsoleRequest::with_param(
        Command::DumpMemory,
        RoutingContext::from(body.node),
        param,
    );
    api_response(st.router.dispatch(&request).await)
}
