use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::{
    clients::AppState,
    tools::{call_tool, tool_definitions},
};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "osm-finder";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Deserialize, Debug)]
pub struct RpcRequest {
    pub jsonrpc: String,
    /// Absent for notifications. An explicit `null` is still a request.
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Only runs when the key exists, so `"id": null` becomes `Some(Value::Null)`
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Serialize, Debug, PartialEq)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Handle one raw json message. `None` means nothing should be sent back
/// (the message was a notification).
pub async fn handle_message(state: &AppState, body: &[u8]) -> Option<RpcResponse> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            return Some(RpcResponse::failure(
                Value::Null,
                PARSE_ERROR,
                format!("Parse error: {err}"),
            ))
        }
    };
    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request = match serde_json::from_value::<RpcRequest>(value) {
        Ok(request) if request.jsonrpc == "2.0" => request,
        Ok(_) => {
            return Some(RpcResponse::failure(
                id,
                INVALID_REQUEST,
                "Invalid request: jsonrpc must be \"2.0\"",
            ))
        }
        Err(err) => {
            return Some(RpcResponse::failure(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {err}"),
            ))
        }
    };
    dispatch(state, request).await
}

pub async fn dispatch(state: &AppState, request: RpcRequest) -> Option<RpcResponse> {
    debug!("rpc method {}", request.method);
    let Some(id) = request.id else {
        debug!("notification {}, no reply", request.method);
        return None;
    };
    let response = match request.method.as_str() {
        "initialize" => RpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") }
            }),
        ),
        "ping" => RpcResponse::success(id, json!({})),
        "tools/list" => RpcResponse::success(id, json!({ "tools": tool_definitions() })),
        "tools/call" => call(state, id, request.params).await,
        other => {
            warn!("unknown rpc method {}", other);
            RpcResponse::failure(id, METHOD_NOT_FOUND, format!("Method not found: {other}"))
        }
    };
    Some(response)
}

async fn call(state: &AppState, id: Value, params: Value) -> RpcResponse {
    let params: CallParams = match serde_json::from_value(params) {
        Ok(params) => params,
        Err(err) => {
            return RpcResponse::failure(id, INVALID_PARAMS, format!("Invalid params: {err}"))
        }
    };
    match call_tool(state, &params.name, params.arguments).await {
        Ok(result) => match serde_json::to_value(result) {
            Ok(result) => RpcResponse::success(id, result),
            Err(err) => RpcResponse::failure(id, INTERNAL_ERROR, err.to_string()),
        },
        // unknown tool names and schema mismatches are both bad params
        Err(err) => RpcResponse::failure(id, INVALID_PARAMS, err.to_string()),
    }
}
