//! HTTP surface of the telemetry gateway.
//!
//! `POST /api/receive` follows the terminal protocol: system-level checks
//! (content type, JSON shape) and application-level checks (required
//! fields, content bound) reject with 400, while frame decode problems are
//! recorded on the stored message and still acknowledged with `ok`, so a
//! terminal that garbles a frame does not retry it forever.

use crate::config::{MAX_CONTENT_HEX_CHARS, REQUEST_ID_HEADER};
use crate::gateway::frame::{self, FrameOutcome};
use crate::gateway::message::{id_number_key, missing_fields, ReceiveResponse, TerminalSummary};
use crate::gateway::store::{timestamp_now, StoredMessage, TerminalStore};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub struct GatewayState {
    pub store: TerminalStore,
    pub data_file: PathBuf,
}

pub fn router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/api/receive", post(receive))
        .route("/api/terminals", get(terminals))
        .route("/", get(index))
        .route("/history/{id_number}", get(history))
        .with_state(state)
}

async fn receive(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<ReceiveResponse>) {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let content_type_ok = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false);
    if !content_type_ok {
        return reject(request_id, "Content-Type must be application/json");
    }

    let parsed: Value = match serde_json::from_slice(&body) {
        Ok(parsed) => parsed,
        Err(err) => {
            return reject(
                request_id,
                format!(
                    "Failed to parse JSON: {}. Please ensure all JSON delimiters are half-width characters.",
                    err
                ),
            );
        }
    };

    let object = match parsed.as_object() {
        Some(object) if !object.is_empty() => object,
        _ => return reject(request_id, "Invalid or empty JSON data"),
    };

    let missing = missing_fields(object);
    if !missing.is_empty() {
        return reject(
            request_id,
            format!("Missing required fields: {}", missing.join(", ")),
        );
    }

    let outcome = match &object["Content"] {
        Value::String(content_hex) => {
            if content_hex.len() > MAX_CONTENT_HEX_CHARS {
                return reject(request_id, "Content too long");
            }
            frame::parse_frame(content_hex)
        }
        _ => FrameOutcome::Failed {
            reason: "Content 必须是十六进制字符串".to_string(),
        },
    };

    let id_number = id_number_key(&object["IdNumber"]);
    info!(
        id_number = %id_number,
        parsed = outcome.is_parsed(),
        warnings = outcome.warnings().len(),
        "received telemetry message"
    );

    state.store.append(
        &id_number,
        StoredMessage {
            raw: parsed.clone(),
            outcome,
            receive_time: timestamp_now(),
        },
    );

    // 持久化失败不阻塞接收
    if let Err(err) = state.store.save(&state.data_file) {
        warn!(error = %err, "failed to persist terminal store");
    }

    (StatusCode::OK, Json(ReceiveResponse::ok(request_id)))
}

fn reject(
    request_id: String,
    message: impl Into<String>,
) -> (StatusCode, Json<ReceiveResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ReceiveResponse::error(request_id, message)),
    )
}

async fn terminals(State(state): State<Arc<GatewayState>>) -> Json<Vec<TerminalSummary>> {
    Json(state.store.summaries())
}

async fn index(State(state): State<Arc<GatewayState>>) -> Html<String> {
    let mut rows = String::new();
    let latest = state.store.latest_per_terminal();

    if latest.is_empty() {
        rows.push_str("<tr><td colspan=\"9\">无数据</td></tr>\n");
    }
    for (id_number, message) in latest {
        rows.push_str(&render_row(Some(&id_number), &message));
    }

    Html(page(
        "数据展示",
        &format!(
            "<h1>接收到的数据表格（根据 IdNumber 区分）</h1>\n<table>\n<tr>{}</tr>\n{}</table>",
            "<th>IdNumber</th><th>接收时间</th><th>状态</th><th>定位时间</th>\
             <th>纬度</th><th>经度</th><th>高程</th><th>自定义数据</th><th>原始报文</th>",
            rows
        ),
    ))
}

async fn history(
    State(state): State<Arc<GatewayState>>,
    Path(id_number): Path<String>,
) -> (StatusCode, Html<String>) {
    let Some(messages) = state.store.history(&id_number) else {
        let body = page(
            "未找到终端",
            &format!("<h1>未找到终端 {}</h1>", escape(&id_number)),
        );
        return (StatusCode::NOT_FOUND, Html(body));
    };

    let mut rows = String::new();
    for message in &messages {
        rows.push_str(&render_row(None, message));
    }

    let body = page(
        "历史数据",
        &format!(
            "<h1>终端 {} 的历史数据</h1>\n<table>\n<tr>{}</tr>\n{}</table>",
            escape(&id_number),
            "<th>接收时间</th><th>状态</th><th>定位时间</th>\
             <th>纬度</th><th>经度</th><th>高程</th><th>自定义数据</th><th>原始报文</th>",
            rows
        ),
    );
    (StatusCode::OK, Html(body))
}

fn render_row(id_number: Option<&str>, message: &StoredMessage) -> String {
    let mut cells = String::new();
    if let Some(id_number) = id_number {
        cells.push_str(&format!("<td>{}</td>", escape(id_number)));
    }
    cells.push_str(&format!("<td>{}</td>", escape(&message.receive_time)));

    match &message.outcome {
        FrameOutcome::Parsed { frame, warnings } => {
            let status = if warnings.is_empty() {
                "解析成功".to_string()
            } else {
                format!("解析成功（警告: {}）", warnings.join("; "))
            };
            let custom = if frame.custom_text.is_empty() {
                "无"
            } else {
                frame.custom_text.as_str()
            };
            cells.push_str(&format!(
                "<td>{}</td><td>{}</td><td>{} {}</td><td>{} {}</td><td>{}</td><td>{}</td>",
                escape(&status),
                escape(&frame.fix_time),
                escape(frame::hemisphere_label(&frame.lat_hemisphere)),
                escape(&frame.latitude),
                escape(frame::hemisphere_label(&frame.lon_hemisphere)),
                escape(&frame.longitude),
                escape(&frame.altitude),
                escape(custom),
            ));
        }
        FrameOutcome::Failed { reason } => {
            cells.push_str(&format!(
                "<td>解析错误: {}</td><td></td><td></td><td></td><td></td><td></td>",
                escape(reason)
            ));
        }
    }

    let raw = serde_json::to_string_pretty(&message.raw).unwrap_or_default();
    cells.push_str(&format!("<td><pre>{}</pre></td>", escape(&raw)));

    format!("<tr>{}</tr>\n", cells)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"zh\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>{}</title>\n<style>\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid black; padding: 8px; text-align: left; }}\n\
         th {{ background-color: #f2f2f2; }}\n\
         pre {{ margin: 0; white-space: pre-wrap; }}\n\
         </style>\n</head>\n<body>\n{}\n</body>\n</html>",
        escape(title),
        body
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
