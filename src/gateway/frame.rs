//! Telemetry frame codec.
//!
//! A frame arrives as the hex-encoded `Content` field of a telemetry POST:
//!
//! ```text
//! A4 | fix time (8, ASCII hh:mm:ss) | latitude (11, N/S + ddmm.mmmmm)
//!    | longitude (12, E/W + dddmm.mmmmm) | altitude (8, ±99999.9)
//!    | '-' | custom data (GBK)
//! ```
//!
//! Decoding is deliberately tolerant: a frame that decodes but carries odd
//! field values is kept together with accumulated warnings, so the operator
//! can still inspect what the terminal actually sent. Only content that is
//! not hex, is empty, or does not carry the start marker is rejected.

use crate::config::FRAME_START_MARKER;
use serde::{Deserialize, Serialize};

/// Fixed part of the frame, in bytes: marker + time + lat + lon + alt + separator.
const OFFSET_FIX_TIME: usize = 1;
const OFFSET_LATITUDE: usize = 9;
const OFFSET_LONGITUDE: usize = 20;
const OFFSET_ALTITUDE: usize = 32;
const OFFSET_SEPARATOR: usize = 40;
const OFFSET_CUSTOM: usize = 41;

/// Decoded frame fields, raw values as the terminal sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    pub fix_time: String,
    pub lat_hemisphere: String,
    pub latitude: String,
    pub lon_hemisphere: String,
    pub longitude: String,
    pub altitude: String,
    pub separator: String,
    pub custom_text: String,
    pub custom_hex: String,
}

/// Outcome of decoding one `Content` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FrameOutcome {
    Parsed {
        frame: TelemetryFrame,
        warnings: Vec<String>,
    },
    Failed {
        reason: String,
    },
}

impl FrameOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, FrameOutcome::Parsed { .. })
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            FrameOutcome::Parsed { warnings, .. } => warnings,
            FrameOutcome::Failed { .. } => &[],
        }
    }
}

/// 半球字母转换为中文方位
pub fn hemisphere_label(letter: &str) -> &str {
    match letter {
        "N" => "北纬",
        "S" => "南纬",
        "E" => "东经",
        "W" => "西经",
        other => other,
    }
}

/// Decode a hex `Content` string into a [`FrameOutcome`].
pub fn parse_frame(content_hex: &str) -> FrameOutcome {
    let bytes = match hex::decode(content_hex.trim()) {
        Ok(bytes) => bytes,
        Err(err) => {
            return FrameOutcome::Failed {
                reason: format!("十六进制解析错误: {}", err),
            }
        }
    };

    if bytes.first() != Some(&FRAME_START_MARKER) {
        return FrameOutcome::Failed {
            reason: "电文起始字节不是 A4".to_string(),
        };
    }

    let mut warnings = Vec::new();

    let fix_time = ascii_lossy(slice_at(&bytes, OFFSET_FIX_TIME, OFFSET_LATITUDE));

    let lat_full = ascii_lossy(slice_at(&bytes, OFFSET_LATITUDE, OFFSET_LONGITUDE));
    let (lat_hemisphere, latitude) = split_hemisphere(&lat_full);
    if lat_hemisphere != "N" && lat_hemisphere != "S" {
        warnings.push("纬度半球格式不正确".to_string());
    }

    let lon_full = ascii_lossy(slice_at(&bytes, OFFSET_LONGITUDE, OFFSET_ALTITUDE));
    let (lon_hemisphere, longitude) = split_hemisphere(&lon_full);
    if lon_hemisphere != "E" && lon_hemisphere != "W" {
        warnings.push("经度半球格式不正确".to_string());
    }

    let altitude = ascii_lossy(slice_at(&bytes, OFFSET_ALTITUDE, OFFSET_SEPARATOR));

    let separator = ascii_lossy(slice_at(&bytes, OFFSET_SEPARATOR, OFFSET_CUSTOM));
    if separator != "-" {
        warnings.push("隔离符不为 '-'，可能影响自定义数据解析".to_string());
    }

    let custom_bytes = slice_at(&bytes, OFFSET_CUSTOM, bytes.len().max(OFFSET_CUSTOM));
    let custom_hex = hex::encode_upper(custom_bytes);
    let (custom_text, _, _) = encoding_rs::GBK.decode(custom_bytes);

    FrameOutcome::Parsed {
        frame: TelemetryFrame {
            fix_time,
            lat_hemisphere,
            latitude,
            lon_hemisphere,
            longitude,
            altitude,
            separator,
            custom_text: custom_text.into_owned(),
            custom_hex,
        },
        warnings,
    }
}

/// Length-tolerant slice: short frames yield short (or empty) fields.
fn slice_at(bytes: &[u8], start: usize, end: usize) -> &[u8] {
    let start = start.min(bytes.len());
    let end = end.min(bytes.len());
    &bytes[start..end]
}

/// ASCII with replacement, the way a lossy single-byte decode behaves.
fn ascii_lossy(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '\u{FFFD}' })
        .collect()
}

fn split_hemisphere(full: &str) -> (String, String) {
    let mut chars = full.chars();
    let hemisphere = chars.next().map(String::from).unwrap_or_default();
    (hemisphere, chars.collect())
}
