use std::time::Duration;

/// Listen address of the receive gateway.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

/// Endpoint the smoke test posts to.
pub const DEFAULT_SMOKE_ENDPOINT: &str = "http://127.0.0.1:5000/api/receive";

/// Process name pattern the reaper looks for (the gateway server process).
pub const DEFAULT_REAP_PATTERN: &str = "http_server";

/// Terminal store persistence file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data_store.json";

/// Request header carrying the caller-assigned request id.
pub const REQUEST_ID_HEADER: &str = "RequestId";

/// Application-level fields every telemetry POST must carry.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "IdNumber",
    "Content",
    "Time",
    "MessageId",
    "DeliveryCount",
    "NetworkMode",
];

// 电文内容长度上限（十六进制字符数）
pub const MAX_CONTENT_HEX_CHARS: usize = 3500;

/// Telemetry frame start marker.
pub const FRAME_START_MARKER: u8 = 0xA4;

pub const SMOKE_TIMEOUT_DEFAULT: Duration = Duration::from_secs(10);

/// How long the reaper waits after SIGTERM before escalating to SIGKILL.
pub const GRACEFUL_WAIT: Duration = Duration::from_millis(500);
