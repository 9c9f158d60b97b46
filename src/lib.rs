//! locgate library
//!
//! Location telemetry gateway with its ops tooling: a receive server for
//! positioning-terminal frames, an API smoke tester, and a process reaper.

pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod platform;
pub mod reaper;
pub mod smoke;

// Re-export commonly used types for convenience
pub use error::{ErrorCategory, GatewayError, Result};
pub use gateway::{
    parse_frame, router, FrameOutcome, GatewayState, StoredMessage, TelemetryFrame, TerminalStore,
};
pub use reaper::{find_targets, terminate_targets, ReapOutcome, ReapTarget};
pub use smoke::{builtin_cases, CaseReport, Expectation, SmokeCase, SmokeClient};
