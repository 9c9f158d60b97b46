//! Telemetry receive gateway: frame codec, wire types, store, HTTP routes.

pub mod frame;
pub mod message;
pub mod routes;
pub mod store;

pub use frame::{parse_frame, FrameOutcome, TelemetryFrame};
pub use routes::{router, GatewayState};
pub use store::{StoredMessage, TerminalStore};
