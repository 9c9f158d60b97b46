//! API smoke test for the receive endpoint.
//!
//! A fixed sequence of literal JSON payloads is posted one after the other,
//! the way an engineer pokes a freshly deployed gateway by hand. Cases that
//! exercise the gateway's tolerance for broken frames still expect an `ok`
//! acknowledgement; only protocol-level violations expect a rejection.

pub mod client;

pub use client::{CaseReport, SmokeClient};

/// What the gateway is expected to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// HTTP 200 with `Code == "ok"`.
    Accepted,
    /// HTTP 400 with `Code == "error"`.
    Rejected,
}

/// One hardcoded smoke request.
#[derive(Debug, Clone)]
pub struct SmokeCase {
    pub name: &'static str,
    pub body: &'static str,
    pub expectation: Expectation,
}

/// The built-in case sequence.
pub fn builtin_cases() -> Vec<SmokeCase> {
    vec![
        SmokeCase {
            name: "well-formed frame, ASCII custom data",
            body: r#"{"IdNumber":"2019070111201","MessageId":"1","Content":"A431303A33303A33334E333935382E38303732314531313632302E35323132332B30303035322E312D756E69742D3031206F6B","Time":"2024-05-17 10:30:33","DeliveryCount":1,"NetworkMode":"0"}"#,
            expectation: Expectation::Accepted,
        },
        SmokeCase {
            name: "well-formed frame, GBK custom data",
            body: r#"{"IdNumber":"2019070111202","MessageId":"2","Content":"A430373A34363A32304E333031322E34343931334531303335392E32313037352B30303531322E382DB2E2CAD4","Time":"2024-05-17 07:46:20","DeliveryCount":1,"NetworkMode":"1"}"#,
            expectation: Expectation::Accepted,
        },
        SmokeCase {
            name: "missing NetworkMode field",
            body: r#"{"IdNumber":"2019070111203","MessageId":"3","Content":"A4","Time":"2024-05-17 08:00:00","DeliveryCount":2}"#,
            expectation: Expectation::Rejected,
        },
        SmokeCase {
            name: "content is not hex",
            body: r#"{"IdNumber":"2019070111204","MessageId":"4","Content":"ZZZZ","Time":"2024-05-17 08:05:00","DeliveryCount":1,"NetworkMode":"0"}"#,
            expectation: Expectation::Accepted,
        },
        SmokeCase {
            name: "content without start marker",
            body: r#"{"IdNumber":"2019070111205","MessageId":"5","Content":"FF00AA","Time":"2024-05-17 08:10:00","DeliveryCount":3,"NetworkMode":"1"}"#,
            expectation: Expectation::Accepted,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REQUIRED_FIELDS;
    use serde_json::Value;

    #[test]
    fn case_bodies_are_valid_json() {
        for case in builtin_cases() {
            let parsed: Value = serde_json::from_str(case.body)
                .unwrap_or_else(|err| panic!("case '{}' body is not JSON: {}", case.name, err));
            assert!(parsed.is_object(), "case '{}' is not an object", case.name);
        }
    }

    #[test]
    fn only_the_missing_field_case_is_incomplete() {
        for case in builtin_cases() {
            let parsed: Value = serde_json::from_str(case.body).unwrap();
            let object = parsed.as_object().unwrap();
            let complete = REQUIRED_FIELDS
                .iter()
                .all(|field| object.contains_key(*field));

            if case.name.contains("missing") {
                assert!(!complete, "case '{}' should drop a field", case.name);
            } else {
                assert!(complete, "case '{}' should carry all fields", case.name);
            }
        }
    }

    #[test]
    fn accepted_frames_really_decode() {
        use crate::gateway::frame::{parse_frame, FrameOutcome};

        for case in builtin_cases().iter().filter(|c| c.name.starts_with("well-formed")) {
            let parsed: Value = serde_json::from_str(case.body).unwrap();
            let content = parsed["Content"].as_str().unwrap();
            match parse_frame(content) {
                FrameOutcome::Parsed { warnings, .. } => {
                    assert!(warnings.is_empty(), "case '{}' warned: {:?}", case.name, warnings)
                }
                FrameOutcome::Failed { reason } => {
                    panic!("case '{}' failed to decode: {}", case.name, reason)
                }
            }
        }
    }
}
