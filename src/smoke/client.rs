//! HTTP client side of the smoke test.

use crate::error::{GatewayError, Result};
use crate::smoke::{Expectation, SmokeCase};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Verdict for one smoke case.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

pub struct SmokeClient {
    client: Client,
    endpoint: String,
}

impl SmokeClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|err| {
            GatewayError::network_with_source("failed to build HTTP client", None, err)
        })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Post one case and judge the response against its expectation.
    pub async fn run_case(&self, case: &SmokeCase) -> CaseReport {
        debug!(case = case.name, endpoint = %self.endpoint, "posting smoke case");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(case.body)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                return CaseReport {
                    name: case.name,
                    passed: false,
                    detail: format!("request failed: {}", err),
                }
            }
        };

        let status = response.status();
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                return CaseReport {
                    name: case.name,
                    passed: false,
                    detail: format!("response was not JSON: {}", err),
                }
            }
        };
        let code = body.get("Code").and_then(Value::as_str).unwrap_or("");

        let (expected_status, expected_code) = match case.expectation {
            Expectation::Accepted => (reqwest::StatusCode::OK, "ok"),
            Expectation::Rejected => (reqwest::StatusCode::BAD_REQUEST, "error"),
        };

        if status == expected_status && code == expected_code {
            CaseReport {
                name: case.name,
                passed: true,
                detail: format!("{} / Code={}", status.as_u16(), code),
            }
        } else {
            CaseReport {
                name: case.name,
                passed: false,
                detail: format!(
                    "expected {} / Code={}, got {} / Code={}",
                    expected_status.as_u16(),
                    expected_code,
                    status.as_u16(),
                    code
                ),
            }
        }
    }

    /// Run every case in order, one request at a time.
    pub async fn run_all(&self, cases: &[SmokeCase]) -> Vec<CaseReport> {
        let mut reports = Vec::with_capacity(cases.len());
        for case in cases {
            reports.push(self.run_case(case).await);
        }
        reports
    }
}
