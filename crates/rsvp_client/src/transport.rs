use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::SubmissionPayload;
use tracing::debug;

use crate::SubmissionPort;

/// Posts the payload as JSON and never looks at the answer.
///
/// Google Apps Script intake endpoints are called cross-origin without CORS
/// headers, so a browser only ever sees an opaque response. This port keeps
/// that contract: HTTP error statuses count as delivered, only failures to
/// send the request at all are reported.
#[derive(Clone, Default)]
pub struct HttpIntakePort {
    http: Client,
}

impl HttpIntakePort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SubmissionPort for HttpIntakePort {
    async fn submit(&self, endpoint: &str, payload: &SubmissionPayload) -> Result<()> {
        let response = self
            .http
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("failed to reach intake endpoint '{endpoint}'"))?;

        debug!(status = %response.status(), "intake endpoint answered");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
