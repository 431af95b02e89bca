//! Client side of the alert boundary: the detector submits an empty-payload
//! trigger signal to the dispatcher over HTTP. The signal carries no
//! detection detail by design — its only semantic content is "a confirmed
//! event occurred now".

use crate::error::TransportError;
use reqwest::Client;
use std::time::Duration;

pub struct AlertClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl AlertClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit one confirmed-event signal. Bounded by the configured timeout
    /// so an unreachable dispatcher cannot stall the frame loop; the caller
    /// logs any failure and moves on — the state machine has already
    /// re-armed either way.
    pub async fn submit(&self) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout {
                        timeout_secs: self.timeout.as_secs(),
                    }
                } else {
                    TransportError::Unreachable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Rejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn submit_posts_to_alert_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/alert"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "alert received, notifications triggered"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AlertClient::new(format!("{}/alert", server.uri()), Duration::from_secs(2));
        client.submit().await.expect("submission should succeed");
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = AlertClient::new(format!("{}/alert", server.uri()), Duration::from_secs(2));
        let err = client.submit().await.unwrap_err();
        assert!(matches!(err, TransportError::Rejected { status: 500 }));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_reported_not_panicked() {
        // Port 9 (discard) is closed in practice; connection is refused fast.
        let client = AlertClient::new("http://127.0.0.1:9/alert", Duration::from_secs(1));
        let err = client.submit().await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Unreachable(_) | TransportError::Timeout { .. }
        ));
    }
}
