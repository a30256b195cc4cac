//! Compliance checker backed by an external model endpoint

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::domain::DomainError;
use crate::domain::compliance::{ComplianceCheckInput, ComplianceCheckOutput, ComplianceChecker};

const PROVIDER: &str = "compliance";

/// Delegates scoring to an external model endpoint
///
/// The input is POSTed as JSON; the endpoint answers with the
/// [`ComplianceCheckOutput`] schema.
#[derive(Debug, Clone)]
pub struct HttpComplianceChecker {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpComplianceChecker {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let endpoint = endpoint.into();

        if endpoint.trim().is_empty() {
            return Err(DomainError::configuration(
                "compliance.endpoint is required for the http checker",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key: None,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ComplianceChecker for HttpComplianceChecker {
    fn name(&self) -> &str {
        "http"
    }

    async fn check(&self, input: &ComplianceCheckInput) -> Result<ComplianceCheckOutput, DomainError> {
        let mut request = self.client.post(&self.endpoint).json(input);

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        debug!(endpoint = %self.endpoint, "Sending compliance check");

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::provider(PROVIDER, format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                PROVIDER,
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        response
            .json::<ComplianceCheckOutput>()
            .await
            .map_err(|e| DomainError::provider(PROVIDER, format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compliance::ComplianceStatus;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn input() -> ComplianceCheckInput {
        ComplianceCheckInput::new(r#"{"name":"Battery"}"#, "RoHS")
    }

    fn checker(server: &MockServer) -> HttpComplianceChecker {
        HttpComplianceChecker::new(format!("{}/check", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_successful_check() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/check"))
            .and(header("authorization", "Bearer secret"))
            .and(body_partial_json(json!({ "complianceStandards": "RoHS" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "overall_status": "needs_review",
                "summary": "RoHS declaration missing substance list",
                "findings": [{
                    "standard": "RoHS",
                    "status": "needs_review",
                    "finding": "No substance list",
                    "evidenceReferences": ["/name"]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let output = checker(&server)
            .with_api_key("secret")
            .check(&input())
            .await
            .unwrap();

        assert_eq!(output.overall_status, ComplianceStatus::NeedsReview);
        assert_eq!(output.findings[0].evidence_references, Some(vec!["/name".to_string()]));
    }

    #[tokio::test]
    async fn test_upstream_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model overloaded"))
            .mount(&server)
            .await;

        let err = checker(&server).check(&input()).await.unwrap_err();

        assert!(matches!(err, DomainError::Provider { .. }));
        assert!(err.message().contains("model overloaded"));
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .mount(&server)
            .await;

        let err = checker(&server).check(&input()).await.unwrap_err();

        assert!(err.message().contains("Failed to parse response"));
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let err = HttpComplianceChecker::new(" ", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }
}
