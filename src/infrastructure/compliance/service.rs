//! Compliance check action

use std::sync::Arc;
use tracing::info;

use crate::domain::DomainError;
use crate::domain::compliance::{ComplianceCheckInput, ComplianceCheckOutput, ComplianceChecker};
use crate::domain::validation::validate_request;
use crate::infrastructure::latency::LatencySimulator;

/// Validates compliance requests and hands them to the configured checker
#[derive(Debug, Clone)]
pub struct ComplianceService {
    checker: Arc<dyn ComplianceChecker>,
    latency: LatencySimulator,
}

impl ComplianceService {
    pub fn new(checker: Arc<dyn ComplianceChecker>, latency: LatencySimulator) -> Self {
        Self { checker, latency }
    }

    pub fn checker_name(&self) -> &str {
        self.checker.name()
    }

    pub async fn check(&self, input: ComplianceCheckInput) -> Result<ComplianceCheckOutput, DomainError> {
        validate_request(&input)?;

        self.latency.pause().await;

        let output = self.checker.check(&input).await?;

        info!(
            checker = self.checker.name(),
            standards = output.findings.len(),
            overall_status = %output.overall_status,
            "Compliance check completed"
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::compliance::ComplianceStatus;
    use crate::infrastructure::compliance::RuleBasedComplianceChecker;

    fn service() -> ComplianceService {
        ComplianceService::new(
            Arc::new(RuleBasedComplianceChecker::new()),
            LatencySimulator::none(),
        )
    }

    #[tokio::test]
    async fn test_check() {
        let output = service()
            .check(ComplianceCheckInput::new(
                r#"{"certifications":["RoHS"]}"#,
                "RoHS",
            ))
            .await
            .unwrap();

        assert_eq!(output.overall_status, ComplianceStatus::Compliant);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_checker() {
        let err = service()
            .check(ComplianceCheckInput::new("", ""))
            .await
            .unwrap_err();

        assert_eq!(err.field_errors().len(), 2);
    }
}
