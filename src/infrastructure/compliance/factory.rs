use std::sync::Arc;
use std::time::Duration;

use super::{HttpComplianceChecker, RuleBasedComplianceChecker};
use crate::config::{ComplianceCheckerKind, ComplianceConfig};
use crate::domain::DomainError;
use crate::domain::compliance::ComplianceChecker;

/// Build the checker selected by configuration
pub fn create_compliance_checker(
    config: &ComplianceConfig,
) -> Result<Arc<dyn ComplianceChecker>, DomainError> {
    match config.checker {
        ComplianceCheckerKind::RuleBased => Ok(Arc::new(RuleBasedComplianceChecker::new())),
        ComplianceCheckerKind::Http => {
            let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                DomainError::configuration("compliance.endpoint is required for the http checker")
            })?;

            let mut checker =
                HttpComplianceChecker::new(endpoint, Duration::from_secs(config.timeout_secs))?;

            if let Some(api_key) = &config.api_key {
                checker = checker.with_api_key(api_key);
            }

            Ok(Arc::new(checker))
        }
    }
}
