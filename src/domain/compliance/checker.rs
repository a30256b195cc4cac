//! Checker trait evaluating product data against standards

use async_trait::async_trait;
use std::fmt::Debug;

use super::schema::{ComplianceCheckInput, ComplianceCheckOutput};
use crate::domain::DomainError;

/// Scores product data against compliance standards
#[async_trait]
pub trait ComplianceChecker: Send + Sync + Debug {
    /// Identifier used in logs
    fn name(&self) -> &str;

    /// Input has already passed validation
    async fn check(&self, input: &ComplianceCheckInput) -> Result<ComplianceCheckOutput, DomainError>;
}
