//! Compliance check domain
//!
//! The contract for scoring product passport data against a free-text list
//! of regulatory standards. Scoring itself is done by a [`ComplianceChecker`].

mod checker;
mod schema;

pub use checker::ComplianceChecker;
pub use schema::{
    ComplianceCheckInput, ComplianceCheckOutput, ComplianceFinding, ComplianceStatus,
    overall_status, parse_standards, summarize,
};
