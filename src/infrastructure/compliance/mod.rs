//! Compliance checker implementations

mod factory;
mod http;
mod rule_based;
mod service;

pub use factory::create_compliance_checker;
pub use http::HttpComplianceChecker;
pub use rule_based::RuleBasedComplianceChecker;
pub use service::ComplianceService;
