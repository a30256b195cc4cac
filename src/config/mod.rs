//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, ComplianceCheckerKind, ComplianceConfig, Gs1Config, LogFormat, LoggingConfig,
    OrganizationConfig, ServerConfig, SimulationConfig, StakingConfig,
};
