use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub simulation: SimulationConfig,
    pub organization: OrganizationConfig,
    pub gs1: Gs1Config,
    pub staking: StakingConfig,
    pub compliance: ComplianceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; any origin when empty
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Mock backend behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Artificial delay awaited by every action
    pub latency_ms: u64,
    /// Start the repositories with demo records
    pub seed_mock_data: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrganizationConfig {
    /// Host used when minting `did:web` identifiers
    pub did_domain: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Gs1Config {
    pub resolver_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StakingConfig {
    /// Reward per claim, in basis points of the staked balance
    pub reward_rate_bps: u32,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceCheckerKind {
    #[default]
    RuleBased,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComplianceConfig {
    pub checker: ComplianceCheckerKind,
    /// Endpoint of the external checker, required for `http`
    pub endpoint: Option<String>,
    /// Bearer token sent to the external checker
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            latency_ms: 300,
            seed_mock_data: true,
        }
    }
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            did_domain: "norruva.com".to_string(),
        }
    }
}

impl Default for Gs1Config {
    fn default() -> Self {
        Self {
            resolver_base_url: "https://id.gs1.org".to_string(),
        }
    }
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            reward_rate_bps: 500,
        }
    }
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            checker: ComplianceCheckerKind::default(),
            endpoint: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Configuration for tests: no latency, empty repositories
    pub fn for_tests() -> Self {
        Self {
            simulation: SimulationConfig {
                latency_ms: 0,
                seed_mock_data: false,
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gs1.resolver_base_url, "https://id.gs1.org");
        assert_eq!(config.compliance.checker, ComplianceCheckerKind::RuleBased);
        assert!(config.simulation.seed_mock_data);
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "server": { "port": 9000 },
            "compliance": { "checker": "http", "endpoint": "http://localhost:9999/check" },
            "logging": { "format": "json" }
        }))
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.compliance.checker, ComplianceCheckerKind::Http);
        assert_eq!(config.compliance.timeout_secs, 30);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.staking.reward_rate_bps, 500);
    }

    #[test]
    fn test_for_tests_disables_simulation() {
        let config = AppConfig::for_tests();

        assert_eq!(config.simulation.latency_ms, 0);
        assert!(!config.simulation.seed_mock_data);
    }
}
