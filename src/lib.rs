//! Norruva Digital Product Passport service
//!
//! Partner-facing actions over in-memory mock repositories:
//! - API keys, organization DIDs and the team roster
//! - Issued verifiable credentials and staking history
//! - GS1 Digital Link / QR code generation
//! - Compliance checks against free-text regulatory standards

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use api::state::AppState;
use domain::Storage;
use infrastructure::{
    api_key::ApiKeyService,
    compliance::{ComplianceService, create_compliance_checker},
    credential::CredentialService,
    did::DidService,
    gs1::Gs1Service,
    latency::LatencySimulator,
    seed::SeedData,
    staking::StakingService,
    storage::InMemoryStorage,
    team::TeamService,
};

/// Build every service over fresh in-memory repositories
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let latency = LatencySimulator::from_millis(config.simulation.latency_ms);

    let seed = if config.simulation.seed_mock_data {
        SeedData::demo(&config.organization.did_domain)
            .context("Failed to build demo data for organization.did_domain")?
    } else {
        SeedData::empty()
    };

    info!(
        api_keys = seed.api_keys.len(),
        dids = seed.dids.len(),
        team_members = seed.team_members.len(),
        credentials = seed.credentials.len(),
        staking_events = seed.staking_events.len(),
        "Initializing mock repositories"
    );

    let api_keys = in_memory(seed.api_keys);
    let dids = in_memory(seed.dids);
    let team_members = in_memory(seed.team_members);
    let credentials = in_memory(seed.credentials);
    let staking_events = in_memory(seed.staking_events);

    let did_service = Arc::new(DidService::new(
        dids,
        config.organization.did_domain.clone(),
        latency,
    ));

    let checker = create_compliance_checker(&config.compliance)
        .context("Failed to configure the compliance checker")?;
    info!(checker = checker.name(), "Compliance checker ready");

    Ok(AppState {
        api_key_service: Arc::new(ApiKeyService::new(api_keys, latency)),
        did_service: did_service.clone(),
        team_service: Arc::new(TeamService::new(team_members, latency)),
        credential_service: Arc::new(CredentialService::new(credentials, did_service, latency)),
        staking_service: Arc::new(StakingService::new(
            staking_events,
            config.staking.reward_rate_bps,
            latency,
        )),
        gs1_service: Arc::new(Gs1Service::new(
            config.gs1.resolver_base_url.clone(),
            latency,
        )),
        compliance_service: Arc::new(ComplianceService::new(checker, latency)),
    })
}

fn in_memory<E>(entities: Vec<E>) -> Arc<dyn Storage<E>>
where
    E: domain::StorageEntity + 'static,
{
    Arc::new(InMemoryStorage::with_entities(entities))
}
