//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::api_key::ApiKeyService;
use crate::infrastructure::compliance::ComplianceService;
use crate::infrastructure::credential::CredentialService;
use crate::infrastructure::did::DidService;
use crate::infrastructure::gs1::Gs1Service;
use crate::infrastructure::staking::StakingService;
use crate::infrastructure::team::TeamService;

/// Services behind the action endpoints
#[derive(Debug, Clone)]
pub struct AppState {
    pub api_key_service: Arc<ApiKeyService>,
    pub did_service: Arc<DidService>,
    pub team_service: Arc<TeamService>,
    pub credential_service: Arc<CredentialService>,
    pub staking_service: Arc<StakingService>,
    pub gs1_service: Arc<Gs1Service>,
    pub compliance_service: Arc<ComplianceService>,
}
