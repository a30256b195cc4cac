//! Action endpoints over the mock repositories

pub mod api_keys;
pub mod compliance;
pub mod credentials;
pub mod dids;
pub mod gs1;
pub mod staking;
pub mod team;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::state::AppState;

/// Create the `/api` router
pub fn create_actions_router() -> Router<AppState> {
    Router::new()
        // API keys
        .route("/api-keys", get(api_keys::list_api_keys))
        .route("/api-keys", post(api_keys::create_api_key))
        .route("/api-keys/verify", post(api_keys::verify_api_key))
        .route("/api-keys/{key_id}", get(api_keys::get_api_key))
        .route("/api-keys/{key_id}/revoke", post(api_keys::revoke_api_key))
        // DIDs
        .route("/dids", get(dids::list_dids))
        .route("/dids", post(dids::create_did))
        .route("/dids/{did}", get(dids::get_did))
        .route("/dids/{did}/alias", put(dids::update_did_alias))
        .route("/dids/{did}/activate", post(dids::activate_did))
        .route("/dids/{did}/revoke", post(dids::revoke_did))
        // Team
        .route("/team", get(team::list_team_members))
        .route("/team", post(team::invite_team_member))
        .route("/team/{member_id}", get(team::get_team_member))
        .route("/team/{member_id}", delete(team::remove_team_member))
        .route("/team/{member_id}/role", put(team::update_team_member_role))
        .route("/team/{member_id}/accept", post(team::accept_invitation))
        .route("/team/{member_id}/revoke", post(team::revoke_team_member))
        // Credentials
        .route("/credentials", get(credentials::list_credentials))
        .route("/credentials", post(credentials::issue_credential))
        .route("/credentials/{credential_id}", get(credentials::get_credential))
        .route(
            "/credentials/{credential_id}/vc",
            get(credentials::get_verifiable_credential),
        )
        // Staking
        .route("/staking/stake", post(staking::stake))
        .route("/staking/unstake", post(staking::unstake))
        .route("/staking/claim", post(staking::claim_rewards))
        .route("/staking/history", get(staking::staking_history))
        .route("/staking/summary", get(staking::staking_summary))
        // GS1
        .route("/gs1/digital-link", post(gs1::generate_digital_link))
        .route("/gs1/qr-code", post(gs1::generate_qr_code))
        // Compliance
        .route("/compliance/check", post(compliance::check_compliance))
}
