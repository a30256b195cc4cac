//! Issued credential actions

use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::state::AppState;
use crate::api::types::{ActionError, ActionResponse, ActionResult, Json};
use crate::domain::credential::{CredentialStatus, IssueCredentialRequest, IssuedCredential};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub issuer: String,
    pub subject_dpp_id: String,
    pub issuance_date: DateTime<Utc>,
    pub status: CredentialStatus,
}

impl From<&IssuedCredential> for CredentialResponse {
    fn from(credential: &IssuedCredential) -> Self {
        Self {
            id: credential.id().to_string(),
            credential_type: credential.credential_type().to_string(),
            issuer: credential.issuer().to_string(),
            subject_dpp_id: credential.subject_dpp_id().to_string(),
            issuance_date: credential.issuance_date(),
            status: credential.status(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialQuery {
    pub subject_dpp_id: Option<String>,
}

pub async fn issue_credential(
    State(state): State<AppState>,
    Json(request): Json<IssueCredentialRequest>,
) -> ActionResult<CredentialResponse> {
    let credential = state
        .credential_service
        .issue(request)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::created(CredentialResponse::from(&credential)).with_message("Credential issued"))
}

pub async fn list_credentials(
    State(state): State<AppState>,
    Query(query): Query<CredentialQuery>,
) -> ActionResult<Vec<CredentialResponse>> {
    let credentials = state
        .credential_service
        .list(query.subject_dpp_id.as_deref())
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(credentials.iter().map(CredentialResponse::from).collect()))
}

pub async fn get_credential(
    State(state): State<AppState>,
    Path(credential_id): Path<String>,
) -> ActionResult<CredentialResponse> {
    let credential = state
        .credential_service
        .get(&credential_id)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(CredentialResponse::from(&credential)))
}

/// W3C VC rendering with a mock proof
pub async fn get_verifiable_credential(
    State(state): State<AppState>,
    Path(credential_id): Path<String>,
) -> ActionResult<Value> {
    let vc = state
        .credential_service
        .verifiable_credential(&credential_id)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(vc))
}
