//! API key actions

use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ActionError, ActionResponse, ActionResult, Json};
use crate::domain::api_key::{ApiKey, ApiKeyStatus, CreateApiKeyRequest};

/// API key as listed; never carries the token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    pub id: String,
    pub name: String,
    pub prefix: String,
    pub status: ApiKeyStatus,
    pub permissions: Vec<String>,
    pub created_date: DateTime<Utc>,
    pub last_used_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&ApiKey> for ApiKeyResponse {
    fn from(key: &ApiKey) -> Self {
        Self {
            id: key.id().to_string(),
            name: key.name().to_string(),
            prefix: key.key_prefix().to_string(),
            status: key.status(),
            permissions: key.permissions().to_vec(),
            created_date: key.created_at(),
            last_used_date: key.last_used_at(),
            expires_at: key.expires_at(),
        }
    }
}

/// Creation result, the only response that includes the full token
#[derive(Debug, Clone, Serialize)]
pub struct CreatedApiKeyResponse {
    #[serde(flatten)]
    pub api_key: ApiKeyResponse,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyApiKeyRequest {
    #[serde(default)]
    pub token: String,
}

pub async fn create_api_key(
    State(state): State<AppState>,
    Json(request): Json<CreateApiKeyRequest>,
) -> ActionResult<CreatedApiKeyResponse> {
    debug!(name = %request.name, "Creating API key");

    let created = state
        .api_key_service
        .create(request)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::created(CreatedApiKeyResponse {
        api_key: ApiKeyResponse::from(&created.api_key),
        token: created.token,
    })
    .with_message("API key created. Copy the token now, it will not be shown again."))
}

pub async fn list_api_keys(State(state): State<AppState>) -> ActionResult<Vec<ApiKeyResponse>> {
    let keys = state
        .api_key_service
        .list()
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(keys.iter().map(ApiKeyResponse::from).collect()))
}

pub async fn get_api_key(
    State(state): State<AppState>,
    Path(key_id): Path<String>,
) -> ActionResult<ApiKeyResponse> {
    let key = state
        .api_key_service
        .get(&key_id)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(ApiKeyResponse::from(&key)))
}

pub async fn revoke_api_key(
    State(state): State<AppState>,
    Path(key_id): Path<String>,
) -> ActionResult<ApiKeyResponse> {
    debug!(key_id = %key_id, "Revoking API key");

    let key = state
        .api_key_service
        .revoke(&key_id)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(ApiKeyResponse::from(&key)).with_message("API key revoked"))
}

pub async fn verify_api_key(
    State(state): State<AppState>,
    Json(request): Json<VerifyApiKeyRequest>,
) -> ActionResult<ApiKeyResponse> {
    let key = state
        .api_key_service
        .verify(&request.token)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(ApiKeyResponse::from(&key)))
}
