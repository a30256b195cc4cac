//! DID document actions

use axum::extract::{Path, State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ActionError, ActionResponse, ActionResult, Json};
use crate::domain::did::{CreateDidRequest, DidDocument, UpdateDidAliasRequest};

pub async fn create_did(
    State(state): State<AppState>,
    Json(request): Json<CreateDidRequest>,
) -> ActionResult<DidDocument> {
    debug!(alias = %request.alias, "Creating DID");

    let document = state
        .did_service
        .create(request)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::created(document).with_message("DID created"))
}

pub async fn list_dids(State(state): State<AppState>) -> ActionResult<Vec<DidDocument>> {
    let documents = state.did_service.list().await.map_err(ActionError::from)?;

    Ok(ActionResponse::ok(documents))
}

pub async fn get_did(
    State(state): State<AppState>,
    Path(did): Path<String>,
) -> ActionResult<DidDocument> {
    let document = state.did_service.get(&did).await.map_err(ActionError::from)?;

    Ok(ActionResponse::ok(document))
}

pub async fn update_did_alias(
    State(state): State<AppState>,
    Path(did): Path<String>,
    Json(request): Json<UpdateDidAliasRequest>,
) -> ActionResult<DidDocument> {
    let document = state
        .did_service
        .update_alias(&did, request)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(document).with_message("DID alias updated"))
}

pub async fn activate_did(
    State(state): State<AppState>,
    Path(did): Path<String>,
) -> ActionResult<DidDocument> {
    let document = state
        .did_service
        .activate(&did)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(document).with_message("DID activated"))
}

pub async fn revoke_did(
    State(state): State<AppState>,
    Path(did): Path<String>,
) -> ActionResult<DidDocument> {
    debug!(did = %did, "Revoking DID");

    let document = state
        .did_service
        .revoke(&did)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(document).with_message("DID revoked"))
}
