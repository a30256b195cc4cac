//! GS1 Digital Link actions

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ActionError, ActionResponse, ActionResult, Json};
use crate::domain::gs1::{DigitalLinkRequest, QrCodeRequest};
use crate::infrastructure::gs1::{DigitalLinkResult, QrCodeResult};

pub async fn generate_digital_link(
    State(state): State<AppState>,
    Json(request): Json<DigitalLinkRequest>,
) -> ActionResult<DigitalLinkResult> {
    let result = state
        .gs1_service
        .digital_link(&request)
        .map_err(ActionError::from)?;

    if !result.check_digit_valid {
        return Ok(ActionResponse::ok(result).with_message("GTIN check digit does not validate"));
    }
    Ok(ActionResponse::ok(result))
}

pub async fn generate_qr_code(
    State(state): State<AppState>,
    Json(request): Json<QrCodeRequest>,
) -> ActionResult<QrCodeResult> {
    let result = state
        .gs1_service
        .qr_code(&request)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(result))
}
