//! Compliance check action

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ActionError, ActionResponse, ActionResult, Json};
use crate::domain::compliance::{ComplianceCheckInput, ComplianceCheckOutput};

pub async fn check_compliance(
    State(state): State<AppState>,
    Json(input): Json<ComplianceCheckInput>,
) -> ActionResult<ComplianceCheckOutput> {
    debug!(
        checker = state.compliance_service.checker_name(),
        "Running compliance check"
    );

    let output = state
        .compliance_service
        .check(input)
        .await
        .map_err(ActionError::from)?;

    let message = output.summary.clone();
    Ok(ActionResponse::ok(output).with_message(message))
}
