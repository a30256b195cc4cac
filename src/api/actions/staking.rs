//! Staking actions

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::types::{ActionError, ActionResponse, ActionResult, Json};
use crate::domain::staking::{StakeRequest, StakingEvent, StakingEventKind, StakingSummary};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingEventResponse {
    pub id: String,
    pub kind: StakingEventKind,
    pub amount: u64,
    pub timestamp: DateTime<Utc>,
    pub tx_hash: String,
}

impl From<&StakingEvent> for StakingEventResponse {
    fn from(event: &StakingEvent) -> Self {
        Self {
            id: event.id().as_str().to_string(),
            kind: event.kind(),
            amount: event.amount(),
            timestamp: event.timestamp(),
            tx_hash: event.tx_hash().to_string(),
        }
    }
}

pub async fn stake(
    State(state): State<AppState>,
    Json(request): Json<StakeRequest>,
) -> ActionResult<StakingEventResponse> {
    let event = state
        .staking_service
        .stake(request)
        .await
        .map_err(ActionError::from)?;

    let message = format!("Staked {} tokens", event.amount());
    Ok(ActionResponse::created(StakingEventResponse::from(&event)).with_message(message))
}

pub async fn unstake(
    State(state): State<AppState>,
    Json(request): Json<StakeRequest>,
) -> ActionResult<StakingEventResponse> {
    let event = state
        .staking_service
        .unstake(request)
        .await
        .map_err(ActionError::from)?;

    let message = format!("Unstaked {} tokens", event.amount());
    Ok(ActionResponse::created(StakingEventResponse::from(&event)).with_message(message))
}

pub async fn claim_rewards(State(state): State<AppState>) -> ActionResult<StakingEventResponse> {
    let event = state
        .staking_service
        .claim_rewards()
        .await
        .map_err(ActionError::from)?;

    let message = format!("Claimed {} reward tokens", event.amount());
    Ok(ActionResponse::created(StakingEventResponse::from(&event)).with_message(message))
}

pub async fn staking_history(
    State(state): State<AppState>,
) -> ActionResult<Vec<StakingEventResponse>> {
    let events = state
        .staking_service
        .history()
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(events.iter().map(StakingEventResponse::from).collect()))
}

pub async fn staking_summary(State(state): State<AppState>) -> ActionResult<StakingSummary> {
    let summary = state
        .staking_service
        .summary()
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(summary))
}
