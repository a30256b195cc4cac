//! Team roster actions

use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ActionError, ActionResponse, ActionResult, Json};
use crate::domain::team::{
    InviteTeamMemberRequest, MemberStatus, TeamMember, TeamRole, UpdateTeamRoleRequest,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: TeamRole,
    pub status: MemberStatus,
    pub last_login: Option<DateTime<Utc>>,
    pub joined_date: DateTime<Utc>,
}

impl From<&TeamMember> for TeamMemberResponse {
    fn from(member: &TeamMember) -> Self {
        Self {
            id: member.id().to_string(),
            name: member.name().to_string(),
            email: member.email().to_string(),
            role: member.role(),
            status: member.status(),
            last_login: member.last_login(),
            joined_date: member.joined_date(),
        }
    }
}

pub async fn invite_team_member(
    State(state): State<AppState>,
    Json(request): Json<InviteTeamMemberRequest>,
) -> ActionResult<TeamMemberResponse> {
    debug!(role = %request.role, "Inviting team member");

    let member = state
        .team_service
        .invite(request)
        .await
        .map_err(ActionError::from)?;

    let message = format!("Invitation sent to {}", member.email());
    Ok(ActionResponse::created(TeamMemberResponse::from(&member)).with_message(message))
}

pub async fn list_team_members(
    State(state): State<AppState>,
) -> ActionResult<Vec<TeamMemberResponse>> {
    let members = state.team_service.list().await.map_err(ActionError::from)?;

    Ok(ActionResponse::ok(members.iter().map(TeamMemberResponse::from).collect()))
}

pub async fn get_team_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> ActionResult<TeamMemberResponse> {
    let member = state
        .team_service
        .get(&member_id)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(TeamMemberResponse::from(&member)))
}

pub async fn update_team_member_role(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
    Json(request): Json<UpdateTeamRoleRequest>,
) -> ActionResult<TeamMemberResponse> {
    let member = state
        .team_service
        .update_role(&member_id, request)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(TeamMemberResponse::from(&member)).with_message("Role updated"))
}

pub async fn accept_invitation(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> ActionResult<TeamMemberResponse> {
    let member = state
        .team_service
        .accept_invitation(&member_id)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(TeamMemberResponse::from(&member)).with_message("Invitation accepted"))
}

pub async fn revoke_team_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> ActionResult<TeamMemberResponse> {
    debug!(member_id = %member_id, "Revoking team member access");

    let member = state
        .team_service
        .revoke(&member_id)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(TeamMemberResponse::from(&member)).with_message("Access revoked"))
}

pub async fn remove_team_member(
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> ActionResult<()> {
    debug!(member_id = %member_id, "Removing team member");

    state
        .team_service
        .remove(&member_id)
        .await
        .map_err(ActionError::from)?;

    Ok(ActionResponse::ok(()).with_message("Team member removed"))
}
