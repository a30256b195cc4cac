//! Team service for roster management

use std::sync::Arc;

use tracing::info;

use crate::domain::storage::Storage;
use crate::domain::team::{
    InviteTeamMemberRequest, TeamMember, TeamMemberId, UpdateTeamRoleRequest,
};
use crate::domain::validation::validate_request;
use crate::domain::DomainError;
use crate::infrastructure::latency::LatencySimulator;

#[derive(Debug)]
pub struct TeamService {
    storage: Arc<dyn Storage<TeamMember>>,
    latency: LatencySimulator,
}

impl TeamService {
    pub fn new(storage: Arc<dyn Storage<TeamMember>>, latency: LatencySimulator) -> Self {
        Self { storage, latency }
    }

    /// Invite a new member; emails are unique per roster regardless of case
    pub async fn invite(&self, request: InviteTeamMemberRequest) -> Result<TeamMember, DomainError> {
        validate_request(&request)?;
        self.latency.pause().await;

        let email = request.email.trim().to_string();
        let member = TeamMember::invited(
            TeamMemberId::generate(),
            request.name.trim(),
            &email,
            request.role,
        );

        let same_email = |existing: &TeamMember, new: &TeamMember| existing.has_email(new.email());
        let member = self
            .storage
            .create_unique(
                member,
                &same_email,
                &format!("A team member with email '{}' already exists", email),
            )
            .await?;

        info!(id = %member.id(), email = %member.email(), role = %member.role(), "Invited team member");
        Ok(member)
    }

    pub async fn list(&self) -> Result<Vec<TeamMember>, DomainError> {
        self.latency.pause().await;
        self.storage.list().await
    }

    /// Number of records, also used as a readiness probe
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }

    pub async fn get(&self, id: &str) -> Result<TeamMember, DomainError> {
        self.latency.pause().await;

        self.storage
            .get(&TeamMemberId::new(id))
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn update_role(
        &self,
        id: &str,
        request: UpdateTeamRoleRequest,
    ) -> Result<TeamMember, DomainError> {
        validate_request(&request)?;
        self.latency.pause().await;

        let role = request.role;
        let updated = self
            .storage
            .modify(&TeamMemberId::new(id), &|member: &mut TeamMember| member.set_role(role))
            .await
            .map_err(|e| rename_not_found(e, id))?;

        info!(id = %id, role = %role, "Updated team member role");
        Ok(updated)
    }

    pub async fn accept_invitation(&self, id: &str) -> Result<TeamMember, DomainError> {
        self.latency.pause().await;

        let accepted = self
            .storage
            .modify(&TeamMemberId::new(id), &|member: &mut TeamMember| {
                member.accept_invitation()
            })
            .await
            .map_err(|e| rename_not_found(e, id))?;

        info!(id = %id, "Team member accepted invitation");
        Ok(accepted)
    }

    pub async fn revoke(&self, id: &str) -> Result<TeamMember, DomainError> {
        self.latency.pause().await;

        let revoked = self
            .storage
            .modify(&TeamMemberId::new(id), &|member: &mut TeamMember| member.revoke())
            .await
            .map_err(|e| rename_not_found(e, id))?;

        info!(id = %id, "Revoked team member access");
        Ok(revoked)
    }

    /// Remove a member from the roster entirely
    pub async fn remove(&self, id: &str) -> Result<(), DomainError> {
        self.latency.pause().await;

        if !self.storage.delete(&TeamMemberId::new(id)).await? {
            return Err(not_found(id));
        }

        info!(id = %id, "Removed team member");
        Ok(())
    }
}

fn not_found(id: &str) -> DomainError {
    DomainError::not_found(format!("Team member '{}' not found", id))
}

fn rename_not_found(error: DomainError, id: &str) -> DomainError {
    match error {
        DomainError::NotFound { .. } => not_found(id),
        other => other,
    }
}
