//! Team member entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamMemberId(String);

impl TeamMemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("user_{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamMemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for TeamMemberId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Role of a member within the organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    /// Full control including roster management
    Admin,
    /// Manages products and passports
    Manager,
    /// Edits passport data
    Editor,
    /// Read-only access
    Viewer,
    /// Read-only access plus compliance reports
    Auditor,
}

impl std::fmt::Display for TeamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
            Self::Editor => write!(f, "editor"),
            Self::Viewer => write!(f, "viewer"),
            Self::Auditor => write!(f, "auditor"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    #[default]
    Pending,
    Revoked,
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Pending => write!(f, "pending"),
            Self::Revoked => write!(f, "revoked"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    id: TeamMemberId,
    name: String,
    email: String,
    role: TeamRole,
    status: MemberStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_login: Option<DateTime<Utc>>,
    joined_date: DateTime<Utc>,
}

impl TeamMember {
    /// A freshly invited, pending member
    pub fn invited(
        id: TeamMemberId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: TeamRole,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            status: MemberStatus::Pending,
            last_login: None,
            joined_date: Utc::now(),
        }
    }

    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_joined_date(mut self, joined_date: DateTime<Utc>) -> Self {
        self.joined_date = joined_date;
        self
    }

    pub fn with_last_login(mut self, last_login: DateTime<Utc>) -> Self {
        self.last_login = Some(last_login);
        self
    }

    // Getters

    pub fn id(&self) -> &TeamMemberId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> TeamRole {
        self.role
    }

    pub fn status(&self) -> MemberStatus {
        self.status
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }

    pub fn joined_date(&self) -> DateTime<Utc> {
        self.joined_date
    }

    /// Emails are unique per roster regardless of case
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().to_lowercase() == email.trim().to_lowercase()
    }

    // Mutators

    pub fn set_role(&mut self, role: TeamRole) -> Result<(), DomainError> {
        self.ensure_not_revoked()?;
        self.role = role;
        Ok(())
    }

    pub fn accept_invitation(&mut self) -> Result<(), DomainError> {
        match self.status {
            MemberStatus::Pending => {
                self.status = MemberStatus::Active;
                self.last_login = Some(Utc::now());
                Ok(())
            }
            MemberStatus::Active => Err(DomainError::invalid_state(format!(
                "Team member '{}' has already accepted the invitation",
                self.id
            ))),
            MemberStatus::Revoked => self.ensure_not_revoked(),
        }
    }

    pub fn revoke(&mut self) -> Result<(), DomainError> {
        self.ensure_not_revoked()?;
        self.status = MemberStatus::Revoked;
        Ok(())
    }

    fn ensure_not_revoked(&self) -> Result<(), DomainError> {
        if self.status == MemberStatus::Revoked {
            return Err(DomainError::invalid_state(format!(
                "Team member '{}' access is already revoked",
                self.id
            )));
        }
        Ok(())
    }
}

impl StorageEntity for TeamMember {
    type Key = TeamMemberId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
