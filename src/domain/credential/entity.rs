//! Issued credential record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialId(String);

impl CredentialId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// `urn:uuid:<v4>`, the usual VC identifier form
    pub fn generate() -> Self {
        Self(format!("urn:uuid:{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CredentialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for CredentialId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialStatus {
    Valid,
    Pending,
}

impl std::fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "Valid"),
            Self::Pending => write!(f, "Pending"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedCredential {
    id: CredentialId,
    credential_type: String,
    issuer: String,
    subject_dpp_id: String,
    issuance_date: DateTime<Utc>,
    status: CredentialStatus,
}

impl IssuedCredential {
    pub fn new(
        id: CredentialId,
        credential_type: impl Into<String>,
        issuer: impl Into<String>,
        subject_dpp_id: impl Into<String>,
        status: CredentialStatus,
    ) -> Self {
        Self {
            id,
            credential_type: credential_type.into(),
            issuer: issuer.into(),
            subject_dpp_id: subject_dpp_id.into(),
            issuance_date: Utc::now(),
            status,
        }
    }

    pub fn with_issuance_date(mut self, issuance_date: DateTime<Utc>) -> Self {
        self.issuance_date = issuance_date;
        self
    }

    pub fn id(&self) -> &CredentialId {
        &self.id
    }

    pub fn credential_type(&self) -> &str {
        &self.credential_type
    }

    /// Issuer DID
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn subject_dpp_id(&self) -> &str {
        &self.subject_dpp_id
    }

    pub fn issuance_date(&self) -> DateTime<Utc> {
        self.issuance_date
    }

    pub fn status(&self) -> CredentialStatus {
        self.status
    }
}

impl StorageEntity for IssuedCredential {
    type Key = CredentialId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
