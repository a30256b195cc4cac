//! DID document entity
//!
//! Documents follow the W3C DID Core shape. Keys are mock values: nothing
//! here signs or resolves anything.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::DomainError;

pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

static DID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^did:[a-z0-9]+:[A-Za-z0-9._%-]+(:[A-Za-z0-9._%-]+)*$").expect("valid regex")
});

/// A DID string, `did:<method>:<method-specific-id>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Did(String);

impl Did {
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if !DID_PATTERN.is_match(&value) {
            return Err(DomainError::invalid_field(
                "did",
                format!("'{}' is not a valid DID (expected did:<method>:<id>)", value),
            ));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The DID method name (`web`, `ebsi`, `key`, ...)
    pub fn method(&self) -> &str {
        self.0.split(':').nth(1).unwrap_or_default()
    }

    /// A DID URL fragment reference, e.g. `did:web:x#key-1`
    pub fn fragment(&self, fragment: &str) -> String {
        format!("{}#{}", self.0, fragment)
    }
}

impl TryFrom<String> for Did {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Did> for String {
    fn from(did: Did) -> Self {
        did.0
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for Did {
    fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DidStatus {
    #[default]
    Active,
    Revoked,
    Pending,
}

impl std::fmt::Display for DidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Revoked => write!(f, "revoked"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub method_type: String,
    pub controller: String,
    pub public_key_multibase: String,
}

impl VerificationMethod {
    /// Ed25519 method `#<fragment>` controlled by `did`
    pub fn ed25519(did: &Did, fragment: &str, public_key_multibase: impl Into<String>) -> Self {
        Self {
            id: did.fragment(fragment),
            method_type: "Ed25519VerificationKey2020".to_string(),
            controller: did.to_string(),
            public_key_multibase: public_key_multibase.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    #[serde(rename = "@context")]
    context: Vec<String>,
    id: Did,
    verification_method: Vec<VerificationMethod>,
    authentication: Vec<String>,
    assertion_method: Vec<String>,
    alias: String,
    status: DidStatus,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl DidDocument {
    /// New active document whose single key backs authentication and assertion
    pub fn new(id: Did, alias: impl Into<String>, method: VerificationMethod) -> Self {
        let now = Utc::now();
        let reference = method.id.clone();

        Self {
            context: vec![DID_CONTEXT.to_string()],
            id,
            verification_method: vec![method],
            authentication: vec![reference.clone()],
            assertion_method: vec![reference],
            alias: alias.into(),
            status: DidStatus::Active,
            created: now,
            updated: now,
        }
    }

    pub fn pending(mut self) -> Self {
        self.status = DidStatus::Pending;
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self.updated = created;
        self
    }

    // Getters

    pub fn id(&self) -> &Did {
        &self.id
    }

    pub fn context(&self) -> &[String] {
        &self.context
    }

    pub fn verification_method(&self) -> &[VerificationMethod] {
        &self.verification_method
    }

    pub fn authentication(&self) -> &[String] {
        &self.authentication
    }

    pub fn assertion_method(&self) -> &[String] {
        &self.assertion_method
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn status(&self) -> DidStatus {
        self.status
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    pub fn is_active(&self) -> bool {
        self.status == DidStatus::Active
    }

    // Mutators

    pub fn set_alias(&mut self, alias: impl Into<String>) -> Result<(), DomainError> {
        self.ensure_not_revoked()?;
        self.alias = alias.into();
        self.touch();
        Ok(())
    }

    pub fn activate(&mut self) -> Result<(), DomainError> {
        match self.status {
            DidStatus::Pending => {
                self.status = DidStatus::Active;
                self.touch();
                Ok(())
            }
            DidStatus::Active => Err(DomainError::invalid_state(format!(
                "DID '{}' is already active",
                self.id
            ))),
            DidStatus::Revoked => self.ensure_not_revoked(),
        }
    }

    pub fn revoke(&mut self) -> Result<(), DomainError> {
        self.ensure_not_revoked()?;
        self.status = DidStatus::Revoked;
        self.touch();
        Ok(())
    }

    fn ensure_not_revoked(&self) -> Result<(), DomainError> {
        if self.status == DidStatus::Revoked {
            return Err(DomainError::invalid_state(format!(
                "DID '{}' is already revoked",
                self.id
            )));
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated = Utc::now();
    }
}

impl StorageEntity for DidDocument {
    type Key = Did;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
