//! DID service
//!
//! Registers organization DIDs with mock Ed25519 keys. DIDs are unique
//! within the organization and are never deleted, only revoked.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use tracing::info;

use crate::domain::did::{
    slugify, CreateDidRequest, Did, DidDocument, UpdateDidAliasRequest, VerificationMethod,
};
use crate::domain::storage::Storage;
use crate::domain::validation::validate_request;
use crate::domain::DomainError;
use crate::infrastructure::latency::LatencySimulator;

const KEY_FRAGMENT: &str = "key-1";

#[derive(Debug)]
pub struct DidService {
    storage: Arc<dyn Storage<DidDocument>>,
    did_domain: String,
    latency: LatencySimulator,
}

impl DidService {
    pub fn new(
        storage: Arc<dyn Storage<DidDocument>>,
        did_domain: impl Into<String>,
        latency: LatencySimulator,
    ) -> Self {
        Self {
            storage,
            did_domain: did_domain.into(),
            latency,
        }
    }

    pub async fn create(&self, request: CreateDidRequest) -> Result<DidDocument, DomainError> {
        validate_request(&request)?;

        let alias = request.alias.trim().to_string();
        let did = match request.did.as_deref().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => Did::parse(explicit)?,
            _ => self.mint(&alias)?,
        };

        self.latency.pause().await;

        let method = VerificationMethod::ed25519(&did, KEY_FRAGMENT, mock_public_key());
        let mut document = DidDocument::new(did.clone(), alias, method);

        if request.pending {
            document = document.pending();
        }

        let document = self
            .storage
            .create(document)
            .await
            .map_err(|e| match e {
                DomainError::Conflict { .. } => {
                    DomainError::conflict(format!("DID '{}' is already registered", did))
                }
                other => other,
            })?;

        info!(did = %document.id(), alias = %document.alias(), status = %document.status(), "Registered DID");
        Ok(document)
    }

    pub async fn list(&self) -> Result<Vec<DidDocument>, DomainError> {
        self.latency.pause().await;
        self.storage.list().await
    }

    /// Number of records, also used as a readiness probe
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }

    pub async fn get(&self, did: &str) -> Result<DidDocument, DomainError> {
        let key = Did::parse(did)?;
        self.latency.pause().await;

        self.storage
            .get(&key)
            .await?
            .ok_or_else(|| not_found(did))
    }

    pub async fn update_alias(
        &self,
        did: &str,
        request: UpdateDidAliasRequest,
    ) -> Result<DidDocument, DomainError> {
        validate_request(&request)?;
        let key = Did::parse(did)?;
        self.latency.pause().await;

        let alias = request.alias.trim().to_string();
        let updated = self
            .storage
            .modify(&key, &|doc: &mut DidDocument| doc.set_alias(alias.clone()))
            .await
            .map_err(|e| rename_not_found(e, did))?;

        info!(did = %did, alias = %updated.alias(), "Updated DID alias");
        Ok(updated)
    }

    pub async fn activate(&self, did: &str) -> Result<DidDocument, DomainError> {
        let key = Did::parse(did)?;
        self.latency.pause().await;

        let activated = self
            .storage
            .modify(&key, &|doc: &mut DidDocument| doc.activate())
            .await
            .map_err(|e| rename_not_found(e, did))?;

        info!(did = %did, "Activated DID");
        Ok(activated)
    }

    pub async fn revoke(&self, did: &str) -> Result<DidDocument, DomainError> {
        let key = Did::parse(did)?;
        self.latency.pause().await;

        let revoked = self
            .storage
            .modify(&key, &|doc: &mut DidDocument| doc.revoke())
            .await
            .map_err(|e| rename_not_found(e, did))?;

        info!(did = %did, "Revoked DID");
        Ok(revoked)
    }

    /// Look up a DID that is allowed to issue credentials
    pub async fn find_active(&self, did: &str) -> Result<DidDocument, DomainError> {
        let key = Did::parse(did)?;

        let document = self.storage.get(&key).await?.ok_or_else(|| not_found(did))?;

        if !document.is_active() {
            return Err(DomainError::invalid_state(format!(
                "DID '{}' is {} and cannot be used",
                did,
                document.status()
            )));
        }

        Ok(document)
    }

    fn mint(&self, alias: &str) -> Result<Did, DomainError> {
        let slug = match slugify(alias) {
            s if s.is_empty() => "org".to_string(),
            s => s,
        };
        let suffix = uuid::Uuid::new_v4().simple().to_string();

        Did::parse(format!("did:web:{}:{}-{}", self.did_domain, slug, &suffix[..6]))
            .map_err(|_| {
                DomainError::configuration(format!(
                    "Organization DID domain '{}' does not produce valid DIDs",
                    self.did_domain
                ))
            })
    }
}

/// Multibase (`u`, base64url) encoding of 32 random bytes
fn mock_public_key() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("u{}", URL_SAFE_NO_PAD.encode(bytes))
}

fn not_found(did: &str) -> DomainError {
    DomainError::not_found(format!("DID '{}' not found", did))
}

fn rename_not_found(error: DomainError, did: &str) -> DomainError {
    match error {
        DomainError::NotFound { .. } => not_found(did),
        other => other,
    }
}
