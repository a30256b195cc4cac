//! Credential service
//!
//! Records credentials issued by the organization's DIDs. Issuers are
//! matched by DID string against the DID registry; no signing happens.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::domain::credential::{
    to_verifiable_credential, CredentialId, CredentialStatus, IssueCredentialRequest,
    IssuedCredential,
};
use crate::domain::storage::Storage;
use crate::domain::validation::validate_request;
use crate::domain::DomainError;
use crate::infrastructure::did::DidService;
use crate::infrastructure::latency::LatencySimulator;

#[derive(Debug)]
pub struct CredentialService {
    storage: Arc<dyn Storage<IssuedCredential>>,
    dids: Arc<DidService>,
    latency: LatencySimulator,
}

impl CredentialService {
    pub fn new(
        storage: Arc<dyn Storage<IssuedCredential>>,
        dids: Arc<DidService>,
        latency: LatencySimulator,
    ) -> Self {
        Self {
            storage,
            dids,
            latency,
        }
    }

    pub async fn issue(&self, request: IssueCredentialRequest) -> Result<IssuedCredential, DomainError> {
        validate_request(&request)?;

        let issuer = request.issuer_did.trim();
        self.dids.find_active(issuer).await.map_err(|e| match e {
            DomainError::NotFound { .. } | DomainError::Validation { .. } => DomainError::invalid_field(
                "issuer_did",
                format!("Issuer DID '{}' is not registered", issuer),
            ),
            other => other,
        })?;

        self.latency.pause().await;

        let status = if request.pending {
            CredentialStatus::Pending
        } else {
            CredentialStatus::Valid
        };

        let credential = IssuedCredential::new(
            CredentialId::generate(),
            request.credential_type.trim(),
            issuer,
            request.subject_dpp_id.trim(),
            status,
        );
        let credential = self.storage.create(credential).await?;

        info!(
            id = %credential.id(),
            credential_type = %credential.credential_type(),
            issuer = %credential.issuer(),
            subject = %credential.subject_dpp_id(),
            "Issued credential"
        );
        Ok(credential)
    }

    /// All credentials, optionally only those about one product passport
    pub async fn list(&self, subject_dpp_id: Option<&str>) -> Result<Vec<IssuedCredential>, DomainError> {
        self.latency.pause().await;

        let credentials = self.storage.list().await?;

        Ok(match subject_dpp_id {
            Some(subject) => credentials
                .into_iter()
                .filter(|c| c.subject_dpp_id() == subject)
                .collect(),
            None => credentials,
        })
    }

    /// Number of records, also used as a readiness probe
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }

    pub async fn get(&self, id: &str) -> Result<IssuedCredential, DomainError> {
        self.latency.pause().await;

        self.storage
            .get(&CredentialId::new(id))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Credential '{}' not found", id)))
    }

    /// Render a stored credential as W3C VC JSON with a mock proof
    pub async fn verifiable_credential(&self, id: &str) -> Result<Value, DomainError> {
        let credential = self.get(id).await?;

        // The issuer may have been revoked since issuance; keep rendering it
        let verification_method = match self.dids.get(credential.issuer()).await {
            Ok(document) => document
                .assertion_method()
                .first()
                .cloned()
                .unwrap_or_else(|| format!("{}#key-1", credential.issuer())),
            Err(DomainError::NotFound { .. }) | Err(DomainError::Validation { .. }) => {
                format!("{}#key-1", credential.issuer())
            }
            Err(other) => return Err(other),
        };

        Ok(to_verifiable_credential(&credential, &verification_method))
    }
}
