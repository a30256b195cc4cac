//! API key service
//!
//! Create, list, revoke and verify keys. The full token only ever leaves
//! this service inside [`CreatedApiKey`].

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::domain::api_key::{ApiKey, ApiKeyId, CreateApiKeyRequest};
use crate::domain::storage::Storage;
use crate::domain::validation::validate_request;
use crate::domain::DomainError;
use crate::infrastructure::latency::LatencySimulator;

use super::generator::{hash_token, hashes_match, ApiKeyGenerator};

/// Result of creating a key
#[derive(Debug, Clone)]
pub struct CreatedApiKey {
    pub api_key: ApiKey,
    /// Full token, returned exactly once
    pub token: String,
}

#[derive(Debug)]
pub struct ApiKeyService {
    storage: Arc<dyn Storage<ApiKey>>,
    generator: ApiKeyGenerator,
    latency: LatencySimulator,
}

impl ApiKeyService {
    pub fn new(storage: Arc<dyn Storage<ApiKey>>, latency: LatencySimulator) -> Self {
        Self {
            storage,
            generator: ApiKeyGenerator::live(),
            latency,
        }
    }

    pub async fn create(&self, request: CreateApiKeyRequest) -> Result<CreatedApiKey, DomainError> {
        validate_request(&request)?;
        self.latency.pause().await;

        let generated = self.generator.generate();
        let mut api_key = ApiKey::new(
            ApiKeyId::generate(),
            request.name.trim(),
            &generated.hash,
            &generated.prefix,
        )
        .with_permissions(dedup(request.permissions));

        if let Some(days) = request.expires_in_days {
            api_key = api_key.with_expiration(Utc::now() + Duration::days(i64::from(days)));
        }

        let api_key = self.storage.create(api_key).await?;

        info!(
            id = %api_key.id(),
            name = %api_key.name(),
            prefix = %api_key.key_prefix(),
            "Created API key"
        );

        Ok(CreatedApiKey {
            api_key,
            token: generated.token,
        })
    }

    pub async fn list(&self) -> Result<Vec<ApiKey>, DomainError> {
        self.latency.pause().await;
        self.storage.list().await
    }

    /// Number of records, also used as a readiness probe
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }

    pub async fn get(&self, id: &str) -> Result<ApiKey, DomainError> {
        self.latency.pause().await;

        self.storage
            .get(&ApiKeyId::new(id))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("API key '{}' not found", id)))
    }

    pub async fn revoke(&self, id: &str) -> Result<ApiKey, DomainError> {
        self.latency.pause().await;

        let revoked = self
            .storage
            .modify(&ApiKeyId::new(id), &|key: &mut ApiKey| key.revoke())
            .await
            .map_err(|e| rename_not_found(e, id))?;

        info!(id = %id, "Revoked API key");
        Ok(revoked)
    }

    /// Authenticate a full token and record its use
    pub async fn verify(&self, token: &str) -> Result<ApiKey, DomainError> {
        if token.trim().is_empty() {
            return Err(DomainError::invalid_field("token", "Token is required"));
        }

        let hash = hash_token(token.trim());
        let found = self
            .storage
            .find(&|key: &ApiKey| hashes_match(key.secret_hash(), &hash))
            .await?;

        let Some(api_key) = found else {
            warn!("API key verification failed: unknown token");
            return Err(DomainError::not_found("API key not recognised"));
        };

        if !api_key.is_usable() {
            warn!(id = %api_key.id(), status = %api_key.status(), "API key verification failed: key not usable");
            return Err(DomainError::invalid_state(format!(
                "API key '{}' is revoked or expired",
                api_key.id()
            )));
        }

        let used = self
            .storage
            .modify(api_key.id(), &|key: &mut ApiKey| -> Result<(), DomainError> {
                key.record_usage();
                Ok(())
            })
            .await?;

        debug!(id = %used.id(), "Verified API key");
        Ok(used)
    }
}

fn dedup(permissions: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(permissions.len());

    for permission in permissions {
        if !unique.contains(&permission) {
            unique.push(permission);
        }
    }

    unique
}

fn rename_not_found(error: DomainError, id: &str) -> DomainError {
    match error {
        DomainError::NotFound { .. } => DomainError::not_found(format!("API key '{}' not found", id)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::api_key::ApiKeyStatus;
    use crate::infrastructure::storage::InMemoryStorage;

    fn service() -> ApiKeyService {
        ApiKeyService::new(Arc::new(InMemoryStorage::new()), LatencySimulator::none())
    }

    fn request(name: &str) -> CreateApiKeyRequest {
        CreateApiKeyRequest {
            name: name.to_string(),
            permissions: vec!["dpp:read".to_string(), "dpp:write".to_string()],
            expires_in_days: Some(90),
        }
    }

    #[tokio::test]
    async fn test_create_returns_token_once() {
        let service = service();

        let created = service.create(request("ERP integration")).await.unwrap();
        assert!(created.token.starts_with("nrv_live_"));
        assert!(created.token.starts_with(created.api_key.key_prefix()));
        assert!(created.api_key.expires_at().is_some());

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);

        let json = serde_json::to_string(&listed).unwrap();
        assert!(!json.contains(&created.token));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let service = service();
        let mut bad = request("x");
        bad.permissions.clear();

        let err = service.create(bad).await.unwrap_err();
        assert_eq!(err.field_errors().len(), 2);
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_dedups_permissions() {
        let service = service();
        let mut req = request("Dupes");
        req.permissions.push("dpp:read".to_string());

        let created = service.create(req).await.unwrap();
        assert_eq!(created.api_key.permissions(), &["dpp:read", "dpp:write"]);
    }

    #[tokio::test]
    async fn test_revoke_twice_fails() {
        let service = service();
        let created = service.create(request("Temp")).await.unwrap();
        let id = created.api_key.id().as_str().to_string();

        let revoked = service.revoke(&id).await.unwrap();
        assert_eq!(revoked.status(), ApiKeyStatus::Revoked);

        let err = service.revoke(&id).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));
    }

    #[tokio::test]
    async fn test_revoke_unknown_key() {
        let err = service().revoke("key_missing").await.unwrap_err();
        assert_eq!(err.message(), "API key 'key_missing' not found");
    }

    #[tokio::test]
    async fn test_verify_records_usage() {
        let service = service();
        let created = service.create(request("Verifier")).await.unwrap();

        let verified = service.verify(&created.token).await.unwrap();
        assert_eq!(verified.id(), created.api_key.id());
        assert!(verified.last_used_at().is_some());
    }

    #[tokio::test]
    async fn test_verify_rejects_revoked_and_unknown() {
        let service = service();
        let created = service.create(request("Short lived")).await.unwrap();
        service.revoke(created.api_key.id().as_str()).await.unwrap();

        let err = service.verify(&created.token).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState { .. }));

        let err = service.verify("nrv_live_nope").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = service.verify("  ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_get() {
        let service = service();
        let created = service.create(request("Lookup")).await.unwrap();

        let found = service.get(created.api_key.id().as_str()).await.unwrap();
        assert_eq!(found.name(), "Lookup");

        assert!(service.get("key_missing").await.is_err());
    }
}
