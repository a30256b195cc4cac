//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// In-place mutation applied under the collection's write lock
///
/// Returning an error leaves the entity untouched.
pub type Mutation<'a, E> = &'a (dyn Fn(&mut E) -> Result<(), DomainError> + Send + Sync);

/// Generic storage for one entity collection
///
/// Collections keep insertion order; `list` returns entities oldest first.
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Inserts a new entity, conflict if the key exists
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Inserts a new entity unless `clashes` matches an existing one
    ///
    /// The scan and the insert happen under one lock, so two concurrent
    /// calls cannot both succeed for clashing entities.
    async fn create_unique(
        &self,
        entity: E,
        clashes: &(dyn for<'a, 'b> Fn(&'a E, &'b E) -> bool + Send + Sync),
        conflict_message: &str,
    ) -> Result<E, DomainError>;

    /// Applies `mutation` to the stored entity and returns the result
    async fn modify(&self, key: &E::Key, mutation: Mutation<'_, E>) -> Result<E, DomainError>;

    /// Removes an entity, returns false if it was absent
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;

    async fn find(
        &self,
        predicate: &(dyn for<'a> Fn(&'a E) -> bool + Send + Sync),
    ) -> Result<Option<E>, DomainError> {
        Ok(self.list().await?.into_iter().find(|e| predicate(e)))
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.get(key).await?.is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}
