//! In-memory storage implementation

use std::fmt::Debug;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::storage::{Mutation, Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe, insertion-ordered in-memory collection
///
/// Data lives for the lifetime of the process only.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<Vec<E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty collection
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(Vec::new()),
        }
    }

    /// Creates a collection pre-populated with entities, keeping their order
    pub fn with_entities(entities: Vec<E>) -> Self {
        Self {
            entities: RwLock::new(entities),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<E>>, DomainError> {
        self.entities
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<E>>, DomainError> {
        self.entities
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))
    }
}

fn position<E: StorageEntity>(entities: &[E], key: &E::Key) -> Option<usize> {
    entities.iter().position(|e| e.key() == key)
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self.read()?;
        Ok(entities.iter().find(|e| e.key() == key).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        Ok(self.read()?.clone())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let mut entities = self.write()?;

        if position(&entities, entity.key()).is_some() {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                entity.key().as_str()
            )));
        }

        entities.push(entity.clone());
        Ok(entity)
    }

    async fn create_unique(
        &self,
        entity: E,
        clashes: &(dyn for<'a, 'b> Fn(&'a E, &'b E) -> bool + Send + Sync),
        conflict_message: &str,
    ) -> Result<E, DomainError> {
        let mut entities = self.write()?;

        if entities
            .iter()
            .any(|existing| existing.key() == entity.key() || clashes(existing, &entity))
        {
            return Err(DomainError::conflict(conflict_message));
        }

        entities.push(entity.clone());
        Ok(entity)
    }

    async fn modify(&self, key: &E::Key, mutation: Mutation<'_, E>) -> Result<E, DomainError> {
        let mut entities = self.write()?;

        let index = position(&entities, key).ok_or_else(|| {
            DomainError::not_found(format!("Entity with key '{}' not found", key.as_str()))
        })?;

        // Mutate a copy so a failed mutation leaves the stored entity intact
        let mut updated = entities[index].clone();
        mutation(&mut updated)?;
        entities[index] = updated.clone();

        Ok(updated)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let mut entities = self.write()?;
        let before = entities.len();

        entities.retain(|e| e.key() != key);
        Ok(entities.len() != before)
    }

    async fn find(
        &self,
        predicate: &(dyn for<'a> Fn(&'a E) -> bool + Send + Sync),
    ) -> Result<Option<E>, DomainError> {
        let entities = self.read()?;
        Ok(entities.iter().find(|e| predicate(e)).cloned())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(position(&self.read()?, key).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    struct TestId(String);

    impl StorageKey for TestId {
        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestEntity {
        id: TestId,
        name: String,
        value: i32,
    }

    impl StorageEntity for TestEntity {
        type Key = TestId;

        fn key(&self) -> &Self::Key {
            &self.id
        }
    }

    fn id(value: &str) -> TestId {
        TestId(value.to_string())
    }

    fn entity(key: &str, name: &str, value: i32) -> TestEntity {
        TestEntity {
            id: id(key),
            name: name.to_string(),
            value,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();
        let e = entity("1", "Test", 42);

        storage.create(e.clone()).await.unwrap();

        let result = storage.get(&id("1")).await.unwrap();
        assert_eq!(result, Some(e));
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();

        storage.create(entity("1", "Test", 42)).await.unwrap();
        let result = storage.create(entity("1", "Other", 7)).await;

        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_unique_rejects_clash() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();
        storage.create(entity("1", "Alpha", 1)).await.unwrap();

        let same_name = |a: &TestEntity, b: &TestEntity| a.name.eq_ignore_ascii_case(&b.name);
        let result = storage
            .create_unique(entity("2", "ALPHA", 2), &same_name, "name taken")
            .await;

        match result.unwrap_err() {
            DomainError::Conflict { message } => assert_eq!(message, "name taken"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(storage.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();

        storage.create(entity("b", "B", 2)).await.unwrap();
        storage.create(entity("a", "A", 1)).await.unwrap();
        storage.create(entity("c", "C", 3)).await.unwrap();

        let names: Vec<String> = storage
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[tokio::test]
    async fn test_modify_applies_mutation() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();
        storage.create(entity("1", "Test", 1)).await.unwrap();

        let updated = storage
            .modify(&id("1"), &|e: &mut TestEntity| -> Result<(), DomainError> {
                e.value += 10;
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(updated.value, 11);
        assert_eq!(storage.get(&id("1")).await.unwrap().unwrap().value, 11);
    }

    #[tokio::test]
    async fn test_failed_modify_leaves_entity_untouched() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();
        storage.create(entity("1", "Test", 1)).await.unwrap();

        let result = storage
            .modify(&id("1"), &|e: &mut TestEntity| -> Result<(), DomainError> {
                e.value = 99;
                Err(DomainError::invalid_state("nope"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(storage.get(&id("1")).await.unwrap().unwrap().value, 1);
    }

    #[tokio::test]
    async fn test_modify_not_found() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();

        let result = storage
            .modify(&id("missing"), &|_: &mut TestEntity| -> Result<(), DomainError> { Ok(()) })
            .await;

        assert!(matches!(result.unwrap_err(), DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let storage: InMemoryStorage<TestEntity> = InMemoryStorage::new();
        storage.create(entity("1", "Test", 42)).await.unwrap();

        assert!(storage.delete(&id("1")).await.unwrap());
        assert!(!storage.exists(&id("1")).await.unwrap());
        assert!(!storage.delete(&id("1")).await.unwrap());
    }

    #[tokio::test]
    async fn test_find() {
        let storage =
            InMemoryStorage::with_entities(vec![entity("1", "A", 1), entity("2", "B", 2)]);

        let found = storage.find(&|e: &TestEntity| e.value == 2).await.unwrap();
        assert_eq!(found.unwrap().name, "B");
        assert_eq!(storage.count().await.unwrap(), 2);
    }
}
