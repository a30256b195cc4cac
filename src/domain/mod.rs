//! Domain layer - Entities, requests and invariants of the passport platform

pub mod api_key;
pub mod compliance;
pub mod credential;
pub mod did;
pub mod error;
pub mod gs1;
pub mod staking;
pub mod storage;
pub mod team;
pub mod validation;

pub use error::DomainError;
pub use storage::{Storage, StorageEntity, StorageKey};
pub use validation::{FieldError, validate_request};
